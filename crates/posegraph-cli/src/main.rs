// Copyright 2026 posegraph Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! `save_graph` entry point.
//!
//! ```bash
//! save_graph graph.zip
//! ```

use anyhow::Result;
use posegraph_cli::{collect_args, is_interrupted, parse_invocation, process_env, run, until_interrupted};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the result line
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = collect_args(std::env::args_os())?;
    let invocation = match parse_invocation(&args) {
        Ok(invocation) => invocation,
        Err(early_exit) => match early_exit.status {
            Ok(()) => {
                println!("{}", early_exit.output);
                return Ok(());
            }
            Err(()) => {
                eprintln!("{}\nRun {} --help for more information.", early_exit.output, args[0]);
                std::process::exit(1);
            }
        },
    };

    let mut stdout = std::io::stdout();
    let outcome = until_interrupted(
        run(invocation, process_env, &mut stdout),
        tokio::signal::ctrl_c(),
    )
    .await;

    match outcome {
        Err(err) if is_interrupted(&err) => {
            tracing::debug!("save_graph interrupted: {}", err);
            Ok(())
        }
        other => other,
    }
}
