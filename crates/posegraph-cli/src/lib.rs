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

//! # posegraph CLI
//!
//! The `save_graph` command asks a running mapping service to write its pose
//! graph to a file and reports whether it did.
//!
//! ```bash
//! save_graph graph.zip
//! save_graph --url http://10.0.0.5:11311 --namespace /husky/blam_slam graph.zip
//! ```
//!
//! ## Configuration
//!
//! Each setting resolves as flag, then environment variable, then default:
//!
//! - service URL: `--url`, `POSEGRAPH_SERVICE_URL`, `http://127.0.0.1:11311`
//! - namespace: `--namespace`, `POSEGRAPH_NAMESPACE`, `/husky/blam_slam`
//!
//! ## Exit behavior
//!
//! Usage, a saved graph and a refused save all exit 0. An interrupted call
//! exits 0 without output. Anything else is reported on stderr with a
//! non-zero exit.

use std::ffi::OsString;
use std::future::Future;
use std::io::Write;

use anyhow::{anyhow, Result};
use argh::{EarlyExit, FromArgs};
use posegraph_client::{Session, SessionConfig};
use posegraph_common::{EndpointName, PoseGraphError, SaveGraph, SaveGraphRequest, Service};


/// Environment variable holding the service URL
pub const SERVICE_URL_ENV: &str = "POSEGRAPH_SERVICE_URL";

/// Environment variable holding the endpoint namespace
pub const NAMESPACE_ENV: &str = "POSEGRAPH_NAMESPACE";

pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:11311";

pub const DEFAULT_NAMESPACE: &str = "/husky/blam_slam";

/// Program name used when the argument list is empty
const FALLBACK_PROGRAM: &str = "save_graph";

#[derive(FromArgs, Debug, PartialEq)]
/// ask the mapping service to save its pose graph to a file
pub struct SaveGraphArgs {
    /// file the service should write the pose graph to
    ///
    /// Passed to the service as-is; the service resolves it on its side.
    #[argh(positional)]
    pub filename: String,

    /// base URL of the service host
    ///
    /// Falls back to POSEGRAPH_SERVICE_URL, then http://127.0.0.1:11311.
    #[argh(option, short = 'u')]
    pub url: Option<String>,

    /// namespace the save_graph endpoint lives in
    ///
    /// Falls back to POSEGRAPH_NAMESPACE, then /husky/blam_slam.
    #[argh(option, short = 'n')]
    pub namespace: Option<String>,

    /// node name this client identifies itself by
    #[argh(option, long = "node-name", default = "posegraph_client::DEFAULT_NODE_NAME.to_string()")]
    pub node_name: String,
}

/// Settings after flags, environment and defaults are layered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokerConfig {
    pub url: String,
    pub namespace: String,
    pub node_name: String,
}

impl InvokerConfig {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new(&self.url).with_node_name(&self.node_name)
    }
}

impl SaveGraphArgs {
    /// Layers flags over `env` over defaults. `env` looks up a variable by
    /// name, normally [`process_env`].
    pub fn resolve(&self, env: impl Fn(&str) -> Option<String>) -> InvokerConfig {
        let url = self
            .url
            .clone()
            .or_else(|| env(SERVICE_URL_ENV))
            .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());

        let namespace = self
            .namespace
            .clone()
            .or_else(|| env(NAMESPACE_ENV))
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

        InvokerConfig {
            url,
            namespace,
            node_name: self.node_name.clone(),
        }
    }
}

/// Reads a variable from the process environment, ignoring unset and
/// non-UTF-8 values.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// What the command line asked for.
#[derive(Debug, PartialEq)]
pub enum Invocation {
    /// No filename given; carries the program name for the usage line
    Usage(String),
    Save(SaveGraphArgs),
}

/// Converts the raw process arguments, failing on the first one that is not
/// valid UTF-8.
pub fn collect_args(args: impl IntoIterator<Item = OsString>) -> Result<Vec<String>> {
    args.into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| anyhow!("argument is not valid UTF-8: {:?}", arg))
        })
        .collect()
}

/// Classifies the raw argument list, program name first.
///
/// Fewer than two arguments is a usage request, not an error. A single
/// argument other than `-h`/`--help` is the filename, taken verbatim even if
/// it starts with `-`. Otherwise the arguments after the program name are
/// parsed by argh, whose `EarlyExit` covers `--help` and malformed flags.
pub fn parse_invocation(args: &[String]) -> std::result::Result<Invocation, EarlyExit> {
    let program = args.first().map(String::as_str).unwrap_or(FALLBACK_PROGRAM);

    if args.len() < 2 {
        return Ok(Invocation::Usage(program.to_string()));
    }

    if args.len() == 2 && !matches!(args[1].as_str(), "-h" | "--help") {
        return Ok(Invocation::Save(SaveGraphArgs {
            filename: args[1].clone(),
            url: None,
            namespace: None,
            node_name: posegraph_client::DEFAULT_NODE_NAME.to_string(),
        }));
    }

    let rest: Vec<&str> = args[1..].iter().map(String::as_str).collect();
    SaveGraphArgs::from_args(&[program], &rest).map(Invocation::Save)
}

pub fn usage_line(program: &str) -> String {
    format!("Usage: {} filename.zip", program)
}

/// Writes the one-line verdict for a completed call.
pub fn report<W: Write>(success: bool, filename: &str, out: &mut W) -> std::io::Result<()> {
    if success {
        writeln!(out, "Successfully saved the pose graph to {}.", filename)
    } else {
        writeln!(
            out,
            "An error occurred while trying to save the pose graph to {}.",
            filename
        )
    }
}

/// Resolves the save_graph endpoint in `namespace`, calls it once with
/// `filename` and reports the outcome to `out`.
///
/// Returns the service's verdict. A refused save is `Ok(false)`, not an error.
pub async fn save_graph<W: Write>(
    session: &Session,
    namespace: &str,
    filename: &str,
    out: &mut W,
) -> Result<bool> {
    let endpoint = EndpointName::resolve(namespace, SaveGraph::BASE_NAME)?;
    let proxy = session.service_proxy::<SaveGraph>(endpoint);

    let response = proxy.call(&SaveGraphRequest::new(filename)).await?;

    tracing::info!(
        endpoint = %proxy.endpoint(),
        filename,
        success = response.success,
        "save_graph returned"
    );

    report(response.success, filename, out)?;
    Ok(response.success)
}

/// Carries out an invocation against the environment `env`.
pub async fn run<W: Write>(
    invocation: Invocation,
    env: impl Fn(&str) -> Option<String>,
    out: &mut W,
) -> Result<()> {
    match invocation {
        Invocation::Usage(program) => {
            writeln!(out, "{}", usage_line(&program))?;
        }
        Invocation::Save(args) => {
            let config = args.resolve(env);
            let session = Session::init(config.session_config())?;
            save_graph(&session, &config.namespace, &args.filename, out).await?;
        }
    }

    Ok(())
}

/// Runs `work` until it finishes or `signal` fires, in which case the call
/// counts as interrupted.
///
/// If the signal handler could not be installed, `signal` resolves to an
/// error; that is logged and `work` runs to completion.
pub async fn until_interrupted<F, S>(work: F, signal: S) -> Result<()>
where
    F: Future<Output = Result<()>>,
    S: Future<Output = std::io::Result<()>>,
{
    let signal = async move {
        if let Err(err) = signal.await {
            tracing::warn!("Ctrl-C handler unavailable: {}", err);
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = work => result,
        _ = signal => Err(PoseGraphError::Interrupted("received Ctrl-C".to_string()).into()),
    }
}

/// True when `err` is the one failure the command swallows: the call was cut
/// off before the service answered.
pub fn is_interrupted(err: &anyhow::Error) -> bool {
    err.downcast_ref::<PoseGraphError>()
        .map(PoseGraphError::is_interrupted)
        .unwrap_or(false)
}
