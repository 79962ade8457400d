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

//! posegraph Client
//!
//! Calls typed services on the mapping service host:
//!
//! ```no_run
//! use posegraph_client::{Session, SessionConfig};
//! use posegraph_common::{EndpointName, SaveGraph, SaveGraphRequest, Service};
//!
//! # async fn example() -> posegraph_common::Result<()> {
//! let session = Session::init(SessionConfig::new("http://127.0.0.1:11311"))?;
//! let endpoint = EndpointName::resolve("/husky/blam_slam", SaveGraph::BASE_NAME)?;
//! let proxy = session.service_proxy::<SaveGraph>(endpoint);
//!
//! let response = proxy.call(&SaveGraphRequest::new("graph.zip")).await?;
//! println!("saved: {}", response.success);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod session;

pub use client::ServiceProxy;
pub use session::{Session, SessionConfig, DEFAULT_NODE_NAME};
