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

//! posegraph Common Types and Transport
//!
//! Shared protocol and transport pieces for calling the mapping service:
//!
//! - **Protocol Layer**: JSON-RPC envelopes, the [`Service`] trait and the
//!   [`SaveGraph`] definition, validated [`EndpointName`]s, and the
//!   [`PoseGraphError`] taxonomy
//! - **Transport Layer**: HTTP/1.1 helpers for building and decoding calls
//!
//! # Example
//!
//! ```
//! use posegraph_common::{EndpointName, SaveGraph, SaveGraphRequest, Service};
//!
//! let endpoint = EndpointName::resolve("/husky/blam_slam", SaveGraph::BASE_NAME).unwrap();
//! assert_eq!(endpoint.as_str(), "/husky/blam_slam/save_graph");
//!
//! let request = SaveGraphRequest::new("graph.zip");
//! assert_eq!(request.filename, "graph.zip");
//! ```

pub mod protocol;
pub mod transport;

pub use protocol::*;
