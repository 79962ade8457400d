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

//! Service Definitions
//!
//! A [`Service`] ties an endpoint's base name to its request and response
//! types. [`SaveGraph`] is the one operation this workspace calls.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A remote operation with a typed request and response.
pub trait Service {
    /// Endpoint name relative to the service namespace
    const BASE_NAME: &'static str;

    type Request: Serialize + DeserializeOwned + Send + Sync;
    type Response: Serialize + DeserializeOwned + Send;
}

/// Asks the mapping service to write its pose graph to a file.
#[derive(Debug, Clone, Copy)]
pub struct SaveGraph;

impl Service for SaveGraph {
    const BASE_NAME: &'static str = "save_graph";

    type Request = SaveGraphRequest;
    type Response = SaveGraphResponse;
}

/// The filename is forwarded untouched; the service owns persistence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaveGraphRequest {
    pub filename: String,
}

impl SaveGraphRequest {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaveGraphResponse {
    pub success: bool,
}
