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

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoseGraphError {
    /// The call could not complete: endpoint unreachable, connection torn
    /// down before a response, or the request was cancelled.
    #[error("Interrupted: {0}")]
    Interrupted(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Service error {code}: {message}")]
    Service { code: i32, message: String },

    #[error("Invalid endpoint name: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl PoseGraphError {
    /// Returns true for the one error kind a caller may treat as a quiet
    /// termination rather than a failure.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, PoseGraphError::Interrupted(_))
    }
}

pub type Result<T> = std::result::Result<T, PoseGraphError>;
