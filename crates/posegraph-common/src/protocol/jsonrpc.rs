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

//! JSON-RPC 2.0 Envelope Types
//!
//! Every service call travels as one JSON-RPC 2.0 request whose `method` is
//! the absolute endpoint name and whose `params` is the service request:
//!
//! ```text
//! {"jsonrpc":"2.0","method":"/husky/blam_slam/save_graph","params":{"filename":"graph.zip"},"id":1}
//! {"jsonrpc":"2.0","result":{"success":true},"error":null,"id":1}
//! ```
//!
//! # Error Codes
//!
//! - `-32700`: Parse error
//! - `-32600`: Invalid request
//! - `-32601`: Method not found (the endpoint name does not resolve)
//! - `-32602`: Invalid params
//! - `-32603`: Internal error
//! - `-32000` to `-32099`: Server error

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{PoseGraphError, Result};

/// Protocol version carried in every envelope
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (must be "2.0")
    pub jsonrpc: String,
    /// Endpoint name of the operation to invoke
    pub method: String,
    /// Service request, serialized
    pub params: Value,
    /// Request identifier
    pub id: Value,
}

/// JSON-RPC 2.0 response
///
/// `result` and `error` default to `None` so that servers which omit the
/// unused member still decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (must be "2.0")
    pub jsonrpc: String,
    /// Result value on success
    #[serde(default)]
    pub result: Option<Value>,
    /// Error object on failure
    #[serde(default)]
    pub error: Option<JsonRpcError>,
    /// Request identifier (must match the request id)
    pub id: Value,
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// The method does not exist / is not available
pub const METHOD_NOT_FOUND: i32 = -32601;
/// Invalid method parameter(s)
pub const INVALID_PARAMS: i32 = -32602;
/// Internal JSON-RPC error
pub const INTERNAL_ERROR: i32 = -32603;

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, params: Value, id: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.into(),
            method: method.into(),
            params,
            id,
        }
    }
}

impl JsonRpcError {
    pub fn method_not_found() -> Self {
        Self {
            code: METHOD_NOT_FOUND,
            message: "Method not found".into(),
            data: None,
        }
    }

    pub fn invalid_params(msg: &str) -> Self {
        Self {
            code: INVALID_PARAMS,
            message: msg.into(),
            data: None,
        }
    }

    pub fn internal_error(msg: &str) -> Self {
        Self {
            code: INTERNAL_ERROR,
            message: msg.into(),
            data: None,
        }
    }
}

impl From<JsonRpcError> for PoseGraphError {
    fn from(err: JsonRpcError) -> Self {
        PoseGraphError::Service {
            code: err.code,
            message: err.message,
        }
    }
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.into(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: Value, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.into(),
            result: None,
            error: Some(error),
            id,
        }
    }

    /// Unwraps the envelope of a response to the request with `expected_id`.
    ///
    /// An error object wins over a result. A response for some other request
    /// id, or one with neither member, is an `InvalidResponse`.
    pub fn into_result(self, expected_id: &Value) -> Result<Value> {
        if self.jsonrpc != JSONRPC_VERSION {
            return Err(PoseGraphError::InvalidResponse(format!(
                "Unsupported JSON-RPC version '{}'",
                self.jsonrpc
            )));
        }

        if &self.id != expected_id {
            return Err(PoseGraphError::InvalidResponse(format!(
                "Response id {} does not match request id {}",
                self.id, expected_id
            )));
        }

        if let Some(error) = self.error {
            return Err(error.into());
        }

        self.result.ok_or_else(|| {
            PoseGraphError::InvalidResponse("Missing result in success response".to_string())
        })
    }
}
