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

//! HTTP Transport Utilities
//!
//! Conversion between JSON-RPC envelopes and HTTP/1.1 messages. The client
//! side builds POST requests and decodes responses; the server side helpers
//! are what a service (or a test double of one) uses to answer.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response, StatusCode, Uri};

use crate::protocol::error::{PoseGraphError, Result};
use crate::protocol::{JsonRpcRequest, JsonRpcResponse};

/// Header naming the calling node
pub const CALLER_ID_HEADER: &str = "X-Caller-Id";

/// Type alias for outgoing requests with a full body
pub type HttpRequest = Request<Full<Bytes>>;

/// Type alias for responses with a full body
pub type HttpResponse = Response<Full<Bytes>>;

/// Checks that `url` is a plain `http://` URI with a host.
pub fn validate_http_url(url: &str) -> Result<Uri> {
    if url.starts_with("https://") {
        return Err(PoseGraphError::InvalidUrl(format!(
            "'{}': TLS is not supported, use http://",
            url
        )));
    }

    if !url.starts_with("http://") {
        return Err(PoseGraphError::InvalidUrl(format!(
            "'{}' must start with http://",
            url
        )));
    }

    let uri: Uri = url
        .parse()
        .map_err(|e| PoseGraphError::InvalidUrl(format!("'{}': {}", url, e)))?;
    if uri.host().is_none() {
        return Err(PoseGraphError::InvalidUrl(format!("'{}' has no host", url)));
    }

    Ok(uri)
}

pub struct HttpTransport;

impl HttpTransport {
    /// Builds the POST carrying one JSON-RPC request.
    pub fn build_request(uri: &Uri, caller_id: &str, jsonrpc: &JsonRpcRequest) -> Result<HttpRequest> {
        let body = serde_json::to_vec(jsonrpc)?;

        Request::builder()
            .method("POST")
            .uri(uri.clone())
            .header("Content-Type", "application/json")
            .header(CALLER_ID_HEADER, caller_id)
            .body(Full::new(Bytes::from(body)))
            .map_err(|e| PoseGraphError::Transport(format!("Failed to build request: {}", e)))
    }

    /// Decodes the body of a service reply. Anything but 200 OK is a
    /// transport failure, since JSON-RPC errors travel inside a 200.
    pub fn parse_response(status: StatusCode, body: Bytes) -> Result<JsonRpcResponse> {
        if status != StatusCode::OK {
            return Err(PoseGraphError::Transport(format!(
                "Unexpected HTTP status {}",
                status
            )));
        }

        Ok(serde_json::from_slice(&body)?)
    }

    /// Parses a JSON-RPC request from an HTTP body (service side).
    pub fn parse_jsonrpc(body: Bytes) -> Result<JsonRpcRequest> {
        Ok(serde_json::from_slice(&body)?)
    }

    /// Wraps a JSON-RPC response in a 200 OK (service side).
    pub fn to_http_response(jsonrpc: &JsonRpcResponse) -> Result<HttpResponse> {
        let body = serde_json::to_vec(jsonrpc)?;

        Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "application/json")
            .body(Full::new(Bytes::from(body)))
            .map_err(|e| PoseGraphError::Transport(format!("Failed to build response: {}", e)))
    }
}
