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

//! Client Session
//!
//! A [`Session`] is the process-level state every call needs: the service
//! URL, the caller's node name and the HTTP client. It is created once with
//! [`Session::init`] and handed to whatever makes calls.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::Uri;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use posegraph_common::protocol::error::{PoseGraphError, Result};
use posegraph_common::protocol::{EndpointName, JsonRpcRequest, JsonRpcResponse, Service};
use posegraph_common::transport::{validate_http_url, HttpTransport};

use crate::client::ServiceProxy;

/// Node name used when the caller does not pick one
pub const DEFAULT_NODE_NAME: &str = "save_graph_client";

/// Settings needed to bring a session up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Base URL of the service host, e.g. `http://127.0.0.1:11311`
    pub url: String,
    /// Name this process identifies itself by on every call
    pub node_name: String,
}

impl SessionConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            node_name: DEFAULT_NODE_NAME.to_string(),
        }
    }

    pub fn with_node_name(mut self, node_name: impl Into<String>) -> Self {
        self.node_name = node_name.into();
        self
    }
}

/// An initialized client session.
///
/// Cloning is cheap and shares the HTTP client and request id counter.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    uri: Uri,
    node_name: String,
    client: Client<HttpConnector, Full<Bytes>>,
    next_id: AtomicU64,
}

impl Session {
    /// Validates the configuration and builds the HTTP client. No network
    /// traffic happens until the first call.
    pub fn init(config: SessionConfig) -> Result<Self> {
        let uri = validate_http_url(&config.url)?;
        let client = Client::builder(TokioExecutor::new()).build_http();

        tracing::debug!(node = %config.node_name, url = %uri, "session initialized");

        Ok(Self {
            inner: Arc::new(SessionInner {
                uri,
                node_name: config.node_name,
                client,
                next_id: AtomicU64::new(1),
            }),
        })
    }

    pub fn uri(&self) -> &Uri {
        &self.inner.uri
    }

    pub fn node_name(&self) -> &str {
        &self.inner.node_name
    }

    /// Binds `endpoint` to a callable proxy for service `S`.
    pub fn service_proxy<S: Service>(&self, endpoint: EndpointName) -> ServiceProxy<S> {
        ServiceProxy::new(self.clone(), endpoint)
    }

    pub(crate) fn next_request_id(&self) -> u64 {
        self.inner.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Sends one envelope and waits, without a timeout, for the reply.
    pub(crate) async fn send(&self, jsonrpc: &JsonRpcRequest) -> Result<JsonRpcResponse> {
        let request = HttpTransport::build_request(&self.inner.uri, &self.inner.node_name, jsonrpc)?;

        let response = self
            .inner
            .client
            .request(request)
            .await
            .map_err(classify_client_error)?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| PoseGraphError::Interrupted(format!("Failed to read response: {}", e)))?
            .to_bytes();

        HttpTransport::parse_response(status, body)
    }
}

/// Sorts a client failure into "the call was cut off" versus everything else.
///
/// Only a peer that refused, reset or dropped the connection counts as cut
/// off. A connect failure for any other reason (DNS lookup, bad address) is a
/// transport error and must reach the user.
fn classify_client_error(err: hyper_util::client::legacy::Error) -> PoseGraphError {
    let detail = match std::error::Error::source(&err) {
        Some(source) => format!("{}: {}", err, source),
        None => err.to_string(),
    };

    if err.is_connect() {
        return if is_connection_lost(&err) {
            PoseGraphError::Interrupted(detail)
        } else {
            PoseGraphError::Transport(detail)
        };
    }

    let hyper_err = std::error::Error::source(&err).and_then(|s| s.downcast_ref::<hyper::Error>());
    if let Some(hyper_err) = hyper_err {
        if hyper_err.is_canceled()
            || hyper_err.is_closed()
            || hyper_err.is_incomplete_message()
            || is_connection_lost(hyper_err)
        {
            return PoseGraphError::Interrupted(detail);
        }
    }

    PoseGraphError::Transport(detail)
}

/// Walks the source chain of `err` to its first `std::io::Error` and checks
/// whether the peer refused or tore down the connection.
fn is_connection_lost(err: &(dyn std::error::Error + 'static)) -> bool {
    use std::io::ErrorKind;

    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            return matches!(
                io.kind(),
                ErrorKind::ConnectionRefused
                    | ErrorKind::ConnectionReset
                    | ErrorKind::ConnectionAborted
                    | ErrorKind::BrokenPipe
                    | ErrorKind::UnexpectedEof
            );
        }
        current = e.source();
    }

    false
}
