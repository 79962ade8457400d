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

use std::fmt;
use std::marker::PhantomData;

use posegraph_common::protocol::error::{PoseGraphError, Result};
use posegraph_common::protocol::{EndpointName, JsonRpcRequest, Service};
use serde_json::json;

use crate::session::Session;

/// An endpoint name resolved to something callable.
///
/// Each [`call`](ServiceProxy::call) is exactly one request on the wire. There
/// is no retry and no timeout: the call waits until the service answers or
/// the connection goes away.
pub struct ServiceProxy<S: Service> {
    session: Session,
    endpoint: EndpointName,
    _service: PhantomData<fn() -> S>,
}

impl<S: Service> ServiceProxy<S> {
    pub fn new(session: Session, endpoint: EndpointName) -> Self {
        Self {
            session,
            endpoint,
            _service: PhantomData,
        }
    }

    pub fn endpoint(&self) -> &EndpointName {
        &self.endpoint
    }

    /// Calls the service once and decodes its typed response.
    pub async fn call(&self, request: &S::Request) -> Result<S::Response> {
        let id = json!(self.session.next_request_id());
        let params = serde_json::to_value(request)?;
        let jsonrpc = JsonRpcRequest::new(self.endpoint.as_str(), params, id.clone());

        tracing::debug!(endpoint = %self.endpoint, id = %id, "calling service");

        let response = self.session.send(&jsonrpc).await?;
        let result = response.into_result(&id)?;

        serde_json::from_value(result).map_err(|e| {
            PoseGraphError::InvalidResponse(format!(
                "Result from {} does not match the expected response type: {}",
                self.endpoint, e
            ))
        })
    }
}

impl<S: Service> Clone for ServiceProxy<S> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            endpoint: self.endpoint.clone(),
            _service: PhantomData,
        }
    }
}

impl<S: Service> fmt::Debug for ServiceProxy<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceProxy")
            .field("endpoint", &self.endpoint)
            .field("node_name", &self.session.node_name())
            .finish()
    }
}
