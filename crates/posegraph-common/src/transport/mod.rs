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

//! Transport Layer
//!
//! Calls travel as JSON-RPC 2.0 over HTTP/1.1 POST, one request per call.

pub mod http;

pub use http::{validate_http_url, HttpRequest, HttpResponse, HttpTransport, CALLER_ID_HEADER};
