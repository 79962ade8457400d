//! HTTP Client Integration Tests
//!
//! These tests run the client against an in-process JSON-RPC service and
//! verify that it:
//! - Sends exactly one request per call, addressed to the endpoint name
//! - Decodes typed responses
//! - Surfaces service errors and malformed replies as errors
//! - Classifies refused and dropped connections as interruptions
//! - Reports lookup failures as transport errors

use std::sync::{Arc, Mutex};

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use posegraph_client::{Session, SessionConfig};
use posegraph_common::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use posegraph_common::transport::{HttpTransport, CALLER_ID_HEADER};
use posegraph_common::{EndpointName, PoseGraphError, SaveGraph, SaveGraphRequest, Service};
use serde_json::json;
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;

/// How the test service answers
#[derive(Clone)]
enum Behavior {
    Reply(bool),
    Error(JsonRpcError),
    Status(StatusCode),
    WrongId,
    Garbage,
    WrongResultType,
    Hangup,
}

/// A received call: the envelope and the caller id header
type Received = Arc<Mutex<Vec<(JsonRpcRequest, Option<String>)>>>;

struct TestService {
    addr: String,
    received: Received,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestService {
    async fn new(behavior: Behavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let received: Received = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel();

        let server_received = received.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = listener.accept() => {
                        let Ok((mut stream, _)) = result else { continue };

                        if let Behavior::Hangup = behavior {
                            // Read the whole request, then close without answering
                            let mut buf = Vec::new();
                            let mut chunk = [0u8; 1024];
                            while let Ok(n) = stream.read(&mut chunk).await {
                                if n == 0 {
                                    break;
                                }
                                buf.extend_from_slice(&chunk[..n]);
                                if buf.ends_with(b"}") {
                                    break;
                                }
                            }
                            drop(stream);
                            continue;
                        }

                        let io = TokioIo::new(stream);
                        let behavior = behavior.clone();
                        let received = server_received.clone();

                        tokio::spawn(async move {
                            let service = service_fn(move |req| {
                                let behavior = behavior.clone();
                                let received = received.clone();
                                async move { Self::handle(req, behavior, received).await }
                            });

                            let _ = http1::Builder::new().serve_connection(io, service).await;
                        });
                    }
                    _ = &mut shutdown_rx => {
                        break;
                    }
                }
            }
        });

        Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    async fn handle(
        req: Request<Incoming>,
        behavior: Behavior,
        received: Received,
    ) -> Result<Response<Full<Bytes>>, hyper::Error> {
        let caller_id = req
            .headers()
            .get(CALLER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = req.into_body().collect().await?.to_bytes();
        let jsonrpc_req = HttpTransport::parse_jsonrpc(body).unwrap();
        received.lock().unwrap().push((jsonrpc_req.clone(), caller_id));

        let id = jsonrpc_req.id;
        let response = match behavior {
            Behavior::Reply(success) => JsonRpcResponse::success(id, json!({"success": success})),
            Behavior::Error(error) => JsonRpcResponse::error(id, error),
            Behavior::WrongId => JsonRpcResponse::success(json!("someone-else"), json!({"success": true})),
            Behavior::WrongResultType => JsonRpcResponse::success(id, json!({"saved": "yes"})),
            Behavior::Status(status) => {
                return Ok(Response::builder()
                    .status(status)
                    .body(Full::new(Bytes::from("service unavailable")))
                    .unwrap());
            }
            Behavior::Garbage => {
                return Ok(Response::builder()
                    .status(StatusCode::OK)
                    .header("Content-Type", "application/json")
                    .body(Full::new(Bytes::from("{not json")))
                    .unwrap());
            }
            Behavior::Hangup => unreachable!("hangup is handled before hyper"),
        };

        Ok(HttpTransport::to_http_response(&response).unwrap())
    }

    fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn received(&self) -> Vec<(JsonRpcRequest, Option<String>)> {
        self.received.lock().unwrap().clone()
    }
}

impl Drop for TestService {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn save_graph_proxy(url: &str) -> posegraph_client::ServiceProxy<SaveGraph> {
    let session = Session::init(SessionConfig::new(url)).unwrap();
    let endpoint = EndpointName::resolve("/husky/blam_slam", SaveGraph::BASE_NAME).unwrap();
    session.service_proxy::<SaveGraph>(endpoint)
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

#[tokio::test]
async fn test_call_reports_success() {
    let service = TestService::new(Behavior::Reply(true)).await;
    let proxy = save_graph_proxy(&service.base_url());

    let response = proxy.call(&SaveGraphRequest::new("graph.zip")).await.unwrap();

    assert!(response.success);
}

#[tokio::test]
async fn test_call_reports_failure_result() {
    let service = TestService::new(Behavior::Reply(false)).await;
    let proxy = save_graph_proxy(&service.base_url());

    let response = proxy.call(&SaveGraphRequest::new("graph.zip")).await.unwrap();

    assert!(!response.success);
}

#[tokio::test]
async fn test_call_sends_exactly_one_request() {
    let service = TestService::new(Behavior::Reply(true)).await;
    let proxy = save_graph_proxy(&service.base_url());

    proxy.call(&SaveGraphRequest::new("maps/run-3.zip")).await.unwrap();

    let received = service.received();
    assert_eq!(received.len(), 1);
    let (request, caller_id) = &received[0];
    assert_eq!(request.method, "/husky/blam_slam/save_graph");
    assert_eq!(request.params, json!({"filename": "maps/run-3.zip"}));
    assert_eq!(caller_id.as_deref(), Some("save_graph_client"));
}

#[tokio::test]
async fn test_repeated_calls_are_independent() {
    let service = TestService::new(Behavior::Reply(true)).await;
    let proxy = save_graph_proxy(&service.base_url());

    proxy.call(&SaveGraphRequest::new("a.zip")).await.unwrap();
    proxy.call(&SaveGraphRequest::new("b.zip")).await.unwrap();

    let received = service.received();
    assert_eq!(received.len(), 2);
    assert_eq!(received[0].0.params["filename"], "a.zip");
    assert_eq!(received[1].0.params["filename"], "b.zip");
    assert_ne!(received[0].0.id, received[1].0.id);
}

#[tokio::test]
async fn test_custom_node_name_is_sent() {
    let service = TestService::new(Behavior::Reply(true)).await;
    let config = SessionConfig::new(service.base_url()).with_node_name("mapper_cli");
    let session = Session::init(config).unwrap();
    let proxy = session.service_proxy::<SaveGraph>(EndpointName::new("/save_graph").unwrap());

    proxy.call(&SaveGraphRequest::new("graph.zip")).await.unwrap();

    let received = service.received();
    assert_eq!(received[0].1.as_deref(), Some("mapper_cli"));
    assert_eq!(received[0].0.method, "/save_graph");
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[tokio::test]
async fn test_unknown_endpoint_is_service_error() {
    let service = TestService::new(Behavior::Error(JsonRpcError::method_not_found())).await;
    let proxy = save_graph_proxy(&service.base_url());

    let err = proxy.call(&SaveGraphRequest::new("graph.zip")).await.unwrap_err();

    assert!(matches!(err, PoseGraphError::Service { code: -32601, .. }));
    assert!(!err.is_interrupted());
    assert!(err.to_string().contains("Method not found"));
}

#[tokio::test]
async fn test_service_internal_error_is_not_suppressed() {
    let error = JsonRpcError::internal_error("failed to write graph");
    let service = TestService::new(Behavior::Error(error)).await;
    let proxy = save_graph_proxy(&service.base_url());

    let err = proxy.call(&SaveGraphRequest::new("/readonly/graph.zip")).await.unwrap_err();

    match &err {
        PoseGraphError::Service { code, message } => {
            assert_eq!(*code, -32603);
            assert!(message.contains("failed to write graph"));
        }
        other => panic!("expected service error, got {:?}", other),
    }
    assert!(!err.is_interrupted());
}

#[tokio::test]
async fn test_service_rejects_params() {
    let error = JsonRpcError::invalid_params("missing field `filename`");
    let service = TestService::new(Behavior::Error(error)).await;
    let proxy = save_graph_proxy(&service.base_url());

    let err = proxy.call(&SaveGraphRequest::new("graph.zip")).await.unwrap_err();

    assert!(matches!(err, PoseGraphError::Service { code: -32602, .. }));
    assert_eq!(service.received().len(), 1);
}

#[tokio::test]
async fn test_http_error_status_is_transport_error() {
    let service = TestService::new(Behavior::Status(StatusCode::SERVICE_UNAVAILABLE)).await;
    let proxy = save_graph_proxy(&service.base_url());

    let err = proxy.call(&SaveGraphRequest::new("graph.zip")).await.unwrap_err();

    assert!(matches!(err, PoseGraphError::Transport(_)));
    assert!(err.to_string().contains("503"));
    // No retry on failure
    assert_eq!(service.received().len(), 1);
}

#[tokio::test]
async fn test_malformed_json_response() {
    let service = TestService::new(Behavior::Garbage).await;
    let proxy = save_graph_proxy(&service.base_url());

    let err = proxy.call(&SaveGraphRequest::new("graph.zip")).await.unwrap_err();

    assert!(matches!(err, PoseGraphError::JsonSerialization(_)));
    assert!(!err.is_interrupted());
}

#[tokio::test]
async fn test_mismatched_response_id() {
    let service = TestService::new(Behavior::WrongId).await;
    let proxy = save_graph_proxy(&service.base_url());

    let err = proxy.call(&SaveGraphRequest::new("graph.zip")).await.unwrap_err();

    assert!(matches!(err, PoseGraphError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_result_of_wrong_shape() {
    let service = TestService::new(Behavior::WrongResultType).await;
    let proxy = save_graph_proxy(&service.base_url());

    let err = proxy.call(&SaveGraphRequest::new("graph.zip")).await.unwrap_err();

    assert!(matches!(err, PoseGraphError::InvalidResponse(_)));
    assert!(err.to_string().contains("/husky/blam_slam/save_graph"));
}

// ============================================================================
// Interruption Tests
// ============================================================================

#[tokio::test]
async fn test_connection_refused_is_interrupted() {
    // Bind then release a port so nothing is listening on it
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let proxy = save_graph_proxy(&format!("http://{}", addr));

    let err = proxy.call(&SaveGraphRequest::new("graph.zip")).await.unwrap_err();

    assert!(err.is_interrupted(), "expected interruption, got {:?}", err);
}

#[tokio::test]
async fn test_unresolvable_host_is_transport_error() {
    // `.invalid` is reserved and never resolves
    let proxy = save_graph_proxy("http://no-such-host.invalid:11311");

    let err = proxy.call(&SaveGraphRequest::new("graph.zip")).await.unwrap_err();

    assert!(!err.is_interrupted(), "lookup failure must not be silent: {:?}", err);
    assert!(matches!(err, PoseGraphError::Transport(_)));
}

#[tokio::test]
async fn test_connection_dropped_mid_call_is_interrupted() {
    let service = TestService::new(Behavior::Hangup).await;
    let proxy = save_graph_proxy(&service.base_url());

    let err = proxy.call(&SaveGraphRequest::new("graph.zip")).await.unwrap_err();

    assert!(err.is_interrupted(), "expected interruption, got {:?}", err);
}
