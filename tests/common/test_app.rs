use axum::{
    Router,
    body::Bytes,
    extract::{OriginalUri, State},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    routing::post,
};
use carebook::{ApiConfig, HttpTransport};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// A request captured by the mock API.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Stand-in for the remote API
///
/// Serves the sign-up and appointment endpoints on a random port, answers
/// every request with a fixed status, and records what it received.
pub struct MockApi {
    /// Server base URL (e.g., "http://127.0.0.1:54321")
    pub address: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockApi {
    /// Start a mock API that answers every request with `status`
    pub async fn start(status: StatusCode) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/api/doctor/sign-up", post(record_request))
            .route("/api/patient/sign-up", post(record_request))
            .route("/api/appointment", post(record_request))
            .with_state(state);

        // Bind to random port (port 0 tells OS to assign available port)
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{port}");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { address, requests }
    }

    /// Transport pointed at this server
    pub fn transport(&self) -> HttpTransport {
        HttpTransport::new(&ApiConfig {
            base_url: self.address.clone(),
            timeout_seconds: 5,
            ..Default::default()
        })
        .expect("Failed to create transport")
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record_request(
    State(state): State<MockState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    let body = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);

    state.requests.lock().unwrap().push(RecordedRequest {
        path: uri.path().to_string(),
        content_type,
        body,
    });

    state.status
}

/// Transport pointed at a port nothing listens on
pub async fn unreachable_transport() -> HttpTransport {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    HttpTransport::new(&ApiConfig {
        base_url: format!("http://127.0.0.1:{port}"),
        timeout_seconds: 5,
        ..Default::default()
    })
    .expect("Failed to create transport")
}
