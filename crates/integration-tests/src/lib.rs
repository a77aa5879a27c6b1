//! Integration test support for Storedesk.
//!
//! [`FakeBackend`] is a scripted shop REST API served on an ephemeral port.
//! Tests point a real [`storedesk_admin::backend::BackendClient`] (or the
//! whole admin router) at it, then inspect what was requested.
//!
//! ```rust,ignore
//! let backend = FakeBackend::start().await;
//! backend.respond(Method::GET, "/api/messages", StatusCode::OK, json!([]));
//!
//! let client = BackendClient::new(&backend.config())?;
//! let messages = client.get_messages().await?;
//! assert_eq!(backend.requests().len(), 1);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

use storedesk_admin::config::{AdminConfig, BackendConfig};

/// One request the fake backend received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub authorization: Option<String>,
    pub body: Bytes,
}

impl RecordedRequest {
    /// Body as UTF-8 text (lossy).
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body parsed as JSON, `Null` if it is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Default)]
struct Script {
    responses: HashMap<(Method, String), (StatusCode, Value)>,
    requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<Script>>;

/// Scripted shop backend.
///
/// Unscripted routes answer `404 {"error": "not found"}`.
pub struct FakeBackend {
    url: Url,
    script: Shared,
    server: JoinHandle<()>,
}

impl FakeBackend {
    /// Bind an ephemeral port and start serving.
    pub async fn start() -> Self {
        let script = Shared::default();
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&script));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake backend");
        let addr = listener.local_addr().expect("Fake backend has no address");
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            url: Url::parse(&format!("http://{addr}")).expect("Invalid fake backend URL"),
            script,
            server,
        }
    }

    /// Origin the backend is listening on.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Client configuration pointing at this backend.
    #[must_use]
    pub fn config(&self) -> BackendConfig {
        BackendConfig::new(self.url.clone())
    }

    /// Admin configuration pointing at this backend.
    #[must_use]
    pub fn admin_config(&self) -> AdminConfig {
        AdminConfig::with_backend(self.config())
    }

    /// Script the response for `method path`, replacing any earlier one.
    pub fn respond(&self, method: Method, path: &str, status: StatusCode, body: Value) -> &Self {
        self.lock()
            .responses
            .insert((method, path.to_owned()), (status, body));
        self
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Requests received for `method path`.
    #[must_use]
    pub fn requests_to(&self, method: &Method, path: &str) -> Vec<RecordedRequest> {
        self.lock()
            .requests
            .iter()
            .filter(|r| &r.method == method && r.path == path)
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn handle(
    State(script): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };

    let path = uri.path().to_owned();
    let mut script = script.lock().unwrap_or_else(PoisonError::into_inner);
    script.requests.push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        content_type: header_text(header::CONTENT_TYPE),
        authorization: header_text(header::AUTHORIZATION),
        body,
    });

    match script.responses.get(&(method, path)) {
        Some((status, body)) => (*status, Json(body.clone())).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))).into_response(),
    }
}

/// A small catalogue used across tests.
pub mod fixtures {
    use serde_json::{Value, json};

    #[must_use]
    pub fn products() -> Value {
        json!({"products": [
            {"id": 1, "name": "Ceramic Mug", "description": "Holds tea", "price": "12.50",
             "stock": 4, "status": "active", "image": "/uploads/mug.png"},
            {"id": 2, "name": "Linen Apron", "description": "Hand stitched", "price": "30.00",
             "stock": 0, "status": "inactive", "image": null}
        ]})
    }

    #[must_use]
    pub fn categories() -> Value {
        json!([{"id": 7, "name": "Mugs"}, {"id": 8, "name": "Textiles"}])
    }

    #[must_use]
    pub fn occasions() -> Value {
        json!({"data": [{"id": 3, "name": "Birthday"}]})
    }

    #[must_use]
    pub fn comments() -> Value {
        json!([
            {"id": 10, "comment": "Lovely mug", "User": {"username": "ada"}, "reportCount": 0,
             "reports": []},
            {"id": 11, "comment": "Buy followers here", "User": {"username": "spammer"},
             "reportCount": 5, "reports": [
                {"id": 1, "reason": "Spam", "status": "pending", "User": {"username": "ada"}}
             ]}
        ])
    }

    #[must_use]
    pub fn messages() -> Value {
        json!([
            {"id": 3, "subject": "Shipping", "name": "Grace", "email": "grace@example.com",
             "message": "When does my order ship?", "createdAt": "2024-05-01T09:30:00Z"}
        ])
    }

    #[must_use]
    pub fn customers() -> Value {
        json!([
            {"id": 1, "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com",
             "role": "customer", "createdAt": "2024-03-09T12:00:00Z"},
            {"id": 2, "firstName": "Alan", "lastName": "Turing", "email": "alan@example.com",
             "role": "admin"}
        ])
    }
}
