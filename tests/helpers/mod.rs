//! Shared test helpers for integration tests.
//!
//! [`MockBackend`] is an in-process axum server standing in for the
//! tourist-safety backend; it records every call and answers scripted
//! responses. [`TestApp`] is the gateway router pointed at it.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderName, Method, Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use tower::ServiceExt;

use tourist_api::{AppState, build_app};
use tourist_core::config::AppConfig;

/// Password the mock accepts for every account.
pub const PASSWORD: &str = "secret";
/// Far-future expiry for issued access tokens.
pub const FAR_FUTURE: i64 = 4_000_000_000;

/// Builds an unsigned-by-the-gateway access token like the backend issues.
pub fn access_token(role: &str, exp: i64, serial: usize) -> String {
    encode(
        &Header::default(),
        &json!({ "sub": 42, "role": role, "exp": exp, "jti": serial }),
        &EncodingKey::from_secret(b"backend-signing-key"),
    )
    .unwrap()
}

/// One request observed by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Scripted reply: status plus raw body.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
}

impl Reply {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn text(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Debug)]
struct MockState {
    calls: Mutex<Vec<RecordedCall>>,
    scripts: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    role: Mutex<String>,
    access_exp: Mutex<i64>,
    refresh_ok: Mutex<bool>,
    issued: AtomicUsize,
    login_calls: AtomicUsize,
    refresh_calls: AtomicUsize,
    profile_calls: AtomicUsize,
}

/// In-process stand-in for the backend REST API.
#[derive(Debug, Clone)]
pub struct MockBackend {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockBackend {
    /// Binds `127.0.0.1:0` and serves in the background.
    pub async fn start() -> Self {
        let state = Arc::new(MockState {
            calls: Mutex::new(Vec::new()),
            scripts: Mutex::new(HashMap::new()),
            role: Mutex::new("admin".to_string()),
            access_exp: Mutex::new(FAR_FUTURE),
            refresh_ok: Mutex::new(true),
            issued: AtomicUsize::new(0),
            login_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            profile_calls: AtomicUsize::new(0),
        });

        let router = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { addr, state }
    }

    /// Base URL for `backend.base_url`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Queues replies for `method path`; once exhausted the default
    /// `200 {"ok": true}` applies.
    pub fn script(&self, method: Method, path: &str, replies: Vec<Reply>) {
        self.state
            .scripts
            .lock()
            .unwrap()
            .insert((method, path.to_string()), replies.into());
    }

    /// Role claim carried by issued access tokens.
    pub fn set_role(&self, role: &str) {
        *self.state.role.lock().unwrap() = role.to_string();
    }

    /// `exp` claim of tokens issued by login.
    pub fn set_access_exp(&self, exp: i64) {
        *self.state.access_exp.lock().unwrap() = exp;
    }

    /// Whether `/auth/refresh` succeeds.
    pub fn set_refresh_ok(&self, ok: bool) {
        *self.state.refresh_ok.lock().unwrap() = ok;
    }

    /// Calls outside `/auth/*`, in arrival order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().unwrap().clone()
    }

    /// Recorded calls to `path`.
    pub fn calls_to(&self, path: &str) -> Vec<RecordedCall> {
        self.calls().into_iter().filter(|c| c.path == path).collect()
    }

    pub fn login_calls(&self) -> usize {
        self.state.login_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_calls(&self) -> usize {
        self.state.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn profile_calls(&self) -> usize {
        self.state.profile_calls.load(Ordering::SeqCst)
    }
}

fn issue(state: &MockState, exp: i64) -> String {
    let serial = state.issued.fetch_add(1, Ordering::SeqCst) + 1;
    let role = state.role.lock().unwrap().clone();
    access_token(&role, exp, serial)
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    match (method.as_str(), path.as_str()) {
        ("POST", "/auth/login") => {
            state.login_calls.fetch_add(1, Ordering::SeqCst);
            let creds: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
            if creds["password"] != PASSWORD {
                return (StatusCode::UNAUTHORIZED, axum::Json(json!({"detail": "bad credentials"})))
                    .into_response();
            }
            let exp = *state.access_exp.lock().unwrap();
            axum::Json(json!({
                "access_token": issue(&state, exp),
                "refresh_token": "refresh-1",
                "token_type": "bearer"
            }))
            .into_response()
        }
        ("POST", "/auth/refresh") => {
            state.refresh_calls.fetch_add(1, Ordering::SeqCst);
            if !*state.refresh_ok.lock().unwrap() {
                return (StatusCode::UNAUTHORIZED, axum::Json(json!({"detail": "expired"})))
                    .into_response();
            }
            axum::Json(json!({ "access_token": issue(&state, FAR_FUTURE) })).into_response()
        }
        ("GET", "/auth/me") => {
            state.profile_calls.fetch_add(1, Ordering::SeqCst);
            axum::Json(json!({ "id": 42, "email": "admin@example.com", "role": "admin" }))
                .into_response()
        }
        _ => record_and_reply(&state, method, &uri, &headers, body),
    }
}

fn record_and_reply(
    state: &MockState,
    method: Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: Bytes,
) -> Response {
    let query = uri
        .query()
        .map(|q| {
            q.split('&')
                .filter_map(|pair| pair.split_once('='))
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        })
        .unwrap_or_default();
    let header = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.calls.lock().unwrap().push(RecordedCall {
        method: method.clone(),
        path: uri.path().to_string(),
        query,
        authorization: header(AUTHORIZATION),
        content_type: header(CONTENT_TYPE),
        body,
    });

    let reply = state
        .scripts
        .lock()
        .unwrap()
        .get_mut(&(method, uri.path().to_string()))
        .and_then(VecDeque::pop_front)
        .unwrap_or_else(|| Reply::json(StatusCode::OK, json!({"ok": true})));

    Response::builder()
        .status(reply.status)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(reply.body))
        .unwrap()
}

/// Gateway configuration pointed at `backend_url`.
pub fn test_config(backend_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.backend.base_url = backend_url.to_string();
    config.backend.timeout_seconds = 5;
    config.auth.session_secret = "integration-test-session-secret".to_string();
    config.auth.cookie_secure = false;
    config
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The backend stand-in
    pub backend: MockBackend,
}

impl TestApp {
    /// Gateway in front of a fresh mock backend.
    pub async fn new() -> Self {
        let backend = MockBackend::start().await;
        let state = AppState::new(test_config(&backend.url())).unwrap();
        Self {
            router: build_app(state),
            backend,
        }
    }

    /// Sends a request through the gateway.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        if body.is_some() {
            req = req.header(CONTENT_TYPE, "application/json");
        }
        for (name, value) in headers {
            req = req.header(*name, *value);
        }
        let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);

        self.send(req.body(body).unwrap()).await
    }

    /// Sends a request with a raw body, labelled as JSON, through the gateway.
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        body: &str,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(CONTENT_TYPE, "application/json");
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        self.send(req.body(Body::from(body.to_string())).unwrap()).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(req).await.unwrap();

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            set_cookie,
        }
    }

    /// Request with `Authorization: Bearer <token>`.
    pub async fn authed(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        self.request(method, path, body, &[("authorization", "Bearer test-token")])
            .await
    }

    /// Logs in through `/api/auth/login` and returns the `Cookie` header value.
    pub async fn login(&self) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "email": "admin@example.com", "password": PASSWORD })),
                &[],
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.cookie_pair().unwrap()
    }

    /// Request carrying a session cookie.
    pub async fn with_cookie(&self, method: &str, path: &str, cookie: &str) -> TestResponse {
        self.request(method, path, None, &[(COOKIE.as_str(), cookie)])
            .await
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body (`Null` when empty or not JSON)
    pub body: Value,
    /// Raw `Set-Cookie` header
    pub set_cookie: Option<String>,
}

impl TestResponse {
    /// `name=value` part of the `Set-Cookie` header.
    pub fn cookie_pair(&self) -> Option<String> {
        self.set_cookie
            .as_deref()
            .and_then(|c| c.split(';').next())
            .map(str::to_string)
    }
}
