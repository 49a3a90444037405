use std::{
    net::SocketAddr,
    path::Path,
    sync::{Arc, Mutex},
};

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use axum_test::TestServer;
use clap::Parser;
use serde_json::{Value, json};
use tempfile::TempDir;
use test_context::AsyncTestContext;
use tokio::task::JoinHandle;

use crate::{
    application::http::server::http_server::{router, state},
    args::Args,
};

pub const INDEX_HTML: &str = "<!doctype html><title>IntelliFood</title>";

/// What the fake chat-completion API answers, and what it was asked.
#[derive(Debug)]
pub struct UpstreamScript {
    pub status: StatusCode,
    pub body: Value,
    pub requests: Vec<Value>,
}

pub type SharedScript = Arc<Mutex<UpstreamScript>>;

async fn chat_completions(
    State(script): State<SharedScript>,
    Json(request): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut script = script.lock().unwrap();
    script.requests.push(request);
    (script.status, Json(script.body.clone()))
}

pub fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content } }
        ]
    })
}

async fn spawn(app: Router) -> (SocketAddr, JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, handle)
}

pub async fn relay_router(upstream_addr: SocketAddr, static_dir: &Path) -> Router {
    let args = Args::parse_from([
        "intellifood".to_string(),
        "--groq-api-key".to_string(),
        "test-key".to_string(),
        "--groq-base-url".to_string(),
        format!("http://{upstream_addr}/openai/v1"),
        "--static-dir".to_string(),
        static_dir.display().to_string(),
        "--metrics-enabled".to_string(),
        "false".to_string(),
    ]);

    let app_state = state(Arc::new(args)).await.unwrap();
    router(app_state).unwrap()
}

/// Relay wired to a scripted upstream on a loopback port.
pub struct RelayContext {
    pub server: TestServer,
    script: SharedScript,
    upstream_addr: SocketAddr,
    upstream: JoinHandle<()>,
    static_dir: TempDir,
}

impl RelayContext {
    pub fn reply_with(&self, status: StatusCode, body: Value) {
        let mut script = self.script.lock().unwrap();
        script.status = status;
        script.body = body;
    }

    pub fn reply_content(&self, content: &str) {
        self.reply_with(StatusCode::OK, completion(content));
    }

    pub fn upstream_requests(&self) -> Vec<Value> {
        self.script.lock().unwrap().requests.clone()
    }

    /// Serves the relay on a real port, for clients that speak HTTP.
    pub async fn spawn_relay(&self) -> (SocketAddr, JoinHandle<()>) {
        spawn(relay_router(self.upstream_addr, self.static_dir.path()).await).await
    }
}

impl AsyncTestContext for RelayContext {
    async fn setup() -> Self {
        let script = Arc::new(Mutex::new(UpstreamScript {
            status: StatusCode::OK,
            body: completion("{}"),
            requests: Vec::new(),
        }));

        let upstream = Router::new()
            .route("/openai/v1/chat/completions", post(chat_completions))
            .with_state(script.clone());
        let (upstream_addr, upstream) = spawn(upstream).await;

        let static_dir = tempfile::tempdir().unwrap();
        std::fs::write(static_dir.path().join("index.html"), INDEX_HTML).unwrap();
        std::fs::write(static_dir.path().join("script.js"), "console.log('ok');").unwrap();

        let server = TestServer::new(relay_router(upstream_addr, static_dir.path()).await).unwrap();

        Self {
            server,
            script,
            upstream_addr,
            upstream,
            static_dir,
        }
    }

    async fn teardown(self) {
        self.upstream.abort();
    }
}
