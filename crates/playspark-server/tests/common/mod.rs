use std::net::SocketAddr;
use std::time::Duration;

use serde_json::Value;

use playspark_server::build_app;
use playspark_server::config::{LimitsConfig, ServerConfig};

pub struct TestServer {
    pub addr: SocketAddr,
    _shutdown: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a test server with default config.
    pub async fn new() -> Self {
        Self::from_config(ServerConfig::default()).await
    }

    /// Start a test server with custom limits.
    pub async fn with_limits(limits: LimitsConfig) -> Self {
        Self::from_config(ServerConfig {
            limits,
            ..ServerConfig::default()
        })
        .await
    }

    async fn from_config(config: ServerConfig) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (app, _state) = build_app(config);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            _shutdown: handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// POST a JSON body, returning status and parsed body.
    pub async fn post_json(&self, path: &str, body: &Value) -> (u16, Value) {
        let resp = reqwest::Client::new()
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    pub async fn get_json(&self, path: &str) -> (u16, Value) {
        let resp = reqwest::get(self.url(path)).await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    /// Speak an idea; panics unless the server accepts it.
    pub async fn speak(&self, transcript: &str) -> Value {
        let (status, body) = self
            .post_json(
                "/api/voice/process",
                &serde_json::json!({ "transcript": transcript }),
            )
            .await;
        assert_eq!(status, 200, "voice rejected: {body}");
        body
    }
}

/// Wizard answers for the first three jumping steps.
pub fn jumping_choices() -> Value {
    serde_json::json!({
        "character": "🐸 Green Frog",
        "theme": "🌳 Forest",
        "speed": "⚡ Super Fast",
    })
}
