//! Transport layer for RPC communication
//!
//! A [`Transport`] moves one serialized JSON-RPC request to the node and
//! hands back the raw response body. Envelope handling lives in
//! [`RpcClient`](crate::RpcClient), so every transport is exercised through
//! the same parsing path.

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use rand::Rng;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::ClientError;

/// Transport trait for RPC communication (object-safe)
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a JSON-RPC request body and return the response body
    async fn send(&self, body: Bytes) -> Result<Bytes, ClientError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, body: Bytes) -> Result<Bytes, ClientError> {
        (**self).send(body).await
    }
}

/// Reply produced by [`MockTransport`] for one request
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Successful response with this `result`
    Result(Value),
    /// JSON-RPC error object
    Error {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },
    /// Body returned verbatim (for malformed responses)
    Raw(Bytes),
    /// Transport-level failure
    Fail(String),
}

impl MockReply {
    /// Successful `eth_call` result carrying ABI-encoded bytes
    pub fn data(bytes: &[u8]) -> Self {
        MockReply::Result(Value::String(format!("0x{}", hex::encode(bytes))))
    }
}

/// Request as seen by [`MockTransport`]
#[derive(Debug, Clone, Deserialize)]
pub struct MockRequest {
    /// Request id
    pub id: Value,
    /// Method name
    pub method: String,
    /// Positional parameters
    #[serde(default)]
    pub params: Vec<Value>,
}

type Handler = dyn Fn(&MockRequest) -> MockReply + Send + Sync;

#[derive(Default)]
struct MockState {
    responses: Mutex<HashMap<String, MockReply>>,
    defaults: HashMap<String, MockReply>,
    handler: Mutex<Option<Arc<Handler>>>,
    latency: Mutex<Option<(Duration, Duration)>>,
    requests: Mutex<Vec<MockRequest>>,
}

/// Mock transport for testing
///
/// Cloning yields a handle to the same state, so a test can keep one clone
/// to configure replies and inspect requests after moving another into a
/// client.
#[derive(Clone)]
pub struct MockTransport {
    state: Arc<MockState>,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        let mut defaults = HashMap::new();

        defaults.insert(
            "eth_chainId".to_string(),
            MockReply::Result(Value::String("0x1".to_string())),
        );
        defaults.insert(
            "eth_call".to_string(),
            MockReply::Result(Value::String("0x".to_string())),
        );

        Self {
            state: Arc::new(MockState {
                defaults,
                ..Default::default()
            }),
        }
    }

    /// Set a mock `result` for a specific method
    pub fn set_response(&self, method: &str, response: Value) {
        self.set_reply(method, MockReply::Result(response));
    }

    /// Set a reply of any kind for a specific method
    pub fn set_reply(&self, method: &str, reply: MockReply) {
        self.state
            .responses
            .lock()
            .insert(method.to_string(), reply);
    }

    /// Answer every request through `handler`, ignoring per-method replies
    pub fn set_handler<F>(&self, handler: F)
    where
        F: Fn(&MockRequest) -> MockReply + Send + Sync + 'static,
    {
        *self.state.handler.lock() = Some(Arc::new(handler));
    }

    /// Delay every reply by a random duration in `min..=max`
    pub fn set_latency(&self, min: Duration, max: Duration) {
        *self.state.latency.lock() = Some((min, max));
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<MockRequest> {
        self.state.requests.lock().clone()
    }

    fn reply_for(&self, request: &MockRequest) -> MockReply {
        let handler = self.state.handler.lock().clone();
        if let Some(handler) = handler {
            return handler(request);
        }

        if let Some(reply) = self.state.responses.lock().get(&request.method) {
            return reply.clone();
        }

        if let Some(reply) = self.state.defaults.get(&request.method) {
            return reply.clone();
        }

        MockReply::Error {
            code: -32601,
            message: format!("Method not found: {}", request.method),
        }
    }

    fn pick_latency(&self) -> Option<Duration> {
        let (min, max) = (*self.state.latency.lock())?;
        if max <= min {
            return Some(min);
        }
        let micros = rand::thread_rng().gen_range(min.as_micros()..=max.as_micros());
        Some(Duration::from_micros(micros as u64))
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, body: Bytes) -> Result<Bytes, ClientError> {
        let request: MockRequest = serde_json::from_slice(&body)
            .map_err(|e| ClientError::Transport(format!("mock received invalid request: {}", e)))?;
        self.state.requests.lock().push(request.clone());

        if let Some(delay) = self.pick_latency() {
            tokio::time::sleep(delay).await;
        }

        let response = match self.reply_for(&request) {
            MockReply::Result(result) => json!({
                "jsonrpc": "2.0",
                "id": request.id,
                "result": result,
            }),
            MockReply::Error { code, message } => json!({
                "jsonrpc": "2.0",
                "id": request.id,
                "error": { "code": code, "message": message },
            }),
            MockReply::Raw(raw) => return Ok(raw),
            MockReply::Fail(message) => return Err(ClientError::Transport(message)),
        };

        Ok(Bytes::from(response.to_string()))
    }
}

/// HTTP transport for real RPC communication
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
    url: reqwest::Url,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(url: &str) -> Result<Self, ClientError> {
        Self::build(url, reqwest::Client::builder())
    }

    /// Create a new HTTP transport whose requests fail with a transport
    /// error after `timeout`
    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self, ClientError> {
        Self::build(url, reqwest::Client::builder().timeout(timeout))
    }

    fn build(url: &str, builder: reqwest::ClientBuilder) -> Result<Self, ClientError> {
        let url = reqwest::Url::parse(url)
            .map_err(|e| ClientError::Encoding(format!("Invalid endpoint URL {}: {}", url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Encoding(format!(
                "Unsupported endpoint scheme: {}",
                url.scheme()
            )));
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self { client, url })
    }

    /// Endpoint URL
    pub fn url(&self) -> &str {
        self.url.as_str()
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, body: Bytes) -> Result<Bytes, ClientError> {
        let response = self
            .client
            .post(self.url.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        // Nodes may put a JSON-RPC error behind a non-2xx status
        if !status.is_success() && !carries_rpc_error(&body) {
            let snippet: String = String::from_utf8_lossy(&body).chars().take(200).collect();
            return Err(ClientError::Transport(format!("HTTP {}: {}", status, snippet)));
        }

        Ok(body)
    }
}

#[cfg(feature = "http")]
fn carries_rpc_error(body: &[u8]) -> bool {
    serde_json::from_slice::<Value>(body)
        .map(|value| value.get("error").map_or(false, Value::is_object))
        .unwrap_or(false)
}
