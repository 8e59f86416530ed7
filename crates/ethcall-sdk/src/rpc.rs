//! JSON-RPC 2.0 request/response handling on top of a [`Transport`]

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::transport::Transport;
use crate::types::{CallOptions, CallRequest};
use crate::ClientError;

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: &'a [Value],
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

/// JSON-RPC client: builds request envelopes, assigns ids and maps response
/// envelopes to results or errors. Performs no retries.
pub struct RpcClient {
    transport: Box<dyn Transport>,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Create a client over the given transport
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            next_id: AtomicU64::new(1),
        }
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Send a request and deserialize its `result`
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, ClientError> {
        self.request_with(method, params, &CallOptions::default()).await
    }

    /// Send a request, giving up with [`ClientError::Cancelled`] when the
    /// options' deadline passes or token is cancelled
    pub async fn request_with<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
        options: &CallOptions,
    ) -> Result<T, ClientError> {
        let id = self.next_id();
        let body = serde_json::to_vec(&JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params: &params,
        })
        .map_err(|e| ClientError::Encoding(format!("Cannot serialize request: {}", e)))?;

        debug!(method, id, "sending JSON-RPC request");

        let response = cancellable(
            self.transport.send(Bytes::from(body)),
            options.deadline,
            options.cancel.as_ref(),
        )
        .await?;

        let value = parse_response(id, &response)?;
        serde_json::from_value(value)
            .map_err(|e| ClientError::Transport(format!("Unexpected result for {}: {}", method, e)))
    }

    /// Execute `eth_call` and return the raw returned bytes
    pub async fn eth_call(
        &self,
        request: &CallRequest,
        options: &CallOptions,
    ) -> Result<Bytes, ClientError> {
        let params = vec![
            serde_json::to_value(request)
                .map_err(|e| ClientError::Encoding(format!("Cannot serialize call: {}", e)))?,
            serde_json::to_value(options.block)
                .map_err(|e| ClientError::Encoding(format!("Cannot serialize block: {}", e)))?,
        ];
        let result: String = self.request_with("eth_call", params, options).await?;
        parse_hex_bytes(&result)
    }

    /// Query `eth_chainId`
    pub async fn chain_id(&self) -> Result<u64, ClientError> {
        let result: String = self.request("eth_chainId", vec![]).await?;
        parse_hex_u64(&result)
    }
}

/// Race `fut` against the deadline and the cancellation token. When either
/// fires first, `fut` is dropped, which aborts the in-flight request.
async fn cancellable<F, T>(
    fut: F,
    deadline: Option<Instant>,
    cancel: Option<&CancellationToken>,
) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    let cancelled = async {
        match cancel {
            Some(token) => token.cancelled().await,
            None => std::future::pending().await,
        }
    };
    let expired = async {
        match deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    };

    tokio::select! {
        biased;
        _ = cancelled => Err(ClientError::Cancelled),
        _ = expired => Err(ClientError::Cancelled),
        result = fut => result,
    }
}

/// Map a response envelope to its `result` value
fn parse_response(id: u64, body: &[u8]) -> Result<Value, ClientError> {
    let response: JsonRpcResponse = serde_json::from_slice(body)?;

    if let Some(error) = response.error {
        warn!(code = error.code, message = %error.message, data = ?error.data, "JSON-RPC error");
        return Err(ClientError::Rpc {
            code: error.code,
            message: error.message,
        });
    }

    match &response.id {
        Some(Value::Number(n)) if n.as_u64() == Some(id) => {}
        Some(Value::String(s)) if s == &id.to_string() => {}
        other => {
            return Err(ClientError::Transport(format!(
                "Response id {:?} does not match request id {}",
                other, id
            )));
        }
    }

    response
        .result
        .ok_or_else(|| ClientError::Transport("No result in response".to_string()))
}

fn parse_hex_u64(s: &str) -> Result<u64, ClientError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(s, 16)
        .map_err(|e| ClientError::Transport(format!("Invalid hex quantity: {}", e)))
}

fn parse_hex_bytes(s: &str) -> Result<Bytes, ClientError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    if s.is_empty() {
        return Ok(Bytes::new());
    }
    let bytes = hex::decode(s)?;
    Ok(Bytes::from(bytes))
}
