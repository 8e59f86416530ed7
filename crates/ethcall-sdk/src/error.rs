//! Client error types

use thiserror::Error;

/// Error returned by every fallible operation in this crate.
///
/// Each variant is one failure kind; components return the first error they
/// hit without converting it into another kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Malformed or mismatched input, detected before any network activity
    #[error("ABI encoding error: {0}")]
    Encoding(String),

    /// Network failure, HTTP failure or malformed JSON-RPC response
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON-RPC error object returned by the node
    #[error("RPC error: {code} - {message}")]
    Rpc {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },

    /// Returned bytes do not match the expected output types
    #[error("ABI decoding error: {0}")]
    Decoding(String),

    /// The caller cancelled the call or its deadline passed
    #[error("Call cancelled")]
    Cancelled,
}

/// Discriminant of [`ClientError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`ClientError::Encoding`]
    Encoding,
    /// See [`ClientError::Transport`]
    Transport,
    /// See [`ClientError::Rpc`]
    Rpc,
    /// See [`ClientError::Decoding`]
    Decoding,
    /// See [`ClientError::Cancelled`]
    Cancelled,
}

impl ClientError {
    /// Get the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Encoding(_) => ErrorKind::Encoding,
            ClientError::Transport(_) => ErrorKind::Transport,
            ClientError::Rpc { .. } => ErrorKind::Rpc,
            ClientError::Decoding(_) => ErrorKind::Decoding,
            ClientError::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Whether retrying the same call may succeed.
    ///
    /// Only transport failures qualify. The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }
}

impl From<ethcall_primitives::AddressError> for ClientError {
    fn from(e: ethcall_primitives::AddressError) -> Self {
        ClientError::Encoding(format!("invalid address: {}", e))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Transport(format!("malformed JSON-RPC response: {}", e))
    }
}

impl From<hex::FromHexError> for ClientError {
    fn from(e: hex::FromHexError) -> Self {
        ClientError::Transport(format!("invalid hex in response: {}", e))
    }
}
