//! SDK types

use std::time::Duration;

use bytes::Bytes;
use ethcall_primitives::{Address, BlockNumber};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Block identifier for `eth_call`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockId {
    /// Block number
    Number(BlockNumber),
    /// Latest block
    #[default]
    Latest,
    /// Pending block (includes pending transactions)
    Pending,
    /// Earliest block (genesis)
    Earliest,
    /// Safe block
    Safe,
    /// Finalized block
    Finalized,
}

impl Serialize for BlockId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            BlockId::Number(n) => serializer.serialize_str(&format!("0x{:x}", n)),
            BlockId::Latest => serializer.serialize_str("latest"),
            BlockId::Pending => serializer.serialize_str("pending"),
            BlockId::Earliest => serializer.serialize_str("earliest"),
            BlockId::Safe => serializer.serialize_str("safe"),
            BlockId::Finalized => serializer.serialize_str("finalized"),
        }
    }
}

/// Call object for `eth_call`
#[derive(Debug, Clone)]
pub struct CallRequest {
    /// Contract address
    pub to: Address,
    /// Call data (selector + encoded arguments)
    pub data: Bytes,
}

impl Serialize for CallRequest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("to", &self.to.to_hex())?;
        map.serialize_entry("data", &format!("0x{}", hex::encode(&self.data)))?;

        map.end()
    }
}

/// Node endpoint a client talks to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcEndpoint {
    /// HTTP(S) URL of the JSON-RPC endpoint
    pub url: String,
    /// Expected chain ID, if known
    #[serde(default)]
    pub chain_id: Option<u64>,
}

impl RpcEndpoint {
    /// Create an endpoint without a known chain ID
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            chain_id: None,
        }
    }

    /// Set the expected chain ID
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }
}

/// Per-call options
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Block to execute the call against
    pub block: BlockId,
    /// Give up with [`ClientError::Cancelled`](crate::ClientError::Cancelled)
    /// once this instant passes
    pub deadline: Option<Instant>,
    /// Give up with [`ClientError::Cancelled`](crate::ClientError::Cancelled)
    /// once this token is cancelled
    pub cancel: Option<CancellationToken>,
}

impl CallOptions {
    /// Options for a call at the given block
    pub fn at_block(block: BlockId) -> Self {
        Self {
            block,
            ..Default::default()
        }
    }

    /// Set a deadline relative to now
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    /// Set an absolute deadline
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Attach a cancellation token
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}
