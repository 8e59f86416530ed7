//! ContractClient - read-only contract calls

use bytes::Bytes;
use ethcall_primitives::Address;
use tracing::{debug, trace};

use crate::abi::{decode, encode_function_call, MethodDescriptor, Token};
use crate::rpc::RpcClient;
use crate::transport::{MockTransport, Transport};
use crate::types::{CallOptions, CallRequest};
use crate::ClientError;

#[cfg(feature = "http")]
use crate::transport::HttpTransport;
#[cfg(feature = "http")]
use crate::types::RpcEndpoint;
#[cfg(feature = "http")]
use std::time::Duration;

/// Client for read-only contract calls over JSON-RPC `eth_call`.
///
/// One client serves any number of contracts and methods. It is `Send + Sync`;
/// wrap it in an `Arc` to share it across tasks.
pub struct ContractClient {
    rpc: RpcClient,
    chain_id: Option<u64>,
}

impl ContractClient {
    /// Create a client talking HTTP(S) to the given endpoint
    #[cfg(feature = "http")]
    pub fn new(endpoint: &RpcEndpoint) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(&endpoint.url)?;
        Ok(Self {
            rpc: RpcClient::new(transport),
            chain_id: endpoint.chain_id,
        })
    }

    /// Create an HTTP client whose requests fail with
    /// [`ClientError::Transport`] after `timeout`
    #[cfg(feature = "http")]
    pub fn with_timeout(endpoint: &RpcEndpoint, timeout: Duration) -> Result<Self, ClientError> {
        let transport = HttpTransport::with_timeout(&endpoint.url, timeout)?;
        Ok(Self {
            rpc: RpcClient::new(transport),
            chain_id: endpoint.chain_id,
        })
    }

    /// Create a client with mock transport (for testing)
    pub fn new_mock() -> Self {
        Self {
            rpc: RpcClient::new(MockTransport::new()),
            chain_id: Some(1),
        }
    }

    /// Create a client with a custom transport
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            rpc: RpcClient::new(transport),
            chain_id: None,
        }
    }

    /// Underlying JSON-RPC client
    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    /// Get the chain ID: the configured one, or `eth_chainId` otherwise
    pub async fn chain_id(&self) -> Result<u64, ClientError> {
        if let Some(id) = self.chain_id {
            return Ok(id);
        }
        self.rpc.chain_id().await
    }

    /// Call `method` on the contract at `contract` (a `0x`-prefixed
    /// 40-digit hex address) against the latest block
    pub async fn call(
        &self,
        contract: &str,
        method: &MethodDescriptor,
        args: &[Token],
    ) -> Result<Vec<Token>, ClientError> {
        let address = Address::from_hex(contract)?;
        self.call_with(&address, method, args, &CallOptions::default())
            .await
    }

    /// Call `method` on an already-parsed address against the latest block
    pub async fn call_at(
        &self,
        contract: &Address,
        method: &MethodDescriptor,
        args: &[Token],
    ) -> Result<Vec<Token>, ClientError> {
        self.call_with(contract, method, args, &CallOptions::default())
            .await
    }

    /// Call `method` with explicit options (block, deadline, cancellation)
    pub async fn call_with(
        &self,
        contract: &Address,
        method: &MethodDescriptor,
        args: &[Token],
        options: &CallOptions,
    ) -> Result<Vec<Token>, ClientError> {
        if args.len() != method.inputs().len() {
            return Err(ClientError::Encoding(format!(
                "{} expects {} arguments, got {}",
                method.signature(),
                method.inputs().len(),
                args.len()
            )));
        }

        let data = encode_function_call(method.selector(), method.inputs(), args)?;
        debug!(to = %contract.to_hex(), method = method.signature(), "eth_call");
        trace!(data = %hex::encode(&data), "call data");

        let request = CallRequest {
            to: *contract,
            data: Bytes::from(data),
        };
        let output = self.rpc.eth_call(&request, options).await?;
        trace!(output = %hex::encode(&output), "return data");

        decode(method.outputs(), &output)
    }
}
