//! # ethcall-sdk
//!
//! Read-only Ethereum contract calls over JSON-RPC.
//!
//! ## Features
//!
//! - **ContractClient**: encodes a method call, sends it as `eth_call` and
//!   decodes the returned bytes into typed values
//! - **ABI**: selectors, method descriptors, encoding and decoding for the
//!   scalar, fixed-bytes, `string` and `bytes` types
//! - **Contract**: named method sets such as the ERC-20 read interface
//! - **Transport**: pluggable JSON-RPC transport (HTTP or in-process mock)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ethcall_sdk::abi::MethodDescriptor;
//! use ethcall_sdk::types::RpcEndpoint;
//! use ethcall_sdk::ContractClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let endpoint = RpcEndpoint::new("https://mainnet.infura.io/v3/<project-id>");
//!     let client = ContractClient::new(&endpoint)?;
//!
//!     let symbol = MethodDescriptor::parse("symbol()(string)")?;
//!     let result = client
//!         .call("0x6B175474E89094C44Da98b954EedeAC495271d0F", &symbol, &[])
//!         .await?;
//!     println!("Symbol: {}", result[0]);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Testing without a node
//!
//! ```rust
//! use ethcall_sdk::abi::{encode, MethodDescriptor, ParamType, Token};
//! use ethcall_sdk::{ContractClient, MockReply, MockTransport};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), ethcall_sdk::ClientError> {
//! let transport = MockTransport::new();
//! let data = encode(&[ParamType::String], &[Token::string("DAI")])?;
//! transport.set_reply("eth_call", MockReply::data(&data));
//!
//! let client = ContractClient::with_transport(transport);
//! let symbol = MethodDescriptor::parse("symbol()(string)")?;
//! let result = client
//!     .call("0x6B175474E89094C44Da98b954EedeAC495271d0F", &symbol, &[])
//!     .await?;
//! assert_eq!(result, vec![Token::string("DAI")]);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
mod client;
pub mod contract;
mod error;
mod rpc;
mod transport;
pub mod types;

// Re-export main types
pub use client::ContractClient;
pub use contract::TokenInfo;
pub use error::{ClientError, ErrorKind};
pub use rpc::RpcClient;
pub use transport::{MockReply, MockRequest, MockTransport};

/// Re-export Transport trait for custom implementations
pub use transport::Transport;

#[cfg(feature = "http")]
pub use transport::HttpTransport;

// Re-export primitives for convenience
pub use ethcall_primitives::{Address, H256, U256};
