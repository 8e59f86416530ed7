//! ABI encoding and decoding for Solidity contracts
//!
//! This module provides functionality for:
//! - Computing function selectors
//! - Describing methods ([`MethodDescriptor`])
//! - Encoding function calls
//! - Decoding function return values
//!
//! Only scalar types, fixed bytes, `string` and `bytes` are supported.
//!
//! # Example
//!
//! ```rust
//! use ethcall_sdk::abi::{decode, encode_function_call, MethodDescriptor, ParamType, Token};
//! use ethcall_primitives::Address;
//!
//! let balance_of = MethodDescriptor::parse("balanceOf(address)(uint256)").unwrap();
//! let data = encode_function_call(
//!     balance_of.selector(),
//!     balance_of.inputs(),
//!     &[Token::Address(Address::ZERO)],
//! )
//! .unwrap();
//! assert_eq!(data.len(), 4 + 32);
//!
//! // Decode a balance response
//! let return_data = [0u8; 32]; // From eth_call
//! let balance = decode(&[ParamType::Uint(256)], &return_data).unwrap();
//! assert_eq!(balance, vec![Token::uint(0u64)]);
//! ```

mod decode;
mod encode;
mod method;
mod parse;
mod selector;
mod types;

pub use decode::decode;
pub use encode::{encode, encode_function_call};
pub use method::MethodDescriptor;
pub use parse::{parse_token, parse_type};
pub use selector::{canonical_signature, function_selector};
pub use types::{ParamType, Token, I256};
