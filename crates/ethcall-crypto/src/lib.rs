//! # ethcall-crypto
//!
//! Keccak-256 hashing, as used for Ethereum function selectors.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod hash;

pub use hash::keccak256;
