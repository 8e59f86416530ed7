//! # ethcall-primitives
//!
//! Primitive types shared by the ethcall crates.
//!
//! - [`Address`]: 20-byte account/contract address with strict hex parsing
//! - [`H256`]: 32-byte hash
//! - [`U256`]: 256-bit unsigned integer (re-exported from `primitive-types`)

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod hash;

pub use address::{Address, AddressError};
pub use hash::{HashError, H256};

pub use primitive_types::U256;

/// Block number type
pub type BlockNumber = u64;
