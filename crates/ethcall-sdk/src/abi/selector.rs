//! Function selectors

use super::types::ParamType;

/// Compute function selector (first 4 bytes of keccak256(signature))
///
/// The signature must already be canonical, e.g. `transfer(address,uint256)`:
/// a non-canonical spelling such as `uint` silently yields a different
/// selector.
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = ethcall_crypto::keccak256(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash.as_bytes()[..4]);
    selector
}

/// Build the canonical signature `name(type1,type2,...)`
pub fn canonical_signature(name: &str, inputs: &[ParamType]) -> String {
    let types: Vec<String> = inputs.iter().map(ParamType::canonical).collect();
    format!("{}({})", name, types.join(","))
}
