//! Method descriptors

use std::fmt;

use super::parse::parse_type;
use super::selector::{canonical_signature, function_selector};
use super::types::ParamType;
use crate::ClientError;

/// Description of one contract method: name, input types and output types.
///
/// Immutable once built. The canonical signature and selector are computed
/// at construction, so a descriptor can be reused across many calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    name: String,
    inputs: Vec<ParamType>,
    outputs: Vec<ParamType>,
    signature: String,
    selector: [u8; 4],
}

impl MethodDescriptor {
    /// Create a new method descriptor
    pub fn new(name: impl Into<String>, inputs: Vec<ParamType>, outputs: Vec<ParamType>) -> Self {
        let name = name.into();
        let signature = canonical_signature(&name, &inputs);
        let selector = function_selector(&signature);
        Self {
            name,
            inputs,
            outputs,
            signature,
            selector,
        }
    }

    /// Parse a human-readable signature.
    ///
    /// Accepted forms:
    /// - `balanceOf(address)(uint256)`
    /// - `balanceOf(address) returns (uint256)`
    /// - `function balanceOf(address owner) external view returns (uint256)`
    ///
    /// Parameter names are ignored; `uint`/`int` aliases are canonicalized.
    pub fn parse(s: &str) -> Result<Self, ClientError> {
        let s = s.trim();
        let s = s.strip_prefix("function ").map(str::trim_start).unwrap_or(s);

        let open = s
            .find('(')
            .ok_or_else(|| invalid_signature(s, "missing '('"))?;
        let name = s[..open].trim();
        if !is_identifier(name) {
            return Err(invalid_signature(s, "invalid method name"));
        }

        let (inputs, rest) = parse_param_list(&s[open..]).map_err(|msg| invalid_signature(s, msg))?;

        let rest = rest.trim();
        let outputs = if rest.is_empty() {
            Vec::new()
        } else {
            let open = rest
                .find('(')
                .ok_or_else(|| invalid_signature(s, "unexpected trailing text"))?;
            let modifiers_ok = rest[..open]
                .split_whitespace()
                .all(|word| matches!(word, "returns" | "view" | "pure" | "external" | "public"));
            if !modifiers_ok {
                return Err(invalid_signature(s, "unexpected trailing text"));
            }
            let (outputs, tail) =
                parse_param_list(&rest[open..]).map_err(|msg| invalid_signature(s, msg))?;
            if !tail.trim().is_empty() {
                return Err(invalid_signature(s, "unexpected trailing text"));
            }
            outputs
        };

        Ok(Self::new(name, inputs, outputs))
    }

    /// Method name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Input parameter types, in declared order
    pub fn inputs(&self) -> &[ParamType] {
        &self.inputs
    }

    /// Output parameter types, in declared order
    pub fn outputs(&self) -> &[ParamType] {
        &self.outputs
    }

    /// Canonical signature, e.g. `transfer(address,uint256)`
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Function selector (4 bytes)
    pub fn selector(&self) -> [u8; 4] {
        self.selector
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outputs: Vec<String> = self.outputs.iter().map(ParamType::canonical).collect();
        write!(f, "{}({})", self.signature, outputs.join(","))
    }
}

fn invalid_signature(s: &str, reason: &str) -> ClientError {
    ClientError::Encoding(format!("Invalid signature {:?}: {}", s, reason))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Parse `(type [name], ...)` at the start of `s`; returns the types and the
/// text after the closing parenthesis.
fn parse_param_list(s: &str) -> Result<(Vec<ParamType>, &str), &'static str> {
    let inner_start = s.strip_prefix('(').ok_or("expected '('")?;
    let close = inner_start.find(')').ok_or("missing ')'")?;
    let inner = &inner_start[..close];
    if inner.contains('(') {
        return Err("tuple types are not supported");
    }

    let mut types = Vec::new();
    if !inner.trim().is_empty() {
        for param in inner.split(',') {
            let type_name = param
                .split_whitespace()
                .next()
                .ok_or("empty parameter")?;
            types.push(parse_type(type_name).map_err(|_| "unsupported parameter type")?);
        }
    }

    Ok((types, &inner_start[close + 1..]))
}
