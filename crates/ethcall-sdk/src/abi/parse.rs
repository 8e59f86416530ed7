//! Parsing of type names and textual argument values

use ethcall_primitives::{Address, U256};

use super::types::{ParamType, Token, I256};
use crate::ClientError;

/// Parse a simple type string (e.g., "uint256", "address")
///
/// `uint` and `int` are accepted as aliases for their 256-bit forms. Arrays
/// and tuples are not supported.
pub fn parse_type(s: &str) -> Result<ParamType, ClientError> {
    let s = s.trim();

    let param_type = match s {
        "address" => ParamType::Address,
        "bool" => ParamType::Bool,
        "string" => ParamType::String,
        "bytes" => ParamType::Bytes,
        _ if s.contains('[') || s.starts_with('(') => {
            return Err(ClientError::Encoding(format!("Unsupported type: {}", s)));
        }
        _ => {
            if let Some(rest) = s.strip_prefix("uint") {
                ParamType::Uint(parse_size(rest, 256, s)?)
            } else if let Some(rest) = s.strip_prefix("int") {
                ParamType::Int(parse_size(rest, 256, s)?)
            } else if let Some(rest) = s.strip_prefix("bytes") {
                ParamType::FixedBytes(parse_size(rest, 0, s)?)
            } else {
                return Err(ClientError::Encoding(format!("Unknown type: {}", s)));
            }
        }
    };

    param_type.check_width().map_err(ClientError::Encoding)?;
    Ok(param_type)
}

fn parse_size(digits: &str, default: usize, full: &str) -> Result<usize, ClientError> {
    if digits.is_empty() {
        return Ok(default);
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ClientError::Encoding(format!("Unknown type: {}", full)));
    }
    digits
        .parse()
        .map_err(|_| ClientError::Encoding(format!("Invalid size in type: {}", full)))
}

/// Parse a textual argument into a token of the given type.
///
/// Numbers are decimal or `0x` hex (with a leading `-` for signed types),
/// bytes are `0x` hex, booleans are `true`/`false`, strings are taken as is.
pub fn parse_token(param_type: &ParamType, s: &str) -> Result<Token, ClientError> {
    param_type.check_width().map_err(ClientError::Encoding)?;

    match param_type {
        ParamType::Address => Ok(Token::Address(Address::from_hex(s.trim())?)),
        ParamType::Bool => match s.trim() {
            "true" => Ok(Token::Bool(true)),
            "false" => Ok(Token::Bool(false)),
            other => Err(ClientError::Encoding(format!("Invalid bool: {}", other))),
        },
        ParamType::Uint(bits) => {
            let value = parse_u256(s.trim())?;
            if value.bits() > *bits {
                return Err(ClientError::Encoding(format!(
                    "Value {} does not fit in uint{}",
                    value, bits
                )));
            }
            Ok(Token::Uint(value))
        }
        ParamType::Int(bits) => {
            let s = s.trim();
            let (negative, digits) = match s.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, s),
            };
            let value = I256::new(parse_u256(digits)?, negative);
            if !value.fits(*bits) {
                return Err(ClientError::Encoding(format!(
                    "Value {} does not fit in int{}",
                    value, bits
                )));
            }
            Ok(Token::Int(value))
        }
        ParamType::FixedBytes(size) => {
            let bytes = parse_hex_arg(s)?;
            if bytes.len() != *size {
                return Err(ClientError::Encoding(format!(
                    "bytes{} expects {} bytes, got {}",
                    size,
                    size,
                    bytes.len()
                )));
            }
            Ok(Token::FixedBytes(bytes))
        }
        ParamType::Bytes => Ok(Token::Bytes(parse_hex_arg(s)?)),
        ParamType::String => Ok(Token::String(s.to_string())),
    }
}

/// Parse a decimal or `0x` hex number that must fit in 256 bits
fn parse_u256(s: &str) -> Result<U256, ClientError> {
    if let Some(digits) = s.strip_prefix("0x") {
        if digits.is_empty() {
            return Err(ClientError::Encoding(format!("Invalid number: {:?}", s)));
        }
        let digits = digits.trim_start_matches('0');
        if digits.len() > 64 {
            return Err(ClientError::Encoding(format!(
                "Number 0x{} does not fit in 256 bits",
                digits
            )));
        }
        // Pad to 64 hex chars (32 bytes)
        let padded = format!("{:0>64}", digits);
        let bytes = hex::decode(&padded)
            .map_err(|e| ClientError::Encoding(format!("Invalid hex number: {}", e)))?;
        return Ok(U256::from_big_endian(&bytes));
    }

    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ClientError::Encoding(format!("Invalid number: {:?}", s)));
    }
    U256::from_dec_str(s)
        .map_err(|_| ClientError::Encoding(format!("Number {} does not fit in 256 bits", s)))
}

fn parse_hex_arg(s: &str) -> Result<Vec<u8>, ClientError> {
    let digits = s
        .trim()
        .strip_prefix("0x")
        .ok_or_else(|| ClientError::Encoding(format!("Expected 0x-prefixed hex, got {:?}", s)))?;
    hex::decode(digits).map_err(|e| ClientError::Encoding(format!("Invalid hex: {}", e)))
}
