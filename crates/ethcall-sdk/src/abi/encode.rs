//! ABI encoding

use ethcall_primitives::U256;

use super::types::{ParamType, Token};
use crate::ClientError;

/// Size of one ABI word
pub(crate) const WORD: usize = 32;

/// Encode tokens against their declared types according to the Solidity ABI
/// head/tail layout.
pub fn encode(types: &[ParamType], tokens: &[Token]) -> Result<Vec<u8>, ClientError> {
    if types.len() != tokens.len() {
        return Err(ClientError::Encoding(format!(
            "Expected {} values, got {}",
            types.len(),
            tokens.len()
        )));
    }

    // Every supported type occupies exactly one word in the head
    let head_size = types.len() * WORD;

    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();

    for (index, (param_type, token)) in types.iter().zip(tokens).enumerate() {
        let encoded = encode_token(param_type, token)
            .map_err(|msg| ClientError::Encoding(format!("argument {}: {}", index, msg)))?;

        if param_type.is_dynamic() {
            let offset = head_size + tail.len();
            head.extend_from_slice(&encode_u256(&U256::from(offset)));
            tail.extend(encoded);
        } else {
            head.extend(encoded);
        }
    }

    head.extend(tail);
    Ok(head)
}

/// Encode function call (selector + params)
pub fn encode_function_call(
    selector: [u8; 4],
    types: &[ParamType],
    tokens: &[Token],
) -> Result<Vec<u8>, ClientError> {
    let mut result = selector.to_vec();
    result.extend(encode(types, tokens)?);
    Ok(result)
}

/// Encode a single token. Static types produce one word; dynamic types
/// produce their tail section (length word + padded data).
fn encode_token(param_type: &ParamType, token: &Token) -> Result<Vec<u8>, String> {
    param_type.check_width()?;

    match (param_type, token) {
        (ParamType::Address, Token::Address(addr)) => {
            let mut buf = [0u8; 32];
            buf[12..32].copy_from_slice(addr.as_bytes());
            Ok(buf.to_vec())
        }
        (ParamType::Uint(bits), Token::Uint(value)) => {
            if value.bits() > *bits {
                return Err(format!("value {} does not fit in uint{}", value, bits));
            }
            Ok(encode_u256(value).to_vec())
        }
        (ParamType::Int(bits), Token::Int(value)) => {
            if !value.fits(*bits) {
                return Err(format!("value {} does not fit in int{}", value, bits));
            }
            Ok(encode_u256(&value.to_twos_complement()).to_vec())
        }
        (ParamType::Bool, Token::Bool(b)) => {
            let mut buf = [0u8; 32];
            buf[31] = u8::from(*b);
            Ok(buf.to_vec())
        }
        (ParamType::FixedBytes(size), Token::FixedBytes(data)) => {
            if data.len() != *size {
                return Err(format!(
                    "bytes{} expects {} bytes, got {}",
                    size,
                    size,
                    data.len()
                ));
            }
            let mut buf = [0u8; 32];
            buf[..data.len()].copy_from_slice(data);
            Ok(buf.to_vec())
        }
        (ParamType::Bytes, Token::Bytes(data)) => Ok(encode_bytes(data)),
        (ParamType::String, Token::String(s)) => Ok(encode_bytes(s.as_bytes())),
        (expected, token) => Err(format!(
            "type mismatch: expected {}, got {} value",
            expected,
            token.kind_name()
        )),
    }
}

/// Encode a U256 as one big-endian word
fn encode_u256(value: &U256) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    bytes
}

/// Encode dynamic bytes: length word followed by data right-padded to a
/// word boundary
fn encode_bytes(data: &[u8]) -> Vec<u8> {
    let padded_len = data.len().div_ceil(WORD) * WORD;
    let mut result = Vec::with_capacity(WORD + padded_len);
    result.extend_from_slice(&encode_u256(&U256::from(data.len())));
    result.extend_from_slice(data);
    result.resize(WORD + padded_len, 0);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::I256;
    use ethcall_primitives::Address;

    #[test]
    fn test_encode_address() {
        let addr = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d").unwrap();
        let encoded = encode(&[ParamType::Address], &[Token::Address(addr)]).unwrap();

        assert_eq!(encoded.len(), 32);
        assert_eq!(&encoded[..12], &[0u8; 12]);
        assert_eq!(&encoded[12..32], addr.as_bytes());
    }

    #[test]
    fn test_encode_uint() {
        let encoded = encode(&[ParamType::Uint(256)], &[Token::uint(100u64)]).unwrap();
        assert_eq!(encoded.len(), 32);
        assert_eq!(encoded[31], 100);
    }

    #[test]
    fn test_encode_uint256_max() {
        let encoded = encode(&[ParamType::Uint(256)], &[Token::Uint(U256::MAX)]).unwrap();
        assert_eq!(encoded, vec![0xff; 32]);
    }

    #[test]
    fn test_encode_uint_out_of_range() {
        let result = encode(&[ParamType::Uint(8)], &[Token::uint(256u64)]);
        assert!(matches!(result, Err(ClientError::Encoding(_))));

        assert!(encode(&[ParamType::Uint(8)], &[Token::uint(255u64)]).is_ok());
    }

    #[test]
    fn test_encode_negative_int() {
        let encoded = encode(&[ParamType::Int(256)], &[Token::int(-1i64)]).unwrap();
        assert_eq!(encoded, vec![0xff; 32]);

        let encoded = encode(&[ParamType::Int(8)], &[Token::int(-128i64)]).unwrap();
        let mut expected = vec![0xff; 32];
        expected[31] = 0x80;
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_encode_int_out_of_range() {
        assert!(encode(&[ParamType::Int(8)], &[Token::int(128i64)]).is_err());
        assert!(encode(&[ParamType::Int(8)], &[Token::int(-129i64)]).is_err());
        assert!(encode(&[ParamType::Int(8)], &[Token::Int(I256::from_i128(127))]).is_ok());
    }

    #[test]
    fn test_encode_bool() {
        let encoded_true = encode(&[ParamType::Bool], &[Token::Bool(true)]).unwrap();
        let encoded_false = encode(&[ParamType::Bool], &[Token::Bool(false)]).unwrap();

        assert_eq!(encoded_true[31], 1);
        assert_eq!(encoded_false, vec![0u8; 32]);
    }

    #[test]
    fn test_encode_bytes32() {
        let data = [0x42u8; 32];
        let encoded = encode(&[ParamType::FixedBytes(32)], &[Token::FixedBytes(data.to_vec())])
            .unwrap();
        assert_eq!(&encoded[..], &data[..]);
    }

    #[test]
    fn test_encode_fixed_bytes_right_padded() {
        let encoded =
            encode(&[ParamType::FixedBytes(2)], &[Token::FixedBytes(vec![0xab, 0xcd])]).unwrap();
        assert_eq!(&encoded[..2], &[0xab, 0xcd]);
        assert_eq!(&encoded[2..], &[0u8; 30]);
    }

    #[test]
    fn test_encode_fixed_bytes_wrong_length() {
        let result = encode(&[ParamType::FixedBytes(4)], &[Token::FixedBytes(vec![1, 2, 3])]);
        assert!(matches!(result, Err(ClientError::Encoding(_))));
    }

    #[test]
    fn test_encode_dynamic_bytes() {
        let data = vec![0x01, 0x02, 0x03];
        let encoded = encode(&[ParamType::Bytes], &[Token::Bytes(data.clone())]).unwrap();

        // offset + length + one padded word
        assert_eq!(encoded.len(), 96);
        assert_eq!(encoded[31], 32);
        assert_eq!(encoded[63], 3);
        assert_eq!(&encoded[64..67], &data[..]);
        assert_eq!(&encoded[67..], &[0u8; 29]);
    }

    #[test]
    fn test_encode_empty_string() {
        let encoded = encode(&[ParamType::String], &[Token::string("")]).unwrap();
        // offset + zero length, no data words
        assert_eq!(encoded.len(), 64);
        assert_eq!(encoded[31], 32);
        assert_eq!(&encoded[32..], &[0u8; 32]);
    }

    #[test]
    fn test_encode_mixed_static_and_dynamic() {
        // (uint256, string, bool, bytes)
        let encoded = encode(
            &[
                ParamType::Uint(256),
                ParamType::String,
                ParamType::Bool,
                ParamType::Bytes,
            ],
            &[
                Token::uint(7u64),
                Token::string("hello"),
                Token::Bool(true),
                Token::bytes(vec![0xaa; 33]),
            ],
        )
        .unwrap();

        // head: 4 words; tail: string (2 words) + bytes (3 words)
        assert_eq!(encoded.len(), 32 * 9);
        assert_eq!(encoded[31], 7);
        // string offset = head size
        assert_eq!(encoded[63], 128);
        assert_eq!(encoded[95], 1);
        // bytes offset = head + string tail
        assert_eq!(encoded[127], 192);
        assert_eq!(encoded[159], 5);
        assert_eq!(&encoded[160..165], b"hello");
        assert_eq!(encoded[223], 33);
    }

    #[test]
    fn test_encode_type_mismatch() {
        let result = encode(&[ParamType::Address], &[Token::Bool(true)]);
        match result {
            Err(ClientError::Encoding(msg)) => assert!(msg.contains("type mismatch")),
            other => panic!("Expected encoding error, got {:?}", other),
        }
    }

    #[test]
    fn test_encode_count_mismatch() {
        let result = encode(&[ParamType::Address, ParamType::Bool], &[Token::Bool(true)]);
        assert!(matches!(result, Err(ClientError::Encoding(_))));
    }

    #[test]
    fn test_encode_invalid_width() {
        let result = encode(&[ParamType::Uint(12)], &[Token::uint(1u64)]);
        assert!(matches!(result, Err(ClientError::Encoding(_))));
    }

    #[test]
    fn test_encode_function_call() {
        let to = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d").unwrap();
        let selector = [0xa9, 0x05, 0x9c, 0xbb];
        let encoded = encode_function_call(
            selector,
            &[ParamType::Address, ParamType::Uint(256)],
            &[Token::Address(to), Token::uint(1000u64)],
        )
        .unwrap();

        // 4 bytes selector + 32 bytes address + 32 bytes uint
        assert_eq!(encoded.len(), 68);
        assert_eq!(&encoded[..4], &selector);
    }
}
