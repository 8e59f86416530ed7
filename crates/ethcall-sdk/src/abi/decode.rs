//! ABI decoding
//!
//! Every read goes through [`read_word`] or [`read_slice`], which check the
//! bounds (with overflow-checked arithmetic) before slicing.

use ethcall_primitives::{Address, U256};

use super::encode::WORD;
use super::types::{ParamType, Token, I256};
use crate::ClientError;

/// Decode tokens from ABI-encoded data
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, ClientError> {
    if data.is_empty() && !types.is_empty() {
        return Err(ClientError::Decoding(
            "empty return data (method missing or not a contract?)".to_string(),
        ));
    }

    let mut tokens = Vec::with_capacity(types.len());

    for (index, param_type) in types.iter().enumerate() {
        param_type.check_width().map_err(ClientError::Decoding)?;
        let head_offset = index * WORD;
        let token = decode_token(param_type, data, head_offset).map_err(|msg| {
            ClientError::Decoding(format!("output {} ({}): {}", index, param_type, msg))
        })?;
        tokens.push(token);
    }

    Ok(tokens)
}

/// Decode a single token whose head slot starts at `offset`
fn decode_token(param_type: &ParamType, data: &[u8], offset: usize) -> Result<Token, String> {
    let word = read_word(data, offset)?;

    match param_type {
        ParamType::Address => {
            if word[..12].iter().any(|b| *b != 0) {
                return Err("non-zero padding in address".to_string());
            }
            let mut addr_bytes = [0u8; 20];
            addr_bytes.copy_from_slice(&word[12..]);
            Ok(Token::Address(Address::from_bytes(addr_bytes)))
        }
        ParamType::Uint(bits) => {
            let value = U256::from_big_endian(word);
            if value.bits() > *bits {
                return Err(format!("value does not fit in uint{}", bits));
            }
            Ok(Token::Uint(value))
        }
        ParamType::Int(bits) => {
            let value = I256::from_twos_complement(U256::from_big_endian(word));
            // A value outside the range means the upper bytes are not a
            // sign extension of bit (bits - 1)
            if !value.fits(*bits) {
                return Err(format!("value is not a valid int{}", bits));
            }
            Ok(Token::Int(value))
        }
        ParamType::Bool => {
            if word[..31].iter().any(|b| *b != 0) || word[31] > 1 {
                return Err("bool must be 0 or 1".to_string());
            }
            Ok(Token::Bool(word[31] == 1))
        }
        ParamType::FixedBytes(size) => {
            if word[*size..].iter().any(|b| *b != 0) {
                return Err(format!("non-zero padding in bytes{}", size));
            }
            Ok(Token::FixedBytes(word[..*size].to_vec()))
        }
        ParamType::Bytes => {
            let bytes = decode_bytes(data, word_to_usize(word)?)?;
            Ok(Token::Bytes(bytes.to_vec()))
        }
        ParamType::String => {
            let bytes = decode_bytes(data, word_to_usize(word)?)?;
            let s = std::str::from_utf8(bytes).map_err(|e| format!("invalid UTF-8: {}", e))?;
            Ok(Token::String(s.to_string()))
        }
    }
}

/// Read the length-prefixed tail section starting at `offset`
fn decode_bytes(data: &[u8], offset: usize) -> Result<&[u8], String> {
    let len = word_to_usize(read_word(data, offset)?)?;
    let start = offset + WORD;
    read_slice(data, start, len)
}

/// Read the 32-byte word at `offset`
fn read_word(data: &[u8], offset: usize) -> Result<&[u8; 32], String> {
    let slice = read_slice(data, offset, WORD)?;
    slice
        .try_into()
        .map_err(|_| "word slice has wrong length".to_string())
}

/// Read `len` bytes at `offset`
fn read_slice(data: &[u8], offset: usize, len: usize) -> Result<&[u8], String> {
    let end = offset
        .checked_add(len)
        .ok_or_else(|| format!("offset {} + length {} overflows", offset, len))?;
    if data.len() < end {
        return Err(format!(
            "insufficient data: need {} bytes, have {}",
            end,
            data.len()
        ));
    }
    Ok(&data[offset..end])
}

/// Interpret a word as an offset or length
fn word_to_usize(word: &[u8; 32]) -> Result<usize, String> {
    let value = U256::from_big_endian(word);
    if value > U256::from(usize::MAX as u64) {
        return Err(format!("offset or length {} out of range", value));
    }
    Ok(value.as_usize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(value: u64) -> [u8; 32] {
        let mut buf = [0u8; 32];
        buf[24..].copy_from_slice(&value.to_be_bytes());
        buf
    }

    /// Encoding of a single `string` return value
    fn encoded_string(s: &str) -> Vec<u8> {
        let mut out = word(32).to_vec();
        out.extend_from_slice(&word(s.len() as u64));
        let mut data = s.as_bytes().to_vec();
        data.resize(s.len().div_ceil(32) * 32, 0);
        out.extend(data);
        out
    }

    #[test]
    fn test_decode_address() {
        let addr = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d").unwrap();
        let mut encoded = [0u8; 32];
        encoded[12..32].copy_from_slice(addr.as_bytes());

        let tokens = decode(&[ParamType::Address], &encoded).unwrap();
        assert_eq!(tokens, vec![Token::Address(addr)]);
    }

    #[test]
    fn test_decode_address_dirty_padding() {
        let mut encoded = [0u8; 32];
        encoded[0] = 1;
        assert!(matches!(
            decode(&[ParamType::Address], &encoded),
            Err(ClientError::Decoding(_))
        ));
    }

    #[test]
    fn test_decode_uint() {
        let tokens = decode(&[ParamType::Uint(256)], &word(100)).unwrap();
        assert_eq!(tokens, vec![Token::Uint(U256::from(100))]);
    }

    #[test]
    fn test_decode_uint_exceeds_width() {
        // 256 does not fit uint8
        assert!(decode(&[ParamType::Uint(8)], &word(256)).is_err());
        assert_eq!(
            decode(&[ParamType::Uint(8)], &word(18)).unwrap(),
            vec![Token::Uint(U256::from(18))]
        );
    }

    #[test]
    fn test_decode_bool() {
        assert_eq!(decode(&[ParamType::Bool], &word(1)).unwrap(), vec![Token::Bool(true)]);
        assert_eq!(decode(&[ParamType::Bool], &word(0)).unwrap(), vec![Token::Bool(false)]);
        assert!(decode(&[ParamType::Bool], &word(2)).is_err());
    }

    #[test]
    fn test_decode_bytes32() {
        let data = [0x42u8; 32];
        let tokens = decode(&[ParamType::FixedBytes(32)], &data).unwrap();
        assert_eq!(tokens[0], Token::FixedBytes(data.to_vec()));
    }

    #[test]
    fn test_decode_fixed_bytes_dirty_padding() {
        let data = [0x42u8; 32];
        assert!(decode(&[ParamType::FixedBytes(4)], &data).is_err());
    }

    #[test]
    fn test_decode_dynamic_bytes() {
        let original = vec![0x01, 0x02, 0x03];
        let mut encoded = vec![0u8; 96];
        encoded[31] = 32;
        encoded[63] = 3;
        encoded[64..67].copy_from_slice(&original);

        let tokens = decode(&[ParamType::Bytes], &encoded).unwrap();
        assert_eq!(tokens[0], Token::Bytes(original));
    }

    #[test]
    fn test_decode_string() {
        let tokens = decode(&[ParamType::String], &encoded_string("DAI")).unwrap();
        assert_eq!(tokens, vec![Token::String("DAI".to_string())]);
    }

    #[test]
    fn test_decode_empty_string() {
        let tokens = decode(&[ParamType::String], &encoded_string("")).unwrap();
        assert_eq!(tokens, vec![Token::String(String::new())]);
    }

    #[test]
    fn test_decode_string_invalid_utf8() {
        let mut encoded = encoded_string("abc");
        encoded[64] = 0xff;
        match decode(&[ParamType::String], &encoded) {
            Err(ClientError::Decoding(msg)) => assert!(msg.contains("UTF-8")),
            other => panic!("Expected decoding error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_truncated_string_tail() {
        let encoded = encoded_string("Dai Stablecoin");
        // cut in the middle of the string data
        let truncated = &encoded[..64 + 5];
        assert!(matches!(
            decode(&[ParamType::String], truncated),
            Err(ClientError::Decoding(_))
        ));
        // cut before the length word
        assert!(decode(&[ParamType::String], &encoded[..40]).is_err());
    }

    #[test]
    fn test_decode_huge_offset() {
        let encoded = [0xffu8; 64];
        assert!(matches!(
            decode(&[ParamType::String], &encoded),
            Err(ClientError::Decoding(_))
        ));
    }

    #[test]
    fn test_decode_length_overflows_offset() {
        // offset 32, length usize::MAX-ish
        let mut encoded = word(32).to_vec();
        let mut len = [0u8; 32];
        len[24..].copy_from_slice(&u64::MAX.to_be_bytes());
        encoded.extend_from_slice(&len);
        assert!(decode(&[ParamType::Bytes], &encoded).is_err());
    }

    #[test]
    fn test_decode_multiple_params() {
        let addr = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d").unwrap();

        let mut encoded = [0u8; 64];
        encoded[12..32].copy_from_slice(addr.as_bytes());
        encoded[63] = 100;

        let tokens = decode(&[ParamType::Address, ParamType::Uint(256)], &encoded).unwrap();
        assert_eq!(tokens, vec![Token::Address(addr), Token::Uint(U256::from(100))]);
    }

    #[test]
    fn test_decode_insufficient_data() {
        let data = [0u8; 16];
        assert!(decode(&[ParamType::Uint(256)], &data).is_err());
    }

    #[test]
    fn test_decode_empty_data() {
        match decode(&[ParamType::String], &[]) {
            Err(ClientError::Decoding(msg)) => assert!(msg.contains("empty")),
            other => panic!("Expected decoding error, got {:?}", other),
        }
        assert_eq!(decode(&[], &[]).unwrap(), vec![]);
    }

    #[test]
    fn test_decode_int_positive() {
        let tokens = decode(&[ParamType::Int(256)], &word(100)).unwrap();
        assert_eq!(tokens, vec![Token::Int(I256::from_i128(100))]);
    }

    #[test]
    fn test_decode_int_negative() {
        // -1 in two's complement is all 1s
        let tokens = decode(&[ParamType::Int(256)], &[0xffu8; 32]).unwrap();
        assert_eq!(tokens, vec![Token::Int(I256::from_i128(-1))]);

        let tokens = decode(&[ParamType::Int(8)], &[0xffu8; 32]).unwrap();
        assert_eq!(tokens, vec![Token::Int(I256::from_i128(-1))]);
    }

    #[test]
    fn test_decode_int_bad_sign_extension() {
        // 0x80 in the low byte with zero upper bytes is 128, not -128
        assert!(decode(&[ParamType::Int(8)], &word(0x80)).is_err());
    }
}
