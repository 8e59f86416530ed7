//! ABI type definitions

use std::fmt;

use ethcall_primitives::{Address, U256};

/// Solidity ABI token (runtime value)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Address (20 bytes)
    Address(Address),
    /// Boolean
    Bool(bool),
    /// Unsigned integer (8-256 bits)
    Uint(U256),
    /// Signed integer (8-256 bits)
    Int(I256),
    /// Fixed-size bytes (1-32)
    FixedBytes(Vec<u8>),
    /// UTF-8 string
    String(String),
    /// Dynamic bytes
    Bytes(Vec<u8>),
}

/// Signed 256-bit integer stored as sign and magnitude.
///
/// Negative zero is normalized to zero on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct I256 {
    abs: U256,
    negative: bool,
}

impl I256 {
    /// Zero
    pub const ZERO: I256 = I256 {
        abs: U256::zero(),
        negative: false,
    };

    /// Create a new I256 from magnitude and sign
    pub fn new(abs: U256, negative: bool) -> Self {
        Self {
            abs,
            negative: negative && !abs.is_zero(),
        }
    }

    /// Create from i128
    pub fn from_i128(value: i128) -> Self {
        Self::new(U256::from(value.unsigned_abs()), value < 0)
    }

    /// Absolute value
    pub fn abs(&self) -> U256 {
        self.abs
    }

    /// Check if negative
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.abs.is_zero()
    }

    /// Whether the value is representable as a two's-complement `int<bits>`
    pub fn fits(&self, bits: usize) -> bool {
        if bits == 0 {
            return false;
        }
        if bits > 256 {
            return true;
        }
        // 2^(bits-1)
        let limit = U256::one() << (bits - 1);
        if self.negative {
            self.abs <= limit
        } else {
            self.abs < limit
        }
    }

    /// Encode as a 256-bit two's-complement word
    pub fn to_twos_complement(&self) -> U256 {
        if self.negative {
            twos_complement(self.abs)
        } else {
            self.abs
        }
    }

    /// Interpret a 256-bit word as a two's-complement signed value
    pub fn from_twos_complement(word: U256) -> Self {
        if word.bit(255) {
            Self::new(twos_complement(word), true)
        } else {
            Self::new(word, false)
        }
    }
}

impl From<i64> for I256 {
    fn from(value: i64) -> Self {
        Self::from_i128(value as i128)
    }
}

impl From<i128> for I256 {
    fn from(value: i128) -> Self {
        Self::from_i128(value)
    }
}

impl fmt::Display for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.abs)
        } else {
            write!(f, "{}", self.abs)
        }
    }
}

fn twos_complement(value: U256) -> U256 {
    (!value).overflowing_add(U256::one()).0
}

/// Solidity parameter types supported by the encoder and decoder
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Address
    Address,
    /// Boolean
    Bool,
    /// Unsigned integer with bit size (8, 16, ..., 256)
    Uint(usize),
    /// Signed integer with bit size (8, 16, ..., 256)
    Int(usize),
    /// Fixed-size bytes (size 1-32)
    FixedBytes(usize),
    /// UTF-8 string
    String,
    /// Dynamic bytes
    Bytes,
}

impl ParamType {
    /// Check if this type is dynamic (variable length)
    pub fn is_dynamic(&self) -> bool {
        matches!(self, ParamType::String | ParamType::Bytes)
    }

    /// Canonical type name used in function signatures
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    /// Check the declared width is one Solidity allows
    pub(crate) fn check_width(&self) -> Result<(), String> {
        match self {
            ParamType::Uint(bits) | ParamType::Int(bits) => {
                if *bits == 0 || *bits > 256 || bits % 8 != 0 {
                    return Err(format!("invalid integer width: {}", bits));
                }
            }
            ParamType::FixedBytes(size) => {
                if *size == 0 || *size > 32 {
                    return Err(format!("invalid fixed bytes size: {}", size));
                }
            }
            _ => {}
        }
        Ok(())
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Address => write!(f, "address"),
            ParamType::Bool => write!(f, "bool"),
            ParamType::Uint(bits) => write!(f, "uint{}", bits),
            ParamType::Int(bits) => write!(f, "int{}", bits),
            ParamType::FixedBytes(size) => write!(f, "bytes{}", size),
            ParamType::String => write!(f, "string"),
            ParamType::Bytes => write!(f, "bytes"),
        }
    }
}

impl Token {
    /// Create an address token
    pub fn address(addr: Address) -> Self {
        Token::Address(addr)
    }

    /// Create a uint token
    pub fn uint(value: impl Into<U256>) -> Self {
        Token::Uint(value.into())
    }

    /// Create an int token
    pub fn int(value: impl Into<I256>) -> Self {
        Token::Int(value.into())
    }

    /// Create a bool token
    pub fn bool(value: bool) -> Self {
        Token::Bool(value)
    }

    /// Create a dynamic bytes token
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Token::Bytes(data.into())
    }

    /// Create a string token
    pub fn string(s: impl Into<String>) -> Self {
        Token::String(s.into())
    }

    /// Short name of the token's variant, for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Address(_) => "address",
            Token::Bool(_) => "bool",
            Token::Uint(_) => "uint",
            Token::Int(_) => "int",
            Token::FixedBytes(_) => "fixed bytes",
            Token::String(_) => "string",
            Token::Bytes(_) => "bytes",
        }
    }

    /// Get the address value
    pub fn as_address(&self) -> Option<&Address> {
        match self {
            Token::Address(a) => Some(a),
            _ => None,
        }
    }

    /// Get the unsigned integer value
    pub fn as_uint(&self) -> Option<U256> {
        match self {
            Token::Uint(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Token::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Token::String(s) => Some(s),
            _ => None,
        }
    }

    /// Consume the token and return its string value
    pub fn into_string(self) -> Option<String> {
        match self {
            Token::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Address(a) => write!(f, "{}", a),
            Token::Bool(b) => write!(f, "{}", b),
            Token::Uint(v) => write!(f, "{}", v),
            Token::Int(v) => write!(f, "{}", v),
            Token::FixedBytes(b) | Token::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            Token::String(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_type_is_dynamic() {
        assert!(!ParamType::Address.is_dynamic());
        assert!(!ParamType::Uint(256).is_dynamic());
        assert!(!ParamType::Bool.is_dynamic());
        assert!(!ParamType::FixedBytes(32).is_dynamic());

        assert!(ParamType::Bytes.is_dynamic());
        assert!(ParamType::String.is_dynamic());
    }

    #[test]
    fn test_param_type_canonical() {
        assert_eq!(ParamType::Uint(256).canonical(), "uint256");
        assert_eq!(ParamType::Int(8).canonical(), "int8");
        assert_eq!(ParamType::FixedBytes(32).canonical(), "bytes32");
        assert_eq!(ParamType::Bytes.canonical(), "bytes");
        assert_eq!(ParamType::String.canonical(), "string");
        assert_eq!(ParamType::Address.canonical(), "address");
        assert_eq!(ParamType::Bool.canonical(), "bool");
    }

    #[test]
    fn test_param_type_check_width() {
        assert!(ParamType::Uint(8).check_width().is_ok());
        assert!(ParamType::Int(256).check_width().is_ok());
        assert!(ParamType::Uint(0).check_width().is_err());
        assert!(ParamType::Uint(7).check_width().is_err());
        assert!(ParamType::Int(264).check_width().is_err());
        assert!(ParamType::FixedBytes(0).check_width().is_err());
        assert!(ParamType::FixedBytes(33).check_width().is_err());
    }

    #[test]
    fn test_i256_from_i128() {
        let positive = I256::from_i128(100);
        assert!(!positive.is_negative());
        assert_eq!(positive.abs(), U256::from(100));

        let negative = I256::from_i128(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs(), U256::from(100));

        assert!(I256::from_i128(0).is_zero());
        assert_eq!(I256::from_i128(i128::MIN).abs(), U256::from(1u128 << 127));
    }

    #[test]
    fn test_i256_negative_zero_normalized() {
        assert_eq!(I256::new(U256::zero(), true), I256::ZERO);
    }

    #[test]
    fn test_i256_twos_complement() {
        assert_eq!(I256::from_i128(-1).to_twos_complement(), U256::MAX);
        assert_eq!(I256::from_twos_complement(U256::MAX), I256::from_i128(-1));

        let min = I256::from_twos_complement(U256::one() << 255);
        assert!(min.is_negative());
        assert_eq!(min.abs(), U256::one() << 255);
        assert_eq!(min.to_twos_complement(), U256::one() << 255);
    }

    #[test]
    fn test_i256_fits() {
        assert!(I256::from_i128(127).fits(8));
        assert!(!I256::from_i128(128).fits(8));
        assert!(I256::from_i128(-128).fits(8));
        assert!(!I256::from_i128(-129).fits(8));
        assert!(I256::new(U256::one() << 255, true).fits(256));
        assert!(!I256::new(U256::one() << 255, false).fits(256));
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::string("DAI").to_string(), "DAI");
        assert_eq!(Token::int(-5i64).to_string(), "-5");
        assert_eq!(Token::uint(18u64).to_string(), "18");
        assert_eq!(Token::bytes(vec![0xde, 0xad]).to_string(), "0xdead");
    }

    #[test]
    fn test_token_accessors() {
        assert_eq!(Token::string("DAI").as_str(), Some("DAI"));
        assert_eq!(Token::uint(1u64).as_uint(), Some(U256::one()));
        assert_eq!(Token::bool(true).as_bool(), Some(true));
        assert_eq!(Token::bool(true).as_str(), None);
        assert_eq!(Token::address(Address::ZERO).as_address(), Some(&Address::ZERO));
    }
}
