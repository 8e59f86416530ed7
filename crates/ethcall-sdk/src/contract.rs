//! Contract interaction helpers

use bytes::Bytes;
use ethcall_primitives::Address;
use serde::Serialize;

use crate::abi::{decode, encode_function_call, MethodDescriptor, ParamType, Token};
use crate::{ClientError, ContractClient};

/// A contract address together with the methods it is called through
#[derive(Debug, Clone)]
pub struct Contract {
    /// Contract address
    address: Address,
    /// Method descriptors
    methods: Vec<MethodDescriptor>,
}

impl Contract {
    /// Create a new contract helper
    pub fn new(address: Address) -> Self {
        Self {
            address,
            methods: Vec::new(),
        }
    }

    /// Get the contract address
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Add a method with builder pattern
    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Get a method by name
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.name() == name)
    }

    fn require(&self, name: &str) -> Result<&MethodDescriptor, ClientError> {
        self.method(name)
            .ok_or_else(|| ClientError::Encoding(format!("Unknown method: {}", name)))
    }

    /// Encode a call to the named method
    pub fn encode_call(&self, name: &str, args: &[Token]) -> Result<Bytes, ClientError> {
        let method = self.require(name)?;

        if args.len() != method.inputs().len() {
            return Err(ClientError::Encoding(format!(
                "Expected {} arguments, got {}",
                method.inputs().len(),
                args.len()
            )));
        }

        let data = encode_function_call(method.selector(), method.inputs(), args)?;
        Ok(Bytes::from(data))
    }

    /// Decode the named method's return data
    pub fn decode_output(&self, name: &str, data: &[u8]) -> Result<Vec<Token>, ClientError> {
        let method = self.require(name)?;
        decode(method.outputs(), data)
    }

    /// Call the named method through `client`
    pub async fn call(
        &self,
        client: &ContractClient,
        name: &str,
        args: &[Token],
    ) -> Result<Vec<Token>, ClientError> {
        let method = self.require(name)?;
        client.call_at(&self.address, method, args).await
    }
}

/// Builder for creating common contract interfaces
pub struct ContractBuilder {
    address: Address,
    methods: Vec<MethodDescriptor>,
}

impl ContractBuilder {
    /// Create a new contract builder
    pub fn new(address: Address) -> Self {
        Self {
            address,
            methods: Vec::new(),
        }
    }

    /// Add a method
    pub fn method(mut self, name: &str, inputs: Vec<ParamType>, outputs: Vec<ParamType>) -> Self {
        self.methods.push(MethodDescriptor::new(name, inputs, outputs));
        self
    }

    /// Build the contract
    pub fn build(self) -> Contract {
        Contract {
            address: self.address,
            methods: self.methods,
        }
    }
}

/// Create a helper for the read-only part of the ERC-20 interface
pub fn erc20(address: Address) -> Contract {
    ContractBuilder::new(address)
        .method("name", vec![], vec![ParamType::String])
        .method("symbol", vec![], vec![ParamType::String])
        .method("decimals", vec![], vec![ParamType::Uint(8)])
        .method("totalSupply", vec![], vec![ParamType::Uint(256)])
        .method("balanceOf", vec![ParamType::Address], vec![ParamType::Uint(256)])
        .method(
            "allowance",
            vec![ParamType::Address, ParamType::Address],
            vec![ParamType::Uint(256)],
        )
        .build()
}

/// Token metadata read from an ERC-20 contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Number of decimals
    pub decimals: u8,
}

impl TokenInfo {
    /// Read `name()`, `symbol()` and `decimals()` concurrently
    pub async fn fetch(client: &ContractClient, address: &Address) -> Result<Self, ClientError> {
        let token = erc20(*address);
        let (name, symbol, decimals) = tokio::try_join!(
            token.call(client, "name", &[]),
            token.call(client, "symbol", &[]),
            token.call(client, "decimals", &[]),
        )?;

        Ok(Self {
            name: single_string(name, "name")?,
            symbol: single_string(symbol, "symbol")?,
            decimals: single_u8(decimals, "decimals")?,
        })
    }
}

fn single_string(tokens: Vec<Token>, method: &str) -> Result<String, ClientError> {
    tokens
        .into_iter()
        .next()
        .and_then(Token::into_string)
        .ok_or_else(|| ClientError::Decoding(format!("{}() did not return a string", method)))
}

fn single_u8(tokens: Vec<Token>, method: &str) -> Result<u8, ClientError> {
    tokens
        .first()
        .and_then(Token::as_uint)
        .filter(|value| value.bits() <= 8)
        .map(|value| value.low_u64() as u8)
        .ok_or_else(|| ClientError::Decoding(format!("{}() did not return a uint8", method)))
}
