//! Generic read-only call command

use clap::Args;
use ethcall_primitives::Address;
use ethcall_sdk::abi::{parse_token, MethodDescriptor, Token};
use ethcall_sdk::types::{BlockId, CallOptions};
use serde_json::Value;

use crate::{config::Config, output::token_to_json, output::Output, CliError};

/// Call a view method and print the decoded result
#[derive(Debug, Args)]
pub struct CallCommand {
    /// Contract address
    pub address: String,
    /// Method signature with outputs, e.g. "balanceOf(address)(uint256)"
    pub signature: String,
    /// Arguments, one per input parameter
    #[arg(allow_negative_numbers = true)]
    pub args: Vec<String>,
    /// Block number, or latest/pending/earliest/safe/finalized
    #[arg(long, short, default_value = "latest")]
    pub block: String,
}

impl CallCommand {
    pub async fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let address = Address::from_hex(&self.address)
            .map_err(|e| CliError::InvalidInput(format!("address {}: {}", self.address, e)))?;
        let method = MethodDescriptor::parse(&self.signature)?;
        let args = parse_args(&method, &self.args)?;
        let block = parse_block(&self.block)?;

        let client = super::connect(config)?;
        let result = client
            .call_with(&address, &method, &args, &CallOptions::at_block(block))
            .await?;

        let lines: Vec<String> = result.iter().map(Token::to_string).collect();
        Output::new(json)
            .field("method", method.signature())
            .field_value(
                "result",
                Value::Array(result.iter().map(token_to_json).collect()),
            )
            .message(&lines.join("\n"))
            .print();

        Ok(())
    }
}

fn parse_args(method: &MethodDescriptor, args: &[String]) -> Result<Vec<Token>, CliError> {
    if args.len() != method.inputs().len() {
        return Err(CliError::InvalidInput(format!(
            "{} takes {} arguments, got {}",
            method.signature(),
            method.inputs().len(),
            args.len()
        )));
    }

    method
        .inputs()
        .iter()
        .zip(args)
        .map(|(param_type, arg)| parse_token(param_type, arg).map_err(CliError::from))
        .collect()
}

fn parse_block(block: &str) -> Result<BlockId, CliError> {
    let id = match block {
        "latest" => BlockId::Latest,
        "pending" => BlockId::Pending,
        "earliest" => BlockId::Earliest,
        "safe" => BlockId::Safe,
        "finalized" => BlockId::Finalized,
        other => {
            let number = match other.strip_prefix("0x") {
                Some(hex) => u64::from_str_radix(hex, 16),
                None => other.parse::<u64>(),
            };
            BlockId::Number(number.map_err(|_| {
                CliError::InvalidInput(format!("Invalid block: {}", block))
            })?)
        }
    };
    Ok(id)
}
