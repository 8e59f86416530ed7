//! Selector command

use clap::Args;
use ethcall_sdk::abi::MethodDescriptor;

use crate::{output::Output, CliError};

/// Compute the 4-byte selector of a method signature
#[derive(Debug, Args)]
pub struct SelectorCommand {
    /// Method signature, e.g. "transfer(address,uint256)"
    pub signature: String,
}

impl SelectorCommand {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        let method = MethodDescriptor::parse(&self.signature)?;
        let selector = format!("0x{}", hex::encode(method.selector()));

        Output::new(json)
            .field("signature", method.signature())
            .field("selector", &selector)
            .message(&format!("{}  {}", selector, method.signature()))
            .print();

        Ok(())
    }
}
