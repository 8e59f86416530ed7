//! Token metadata command

use clap::Args;
use ethcall_primitives::Address;
use ethcall_sdk::TokenInfo;

use crate::{config::Config, output::Output, CliError};

/// Mainnet DAI stablecoin
pub const DAI_ADDRESS: &str = "0x6B175474E89094C44Da98b954EedeAC495271d0F";

/// Read name, symbol and decimals of an ERC-20 token
#[derive(Debug, Args)]
pub struct TokenCommand {
    /// Token contract address
    #[arg(default_value = DAI_ADDRESS)]
    pub address: String,
}

impl TokenCommand {
    pub async fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let address = Address::from_hex(&self.address)
            .map_err(|e| CliError::InvalidInput(format!("address {}: {}", self.address, e)))?;

        let client = super::connect(config)?;
        let info = TokenInfo::fetch(&client, &address).await?;

        Output::new(json)
            .field("address", &address.to_hex())
            .field("name", &info.name)
            .field("symbol", &info.symbol)
            .field_u64("decimals", u64::from(info.decimals))
            .message(&format!(
                "Name:     {}\nSymbol:   {}\nDecimals: {}",
                info.name, info.symbol, info.decimals
            ))
            .print();

        Ok(())
    }
}
