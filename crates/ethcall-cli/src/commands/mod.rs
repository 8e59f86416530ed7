//! CLI commands

pub mod call;
pub mod selector;
pub mod token;

use ethcall_sdk::ContractClient;

use crate::{config::Config, CliError};

/// Build an HTTP client from the effective configuration
pub(crate) fn connect(config: &Config) -> Result<ContractClient, CliError> {
    tracing::debug!(url = %config.rpc_url, timeout_secs = config.timeout_secs, "connecting");
    Ok(ContractClient::with_timeout(&config.endpoint(), config.timeout())?)
}
