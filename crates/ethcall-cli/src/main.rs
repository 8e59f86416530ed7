//! # ethcall-cli
//!
//! Command-line interface for read-only Ethereum contract calls.
//!
//! ## Usage
//!
//! ```bash
//! # Token metadata (defaults to DAI)
//! ethcall token
//! ethcall token 0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48
//!
//! # Any view method
//! ethcall call 0x6B175474E89094C44Da98b954EedeAC495271d0F \
//!     "balanceOf(address)(uint256)" 0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d
//!
//! # Selector of a signature
//! ethcall selector "transfer(address,uint256)"
//!
//! # Configuration
//! ethcall config --show
//! ethcall config --set-rpc https://mainnet.infura.io/v3/<project-id>
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use config::Config;
pub use error::CliError;
pub use output::Output;

/// Read-only Ethereum contract calls
#[derive(Parser, Debug)]
#[command(name = "ethcall")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// RPC endpoint URL (overrides config file and environment)
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Read ERC-20 token name, symbol and decimals
    Token(commands::token::TokenCommand),
    /// Call a view method
    Call(commands::call::CallCommand),
    /// Compute a function selector
    Selector(commands::selector::SelectorCommand),
    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set RPC URL
        #[arg(long)]
        set_rpc: Option<String>,
        /// Set expected chain ID
        #[arg(long)]
        set_chain_id: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let result = run(cli.command, cli.rpc_url, cli.json).await;

    if let Err(e) = result {
        if cli.json {
            println!("{}", output::error_json(&e.to_string()));
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

async fn run(command: Commands, rpc_url: Option<String>, json: bool) -> Result<(), CliError> {
    match command {
        Commands::Selector(cmd) => cmd.execute(json),
        Commands::Token(cmd) => cmd.execute(&effective_config(rpc_url)?, json).await,
        Commands::Call(cmd) => cmd.execute(&effective_config(rpc_url)?, json).await,
        Commands::Config {
            show,
            set_rpc,
            set_chain_id,
        } => handle_config(show, set_rpc, set_chain_id, rpc_url, json),
    }
}

/// Load the config file and environment, then apply the `--rpc-url` flag
fn effective_config(rpc_url: Option<String>) -> Result<Config, CliError> {
    let mut config = Config::load()?;
    if let Some(rpc_url) = rpc_url {
        config.rpc_url = rpc_url;
    }
    Ok(config)
}

fn handle_config(
    show: bool,
    set_rpc: Option<String>,
    set_chain_id: Option<u64>,
    rpc_url: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    if set_rpc.is_some() || set_chain_id.is_some() {
        // Persist on top of the file contents, not the env/flag overrides
        let mut stored = match Config::config_path() {
            Some(path) if path.exists() => Config::load_from(&path)?,
            _ => Config::default(),
        };
        if let Some(rpc) = set_rpc {
            stored.rpc_url = rpc;
        }
        if let Some(chain_id) = set_chain_id {
            stored.chain_id = Some(chain_id);
        }
        let path = stored.save()?;

        Output::new(json)
            .field("status", "saved")
            .field("path", &path.display().to_string())
            .message(&format!("Configuration saved to {}", path.display()))
            .print();
    } else if show {
        let effective = effective_config(rpc_url)?;
        let chain_id = effective
            .chain_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "(from node)".to_string());
        let mut output = Output::new(json)
            .field("rpc_url", &effective.rpc_url)
            .field_u64("timeout_secs", effective.timeout_secs)
            .message(&format!(
                "RPC URL: {}\nChain ID: {}\nTimeout: {}s",
                effective.rpc_url, chain_id, effective.timeout_secs
            ));
        if let Some(id) = effective.chain_id {
            output = output.field_u64("chain_id", id);
        }
        output.print();
    } else {
        Output::new(json)
            .message("Use --show to display config, or --set-rpc/--set-chain-id to modify")
            .print();
    }

    Ok(())
}
