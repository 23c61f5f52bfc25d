//! vrf-range-client
//!
//! Command-line front end for the VRF request/consume core.
//!
//! ```text
//! prepare  → validate + build the two-call sequence, print JSON for a wallet
//! read     → one read of the target contract's last random number
//! watch    → poll schedule after a submitted transaction (Ctrl-C cancels)
//! classify → map a raw wallet/RPC failure message to the error taxonomy
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use vrf_range_client::blockchain::{Connection, ConnectorCapabilities, RpcClient};
use vrf_range_client::config::{load_config, validate_config, ConfigError, VrfConfig};
use vrf_range_client::observability::logging;
use vrf_range_client::vrf::{self, RandomnessRequest, ResultReader};
use vrf_range_client::Felt;

#[derive(Parser)]
#[command(name = "vrf-range-client")]
#[command(about = "Request and read verifiable random numbers on Starknet", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in Sepolia defaults when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a range and print the call sequence for a wallet to submit
    Prepare {
        /// Account address that will submit the transaction
        #[arg(long)]
        caller: Felt,
        #[arg(long)]
        min: u128,
        #[arg(long)]
        max: u128,
        /// Connector id reported by the wallet
        #[arg(long, default_value = "controller")]
        connector_id: String,
    },
    /// Read the last random number
    Read,
    /// Poll for the result of a submitted transaction
    Watch {
        #[arg(long)]
        tx: Felt,
    },
    /// Classify a raw failure message
    Classify { message: String },
}

fn load(path: Option<&PathBuf>) -> Result<VrfConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let config = VrfConfig::default();
            validate_config(&config).map_err(ConfigError::Validation)?;
            Ok(config)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load(cli.config.as_ref())?;

    logging::init(&config.observability.log_filter);

    tracing::debug!(
        rpc_url = %config.network.rpc_url,
        provider = %config.contracts.vrf_provider,
        target = %config.contracts.target_contract,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Prepare {
            caller,
            min,
            max,
            connector_id,
        } => {
            let connection = Connection { address: caller };
            let capabilities = ConnectorCapabilities {
                name: connector_id.clone(),
                id: connector_id,
                randomness_wrapping: false,
            };
            if let Err(err) = vrf::validate(
                Some(&connection),
                Some(&capabilities),
                &config.connector,
                min,
                max,
            ) {
                eprintln!("{}", err.user_message());
                return Err(err.into());
            }

            let request = RandomnessRequest {
                provider_address: config.contracts.vrf_provider,
                target_contract_address: config.contracts.target_contract,
                caller_address: caller,
                source_kind: config.contracts.source,
                entrypoint: config.contracts.target_entrypoint.clone(),
                range_min: min,
                range_max: max,
            };
            let calls = vrf::build_with_entrypoint(&request, &config.contracts.request_entrypoint);
            println!("{}", serde_json::to_string_pretty(&calls)?);
        }
        Commands::Read => {
            let client = RpcClient::new(&config.network)?;
            let reader = ResultReader::new(client, &config.contracts);
            match reader.fetch(None).await? {
                Some(result) => println!("{}", serde_json::to_string_pretty(&result)?),
                None => println!("no result"),
            }
        }
        Commands::Watch { tx } => {
            let client = RpcClient::new(&config.network)?;
            let reader = ResultReader::new(client, &config.contracts);
            let (handle, mut updates) = reader.schedule_polls(tx, &config.polling.delays());

            tracing::info!(tx_hash = %tx, polls = config.polling.delays_ms.len(), "Watching for result");

            loop {
                tokio::select! {
                    update = updates.recv() => {
                        let Some(update) = update else {
                            println!("no result");
                            break;
                        };
                        match update.result {
                            Ok(Some(result)) => {
                                println!("{}", serde_json::to_string_pretty(&result)?);
                                handle.cancel();
                                break;
                            }
                            Ok(None) => tracing::info!(poll = update.poll_index, "Result not available yet"),
                            Err(e) => tracing::warn!(poll = update.poll_index, error = %e, "Read failed"),
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Interrupted, cancelling polls");
                        handle.cancel();
                        break;
                    }
                }
            }
        }
        Commands::Classify { message } => {
            let err = vrf::classify(&message);
            println!("{}: {}", err.kind(), err.user_message());
        }
    }

    Ok(())
}
