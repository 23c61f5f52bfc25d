//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::codec::Felt;
use crate::vrf::types::SourceKind;

/// Cartridge VRF provider on Starknet Sepolia.
pub const DEFAULT_VRF_PROVIDER: &str =
    "0x051fea4450da9d6aee758bdeba88b2f665bcbf549d2c61421aa724e9ac0ced8f";

/// RandomRangeGenerator deployment on Starknet Sepolia.
pub const DEFAULT_TARGET_CONTRACT: &str =
    "0x0406600b709497815218ddb7c086138a3bb9fcc0be102750f2c5c29b10a33e4a";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct VrfConfig {
    /// RPC endpoints and timeouts.
    pub network: NetworkConfig,

    /// Contract addresses and entrypoints.
    pub contracts: ContractsConfig,

    /// Which wallet connectors may submit VRF transactions.
    pub connector: ConnectorPolicy,

    /// Result polling schedule after a submission.
    pub polling: PollingConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Network configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Primary JSON-RPC endpoint.
    pub rpc_url: String,

    /// Endpoints tried in order when the primary fails.
    pub failover_urls: Vec<String>,

    /// Per-request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.cartridge.gg/x/starknet/sepolia".to_string(),
            failover_urls: Vec::new(),
            rpc_timeout_secs: 10,
        }
    }
}

/// Contract addresses and entrypoint names.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractsConfig {
    /// VRF provider contract.
    pub vrf_provider: Felt,

    /// Contract consuming the randomness.
    pub target_contract: Felt,

    /// Provider entrypoint flagging the randomness request.
    pub request_entrypoint: String,

    /// Target entrypoint taking `(min, max)`.
    pub target_entrypoint: String,

    /// Target view returning the last result.
    pub read_entrypoint: String,

    /// Randomness source passed to the provider.
    pub source: SourceKind,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            vrf_provider: Felt::from_hex_literal(DEFAULT_VRF_PROVIDER),
            target_contract: Felt::from_hex_literal(DEFAULT_TARGET_CONTRACT),
            request_entrypoint: "request_random".to_string(),
            target_entrypoint: "generate_random_in_range".to_string(),
            read_entrypoint: "get_last_random_number".to_string(),
            source: SourceKind::Nonce,
        }
    }
}

/// Connector identification rules for paymaster-capable wallets.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectorPolicy {
    /// Connector ids accepted outright.
    pub controller_ids: Vec<String>,

    /// Case-insensitive substrings of the connector name that are accepted.
    pub name_markers: Vec<String>,
}

impl Default for ConnectorPolicy {
    fn default() -> Self {
        Self {
            controller_ids: vec!["controller".to_string()],
            name_markers: vec!["cartridge".to_string()],
        }
    }
}

/// Polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Delays after submission at which the result is re-read.
    pub delays_ms: Vec<u64>,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            delays_ms: vec![3_000, 6_000, 10_000, 15_000],
        }
    }
}

impl PollingConfig {
    pub fn delays(&self) -> Vec<std::time::Duration> {
        self.delays_ms
            .iter()
            .map(|ms| std::time::Duration::from_millis(*ms))
            .collect()
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default `EnvFilter` directive; `RUST_LOG` wins when set.
    pub log_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "vrf_range_client=info".to_string(),
        }
    }
}
