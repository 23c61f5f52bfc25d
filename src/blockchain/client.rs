//! Starknet JSON-RPC client with timeout and failover.
//!
//! # Responsibilities
//! - Issue `starknet_call` view calls against the latest block
//! - Fail over across configured endpoints
//! - Handle timeouts and network errors gracefully

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainReader};
use crate::codec::{selector, Felt};
use crate::config::NetworkConfig;
use crate::observability::metrics;

#[derive(Debug, Deserialize)]
struct RpcEnvelope<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

/// JSON-RPC client over one or more endpoints.
#[derive(Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    /// Primary endpoint first, then failovers.
    endpoints: Vec<url::Url>,
    timeout_secs: u64,
}

impl RpcClient {
    /// Create a new client from network configuration.
    pub fn new(config: &NetworkConfig) -> BlockchainResult<Self> {
        let primary: url::Url = config.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;

        let mut endpoints = vec![primary];
        for url_str in &config.failover_urls {
            match url_str.parse() {
                Ok(url) => endpoints.push(url),
                Err(_) => tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL"),
            }
        }

        tracing::info!(
            rpc_url = %config.rpc_url,
            failovers = endpoints.len() - 1,
            timeout_secs = config.rpc_timeout_secs,
            "RPC client initialized"
        );

        Ok(Self {
            http: reqwest::Client::new(),
            endpoints,
            timeout_secs: config.rpc_timeout_secs,
        })
    }

    /// Send one JSON-RPC request, trying each endpoint in order.
    ///
    /// A node-level error object is returned immediately without failover:
    /// another node would give the same answer.
    async fn request<T: DeserializeOwned>(&self, method: &str, params: Value) -> BlockchainResult<T> {
        let body = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1,
        });
        let deadline = Duration::from_secs(self.timeout_secs);
        let mut last_error = BlockchainError::Rpc("No RPC endpoints configured".to_string());

        for (i, endpoint) in self.endpoints.iter().enumerate() {
            let fut = async {
                let response = self
                    .http
                    .post(endpoint.clone())
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| BlockchainError::Rpc(e.to_string()))?;
                let status = response.status();
                if !status.is_success() {
                    return Err(BlockchainError::Rpc(format!("HTTP status {}", status)));
                }
                response
                    .json::<RpcEnvelope<T>>()
                    .await
                    .map_err(|e| BlockchainError::InvalidResponse(e.to_string()))
            };

            match timeout(deadline, fut).await {
                Ok(Ok(envelope)) => {
                    metrics::record_rpc_call(method, true);
                    return match (envelope.result, envelope.error) {
                        (_, Some(err)) => {
                            let message = match err.data {
                                Some(data) => format!("{} ({})", err.message, data),
                                None => err.message,
                            };
                            Err(BlockchainError::Node {
                                code: err.code,
                                message,
                            })
                        }
                        (Some(result), None) => Ok(result),
                        (None, None) => Err(BlockchainError::InvalidResponse(
                            "response has neither result nor error".to_string(),
                        )),
                    };
                }
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, method, error = %e, "RPC error, trying next provider");
                    last_error = e;
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, method, "RPC timeout, trying next provider");
                    last_error = BlockchainError::Timeout(self.timeout_secs);
                }
            }
            metrics::record_rpc_call(method, false);
        }

        Err(last_error)
    }

    /// Get the latest block number.
    pub async fn block_number(&self) -> BlockchainResult<u64> {
        self.request("starknet_blockNumber", json!([])).await
    }

    /// Check if the node is reachable.
    pub async fn is_healthy(&self) -> bool {
        self.block_number().await.is_ok()
    }

    /// Number of configured endpoints, primary included.
    pub fn endpoint_count(&self) -> usize {
        self.endpoints.len()
    }
}

#[async_trait]
impl ChainReader for RpcClient {
    async fn call(
        &self,
        contract_address: Felt,
        entrypoint: &str,
        calldata: &[Felt],
    ) -> BlockchainResult<Vec<Felt>> {
        let entry_point_selector =
            selector(entrypoint).map_err(|e| BlockchainError::InvalidRequest(e.to_string()))?;
        let params = json!({
            "request": {
                "contract_address": contract_address,
                "entry_point_selector": entry_point_selector,
                "calldata": calldata,
            },
            "block_id": "latest",
        });

        let raw: Vec<String> = self.request("starknet_call", params).await?;
        tracing::debug!(contract = %contract_address, entrypoint, ?raw, "Raw call response");

        raw.iter()
            .map(|s| {
                s.parse::<Felt>()
                    .map_err(|e| BlockchainError::InvalidResponse(e.to_string()))
            })
            .collect()
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("rpc_url", &self.endpoints.first().map(|u| u.as_str()))
            .field("endpoints", &self.endpoints.len())
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
