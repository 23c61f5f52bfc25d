//! Chain read types and error definitions.

use async_trait::async_trait;
use thiserror::Error;

use crate::codec::Felt;

/// Errors that can occur while talking to the chain.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// The node answered with a JSON-RPC error object.
    #[error("RPC returned error {code}: {message}")]
    Node { code: i64, message: String },

    /// The request could not be built.
    #[error("Invalid RPC request: {0}")]
    InvalidRequest(String),

    /// The node answered with something that is not a felt array.
    #[error("Invalid RPC response: {0}")]
    InvalidResponse(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Read-only contract calls.
///
/// Implemented by [`crate::blockchain::RpcClient`]; tests substitute fakes.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Invoke a view entrypoint and return the raw felt response.
    async fn call(
        &self,
        contract_address: Felt,
        entrypoint: &str,
        calldata: &[Felt],
    ) -> BlockchainResult<Vec<Felt>>;
}
