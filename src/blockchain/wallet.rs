//! Wallet connector boundary.
//!
//! Signing, session policies and the paymaster live behind this trait. The
//! core only asks three things of a connector: is an account connected, what
//! kind of connector is it, and submit this call sequence.

use async_trait::async_trait;
use thiserror::Error;

use crate::codec::Felt;
use crate::vrf::types::CallSequence;

/// An active account session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Account address used as the caller in the randomness request.
    pub address: Felt,
}

/// What the connector says about itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectorCapabilities {
    /// Connector identifier, e.g. `controller`.
    pub id: String,
    /// Human-readable connector name.
    pub name: String,
    /// Connector explicitly advertises paymaster VRF wrapping.
    pub randomness_wrapping: bool,
}

/// Raw failure from the wallet or its transport, before classification.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SubmitError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SubmitError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Wallet connector collaborator.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// The connected account, if any.
    fn active_connection(&self) -> Option<Connection>;

    /// Connector description, if a connector is selected.
    fn capabilities(&self) -> Option<ConnectorCapabilities>;

    /// Submit the sequence as one transaction and return its hash.
    ///
    /// Submitting the two-call sequence is sufficient for a paymaster-capable
    /// connector to wrap it with proof submission and consumption assertion.
    async fn submit(&self, calls: &CallSequence) -> Result<Felt, SubmitError>;
}
