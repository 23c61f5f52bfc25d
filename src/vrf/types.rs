//! VRF request, call and outcome types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::Felt;

/// Randomness source passed to the provider's `request_random`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Fresh randomness per transaction, keyed on the caller's nonce.
    #[default]
    Nonce,
    /// Deterministic randomness for a given salt.
    Salt,
}

impl SourceKind {
    /// Variant index as encoded on the wire.
    pub fn index(self) -> u8 {
        match self {
            SourceKind::Nonce => 0,
            SourceKind::Salt => 1,
        }
    }
}

/// Everything needed to build one request/consume sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomnessRequest {
    pub provider_address: Felt,
    pub target_contract_address: Felt,
    pub caller_address: Felt,
    pub source_kind: SourceKind,
    /// Entrypoint on the target contract that consumes the randomness.
    pub entrypoint: String,
    pub range_min: u128,
    pub range_max: u128,
}

/// One contract invocation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallDescriptor {
    contract_address: Felt,
    entrypoint: String,
    calldata: Vec<Felt>,
}

impl CallDescriptor {
    pub fn new(contract_address: Felt, entrypoint: impl Into<String>, calldata: Vec<Felt>) -> Self {
        Self {
            contract_address,
            entrypoint: entrypoint.into(),
            calldata,
        }
    }

    pub fn contract_address(&self) -> Felt {
        self.contract_address
    }

    pub fn entrypoint(&self) -> &str {
        &self.entrypoint
    }

    pub fn calldata(&self) -> &[Felt] {
        &self.calldata
    }
}

/// The two-call sequence handed to the wallet: `[request_call, target_call]`.
///
/// The paymaster relies on this exact order when it wraps the sequence with
/// its own proof-submission and consumption-assertion calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSequence {
    request_call: CallDescriptor,
    target_call: CallDescriptor,
}

impl CallSequence {
    /// Number of calls in every sequence.
    pub const LEN: usize = 2;

    pub(crate) fn new(request_call: CallDescriptor, target_call: CallDescriptor) -> Self {
        Self {
            request_call,
            target_call,
        }
    }

    pub fn request_call(&self) -> &CallDescriptor {
        &self.request_call
    }

    pub fn target_call(&self) -> &CallDescriptor {
        &self.target_call
    }

    /// Calls in submission order.
    pub fn calls(&self) -> [&CallDescriptor; 2] {
        [&self.request_call, &self.target_call]
    }

    pub fn len(&self) -> usize {
        Self::LEN
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Serialize for CallSequence {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.calls().serialize(serializer)
    }
}

/// A decoded random number. A zero value never reaches this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RandomNumberResult {
    pub value: u128,
    pub min: u128,
    pub max: u128,
    /// Account that triggered generation, printed as a full 64 digit address.
    #[serde(serialize_with = "serialize_padded_address")]
    pub generator: Option<Felt>,
}

fn serialize_padded_address<S: serde::Serializer>(
    address: &Option<Felt>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    address.map(|a| a.to_fixed_hex()).serialize(serializer)
}

/// Closed taxonomy of attempt failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifiedError {
    #[error("wallet not connected")]
    WalletNotConnected,

    #[error("connector does not support VRF paymaster wrapping")]
    UnsupportedConnector,

    #[error("invalid range: min ({min}) must be less than max ({max})")]
    InvalidRange { min: u128, max: u128 },

    #[error("VRF provider: random value not fulfilled")]
    ProviderNotFulfilled,

    #[error("transaction rejected by user")]
    UserRejected,

    #[error("network error")]
    NetworkError,

    #[error("transaction execution reverted")]
    ExecutionReverted,

    #[error("unknown error: {raw_message}")]
    Unknown { raw_message: String },
}

impl ClassifiedError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifiedError::WalletNotConnected => "wallet_not_connected",
            ClassifiedError::UnsupportedConnector => "unsupported_connector",
            ClassifiedError::InvalidRange { .. } => "invalid_range",
            ClassifiedError::ProviderNotFulfilled => "provider_not_fulfilled",
            ClassifiedError::UserRejected => "user_rejected",
            ClassifiedError::NetworkError => "network_error",
            ClassifiedError::ExecutionReverted => "execution_reverted",
            ClassifiedError::Unknown { .. } => "unknown",
        }
    }

    /// Actionable text for the person holding the wallet.
    pub fn user_message(&self) -> String {
        match self {
            ClassifiedError::WalletNotConnected => {
                "Wallet not connected. Please connect your wallet to continue.".to_string()
            }
            ClassifiedError::UnsupportedConnector => "VRF requires Cartridge Controller wallet. \
                 Please disconnect and connect using Cartridge Controller. \
                 Standard wallets (Argent, Braavos) don't support VRF paymaster integration."
                .to_string(),
            ClassifiedError::InvalidRange { min, max } => {
                format!("Invalid range: min ({}) must be less than max ({})", min, max)
            }
            ClassifiedError::ProviderNotFulfilled => "VRF Provider Error: Random value not fulfilled. \
                 This usually means you're not using Cartridge Controller wallet. \
                 Please disconnect and connect with Cartridge Controller."
                .to_string(),
            ClassifiedError::UserRejected => "Transaction rejected by user".to_string(),
            ClassifiedError::NetworkError => {
                "Network error. Please check your connection and try again.".to_string()
            }
            ClassifiedError::ExecutionReverted => "Transaction execution failed. \
                 This might be a contract error or VRF paymaster issue. \
                 Ensure you're using Cartridge Controller wallet."
                .to_string(),
            ClassifiedError::Unknown { raw_message } => raw_message.clone(),
        }
    }
}

/// Result of one attempt. Exactly one of hash or error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionOutcome {
    Succeeded { transaction_hash: Felt },
    Failed(ClassifiedError),
}

impl TransactionOutcome {
    pub fn transaction_hash(&self) -> Option<Felt> {
        match self {
            TransactionOutcome::Succeeded { transaction_hash } => Some(*transaction_hash),
            TransactionOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ClassifiedError> {
        match self {
            TransactionOutcome::Succeeded { .. } => None,
            TransactionOutcome::Failed(err) => Some(err),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TransactionOutcome::Succeeded { .. })
    }
}

/// Orchestrator attempt state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AttemptState {
    #[default]
    Idle,
    Validating,
    Building,
    Submitting,
    Succeeded { transaction_hash: Felt },
    Failed(ClassifiedError),
}

impl AttemptState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AttemptState::Succeeded { .. } | AttemptState::Failed(_))
    }
}
