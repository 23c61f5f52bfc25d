//! Transaction orchestration.
//!
//! # State Machine
//! ```text
//! Idle → Validating ──err──────────────────────────→ Failed (as-is)
//!            │ ok
//!            ▼
//!        Building → Submitting ──raw err → classify → Failed
//!                        │ hash
//!                        ▼
//!                    Succeeded
//! ```
//!
//! `execute` takes `&mut self`, so one orchestrator never has two
//! submissions in flight. Every call starts from `Idle`.

use tracing::Instrument;
use uuid::Uuid;

use crate::blockchain::wallet::WalletConnector;
use crate::config::{ConnectorPolicy, ContractsConfig};
use crate::observability::metrics;
use crate::vrf::builder::build_with_entrypoint;
use crate::vrf::classifier::classify_error;
use crate::vrf::precondition::validate;
use crate::vrf::types::{AttemptState, ClassifiedError, RandomnessRequest, TransactionOutcome};

/// Drives one request/consume attempt at a time through a wallet connector.
pub struct TransactionOrchestrator<W> {
    connector: W,
    contracts: ContractsConfig,
    policy: ConnectorPolicy,
    state: AttemptState,
}

impl<W: WalletConnector> TransactionOrchestrator<W> {
    pub fn new(connector: W, contracts: ContractsConfig, policy: ConnectorPolicy) -> Self {
        Self {
            connector,
            contracts,
            policy,
            state: AttemptState::Idle,
        }
    }

    /// Request randomness in `[range_min, range_max]` and consume it in the
    /// target contract.
    ///
    /// Bound inclusivity is the target contract's business; both bounds are
    /// passed through unchanged.
    pub async fn execute(&mut self, range_min: u128, range_max: u128) -> TransactionOutcome {
        let attempt_id = Uuid::new_v4();
        let span = tracing::info_span!("vrf_attempt", %attempt_id, range_min, range_max);

        let outcome = self.run_attempt(range_min, range_max).instrument(span).await;
        metrics::record_attempt(&outcome);
        outcome
    }

    async fn run_attempt(&mut self, range_min: u128, range_max: u128) -> TransactionOutcome {
        self.state = AttemptState::Validating;
        let connection = self.connector.active_connection();
        let capabilities = self.connector.capabilities();
        if let Err(err) = validate(
            connection.as_ref(),
            capabilities.as_ref(),
            &self.policy,
            range_min,
            range_max,
        ) {
            tracing::info!(kind = err.kind(), "Precondition failed");
            return self.fail(err);
        }
        let caller_address = match connection {
            Some(conn) => conn.address,
            None => return self.fail(ClassifiedError::WalletNotConnected),
        };

        self.state = AttemptState::Building;
        let request = RandomnessRequest {
            provider_address: self.contracts.vrf_provider,
            target_contract_address: self.contracts.target_contract,
            caller_address,
            source_kind: self.contracts.source,
            entrypoint: self.contracts.target_entrypoint.clone(),
            range_min,
            range_max,
        };
        let calls = build_with_entrypoint(&request, &self.contracts.request_entrypoint);

        self.state = AttemptState::Submitting;
        tracing::debug!(
            caller = %caller_address,
            provider = %request.provider_address,
            target = %request.target_contract_address,
            "Submitting VRF call sequence"
        );

        match self.connector.submit(&calls).await {
            Ok(transaction_hash) => {
                tracing::info!(tx_hash = %transaction_hash, "VRF transaction submitted");
                self.state = AttemptState::Succeeded { transaction_hash };
                TransactionOutcome::Succeeded { transaction_hash }
            }
            Err(raw) => {
                let err = classify_error(&raw);
                tracing::warn!(kind = err.kind(), error = %raw, "VRF transaction failed");
                self.fail(err)
            }
        }
    }

    fn fail(&mut self, err: ClassifiedError) -> TransactionOutcome {
        self.state = AttemptState::Failed(err.clone());
        TransactionOutcome::Failed(err)
    }

    /// Current attempt state.
    pub fn state(&self) -> &AttemptState {
        &self.state
    }

    /// Outcome of the last finished attempt, if it is still held.
    pub fn outcome(&self) -> Option<TransactionOutcome> {
        match &self.state {
            AttemptState::Succeeded { transaction_hash } => Some(TransactionOutcome::Succeeded {
                transaction_hash: *transaction_hash,
            }),
            AttemptState::Failed(err) => Some(TransactionOutcome::Failed(err.clone())),
            _ => None,
        }
    }

    /// Discard the last outcome.
    pub fn reset(&mut self) {
        self.state = AttemptState::Idle;
    }

    pub fn connector(&self) -> &W {
        &self.connector
    }
}
