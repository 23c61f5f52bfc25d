//! Metrics collection.
//!
//! # Metrics
//! - `vrf_attempts_total` (counter): attempts by outcome
//! - `vrf_classified_errors_total` (counter): failures by taxonomy kind
//! - `vrf_polls_total` (counter): scheduled polls by result
//! - `vrf_rpc_calls_total` (counter): RPC calls by method and result
//!
//! No recorder is installed here; without one these are no-ops.

use metrics::counter;

use crate::vrf::types::{ClassifiedError, TransactionOutcome};

/// Record a finished attempt.
pub fn record_attempt(outcome: &TransactionOutcome) {
    match outcome {
        TransactionOutcome::Succeeded { .. } => {
            counter!("vrf_attempts_total", "outcome" => "succeeded").increment(1);
        }
        TransactionOutcome::Failed(err) => {
            counter!("vrf_attempts_total", "outcome" => "failed").increment(1);
            record_classified_error(err);
        }
    }
}

pub fn record_classified_error(err: &ClassifiedError) {
    counter!("vrf_classified_errors_total", "kind" => err.kind()).increment(1);
}

/// `result` is one of `ready`, `absent`, `error`.
pub fn record_poll(result: &'static str) {
    counter!("vrf_polls_total", "result" => result).increment(1);
}

pub fn record_rpc_call(method: &str, success: bool) {
    let result = if success { "ok" } else { "error" };
    counter!("vrf_rpc_calls_total", "method" => method.to_string(), "result" => result).increment(1);
}
