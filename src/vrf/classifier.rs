//! Failure classification.
//!
//! Wallets, paymasters and RPC nodes report failures as free text. This module
//! is the only place that text is inspected: an ordered rule table maps it to
//! a [`ClassifiedError`], first match wins, and anything unmatched becomes
//! [`ClassifiedError::Unknown`].

use std::error::Error;

use crate::vrf::types::ClassifiedError;

/// One classification rule: any marker present ⇒ `variant`.
#[derive(Debug)]
pub struct ClassificationRule {
    /// Lowercase substrings matched against the lowercased message.
    pub markers: &'static [&'static str],
    pub variant: ClassifiedError,
}

impl ClassificationRule {
    fn matches(&self, lowered: &str) -> bool {
        self.markers.iter().any(|marker| lowered.contains(marker))
    }
}

/// Rules in priority order.
///
/// A provider "not fulfilled" failure often arrives wrapped in a network or
/// execution error, so it is checked first.
pub static RULES: &[ClassificationRule] = &[
    ClassificationRule {
        markers: &["not fulfilled", "vrfprovider"],
        variant: ClassifiedError::ProviderNotFulfilled,
    },
    ClassificationRule {
        markers: &["user abort", "rejected"],
        variant: ClassifiedError::UserRejected,
    },
    ClassificationRule {
        markers: &["network", "timeout"],
        variant: ClassifiedError::NetworkError,
    },
    ClassificationRule {
        markers: &["execution", "revert"],
        variant: ClassifiedError::ExecutionReverted,
    },
];

/// Classify a raw failure message. Total: every input yields a variant.
pub fn classify(raw: &str) -> ClassifiedError {
    let lowered = raw.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.variant.clone())
        .unwrap_or_else(|| ClassifiedError::Unknown {
            raw_message: raw.to_string(),
        })
}

/// Classify an error including its whole source chain.
pub fn classify_error(err: &(dyn Error + 'static)) -> ClassifiedError {
    classify(&error_chain_message(err))
}

/// `outer: inner: innermost`
pub fn error_chain_message(err: &(dyn Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::wallet::SubmitError;

    #[test]
    fn test_user_abort() {
        assert_eq!(classify("User abort"), ClassifiedError::UserRejected);
        assert_eq!(
            classify("Error: request rejected by wallet"),
            ClassifiedError::UserRejected
        );
    }

    #[test]
    fn test_not_fulfilled_beats_network() {
        assert_eq!(
            classify("network call failed: VrfProvider: not fulfilled"),
            ClassifiedError::ProviderNotFulfilled
        );
        assert_eq!(
            classify("not fulfilled (network)"),
            ClassifiedError::ProviderNotFulfilled
        );
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(classify("rejected after timeout"), ClassifiedError::UserRejected);
        assert_eq!(
            classify("timeout during execution"),
            ClassifiedError::NetworkError
        );
        assert_eq!(
            classify("Transaction execution has failed"),
            ClassifiedError::ExecutionReverted
        );
        assert_eq!(
            classify("Contract call reverted"),
            ClassifiedError::ExecutionReverted
        );
    }

    #[test]
    fn test_unknown_keeps_raw_message() {
        assert_eq!(
            classify("Insufficient max fee"),
            ClassifiedError::Unknown {
                raw_message: "Insufficient max fee".into()
            }
        );
        assert_eq!(
            classify(""),
            ClassifiedError::Unknown {
                raw_message: String::new()
            }
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("NETWORK DOWN"), ClassifiedError::NetworkError);
        assert_eq!(classify("NOT FULFILLED"), ClassifiedError::ProviderNotFulfilled);
    }

    #[test]
    fn test_rules_never_produce_precondition_variants() {
        for rule in RULES {
            assert!(!matches!(
                rule.variant,
                ClassifiedError::WalletNotConnected
                    | ClassifiedError::UnsupportedConnector
                    | ClassifiedError::InvalidRange { .. }
                    | ClassifiedError::Unknown { .. }
            ));
            for marker in rule.markers {
                assert_eq!(*marker, marker.to_lowercase());
            }
        }
    }

    #[test]
    fn test_classify_error_walks_sources() {
        let inner = std::io::Error::new(std::io::ErrorKind::Other, "connection timeout");
        let err = SubmitError::with_source("account.execute failed", inner);
        assert_eq!(
            error_chain_message(&err),
            "account.execute failed: connection timeout"
        );
        assert_eq!(classify_error(&err), ClassifiedError::NetworkError);
    }
}
