//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, URLs parse)
//! - Check the poll schedule and connector policy are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: VrfConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::codec::selector;
use crate::config::schema::VrfConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &VrfConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.network.rpc_url.parse::<url::Url>() {
        errors.push(ValidationError::new(
            "network.rpc_url",
            format!("invalid URL '{}': {}", config.network.rpc_url, e),
        ));
    }
    for (i, failover) in config.network.failover_urls.iter().enumerate() {
        if let Err(e) = failover.parse::<url::Url>() {
            errors.push(ValidationError::new(
                format!("network.failover_urls[{}]", i),
                format!("invalid URL '{}': {}", failover, e),
            ));
        }
    }
    if config.network.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "network.rpc_timeout_secs",
            "must be greater than 0",
        ));
    }

    let contracts = &config.contracts;
    if contracts.vrf_provider.is_zero() {
        errors.push(ValidationError::new("contracts.vrf_provider", "must not be zero"));
    }
    if contracts.target_contract.is_zero() {
        errors.push(ValidationError::new("contracts.target_contract", "must not be zero"));
    }
    if contracts.vrf_provider == contracts.target_contract {
        errors.push(ValidationError::new(
            "contracts.target_contract",
            "must differ from contracts.vrf_provider",
        ));
    }
    for (field, value) in [
        ("contracts.request_entrypoint", &contracts.request_entrypoint),
        ("contracts.target_entrypoint", &contracts.target_entrypoint),
        ("contracts.read_entrypoint", &contracts.read_entrypoint),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::new(field, "must not be empty"));
        } else if let Err(e) = selector(value) {
            errors.push(ValidationError::new(field, e.to_string()));
        }
    }

    let policy = &config.connector;
    if policy.controller_ids.is_empty() && policy.name_markers.is_empty() {
        errors.push(ValidationError::new(
            "connector",
            "at least one controller id or name marker is required",
        ));
    }
    if policy.name_markers.iter().any(|m| m.trim().is_empty()) {
        errors.push(ValidationError::new(
            "connector.name_markers",
            "markers must not be empty",
        ));
    }

    if config
        .polling
        .delays_ms
        .windows(2)
        .any(|pair| pair[1] < pair[0])
    {
        errors.push(ValidationError::new(
            "polling.delays_ms",
            "delays must be non-decreasing",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
