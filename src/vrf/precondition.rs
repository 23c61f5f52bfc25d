//! Pre-submission checks.
//!
//! Order is connection, then connector capability, then range, so the most
//! actionable problem is reported first. Nothing here touches the network.

use crate::blockchain::wallet::{Connection, ConnectorCapabilities};
use crate::config::ConnectorPolicy;
use crate::vrf::types::ClassifiedError;

/// Whether the connector can have its transactions wrapped by the VRF paymaster.
pub fn supports_randomness(capabilities: &ConnectorCapabilities, policy: &ConnectorPolicy) -> bool {
    if capabilities.randomness_wrapping {
        return true;
    }
    if policy.controller_ids.iter().any(|id| *id == capabilities.id) {
        return true;
    }
    let name = capabilities.name.to_lowercase();
    policy
        .name_markers
        .iter()
        .any(|marker| name.contains(&marker.to_lowercase()))
}

/// Validate everything that can be known before submitting.
pub fn validate(
    connection: Option<&Connection>,
    capabilities: Option<&ConnectorCapabilities>,
    policy: &ConnectorPolicy,
    range_min: u128,
    range_max: u128,
) -> Result<(), ClassifiedError> {
    if connection.is_none() {
        return Err(ClassifiedError::WalletNotConnected);
    }

    match capabilities {
        Some(caps) if supports_randomness(caps, policy) => {}
        _ => return Err(ClassifiedError::UnsupportedConnector),
    }

    if range_min >= range_max {
        return Err(ClassifiedError::InvalidRange {
            min: range_min,
            max: range_max,
        });
    }

    Ok(())
}
