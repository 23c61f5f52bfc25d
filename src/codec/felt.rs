//! Field element wire scalar.
//!
//! Every value crossing the wire (addresses, selectors, calldata, read
//! responses) is a Starknet field element. Arithmetic, hex and serde come from
//! `starknet-types-core`; this wrapper adds strict parsing (values at or above
//! the field prime are rejected rather than reduced) and the `u128` views the
//! codec needs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use starknet_types_core::felt::Felt as CoreFelt;
use thiserror::Error;

/// Errors raised when parsing a [`Felt`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeltError {
    /// Not a decimal or `0x`-prefixed hex integer.
    #[error("invalid field element `{0}`")]
    Invalid(String),

    /// Parsed, but not below the field prime.
    #[error("field element `{0}` is not below the field prime")]
    OutOfRange(String),
}

/// A field element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Felt(CoreFelt);

impl Felt {
    pub const ZERO: Felt = Felt(CoreFelt::ZERO);
    pub const ONE: Felt = Felt(CoreFelt::ONE);

    /// Every `u128` fits in a single felt.
    pub fn from_u128(value: u128) -> Self {
        Self(CoreFelt::from(value))
    }

    /// Felt from an in-crate hex constant.
    pub(crate) fn from_hex_literal(hex: &'static str) -> Self {
        Self(CoreFelt::from_hex_unchecked(hex))
    }

    /// Narrow to `u128`, or `None` if the upper bits are set.
    pub fn to_u128(&self) -> Option<u128> {
        u128::try_from(self.0).ok()
    }

    pub fn is_zero(&self) -> bool {
        self.0 == CoreFelt::ZERO
    }

    /// Zero-padded 64 digit hex form, as wallets and explorers print addresses.
    pub fn to_fixed_hex(&self) -> String {
        self.0.to_fixed_hex_string()
    }
}

impl From<CoreFelt> for Felt {
    fn from(inner: CoreFelt) -> Self {
        Self(inner)
    }
}

impl From<Felt> for CoreFelt {
    fn from(felt: Felt) -> Self {
        felt.0
    }
}

impl fmt::Display for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex_string())
    }
}

impl FromStr for Felt {
    type Err = FeltError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || FeltError::Invalid(s.to_string());

        let (digits, hex) = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(digits) => (digits, true),
            None => (trimmed, false),
        };
        let well_formed = !digits.is_empty()
            && digits.chars().all(|c| {
                if hex {
                    c.is_ascii_hexdigit()
                } else {
                    c.is_ascii_digit()
                }
            });
        if !well_formed {
            return Err(invalid());
        }

        let inner = if hex {
            CoreFelt::from_hex(digits)
        } else {
            CoreFelt::from_dec_str(digits)
        }
        .map_err(|_| invalid())?;

        // The core type reduces modulo the prime; anything that changed was out of range.
        let significant = match digits.trim_start_matches('0') {
            "" => "0",
            rest => rest,
        };
        let canonical = if hex {
            let fixed = inner.to_fixed_hex_string();
            match fixed[2..].trim_start_matches('0') {
                "" => "0".to_string(),
                rest => rest.to_string(),
            }
        } else {
            inner.to_biguint().to_string()
        };
        if !significant.eq_ignore_ascii_case(&canonical) {
            return Err(FeltError::OutOfRange(s.to_string()));
        }
        Ok(Self(inner))
    }
}

impl From<u128> for Felt {
    fn from(value: u128) -> Self {
        Self::from_u128(value)
    }
}

impl From<u64> for Felt {
    fn from(value: u64) -> Self {
        Self(CoreFelt::from(value))
    }
}

impl From<u8> for Felt {
    fn from(value: u8) -> Self {
        Self(CoreFelt::from(value))
    }
}
