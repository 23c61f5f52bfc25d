//! Calldata encoding.
//!
//! Integers up to 128 bits occupy one felt. Wider integers are split into a
//! `(low, high)` pair of 128-bit limbs, low limb first, and
//! [`decode_u256`] is the exact inverse of [`encode_u256`].

use alloy::primitives::U256;
use starknet_core::utils::get_selector_from_name;
use thiserror::Error;

use crate::codec::felt::Felt;
use crate::vrf::types::SourceKind;

/// Entrypoint names are hashed as ASCII; anything else has no selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("entrypoint name `{0}` is not ASCII")]
pub struct InvalidEntrypoint(pub String);

/// A single typed calldata argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    /// Contract or account address.
    Address(Felt),
    /// Small fieldless enum variant, encoded by index.
    Enumerant(u8),
    /// Unsigned integer that fits a single felt.
    U128(u128),
    /// Unsigned integer that needs two limbs.
    U256(U256),
}

impl From<SourceKind> for Argument {
    fn from(kind: SourceKind) -> Self {
        Argument::Enumerant(kind.index())
    }
}

impl From<u128> for Argument {
    fn from(value: u128) -> Self {
        Argument::U128(value)
    }
}

/// Append the wire form of `arg` to `out`.
pub fn encode_argument(arg: &Argument, out: &mut Vec<Felt>) {
    match arg {
        Argument::Address(address) => out.push(*address),
        Argument::Enumerant(index) => out.push(Felt::from(*index)),
        Argument::U128(value) => out.push(Felt::from_u128(*value)),
        Argument::U256(value) => out.extend(encode_u256(*value)),
    }
}

/// Encode an ordered argument list.
pub fn encode_arguments(args: &[Argument]) -> Vec<Felt> {
    let mut out = Vec::with_capacity(args.len());
    for arg in args {
        encode_argument(arg, &mut out);
    }
    out
}

/// Split into `[low, high]` 128-bit limbs.
pub fn encode_u256(value: U256) -> [Felt; 2] {
    let limbs = value.as_limbs();
    let low = limbs[0] as u128 | (limbs[1] as u128) << 64;
    let high = limbs[2] as u128 | (limbs[3] as u128) << 64;
    [Felt::from_u128(low), Felt::from_u128(high)]
}

/// Rebuild a 256-bit integer from its limbs. `None` if either limb exceeds
/// 128 bits.
pub fn decode_u256(low: &Felt, high: &Felt) -> Option<U256> {
    let low = low.to_u128()?;
    let high = high.to_u128()?;
    Some(U256::from(high) << 128usize | U256::from(low))
}

/// Entrypoint selector (Starknet keccak of the name).
pub fn selector(entrypoint: &str) -> Result<Felt, InvalidEntrypoint> {
    get_selector_from_name(entrypoint)
        .map(Felt::from)
        .map_err(|_| InvalidEntrypoint(entrypoint.to_string()))
}
