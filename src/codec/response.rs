//! Read-response decoding.
//!
//! The "last result" view returns `[value, min, max, generator, ...]`, one
//! felt per field. Decoding is all-or-nothing: every field is parsed before
//! the zero-value sentinel is consulted, so a garbled response is reported as
//! an error even when its value slot is zero.

use thiserror::Error;

use crate::codec::felt::Felt;
use crate::vrf::types::RandomNumberResult;

/// Minimum number of scalars in a well-formed response.
pub const MIN_RESPONSE_LEN: usize = 4;

/// Decode-layer failures. Distinct from the submission taxonomy since they
/// occur on plain reads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("malformed response: expected at least {expected} elements, got {actual}")]
    MalformedResponse { expected: usize, actual: usize },

    #[error("malformed response: field `{field}` value {value} does not fit in 128 bits")]
    FieldOverflow { field: &'static str, value: Felt },
}

fn u128_field(raw: &[Felt], index: usize, field: &'static str) -> Result<u128, DecodeError> {
    let value = raw[index];
    value
        .to_u128()
        .ok_or(DecodeError::FieldOverflow { field, value })
}

/// Decode a "last result" response. `Ok(None)` means no randomness has been
/// produced yet.
pub fn decode_read_response(raw: &[Felt]) -> Result<Option<RandomNumberResult>, DecodeError> {
    if raw.len() < MIN_RESPONSE_LEN {
        return Err(DecodeError::MalformedResponse {
            expected: MIN_RESPONSE_LEN,
            actual: raw.len(),
        });
    }

    let value = u128_field(raw, 0, "value")?;
    let min = u128_field(raw, 1, "min")?;
    let max = u128_field(raw, 2, "max")?;
    let generator = Some(raw[3]).filter(|g| !g.is_zero());

    if value == 0 {
        return Ok(None);
    }

    Ok(Some(RandomNumberResult {
        value,
        min,
        max,
        generator,
    }))
}
