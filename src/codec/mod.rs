//! Wire codec.
//!
//! # Data Flow
//! ```text
//! typed arguments (addresses, enumerants, u128, U256)
//!     → calldata.rs (felt encoding, limb split)
//!     → CallDescriptor calldata
//!
//! raw read response (Vec<Felt>)
//!     → response.rs (length check, field parsing, zero sentinel)
//!     → Option<RandomNumberResult>
//! ```
//!
//! Everything here is a pure function of its input.

pub mod calldata;
pub mod felt;
pub mod response;

pub use calldata::{
    decode_u256, encode_argument, encode_arguments, encode_u256, selector, Argument,
    InvalidEntrypoint,
};
pub use felt::{Felt, FeltError};
pub use response::{decode_read_response, DecodeError};
