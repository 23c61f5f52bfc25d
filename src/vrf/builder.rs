//! Call sequence construction.
//!
//! The wallet submits `[request_random, target]`. The paymaster expands this
//! into `[submit_random, request_random, target, assert_consumed]` on its own;
//! nothing here adds, removes or reorders calls.

use crate::codec::{encode_arguments, Argument};
use crate::vrf::types::{CallDescriptor, CallSequence, RandomnessRequest};

/// Provider entrypoint that marks a transaction as consuming randomness.
pub const REQUEST_RANDOM_ENTRYPOINT: &str = "request_random";

/// Build the request/consume sequence for an already validated request.
pub fn build(req: &RandomnessRequest) -> CallSequence {
    build_with_entrypoint(req, REQUEST_RANDOM_ENTRYPOINT)
}

/// Same as [`build`] for providers exposing the request under another name.
pub fn build_with_entrypoint(req: &RandomnessRequest, request_entrypoint: &str) -> CallSequence {
    let request_call = CallDescriptor::new(
        req.provider_address,
        request_entrypoint,
        encode_arguments(&[
            Argument::Address(req.target_contract_address),
            Argument::from(req.source_kind),
            Argument::Address(req.caller_address),
        ]),
    );

    let target_call = CallDescriptor::new(
        req.target_contract_address,
        req.entrypoint.clone(),
        encode_arguments(&[Argument::U128(req.range_min), Argument::U128(req.range_max)]),
    );

    CallSequence::new(request_call, target_call)
}
