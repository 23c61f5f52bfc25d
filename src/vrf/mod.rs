//! VRF request/consume core.
//!
//! # Data Flow
//! ```text
//! execute(min, max)
//!     → precondition.rs (connection, connector capability, range)
//!     → builder.rs (request_random call + target call, in that order)
//!     → WalletConnector::submit
//!     → classifier.rs on failure
//!     → TransactionOutcome
//!
//! after a submitted hash:
//!     reader.rs (polls at configured delays, cancelable)
//!     → Option<RandomNumberResult>
//! ```

pub mod builder;
pub mod classifier;
pub mod orchestrator;
pub mod precondition;
pub mod reader;
pub mod types;

pub use builder::{build, build_with_entrypoint, REQUEST_RANDOM_ENTRYPOINT};
pub use classifier::{classify, classify_error, error_chain_message, ClassificationRule, RULES};
pub use orchestrator::TransactionOrchestrator;
pub use precondition::{supports_randomness, validate};
pub use reader::{PollHandle, PollUpdate, ReadError, ResultReader};
pub use types::{
    AttemptState, CallDescriptor, CallSequence, ClassifiedError, RandomNumberResult,
    RandomnessRequest, SourceKind, TransactionOutcome,
};
