//! Client core for requesting verifiable randomness on Starknet and consuming
//! it in a target contract within the same transaction.

pub mod blockchain;
pub mod codec;
pub mod config;
pub mod observability;
pub mod vrf;

pub use codec::Felt;
pub use config::schema::VrfConfig;
pub use vrf::{ResultReader, TransactionOrchestrator, TransactionOutcome};
