//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Reads:
//!     ResultReader → ChainReader (client.rs, JSON-RPC starknet_call)
//!
//! Writes:
//!     TransactionOrchestrator → WalletConnector (wallet.rs)
//!         → external wallet + paymaster (wrapping, signing, broadcast)
//! ```
//!
//! # Constraints
//! - No signing or key material in this crate
//! - All RPC calls have configurable timeouts
//! - Reads are side-effect free and safe to repeat

pub mod client;
pub mod types;
pub mod wallet;

pub use client::RpcClient;
pub use types::{BlockchainError, BlockchainResult, ChainReader};
pub use wallet::{Connection, ConnectorCapabilities, SubmitError, WalletConnector};
