//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Orchestrator, reader and RPC client produce:
//!     → tracing events and spans (attempt IDs, hashes, addresses)
//!     → metrics.rs (counters through the `metrics` facade)
//!
//! The binary installs the subscriber (logging.rs). Library users bring
//! their own subscriber and metrics recorder.
//! ```

pub mod logging;
pub mod metrics;
