//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → VrfConfig (validated, immutable)
//!     → passed by value into each component at construction
//! ```
//!
//! # Design Decisions
//! - No process-wide config: addresses and endpoints travel with the components
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    ConnectorPolicy, ContractsConfig, NetworkConfig, ObservabilityConfig, PollingConfig, VrfConfig,
};
pub use validation::{validate_config, ValidationError};
