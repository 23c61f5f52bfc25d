//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::VrfConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Why a configuration could not be accepted.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<VrfConfig, ConfigError> {
    let config: VrfConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<VrfConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&content)?;

    tracing::debug!(path = %path.display(), "Configuration file loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error() {
        let err = parse_config("[network\nrpc_url = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("invalid TOML"));
    }

    #[test]
    fn test_validation_error_lists_fields() {
        let err = parse_config("[network]\nrpc_timeout_secs = 0\n[polling]\ndelays_ms = [2, 1]")
            .unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("invalid configuration: "));
        assert!(text.contains("network.rpc_timeout_secs"));
        assert!(text.contains("polling.delays_ms"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("does-not-exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("does-not-exist.toml"));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("vrf-config-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[network]\nrpc_url = \"http://localhost:5050\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.network.rpc_url, "http://localhost:5050");

        fs::remove_file(&path).unwrap_or_default();
    }
}
