//! Runtime configuration for the data layer.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the Postgres connection string.
pub const POSTGRES_CONNECTION_VAR: &str = "POSTGRES_CONNECTION";

/// Environment variable overriding the data directory.
pub const DATA_DIR_VAR: &str = "WRENCHLOG_DATA_DIR";

/// Data-layer configuration.
///
/// A single connection-string setting selects the relational engine target;
/// when it is absent the relational engine is disabled entirely and migration
/// short-circuits with a structured failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Postgres connection string (`host=... user=...` or `postgres://` URL).
    pub postgres_connection: Option<String>,

    /// Root directory for temp folders and generated archives.
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            postgres_connection: None,
            data_dir: PathBuf::from("data"),
        }
    }
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Self {
        let postgres_connection = std::env::var(POSTGRES_CONNECTION_VAR)
            .ok()
            .filter(|s| !s.trim().is_empty());
        let data_dir = std::env::var(DATA_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));
        Self {
            postgres_connection,
            data_dir,
        }
    }

    /// Whether the relational engine target is configured.
    pub fn relational_enabled(&self) -> bool {
        self.postgres_connection.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_relational_target() {
        let config = Config::default();
        assert!(!config.relational_enabled());
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn blank_connection_string_counts_as_unconfigured() {
        std::env::set_var(POSTGRES_CONNECTION_VAR, "   ");
        let config = Config::from_env();
        assert!(!config.relational_enabled());
        std::env::remove_var(POSTGRES_CONNECTION_VAR);
    }
}
