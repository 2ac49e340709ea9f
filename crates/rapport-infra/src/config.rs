//! Configuration loader for Rapport.
//!
//! Reads `config.toml` from the data directory (`~/.rapport/` in production)
//! and deserializes it into [`ProfileConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use rapport_types::config::ProfileConfig;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "RAPPORT_DATA_DIR";

/// Resolve the Rapport data directory.
///
/// Priority:
/// 1. `RAPPORT_DATA_DIR` environment variable
/// 2. `~/.rapport` under the user's home directory
pub fn default_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".rapport");
    }

    PathBuf::from(".rapport")
}

/// Load profile configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ProfileConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_profile_config(data_dir: &Path) -> ProfileConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ProfileConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ProfileConfig::default();
        }
    };

    match toml::from_str::<ProfileConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ProfileConfig::default()
        }
    }
}
