//! Configuration loading and data root resolution

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Remote storage endpoint configuration.
///
/// Presence of both the endpoint URL and the API key selects the remote
/// backend at startup; otherwise the local store is used.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the REST endpoint (e.g. `https://xyz.supabase.co`)
    pub url: String,
    /// API key sent with every request
    pub key: String,
}

/// Data root resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. `BABYLOG_ROOT` environment variable
/// 3. `root_folder` key in the TOML config file
/// 4. OS-dependent default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var("BABYLOG_ROOT") {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Some(config) = read_config_file() {
        if let Some(root) = config.get("root_folder").and_then(|v| v.as_str()) {
            return PathBuf::from(root);
        }
    }

    // Priority 4: OS-dependent default
    default_root_folder()
}

/// Remote endpoint resolution: environment variables first, then the
/// `[remote]` table of the config file. Returns `None` (local mode) unless
/// both URL and key are present.
pub fn resolve_remote_config() -> Option<RemoteConfig> {
    let from_env = match (
        std::env::var("BABYLOG_REMOTE_URL"),
        std::env::var("BABYLOG_REMOTE_KEY"),
    ) {
        (Ok(url), Ok(key)) => Some(RemoteConfig { url, key }),
        _ => None,
    };
    if from_env.is_some() {
        return from_env;
    }

    let config = read_config_file()?;
    let remote = config.get("remote")?;
    let url = remote.get("url").and_then(|v| v.as_str())?;
    let key = remote.get("key").and_then(|v| v.as_str())?;
    Some(RemoteConfig {
        url: url.to_string(),
        key: key.to_string(),
    })
}

/// Read and parse the platform config file, if one exists.
///
/// The resolution ladder treats a broken config file as absent (with a
/// warning) so startup still reaches the fallback tiers.
fn read_config_file() -> Option<toml::Value> {
    let path = dirs::config_dir()?.join("babylog").join("config.toml");
    if !path.exists() {
        return None;
    }
    match parse_config_file(&path) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring config file: {}", e);
            None
        }
    }
}

/// Parse a TOML config file; unreadable or malformed content is a
/// configuration error.
fn parse_config_file(path: &Path) -> Result<toml::Value> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    toml::from_str(&content).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

/// OS-dependent default data root
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("babylog"))
        .unwrap_or_else(|| PathBuf::from("./babylog_data"))
}
