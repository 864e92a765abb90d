use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseTagError, Result};

/// File name searched for in the working directory and the user config directory.
pub const CONFIG_FILE_NAME: &str = "release-tagger.toml";

/// Represents the complete configuration for release-tagger.
///
/// Every section is optional; a missing file or section falls back to the
/// behavior CI pipelines have always relied on.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub labels: LabelsConfig,

    #[serde(default)]
    pub versioning: VersioningConfig,

    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub credentials: CredentialsConfig,

    #[serde(default)]
    pub forge: ForgeConfig,
}

fn default_major_label() -> String {
    "bump-major".to_string()
}

fn default_minor_label() -> String {
    "bump-minor".to_string()
}

fn default_patch_label() -> String {
    "bump-patch".to_string()
}

fn default_finalize_rc_label() -> String {
    "finalize-rc".to_string()
}

fn default_rc_label() -> String {
    "bump-rc".to_string()
}

/// Merge request label names that drive the version bump.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LabelsConfig {
    #[serde(default = "default_major_label")]
    pub major: String,

    #[serde(default = "default_minor_label")]
    pub minor: String,

    #[serde(default = "default_patch_label")]
    pub patch: String,

    #[serde(default = "default_finalize_rc_label")]
    pub finalize_rc: String,

    #[serde(default = "default_rc_label")]
    pub rc: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        LabelsConfig {
            major: default_major_label(),
            minor: default_minor_label(),
            patch: default_patch_label(),
            finalize_rc: default_finalize_rc_label(),
            rc: default_rc_label(),
        }
    }
}

fn default_initial_version() -> String {
    "1.0.0".to_string()
}

fn default_prerelease_token() -> String {
    "rc".to_string()
}

fn default_build_token() -> String {
    "build".to_string()
}

fn default_true() -> bool {
    true
}

/// Version seeding and tag skipping behavior.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersioningConfig {
    /// Version tagged when the repository has no tags yet
    #[serde(default = "default_initial_version")]
    pub initial_version: String,

    /// Seed identifier for a pre-release bump on a version without one
    #[serde(default = "default_prerelease_token")]
    pub prerelease_token: String,

    /// Seed identifier for a build bump on a version without build metadata
    #[serde(default = "default_build_token")]
    pub build_token: String,

    /// Exit without tagging when the latest tag carries no pre-release
    #[serde(default = "default_true")]
    pub skip_finalized: bool,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        VersioningConfig {
            initial_version: default_initial_version(),
            prerelease_token: default_prerelease_token(),
            build_token: default_build_token(),
            skip_finalized: true,
        }
    }
}

fn default_remote_name() -> String {
    "origin".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RemoteConfig {
    #[serde(default = "default_remote_name")]
    pub name: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            name: default_remote_name(),
        }
    }
}

fn default_username_var() -> String {
    "NPA_USERNAME".to_string()
}

fn default_password_var() -> String {
    "NPA_PASSWORD".to_string()
}

/// Names of the environment variables holding the push credentials.
///
/// The password doubles as the forge private token.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CredentialsConfig {
    #[serde(default = "default_username_var")]
    pub username_var: String,

    #[serde(default = "default_password_var")]
    pub password_var: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        CredentialsConfig {
            username_var: default_username_var(),
            password_var: default_password_var(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ForgeConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        ForgeConfig {
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release-tagger.toml` in current directory
/// 3. `release-tagger.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        read_config_file(Path::new(path))?
    } else if local.exists() {
        read_config_file(&local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            read_config_file(&config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses configuration from TOML text.
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| ReleaseTagError::config_file(e.to_string()))
}

fn read_config_file(path: &Path) -> Result<String> {
    tracing::debug!(path = %path.display(), "reading config file");
    fs::read_to_string(path).map_err(|e| {
        ReleaseTagError::config_file(format!("Cannot read {}: {}", path.display(), e))
    })
}
