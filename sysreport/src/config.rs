//! Configuration loading
//!
//! Every field has a default, so an absent or partial file is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::info::sudoers::MarkerPolicy;

// ============================================================================
// Configuration Types
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub sudoers: SudoersConfig,
    #[serde(default)]
    pub packages: PackagesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Privilege configuration file
    #[serde(default = "default_sudoers_path")]
    pub sudoers: PathBuf,

    /// Release metadata file holding PRETTY_NAME
    #[serde(default = "default_os_release_path")]
    pub os_release: PathBuf,

    /// Workbook to write, overwritten on every run
    #[serde(default = "default_output_path")]
    pub output: PathBuf,
}

fn default_sudoers_path() -> PathBuf {
    PathBuf::from("/etc/sudoers")
}

fn default_os_release_path() -> PathBuf {
    PathBuf::from("/etc/os-release")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("system_report.xlsx")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            sudoers: default_sudoers_path(),
            os_release: default_os_release_path(),
            output: default_output_path(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SudoersConfig {
    #[serde(default)]
    pub marker: MarkerPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagesConfig {
    /// Upper bound for a single package manager invocation
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum captured size per stream (stdout/stderr) in bytes
    #[serde(default = "default_max_output")]
    pub max_output_bytes: usize,
}

fn default_timeout() -> u64 {
    120
}

fn default_max_output() -> usize {
    16 * 1024 * 1024
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_output_bytes: default_max_output(),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl Config {
    /// Load config from an explicit path, or from standard locations
    ///
    /// Search order without an explicit path:
    /// 1. `./sysreport.toml`
    /// 2. `$XDG_CONFIG_HOME/sysreport/config.toml`
    /// 3. `~/.sysreport.toml`
    /// 4. Default config if none found
    ///
    /// An explicit path must exist and parse; discovered files that fail to
    /// parse are skipped.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ReportError> {
        if let Some(path) = explicit {
            let config = Self::load_from_path(path)?;
            tracing::info!("Loaded config from {}", path.display());
            return Ok(config);
        }

        for path in Self::search_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load_from_path(&path) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    return Ok(config);
                }
                Err(e) => {
                    tracing::warn!("Skipping config {}: {}", path.display(), e);
                }
            }
        }

        tracing::info!("Using default configuration");
        Ok(Self::default())
    }

    /// Load from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ReportError> {
        let content = std::fs::read_to_string(path).map_err(|e| ReportError::read(path, e))?;
        toml::from_str(&content)
            .map_err(|e| ReportError::Config(format!("{}: {}", path.display(), e)))
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("sysreport.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("sysreport").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".sysreport.toml"));
        }

        paths
    }
}
