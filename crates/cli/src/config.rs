//! Layered configuration for the command line.
//!
//! Built-in defaults are overridden by a TOML file, which command-line flags
//! override in turn. The file is `--config FILE`, else `./typepick.toml`, else
//! `~/.typepick/config.toml`; a missing default file is not an error.
//!
//! ```toml
//! [source]
//! url = "https://example.com/api/api-docs"
//! accept_language = "ko"
//!
//! [generator]
//! unknown_type = "unknown"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use typepick_core::GeneratorConfig;

/// Config filename looked up in the working directory
const LOCAL_CONFIG_FILENAME: &str = "typepick.toml";
/// Directory name in home
const TYPEPICK_HOME_DIR: &str = ".typepick";
/// Config filename inside the home directory
const HOME_CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_ACCEPT_LANGUAGE: &str = "ko";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RETRIES: u32 = 2;

/// Errors loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or has unknown keys.
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

/// Complete configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where documents come from.
    pub source: SourceConfig,
    /// How blocks are generated.
    pub generator: GeneratorConfig,
}

/// `[source]` table. Tokens are not accepted here; they come from `--token`
/// or `TYPEPICK_TOKEN` only.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Document URL used when neither `--input` nor `--url` is given.
    pub url: Option<String>,
    /// `Accept-Language` header value.
    pub accept_language: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Extra attempts after a transport error or 5xx response.
    pub retries: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: None,
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retries: DEFAULT_RETRIES,
        }
    }
}

impl Config {
    /// Load the explicit file, or the first default file that exists, or defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let cwd = std::env::current_dir().ok();
                discover(cwd.as_deref(), dirs::home_dir().as_deref())
            }
        };

        match path {
            Some(path) => Self::read(&path),
            None => {
                debug!("No config file found; using defaults.");
                Ok(Self::default())
            }
        }
    }

    /// Read and parse one config file.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Reading config file.");
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// First existing default config file: `<cwd>/typepick.toml`, then
/// `<home>/.typepick/config.toml`.
pub fn discover(cwd: Option<&Path>, home: Option<&Path>) -> Option<PathBuf> {
    let local = cwd.map(|dir| dir.join(LOCAL_CONFIG_FILENAME));
    let global = home.map(|dir| dir.join(TYPEPICK_HOME_DIR).join(HOME_CONFIG_FILENAME));
    [local, global].into_iter().flatten().find(|path| path.is_file())
}
