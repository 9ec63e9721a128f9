use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::reference::{ReferencePaths, Weights};

/// Default rows per blocking batch task
pub const CHUNK_SIZE: usize = 512;

/// Settings file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_NAME: &str = "phish_scoring";

/// Prefix of environment overrides, e.g. `PHISH_SCORING__BATCH__CHUNK_SIZE`
pub const ENV_PREFIX: &str = "PHISH_SCORING";

/// Runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Reference CSV locations
    pub reference: ReferencePaths,

    /// Numeric weights for the infra and density signals
    pub weights: Weights,

    pub batch: BatchSettings,

    /// Directory for log files; stderr when unset
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Rows handed to each blocking task
    pub chunk_size: usize,

    /// Drop repeated URLs before scoring
    pub dedupe: bool,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            dedupe: false,
        }
    }
}

impl Settings {
    /// Layers built-in defaults, then a TOML file, then environment variables.
    ///
    /// An explicit `path` must exist; the default `phish_scoring.toml` is
    /// optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        Ok(settings)
    }
}
