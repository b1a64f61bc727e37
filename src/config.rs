use crate::battle::rng::TurnRng;
use crate::battle::state::ReplacementPolicy;
use crate::errors::ConfigError;
use crate::persistence::RestoreMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Engine settings, read from a RON file. Every field has a default, so an
/// empty file `()` is a valid configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// How a fainted active creature is replaced.
    pub replacement_policy: ReplacementPolicy,
    /// Fixed seed for reproducible runs. Without one the OS seeds the RNG.
    pub rng_seed: Option<u64>,
    /// Whether restored creatures keep their saved health and move uses.
    pub restore_mode: RestoreMode,
    /// External RON catalog. Without one the built-in catalog is used.
    pub catalog_path: Option<PathBuf>,
    pub snapshot_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            replacement_policy: ReplacementPolicy::default(),
            rng_seed: None,
            restore_mode: RestoreMode::default(),
            catalog_path: None,
            snapshot_path: PathBuf::from("save.json"),
        }
    }
}

impl EngineConfig {
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        ron::from_str(content).map_err(|err| ConfigError::Malformed(err.to_string()))
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_ron_str(&content),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(err) => Err(ConfigError::Io(format!("{}: {}", path.display(), err))),
        }
    }

    pub fn make_rng(&self) -> TurnRng {
        match self.rng_seed {
            Some(seed) => TurnRng::seeded(seed),
            None => TurnRng::from_os_entropy(),
        }
    }
}
