use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::InputError;
use crate::field::{PrimeField, DEFAULT_PRIME_DECIMAL};

pub const PRIME_ENV: &str = "SHAMIR_PRIME";
pub const CONFIG_ENV: &str = "SHAMIR_CONFIG";

/// Files processed when neither the command line nor the config names any.
pub const DEFAULT_INPUTS: [&str; 2] = ["input1.json", "input2.json"];

/// Settings for a batch of reconstructions.
///
/// TOML form, every key optional:
///
/// ```toml
/// prime = "2083516173..."
/// inputs = ["input1.json", "input2.json"]
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Decimal modulus.
    pub prime: String,
    pub inputs: Vec<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    prime: Option<String>,
    inputs: Option<Vec<PathBuf>>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prime: DEFAULT_PRIME_DECIMAL.to_owned(),
            inputs: DEFAULT_INPUTS.iter().map(PathBuf::from).collect(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, InputError> {
        let raw: RawConfig = toml::from_str(s)?;
        let mut config = Config::default();
        if let Some(prime) = raw.prime {
            config.prime = prime;
        }
        if let Some(inputs) = raw.inputs {
            config.inputs = inputs;
        }
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Self::from_toml_str(&text)
    }

    /// Applies `SHAMIR_PRIME` through `lookup`, usually `std::env::var`.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(prime) = lookup(PRIME_ENV) {
            self.prime = prime;
        }
        self
    }

    /// Command-line values win over everything else.
    pub fn with_overrides(mut self, prime: Option<String>, inputs: Vec<PathBuf>) -> Self {
        if let Some(prime) = prime {
            self.prime = prime;
        }
        if !inputs.is_empty() {
            self.inputs = inputs;
        }
        self
    }

    pub fn field(&self) -> Result<PrimeField, InputError> {
        PrimeField::from_decimal(&self.prime)
    }
}
