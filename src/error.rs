use std::path::PathBuf;

use thiserror::Error;

/// Result type used by the decoding, field and interpolation layers.
pub type Result<T, E = ShamirError> = std::result::Result<T, E>;

/// Failures the reconstruction core can produce. Every variant is terminal for
/// the reconstruction that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShamirError {
    #[error("Invalid digit '{digit}' for base {base}")]
    InvalidDigit { digit: char, base: u32 },
    #[error("Missing share: need {threshold}, got {found}")]
    MissingShare { threshold: usize, found: usize },
    #[error("Modular inverse does not exist")]
    NoInverseExists,
}

/// Errors raised while loading share documents or configuration.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed share document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Unsupported base {0}, expected 2..=36")]
    UnsupportedBase(u32),
    #[error("Base {0:?} is not a decimal integer")]
    MalformedBase(String),
    #[error("Invalid share identifier {0:?}")]
    InvalidShareId(String),
    #[error("Invalid modulus: {0}")]
    InvalidModulus(String),
    #[error(transparent)]
    Shamir(#[from] ShamirError),
}
