//! Configuration errors

use thiserror::Error;

/// Failure while loading `Tuning` or `Settings`
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Input was not valid JSON for the target type
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    /// Parsed fine but a value is out of range
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
    /// Quality preset name not recognised
    #[error("unknown quality preset `{0}` (expected low, medium or high)")]
    UnknownPreset(String),
}
