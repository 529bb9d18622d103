//! Crate-wide error type.
//!
//! The transport core itself never fails; errors only come from building a
//! scenario (bad physics or domain values) or from loading it off disk.

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A physics or domain value that would make sampling ill-defined.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Scenario file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Scenario file is not valid YAML for [`crate::ScenarioConfig`].
    #[error("malformed scenario: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
