use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the harness. The search itself has none.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("cannot read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// An implementation disagreed with the oracle on the gate query.
    #[error("{implementation} returned {actual}, expected {expected}")]
    ResultMismatch {
        implementation: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The reference binary search reported the query value as absent.
    #[error("reference binary search did not find {query}")]
    ReferenceMiss { query: i64 },

    #[error("cannot serialize report: {0}")]
    ReportSerialize(#[from] serde_json::Error),

    #[error("cannot write report {}: {source}", path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HarnessError {
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
