//! Performance gate configuration.
//!
//! Defaults reproduce the reference scenario: a 1_000_000-element identity
//! dataset queried at index 432_000. Any subset of fields can be supplied in
//! TOML; missing keys keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, Result};

pub const DEFAULT_DATASET_LEN: usize = 1_000_000;
pub const DEFAULT_QUERY_INDEX: usize = 432_000;
pub const DEFAULT_ROUNDS: usize = 9;
pub const DEFAULT_ITERATIONS_PER_ROUND: u64 = 200_000;
/// Additive timer-noise allowance applied to both sides of the ratio.
pub const DEFAULT_EPSILON_NS: f64 = 10e-9;
pub const DEFAULT_MAX_RATIO: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PerfGateConfig {
    /// Number of elements in the identity dataset `s[i] = i`.
    pub dataset_len: usize,
    /// Index whose value is queried; also the expected result.
    pub query_index: usize,
    /// Timed rounds per implementation; the median round is reported.
    pub rounds: usize,
    /// Calls per timed round.
    pub iterations_per_round: u64,
    pub epsilon_ns: f64,
    /// Gate passes when `(candidate + eps) / (reference + eps) <= max_ratio`.
    pub max_ratio: f64,
}

impl Default for PerfGateConfig {
    fn default() -> Self {
        Self {
            dataset_len: DEFAULT_DATASET_LEN,
            query_index: DEFAULT_QUERY_INDEX,
            rounds: DEFAULT_ROUNDS,
            iterations_per_round: DEFAULT_ITERATIONS_PER_ROUND,
            epsilon_ns: DEFAULT_EPSILON_NS,
            max_ratio: DEFAULT_MAX_RATIO,
        }
    }
}

impl PerfGateConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| HarnessError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Query value; the dataset is the identity so value and index coincide.
    pub fn query_value(&self) -> Result<i64> {
        i64::try_from(self.query_index)
            .map_err(|_| HarnessError::invalid_config("query_index", "does not fit in i64"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.dataset_len == 0 {
            return Err(HarnessError::invalid_config("dataset_len", "must be > 0"));
        }
        if i64::try_from(self.dataset_len).is_err() {
            return Err(HarnessError::invalid_config(
                "dataset_len",
                "identity values must fit in i64",
            ));
        }
        if self.query_index >= self.dataset_len {
            return Err(HarnessError::invalid_config(
                "query_index",
                format!(
                    "{} is outside dataset of {} elements",
                    self.query_index, self.dataset_len
                ),
            ));
        }
        if self.rounds == 0 {
            return Err(HarnessError::invalid_config("rounds", "must be > 0"));
        }
        if self.iterations_per_round == 0 {
            return Err(HarnessError::invalid_config(
                "iterations_per_round",
                "must be > 0",
            ));
        }
        if !self.epsilon_ns.is_finite() || self.epsilon_ns < 0.0 {
            return Err(HarnessError::invalid_config(
                "epsilon_ns",
                "must be finite and >= 0",
            ));
        }
        if !self.max_ratio.is_finite() || self.max_ratio <= 0.0 {
            return Err(HarnessError::invalid_config(
                "max_ratio",
                "must be finite and > 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reference_scenario() {
        let config = PerfGateConfig::default();
        assert_eq!(config.dataset_len, 1_000_000);
        assert_eq!(config.query_index, 432_000);
        assert_eq!(config.query_value().expect("fits"), 432_000);
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = PerfGateConfig::from_toml_str("dataset_len = 4096\nquery_index = 17\n")
            .expect("partial config parses");
        assert_eq!(config.dataset_len, 4096);
        assert_eq!(config.query_index, 17);
        assert_eq!(config.rounds, DEFAULT_ROUNDS);
        assert_eq!(config.iterations_per_round, DEFAULT_ITERATIONS_PER_ROUND);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = PerfGateConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, PerfGateConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = PerfGateConfig::from_toml_str("datset_len = 5\n").expect_err("typo must fail");
        assert!(matches!(err, HarnessError::ConfigParse(_)), "{err}");
    }

    #[test]
    fn test_query_outside_dataset_rejected() {
        let err = PerfGateConfig::from_toml_str("dataset_len = 10\nquery_index = 10\n")
            .expect_err("query_index == dataset_len must fail");
        assert!(matches!(
            err,
            HarnessError::InvalidConfig {
                field: "query_index",
                ..
            }
        ));
    }

    #[test]
    fn test_validation_rejects_degenerate_fields() {
        let cases: [(&str, PerfGateConfig); 5] = [
            (
                "dataset_len",
                PerfGateConfig {
                    dataset_len: 0,
                    query_index: 0,
                    ..PerfGateConfig::default()
                },
            ),
            (
                "rounds",
                PerfGateConfig {
                    rounds: 0,
                    ..PerfGateConfig::default()
                },
            ),
            (
                "iterations_per_round",
                PerfGateConfig {
                    iterations_per_round: 0,
                    ..PerfGateConfig::default()
                },
            ),
            (
                "epsilon_ns",
                PerfGateConfig {
                    epsilon_ns: f64::NAN,
                    ..PerfGateConfig::default()
                },
            ),
            (
                "max_ratio",
                PerfGateConfig {
                    max_ratio: 0.0,
                    ..PerfGateConfig::default()
                },
            ),
        ];
        for (expected_field, config) in cases {
            match config.validate() {
                Err(HarnessError::InvalidConfig { field, .. }) => {
                    assert_eq!(field, expected_field);
                }
                other => panic!("field={expected_field} unexpected result: {other:?}"),
            }
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = PerfGateConfig::load(Path::new("/nonexistent/lbsearch/perf_gate.toml"))
            .expect_err("missing file must fail");
        assert!(matches!(err, HarnessError::ConfigRead { .. }));
    }
}
