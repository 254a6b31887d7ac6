//! Relative performance gate: `lower_bound` vs `slice::binary_search`.
//!
//! Provides:
//! - identity dataset construction and result verification against the oracle,
//! - per-round ns/op sampling with a robust summary (median + MAD),
//! - a pass/fail verdict on the median ratio with an additive epsilon,
//! - deterministic JSON report generation.
//!
//! The asymptotic O(log n) bound is the hard contract of the search; this
//! gate checks the constant factor on the current host and is therefore only
//! meaningful in optimized builds.

use std::fmt;
use std::hint::black_box;
use std::path::Path;
use std::time::Instant;

use lbsearch::{count_less_than, lower_bound};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::PerfGateConfig;
use crate::error::{HarnessError, Result};

/// Schema version for report payloads.
pub const SCHEMA_VERSION: u32 = 1;
pub const CANDIDATE_NAME: &str = "lbsearch::lower_bound";
pub const REFERENCE_NAME: &str = "slice::binary_search";

/// Summary of one implementation's timed rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub name: String,
    pub iterations_per_round: u64,
    pub samples_ns_per_op: Vec<f64>,
    pub median_ns_per_op: f64,
    pub mad_ns_per_op: f64,
}

impl Measurement {
    /// Summarize raw per-round samples. `None` when `samples` is empty.
    pub fn from_samples(
        name: impl Into<String>,
        iterations_per_round: u64,
        samples: Vec<f64>,
    ) -> Option<Self> {
        let mut sorted = samples.clone();
        let median_ns_per_op = median(&mut sorted)?;
        let mad_ns_per_op = mad(&samples, median_ns_per_op)?;
        Some(Self {
            name: name.into(),
            iterations_per_round,
            samples_ns_per_op: samples,
            median_ns_per_op,
            mad_ns_per_op,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateVerdict {
    Pass,
    Fail,
}

impl fmt::Display for GateVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => f.write_str("pass"),
            Self::Fail => f.write_str("fail"),
        }
    }
}

/// Full gate report payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfGateReport {
    pub schema_version: u32,
    pub config: PerfGateConfig,
    pub candidate: Measurement,
    pub reference: Measurement,
    /// `(candidate median + eps) / (reference median + eps)`.
    pub ratio: f64,
    pub verdict: GateVerdict,
    pub reasons: Vec<String>,
}

/// Identity dataset `s[i] = i` of `len` elements.
pub fn build_dataset(len: usize) -> Vec<i64> {
    (0_i64..).take(len).collect()
}

/// Check that the oracle, the candidate and the reference all resolve
/// `query` to `expected` on `dataset`.
pub fn verify_dataset(dataset: &[i64], query: i64, expected: usize) -> Result<()> {
    let checks = [
        ("oracle", count_less_than(dataset, query)),
        (CANDIDATE_NAME, lower_bound(dataset, query)),
    ];
    for (implementation, actual) in checks {
        if actual != expected {
            return Err(HarnessError::ResultMismatch {
                implementation,
                expected,
                actual,
            });
        }
    }

    match dataset.binary_search(&query) {
        Ok(actual) if actual == expected => Ok(()),
        Ok(actual) => Err(HarnessError::ResultMismatch {
            implementation: REFERENCE_NAME,
            expected,
            actual,
        }),
        Err(_) => Err(HarnessError::ReferenceMiss { query }),
    }
}

fn time_round<F>(iterations: u64, op: &mut F) -> f64
where
    F: FnMut() -> usize,
{
    let start = Instant::now();
    for _ in 0..iterations {
        black_box(op());
    }
    let elapsed = start.elapsed().as_nanos() as f64;
    elapsed / iterations as f64
}

/// Time `rounds` rounds of `iterations` calls to `op`.
pub fn measure<F>(name: &str, rounds: usize, iterations: u64, mut op: F) -> Option<Measurement>
where
    F: FnMut() -> usize,
{
    let samples: Vec<f64> = (0..rounds)
        .map(|_| time_round(iterations, &mut op))
        .collect();
    Measurement::from_samples(name, iterations, samples)
}

/// Compare two measurements under `config`'s epsilon and ratio limit.
pub fn evaluate(
    config: &PerfGateConfig,
    candidate: Measurement,
    reference: Measurement,
) -> PerfGateReport {
    let numerator = candidate.median_ns_per_op + config.epsilon_ns;
    let denominator = reference.median_ns_per_op + config.epsilon_ns;
    let ratio = if denominator > 0.0 {
        numerator / denominator
    } else if numerator > 0.0 {
        f64::INFINITY
    } else {
        1.0
    };

    let mut reasons = Vec::new();
    let verdict = if ratio <= config.max_ratio {
        GateVerdict::Pass
    } else {
        reasons.push(format!(
            "{} median {:.3} ns/op vs {} median {:.3} ns/op: ratio {:.4} > limit {:.4}",
            candidate.name,
            candidate.median_ns_per_op,
            reference.name,
            reference.median_ns_per_op,
            ratio,
            config.max_ratio
        ));
        GateVerdict::Fail
    };

    PerfGateReport {
        schema_version: SCHEMA_VERSION,
        config: config.clone(),
        candidate,
        reference,
        ratio,
        verdict,
        reasons,
    }
}

/// Validate `config`, build and verify the dataset, time both
/// implementations and evaluate.
///
/// Rounds alternate reference and candidate so both see the same cache and
/// frequency conditions. One untimed round of each runs first.
pub fn run_perf_gate(config: &PerfGateConfig) -> Result<PerfGateReport> {
    config.validate()?;
    let query = config.query_value()?;
    let dataset = build_dataset(config.dataset_len);
    verify_dataset(&dataset, query, config.query_index)?;

    let mut candidate_op = || lower_bound(black_box(&dataset), black_box(query));
    let mut reference_op = || match black_box(&dataset).binary_search(&black_box(query)) {
        Ok(index) | Err(index) => index,
    };

    let warmup = (config.iterations_per_round / 10).max(1);
    time_round(warmup, &mut reference_op);
    time_round(warmup, &mut candidate_op);

    let mut candidate_samples = Vec::with_capacity(config.rounds);
    let mut reference_samples = Vec::with_capacity(config.rounds);
    for round in 0..config.rounds {
        let reference_ns = time_round(config.iterations_per_round, &mut reference_op);
        let candidate_ns = time_round(config.iterations_per_round, &mut candidate_op);
        debug!(round, candidate_ns, reference_ns, "perf_gate round");
        candidate_samples.push(candidate_ns);
        reference_samples.push(reference_ns);
    }

    let summarize = |name: &str, samples: Vec<f64>| {
        Measurement::from_samples(name, config.iterations_per_round, samples)
            .ok_or_else(|| HarnessError::invalid_config("rounds", "no samples collected"))
    };
    let candidate = summarize(CANDIDATE_NAME, candidate_samples)?;
    let reference = summarize(REFERENCE_NAME, reference_samples)?;

    let report = evaluate(config, candidate, reference);
    if report.verdict == GateVerdict::Pass {
        info!(
            dataset_len = config.dataset_len,
            query,
            candidate_ns = report.candidate.median_ns_per_op,
            reference_ns = report.reference.median_ns_per_op,
            ratio = report.ratio,
            "perf_gate passed"
        );
    } else {
        warn!(
            dataset_len = config.dataset_len,
            query,
            candidate_ns = report.candidate.median_ns_per_op,
            reference_ns = report.reference.median_ns_per_op,
            ratio = report.ratio,
            limit = config.max_ratio,
            "perf_gate failed"
        );
    }
    Ok(report)
}

/// Write one gate report as deterministic pretty JSON.
pub fn write_report(path: &Path, report: &PerfGateReport) -> Result<()> {
    let payload = serde_json::to_vec_pretty(report)?;
    std::fs::write(path, payload).map_err(|source| HarnessError::ReportWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some(f64::midpoint(values[mid - 1], values[mid]))
    } else {
        Some(values[mid])
    }
}

fn mad(values: &[f64], center: f64) -> Option<f64> {
    let mut residuals: Vec<f64> = values.iter().map(|value| (*value - center).abs()).collect();
    median(&mut residuals)
}
