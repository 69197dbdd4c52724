//! Pairing circuit files with their reference orderings and checking them.
//!
//! A circuit file `name.exp` is paired with `name.exp.order` (the suffix is
//! configurable). Every pair is processed independently: each gets freshly
//! allocated statevectors, and a failure in one pair never affects another.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::CheckerConfig;
use crate::equivalence::{EquivalenceChecker, EquivalenceResult};
use crate::error::{PauliqError, PauliqResult};
use crate::parser::read_gadget_file;
use crate::statevector::simulate;

/// A circuit file and the file holding its reference ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircuitPair {
    /// The rewritten circuit.
    pub circuit: PathBuf,
    /// The reference ordering of the same circuit.
    pub reference: PathBuf,
}

impl CircuitPair {
    /// Pair `circuit` with `<circuit><suffix>`.
    pub fn with_suffix(circuit: impl Into<PathBuf>, suffix: &str) -> Self {
        let circuit = circuit.into();
        let mut reference = circuit.clone().into_os_string();
        reference.push(suffix);
        Self {
            circuit,
            reference: PathBuf::from(reference),
        }
    }
}

/// Result of checking one pair.
#[derive(Debug)]
pub struct PairOutcome {
    /// The pair that was checked.
    pub pair: CircuitPair,
    /// Comparison result, or the error that aborted this pair.
    pub result: PauliqResult<EquivalenceResult>,
}

impl PairOutcome {
    /// True if the pair was checked and found equivalent.
    pub fn passed(&self) -> bool {
        matches!(&self.result, Ok(r) if r.equivalent)
    }
}

/// Find circuit files in `dir` and pair each with its reference file.
///
/// Only regular files with extension `config.extension` whose file name
/// starts with `prefix` (when given) are considered. Pairs are sorted by
/// circuit path. A missing reference file is not filtered out here; it
/// surfaces as an I/O error when the pair is checked.
pub fn discover_pairs(
    dir: impl AsRef<Path>,
    prefix: Option<&str>,
    config: &CheckerConfig,
) -> PauliqResult<Vec<CircuitPair>> {
    let dir = dir.as_ref();
    let io_err = |source| PauliqError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut circuits = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let ext_matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == config.extension);
        let prefix_matches = prefix.is_none_or(|p| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(p))
        });
        if ext_matches && prefix_matches {
            circuits.push(path);
        }
    }
    circuits.sort();

    info!(
        dir = %dir.display(),
        n_pairs = circuits.len(),
        "discovered circuit files"
    );
    Ok(circuits
        .into_iter()
        .map(|c| CircuitPair::with_suffix(c, &config.order_suffix))
        .collect())
}

/// Parse, simulate and compare one pair.
pub fn check_pair(pair: &CircuitPair, config: &CheckerConfig) -> PairOutcome {
    let result = check_files(&pair.circuit, &pair.reference, config);
    match &result {
        Ok(r) => info!(
            circuit = %pair.circuit.display(),
            equivalent = r.equivalent,
            distance = r.distance,
            "checked pair"
        ),
        Err(e) => warn!(circuit = %pair.circuit.display(), error = %e, "pair failed"),
    }
    PairOutcome {
        pair: pair.clone(),
        result,
    }
}

/// Compare two gadget files directly.
pub fn check_files(
    circuit: &Path,
    reference: &Path,
    config: &CheckerConfig,
) -> PauliqResult<EquivalenceResult> {
    let circuit_seq = read_gadget_file(circuit, config.padding)?;
    let reference_seq = read_gadget_file(reference, config.padding)?;

    let v1 = simulate(&circuit_seq, config).map_err(|e| e.in_file(circuit))?;
    let v2 = simulate(&reference_seq, config).map_err(|e| e.in_file(reference))?;

    EquivalenceChecker::new(config.tolerance)
        .check(&v1, &v2)
        .map_err(|e| e.in_file(circuit))
}

/// Outcomes of a batch run, in input order.
#[derive(Debug)]
pub struct BatchReport {
    /// One outcome per input pair.
    pub outcomes: Vec<PairOutcome>,
}

impl BatchReport {
    /// Pairs found equivalent.
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Pairs checked and found not equivalent.
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(&o.result, Ok(r) if !r.equivalent))
            .count()
    }

    /// Pairs aborted by an error.
    pub fn errored(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    /// True if every pair passed.
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(PairOutcome::passed)
    }

    /// A serializable summary of the run.
    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            total: self.outcomes.len(),
            passed: self.passed(),
            failed: self.failed(),
            errored: self.errored(),
            pairs: self
                .outcomes
                .iter()
                .map(|o| PairSummary {
                    circuit: o.pair.circuit.clone(),
                    reference: o.pair.reference.clone(),
                    equivalent: o.result.as_ref().ok().map(|r| r.equivalent),
                    distance: o.result.as_ref().ok().map(|r| r.distance),
                    error: o.result.as_ref().err().map(ToString::to_string),
                })
                .collect(),
        }
    }
}

/// JSON-friendly view of a [`BatchReport`].
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// Number of pairs.
    pub total: usize,
    /// Equivalent pairs.
    pub passed: usize,
    /// Non-equivalent pairs.
    pub failed: usize,
    /// Pairs that could not be checked.
    pub errored: usize,
    /// Per-pair details.
    pub pairs: Vec<PairSummary>,
}

/// JSON-friendly view of a [`PairOutcome`].
#[derive(Debug, Clone, Serialize)]
pub struct PairSummary {
    /// Circuit file.
    pub circuit: PathBuf,
    /// Reference file.
    pub reference: PathBuf,
    /// Comparison outcome, absent on error.
    pub equivalent: Option<bool>,
    /// Fidelity distance, absent on error.
    pub distance: Option<f64>,
    /// Error message, if the pair could not be checked.
    pub error: Option<String>,
}

/// Check every pair.
///
/// With `parallel`, pairs are spread across the rayon thread pool; each
/// worker owns the statevectors it allocates. Outcomes keep input order.
/// `on_done` is called once per finished pair.
pub fn run_batch(
    pairs: &[CircuitPair],
    config: &CheckerConfig,
    parallel: bool,
    on_done: impl Fn(&PairOutcome) + Sync,
) -> BatchReport {
    let run_one = |pair: &CircuitPair| {
        let outcome = check_pair(pair, config);
        on_done(&outcome);
        outcome
    };
    let outcomes = if parallel {
        pairs.par_iter().map(run_one).collect()
    } else {
        pairs.iter().map(run_one).collect()
    };
    BatchReport { outcomes }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_path_appends_suffix() {
        let pair = CircuitPair::with_suffix("data/circuit3.exp", ".order");
        assert_eq!(pair.reference, PathBuf::from("data/circuit3.exp.order"));
    }

    #[test]
    fn test_report_counts() {
        let ok = |equivalent| {
            Ok(EquivalenceResult {
                equivalent,
                distance: if equivalent { 0.0 } else { 0.5 },
                fidelity: 1.0,
                global_phase: 0.0,
            })
        };
        let pair = CircuitPair::with_suffix("a.exp", ".order");
        let report = BatchReport {
            outcomes: vec![
                PairOutcome {
                    pair: pair.clone(),
                    result: ok(true),
                },
                PairOutcome {
                    pair: pair.clone(),
                    result: ok(false),
                },
                PairOutcome {
                    pair,
                    result: Err(PauliqError::EmptyCircuit),
                },
            ],
        };
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.errored(), 1);
        assert!(!report.all_passed());
        let summary = report.summary();
        assert_eq!(summary.pairs[2].error.as_deref(), Some("no gadgets found"));
        assert_eq!(summary.pairs[0].equivalent, Some(true));
    }
}
