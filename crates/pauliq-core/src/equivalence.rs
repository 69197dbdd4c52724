//! Statevector equivalence up to global phase.
//!
//! Two states are equivalent when `|⟨v1|v2⟩| ≥ 1 − ε`. The phase of the
//! overlap is the global phase relating them; any relative phase between
//! amplitudes lowers the overlap magnitude and fails the check.
//!
//! The overlap is divided by `‖v1‖·‖v2‖`, so rounding drift in either norm
//! cannot push the distance below zero or mask a difference.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PauliqResult;
use crate::statevector::Statevector;

/// Outcome of one comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquivalenceResult {
    /// True if the states agree up to global phase within tolerance.
    pub equivalent: bool,
    /// `1 − |⟨v1|v2⟩|`.
    pub distance: f64,
    /// `|⟨v1|v2⟩|²`.
    pub fidelity: f64,
    /// Phase φ with `v2 ≈ e^{iφ}·v1`, in radians.
    pub global_phase: f64,
}

/// Compares statevectors with a fixed tolerance.
#[derive(Debug, Clone, Copy)]
pub struct EquivalenceChecker {
    tolerance: f64,
}

impl EquivalenceChecker {
    /// A checker accepting distances up to `tolerance`.
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// The configured tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Compare two states.
    ///
    /// Fails with [`crate::PauliqError::DimensionMismatch`] if the states
    /// have different qubit counts.
    pub fn check(&self, v1: &Statevector, v2: &Statevector) -> PauliqResult<EquivalenceResult> {
        let overlap: Complex64 = v1.inner_product(v2)?;
        let norms = v1.norm() * v2.norm();
        let magnitude = if norms > 0.0 {
            (overlap.norm() / norms).min(1.0)
        } else {
            0.0
        };
        let distance = 1.0 - magnitude;
        let result = EquivalenceResult {
            equivalent: distance <= self.tolerance,
            distance,
            fidelity: magnitude * magnitude,
            global_phase: overlap.arg(),
        };
        debug!(
            equivalent = result.equivalent,
            distance = result.distance,
            tolerance = self.tolerance,
            "compared statevectors"
        );
        Ok(result)
    }
}

/// Compare two states with tolerance `tolerance`.
pub fn check_equivalence(
    v1: &Statevector,
    v2: &Statevector,
    tolerance: f64,
) -> PauliqResult<EquivalenceResult> {
    EquivalenceChecker::new(tolerance).check(v1, v2)
}
