//! Statevector simulation engine.
//!
//! Owns a dense array of `2^n` amplitudes, initialised to |0…0⟩, and applies
//! gadgets to it in place. Qubit `q` is bit `q` of an amplitude index.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{CheckerConfig, MAX_SUPPORTED_QUBITS};
use crate::error::{PauliqError, PauliqResult};
use crate::gadget::{Gadget, GadgetSequence};

/// Largest deviation of `‖ψ‖` from 1 accepted for externally supplied amplitudes.
pub const NORM_TOLERANCE: f64 = 1e-8;

/// A pure state of `num_qubits` qubits.
///
/// Deserialization goes through [`Statevector::from_amplitudes`], so a
/// deserialized state is always normalized and its qubit count matches its
/// length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStatevector")]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create |0…0⟩ on `num_qubits` qubits.
    ///
    /// Fails with [`PauliqError::QubitCountExceeded`] above
    /// [`MAX_SUPPORTED_QUBITS`].
    pub fn new(num_qubits: usize) -> PauliqResult<Self> {
        Self::with_limit(num_qubits, MAX_SUPPORTED_QUBITS)
    }

    /// Create |0…0⟩, refusing to allocate more than `max_qubits` qubits.
    pub fn with_limit(num_qubits: usize, max_qubits: usize) -> PauliqResult<Self> {
        let max = max_qubits.min(MAX_SUPPORTED_QUBITS);
        if num_qubits > max {
            return Err(PauliqError::QubitCountExceeded {
                requested: num_qubits,
                max,
            });
        }
        let size = 1usize << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Wrap an existing amplitude vector.
    ///
    /// Its length must be a power of two and its norm within
    /// [`NORM_TOLERANCE`] of 1.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> PauliqResult<Self> {
        let len = amplitudes.len();
        if !len.is_power_of_two() {
            return Err(PauliqError::InvalidStatevector(format!(
                "amplitude count {len} is not a power of two"
            )));
        }
        let norm = amplitudes
            .iter()
            .map(Complex64::norm_sqr)
            .sum::<f64>()
            .sqrt();
        // Written so that a NaN norm is rejected too.
        if !((norm - 1.0).abs() <= NORM_TOLERANCE) {
            return Err(PauliqError::InvalidStatevector(format!(
                "norm is {norm}, expected 1"
            )));
        }
        let num_qubits = len.trailing_zeros() as usize;
        if num_qubits > MAX_SUPPORTED_QUBITS {
            return Err(PauliqError::QubitCountExceeded {
                requested: num_qubits,
                max: MAX_SUPPORTED_QUBITS,
            });
        }
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes (`2^num_qubits`).
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// The amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Consume the state and return its amplitudes.
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// Euclidean norm. Stays 1 (up to rounding) under every gadget.
    pub fn norm(&self) -> f64 {
        self.amplitudes
            .iter()
            .map(Complex64::norm_sqr)
            .sum::<f64>()
            .sqrt()
    }

    /// Measurement probabilities in the computational basis.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// ⟨self|other⟩.
    pub fn inner_product(&self, other: &Statevector) -> PauliqResult<Complex64> {
        if self.num_qubits != other.num_qubits {
            return Err(PauliqError::DimensionMismatch {
                left: self.num_qubits,
                right: other.num_qubits,
            });
        }
        Ok(self
            .amplitudes
            .iter()
            .zip(other.amplitudes.iter())
            .map(|(a, b)| a.conj() * b)
            .sum())
    }

    /// Apply one gadget in place.
    ///
    /// `line` is the gadget's source line, used in errors.
    pub fn apply(&mut self, gadget: &Gadget, line: usize) -> PauliqResult<()> {
        if gadget.num_qubits() > self.num_qubits {
            return Err(PauliqError::DimensionMismatch {
                left: self.num_qubits,
                right: gadget.num_qubits(),
            });
        }
        let Some(theta) = gadget.angle.radians() else {
            return Err(PauliqError::UnresolvedSymbolicAngle {
                name: gadget.angle.symbol_name().unwrap_or_default().to_string(),
                line,
            });
        };
        trace!(line, theta, pauli = %gadget.pauli, "applying gadget");
        gadget.pauli.rotate(&mut self.amplitudes, theta);
        Ok(())
    }

    /// Apply every gadget of `sequence`, in order.
    ///
    /// Symbolic angles are detected before any amplitude is touched, so a
    /// failed call leaves the state unchanged.
    pub fn simulate(&mut self, sequence: &GadgetSequence) -> PauliqResult<()> {
        if sequence.num_qubits() > self.num_qubits {
            return Err(PauliqError::DimensionMismatch {
                left: self.num_qubits,
                right: sequence.num_qubits(),
            });
        }
        if let Some((line, name)) = first_symbol(sequence) {
            return Err(PauliqError::UnresolvedSymbolicAngle { name, line });
        }
        debug!(
            n_gadgets = sequence.len(),
            n_qubits = self.num_qubits,
            "simulating gadget sequence"
        );
        for (line, gadget) in sequence.iter_lines() {
            self.apply(gadget, line)?;
        }
        Ok(())
    }
}

/// Simulate `sequence` from |0…0⟩ under `config`.
///
/// The register is `config.register_width` qubits wide when set, otherwise
/// the sequence's own qubit count. Either way it is checked against
/// `config.max_qubits` before allocation.
pub fn simulate(sequence: &GadgetSequence, config: &CheckerConfig) -> PauliqResult<Statevector> {
    let width = match config.register_width {
        Some(width) if sequence.num_qubits() > width => {
            return Err(PauliqError::QubitCountExceeded {
                requested: sequence.num_qubits(),
                max: width,
            });
        }
        Some(width) => width,
        None => sequence.num_qubits(),
    };
    let mut state = Statevector::with_limit(width, config.max_qubits)?;
    state.simulate(sequence)?;
    Ok(state)
}

fn first_symbol(sequence: &GadgetSequence) -> Option<(usize, String)> {
    sequence
        .iter_lines()
        .find_map(|(line, g)| g.angle.symbol_name().map(|name| (line, name.to_string())))
}

/// Wire form of a [`Statevector`], validated on the way in.
#[derive(Deserialize)]
struct RawStatevector {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl TryFrom<RawStatevector> for Statevector {
    type Error = PauliqError;

    fn try_from(raw: RawStatevector) -> PauliqResult<Self> {
        let state = Statevector::from_amplitudes(raw.amplitudes)?;
        if state.num_qubits != raw.num_qubits {
            return Err(PauliqError::InvalidStatevector(format!(
                "num_qubits is {} but {} amplitudes encode {} qubits",
                raw.num_qubits,
                state.dimension(),
                state.num_qubits
            )));
        }
        Ok(state)
    }
}
