//! Pauli strings and their rotation kernel.
//!
//! A [`PauliOperator`] is a tensor product of single-qubit Pauli letters, one
//! per qubit. Letter `i` acts on qubit `i`, which is bit `i` of a statevector
//! index (least-significant first).
//!
//! Applying `P` to a basis state never needs the full `2^n × 2^n` matrix:
//!
//!   P|k⟩ = i^{n_Y} · (−1)^{popcount(k & z_mask)} · |k ⊕ x_mask⟩
//!
//! where `x_mask` marks X/Y qubits, `z_mask` marks Z/Y qubits and `n_Y` is
//! the number of Y letters. The rotation
//!
//!   R(θ, P) = cos(θ/2)·I − i·sin(θ/2)·P
//!
//! therefore mixes each amplitude with exactly one partner, `k ⊕ x_mask`.
//!
//! # Example
//!
//! ```rust
//! use pauliq_core::pauli::{PauliLetter, PauliOperator};
//!
//! let p: PauliOperator = "XIZ".parse().unwrap();
//! assert_eq!(p.num_qubits(), 3);
//! assert_eq!(p.letter(2), Some(PauliLetter::Z));
//! assert_eq!(p.x_mask(), 0b001);
//! assert_eq!(p.z_mask(), 0b100);
//! ```

use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Widest operator whose qubits fit in a `usize` bitmask.
pub const MAX_MASK_QUBITS: usize = usize::BITS as usize;

/// Single-qubit Pauli letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliLetter {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliLetter {
    /// Parse one letter. Only upper-case `I`, `X`, `Y`, `Z` are accepted.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PauliLetter::I),
            'X' => Some(PauliLetter::X),
            'Y' => Some(PauliLetter::Y),
            'Z' => Some(PauliLetter::Z),
            _ => None,
        }
    }

    /// The letter as written in gadget files.
    pub fn as_char(self) -> char {
        match self {
            PauliLetter::I => 'I',
            PauliLetter::X => 'X',
            PauliLetter::Y => 'Y',
            PauliLetter::Z => 'Z',
        }
    }

    /// Single-qubit Paulis commute iff one is I or they are equal.
    pub fn commutes_with(self, other: Self) -> bool {
        self == PauliLetter::I || other == PauliLetter::I || self == other
    }

    fn flips(self) -> bool {
        matches!(self, PauliLetter::X | PauliLetter::Y)
    }

    fn phases(self) -> bool {
        matches!(self, PauliLetter::Z | PauliLetter::Y)
    }
}

/// Error returned when a Pauli field contains something other than I/X/Y/Z.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PauliParseError {
    /// The field had no letters.
    Empty,
    /// A character outside the alphabet, with its 0-based position.
    InvalidLetter {
        /// The offending character.
        letter: char,
        /// Position in the field.
        position: usize,
    },
}

impl fmt::Display for PauliParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PauliParseError::Empty => write!(f, "empty Pauli string"),
            PauliParseError::InvalidLetter { letter, position } => {
                write!(f, "invalid Pauli letter '{letter}' at position {position}")
            }
        }
    }
}

/// A tensor product of Pauli letters over a fixed number of qubits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PauliOperator {
    letters: Vec<PauliLetter>,
}

impl PauliOperator {
    /// Build from letters in qubit order.
    pub fn new(letters: Vec<PauliLetter>) -> Self {
        Self { letters }
    }

    /// The all-identity operator on `n` qubits.
    pub fn identity(n: usize) -> Self {
        Self {
            letters: vec![PauliLetter::I; n],
        }
    }

    /// Letters in qubit order.
    pub fn letters(&self) -> &[PauliLetter] {
        &self.letters
    }

    /// Letter on qubit `q`, or `None` past the end.
    pub fn letter(&self, q: usize) -> Option<PauliLetter> {
        self.letters.get(q).copied()
    }

    /// Number of qubits (string length).
    pub fn num_qubits(&self) -> usize {
        self.letters.len()
    }

    /// Number of non-identity letters.
    pub fn weight(&self) -> usize {
        self.letters
            .iter()
            .filter(|l| **l != PauliLetter::I)
            .count()
    }

    /// True if every letter is I (the rotation is a global phase).
    pub fn is_identity(&self) -> bool {
        self.letters.iter().all(|l| *l == PauliLetter::I)
    }

    /// Bitmask of qubits carrying X or Y.
    ///
    /// # Panics
    ///
    /// Panics if the string is wider than [`MAX_MASK_QUBITS`]. The same holds
    /// for [`z_mask`](Self::z_mask), [`phase`](Self::phase),
    /// [`apply`](Self::apply) and [`rotate`](Self::rotate).
    pub fn x_mask(&self) -> usize {
        self.mask(PauliLetter::flips)
    }

    /// Bitmask of qubits carrying Z or Y.
    pub fn z_mask(&self) -> usize {
        self.mask(PauliLetter::phases)
    }

    /// Number of Y letters.
    pub fn y_count(&self) -> usize {
        self.letters
            .iter()
            .filter(|l| **l == PauliLetter::Y)
            .count()
    }

    fn mask(&self, pred: impl Fn(PauliLetter) -> bool) -> usize {
        assert!(
            self.num_qubits() <= MAX_MASK_QUBITS,
            "Pauli string on {} qubits exceeds the {MAX_MASK_QUBITS}-qubit mask width",
            self.num_qubits()
        );
        self.letters
            .iter()
            .enumerate()
            .filter(|(_, l)| pred(**l))
            .fold(0, |m, (q, _)| m | (1 << q))
    }

    /// Extend with identity letters up to `n` qubits.
    ///
    /// Strings already at least `n` long are returned unchanged.
    #[must_use]
    pub fn padded(&self, n: usize) -> Self {
        let mut letters = self.letters.clone();
        if letters.len() < n {
            letters.resize(n, PauliLetter::I);
        }
        Self { letters }
    }

    /// True if `self` and `other` commute as multi-qubit operators.
    ///
    /// Missing letters on the shorter string count as I.
    pub fn commutes_with(&self, other: &PauliOperator) -> bool {
        let anticommuting = self
            .letters
            .iter()
            .zip(other.letters.iter())
            .filter(|(a, b)| !a.commutes_with(**b))
            .count();
        anticommuting % 2 == 0
    }

    /// The phase `coeff(k)` such that `P|k⟩ = coeff(k)·|k ⊕ x_mask⟩`.
    pub fn phase(&self, k: usize) -> Complex64 {
        PhaseTable::new(self).phase(k)
    }

    /// Replace `amplitudes` with `P·amplitudes`.
    ///
    /// # Panics
    ///
    /// Panics if the operator is wider than the register the slice encodes.
    pub fn apply(&self, amplitudes: &mut [Complex64]) {
        assert!(
            fits_register(self.num_qubits(), amplitudes.len()),
            "Pauli string on {} qubits applied to a {}-amplitude register",
            self.num_qubits(),
            amplitudes.len()
        );
        let table = PhaseTable::new(self);
        let x_mask = table.x_mask;

        if x_mask == 0 {
            for (k, amp) in amplitudes.iter_mut().enumerate() {
                *amp *= table.phase(k);
            }
            return;
        }

        let pivot = lowest_bit(x_mask);
        for k in 0..amplitudes.len() {
            if k & pivot != 0 {
                continue;
            }
            let l = k ^ x_mask;
            let a = amplitudes[k];
            let b = amplitudes[l];
            // (Pψ)[k] = coeff(l)·ψ[l], (Pψ)[l] = coeff(k)·ψ[k]
            amplitudes[k] = table.phase(l) * b;
            amplitudes[l] = table.phase(k) * a;
        }
    }

    /// Replace `amplitudes` with `R(θ, P)·amplitudes` in place.
    ///
    /// Visits each unordered pair `(k, k ⊕ x_mask)` exactly once, O(2^n) time
    /// and O(1) extra space. The all-identity operator multiplies every
    /// amplitude by `e^{−iθ/2}`.
    ///
    /// # Panics
    ///
    /// Panics if the operator is wider than the register the slice encodes.
    pub fn rotate(&self, amplitudes: &mut [Complex64], theta: f64) {
        assert!(
            fits_register(self.num_qubits(), amplitudes.len()),
            "Pauli string on {} qubits applied to a {}-amplitude register",
            self.num_qubits(),
            amplitudes.len()
        );
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        let neg_i_s = Complex64::new(0.0, -s);
        let table = PhaseTable::new(self);
        let x_mask = table.x_mask;

        if x_mask == 0 {
            // Diagonal: coeff(k) is ±1, so each amplitude only picks up a phase.
            let plus = Complex64::new(c, 0.0) + neg_i_s;
            let minus = Complex64::new(c, 0.0) - neg_i_s;
            for (k, amp) in amplitudes.iter_mut().enumerate() {
                if table.odd_parity(k) {
                    *amp *= minus;
                } else {
                    *amp *= plus;
                }
            }
            return;
        }

        let pivot = lowest_bit(x_mask);
        for k in 0..amplitudes.len() {
            if k & pivot != 0 {
                continue;
            }
            let l = k ^ x_mask;
            let a = amplitudes[k];
            let b = amplitudes[l];
            amplitudes[k] = c * a + neg_i_s * table.phase(l) * b;
            amplitudes[l] = c * b + neg_i_s * table.phase(k) * a;
        }
    }
}

impl FromStr for PauliOperator {
    type Err = PauliParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PauliParseError::Empty);
        }
        let letters = s
            .chars()
            .enumerate()
            .map(|(position, letter)| {
                PauliLetter::from_char(letter)
                    .ok_or(PauliParseError::InvalidLetter { letter, position })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { letters })
    }
}

impl fmt::Display for PauliOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for l in &self.letters {
            write!(f, "{}", l.as_char())?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Precomputed masks and the `i^{n_Y}` factor for one operator.
struct PhaseTable {
    x_mask: usize,
    z_mask: usize,
    y_phase: Complex64,
}

impl PhaseTable {
    fn new(op: &PauliOperator) -> Self {
        let y_phase = match op.y_count() % 4 {
            0 => Complex64::new(1.0, 0.0),
            1 => Complex64::new(0.0, 1.0),
            2 => Complex64::new(-1.0, 0.0),
            _ => Complex64::new(0.0, -1.0),
        };
        Self {
            x_mask: op.x_mask(),
            z_mask: op.z_mask(),
            y_phase,
        }
    }

    #[inline]
    fn odd_parity(&self, k: usize) -> bool {
        (k & self.z_mask).count_ones() % 2 == 1
    }

    #[inline]
    fn phase(&self, k: usize) -> Complex64 {
        if self.odd_parity(k) {
            -self.y_phase
        } else {
            self.y_phase
        }
    }
}

/// True if `2^num_qubits` amplitudes fit in a slice of length `len`.
fn fits_register(num_qubits: usize, len: usize) -> bool {
    u32::try_from(num_qubits)
        .ok()
        .and_then(|n| 1usize.checked_shl(n))
        .is_some_and(|dim| dim <= len)
}

#[inline]
fn lowest_bit(mask: usize) -> usize {
    mask & mask.wrapping_neg()
}
