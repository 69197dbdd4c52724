//! Gadgets and gadget sequences.
//!
//! A gadget is one exponentiated Pauli rotation, `exp(−i θ/2 · P)`. A
//! [`GadgetSequence`] is an ordered list of gadgets modelling one circuit;
//! gadgets are applied in list order.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::angle::Angle;
use crate::error::{PauliqError, PauliqResult};
use crate::pauli::PauliOperator;

/// A single Pauli rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gadget {
    /// Rotation angle.
    pub angle: Angle,
    /// Pauli string the rotation is generated by.
    pub pauli: PauliOperator,
}

impl Gadget {
    /// Create a new gadget.
    pub fn new(angle: Angle, pauli: PauliOperator) -> Self {
        Self { angle, pauli }
    }

    /// Number of qubits named by the Pauli string.
    pub fn num_qubits(&self) -> usize {
        self.pauli.num_qubits()
    }

    /// Render as a line of the gadget file format (without newline).
    pub fn to_line(&self) -> String {
        format!("{};{}", self.angle, self.pauli)
    }
}

impl fmt::Display for Gadget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

/// What to do with gadgets shorter than the widest one in their file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaddingPolicy {
    /// Treat missing trailing letters as identity.
    #[default]
    Identity,
    /// Every gadget must name exactly the circuit's qubit count.
    Reject,
}

impl std::str::FromStr for PaddingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "identity" | "pad" => Ok(PaddingPolicy::Identity),
            "reject" | "strict" => Ok(PaddingPolicy::Reject),
            other => Err(format!(
                "unknown padding policy '{other}' (expected identity or reject)"
            )),
        }
    }
}

impl fmt::Display for PaddingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaddingPolicy::Identity => f.write_str("identity"),
            PaddingPolicy::Reject => f.write_str("reject"),
        }
    }
}

/// An ordered, validated list of gadgets sharing one qubit count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GadgetSequence {
    gadgets: Vec<Gadget>,
    /// 1-based source line of each gadget.
    lines: Vec<usize>,
    num_qubits: usize,
}

impl GadgetSequence {
    /// Validate a list of gadgets.
    ///
    /// The sequence's qubit count is the longest Pauli string. Shorter
    /// gadgets are accepted under [`PaddingPolicy::Identity`] and rejected
    /// with [`PauliqError::RaggedGadget`] under [`PaddingPolicy::Reject`].
    /// `lines` gives the source line of each gadget for error reporting; if
    /// `None`, 1-based positions are used.
    pub fn new(
        gadgets: Vec<Gadget>,
        lines: Option<&[usize]>,
        padding: PaddingPolicy,
    ) -> PauliqResult<Self> {
        if gadgets.is_empty() {
            return Err(PauliqError::EmptyCircuit);
        }

        let num_qubits = gadgets.iter().map(Gadget::num_qubits).max().unwrap_or(0);
        let lines: Vec<usize> = (0..gadgets.len())
            .map(|i| lines.and_then(|l| l.get(i).copied()).unwrap_or(i + 1))
            .collect();
        let line_of = |i: usize| lines[i];

        let mut short = 0usize;
        for (i, g) in gadgets.iter().enumerate() {
            if g.num_qubits() == num_qubits {
                continue;
            }
            match padding {
                PaddingPolicy::Reject => {
                    return Err(PauliqError::RaggedGadget {
                        line: line_of(i),
                        expected: num_qubits,
                        got: g.num_qubits(),
                    });
                }
                PaddingPolicy::Identity => short += 1,
            }
        }
        if short > 0 {
            debug!(short, num_qubits, "padding short gadgets with identity");
        }

        Ok(Self {
            gadgets,
            lines,
            num_qubits,
        })
    }

    /// Convenience constructor with identity padding and positional lines.
    pub fn from_gadgets(gadgets: Vec<Gadget>) -> PauliqResult<Self> {
        Self::new(gadgets, None, PaddingPolicy::Identity)
    }

    /// The gadgets in evolution order.
    pub fn gadgets(&self) -> &[Gadget] {
        &self.gadgets
    }

    /// Source line of the gadget at `index`.
    pub fn line(&self, index: usize) -> Option<usize> {
        self.lines.get(index).copied()
    }

    /// Iterate over `(source line, gadget)` in evolution order.
    pub fn iter_lines(&self) -> impl Iterator<Item = (usize, &Gadget)> {
        self.lines.iter().copied().zip(&self.gadgets)
    }

    /// Iterate over gadgets in evolution order.
    pub fn iter(&self) -> std::slice::Iter<'_, Gadget> {
        self.gadgets.iter()
    }

    /// Number of gadgets.
    pub fn len(&self) -> usize {
        self.gadgets.len()
    }

    /// Always false for a constructed sequence; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.gadgets.is_empty()
    }

    /// The circuit's qubit count (longest Pauli string).
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Distinct symbol names appearing in the sequence.
    pub fn symbols(&self) -> BTreeSet<&str> {
        self.gadgets
            .iter()
            .filter_map(|g| g.angle.symbol_name())
            .collect()
    }

    /// True if every angle is concrete.
    pub fn is_numeric(&self) -> bool {
        self.gadgets.iter().all(|g| !g.angle.is_symbolic())
    }
}

impl<'a> IntoIterator for &'a GadgetSequence {
    type Item = &'a Gadget;
    type IntoIter = std::slice::Iter<'a, Gadget>;

    fn into_iter(self) -> Self::IntoIter {
        self.gadgets.iter()
    }
}
