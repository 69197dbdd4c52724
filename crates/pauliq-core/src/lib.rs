//! `pauliq-core`: equivalence checking for Pauli-gadget circuits.
//!
//! Verifies that two descriptions of the same circuit, each a sequence of
//! exponentiated Pauli rotations ("gadgets"), evolve |0…0⟩ to the same state
//! up to a global phase:
//!
//! - [`parser`] reads the `<angle>;<pauli-string>` text format
//! - [`pauli`] applies `R(θ, P) = cos(θ/2)·I − i·sin(θ/2)·P` to an amplitude
//!   array by bit pairing, without building a `2^n × 2^n` matrix
//! - [`statevector`] owns the amplitudes and applies gadgets in order
//! - [`equivalence`] compares two states by the overlap `|⟨v1|v2⟩|`
//! - [`batch`] pairs circuit files with their reference orderings
//!
//! # Quick start
//!
//! ```rust
//! use pauliq_core::{CheckerConfig, EquivalenceChecker, PaddingPolicy};
//! use pauliq_core::parser::parse_str;
//! use pauliq_core::statevector::simulate;
//!
//! // ZZ and Z commute, so the two orderings are equivalent.
//! let config = CheckerConfig::default();
//! let a = parse_str("0.3;ZZ\n0.7;Z\n", PaddingPolicy::Identity).unwrap();
//! let b = parse_str("0.7;Z\n0.3;ZZ\n", PaddingPolicy::Identity).unwrap();
//!
//! let va = simulate(&a, &config).unwrap();
//! let vb = simulate(&b, &config).unwrap();
//! let result = EquivalenceChecker::new(config.tolerance).check(&va, &vb).unwrap();
//! assert!(result.equivalent);
//! ```

pub mod angle;
pub mod batch;
pub mod config;
pub mod equivalence;
pub mod error;
pub mod gadget;
pub mod parser;
pub mod pauli;
pub mod statevector;

pub use angle::Angle;
pub use batch::{BatchReport, CircuitPair, PairOutcome, check_pair, discover_pairs, run_batch};
pub use config::{CheckerConfig, MAX_SUPPORTED_QUBITS};
pub use equivalence::{EquivalenceChecker, EquivalenceResult, check_equivalence};
pub use error::{PauliqError, PauliqResult};
pub use gadget::{Gadget, GadgetSequence, PaddingPolicy};
pub use parser::{parse_line, parse_str, read_gadget_file, write_gadget_file};
pub use pauli::{MAX_MASK_QUBITS, PauliLetter, PauliOperator};
pub use statevector::{NORM_TOLERANCE, Statevector, simulate};
