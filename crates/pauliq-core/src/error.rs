//! Error types for the core crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while parsing, simulating or comparing gadget circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PauliqError {
    /// A line did not have the `<angle>;<pauli>` shape.
    #[error("line {line}: malformed gadget: {reason}")]
    MalformedLine {
        /// 1-based line number in the source.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// The source contained no gadgets at all.
    #[error("no gadgets found")]
    EmptyCircuit,

    /// A gadget is shorter than the circuit width and padding is disabled.
    #[error("line {line}: gadget acts on {got} qubits but the circuit has {expected}")]
    RaggedGadget {
        /// 1-based line number of the short gadget.
        line: usize,
        /// The circuit's qubit count.
        expected: usize,
        /// The gadget's Pauli string length.
        got: usize,
    },

    /// The requested qubit count is above the configured cap.
    #[error("circuit needs {requested} qubits but the limit is {max}")]
    QubitCountExceeded {
        /// Qubits the circuit needs.
        requested: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Two statevectors (or a state and a gadget) disagree on qubit count.
    #[error("dimension mismatch: {left} qubits vs {right} qubits")]
    DimensionMismatch {
        /// Qubit count on the left-hand side.
        left: usize,
        /// Qubit count on the right-hand side.
        right: usize,
    },

    /// A symbolic angle reached the simulator.
    #[error("line {line}: unresolved symbolic angle '{name}'")]
    UnresolvedSymbolicAngle {
        /// The symbol name.
        name: String,
        /// 1-based source line of the gadget.
        line: usize,
    },

    /// Refused to overwrite an existing gadget file.
    #[error("refusing to overwrite existing file {}", .0.display())]
    OverwriteRefused(PathBuf),

    /// Amplitudes that do not form a normalized state of whole qubits.
    #[error("invalid statevector: {0}")]
    InvalidStatevector(String),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Filesystem failure.
    #[error("{}: {source}", path.display())]
    Io {
        /// The path being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Any of the above, attributed to a file.
    #[error("{}: {source}", path.display())]
    InFile {
        /// The offending file.
        path: PathBuf,
        /// The wrapped error.
        #[source]
        source: Box<PauliqError>,
    },
}

impl PauliqError {
    /// Attach a file path to this error.
    ///
    /// I/O errors already carry their path and are returned unchanged.
    #[must_use]
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            e @ (PauliqError::Io { .. } | PauliqError::InFile { .. }) => e,
            other => PauliqError::InFile {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, looking through any file context.
    pub fn root(&self) -> &PauliqError {
        match self {
            PauliqError::InFile { source, .. } => source.root(),
            other => other,
        }
    }

    /// The file this error is attributed to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            PauliqError::InFile { path, .. } | PauliqError::Io { path, .. } => Some(path),
            PauliqError::OverwriteRefused(path) => Some(path),
            _ => None,
        }
    }
}

/// Result type for core operations.
pub type PauliqResult<T> = Result<T, PauliqError>;
