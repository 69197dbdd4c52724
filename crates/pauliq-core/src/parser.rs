//! Gadget file reader and writer.
//!
//! One gadget per line:
//!
//! ```text
//! <angle>;<pauli-string>
//! ```
//!
//! `<angle>` is a decimal multiple of π or an identifier (optionally prefixed
//! by `-`) for an unresolved parameter. `<pauli-string>` is a run of
//! `I`/`X`/`Y`/`Z` letters, qubit 0 first. Surrounding whitespace is ignored
//! and blank lines are skipped.
//!
//! # Example
//!
//! ```rust
//! use pauliq_core::gadget::PaddingPolicy;
//! use pauliq_core::parser::parse_str;
//!
//! let seq = parse_str("0.25;XZ\n-0.5;Y\n", PaddingPolicy::Identity).unwrap();
//! assert_eq!(seq.len(), 2);
//! assert_eq!(seq.num_qubits(), 2);
//! ```

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::angle::Angle;
use crate::error::{PauliqError, PauliqResult};
use crate::gadget::{Gadget, GadgetSequence, PaddingPolicy};
use crate::pauli::PauliOperator;

/// Parse a single non-blank line. `line_no` is 1-based and used in errors.
pub fn parse_line(line_no: usize, line: &str) -> PauliqResult<Gadget> {
    let malformed = |reason: String| PauliqError::MalformedLine {
        line: line_no,
        reason,
    };

    let fields: Vec<&str> = line.trim().split(';').collect();
    if fields.len() != 2 {
        return Err(malformed(format!(
            "expected 2 ';'-separated fields, found {}",
            fields.len()
        )));
    }

    let angle: Angle = fields[0].parse().map_err(|e| malformed(format!("{e}")))?;
    let pauli: PauliOperator = fields[1]
        .trim()
        .parse()
        .map_err(|e| malformed(format!("{e}")))?;

    Ok(Gadget::new(angle, pauli))
}

/// Parse a whole gadget file held in memory.
pub fn parse_str(source: &str, padding: PaddingPolicy) -> PauliqResult<GadgetSequence> {
    let mut gadgets = Vec::new();
    let mut lines = Vec::new();

    for (idx, line) in source.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        gadgets.push(parse_line(idx + 1, line)?);
        lines.push(idx + 1);
    }

    let seq = GadgetSequence::new(gadgets, Some(lines.as_slice()), padding)?;
    debug!(
        n_gadgets = seq.len(),
        n_qubits = seq.num_qubits(),
        "parsed gadget sequence"
    );
    Ok(seq)
}

/// Read and parse a gadget file. Errors carry the file path.
pub fn read_gadget_file(
    path: impl AsRef<Path>,
    padding: PaddingPolicy,
) -> PauliqResult<GadgetSequence> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| PauliqError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&source, padding).map_err(|e| e.in_file(path))
}

/// Write gadgets to a new file, one line each.
///
/// Refuses to replace an existing file.
pub fn write_gadget_file<'a>(
    path: impl AsRef<Path>,
    gadgets: impl IntoIterator<Item = &'a Gadget>,
) -> PauliqResult<()> {
    let path = path.as_ref();
    let io_err = |source| PauliqError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            return Err(PauliqError::OverwriteRefused(path.to_path_buf()));
        }
        Err(e) => return Err(io_err(e)),
    };

    let mut body = String::new();
    for g in gadgets {
        body.push_str(&g.to_line());
        body.push('\n');
    }
    file.write_all(body.as_bytes()).map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_numeric() {
        let g = parse_line(1, "0.5;XIZ").unwrap();
        assert_eq!(g.angle.coefficient(), Some(0.5));
        assert_eq!(g.pauli.to_string(), "XIZ");
    }

    #[test]
    fn test_parse_line_trims_whitespace() {
        let g = parse_line(1, "  -0.125 ; ZZ \r").unwrap();
        assert_eq!(g.angle.coefficient(), Some(-0.125));
        assert_eq!(g.pauli.num_qubits(), 2);
    }

    #[test]
    fn test_parse_line_wrong_field_count() {
        for bad in ["abc", "0.1;X;Y", ""] {
            assert!(matches!(
                parse_line(7, bad),
                Err(PauliqError::MalformedLine { line: 7, .. })
            ));
        }
    }

    #[test]
    fn test_parse_line_bad_letter() {
        let err = parse_line(2, "0.1;XQ").unwrap_err();
        assert!(err.to_string().contains("'Q'"));
    }

    #[test]
    fn test_blank_lines_skipped_but_counted() {
        let err = parse_str("0.1;X\n\n0.2;Q\n", PaddingPolicy::Identity).unwrap_err();
        assert!(matches!(err, PauliqError::MalformedLine { line: 3, .. }));
    }

    #[test]
    fn test_only_blank_lines_is_empty_circuit() {
        assert!(matches!(
            parse_str("\n   \n", PaddingPolicy::Identity),
            Err(PauliqError::EmptyCircuit)
        ));
    }
}
