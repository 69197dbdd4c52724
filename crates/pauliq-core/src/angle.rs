//! Gadget rotation angles.
//!
//! Gadget files store each angle as a multiple of π with the producer's sign
//! convention. The evolution angle handed to the simulator is
//!
//!   θ = −c · π
//!
//! where `c` is the stored coefficient. The coefficient itself is kept
//! verbatim so files can be written back without loss.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The angle of a single gadget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Angle {
    /// A concrete multiple of π, as stored in the file.
    MultipleOfPi(f64),
    /// An unresolved variable. Cannot be simulated.
    Symbolic {
        /// Identifier as written, without the sign.
        name: String,
        /// True if the token was written as `-name`.
        negated: bool,
    },
}

/// Why an angle field could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AngleParseError {
    /// The field was empty.
    Empty,
    /// A number that is NaN or infinite.
    NonFinite(String),
    /// Neither a number nor an identifier.
    Invalid(String),
}

impl fmt::Display for AngleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AngleParseError::Empty => write!(f, "empty angle field"),
            AngleParseError::NonFinite(s) => write!(f, "non-finite angle '{s}'"),
            AngleParseError::Invalid(s) => {
                write!(f, "angle '{s}' is neither a number nor an identifier")
            }
        }
    }
}

impl Angle {
    /// A concrete angle from its stored coefficient.
    pub fn from_coefficient(coeff: f64) -> Self {
        Angle::MultipleOfPi(coeff)
    }

    /// A symbolic angle.
    pub fn symbol(name: impl Into<String>) -> Self {
        Angle::Symbolic {
            name: name.into(),
            negated: false,
        }
    }

    /// True for unresolved variables.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, Angle::Symbolic { .. })
    }

    /// The symbol name, if symbolic.
    pub fn symbol_name(&self) -> Option<&str> {
        match self {
            Angle::Symbolic { name, .. } => Some(name.as_str()),
            Angle::MultipleOfPi(_) => None,
        }
    }

    /// The stored coefficient, if concrete.
    pub fn coefficient(&self) -> Option<f64> {
        match self {
            Angle::MultipleOfPi(c) => Some(*c),
            Angle::Symbolic { .. } => None,
        }
    }

    /// The evolution angle θ in radians, if concrete.
    pub fn radians(&self) -> Option<f64> {
        self.coefficient().map(|c| -c * PI)
    }

    /// Flip the sign of the angle.
    #[must_use]
    pub fn negated(&self) -> Self {
        match self {
            Angle::MultipleOfPi(c) => Angle::MultipleOfPi(-c),
            Angle::Symbolic { name, negated } => Angle::Symbolic {
                name: name.clone(),
                negated: !negated,
            },
        }
    }
}

impl FromStr for Angle {
    type Err = AngleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AngleParseError::Empty);
        }

        if let Ok(value) = s.parse::<f64>() {
            if !value.is_finite() {
                return Err(AngleParseError::NonFinite(s.to_string()));
            }
            return Ok(Angle::MultipleOfPi(value));
        }

        let (negated, name) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if is_identifier(name) {
            Ok(Angle::Symbolic {
                name: name.to_string(),
                negated,
            })
        } else {
            Err(AngleParseError::Invalid(s.to_string()))
        }
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Angle::MultipleOfPi(c) => write!(f, "{c}"),
            Angle::Symbolic {
                name,
                negated: true,
            } => write!(f, "-{name}"),
            Angle::Symbolic { name, .. } => write!(f, "{name}"),
        }
    }
}

/// A letter or `_`, then letters, digits or `_`. Non-ASCII letters such as
/// `θ` are accepted.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_angle_converts_with_negative_pi() {
        let a: Angle = "0.5".parse().unwrap();
        assert_eq!(a.coefficient(), Some(0.5));
        assert!((a.radians().unwrap() + PI / 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_scientific_notation() {
        let a: Angle = "-1.25e-3".parse().unwrap();
        assert_eq!(a.coefficient(), Some(-1.25e-3));
    }

    #[test]
    fn test_symbolic_angle() {
        let a: Angle = "theta_1".parse().unwrap();
        assert!(a.is_symbolic());
        assert_eq!(a.radians(), None);

        let b: Angle = "-theta_1".parse().unwrap();
        assert_eq!(b, a.negated());
        assert_eq!(b.to_string(), "-theta_1");
    }

    #[test]
    fn test_unicode_symbolic_angle() {
        let a: Angle = "θ".parse().unwrap();
        assert_eq!(a.symbol_name(), Some("θ"));

        let b: Angle = "-θ_2".parse().unwrap();
        assert_eq!(b, Angle::symbol("θ_2").negated());
        assert_eq!(b.to_string(), "-θ_2");
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            "nan".parse::<Angle>(),
            Err(AngleParseError::NonFinite(_))
        ));
        assert!(matches!(
            "inf".parse::<Angle>(),
            Err(AngleParseError::NonFinite(_))
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!("1.2.3".parse::<Angle>(), Err(AngleParseError::Invalid(_))));
        assert!(matches!("9abc".parse::<Angle>(), Err(AngleParseError::Invalid(_))));
        assert!(matches!("a b".parse::<Angle>(), Err(AngleParseError::Invalid(_))));
        assert!(matches!("θ+1".parse::<Angle>(), Err(AngleParseError::Invalid(_))));
        assert_eq!("  ".parse::<Angle>(), Err(AngleParseError::Empty));
    }

    #[test]
    fn test_display_round_trips_coefficient() {
        let a = Angle::from_coefficient(0.123_456_789_012_345_6);
        let back: Angle = a.to_string().parse().unwrap();
        assert_eq!(a, back);
    }
}
