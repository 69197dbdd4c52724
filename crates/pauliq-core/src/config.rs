//! Checker configuration.
//!
//! Values are resolved with the following precedence (highest first):
//! 1. Explicit overrides applied by the caller (CLI flags)
//! 2. Environment variables (`PAULIQ_` prefix)
//! 3. YAML configuration file
//! 4. Defaults

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PauliqError, PauliqResult};
use crate::gadget::PaddingPolicy;

/// Hard ceiling on simulated qubits (2^30 amplitudes, 16 GiB).
pub const MAX_SUPPORTED_QUBITS: usize = 30;

/// Settings shared by parsing, simulation and comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Largest `1 − |⟨v1|v2⟩|` still reported as equivalent.
    pub tolerance: f64,

    /// Qubit cap applied before any statevector is allocated.
    pub max_qubits: usize,

    /// Handling of gadgets shorter than their circuit.
    pub padding: PaddingPolicy,

    /// Simulate every circuit on exactly this many qubits.
    pub register_width: Option<usize>,

    /// Suffix appended to a circuit file's name to find its reference.
    pub order_suffix: String,

    /// Extension (without dot) of circuit files during discovery.
    pub extension: String,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_qubits: default_max_qubits(),
            padding: PaddingPolicy::default(),
            register_width: None,
            order_suffix: ".order".to_string(),
            extension: "exp".to_string(),
        }
    }
}

fn default_tolerance() -> f64 {
    1e-10
}

fn default_max_qubits() -> usize {
    20
}

impl CheckerConfig {
    /// Load a YAML configuration file. Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> PauliqResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| PauliqError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: CheckerConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| PauliqError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration: file (if any), then environment overrides.
    pub fn load(config_file: Option<&Path>) -> PauliqResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.merge_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `PAULIQ_*` environment variables that are set.
    ///
    /// Unlike unset variables, a set variable that fails to parse is an error.
    pub fn merge_env(self) -> PauliqResult<Self> {
        self.merge_from(|key| std::env::var(key).ok())
    }

    fn merge_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> PauliqResult<Self> {
        fn parsed<T: std::str::FromStr>(key: &str, value: &str) -> PauliqResult<T> {
            value
                .trim()
                .parse()
                .map_err(|_| PauliqError::Config(format!("{key}: cannot parse '{value}'")))
        }

        if let Some(v) = lookup("PAULIQ_TOLERANCE") {
            self.tolerance = parsed("PAULIQ_TOLERANCE", &v)?;
        }
        if let Some(v) = lookup("PAULIQ_MAX_QUBITS") {
            self.max_qubits = parsed("PAULIQ_MAX_QUBITS", &v)?;
        }
        if let Some(v) = lookup("PAULIQ_PADDING") {
            self.padding = v.parse().map_err(PauliqError::Config)?;
        }
        if let Some(v) = lookup("PAULIQ_REGISTER_WIDTH") {
            self.register_width = if v.trim().is_empty() {
                None
            } else {
                Some(parsed("PAULIQ_REGISTER_WIDTH", &v)?)
            };
        }
        if let Some(v) = lookup("PAULIQ_ORDER_SUFFIX") {
            self.order_suffix = v;
        }
        if let Some(v) = lookup("PAULIQ_EXTENSION") {
            self.extension = v.trim_start_matches('.').to_string();
        }
        Ok(self)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> PauliqResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(PauliqError::Config(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_qubits == 0 || self.max_qubits > MAX_SUPPORTED_QUBITS {
            return Err(PauliqError::Config(format!(
                "max_qubits must be between 1 and {MAX_SUPPORTED_QUBITS}, got {}",
                self.max_qubits
            )));
        }
        if let Some(width) = self.register_width {
            if width == 0 || width > self.max_qubits {
                return Err(PauliqError::Config(format!(
                    "register_width must be between 1 and max_qubits ({}), got {width}",
                    self.max_qubits
                )));
            }
        }
        if self.order_suffix.is_empty() {
            return Err(PauliqError::Config(
                "order_suffix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
