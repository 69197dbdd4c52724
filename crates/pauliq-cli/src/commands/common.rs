//! Shared helpers for CLI commands.

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use pauliq_core::{CheckerConfig, EquivalenceResult, PaddingPolicy};

/// Output format of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Parse a `--format` value.
    pub fn parse(format: &str) -> Result<Self> {
        match format.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("Unknown format: '{other}'. Available: text, json"),
        }
    }
}

/// Configuration settings given on the command line.
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    pub config: Option<PathBuf>,
    pub tolerance: Option<f64>,
    pub max_qubits: Option<usize>,
    pub padding: Option<String>,
    pub width: Option<usize>,
    pub order_suffix: Option<String>,
}

impl ConfigOverrides {
    /// Build the effective configuration: file, then environment, then flags.
    pub fn resolve(&self) -> Result<CheckerConfig> {
        let mut config = CheckerConfig::load(self.config.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?;

        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }
        if let Some(max_qubits) = self.max_qubits {
            config.max_qubits = max_qubits;
        }
        if let Some(padding) = &self.padding {
            config.padding = padding
                .parse::<PaddingPolicy>()
                .map_err(|e| anyhow::anyhow!(e))?;
        }
        if let Some(width) = self.width {
            config.register_width = Some(width);
        }
        if let Some(suffix) = &self.order_suffix {
            config.order_suffix.clone_from(suffix);
        }

        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;
        tracing::debug!(?config, "resolved configuration");
        Ok(config)
    }
}

/// Print one comparison result as text.
pub fn print_equivalence(label: &str, result: &EquivalenceResult) {
    let verdict = if result.equivalent {
        style("true").green().bold()
    } else {
        style("false").red().bold()
    };
    println!("{label}: {verdict}");
    println!("  distance:     {:.3e}", result.distance);
    println!("  fidelity:     {:.12}", result.fidelity);
    println!("  global phase: {:.6} rad", result.global_phase);
}
