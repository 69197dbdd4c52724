//! Compare command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;
use serde::Serialize;

use pauliq_core::{CircuitPair, EquivalenceResult, check_pair};

use super::common::{ConfigOverrides, OutputFormat, print_equivalence};

#[derive(Serialize)]
struct CompareOutput<'a> {
    pair: &'a CircuitPair,
    #[serde(flatten)]
    result: &'a EquivalenceResult,
}

/// Execute the compare command.
pub fn execute(
    circuit: &Path,
    reference: &Path,
    format: OutputFormat,
    overrides: &ConfigOverrides,
) -> Result<()> {
    let config = overrides.resolve()?;
    let pair = CircuitPair {
        circuit: circuit.to_path_buf(),
        reference: reference.to_path_buf(),
    };

    if format == OutputFormat::Text {
        println!(
            "{} Comparing {} against {}",
            style("→").cyan().bold(),
            style(circuit.display()).green(),
            style(reference.display()).green()
        );
    }

    let outcome = check_pair(&pair, &config);
    let result = outcome.result?;

    match format {
        OutputFormat::Text => print_equivalence(&circuit.display().to_string(), &result),
        OutputFormat::Json => {
            let output = CompareOutput {
                pair: &pair,
                result: &result,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    if !result.equivalent {
        anyhow::bail!(
            "circuits are not equivalent (distance {:.3e} > tolerance {:.1e})",
            result.distance,
            config.tolerance
        );
    }
    Ok(())
}
