//! Simulate command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;
use serde::Serialize;

use pauliq_core::{Statevector, read_gadget_file, simulate};

use super::common::{ConfigOverrides, OutputFormat};

/// Amplitudes below this magnitude are omitted from text output.
const PRINT_THRESHOLD: f64 = 1e-12;

#[derive(Serialize)]
struct SimulateOutput<'a> {
    file: &'a Path,
    num_gadgets: usize,
    norm: f64,
    state: &'a Statevector,
}

/// Execute the simulate command.
pub fn execute(file: &Path, format: OutputFormat, overrides: &ConfigOverrides) -> Result<()> {
    let config = overrides.resolve()?;
    let sequence = read_gadget_file(file, config.padding)?;
    let state = simulate(&sequence, &config).map_err(|e| e.in_file(file))?;

    match format {
        OutputFormat::Text => {
            println!(
                "{} Simulated {} ({} gadgets, {} qubits)",
                style("→").cyan().bold(),
                style(file.display()).green(),
                sequence.len(),
                state.num_qubits()
            );
            let width = state.num_qubits().max(1);
            for (index, amp) in state.amplitudes().iter().enumerate() {
                if amp.norm() < PRINT_THRESHOLD {
                    continue;
                }
                println!(
                    "  |{index:0width$b}⟩  {:+.12} {:+.12}i",
                    amp.re, amp.im
                );
            }
            println!("  norm: {:.15}", state.norm());
        }
        OutputFormat::Json => {
            let output = SimulateOutput {
                file,
                num_gadgets: sequence.len(),
                norm: state.norm(),
                state: &state,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
