//! Check command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use pauliq_core::{BatchReport, discover_pairs, run_batch};

use super::common::{ConfigOverrides, OutputFormat};

/// Execute the check command.
pub fn execute(
    dir: &Path,
    prefix: Option<&str>,
    format: OutputFormat,
    parallel: bool,
    overrides: &ConfigOverrides,
) -> Result<()> {
    let config = overrides.resolve()?;
    let pairs = discover_pairs(dir, prefix, &config)?;

    if pairs.is_empty() {
        anyhow::bail!(
            "No '.{}' files found in {}",
            config.extension,
            dir.display()
        );
    }

    let report = match format {
        OutputFormat::Text => {
            println!(
                "{} Checking {} circuit(s) in {}{}",
                style("→").cyan().bold(),
                pairs.len(),
                style(dir.display()).green(),
                if parallel { " (parallel)" } else { "" }
            );

            let progress = ProgressBar::with_draw_target(
                Some(pairs.len() as u64),
                ProgressDrawTarget::stderr(),
            );
            progress.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                    )?
                    .progress_chars("#>-"),
            );
            let report = run_batch(&pairs, &config, parallel, |_| progress.inc(1));
            progress.finish_and_clear();

            print_report(&report);
            report
        }
        OutputFormat::Json => {
            let report = run_batch(&pairs, &config, parallel, |_| {});
            println!("{}", serde_json::to_string_pretty(&report.summary())?);
            report
        }
    };

    if !report.all_passed() {
        anyhow::bail!(
            "{} of {} pair(s) not equivalent, {} could not be checked",
            report.failed(),
            report.outcomes.len(),
            report.errored()
        );
    }
    Ok(())
}

fn print_report(report: &BatchReport) {
    for outcome in &report.outcomes {
        let name = outcome.pair.circuit.display();
        match &outcome.result {
            Ok(r) if r.equivalent => println!("{name}: {}", style("true").green()),
            Ok(_) => println!("{name}: {}", style("false").red().bold()),
            Err(e) => println!("{name}: {} {e}", style("error:").red()),
        }
    }

    println!();
    println!(
        "{} {} passed, {} failed, {} errored",
        style("Summary:").bold(),
        style(report.passed()).green(),
        style(report.failed()).red(),
        style(report.errored()).yellow()
    );
}
