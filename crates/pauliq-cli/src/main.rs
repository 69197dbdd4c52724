//! pauliq Command-Line Interface
//!
//! Checks that reordered Pauli-gadget circuits still prepare the same state
//! as their reference ordering, up to global phase.
//!
//! ```text
//! pauliq check data/ --prefix circuit
//! pauliq compare circuit1.exp circuit1.exp.order
//! pauliq simulate circuit1.exp --format json
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::{ConfigOverrides, OutputFormat};
use commands::{check, compare, simulate, version};

/// pauliq - equivalence checking for Pauli-gadget circuits
#[derive(Parser)]
#[command(name = "pauliq")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Equivalence tolerance on 1 - |<v1|v2>|
    #[arg(long, global = true)]
    tolerance: Option<f64>,

    /// Largest register to simulate
    #[arg(long, global = true)]
    max_qubits: Option<usize>,

    /// Handling of short Pauli strings (identity, reject)
    #[arg(long, global = true)]
    padding: Option<String>,

    /// Simulate every circuit on exactly this many qubits
    #[arg(long, global = true)]
    width: Option<usize>,

    /// Suffix naming the reference file of a circuit
    #[arg(long, global = true)]
    order_suffix: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every circuit in a directory against its reference ordering
    Check {
        /// Directory holding circuit and reference files
        dir: PathBuf,

        /// Only check circuit files whose name starts with this prefix
        #[arg(short, long)]
        prefix: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Check pairs on all cores
        #[arg(long)]
        parallel: bool,
    },

    /// Compare two gadget files
    Compare {
        /// Rewritten circuit
        circuit: PathBuf,

        /// Reference ordering
        reference: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Simulate a gadget file and print the final amplitudes
    Simulate {
        /// Gadget file
        file: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let overrides = ConfigOverrides {
        config: cli.config,
        tolerance: cli.tolerance,
        max_qubits: cli.max_qubits,
        padding: cli.padding,
        width: cli.width,
        order_suffix: cli.order_suffix,
    };

    // Execute command
    let result = match cli.command {
        Commands::Check {
            dir,
            prefix,
            format,
            parallel,
        } => OutputFormat::parse(&format)
            .and_then(|f| check::execute(&dir, prefix.as_deref(), f, parallel, &overrides)),

        Commands::Compare {
            circuit,
            reference,
            format,
        } => OutputFormat::parse(&format)
            .and_then(|f| compare::execute(&circuit, &reference, f, &overrides)),

        Commands::Simulate { file, format } => {
            OutputFormat::parse(&format).and_then(|f| simulate::execute(&file, f, &overrides))
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
