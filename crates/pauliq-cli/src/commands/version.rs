//! Version command: build version plus the built-in defaults and limits.
//!
//! Only compiled-in values are shown, so a broken configuration file never
//! stops `pauliq version` from answering.

use console::style;
use pauliq_core::{CheckerConfig, MAX_MASK_QUBITS, MAX_SUPPORTED_QUBITS, NORM_TOLERANCE};

/// Rows of `(label, value)` describing this build.
fn build_facts(config: &CheckerConfig) -> Vec<(&'static str, String)> {
    vec![
        ("gadget line", "<angle>;<pauli>  (angle in units of pi)".to_string()),
        ("tolerance", format!("{:e}", config.tolerance)),
        ("max qubits", config.max_qubits.to_string()),
        ("qubit ceiling", MAX_SUPPORTED_QUBITS.to_string()),
        ("mask width", MAX_MASK_QUBITS.to_string()),
        ("norm slack", format!("{NORM_TOLERANCE:e}")),
        ("padding", config.padding.to_string()),
        (
            "circuit files",
            format!("*.{} paired with *.{}{}", config.extension, config.extension, config.order_suffix),
        ),
    ]
}

/// Execute the version command.
pub fn execute() {
    println!(
        "{} {}",
        style("pauliq").cyan().bold(),
        style(env!("CARGO_PKG_VERSION")).yellow()
    );
    for (label, value) in build_facts(&CheckerConfig::default()) {
        println!("  {:<14} {}", style(label).dim(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_facts_follow_config() {
        let config = CheckerConfig {
            max_qubits: 12,
            order_suffix: ".ref".to_string(),
            ..CheckerConfig::default()
        };
        let facts = build_facts(&config);
        let get = |k: &str| facts.iter().find(|(l, _)| *l == k).map(|(_, v)| v.as_str());

        assert_eq!(get("max qubits"), Some("12"));
        assert_eq!(get("qubit ceiling"), Some("30"));
        assert_eq!(get("tolerance"), Some("1e-10"));
        assert_eq!(get("circuit files"), Some("*.exp paired with *.exp.ref"));
    }
}
