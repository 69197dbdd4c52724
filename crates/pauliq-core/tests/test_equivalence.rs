//! End-to-end equivalence tests: parse, simulate, compare.

use num_complex::Complex64;
use pauliq_core::config::CheckerConfig;
use pauliq_core::equivalence::{EquivalenceChecker, EquivalenceResult};
use pauliq_core::error::PauliqError;
use pauliq_core::gadget::PaddingPolicy;
use pauliq_core::parser::parse_str;
use pauliq_core::statevector::{Statevector, simulate};

fn compare(a: &str, b: &str) -> Result<EquivalenceResult, PauliqError> {
    let config = CheckerConfig::default();
    let va = simulate(&parse_str(a, config.padding)?, &config)?;
    let vb = simulate(&parse_str(b, config.padding)?, &config)?;
    EquivalenceChecker::new(config.tolerance).check(&va, &vb)
}

// ---------------------------------------------------------------------------
// Equivalent pairs
// ---------------------------------------------------------------------------

#[test]
fn test_circuit_equivalent_to_itself() {
    let source = "0.31;XYZ\n-0.7;ZZI\n0.05;IYX\n";
    let r = compare(source, source).unwrap();
    assert!(r.equivalent);
    assert!(r.distance.abs() < 1e-12);
    assert!((r.fidelity - 1.0).abs() < 1e-12);
}

#[test]
fn test_same_pauli_reorder_is_equivalent() {
    let r = compare("0.2;XY\n0.4;ZZ\n0.3;XY\n", "0.3;XY\n0.2;XY\n0.4;ZZ\n").unwrap();
    assert!(r.equivalent);
}

#[test]
fn test_commuting_reorder_is_equivalent() {
    // XX and ZZ commute.
    let r = compare("0.3;XX\n0.6;ZZ\n", "0.6;ZZ\n0.3;XX\n").unwrap();
    assert!(r.equivalent);
}

#[test]
fn test_global_phase_from_identity_gadget_is_ignored() {
    let r = compare("0.25;XZ\n0.5;II\n", "0.25;XZ\n").unwrap();
    assert!(r.equivalent);
    assert!(r.global_phase.abs() > 0.1);
}

#[test]
fn test_merged_angles_are_equivalent() {
    let r = compare("0.2;YX\n0.3;YX\n", "0.5;YX\n").unwrap();
    assert!(r.equivalent);
}

// ---------------------------------------------------------------------------
// Non-equivalent pairs
// ---------------------------------------------------------------------------

#[test]
fn test_anticommuting_reorder_is_detected() {
    let r = compare("0.25;X\n0.25;Z\n", "0.25;Z\n0.25;X\n").unwrap();
    assert!(!r.equivalent);
    assert!(r.distance > 1e-3);
}

#[test]
fn test_different_angle_is_detected() {
    let r = compare("0.25;XY\n", "0.26;XY\n").unwrap();
    assert!(!r.equivalent);
}

#[test]
fn test_unnormalized_states_cannot_be_compared() {
    let amps = |v: &[f64]| v.iter().map(|&re| Complex64::new(re, 0.0)).collect::<Vec<_>>();
    assert!(Statevector::from_amplitudes(amps(&[1.0, 1.0])).is_err());
    assert!(Statevector::from_amplitudes(amps(&[2.0, 0.0])).is_err());

    let h = std::f64::consts::FRAC_1_SQRT_2;
    let zero = Statevector::from_amplitudes(amps(&[1.0, 0.0])).unwrap();
    let plus = Statevector::from_amplitudes(amps(&[h, h])).unwrap();
    let r = EquivalenceChecker::new(1e-10).check(&zero, &plus).unwrap();
    assert!(!r.equivalent);
    assert!(r.distance > 0.25);
}

#[test]
fn test_qubit_count_mismatch() {
    let err = compare("0.1;XX\n", "0.1;XXX\n").unwrap_err();
    assert!(matches!(
        err,
        PauliqError::DimensionMismatch { left: 2, right: 3 }
    ));
}

#[test]
fn test_register_width_aligns_mismatched_files() {
    let config = CheckerConfig {
        register_width: Some(3),
        ..CheckerConfig::default()
    };
    let va = simulate(&parse_str("0.1;XX\n", PaddingPolicy::Identity).unwrap(), &config).unwrap();
    let vb = simulate(&parse_str("0.1;XXI\n", PaddingPolicy::Identity).unwrap(), &config).unwrap();
    assert!(EquivalenceChecker::new(1e-10).check(&va, &vb).unwrap().equivalent);
}

#[test]
fn test_tolerance_is_inclusive_bound() {
    let r = compare("0.25;XY\n", "0.26;XY\n").unwrap();
    let loose = CheckerConfig::default();
    let config = CheckerConfig {
        tolerance: r.distance,
        ..loose
    };
    let va = simulate(&parse_str("0.25;XY\n", config.padding).unwrap(), &config).unwrap();
    let vb = simulate(&parse_str("0.26;XY\n", config.padding).unwrap(), &config).unwrap();
    assert!(EquivalenceChecker::new(config.tolerance).check(&va, &vb).unwrap().equivalent);
}
