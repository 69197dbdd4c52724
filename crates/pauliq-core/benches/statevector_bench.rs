//! Benchmarks for gadget simulation
//!
//! Run with: cargo bench -p pauliq-core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use num_complex::Complex64;
use pauliq_core::{
    Angle, CheckerConfig, EquivalenceChecker, Gadget, GadgetSequence, PauliOperator, simulate,
};

/// A sequence of `len` gadgets cycling through X, Y and Z heavy strings.
fn sequence(num_qubits: usize, len: usize) -> GadgetSequence {
    let gadgets = (0..len)
        .map(|i| {
            let letters: String = (0..num_qubits)
                .map(|q| ['I', 'X', 'Y', 'Z'][(i + q) % 4])
                .collect();
            Gadget::new(
                Angle::from_coefficient(0.01 * i as f64),
                letters.parse::<PauliOperator>().unwrap(),
            )
        })
        .collect();
    GadgetSequence::from_gadgets(gadgets).unwrap()
}

/// Benchmark a single rotation on the raw amplitude array
fn bench_rotation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotation");

    for num_qubits in &[4, 8, 12, 16] {
        let n = *num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << n];
        amplitudes[0] = Complex64::new(1.0, 0.0);

        let xy: PauliOperator = "XY".repeat(n / 2).parse().unwrap();
        group.bench_with_input(BenchmarkId::new("xy", n), &n, |b, _| {
            b.iter(|| xy.rotate(black_box(&mut amplitudes), black_box(0.3)));
        });

        let zz: PauliOperator = "Z".repeat(n).parse().unwrap();
        group.bench_with_input(BenchmarkId::new("diagonal", n), &n, |b, _| {
            b.iter(|| zz.rotate(black_box(&mut amplitudes), black_box(0.3)));
        });
    }

    group.finish();
}

/// Benchmark simulating a whole sequence from |0…0⟩
fn bench_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");
    let config = CheckerConfig::default();

    for num_qubits in &[4, 8, 12] {
        let seq = sequence(*num_qubits, 64);
        group.bench_with_input(BenchmarkId::new("64_gadgets", num_qubits), &seq, |b, seq| {
            b.iter(|| simulate(black_box(seq), &config).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the overlap-based comparison
fn bench_equivalence(c: &mut Criterion) {
    let mut group = c.benchmark_group("equivalence");
    let config = CheckerConfig::default();
    let checker = EquivalenceChecker::new(config.tolerance);

    for num_qubits in &[8, 12, 16] {
        let v = simulate(&sequence(*num_qubits, 8), &config).unwrap();
        group.bench_with_input(BenchmarkId::new("check", num_qubits), &v, |b, v| {
            b.iter(|| checker.check(black_box(v), black_box(v)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rotation, bench_simulate, bench_equivalence);
criterion_main!(benches);
