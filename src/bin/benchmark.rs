//! Performance benchmark comparing serial and parallel generation evaluation

use std::time::Instant;

use life3d::domain::{generation, patterns, Algorithm, LatticeStore, RulePreset};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Random lattice that every algorithm starts from
fn seeded_lattice(bound: i32, density: f64) -> LatticeStore {
    let mut lattice = LatticeStore::new(bound);
    let mut rng = StdRng::seed_from_u64(0x3D11FE);
    patterns::seed_random(&mut lattice, density, &mut rng);
    lattice
}

/// Average milliseconds per generation
fn benchmark(bound: i32, algorithm: Algorithm, iterations: u32) -> (f64, usize) {
    let rule = RulePreset::Dense4644.rule();
    let mut lattice = seeded_lattice(bound, 0.2);
    let tracked = lattice.tracked_count();

    let start = Instant::now();
    for _ in 0..iterations {
        generation::advance(&mut lattice, &rule, algorithm);
    }
    (start.elapsed().as_secs_f64() * 1000.0 / iterations as f64, tracked)
}

fn main() {
    println!("=== 3D Game of Life Performance Benchmark ===\n");

    let sizes = [5, 10, 20, 30, 40, 50];
    let iterations = 20;

    println!(
        "{:>10} {:>10} {:>12} {:>12} {:>10}",
        "Lattice", "Tracked", "Serial", "Parallel", "Speedup"
    );
    println!("{:-<60}", "");

    for bound in sizes {
        let (serial_ms, tracked) = benchmark(bound, Algorithm::Serial, iterations);
        let (parallel_ms, _) = benchmark(bound, Algorithm::Parallel, iterations);

        println!(
            "{:>10} {:>10} {:>12.3} {:>12.3} {:>9.1}x",
            format!("{0}x{0}x{0}", bound),
            tracked,
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms.max(f64::EPSILON)
        );
    }

    println!("\n=== Throughput at 50x50x50 ===\n");

    let (parallel_ms, tracked) = benchmark(50, Algorithm::Parallel, iterations);
    println!(
        "Parallel: {:.3} ms/gen, {:.1}M tracked cells/sec",
        parallel_ms,
        tracked as f64 / (parallel_ms / 1000.0) / 1_000_000.0
    );
}
