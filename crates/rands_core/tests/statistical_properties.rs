//! Integration tests for the statistical behaviour of registry draws.
//!
//! These tests run every supported algorithm and width pairing through the
//! public API and check uniformity of bounded draws, the range of doubles,
//! separation of streams and seeds, and agreement between parallel and
//! sequential fills.

use approx::assert_relative_eq;
use rands_core::{Algorithm, StreamConfig, StreamError, StreamRegistry};

/// Every valid `{algorithm, result, state}` combination.
fn supported_configs(threads: usize, seed: u64) -> Vec<StreamConfig> {
    let mut configs = Vec::new();
    for algorithm in Algorithm::ALL {
        for (result_bits, state_bits) in [(64, 64), (32, 64), (32, 32)] {
            let config = StreamConfig::new(algorithm)
                .with_threads(threads)
                .with_result_bits(result_bits)
                .with_state_bits(state_bits)
                .with_seed(seed);
            if config.validate().is_ok() {
                configs.push(config);
            }
        }
    }
    configs
}

fn label(config: &StreamConfig) -> String {
    format!(
        "{} {}/{}",
        config.algorithm, config.result_bits, config.state_bits
    )
}

/// Wilson-Hilferty approximation of the chi-square quantile at `z` sigmas.
fn chi_square_critical(df: f64, z: f64) -> f64 {
    let a = 2.0 / (9.0 * df);
    df * (1.0 - a + z * a.sqrt()).powi(3)
}

fn chi_square(counts: &[u64], n: u64) -> f64 {
    let expected = n as f64 / counts.len() as f64;
    counts
        .iter()
        .map(|&c| {
            let d = c as f64 - expected;
            d * d / expected
        })
        .sum()
}

// ============================================================================
// Uniformity of bounded draws
// ============================================================================

fn check_bounded_uniformity(upper: u64, bins: usize) {
    const N: u64 = 100_000;
    let shift = if (upper as usize) > bins {
        (upper / bins as u64).trailing_zeros()
    } else {
        0
    };

    for config in supported_configs(1, 2024) {
        let name = label(&config);
        let mut registry = StreamRegistry::new(config).unwrap();
        let mut counts = vec![0u64; bins];

        for _ in 0..N {
            let v = registry.bounded(0, upper).unwrap();
            assert!(v < upper, "{}: {} >= {}", name, v, upper);
            counts[(v >> shift) as usize] += 1;
        }

        let stat = chi_square(&counts, N);
        let critical = chi_square_critical((bins - 1) as f64, 4.0);
        assert!(
            stat < critical,
            "{}: chi-square {} exceeds {} for upper {}",
            name,
            stat,
            critical,
            upper
        );
    }
}

#[test]
fn test_bounded_uniform_small_range() {
    check_bounded_uniformity(7, 7);
}

#[test]
fn test_bounded_uniform_hundred() {
    check_bounded_uniformity(100, 100);
}

#[test]
fn test_bounded_uniform_power_of_two_range() {
    // 2^20 values folded into 64 equal buckets
    check_bounded_uniformity(1 << 20, 64);
}

#[test]
fn test_uniform_double_mean_and_range() {
    const N: usize = 200_000;
    for config in supported_configs(1, 31) {
        let name = label(&config);
        let mut registry = StreamRegistry::new(config).unwrap();
        let mut buffer = vec![0.0; N];
        registry.fill_doubles(&mut buffer, 0).unwrap();

        assert!(
            buffer.iter().all(|u| (0.0..1.0).contains(u)),
            "{}: double outside [0, 1)",
            name
        );
        let mean = buffer.iter().sum::<f64>() / N as f64;
        assert_relative_eq!(mean, 0.5, epsilon = 0.01);
    }
}

// ============================================================================
// Stream and seed separation
// ============================================================================

fn positional_matches(a: &[u64], b: &[u64]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x == y).count()
}

#[test]
fn test_different_seeds_give_different_sequences() {
    const N: usize = 10_000;
    for (config_a, config_b) in supported_configs(1, 1)
        .into_iter()
        .zip(supported_configs(1, 2))
    {
        let name = label(&config_a);
        let mut a = StreamRegistry::new(config_a).unwrap();
        let mut b = StreamRegistry::new(config_b).unwrap();

        let mut xs = vec![0u64; N];
        let mut ys = vec![0u64; N];
        a.fill(&mut xs, 0).unwrap();
        b.fill(&mut ys, 0).unwrap();

        assert!(positional_matches(&xs, &ys) < 4, "{}: seeds collide", name);
    }
}

#[test]
fn test_streams_of_one_registry_differ() {
    const N: usize = 10_000;
    for config in supported_configs(4, 3) {
        let name = label(&config);
        let mut registry = StreamRegistry::new(config).unwrap();
        let mut rows = vec![vec![0u64; N]; 4];
        registry.fill_parallel(&mut rows).unwrap();

        for i in 0..4 {
            for j in (i + 1)..4 {
                assert!(
                    positional_matches(&rows[i], &rows[j]) < 4,
                    "{}: streams {} and {} collide",
                    name,
                    i,
                    j
                );
            }
        }
    }
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn test_four_thread_bounded_scenario() {
    let config = StreamConfig::new(Algorithm::Xoroshiro128Plus)
        .with_threads(4)
        .with_seed(12_345);
    let mut registry = StreamRegistry::new(config).unwrap();

    let draws: Vec<u64> = (0..1000)
        .map(|_| registry.bounded_range(0, 10, 20).unwrap())
        .collect();

    assert!(draws.iter().all(|v| (10..20).contains(v)));
    let mean = draws.iter().sum::<u64>() as f64 / draws.len() as f64;
    assert_relative_eq!(mean, 14.5, max_relative = 0.05);

    assert_eq!(
        registry.bounded_range(0, 5, 5),
        Err(StreamError::InvalidRange { lower: 5, upper: 5 })
    );
}

#[test]
fn test_parallel_fill_is_reproducible() {
    for config in supported_configs(3, 55) {
        let name = label(&config);
        let mut a = StreamRegistry::new(config.clone()).unwrap();
        let mut b = StreamRegistry::new(config).unwrap();

        let mut parallel = vec![vec![0u64; 4096]; 3];
        a.fill_parallel(&mut parallel).unwrap();

        let mut sequential = vec![vec![0u64; 4096]; 3];
        for (index, row) in sequential.iter_mut().enumerate() {
            b.fill(row, index).unwrap();
        }

        assert_eq!(parallel, sequential, "{}", name);
    }
}

#[test]
fn test_normal_samples_from_handle() {
    use rand_distr::{Distribution, Normal};

    let config = StreamConfig::new(Algorithm::Pcg).with_seed(8);
    let mut registry = StreamRegistry::new(config).unwrap();
    let normal = Normal::new(3.0, 2.0).unwrap();
    let mut handle = registry.stream(0).unwrap();

    let n = 50_000;
    let mean = (0..n).map(|_| normal.sample(&mut handle)).sum::<f64>() / n as f64;
    assert_relative_eq!(mean, 3.0, epsilon = 0.05);
}
