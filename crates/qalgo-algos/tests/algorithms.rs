//! End-to-end runs of every algorithm on the statevector simulator.

use qalgo_adapter_sim::SimulatorBackend;
use qalgo_algos::deutsch_jozsa::{self, DjVerdict, OracleType};
use qalgo_algos::{
    AlgoError, PeriodStrategy, RunConfig, ShorConfig, SimonConfig, grover, shor, simon,
};
use qalgo_hal::{Counts, HalError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ---------------------------------------------------------------------------
// Deutsch-Jozsa
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_deutsch_jozsa_classifies_every_oracle() {
    init_tracing();
    let config = RunConfig { shots: 512 };

    for n in 1..=4u32 {
        let zeros = Counts::format_bits(0, n as usize);
        for oracle_type in [OracleType::Const0, OracleType::Const1, OracleType::Balanced] {
            let backend = SimulatorBackend::with_seed(u64::from(n));
            let mut rng = StdRng::seed_from_u64(100 + u64::from(n));
            let report = deutsch_jozsa::run(&backend, oracle_type, n, &config, &mut rng)
                .await
                .unwrap();

            assert!(report.is_correct(), "n={n} {oracle_type:?}: {report:?}");
            assert_eq!(report.counts.total_shots(), 512);
            match report.verdict {
                DjVerdict::Constant => assert_eq!(report.counts.get(&zeros), 512),
                DjVerdict::Balanced => assert_eq!(report.counts.get(&zeros), 0),
            }
        }
    }
}

#[tokio::test]
async fn test_deutsch_jozsa_concurrent_runs() {
    init_tracing();
    let backend = SimulatorBackend::with_seed(9);
    let config = RunConfig::default();
    let mut rng_a = StdRng::seed_from_u64(1);
    let mut rng_b = StdRng::seed_from_u64(2);
    let mut rng_c = StdRng::seed_from_u64(3);

    let (a, b, c) = tokio::join!(
        deutsch_jozsa::run(&backend, OracleType::Const0, 3, &config, &mut rng_a),
        deutsch_jozsa::run(&backend, OracleType::Const1, 3, &config, &mut rng_b),
        deutsch_jozsa::run(&backend, OracleType::Balanced, 3, &config, &mut rng_c),
    );

    for report in [a.unwrap(), b.unwrap(), c.unwrap()] {
        assert!(report.is_correct());
        assert_eq!(report.counts.total_shots(), 1024);
    }
}

// ---------------------------------------------------------------------------
// Grover
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_grover_finds_marked_states() {
    init_tracing();
    let cases: [(u32, &[u64], u32); 4] = [
        (3, &[1, 3], 1),
        (3, &[5], 2),
        (4, &[7], 3),
        (4, &[0, 15], 2),
    ];

    for (n, marked, iterations) in cases {
        let backend = SimulatorBackend::with_seed(7);
        let report = grover::run(&backend, n, marked, &RunConfig::default())
            .await
            .unwrap();

        assert_eq!(report.iterations, iterations, "n={n} marked={marked:?}");
        assert!(
            report.success_probability >= 0.5,
            "n={n} marked={marked:?}: {}",
            report.success_probability
        );
    }
}

#[tokio::test]
async fn test_grover_two_of_eight_is_exact() {
    let backend = SimulatorBackend::with_seed(11);
    let report = grover::run(&backend, 3, &[1, 3], &RunConfig::default())
        .await
        .unwrap();

    let keys: Vec<&str> = report.counts.sorted().into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["001", "011"]);
    assert_eq!(report.success_probability, 1.0);
}

#[tokio::test]
async fn test_grover_deduplicates_marked_states() {
    let backend = SimulatorBackend::with_seed(5);
    let report = grover::run(&backend, 3, &[3, 1, 3], &RunConfig::default())
        .await
        .unwrap();

    assert_eq!(report.marked, vec![1, 3]);
    assert_eq!(report.iterations, 1);
}

// ---------------------------------------------------------------------------
// Simon
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_simon_recovers_every_secret() {
    init_tracing();
    let config = SimonConfig::default();

    for n in 2..=4usize {
        for value in 1u64..(1 << n) {
            let secret: String = (0..n)
                .map(|i| if (value >> i) & 1 == 1 { '1' } else { '0' })
                .collect();
            let backend = SimulatorBackend::with_seed(value);
            let report = simon::run(&backend, &secret, &config).await.unwrap();

            assert!(report.is_correct(), "{secret}: recovered {}", report.recovered);
            assert!(!report.equations.is_empty());
        }
    }
}

#[tokio::test]
async fn test_simon_zero_secret() {
    let backend = SimulatorBackend::with_seed(3);
    let report = simon::run(&backend, "000", &SimonConfig::default())
        .await
        .unwrap();

    assert_eq!(report.recovered, "000");
    // f is one-to-one, so every outcome appears.
    assert_eq!(report.counts.len(), 8);
    assert_eq!(report.equations.len(), 7);
}

// ---------------------------------------------------------------------------
// Shor
// ---------------------------------------------------------------------------

#[test]
fn test_shor_factors_small_semiprimes() {
    init_tracing();
    for strategy in [PeriodStrategy::Classical, PeriodStrategy::PhaseEstimation] {
        let config = ShorConfig::default().with_strategy(strategy);
        let mut rng = StdRng::seed_from_u64(2024);

        for (n, expected) in [(15, (3, 5)), (21, (3, 7)), (35, (5, 7))] {
            let result = shor::factor(n, &config, &mut rng).unwrap();
            assert_eq!(result.sorted(), expected, "{strategy:?} n={n}");
            assert!(result.attempts >= 1);
        }
    }
}

#[test]
fn test_shor_even_shortcut() {
    let mut rng = StdRng::seed_from_u64(0);
    let result = shor::factor(22, &ShorConfig::default(), &mut rng).unwrap();
    assert_eq!(result.factors, (2, 11));
    assert_eq!(result.attempts, 0);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_grover_rejects_out_of_range_state() {
    let backend = SimulatorBackend::with_seed(0);
    let err = grover::run(&backend, 3, &[8], &RunConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AlgoError::MarkedStateOutOfRange {
            state: 8,
            num_qubits: 3
        }
    ));
}

#[tokio::test]
async fn test_simon_rejects_invalid_secret() {
    let backend = SimulatorBackend::with_seed(0);
    let err = simon::run(&backend, "10z", &SimonConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AlgoError::InvalidSecret { ch: 'z', .. }));
}

#[tokio::test]
async fn test_backend_too_small_is_reported() {
    let backend = SimulatorBackend::with_max_qubits(3);
    let err = grover::run(&backend, 4, &[7], &RunConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AlgoError::Hal(HalError::InvalidCircuit(_))));
}

#[tokio::test]
async fn test_grover_at_max_width_is_rejected_by_simulator() {
    let backend = SimulatorBackend::with_seed(9);
    let err = grover::run(&backend, grover::MAX_QUBITS, &[1], &RunConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AlgoError::Hal(HalError::InvalidCircuit(_))));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn test_configs_from_json() {
    let run: RunConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(run, RunConfig::default());

    let simon: SimonConfig = serde_json::from_str(r#"{"shots": 2000}"#).unwrap();
    assert_eq!(simon.shots, 2000);

    let shor: ShorConfig =
        serde_json::from_str(r#"{"period_strategy": "phase_estimation"}"#).unwrap();
    assert_eq!(shor.period_strategy, PeriodStrategy::PhaseEstimation);
    assert_eq!(shor.max_attempts, ShorConfig::default().max_attempts);
}
