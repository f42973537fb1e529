// tests/algorithm_tests.rs

use qalgos::algorithms::{
    BernsteinVazirani, DeutschJozsa, DeutschJozsaOracle, GroverOutcome, GroverSearch, ShorFactoring, Simon, SimonOutcome, Verdict,
    bell_pair, iterations_for,
};
use qalgos::{Backend, Circuit, Histogram, LocalBackend, MemoryReporter, QuantumError, ReportSink, RunConfig, Simulator};
use rand::RngCore;

/// A remote backend that is never reachable.
struct OfflineBackend;

impl Backend for OfflineBackend {
    fn name(&self) -> &str {
        "offline"
    }

    fn execute(&mut self, _: &Circuit, _: usize, _: &mut dyn RngCore) -> Result<Histogram, QuantumError> {
        Err(QuantumError::Backend { backend: "offline".into(), message: "queue unreachable".into() })
    }
}

/// Accepts every job and returns no counts.
struct SilentBackend;

impl Backend for SilentBackend {
    fn name(&self) -> &str {
        "silent"
    }

    fn execute(&mut self, circuit: &Circuit, _: usize, _: &mut dyn RngCore) -> Result<Histogram, QuantumError> {
        Ok(Histogram::new(circuit.num_clbits()))
    }
}

/// Counts executions and forwards to the local simulator.
#[derive(Default)]
struct CountingBackend {
    inner: LocalBackend,
    executions: usize,
}

impl Backend for CountingBackend {
    fn name(&self) -> &str {
        "counting"
    }

    fn execute(&mut self, circuit: &Circuit, shots: usize, rng: &mut dyn RngCore) -> Result<Histogram, QuantumError> {
        self.executions += 1;
        self.inner.execute(circuit, shots, rng)
    }
}

#[test]
fn test_deutsch_jozsa_zero_outcome_probabilities() -> Result<(), QuantumError> {
    let simulator = Simulator::new();
    for n in 1..=5 {
        let constant = DeutschJozsa::new(n, DeutschJozsaOracle::Constant(true))?;
        let p = simulator.probabilities(&constant.circuit()?)?;
        assert!((p.get(&0u64).copied().unwrap_or(0.0) - 1.0).abs() < 1e-9);

        let balanced = DeutschJozsa::new(n, DeutschJozsaOracle::Balanced { mask: 1, pattern: 0 })?;
        let p = simulator.probabilities(&balanced.circuit()?)?;
        assert!(p.get(&0u64).copied().unwrap_or(0.0) < 1e-9);
    }
    Ok(())
}

#[test]
fn test_deutsch_jozsa_run_reports_verdict() -> Result<(), QuantumError> {
    let config = RunConfig::default().with_shots(50);
    let dj = DeutschJozsa::new(4, DeutschJozsaOracle::Balanced { mask: 0b1001, pattern: 0b0001 })?;
    let outcome = dj.run(&mut LocalBackend::new(), config.shots, &mut config.rng())?;
    assert_eq!(outcome.verdict, Verdict::Balanced);
    assert!(outcome.correct);
    Ok(())
}

#[test]
fn test_bernstein_vazirani_recovers_every_secret() -> Result<(), QuantumError> {
    let simulator = Simulator::new();
    for n in 1..=8usize {
        for secret in 0..1u64 << n {
            let circuit = BernsteinVazirani::new(n, secret)?.circuit()?;
            let probabilities = simulator.probabilities(&circuit)?;
            assert_eq!(probabilities.len(), 1, "n = {}, secret = {:b}", n, secret);
            assert!((probabilities[&secret] - 1.0).abs() < 1e-9);
        }
    }
    Ok(())
}

#[test]
fn test_grover_single_solution_in_sixteen_states() -> Result<(), QuantumError> {
    assert_eq!(iterations_for(4, Some(1)), 3);
    let config = RunConfig::default().with_seed(99);
    for solution in [0u64, 6, 15] {
        let search = GroverSearch::new(4, vec![solution])?;
        let probabilities = Simulator::new().probabilities(&search.circuit()?)?;
        assert!(probabilities[&solution] > 0.9, "solution {:04b}", solution);

        let outcome = search.run(&mut LocalBackend::new(), config.shots, &mut config.rng())?;
        assert!(outcome.is_found(), "{}", outcome);
    }
    Ok(())
}

#[test]
fn test_grover_iteration_count_uses_known_solutions() -> Result<(), QuantumError> {
    let search = GroverSearch::new(4, vec![1, 9])?;
    assert_eq!(search.iterations(), 2);
    let probabilities = Simulator::new().probabilities(&search.circuit()?)?;
    assert!(probabilities[&1u64] + probabilities[&9u64] > 0.9);

    let blind = search.known_count(false);
    assert_eq!(blind.iterations(), 3);
    Ok(())
}

#[test]
fn test_simon_recovers_110() -> Result<(), QuantumError> {
    let config = RunConfig::default().with_shots(64).with_seed(3);
    let outcome = Simon::new(3, 0b110)?.run(&mut LocalBackend::new(), config.shots, &mut config.rng())?;
    match outcome {
        SimonOutcome::Recovered { secret, correct, histogram, .. } => {
            assert_eq!(secret, 0b110);
            assert!(correct);
            assert_eq!(histogram.bitstring(secret), "110");
        }
        other => panic!("expected recovery, got {}", other),
    }
    Ok(())
}

#[test]
fn test_simon_zero_secret_differs_from_unresolved() -> Result<(), QuantumError> {
    let config = RunConfig::default().with_shots(64).with_seed(8);
    let zero = Simon::new(3, 0)?.run(&mut LocalBackend::new(), config.shots, &mut config.rng())?;
    assert_eq!(zero.secret(), Some(0));

    let starved = Simon::new(3, 0b110)?.with_max_runs(2)?.run(&mut LocalBackend::new(), 1, &mut config.rng())?;
    match starved {
        SimonOutcome::Unresolved { independent, required, runs, .. } => {
            assert!(independent < required);
            assert_eq!(runs, 2);
        }
        // Two single shots can be lucky; then the answer must be right.
        SimonOutcome::Recovered { secret, .. } => assert_eq!(secret, 0b110),
    }
    Ok(())
}

#[test]
fn test_simon_confirmation_run_is_counted() -> Result<(), QuantumError> {
    let mut backend = CountingBackend::default();
    let config = RunConfig::default().with_shots(200);
    let outcome = Simon::new(2, 0b11)?.run(&mut backend, config.shots, &mut config.rng())?;
    assert_eq!(outcome.secret(), Some(0b11));
    // One run reaches rank 1; one more confirms nothing new appears.
    assert_eq!(backend.executions, 2);
    Ok(())
}

#[test]
fn test_shor_factors_fifteen_with_base_two() -> Result<(), QuantumError> {
    let config = RunConfig::default();
    let shor = ShorFactoring::new(15)?.with_base(2)?;
    let outcome = shor.run(&mut LocalBackend::new(), config.shots, &mut config.rng())?;
    assert_eq!(outcome.period(), Some(4));
    assert_eq!(outcome.factors(), Some((3, 5)));
    Ok(())
}

#[test]
fn test_shor_random_semiprime_always_factors() -> Result<(), QuantumError> {
    let config = RunConfig::default().with_shots(100).with_seed(21);
    let mut rng = config.rng();
    for _ in 0..3 {
        let shor = ShorFactoring::random(&mut rng)?;
        let outcome = shor.run(&mut LocalBackend::new(), config.shots, &mut rng)?;
        let (p, q) = outcome.factors().expect("small semiprimes always factor");
        assert_eq!(p * q, shor.modulus());
        assert!(p > 1 && q > 1);
    }
    Ok(())
}

#[test]
fn test_backend_failures_are_errors_not_outcomes() -> Result<(), QuantumError> {
    let config = RunConfig::default();
    let mut rng = config.rng();
    let mut offline = OfflineBackend;

    let errors = vec![
        DeutschJozsa::new(2, DeutschJozsaOracle::Constant(false))?.run(&mut offline, 10, &mut rng).map(|_| ()),
        BernsteinVazirani::new(2, 1)?.run(&mut offline, 10, &mut rng).map(|_| ()),
        GroverSearch::new(2, vec![3])?.run(&mut offline, 10, &mut rng).map(|_| ()),
        Simon::new(2, 1)?.run(&mut offline, 10, &mut rng).map(|_| ()),
        ShorFactoring::new(15)?.with_base(7)?.run(&mut offline, 10, &mut rng).map(|_| ()),
        bell_pair(&mut offline, 10, &mut rng).map(|_| ()),
    ];
    for result in errors {
        assert!(matches!(result, Err(QuantumError::Backend { .. })));
    }
    Ok(())
}

#[test]
fn test_empty_histograms_never_yield_confident_answers() -> Result<(), QuantumError> {
    let config = RunConfig::default();
    let mut rng = config.rng();
    let mut silent = SilentBackend;

    let dj = DeutschJozsa::new(3, DeutschJozsaOracle::Constant(false))?.run(&mut silent, 10, &mut rng)?;
    assert_eq!(dj.verdict, Verdict::Inconclusive);
    assert!(!dj.correct);

    // Outcome 0 is a real solution here; an empty histogram must not report it.
    let grover = GroverSearch::new(3, vec![0])?.run(&mut silent, 10, &mut rng)?;
    assert!(matches!(grover, GroverOutcome::NoOutcomes { .. }));
    assert!(!grover.is_found());

    let bv = BernsteinVazirani::new(3, 0)?.run(&mut silent, 10, &mut rng)?;
    assert_eq!(bv.recovered, None);
    assert!(!bv.correct);
    Ok(())
}

#[test]
fn test_reports_reach_the_sink() -> Result<(), QuantumError> {
    let config = RunConfig::default().with_shots(40);
    let mut sink = MemoryReporter::new();
    let bv = BernsteinVazirani::new(3, 0b101)?;
    let outcome = bv.run(&mut LocalBackend::new(), config.shots, &mut config.rng())?;
    sink.report("bernstein-vazirani", &outcome.histogram, &outcome);

    let bell = bell_pair(&mut LocalBackend::new(), config.shots, &mut config.rng())?;
    sink.report("bell", &bell.histogram, &bell);

    assert_eq!(sink.entries().len(), 2);
    assert_eq!(sink.entries()[0].interpretation, "recovered secret 101 (correct)");
    assert_eq!(sink.entries()[1].histogram.shots(), 40);
    Ok(())
}
