// src/algorithms/grover.rs

//! Grover search with a phase-kickback oracle.
//!
//! Layout: data qubits `0..n`, ancilla `n` prepared in |->. The oracle flips
//! the ancilla for every marked input, which turns into a -1 phase on that
//! input. The diffuser acts on the data register only.

use super::{check_secret, execute, set_bits};
use crate::backend::Backend;
use crate::circuits::Circuit;
use crate::config::GROVER_BOUNDS;
use crate::core::{QuantumError, Result};
use crate::simulation::{Histogram, format_bits};
use rand::{Rng, RngCore};
use rand::seq::index;
use std::f64::consts::FRAC_PI_4;
use std::fmt;
use tracing::{debug, info, warn};

/// Upper bound on the number of marked states drawn by [`GroverSearch::random`].
pub const MAX_RANDOM_SOLUTIONS: usize = 3;

/// `floor(pi/4 * sqrt(2^n / k))`, or `floor(pi/4 * sqrt(2^n))` when the
/// number of solutions is unknown.
///
/// Very large registers saturate at `usize::MAX` instead of overflowing.
pub fn iterations_for(num_qubits: usize, solutions: Option<usize>) -> usize {
    let space = 2f64.powi(num_qubits.min(i32::MAX as usize) as i32);
    let ratio = match solutions {
        Some(k) if k > 0 => space / k as f64,
        _ => space,
    };
    (FRAC_PI_4 * ratio.sqrt()).floor() as usize
}

#[derive(Debug, Clone, PartialEq)]
pub enum GroverOutcome {
    /// The most frequent outcome is marked.
    Found { solution: u64, iterations: usize, histogram: Histogram },
    /// The most frequent outcome is not marked.
    NotASolution { candidate: u64, iterations: usize, histogram: Histogram },
    /// The backend returned no outcomes, so there is no candidate to check.
    NoOutcomes { iterations: usize, histogram: Histogram },
}

impl GroverOutcome {
    /// Histogram the outcome was read from.
    pub fn histogram(&self) -> &Histogram {
        match self {
            GroverOutcome::Found { histogram, .. }
            | GroverOutcome::NotASolution { histogram, .. }
            | GroverOutcome::NoOutcomes { histogram, .. } => histogram,
        }
    }

    /// `true` only for [`GroverOutcome::Found`].
    pub fn is_found(&self) -> bool {
        matches!(self, GroverOutcome::Found { .. })
    }
}

impl fmt::Display for GroverOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroverOutcome::Found { solution, iterations, histogram } => write!(
                f,
                "found solution {} after {} iterations",
                format_bits(*solution, histogram.num_bits()),
                iterations
            ),
            GroverOutcome::NotASolution { candidate, iterations, histogram } => write!(
                f,
                "most frequent outcome {} after {} iterations is not a solution",
                format_bits(*candidate, histogram.num_bits()),
                iterations
            ),
            GroverOutcome::NoOutcomes { iterations, .. } => {
                write!(f, "no outcomes returned after {} iterations", iterations)
            }
        }
    }
}

/// Search over `2^num_qubits` inputs for a set of marked states.
#[derive(Debug, Clone, PartialEq)]
pub struct GroverSearch {
    num_qubits: usize,
    solutions: Vec<u64>,
    known_count: bool,
}

impl GroverSearch {
    /// `solutions` must be non-empty, distinct and below `2^num_qubits`.
    pub fn new(num_qubits: usize, solutions: Vec<u64>) -> Result<Self> {
        GROVER_BOUNDS.check(num_qubits, "Grover search width")?;
        if solutions.is_empty() {
            return Err(QuantumError::invalid_parameter("Grover search needs at least one solution"));
        }
        for (i, s) in solutions.iter().enumerate() {
            check_secret(*s, num_qubits, "solution")?;
            if solutions[..i].contains(s) {
                return Err(QuantumError::invalid_parameter(format!(
                    "solution {} is listed twice",
                    format_bits(*s, num_qubits)
                )));
            }
        }
        Ok(Self { num_qubits, solutions, known_count: true })
    }

    /// Draws between 1 and 3 distinct solutions, never more than half the
    /// search space.
    pub fn random(num_qubits: usize, rng: &mut dyn RngCore) -> Result<Self> {
        GROVER_BOUNDS.check(num_qubits, "Grover search width")?;
        let space = 1usize << num_qubits;
        let limit = MAX_RANDOM_SOLUTIONS.min(space / 2).max(1);
        let count = rng.random_range(1..=limit);
        let solutions = index::sample(rng, space, count).into_iter().map(|i| i as u64).collect();
        Self::new(num_qubits, solutions)
    }

    /// Whether the iteration count may use the number of solutions.
    pub fn known_count(mut self, known: bool) -> Self {
        self.known_count = known;
        self
    }

    /// Data register width.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Marked states, in the order given.
    pub fn solutions(&self) -> &[u64] {
        &self.solutions
    }

    /// Whether `candidate` is marked.
    pub fn is_solution(&self, candidate: u64) -> bool {
        self.solutions.contains(&candidate)
    }

    /// Rounds [`GroverSearch::run`] will apply; see [`iterations_for`].
    pub fn iterations(&self) -> usize {
        iterations_for(self.num_qubits, self.known_count.then_some(self.solutions.len()))
    }

    /// Flips the ancilla for every solution: X on the solution's zero bits,
    /// multi-controlled X onto the ancilla, X again.
    pub fn oracle(&self) -> Result<Circuit> {
        let n = self.num_qubits;
        let data: Vec<usize> = (0..n).collect();
        let mut oracle = Circuit::with_name(n + 1, 0, "grover-oracle");
        for &solution in &self.solutions {
            let zeros: Vec<usize> = set_bits(!solution, n).collect();
            oracle.x_all(zeros.iter().copied())?;
            oracle.mcx(&data, n)?;
            oracle.x_all(zeros.iter().copied())?;
        }
        Ok(oracle)
    }

    /// Inversion about the mean on `num_qubits` qubits: the phase of |0...0>
    /// is flipped by a multi-controlled Z (H-sandwiched MCX on the last qubit)
    /// between X and H layers.
    pub fn diffuser(&self) -> Result<Circuit> {
        let n = self.num_qubits;
        let last = n - 1;
        let controls: Vec<usize> = (0..last).collect();
        let mut diffuser = Circuit::with_name(n, 0, "grover-diffuser");
        diffuser.h_all(0..n)?.x_all(0..n)?;
        diffuser.h(last)?.mcx(&controls, last)?.h(last)?;
        diffuser.x_all(0..n)?.h_all(0..n)?;
        Ok(diffuser)
    }

    /// Full circuit with an explicit number of oracle/diffuser rounds.
    pub fn circuit_with_iterations(&self, iterations: usize) -> Result<Circuit> {
        let n = self.num_qubits;
        let oracle = self.oracle()?;
        let diffuser = self.diffuser()?;
        let mut circuit = Circuit::with_name(n + 1, n, "grover");
        circuit.x(n)?.h(n)?;
        circuit.h_all(0..n)?;
        for _ in 0..iterations {
            circuit.compose(&oracle, 0)?;
            circuit.compose(&diffuser, 0)?;
        }
        circuit.measure_all()?;
        Ok(circuit)
    }

    /// Full search circuit with [`GroverSearch::iterations`] rounds.
    pub fn circuit(&self) -> Result<Circuit> {
        self.circuit_with_iterations(self.iterations())
    }

    /// Runs the search and checks the most frequent outcome against the
    /// marked set.
    ///
    /// # Arguments
    /// * `backend` - Where the circuit is executed.
    /// * `shots` - Samples per execution, at least 1.
    /// * `rng` - Sampling source handed to the backend.
    pub fn run<B: Backend + ?Sized>(&self, backend: &mut B, shots: usize, rng: &mut dyn RngCore) -> Result<GroverOutcome> {
        let iterations = self.iterations();
        debug!(qubits = self.num_qubits, solutions = self.solutions.len(), iterations, "Grover search");
        let histogram = execute(backend, &self.circuit_with_iterations(iterations)?, shots, rng)?;
        let Some((candidate, count)) = histogram.most_frequent() else {
            warn!(iterations, "Grover search returned no outcomes");
            return Ok(GroverOutcome::NoOutcomes { iterations, histogram });
        };
        let outcome = if self.is_solution(candidate) {
            GroverOutcome::Found { solution: candidate, iterations, histogram }
        } else {
            GroverOutcome::NotASolution { candidate, iterations, histogram }
        };
        info!(
            candidate = %format_bits(candidate, self.num_qubits),
            count,
            found = outcome.is_found(),
            "Grover search finished"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LocalBackend;
    use crate::simulation::Simulator;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn marked_probability(search: &GroverSearch, iterations: usize) -> Result<f64> {
        let probabilities = Simulator::new().probabilities(&search.circuit_with_iterations(iterations)?)?;
        Ok(search.solutions().iter().map(|s| probabilities.get(s).copied().unwrap_or(0.0)).sum())
    }

    #[test]
    fn iteration_formula() {
        assert_eq!(iterations_for(4, Some(1)), 3);
        assert_eq!(iterations_for(4, None), 3);
        assert_eq!(iterations_for(6, Some(2)), 4);
        assert_eq!(iterations_for(1, Some(1)), 1);
    }

    #[test]
    fn amplification_grows_each_round() -> Result<()> {
        let search = GroverSearch::new(4, vec![0b1011])?;
        let mut previous = 0.0;
        for iterations in 0..=3 {
            let p = marked_probability(&search, iterations)?;
            assert!(p > previous, "round {}: {} <= {}", iterations, p, previous);
            previous = p;
        }
        assert!(previous > 0.9);
        Ok(())
    }

    #[test]
    fn multiple_solutions_are_amplified_together() -> Result<()> {
        let search = GroverSearch::new(5, vec![3, 17, 30])?;
        assert_eq!(search.iterations(), 2);
        assert!(marked_probability(&search, search.iterations())? > 0.8);
        Ok(())
    }

    #[test]
    fn run_finds_a_random_solution() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(3);
        let search = GroverSearch::random(4, &mut rng)?;
        assert!((1..=3).contains(&search.solutions().len()));
        let outcome = search.run(&mut LocalBackend::new(), 200, &mut rng)?;
        match &outcome {
            GroverOutcome::Found { solution, .. } => assert!(search.is_solution(*solution)),
            other => panic!("expected a solution: {}", other),
        }
        assert_eq!(outcome.histogram().shots(), 200);
        Ok(())
    }

    #[test]
    fn iteration_count_survives_huge_registers() {
        assert_eq!(iterations_for(4, None), 3);
        assert_eq!(iterations_for(64, Some(1)), (FRAC_PI_4 * 2f64.powi(32)).floor() as usize);
        assert_eq!(iterations_for(200, None), usize::MAX);
    }

    #[test]
    fn single_qubit_search_space() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(8);
        let search = GroverSearch::random(1, &mut rng)?;
        assert_eq!(search.solutions().len(), 1);
        search.circuit()?;
        Ok(())
    }

    #[test]
    fn rejects_bad_solution_sets() {
        assert!(GroverSearch::new(3, vec![]).is_err());
        assert!(GroverSearch::new(3, vec![8]).is_err());
        assert!(GroverSearch::new(3, vec![2, 2]).is_err());
        assert!(GroverSearch::new(13, vec![1]).is_err());
    }
}
