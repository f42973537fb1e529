// src/algorithms/simon.rs

//! Simon's algorithm: find `s` such that `f(x) = f(x ^ s)`.
//!
//! Every measured `y` satisfies `y . s = 0 (mod 2)`. The driver keeps running
//! the circuit, feeding distinct outcomes into a [`Gf2System`], until the
//! system has rank `n - 1` (one non-zero solution left) or the run budget is
//! spent.

use super::gf2::Gf2System;
use super::{check_secret, execute, set_bits};
use crate::backend::Backend;
use crate::circuits::Circuit;
use crate::config::SIMON_BOUNDS;
use crate::core::{QuantumError, Result};
use crate::simulation::{Histogram, format_bits};
use rand::{Rng, RngCore};
use std::fmt;
use tracing::{debug, info, warn};

/// Executions allowed while collecting equations.
pub const DEFAULT_MAX_RUNS: usize = 16;
/// Extra executions after reaching rank `n - 1`.
pub const DEFAULT_CONFIRMATION_RUNS: usize = 1;

#[derive(Debug, Clone, PartialEq)]
pub enum SimonOutcome {
    /// `secret` is the unique non-zero null-space vector, or 0 when the
    /// equations reached full rank.
    Recovered { secret: u64, correct: bool, runs: usize, histogram: Histogram },
    /// The budget ran out before `required` independent equations were seen.
    Unresolved { independent: usize, required: usize, runs: usize, histogram: Histogram },
}

impl SimonOutcome {
    /// Histogram of the last execution.
    pub fn histogram(&self) -> &Histogram {
        match self {
            SimonOutcome::Recovered { histogram, .. } | SimonOutcome::Unresolved { histogram, .. } => histogram,
        }
    }

    /// Recovered secret, if the system was solved.
    pub fn secret(&self) -> Option<u64> {
        match self {
            SimonOutcome::Recovered { secret, .. } => Some(*secret),
            SimonOutcome::Unresolved { .. } => None,
        }
    }
}

impl fmt::Display for SimonOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimonOutcome::Recovered { secret, correct, runs, histogram } => write!(
                f,
                "recovered s = {} after {} runs ({})",
                format_bits(*secret, histogram.num_bits()),
                runs,
                if *correct { "correct" } else { "wrong" }
            ),
            SimonOutcome::Unresolved { independent, required, runs, .. } => write!(
                f,
                "unresolved: {} of {} independent equations after {} runs",
                independent, required, runs
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Simon {
    num_qubits: usize,
    secret: u64,
    max_runs: usize,
    confirmation_runs: usize,
}

impl Simon {
    /// Fixes the hidden period with the default run budget.
    ///
    /// # Arguments
    /// * `num_qubits` - Secret length; the circuit uses `2 * num_qubits` qubits.
    /// * `secret` - Hidden `s`; zero makes the function one-to-one.
    pub fn new(num_qubits: usize, secret: u64) -> Result<Self> {
        SIMON_BOUNDS.check(num_qubits, "Simon secret length")?;
        check_secret(secret, num_qubits, "secret")?;
        Ok(Self { num_qubits, secret, max_runs: DEFAULT_MAX_RUNS, confirmation_runs: DEFAULT_CONFIRMATION_RUNS })
    }

    /// Uniform secret, zero included.
    pub fn random(num_qubits: usize, rng: &mut dyn RngCore) -> Result<Self> {
        SIMON_BOUNDS.check(num_qubits, "Simon secret length")?;
        let secret = rng.random_range(0..1u64 << num_qubits);
        Self::new(num_qubits, secret)
    }

    /// Executions allowed while collecting equations (at least 1).
    pub fn with_max_runs(mut self, max_runs: usize) -> Result<Self> {
        if max_runs == 0 {
            return Err(QuantumError::invalid_parameter("Simon needs at least one run"));
        }
        self.max_runs = max_runs;
        Ok(self)
    }

    /// Extra executions once rank `n - 1` is reached; 0 disables the
    /// check that separates `s = 0` from a non-zero secret.
    pub fn with_confirmation_runs(mut self, runs: usize) -> Self {
        self.confirmation_runs = runs;
        self
    }

    /// Secret length.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The hidden period, for judging results.
    pub fn secret(&self) -> u64 {
        self.secret
    }

    /// Two-to-one oracle on `2n` qubits: copy the first register into the
    /// second, then, controlled on the lowest set bit `j` of `s`, XOR `s` into
    /// the second register. Inputs `x` and `x ^ s` land on the same value.
    pub fn oracle(&self) -> Result<Circuit> {
        let n = self.num_qubits;
        let mut oracle = Circuit::with_name(2 * n, 0, "simon-oracle");
        for i in 0..n {
            oracle.cx(i, n + i)?;
        }
        if let Some(j) = set_bits(self.secret, n).next() {
            for k in set_bits(self.secret, n) {
                oracle.cx(j, n + k)?;
            }
        }
        Ok(oracle)
    }

    /// Hadamards around the oracle on the first register. The second register
    /// is measured first and then overwritten in the classical register by the
    /// first, so only the first register's value is reported.
    pub fn circuit(&self) -> Result<Circuit> {
        let n = self.num_qubits;
        let first: Vec<usize> = (0..n).collect();
        let second: Vec<usize> = (n..2 * n).collect();
        let mut circuit = Circuit::with_name(2 * n, n, "simon");
        circuit.h_all(0..n)?;
        circuit.compose(&self.oracle()?, 0)?;
        circuit.h_all(0..n)?;
        circuit.measure_range(&second, &first)?;
        circuit.measure_range(&first, &first)?;
        Ok(circuit)
    }

    fn absorb(system: &mut Gf2System, histogram: &Histogram) -> usize {
        histogram.sorted_by_count().into_iter().filter(|(y, _)| system.insert(*y)).count()
    }

    /// Collects equations until the secret is determined or the budget runs out.
    ///
    /// # Arguments
    /// * `backend` - Where the circuit is executed.
    /// * `shots` - Samples per execution, at least 1.
    /// * `rng` - Sampling source handed to the backend.
    pub fn run<B: Backend + ?Sized>(&self, backend: &mut B, shots: usize, rng: &mut dyn RngCore) -> Result<SimonOutcome> {
        let n = self.num_qubits;
        let required = n - 1;
        let circuit = self.circuit()?;
        let mut system = Gf2System::new(n);
        let mut runs = 0;
        let mut histogram;
        loop {
            histogram = execute(backend, &circuit, shots, rng)?;
            runs += 1;
            let added = Self::absorb(&mut system, &histogram);
            debug!(run = runs, added, rank = system.rank(), "collected Simon equations");
            if system.rank() >= required || runs >= self.max_runs {
                break;
            }
        }

        if system.rank() < required {
            warn!(rank = system.rank(), required, runs, "Simon run budget exhausted");
            return Ok(SimonOutcome::Unresolved { independent: system.rank(), required, runs, histogram });
        }

        // At rank n - 1 the candidate is the single null-space vector, but
        // s = 0 produces the same picture until one more independent y shows up.
        for _ in 0..self.confirmation_runs {
            if system.rank() == n {
                break;
            }
            histogram = execute(backend, &circuit, shots, rng)?;
            runs += 1;
            Self::absorb(&mut system, &histogram);
        }

        let secret = system.null_space().first().copied().unwrap_or(0);
        let correct = secret == self.secret;
        info!(secret = %format_bits(secret, n), runs, correct, "Simon finished");
        Ok(SimonOutcome::Recovered { secret, correct, runs, histogram })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::gf2::dot;
    use crate::backend::LocalBackend;
    use crate::simulation::Simulator;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn measured_values_are_orthogonal_to_secret() -> Result<()> {
        let simon = Simon::new(3, 0b110)?;
        let probabilities = Simulator::new().probabilities(&simon.circuit()?)?;
        assert_eq!(probabilities.len(), 4);
        for (y, p) in probabilities {
            assert_eq!(dot(y, 0b110), 0, "y = {:03b}", y);
            assert!((p - 0.25).abs() < 1e-9);
        }
        Ok(())
    }

    #[test]
    fn recovers_secret() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(4);
        let outcome = Simon::new(3, 0b110)?.run(&mut LocalBackend::new(), 100, &mut rng)?;
        assert_eq!(outcome.secret(), Some(0b110));
        assert!(matches!(outcome, SimonOutcome::Recovered { correct: true, .. }));
        Ok(())
    }

    #[test]
    fn zero_secret_is_not_unresolved() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(4);
        let outcome = Simon::new(3, 0)?.run(&mut LocalBackend::new(), 100, &mut rng)?;
        assert_eq!(outcome.secret(), Some(0));

        // One shot in one run cannot give two independent equations.
        let starved = Simon::new(3, 0)?.with_max_runs(1)?.run(&mut LocalBackend::new(), 1, &mut rng)?;
        assert!(matches!(starved, SimonOutcome::Unresolved { required: 2, runs: 1, .. }));
        Ok(())
    }

    #[test]
    fn single_bit_secrets() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(2);
        for secret in [0, 1] {
            let outcome = Simon::new(1, secret)?.run(&mut LocalBackend::new(), 50, &mut rng)?;
            assert_eq!(outcome.secret(), Some(secret));
        }
        Ok(())
    }

    #[test]
    fn oracle_is_two_to_one() -> Result<()> {
        let simon = Simon::new(3, 0b101)?;
        let oracle = simon.oracle()?;
        // Without Hadamards the oracle maps |x>|0> to |x>|f(x)>.
        for x in 0..8u64 {
            let mut prep = Circuit::new(6, 3);
            prep.x_all(set_bits(x, 3))?;
            prep.compose(&oracle, 0)?;
            prep.measure_range(&[3, 4, 5], &[0, 1, 2])?;
            let fx = Simulator::new().probabilities(&prep)?;
            let mut partner = Circuit::new(6, 3);
            partner.x_all(set_bits(x ^ 0b101, 3))?;
            partner.compose(&oracle, 0)?;
            partner.measure_range(&[3, 4, 5], &[0, 1, 2])?;
            let f_partner = Simulator::new().probabilities(&partner)?;
            assert_eq!(fx.keys().collect::<Vec<_>>(), f_partner.keys().collect::<Vec<_>>());
        }
        Ok(())
    }
}
