// src/algorithms/bernstein_vazirani.rs

//! Bernstein-Vazirani: recover `s` from `f(x) = s . x mod 2` in one query.

use super::{check_secret, execute, set_bits};
use crate::backend::Backend;
use crate::circuits::Circuit;
use crate::config::BERNSTEIN_VAZIRANI_BOUNDS;
use crate::core::Result;
use crate::simulation::{Histogram, format_bits};
use rand::{Rng, RngCore};
use std::fmt;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct BernsteinVaziraniOutcome {
    /// Most frequent measured value, `None` when the backend returned nothing.
    pub recovered: Option<u64>,
    /// Whether it equals the hidden string.
    pub correct: bool,
    pub histogram: Histogram,
}

impl fmt::Display for BernsteinVaziraniOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.recovered {
            Some(recovered) => write!(
                f,
                "recovered secret {} ({})",
                format_bits(recovered, self.histogram.num_bits()),
                if self.correct { "correct" } else { "wrong" }
            ),
            None => write!(f, "no outcomes to recover a secret from"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BernsteinVazirani {
    num_qubits: usize,
    secret: u64,
}

impl BernsteinVazirani {
    /// Fixes the hidden string.
    ///
    /// # Arguments
    /// * `num_qubits` - Secret length; one ancilla is added on top.
    /// * `secret` - Hidden string, bit `i` drives qubit `i`.
    pub fn new(num_qubits: usize, secret: u64) -> Result<Self> {
        BERNSTEIN_VAZIRANI_BOUNDS.check(num_qubits, "Bernstein-Vazirani secret length")?;
        check_secret(secret, num_qubits, "secret")?;
        Ok(Self { num_qubits, secret })
    }

    /// Uniform secret over `num_qubits` bits.
    pub fn random(num_qubits: usize, rng: &mut dyn RngCore) -> Result<Self> {
        BERNSTEIN_VAZIRANI_BOUNDS.check(num_qubits, "Bernstein-Vazirani secret length")?;
        let secret = rng.random_range(0..1u64 << num_qubits);
        Self::new(num_qubits, secret)
    }

    /// Secret length.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The hidden string, for judging results.
    pub fn secret(&self) -> u64 {
        self.secret
    }

    /// CX from every qubit where the secret has a 1 into the ancilla (qubit `n`).
    pub fn oracle(&self) -> Result<Circuit> {
        let n = self.num_qubits;
        let mut oracle = Circuit::with_name(n + 1, 0, "bv-oracle");
        for q in set_bits(self.secret, n) {
            oracle.cx(q, n)?;
        }
        Ok(oracle)
    }

    /// Ancilla to |->, Hadamard sandwich around the oracle, measure the data register.
    pub fn circuit(&self) -> Result<Circuit> {
        let n = self.num_qubits;
        let mut circuit = Circuit::with_name(n + 1, n, "bernstein-vazirani");
        circuit.x(n)?;
        circuit.h_all(0..=n)?;
        circuit.compose(&self.oracle()?, 0)?;
        circuit.h_all(0..n)?;
        circuit.measure_all()?;
        Ok(circuit)
    }

    /// Runs the circuit once and reads the secret off the most frequent outcome.
    ///
    /// # Arguments
    /// * `backend` - Where the circuit is executed.
    /// * `shots` - Samples per execution, at least 1.
    /// * `rng` - Sampling source handed to the backend.
    pub fn run<B: Backend + ?Sized>(
        &self,
        backend: &mut B,
        shots: usize,
        rng: &mut dyn RngCore,
    ) -> Result<BernsteinVaziraniOutcome> {
        let histogram = execute(backend, &self.circuit()?, shots, rng)?;
        let recovered = histogram.most_frequent().map(|(outcome, _)| outcome);
        let correct = recovered == Some(self.secret);
        match recovered {
            Some(value) => {
                info!(recovered = %format_bits(value, self.num_qubits), correct, "Bernstein-Vazirani finished")
            }
            None => warn!("Bernstein-Vazirani returned no outcomes"),
        }
        Ok(BernsteinVaziraniOutcome { recovered, correct, histogram })
    }
}
