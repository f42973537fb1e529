// src/algorithms/deutsch_jozsa.rs

//! Deutsch-Jozsa: constant or balanced, in one query.

use super::{check_secret, execute, set_bits};
use crate::backend::Backend;
use crate::circuits::Circuit;
use crate::config::DEUTSCH_JOZSA_BOUNDS;
use crate::core::{QuantumError, Result};
use crate::simulation::Histogram;
use rand::{Rng, RngCore};
use std::fmt;
use tracing::info;

/// The hidden function `f: {0,1}^n -> {0,1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeutschJozsaOracle {
    /// `f(x) = value` for every input.
    Constant(bool),
    /// `f(x) = parity((x ^ pattern) & mask)`.
    ///
    /// Realized as X on the `pattern` qubits, CX from every `mask` qubit into
    /// the ancilla, then X on `pattern` again. Any non-zero mask splits the
    /// inputs evenly.
    Balanced { mask: u64, pattern: u64 },
}

impl DeutschJozsaOracle {
    /// `true` for [`DeutschJozsaOracle::Constant`].
    pub fn is_constant(&self) -> bool {
        matches!(self, DeutschJozsaOracle::Constant(_))
    }

    /// Classical evaluation of `f(x)`.
    pub fn evaluate(&self, x: u64) -> bool {
        match *self {
            DeutschJozsaOracle::Constant(value) => value,
            DeutschJozsaOracle::Balanced { mask, pattern } => ((x ^ pattern) & mask).count_ones() % 2 == 1,
        }
    }
}

/// What the histogram says about `f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Only the all-zero outcome was observed.
    Constant,
    /// The all-zero outcome never appeared.
    Balanced,
    /// Both the all-zero outcome and others appeared, or nothing was
    /// observed at all. Impossible without noise, so it is reported instead
    /// of guessed.
    Inconclusive,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Constant => write!(f, "constant"),
            Verdict::Balanced => write!(f, "balanced"),
            Verdict::Inconclusive => write!(f, "inconclusive"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeutschJozsaOutcome {
    pub verdict: Verdict,
    /// Whether the verdict matches the hidden oracle.
    pub correct: bool,
    pub histogram: Histogram,
}

impl fmt::Display for DeutschJozsaOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function is {}", self.verdict)?;
        if self.verdict != Verdict::Inconclusive {
            write!(f, " ({})", if self.correct { "correct" } else { "wrong" })?;
        }
        Ok(())
    }
}

/// Deutsch-Jozsa over `num_qubits` data qubits plus one ancilla (the last qubit).
#[derive(Debug, Clone, PartialEq)]
pub struct DeutschJozsa {
    num_qubits: usize,
    oracle: DeutschJozsaOracle,
}

impl DeutschJozsa {
    /// Validates the oracle against the register.
    ///
    /// # Arguments
    /// * `num_qubits` - Data qubits; one ancilla is added.
    /// * `oracle` - Hidden function. Balanced oracles need a non-zero mask
    ///   and must fit in `num_qubits` bits.
    pub fn new(num_qubits: usize, oracle: DeutschJozsaOracle) -> Result<Self> {
        DEUTSCH_JOZSA_BOUNDS.check(num_qubits, "Deutsch-Jozsa input size")?;
        if let DeutschJozsaOracle::Balanced { mask, pattern } = oracle {
            if mask == 0 {
                return Err(QuantumError::invalid_parameter("a balanced oracle needs a non-zero mask"));
            }
            check_secret(mask, num_qubits, "balanced mask")?;
            check_secret(pattern, num_qubits, "balanced pattern")?;
        }
        Ok(Self { num_qubits, oracle })
    }

    /// Constant or balanced with equal odds; balanced oracles get a random
    /// non-zero mask and a random X pattern.
    pub fn random(num_qubits: usize, rng: &mut dyn RngCore) -> Result<Self> {
        DEUTSCH_JOZSA_BOUNDS.check(num_qubits, "Deutsch-Jozsa input size")?;
        let inputs = 1u64 << num_qubits;
        let oracle = if rng.random::<bool>() {
            DeutschJozsaOracle::Constant(rng.random())
        } else {
            DeutschJozsaOracle::Balanced { mask: rng.random_range(1..inputs), pattern: rng.random_range(0..inputs) }
        };
        Self::new(num_qubits, oracle)
    }

    /// Data register width.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The hidden function, for judging results.
    pub fn hidden_oracle(&self) -> DeutschJozsaOracle {
        self.oracle
    }

    /// The oracle block on `num_qubits + 1` qubits, no measurements.
    pub fn oracle(&self) -> Result<Circuit> {
        let n = self.num_qubits;
        let mut oracle = Circuit::with_name(n + 1, 0, "dj-oracle");
        match self.oracle {
            DeutschJozsaOracle::Constant(true) => {
                oracle.x(n)?;
            }
            DeutschJozsaOracle::Constant(false) => {}
            DeutschJozsaOracle::Balanced { mask, pattern } => {
                oracle.x_all(set_bits(pattern, n))?;
                for q in set_bits(mask, n) {
                    oracle.cx(q, n)?;
                }
                oracle.x_all(set_bits(pattern, n))?;
            }
        }
        Ok(oracle)
    }

    /// Ancilla to |->, Hadamards on the inputs, oracle, Hadamards again,
    /// measure the inputs.
    pub fn circuit(&self) -> Result<Circuit> {
        let n = self.num_qubits;
        let mut circuit = Circuit::with_name(n + 1, n, "deutsch-jozsa");
        circuit.x(n)?;
        circuit.h_all(0..=n)?;
        circuit.compose(&self.oracle()?, 0)?;
        circuit.h_all(0..n)?;
        circuit.measure_all()?;
        Ok(circuit)
    }

    /// Reads the verdict off a histogram of the data register.
    pub fn interpret(histogram: &Histogram) -> Verdict {
        if histogram.is_empty() {
            return Verdict::Inconclusive;
        }
        let zeros = histogram.count(0);
        if zeros == histogram.shots() {
            Verdict::Constant
        } else if zeros == 0 {
            Verdict::Balanced
        } else {
            Verdict::Inconclusive
        }
    }

    /// Executes the circuit once and judges the verdict against the oracle.
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
    ) -> Result<DeutschJozsaOutcome> {
        let histogram = execute(backend, &self.circuit()?, shots, rng)?;
        let verdict = Self::interpret(&histogram);
        let correct = match verdict {
            Verdict::Constant => self.oracle.is_constant(),
            Verdict::Balanced => !self.oracle.is_constant(),
            Verdict::Inconclusive => false,
        };
        info!(qubits = self.num_qubits, %verdict, correct, "Deutsch-Jozsa finished");
        Ok(DeutschJozsaOutcome { verdict, correct, histogram })
    }
}
