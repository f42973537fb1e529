// src/config/mod.rs

//! Run configuration: shot count, RNG seed and per-algorithm qubit bounds.
//!
//! Everything here is a plain value; nothing is read from the environment.

use crate::core::{DEFAULT_SHOTS, QuantumError, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 0x5EED;

/// Shared execution parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Shots per backend execution.
    pub shots: usize,
    /// Seed for every random decision of a run.
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { shots: DEFAULT_SHOTS, seed: DEFAULT_SEED }
    }
}

impl RunConfig {
    /// Replaces the shot count.
    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    /// Replaces the seed. Equal seeds give equal runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// A fresh generator seeded with [`RunConfig::seed`].
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}

/// Inclusive range of problem sizes an algorithm accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QubitBounds {
    /// Smallest accepted size.
    pub min: usize,
    /// Largest accepted size.
    pub max: usize,
}

impl QubitBounds {
    /// Bounds `min..=max`.
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Whether `n` lies inside the bounds.
    pub fn contains(&self, n: usize) -> bool {
        (self.min..=self.max).contains(&n)
    }

    /// Returns `InvalidParameter` naming `what` when `n` is out of bounds.
    pub fn check(&self, n: usize, what: &str) -> Result<()> {
        if self.contains(n) {
            Ok(())
        } else {
            Err(QuantumError::invalid_parameter(format!(
                "{} must be between {} and {}, got {}",
                what, self.min, self.max, n
            )))
        }
    }
}

/// Data qubits for Deutsch-Jozsa (one ancilla is added).
pub const DEUTSCH_JOZSA_BOUNDS: QubitBounds = QubitBounds::new(1, 16);
/// Data qubits for Grover search (one ancilla is added).
pub const GROVER_BOUNDS: QubitBounds = QubitBounds::new(1, 12);
/// Secret length for Bernstein-Vazirani (one ancilla is added).
pub const BERNSTEIN_VAZIRANI_BOUNDS: QubitBounds = QubitBounds::new(1, 16);
/// Secret length for Simon (the register is twice as wide).
pub const SIMON_BOUNDS: QubitBounds = QubitBounds::new(1, 8);
/// Bit width of the modulus for Shor (counting and work registers share it).
pub const SHOR_BOUNDS: QubitBounds = QubitBounds::new(2, 10);
