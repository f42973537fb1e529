// src/algorithms/basics.rs

//! Single-qubit superposition and the Bell pair.

use super::execute;
use crate::backend::Backend;
use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::Result;
use crate::simulation::Histogram;
use rand::RngCore;
use std::fmt;
use tracing::info;

/// `H|0>`, measured.
pub fn superposition_circuit() -> Result<Circuit> {
    CircuitBuilder::named(1, 1, "superposition").h(0).measure_all().build()
}

/// `(|00> + |11>) / sqrt(2)`, both qubits measured.
pub fn bell_circuit() -> Result<Circuit> {
    CircuitBuilder::named(2, 2, "bell-pair").h(0).cx(0, 1).measure_all().build()
}

/// Samples the single-qubit superposition; expect roughly even counts.
pub fn superposition<B: Backend + ?Sized>(backend: &mut B, shots: usize, rng: &mut dyn RngCore) -> Result<Histogram> {
    execute(backend, &superposition_circuit()?, shots, rng)
}

#[derive(Debug, Clone, PartialEq)]
pub struct BellOutcome {
    pub histogram: Histogram,
    /// Only `00` and `11` were observed.
    pub correlated: bool,
}

impl fmt::Display for BellOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "00: {}, 11: {}, {}",
            self.histogram.count(0b00),
            self.histogram.count(0b11),
            if self.correlated { "perfectly correlated" } else { "uncorrelated outcomes seen" }
        )
    }
}

/// Samples the Bell pair and checks that only `00` and `11` appear.
pub fn bell_pair<B: Backend + ?Sized>(backend: &mut B, shots: usize, rng: &mut dyn RngCore) -> Result<BellOutcome> {
    let histogram = execute(backend, &bell_circuit()?, shots, rng)?;
    let correlated = histogram.iter().all(|(outcome, _)| outcome == 0b00 || outcome == 0b11);
    info!(correlated, distinct = histogram.len(), "Bell pair sampled");
    Ok(BellOutcome { histogram, correlated })
}
