// src/simulation/mod.rs

//! Executes circuits on a dense state vector.
//!
//! [`Simulator`] is the entry point: it evolves `|0...0>` through the gates of
//! a [`Circuit`] with the [`SimulationEngine`], checks the norm, and hands the
//! final state to the [`sampler`] to read out the measured classical bits.

pub mod engine;
mod results;
pub mod sampler;

pub use engine::SimulationEngine;
pub use results::{Histogram, format_bits};

use crate::circuits::Circuit;
use crate::core::{NORM_TOLERANCE, QuantumError, Result, StateVector};
use crate::validation::check_normalization;
use rand::Rng;
use std::collections::BTreeMap;
use tracing::debug;

/// Stateless local simulator.
#[derive(Debug, Clone, Copy)]
pub struct Simulator {
    norm_tolerance: f64,
}

impl Default for Simulator {
    fn default() -> Self {
        Self { norm_tolerance: NORM_TOLERANCE }
    }
}

impl Simulator {
    /// Creates a simulator with the default norm tolerance (1e-9).
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the norm-drift tolerance checked after evolution.
    pub fn with_norm_tolerance(mut self, tolerance: f64) -> Self {
        self.norm_tolerance = tolerance;
        self
    }

    /// Evolves `|0...0>` through every gate of `circuit`, ignoring
    /// measurement markers, and returns the final state.
    ///
    /// # Errors
    /// * Construction errors if a gate does not fit the register.
    /// * [`QuantumError::NormDrift`] if evolution lost unitarity.
    pub fn statevector(&self, circuit: &Circuit) -> Result<StateVector> {
        let mut engine = SimulationEngine::init(circuit.num_qubits())?;
        for gate in circuit.gates() {
            engine.apply_gate(gate)?;
        }
        let state = engine.into_state();
        check_normalization(&state, Some(self.norm_tolerance))?;
        Ok(state)
    }

    /// Probability of each classical-register value at the end of `circuit`.
    pub fn probabilities(&self, circuit: &Circuit) -> Result<BTreeMap<u64, f64>> {
        if !circuit.has_measurements() {
            return Err(QuantumError::NoMeasurements);
        }
        let state = self.statevector(circuit)?;
        Ok(sampler::probabilities(&state, &circuit.measurement_map()))
    }

    /// Runs `circuit` and samples `shots` outcomes of its classical register.
    pub fn run<R: Rng + ?Sized>(&self, circuit: &Circuit, shots: usize, rng: &mut R) -> Result<Histogram> {
        debug!(
            circuit = circuit.name().unwrap_or("<anonymous>"),
            qubits = circuit.num_qubits(),
            operations = circuit.len(),
            shots,
            "simulating circuit"
        );
        let distribution = self.probabilities(circuit)?;
        let histogram = sampler::sample(&distribution, shots, circuit.num_clbits(), rng);
        debug!(distinct = histogram.len(), "sampling finished");
        Ok(histogram)
    }
}
