// src/algorithms/mod.rs

//! Algorithm drivers.
//!
//! Each driver builds its oracle from a hidden secret, assembles the full
//! circuit, hands it to a [`Backend`] and interprets the histogram
//! classically. Secrets are only read back when judging the result.
//!
//! Probabilistic failures (an ambiguous histogram, an unresolved system, an
//! exhausted base list) are variants of the driver's outcome type. A
//! [`QuantumError`] from a driver means the inputs were invalid or the
//! backend failed.

pub mod basics;
pub mod bernstein_vazirani;
pub mod deutsch_jozsa;
pub mod gf2;
pub mod grover;
pub mod number_theory;
pub mod shor;
pub mod simon;

pub use basics::{BellOutcome, bell_pair, superposition};
pub use bernstein_vazirani::{BernsteinVazirani, BernsteinVaziraniOutcome};
pub use deutsch_jozsa::{DeutschJozsa, DeutschJozsaOracle, DeutschJozsaOutcome, Verdict};
pub use gf2::Gf2System;
pub use grover::{GroverOutcome, GroverSearch, iterations_for};
pub use shor::{AttemptResult, ShorAttempt, ShorFactoring, ShorOutcome, random_semiprime};
pub use simon::{Simon, SimonOutcome};

use crate::backend::Backend;
use crate::circuits::Circuit;
use crate::core::{QuantumError, Result};
use crate::simulation::Histogram;
use rand::RngCore;
use tracing::debug;

/// Runs `circuit` on `backend` after rejecting an empty shot count.
pub(crate) fn execute<B: Backend + ?Sized>(
    backend: &mut B,
    circuit: &Circuit,
    shots: usize,
    rng: &mut dyn RngCore,
) -> Result<Histogram> {
    if shots == 0 {
        return Err(QuantumError::invalid_parameter("shots must be at least 1"));
    }
    debug!(
        backend = backend.name(),
        circuit = circuit.name().unwrap_or("<anonymous>"),
        qubits = circuit.num_qubits(),
        shots,
        "executing circuit"
    );
    backend.execute(circuit, shots, rng)
}

/// Rejects secrets that do not fit in `bits` bits.
pub(crate) fn check_secret(secret: u64, bits: usize, what: &str) -> Result<()> {
    if bits < 64 && secret >> bits != 0 {
        return Err(QuantumError::invalid_parameter(format!(
            "{} {:#b} does not fit in {} bits",
            what, secret, bits
        )));
    }
    Ok(())
}

/// Positions of the set bits of `value` below `bits`, least significant first.
pub(crate) fn set_bits(value: u64, bits: usize) -> impl Iterator<Item = usize> {
    (0..bits).filter(move |&i| value >> i & 1 == 1)
}
