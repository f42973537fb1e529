// src/core/constants.rs

//! Numerical constants shared by the engine, sampler and validators.

/// Tolerance for the `sum |c_i|^2 = 1` invariant.
pub const NORM_TOLERANCE: f64 = 1e-9;

/// Probabilities below this are treated as exact zeros when sampling.
pub const AMPLITUDE_TOLERANCE: f64 = 1e-12;

/// Largest register the dense engine will allocate (2^20 amplitudes).
pub const MAX_QUBITS: usize = 20;

/// Default number of shots per execution.
pub const DEFAULT_SHOTS: usize = 500;

/// Classical registers are packed into a `u64`, so only bits `0..64` can be
/// measured into.
pub const MAX_CLBITS: usize = 64;
