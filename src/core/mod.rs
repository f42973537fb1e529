// src/core/mod.rs

//! Core data structures and types

pub mod constants;
pub mod error;
pub mod state;

// Re-export public types for convenient access via `qalgos::core::TypeName`
pub use constants::{AMPLITUDE_TOLERANCE, DEFAULT_SHOTS, MAX_CLBITS, MAX_QUBITS, NORM_TOLERANCE};
pub use error::{QuantumError, QubitId, Result};
pub use state::StateVector;
