// src/core/error.rs

//! Error handling logic

use std::fmt;
use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QuantumError>;

/// Index of a qubit inside a register.
///
/// Qubit `i` is bit `i` of the integer encoding a basis state, so qubit 0 is
/// the least significant bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub usize);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q[{}]", self.0)
    }
}

/// Failures raised while building or simulating circuits.
///
/// Construction errors are reported as soon as a malformed operation is
/// added and are never corrected silently. Probabilistic outcomes of the
/// algorithms (an ambiguous histogram, an unresolved linear system, an odd
/// period) are not errors; each driver models them in its own outcome type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuantumError {
    /// A gate or measurement addressed a qubit outside the register.
    #[error("Qubit {qubit} is out of range for a {width}-qubit register")]
    QubitOutOfRange {
        /// Offending qubit.
        qubit: QubitId,
        /// Number of qubits in the register.
        width: usize,
    },

    /// A measurement targeted a classical bit the circuit does not own.
    #[error("Classical bit {clbit} is out of range for {width} classical bits")]
    ClassicalBitOutOfRange {
        /// Offending classical bit.
        clbit: usize,
        /// Number of classical bits in the circuit.
        width: usize,
    },

    /// The same qubit appeared twice in one gate's operand list.
    #[error("Qubit {qubit} appears more than once in the operands of {gate}")]
    DuplicateQubit {
        /// Repeated qubit.
        qubit: QubitId,
        /// Short gate name.
        gate: &'static str,
    },

    /// A sub-circuit does not fit in the parent at the requested offset.
    #[error("Cannot compose a {sub_width}-qubit circuit at offset {offset} into {width} qubits")]
    CompositionOverflow {
        /// Width of the inlined circuit.
        sub_width: usize,
        /// Requested qubit offset.
        offset: usize,
        /// Width of the parent circuit.
        width: usize,
    },

    /// A permutation table is not a bijection over the target register.
    #[error("Invalid permutation table: {message}")]
    InvalidPermutation {
        /// Description of the defect.
        message: String,
    },

    /// A driver or circuit parameter is outside its accepted domain.
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of the defect.
        message: String,
    },

    /// The requested register is too large for dense simulation.
    #[error("{requested} qubits exceeds the dense simulation limit of {limit}")]
    TooManyQubits {
        /// Requested width.
        requested: usize,
        /// Supported maximum.
        limit: usize,
    },

    /// Sampling was requested on a circuit that measures nothing.
    #[error("Circuit has no measurements to sample")]
    NoMeasurements,

    /// The state vector norm drifted beyond tolerance. This is a defect in
    /// the engine, never a user error.
    #[error("State vector norm drifted: sum |c_i|^2 = {norm_sqr} (tolerance {tolerance})")]
    NormDrift {
        /// Observed squared norm.
        norm_sqr: f64,
        /// Tolerance that was exceeded.
        tolerance: f64,
    },

    /// An execution backend failed to produce a histogram.
    #[error("Backend '{backend}' failed: {message}")]
    Backend {
        /// Name of the failing backend.
        backend: String,
        /// Failure reported by the backend.
        message: String,
    },
}

impl QuantumError {
    /// Shorthand for [`QuantumError::InvalidParameter`].
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        QuantumError::InvalidParameter { message: message.into() }
    }

    /// Returns `true` for errors raised while building circuits.
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            QuantumError::QubitOutOfRange { .. }
                | QuantumError::ClassicalBitOutOfRange { .. }
                | QuantumError::DuplicateQubit { .. }
                | QuantumError::CompositionOverflow { .. }
                | QuantumError::InvalidPermutation { .. }
        )
    }
}
