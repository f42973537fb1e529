// src/core/state.rs

use super::constants::MAX_QUBITS;
use super::error::{QuantumError, Result};
use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

/// Dense complex amplitude vector of an n-qubit register.
///
/// Entry `k` holds the amplitude of the basis state whose integer encoding is
/// `k`, with qubit 0 as the least significant bit. A fresh vector is `|0...0>`
/// and unitary evolution keeps `sum |c_k|^2 = 1`.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
    num_qubits: usize,
}

impl StateVector {
    /// Allocates `|0...0>` over `num_qubits` qubits.
    pub fn zero(num_qubits: usize) -> Result<Self> {
        if num_qubits > MAX_QUBITS {
            return Err(QuantumError::TooManyQubits { requested: num_qubits, limit: MAX_QUBITS });
        }
        let mut amplitudes = vec![Complex::zero(); 1usize << num_qubits];
        amplitudes[0] = Complex::one();
        Ok(Self { amplitudes, num_qubits })
    }

    /// Builds a state from explicit amplitudes. The length must be a power of two.
    ///
    /// No normalization is applied; use [`crate::validation::check_normalization`]
    /// when the source is untrusted.
    pub fn from_amplitudes(amplitudes: Vec<Complex<f64>>) -> Result<Self> {
        let dim = amplitudes.len();
        if dim == 0 || !dim.is_power_of_two() {
            return Err(QuantumError::invalid_parameter(format!(
                "state vector length {} is not a power of two",
                dim
            )));
        }
        let num_qubits = dim.trailing_zeros() as usize;
        if num_qubits > MAX_QUBITS {
            return Err(QuantumError::TooManyQubits { requested: num_qubits, limit: MAX_QUBITS });
        }
        Ok(Self { amplitudes, num_qubits })
    }

    /// Read-only access to the amplitudes.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    /// Mutable access for the gate engine.
    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of qubits in the register.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of basis states (`2^n`).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// `sum |c_k|^2`.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Probability of observing basis state `index` when every qubit is measured.
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitudes.get(index).map_or(0.0, |c| c.norm_sqr())
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateVector[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}
