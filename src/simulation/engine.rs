// src/simulation/engine.rs
use crate::core::{QuantumError, Result, StateVector};
use crate::operations::Gate;
use num_complex::Complex;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// Evolves a [`StateVector`] in place, one gate at a time.
///
/// Qubit `q` is bit `q` of the basis-state index. Every gate is validated
/// against the register width before it touches the amplitudes.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    state: StateVector,
}

impl SimulationEngine {
    /// Starts from `|0...0>` on `num_qubits` qubits.
    pub fn init(num_qubits: usize) -> Result<Self> {
        Ok(Self { state: StateVector::zero(num_qubits)? })
    }

    /// Starts from an existing state.
    pub fn from_state(state: StateVector) -> Self {
        Self { state }
    }

    /// Current amplitudes.
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    /// Consumes the engine, returning the evolved state.
    pub fn into_state(self) -> StateVector {
        self.state
    }

    /// Register width.
    pub fn num_qubits(&self) -> usize {
        self.state.num_qubits()
    }

    /// Applies `gate` to the addressed qubits.
    pub fn apply_gate(&mut self, gate: &Gate) -> Result<()> {
        gate.validate(self.num_qubits())?;
        match gate {
            Gate::H(q) => self.apply_single_qubit_gate(*q, &HADAMARD),
            Gate::X(q) => self.apply_mcx(&[], *q),
            Gate::Z(q) => self.apply_single_qubit_gate(*q, &PAULI_Z),
            Gate::Cx { control, target } => self.apply_mcx(&[*control], *target),
            Gate::Swap(a, b) => self.apply_swap(*a, *b),
            Gate::Mcx { controls, target } => self.apply_mcx(controls, *target),
            Gate::ControlledPermutation { control, targets, table } => {
                self.apply_controlled_permutation(*control, targets, table)
            }
            Gate::InverseQft { qubits } => self.apply_inverse_qft(qubits),
        }
        Ok(())
    }

    /// Applies a dense `2^k x 2^k` unitary (row-major) to `qubits`.
    ///
    /// Bit `j` of a row/column index corresponds to `qubits[j]`. For every
    /// assignment of the other qubits, the addressed amplitudes are replaced by
    /// `U * psi`; the remaining bits of each basis state are left untouched.
    pub fn apply_matrix(&mut self, qubits: &[usize], matrix: &[Complex<f64>]) -> Result<()> {
        let width = self.num_qubits();
        let k = qubits.len();
        let sub_dim = 1usize << k;
        if matrix.len() != sub_dim * sub_dim {
            return Err(QuantumError::invalid_parameter(format!(
                "a {}-qubit matrix needs {} entries, got {}",
                k,
                sub_dim * sub_dim,
                matrix.len()
            )));
        }
        let mut addressed_mask = 0usize;
        for &q in qubits {
            if q >= width {
                return Err(QuantumError::QubitOutOfRange { qubit: crate::core::QubitId(q), width });
            }
            if addressed_mask & (1 << q) != 0 {
                return Err(QuantumError::DuplicateQubit { qubit: crate::core::QubitId(q), gate: "matrix" });
            }
            addressed_mask |= 1 << q;
        }

        let offsets: Vec<usize> = (0..sub_dim).map(|s| deposit_bits(s, qubits)).collect();
        let amps = self.state.amplitudes_mut();
        let mut psi = vec![Complex::new(0.0, 0.0); sub_dim];
        for base in 0..amps.len() {
            if base & addressed_mask != 0 {
                continue;
            }
            for (s, off) in offsets.iter().enumerate() {
                psi[s] = amps[base | off];
            }
            for (row, off) in offsets.iter().enumerate() {
                let mut acc = Complex::new(0.0, 0.0);
                for (col, amp) in psi.iter().enumerate() {
                    acc += matrix[row * sub_dim + col] * amp;
                }
                amps[base | off] = acc;
            }
        }
        Ok(())
    }

    /// Applies a 2x2 matrix to one qubit.
    fn apply_single_qubit_gate(&mut self, target: usize, matrix: &[[Complex<f64>; 2]; 2]) {
        let mask = 1usize << target;
        let amps = self.state.amplitudes_mut();
        for i0 in 0..amps.len() {
            if i0 & mask != 0 {
                continue;
            }
            let i1 = i0 | mask;
            let (psi_0, psi_1) = (amps[i0], amps[i1]);
            amps[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amps[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }

    /// Swaps the amplitudes of `x` and `x ^ target` whenever every control bit of `x` is 1.
    fn apply_mcx(&mut self, controls: &[usize], target: usize) {
        let control_mask = controls.iter().fold(0usize, |m, &c| m | (1 << c));
        let target_mask = 1usize << target;
        let amps = self.state.amplitudes_mut();
        for i in 0..amps.len() {
            if i & control_mask == control_mask && i & target_mask == 0 {
                amps.swap(i, i | target_mask);
            }
        }
    }

    fn apply_swap(&mut self, a: usize, b: usize) {
        let (mask_a, mask_b) = (1usize << a, 1usize << b);
        let amps = self.state.amplitudes_mut();
        for i in 0..amps.len() {
            if i & mask_a != 0 && i & mask_b == 0 {
                amps.swap(i, i ^ mask_a ^ mask_b);
            }
        }
    }

    /// Multiplies every basis state with both `a` and `b` set by `e^(i*theta)`.
    fn apply_controlled_phase(&mut self, a: usize, b: usize, theta: f64) {
        let mask = (1usize << a) | (1usize << b);
        let phase = Complex::from_polar(1.0, theta);
        for (i, amp) in self.state.amplitudes_mut().iter_mut().enumerate() {
            if i & mask == mask {
                *amp *= phase;
            }
        }
    }

    /// When `control` is 1, moves the amplitude of target value `v` to `table[v]`.
    fn apply_controlled_permutation(&mut self, control: usize, targets: &[usize], table: &[usize]) {
        let control_mask = 1usize << control;
        let target_mask = targets.iter().fold(0usize, |m, &t| m | (1 << t));
        let old = self.state.amplitudes().to_vec();
        let amps = self.state.amplitudes_mut();
        for (i, amp) in old.into_iter().enumerate() {
            if i & control_mask == 0 {
                continue;
            }
            let value = extract_bits(i, targets);
            let dest = (i & !target_mask) | deposit_bits(table[value], targets);
            amps[dest] = amp;
        }
    }

    /// Swaps to reverse bit order, then undoes each QFT layer: conjugate
    /// controlled phases followed by a Hadamard.
    fn apply_inverse_qft(&mut self, qubits: &[usize]) {
        let n = qubits.len();
        for i in 0..n / 2 {
            self.apply_swap(qubits[i], qubits[n - 1 - i]);
        }
        for j in 0..n {
            for k in 0..j {
                let theta = -PI / (1u64 << (j - k)) as f64;
                self.apply_controlled_phase(qubits[k], qubits[j], theta);
            }
            self.apply_single_qubit_gate(qubits[j], &HADAMARD);
        }
    }
}

const HADAMARD: [[Complex<f64>; 2]; 2] = [
    [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(FRAC_1_SQRT_2, 0.0)],
    [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(-FRAC_1_SQRT_2, 0.0)],
];

const PAULI_Z: [[Complex<f64>; 2]; 2] = [
    [Complex::new(1.0, 0.0), Complex::new(0.0, 0.0)],
    [Complex::new(0.0, 0.0), Complex::new(-1.0, 0.0)],
];

/// Reads the bits of `index` at `positions` into a compact value (positions[0] -> bit 0).
pub(crate) fn extract_bits(index: usize, positions: &[usize]) -> usize {
    positions
        .iter()
        .enumerate()
        .fold(0, |acc, (j, &p)| acc | (((index >> p) & 1) << j))
}

/// Spreads bit `j` of `value` to bit `positions[j]`.
pub(crate) fn deposit_bits(value: usize, positions: &[usize]) -> usize {
    positions
        .iter()
        .enumerate()
        .fold(0, |acc, (j, &p)| acc | (((value >> j) & 1) << p))
}
