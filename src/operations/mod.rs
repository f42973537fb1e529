// src/operations/mod.rs

//! Gate kinds and circuit operations.
//!
//! The gate set is closed: exactly the unitaries the algorithm drivers need.
//! Every gate carries its operand list, control qubits first and targets last.

use crate::core::{QuantumError, QubitId, Result};
use std::collections::HashSet;
use std::fmt;

/// A unitary acting on an explicit list of qubits.
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    /// Hadamard.
    H(usize),
    /// Pauli X (bit flip).
    X(usize),
    /// Pauli Z (phase flip).
    Z(usize),
    /// Controlled X.
    Cx {
        /// Control qubit.
        control: usize,
        /// Flipped qubit.
        target: usize,
    },
    /// Exchange of two qubits.
    Swap(usize, usize),
    /// X on `target` when every control is 1. With no controls this is plain X.
    Mcx {
        /// Control qubits.
        controls: Vec<usize>,
        /// Flipped qubit.
        target: usize,
    },
    /// When `control` is 1, the value `v` held by `targets` (targets[0] is the
    /// least significant bit) becomes `table[v]`.
    ControlledPermutation {
        /// Control qubit.
        control: usize,
        /// Target register, least significant qubit first.
        targets: Vec<usize>,
        /// Bijection over `0..2^targets.len()`.
        table: Vec<usize>,
    },
    /// Inverse quantum Fourier transform over `qubits` (qubits[0] least significant).
    InverseQft {
        /// Register the transform acts on.
        qubits: Vec<usize>,
    },
}

impl Gate {
    /// Short lowercase mnemonic.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H(_) => "h",
            Gate::X(_) => "x",
            Gate::Z(_) => "z",
            Gate::Cx { .. } => "cx",
            Gate::Swap(..) => "swap",
            Gate::Mcx { .. } => "mcx",
            Gate::ControlledPermutation { .. } => "cperm",
            Gate::InverseQft { .. } => "iqft",
        }
    }

    /// Operand list, controls first and targets last.
    pub fn qubits(&self) -> Vec<usize> {
        match self {
            Gate::H(q) | Gate::X(q) | Gate::Z(q) => vec![*q],
            Gate::Cx { control, target } => vec![*control, *target],
            Gate::Swap(a, b) => vec![*a, *b],
            Gate::Mcx { controls, target } => {
                let mut qubits = controls.clone();
                qubits.push(*target);
                qubits
            }
            Gate::ControlledPermutation { control, targets, .. } => {
                let mut qubits = vec![*control];
                qubits.extend_from_slice(targets);
                qubits
            }
            Gate::InverseQft { qubits } => qubits.clone(),
        }
    }

    /// Checks operand ranges, duplicates and permutation tables against a
    /// register of `width` qubits.
    pub fn validate(&self, width: usize) -> Result<()> {
        let qubits = self.qubits();
        let mut seen = HashSet::with_capacity(qubits.len());
        for &q in &qubits {
            if q >= width {
                return Err(QuantumError::QubitOutOfRange { qubit: QubitId(q), width });
            }
            if !seen.insert(q) {
                return Err(QuantumError::DuplicateQubit { qubit: QubitId(q), gate: self.name() });
            }
        }
        if let Gate::ControlledPermutation { targets, table, .. } = self {
            validate_permutation(targets.len(), table)?;
        }
        Ok(())
    }

    /// Copy of this gate with every qubit index shifted by `offset`.
    pub fn shifted(&self, offset: usize) -> Gate {
        let shift = |q: &usize| q + offset;
        match self {
            Gate::H(q) => Gate::H(q + offset),
            Gate::X(q) => Gate::X(q + offset),
            Gate::Z(q) => Gate::Z(q + offset),
            Gate::Cx { control, target } => Gate::Cx { control: control + offset, target: target + offset },
            Gate::Swap(a, b) => Gate::Swap(a + offset, b + offset),
            Gate::Mcx { controls, target } => Gate::Mcx {
                controls: controls.iter().map(shift).collect(),
                target: target + offset,
            },
            Gate::ControlledPermutation { control, targets, table } => Gate::ControlledPermutation {
                control: control + offset,
                targets: targets.iter().map(shift).collect(),
                table: table.clone(),
            },
            Gate::InverseQft { qubits } => Gate::InverseQft { qubits: qubits.iter().map(shift).collect() },
        }
    }
}

/// Checks that `table` is a bijection over `0..2^bits`.
pub(crate) fn validate_permutation(bits: usize, table: &[usize]) -> Result<()> {
    let size = 1usize << bits;
    if table.len() != size {
        return Err(QuantumError::InvalidPermutation {
            message: format!("expected {} entries for {} target qubits, got {}", size, bits, table.len()),
        });
    }
    let mut hit = vec![false; size];
    for (from, &to) in table.iter().enumerate() {
        if to >= size {
            return Err(QuantumError::InvalidPermutation {
                message: format!("entry {} maps to {} which is outside 0..{}", from, to, size),
            });
        }
        if std::mem::replace(&mut hit[to], true) {
            return Err(QuantumError::InvalidPermutation {
                message: format!("value {} is the image of more than one entry", to),
            });
        }
    }
    Ok(())
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        let operands: Vec<String> = self.qubits().iter().map(|q| QubitId(*q).to_string()).collect();
        write!(f, " {}", operands.join(", "))
    }
}

/// One step of a circuit, executed in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// A unitary gate.
    Gate(Gate),
    /// Marks `qubit` to be read into classical bit `clbit` once evolution ends.
    Measure {
        /// Measured qubit.
        qubit: usize,
        /// Receiving classical bit.
        clbit: usize,
    },
}

impl Operation {
    /// Qubits touched by the operation.
    pub fn involved_qubits(&self) -> Vec<usize> {
        match self {
            Operation::Gate(gate) => gate.qubits(),
            Operation::Measure { qubit, .. } => vec![*qubit],
        }
    }

    /// Copy with qubit indices shifted by `offset`; classical bits are kept.
    pub fn shifted(&self, offset: usize) -> Operation {
        match self {
            Operation::Gate(gate) => Operation::Gate(gate.shifted(offset)),
            Operation::Measure { qubit, clbit } => Operation::Measure { qubit: qubit + offset, clbit: *clbit },
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Gate(gate) => write!(f, "{}", gate),
            Operation::Measure { qubit, clbit } => write!(f, "measure {} -> c[{}]", QubitId(*qubit), clbit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operands_list_controls_before_targets() {
        let gate = Gate::Mcx { controls: vec![2, 0], target: 1 };
        assert_eq!(gate.qubits(), vec![2, 0, 1]);
        let perm = Gate::ControlledPermutation { control: 4, targets: vec![0, 1], table: vec![1, 2, 3, 0] };
        assert_eq!(perm.qubits(), vec![4, 0, 1]);
    }

    #[test]
    fn validate_rejects_duplicates_and_out_of_range() {
        let dup = Gate::Cx { control: 1, target: 1 };
        assert!(matches!(dup.validate(3), Err(QuantumError::DuplicateQubit { .. })));

        let wide = Gate::H(3);
        assert_eq!(
            wide.validate(3),
            Err(QuantumError::QubitOutOfRange { qubit: QubitId(3), width: 3 })
        );
    }

    #[test]
    fn validate_rejects_non_bijective_table() {
        let gate = Gate::ControlledPermutation { control: 2, targets: vec![0, 1], table: vec![0, 1, 1, 3] };
        assert!(matches!(gate.validate(3), Err(QuantumError::InvalidPermutation { .. })));

        let short = Gate::ControlledPermutation { control: 2, targets: vec![0, 1], table: vec![0, 1] };
        assert!(matches!(short.validate(3), Err(QuantumError::InvalidPermutation { .. })));
    }

    #[test]
    fn shifting_moves_every_operand() {
        let gate = Gate::InverseQft { qubits: vec![0, 1, 2] }.shifted(3);
        assert_eq!(gate.qubits(), vec![3, 4, 5]);
        let measure = Operation::Measure { qubit: 1, clbit: 1 }.shifted(2);
        assert_eq!(measure, Operation::Measure { qubit: 3, clbit: 1 });
    }
}
