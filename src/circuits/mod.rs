// src/circuits/mod.rs

//! Ordered sequences of gates and measurement markers over a fixed register.
//!
//! Operations execute in exactly the order they were added. Nothing here
//! reorders or merges gates: oracle uncomputation (X on, controlled op, X off)
//! depends on the literal sequence.

use crate::core::{MAX_CLBITS, QuantumError, QubitId, Result};
use crate::operations::{Gate, Operation};
use std::fmt;
use tracing::debug;

/// A fixed-width circuit: qubit count, classical bit count and the ordered
/// list of operations.
///
/// Composition copies operations into the parent with shifted indices, so a
/// circuit never references another one.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    name: Option<String>,
    num_qubits: usize,
    num_clbits: usize,
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates an empty circuit.
    pub fn new(num_qubits: usize, num_clbits: usize) -> Self {
        Self { name: None, num_qubits, num_clbits, operations: Vec::new() }
    }

    /// Creates an empty named circuit (oracle, diffuser, state initialization...).
    pub fn with_name(num_qubits: usize, num_clbits: usize, name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::new(num_qubits, num_clbits) }
    }

    /// Appends a gate after validating its operands.
    pub fn add_gate(&mut self, gate: Gate) -> Result<&mut Self> {
        gate.validate(self.num_qubits)?;
        self.operations.push(Operation::Gate(gate));
        Ok(self)
    }

    /// Marks `qubit` to be read into classical bit `clbit`.
    ///
    /// Several qubits may target the same classical bit; the last marker wins.
    ///
    /// # Arguments
    /// * `qubit` - Measured qubit, below `num_qubits`.
    /// * `clbit` - Destination bit, below both `num_clbits` and [`MAX_CLBITS`].
    pub fn add_measurement(&mut self, qubit: usize, clbit: usize) -> Result<&mut Self> {
        if qubit >= self.num_qubits {
            return Err(QuantumError::QubitOutOfRange { qubit: QubitId(qubit), width: self.num_qubits });
        }
        self.check_clbit(clbit)?;
        self.operations.push(Operation::Measure { qubit, clbit });
        Ok(self)
    }

    /// Measures `qubits[i]` into `clbits[i]`.
    pub fn measure_range(&mut self, qubits: &[usize], clbits: &[usize]) -> Result<&mut Self> {
        if qubits.len() != clbits.len() {
            return Err(QuantumError::invalid_parameter(format!(
                "measure_range got {} qubits but {} classical bits",
                qubits.len(),
                clbits.len()
            )));
        }
        for (&q, &c) in qubits.iter().zip(clbits) {
            self.add_measurement(q, c)?;
        }
        Ok(self)
    }

    /// Measures qubit `i` into classical bit `i` for every pair both widths allow.
    pub fn measure_all(&mut self) -> Result<&mut Self> {
        for i in 0..self.num_qubits.min(self.num_clbits) {
            self.add_measurement(i, i)?;
        }
        Ok(self)
    }

    /// Inlines `sub` with every qubit index shifted by `qubit_offset`,
    /// preserving its operation order.
    pub fn compose(&mut self, sub: &Circuit, qubit_offset: usize) -> Result<&mut Self> {
        if sub.num_qubits + qubit_offset > self.num_qubits {
            return Err(QuantumError::CompositionOverflow {
                sub_width: sub.num_qubits,
                offset: qubit_offset,
                width: self.num_qubits,
            });
        }
        for op in &sub.operations {
            if let Operation::Measure { clbit, .. } = op {
                self.check_clbit(*clbit)?;
            }
        }
        debug!(
            block = sub.name.as_deref().unwrap_or("<anonymous>"),
            operations = sub.operations.len(),
            offset = qubit_offset,
            "composing sub-circuit"
        );
        self.operations.extend(sub.operations.iter().map(|op| op.shifted(qubit_offset)));
        Ok(self)
    }

    /// Outcomes are packed into a `u64`, so bits past [`MAX_CLBITS`] are
    /// rejected even when the circuit declares them.
    fn check_clbit(&self, clbit: usize) -> Result<()> {
        let width = self.num_clbits.min(MAX_CLBITS);
        if clbit >= width {
            return Err(QuantumError::ClassicalBitOutOfRange { clbit, width });
        }
        Ok(())
    }

    /// Appends a Hadamard on `qubit`.
    pub fn h(&mut self, qubit: usize) -> Result<&mut Self> {
        self.add_gate(Gate::H(qubit))
    }

    /// Appends a Pauli-X (NOT) on `qubit`.
    pub fn x(&mut self, qubit: usize) -> Result<&mut Self> {
        self.add_gate(Gate::X(qubit))
    }

    /// Appends a Pauli-Z (phase flip) on `qubit`.
    pub fn z(&mut self, qubit: usize) -> Result<&mut Self> {
        self.add_gate(Gate::Z(qubit))
    }

    /// Appends a controlled-X.
    ///
    /// # Arguments
    /// * `control` - Qubit that must be |1> for the flip.
    /// * `target` - Qubit that is flipped.
    pub fn cx(&mut self, control: usize, target: usize) -> Result<&mut Self> {
        self.add_gate(Gate::Cx { control, target })
    }

    /// Exchanges qubits `a` and `b`.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<&mut Self> {
        self.add_gate(Gate::Swap(a, b))
    }

    /// Flips `target` when every qubit in `controls` is |1>. An empty
    /// control list is a plain X.
    pub fn mcx(&mut self, controls: &[usize], target: usize) -> Result<&mut Self> {
        self.add_gate(Gate::Mcx { controls: controls.to_vec(), target })
    }

    /// Hadamard on every qubit of `qubits`.
    pub fn h_all(&mut self, qubits: impl IntoIterator<Item = usize>) -> Result<&mut Self> {
        for q in qubits {
            self.h(q)?;
        }
        Ok(self)
    }

    /// X on every qubit of `qubits`.
    pub fn x_all(&mut self, qubits: impl IntoIterator<Item = usize>) -> Result<&mut Self> {
        for q in qubits {
            self.x(q)?;
        }
        Ok(self)
    }

    /// Label given by [`Circuit::with_name`], if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Width of the quantum register.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Width of the classical register.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    /// Operations in execution order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Gates in execution order, skipping measurement markers.
    pub fn gates(&self) -> impl Iterator<Item = &Gate> {
        self.operations.iter().filter_map(|op| match op {
            Operation::Gate(gate) => Some(gate),
            Operation::Measure { .. } => None,
        })
    }

    /// For each classical bit, the qubit measured into it (last marker wins).
    pub fn measurement_map(&self) -> Vec<Option<usize>> {
        let mut map = vec![None; self.num_clbits];
        for op in &self.operations {
            if let Operation::Measure { qubit, clbit } = op {
                map[*clbit] = Some(*qubit);
            }
        }
        map
    }

    /// `true` when at least one measurement marker is present.
    pub fn has_measurements(&self) -> bool {
        self.operations.iter().any(|op| matches!(op, Operation::Measure { .. }))
    }

    /// Number of operations, measurements included.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// `true` when no operation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit{}[{} operations on {} qubits, {} classical bits]",
            self.name.as_ref().map(|n| format!(" '{}'", n)).unwrap_or_default(),
            self.operations.len(),
            self.num_qubits,
            self.num_clbits
        )?;
        for (t, op) in self.operations.iter().enumerate() {
            writeln!(f, "  {:>4}: {}", t, op)?;
        }
        Ok(())
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Chaining front end for [`Circuit`].
///
/// The first construction error is remembered, later calls are ignored, and
/// [`CircuitBuilder::build`] returns that error.
pub struct CircuitBuilder {
    circuit: Circuit,
    error: Option<QuantumError>,
}

impl CircuitBuilder {
    /// Starts an empty, unnamed circuit.
    pub fn new(num_qubits: usize, num_clbits: usize) -> Self {
        Self { circuit: Circuit::new(num_qubits, num_clbits), error: None }
    }

    /// Starts an empty circuit labelled `name`.
    pub fn named(num_qubits: usize, num_clbits: usize, name: impl Into<String>) -> Self {
        Self { circuit: Circuit::with_name(num_qubits, num_clbits, name), error: None }
    }

    fn apply(mut self, step: impl FnOnce(&mut Circuit) -> Result<&mut Circuit>) -> Self {
        if self.error.is_none() {
            if let Err(e) = step(&mut self.circuit) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Appends any [`Gate`].
    pub fn gate(self, gate: Gate) -> Self {
        self.apply(|c| c.add_gate(gate))
    }

    /// See [`Circuit::h`].
    pub fn h(self, qubit: usize) -> Self {
        self.gate(Gate::H(qubit))
    }

    /// See [`Circuit::x`].
    pub fn x(self, qubit: usize) -> Self {
        self.gate(Gate::X(qubit))
    }

    /// See [`Circuit::z`].
    pub fn z(self, qubit: usize) -> Self {
        self.gate(Gate::Z(qubit))
    }

    /// See [`Circuit::cx`].
    pub fn cx(self, control: usize, target: usize) -> Self {
        self.gate(Gate::Cx { control, target })
    }

    /// See [`Circuit::swap`].
    pub fn swap(self, a: usize, b: usize) -> Self {
        self.gate(Gate::Swap(a, b))
    }

    /// See [`Circuit::mcx`].
    pub fn mcx(self, controls: &[usize], target: usize) -> Self {
        self.gate(Gate::Mcx { controls: controls.to_vec(), target })
    }

    /// See [`Circuit::add_measurement`].
    pub fn measure(self, qubit: usize, clbit: usize) -> Self {
        self.apply(|c| c.add_measurement(qubit, clbit))
    }

    /// See [`Circuit::measure_all`].
    pub fn measure_all(self) -> Self {
        self.apply(|c| c.measure_all())
    }

    /// See [`Circuit::compose`].
    pub fn compose(self, sub: &Circuit, qubit_offset: usize) -> Self {
        self.apply(|c| c.compose(sub, qubit_offset))
    }

    /// Finalizes the circuit, or returns the first construction error.
    pub fn build(self) -> Result<Circuit> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.circuit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_shifts_indices_and_keeps_order() -> Result<()> {
        let mut oracle = Circuit::with_name(2, 0, "Oracle");
        oracle.x(0)?.cx(0, 1)?.x(0)?;

        let mut parent = Circuit::new(4, 2);
        parent.h(0)?.compose(&oracle, 2)?;

        assert_eq!(
            parent.operations(),
            &[
                Operation::Gate(Gate::H(0)),
                Operation::Gate(Gate::X(2)),
                Operation::Gate(Gate::Cx { control: 2, target: 3 }),
                Operation::Gate(Gate::X(2)),
            ]
        );
        // The source circuit is untouched.
        assert_eq!(oracle.len(), 3);
        Ok(())
    }

    #[test]
    fn compose_rejects_too_wide_sub_circuit() {
        let sub = Circuit::new(3, 0);
        let mut parent = Circuit::new(4, 0);
        let err = parent.compose(&sub, 2).unwrap_err();
        assert_eq!(err, QuantumError::CompositionOverflow { sub_width: 3, offset: 2, width: 4 });
    }

    #[test]
    fn measurement_map_last_marker_wins() -> Result<()> {
        let mut circuit = Circuit::new(4, 2);
        circuit.measure_range(&[2, 3], &[0, 1])?.measure_range(&[0, 1], &[0, 1])?;
        assert_eq!(circuit.measurement_map(), vec![Some(0), Some(1)]);
        Ok(())
    }

    #[test]
    fn measuring_undefined_bits_fails() {
        let mut circuit = Circuit::new(2, 1);
        assert!(matches!(circuit.add_measurement(2, 0), Err(QuantumError::QubitOutOfRange { .. })));
        assert!(matches!(
            circuit.add_measurement(0, 1),
            Err(QuantumError::ClassicalBitOutOfRange { clbit: 1, width: 1 })
        ));
    }

    #[test]
    fn measuring_past_the_packed_register_fails() -> Result<()> {
        let mut wide = Circuit::new(1, 70);
        wide.x(0)?;
        assert_eq!(
            wide.add_measurement(0, 65).map(|_| ()),
            Err(QuantumError::ClassicalBitOutOfRange { clbit: 65, width: MAX_CLBITS })
        );
        wide.add_measurement(0, 63)?;

        let mut sub = Circuit::new(1, 70);
        sub.operations.push(Operation::Measure { qubit: 0, clbit: 64 });
        let err = Circuit::new(1, 70).compose(&sub, 0).map(|_| ()).unwrap_err();
        assert!(err.is_construction_error());
        assert_eq!(wide.measurement_map()[63], Some(0));
        Ok(())
    }

    #[test]
    fn builder_reports_first_error() {
        let result = CircuitBuilder::new(2, 2).h(0).cx(0, 0).x(5).build();
        assert!(matches!(result, Err(QuantumError::DuplicateQubit { .. })));

        let ok = CircuitBuilder::named(2, 2, "Bell").h(0).cx(0, 1).measure_all().build();
        let circuit = ok.expect("valid circuit");
        assert_eq!(circuit.name(), Some("Bell"));
        assert_eq!(circuit.len(), 4);
        assert!(circuit.to_string().contains("cx q[0], q[1]"));
    }
}
