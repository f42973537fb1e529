// src/backend/mod.rs

//! Execution backends: anything that turns a finished circuit and a shot
//! count into a [`Histogram`].
//!
//! Algorithm drivers only talk to [`Backend`], so the local simulator can be
//! swapped for a remote or hardware path without touching driver code.

use crate::circuits::Circuit;
use crate::core::Result;
use crate::simulation::{Histogram, Simulator};
use rand::RngCore;

/// `(Circuit, shots) -> Histogram`.
///
/// Implementations that talk to external services report failures as
/// [`crate::QuantumError::Backend`]; drivers propagate that error instead of
/// treating it as an inconclusive run. `rng` is the caller's sampling source;
/// backends that sample elsewhere may ignore it.
pub trait Backend {
    /// Human readable backend name.
    fn name(&self) -> &str;

    /// Executes `circuit` `shots` times.
    fn execute(&mut self, circuit: &Circuit, shots: usize, rng: &mut dyn RngCore) -> Result<Histogram>;
}

/// In-process dense statevector backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalBackend {
    simulator: Simulator,
}

impl LocalBackend {
    /// Backend over a default [`Simulator`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend over a custom simulator, e.g. a tighter norm tolerance.
    pub fn with_simulator(simulator: Simulator) -> Self {
        Self { simulator }
    }

    /// The wrapped simulator.
    pub fn simulator(&self) -> &Simulator {
        &self.simulator
    }
}

impl Backend for LocalBackend {
    fn name(&self) -> &str {
        "local-statevector"
    }

    fn execute(&mut self, circuit: &Circuit, shots: usize, rng: &mut dyn RngCore) -> Result<Histogram> {
        self.simulator.run(circuit, shots, rng)
    }
}

impl<B: Backend + ?Sized> Backend for &mut B {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn execute(&mut self, circuit: &Circuit, shots: usize, rng: &mut dyn RngCore) -> Result<Histogram> {
        (**self).execute(circuit, shots, rng)
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn execute(&mut self, circuit: &Circuit, shots: usize, rng: &mut dyn RngCore) -> Result<Histogram> {
        (**self).execute(circuit, shots, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::CircuitBuilder;
    use crate::core::QuantumError;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct Unreachable;

    impl Backend for Unreachable {
        fn name(&self) -> &str {
            "unreachable"
        }

        fn execute(&mut self, _: &Circuit, _: usize, _: &mut dyn RngCore) -> Result<Histogram> {
            Err(QuantumError::Backend { backend: self.name().to_string(), message: "connection refused".into() })
        }
    }

    #[test]
    fn local_backend_runs_circuits() -> Result<()> {
        let circuit = CircuitBuilder::new(2, 2).x(1).measure_all().build()?;
        let mut backend = LocalBackend::new();
        let histogram = backend.execute(&circuit, 20, &mut StdRng::seed_from_u64(5))?;
        assert_eq!(histogram.count_bitstring("10"), 20);
        Ok(())
    }

    #[test]
    fn boxed_backends_are_interchangeable() -> Result<()> {
        let circuit = CircuitBuilder::new(1, 1).measure_all().build()?;
        let mut backends: Vec<Box<dyn Backend>> = vec![Box::new(LocalBackend::new()), Box::new(Unreachable)];
        let mut rng = StdRng::seed_from_u64(9);
        assert!(backends[0].execute(&circuit, 5, &mut rng).is_ok());
        let err = backends[1].execute(&circuit, 5, &mut rng).unwrap_err();
        assert!(matches!(err, QuantumError::Backend { .. }));
        Ok(())
    }
}
