// src/lib.rs

//! `qalgos` - textbook quantum algorithms on a dense statevector simulator
//!
//! The crate has two halves. The first is a small circuit engine: a closed
//! gate set, circuits with index-shifted composition, a statevector engine
//! and a seeded sampler. The second is a set of algorithm drivers
//! (Deutsch-Jozsa, Grover, Bernstein-Vazirani, Simon, Shor) that build their
//! oracles, run them through a [`Backend`] and interpret the histograms
//! classically.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod validation;
pub mod backend;
pub mod report;
pub mod config;
pub mod algorithms;

// Re-export the most common types for easier top-level use
pub use self::core::{QuantumError, QubitId, Result, StateVector};
pub use operations::{Gate, Operation};
pub use circuits::{Circuit, CircuitBuilder};
pub use simulation::{Histogram, SimulationEngine, Simulator};
pub use backend::{Backend, LocalBackend};
pub use report::{MemoryReporter, ReportSink, TracingReporter};
pub use config::{QubitBounds, RunConfig};
pub use validation::{check_normalization, validate_state};

// Example 1: Bell pair
// Builds H(0), CX(0 -> 1) and samples it with a seeded generator. Only the
// correlated outcomes can appear.
/// ```
/// use qalgos::{CircuitBuilder, Simulator, RunConfig, QuantumError};
///
/// let circuit = CircuitBuilder::named(2, 2, "bell")
///     .h(0)
///     .cx(0, 1)
///     .measure_all()
///     .build()?;
///
/// let config = RunConfig::default().with_seed(42);
/// let histogram = Simulator::new().run(&circuit, config.shots, &mut config.rng())?;
/// println!("Circuit:\n{}", circuit);
/// println!("Result:\n{}", histogram);
///
/// assert_eq!(histogram.count_bitstring("00") + histogram.count_bitstring("11"), 500);
/// assert_eq!(histogram.count_bitstring("01"), 0);
/// # Ok::<(), QuantumError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Bernstein-Vazirani through a backend
// The hidden string is recovered from a single execution.
/// ```
/// use qalgos::algorithms::BernsteinVazirani;
/// use qalgos::{LocalBackend, RunConfig, QuantumError};
///
/// let config = RunConfig::default().with_shots(32);
/// let bv = BernsteinVazirani::new(5, 0b10110)?;
/// let outcome = bv.run(&mut LocalBackend::new(), config.shots, &mut config.rng())?;
/// println!("{}", outcome);
///
/// assert_eq!(outcome.recovered, Some(0b10110));
/// assert!(outcome.correct);
/// # Ok::<(), QuantumError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
