//! Grover search for randomly chosen marked states.

use qalgos::algorithms::GroverSearch;
use qalgos::simulation::format_bits;
use qalgos::{LocalBackend, ReportSink, RunConfig, TracingReporter};

const NUM_QUBITS: usize = 4;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).with_target(false).init();

    let config = RunConfig::default();
    let mut rng = config.rng();
    let search = GroverSearch::random(NUM_QUBITS, &mut rng)?;
    let marked: Vec<String> = search.solutions().iter().map(|s| format_bits(*s, NUM_QUBITS)).collect();
    println!("Marked states: {}", marked.join(", "));
    println!("Iterations: {}", search.iterations());

    let outcome = search.run(&mut LocalBackend::new(), config.shots, &mut rng)?;
    TracingReporter.report("grover", outcome.histogram(), &outcome);
    println!("{}", outcome);
    Ok(())
}
