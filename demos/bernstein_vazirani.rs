//! Bernstein-Vazirani on a random secret string.

use qalgos::algorithms::BernsteinVazirani;
use qalgos::simulation::format_bits;
use qalgos::{LocalBackend, ReportSink, RunConfig, TracingReporter};

const NUM_QUBITS: usize = 6;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).with_target(false).init();

    let config = RunConfig::default();
    let mut rng = config.rng();
    let bv = BernsteinVazirani::random(NUM_QUBITS, &mut rng)?;
    println!("Hidden string: {}", format_bits(bv.secret(), NUM_QUBITS));

    let outcome = bv.run(&mut LocalBackend::new(), config.shots, &mut rng)?;
    TracingReporter.report("bernstein-vazirani", &outcome.histogram, &outcome);
    println!("{}", outcome);
    Ok(())
}
