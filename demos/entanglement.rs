//! Superposition of one qubit, then a Bell pair.

use qalgos::algorithms::{bell_pair, superposition};
use qalgos::{LocalBackend, ReportSink, RunConfig, TracingReporter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).with_target(false).init();

    let config = RunConfig::default();
    let mut rng = config.rng();
    let mut backend = LocalBackend::new();
    let mut reporter = TracingReporter;

    let histogram = superposition(&mut backend, config.shots, &mut rng)?;
    reporter.report("superposition", &histogram, &"H|0> measured");
    println!("{}", histogram);

    let bell = bell_pair(&mut backend, config.shots, &mut rng)?;
    reporter.report("bell-pair", &bell.histogram, &bell);
    println!("{}", bell.histogram);
    Ok(())
}
