// src/report/mod.rs

//! Reporting sinks for driver results.
//!
//! Drivers produce a [`Histogram`] plus an interpretation; how those are
//! shown (plots, logs, files) is the sink's business.

use crate::simulation::Histogram;
use std::fmt;
use tracing::info;

/// Receives each driver's histogram and interpretation.
pub trait ReportSink {
    fn report(&mut self, algorithm: &str, histogram: &Histogram, interpretation: &dyn fmt::Display);
}

/// Emits reports as `tracing` events at INFO level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ReportSink for TracingReporter {
    fn report(&mut self, algorithm: &str, histogram: &Histogram, interpretation: &dyn fmt::Display) {
        info!(algorithm, shots = histogram.shots(), distinct = histogram.len(), "{}", interpretation);
        for (outcome, count) in histogram.sorted_by_count() {
            info!(
                algorithm,
                outcome = %histogram.bitstring(outcome),
                count,
                probability = histogram.frequency(outcome),
                "histogram entry"
            );
        }
    }
}

/// One captured report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub algorithm: String,
    pub histogram: Histogram,
    pub interpretation: String,
}

/// Keeps every report in memory, in arrival order.
#[derive(Debug, Default, Clone)]
pub struct MemoryReporter {
    entries: Vec<ReportEntry>,
}

impl MemoryReporter {
    /// An empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports received so far, oldest first.
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }
}

impl ReportSink for MemoryReporter {
    fn report(&mut self, algorithm: &str, histogram: &Histogram, interpretation: &dyn fmt::Display) {
        self.entries.push(ReportEntry {
            algorithm: algorithm.to_string(),
            histogram: histogram.clone(),
            interpretation: interpretation.to_string(),
        });
    }
}
