// src/simulation/results.rs
use crate::core::{QuantumError, Result};
use std::collections::HashMap;
use std::fmt;

/// Outcome counts over a classical register.
///
/// Keys are classical-register values (bit `i` is classical bit `i`); only
/// outcomes that occurred are stored, so every count is at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: HashMap<u64, usize>,
    num_bits: usize,
    shots: usize,
}

impl Histogram {
    /// Creates an empty histogram over `num_bits` classical bits.
    pub fn new(num_bits: usize) -> Self {
        Self { counts: HashMap::new(), num_bits, shots: 0 }
    }

    /// Builds a histogram from externally produced counts, e.g. a remote backend.
    /// Zero counts are dropped; outcomes wider than `num_bits` are rejected.
    pub fn from_counts(num_bits: usize, counts: impl IntoIterator<Item = (u64, usize)>) -> Result<Self> {
        let mut histogram = Self::new(num_bits);
        for (outcome, count) in counts {
            if num_bits < 64 && outcome >> num_bits != 0 {
                return Err(QuantumError::invalid_parameter(format!(
                    "outcome {} does not fit in {} classical bits",
                    outcome, num_bits
                )));
            }
            histogram.record_many(outcome, count);
        }
        Ok(histogram)
    }

    /// Records one occurrence of `outcome`.
    pub(crate) fn record(&mut self, outcome: u64) {
        self.record_many(outcome, 1);
    }

    fn record_many(&mut self, outcome: u64, count: usize) {
        if count == 0 {
            return;
        }
        *self.counts.entry(outcome).or_insert(0) += count;
        self.shots += count;
    }

    /// Number of times `outcome` was observed.
    pub fn count(&self, outcome: u64) -> usize {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Count for a bitstring written most-significant bit first, e.g. `"011"`.
    /// Unparseable strings count as zero.
    pub fn count_bitstring(&self, bits: &str) -> usize {
        u64::from_str_radix(bits, 2).map_or(0, |outcome| self.count(outcome))
    }

    /// Total number of shots recorded.
    pub fn shots(&self) -> usize {
        self.shots
    }

    /// Width of the classical register.
    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// `true` when no shot was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(outcome, count)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, usize)> + '_ {
        self.counts.iter().map(|(k, v)| (*k, *v))
    }

    /// Most frequent outcome; ties go to the smaller outcome.
    pub fn most_frequent(&self) -> Option<(u64, usize)> {
        self.sorted_by_count().into_iter().next()
    }

    /// Outcomes ordered by descending count, then ascending value.
    pub fn sorted_by_count(&self) -> Vec<(u64, usize)> {
        let mut entries: Vec<(u64, usize)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        entries
    }

    /// Relative frequency of each outcome, ordered by outcome value.
    pub fn probabilities(&self) -> Vec<(u64, f64)> {
        let mut entries: Vec<(u64, f64)> = self
            .iter()
            .map(|(k, v)| (k, v as f64 / self.shots.max(1) as f64))
            .collect();
        entries.sort_by_key(|(k, _)| *k);
        entries
    }

    /// Relative frequency of a single outcome.
    pub fn frequency(&self, outcome: u64) -> f64 {
        if self.shots == 0 {
            0.0
        } else {
            self.count(outcome) as f64 / self.shots as f64
        }
    }

    /// Formats `outcome` as a bitstring of this register's width, MSB first.
    pub fn bitstring(&self, outcome: u64) -> String {
        format_bits(outcome, self.num_bits)
    }
}

/// Formats `value` as `width` binary digits, most significant first.
pub fn format_bits(value: u64, width: usize) -> String {
    format!("{:0width$b}", value, width = width)
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Histogram ({} shots over {} bits):", self.shots, self.num_bits)?;
        if self.counts.is_empty() {
            writeln!(f, "  No outcomes recorded.")?;
        }
        let mut sorted: Vec<_> = self.counts.iter().collect();
        sorted.sort_by_key(|(outcome, _)| **outcome);
        for (outcome, count) in sorted {
            writeln!(
                f,
                "  {}: {} ({:.3})",
                self.bitstring(*outcome),
                count,
                *count as f64 / self.shots.max(1) as f64
            )?;
        }
        Ok(())
    }
}
