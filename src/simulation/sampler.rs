// src/simulation/sampler.rs

//! Measurement statistics: marginal probabilities and seeded shot sampling.

use crate::core::{AMPLITUDE_TOLERANCE, StateVector};
use crate::simulation::Histogram;
use rand::Rng;
use std::collections::BTreeMap;

/// Probability of each classical-register value.
///
/// `measured[c]` names the qubit read into classical bit `c` (`None` leaves
/// the bit at 0). Unmeasured qubits are marginalized out by summing every
/// basis state that shares the same measured-bit pattern.
pub fn probabilities(state: &StateVector, measured: &[Option<usize>]) -> BTreeMap<u64, f64> {
    let mut distribution = BTreeMap::new();
    for (index, amp) in state.amplitudes().iter().enumerate() {
        let p = amp.norm_sqr();
        if p < AMPLITUDE_TOLERANCE {
            continue;
        }
        let outcome = measured
            .iter()
            .enumerate()
            .filter_map(|(clbit, qubit)| qubit.map(|q| (clbit, q)))
            .fold(0u64, |acc, (clbit, q)| acc | ((((index >> q) & 1) as u64) << clbit));
        *distribution.entry(outcome).or_insert(0.0) += p;
    }
    distribution
}

/// Draws `shots` independent outcomes from `distribution`.
///
/// Outcomes are visited in ascending order, so equal seeds give equal
/// histograms. The distribution is renormalized by its own total.
pub fn sample<R: Rng + ?Sized>(
    distribution: &BTreeMap<u64, f64>,
    shots: usize,
    num_bits: usize,
    rng: &mut R,
) -> Histogram {
    let mut histogram = Histogram::new(num_bits);
    let cumulative: Vec<(u64, f64)> = distribution
        .iter()
        .scan(0.0, |acc, (outcome, p)| {
            *acc += p;
            Some((*outcome, *acc))
        })
        .collect();
    let Some(&(last_outcome, total)) = cumulative.last() else {
        return histogram;
    };

    for _ in 0..shots {
        let draw = rng.random::<f64>() * total;
        let slot = cumulative.partition_point(|(_, c)| *c <= draw);
        // A draw landing exactly on `total` through rounding maps to the last outcome.
        let outcome = cumulative.get(slot).map_or(last_outcome, |(o, _)| *o);
        histogram.record(outcome);
    }
    histogram
}
