// src/algorithms/shor.rs

//! Shor factoring with order finding by phase estimation.
//!
//! Layout for a modulus of `w` bits with `t` counting qubits: counting
//! register `0..t`, work register `t..t + w` initialized to |1>. Counting
//! qubit `j` controls multiplication by `a^(2^j) mod N` on the work register,
//! expressed as a permutation table computed classically.

use super::execute;
use super::number_theory::{Fraction, bit_width, gcd, is_prime, mod_pow};
use crate::backend::Backend;
use crate::circuits::Circuit;
use crate::config::SHOR_BOUNDS;
use crate::core::{MAX_QUBITS, QuantumError, Result};
use crate::operations::Gate;
use crate::simulation::Histogram;
use rand::RngCore;
use rand::seq::{SliceRandom, index};
use std::fmt;
use tracing::{debug, info, warn};

/// Largest prime used by [`random_semiprime`] in the demos.
pub const MAX_PRIME: u64 = 5;

/// `p * q` for two distinct primes `p, q <= max_prime`.
pub fn random_semiprime(max_prime: u64, rng: &mut dyn RngCore) -> Result<u64> {
    let primes: Vec<u64> = (2..=max_prime).filter(|&n| is_prime(n)).collect();
    if primes.len() < 2 {
        return Err(QuantumError::invalid_parameter(format!(
            "need two distinct primes up to {}, found {}",
            max_prime,
            primes.len()
        )));
    }
    let picked = index::sample(rng, primes.len(), 2);
    Ok(primes[picked.index(0)] * primes[picked.index(1)])
}

/// What happened with one candidate base.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptResult {
    /// `gcd(a, N)` was already a factor; no circuit was run.
    SharedFactor(u64),
    /// No measured phase gave a denominator `r` with `a^r = 1 (mod N)`.
    NoPeriod,
    /// The period is odd.
    OddPeriod(u64),
    /// `a^(r/2) = -1 (mod N)`.
    TrivialRoot(u64),
    /// Both gcds were trivial (only possible for prime powers).
    TrivialFactors(u64),
    /// The period split the modulus.
    Factored(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShorAttempt {
    pub base: u64,
    pub result: AttemptResult,
    /// Counting-register histogram, when a circuit was run.
    pub histogram: Option<Histogram>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShorOutcome {
    /// `factors.0 * factors.1 == modulus`, both non-trivial, smaller first.
    Factored { modulus: u64, factors: (u64, u64), attempts: Vec<ShorAttempt> },
    /// Every base in `2..N` was tried without success.
    Exhausted { modulus: u64, attempts: Vec<ShorAttempt> },
}

impl ShorOutcome {
    /// Every base tried, in order.
    pub fn attempts(&self) -> &[ShorAttempt] {
        match self {
            ShorOutcome::Factored { attempts, .. } | ShorOutcome::Exhausted { attempts, .. } => attempts,
        }
    }

    /// Non-trivial factors, smaller first.
    pub fn factors(&self) -> Option<(u64, u64)> {
        match self {
            ShorOutcome::Factored { factors, .. } => Some(*factors),
            ShorOutcome::Exhausted { .. } => None,
        }
    }

    /// Period found by the last attempt, if it ran a circuit and succeeded.
    pub fn period(&self) -> Option<u64> {
        match self.attempts().last().map(|a| &a.result) {
            Some(AttemptResult::Factored(r)) => Some(*r),
            _ => None,
        }
    }

    /// Histogram of the most recent attempt that ran a circuit.
    pub fn histogram(&self) -> Option<&Histogram> {
        self.attempts().iter().rev().find_map(|a| a.histogram.as_ref())
    }
}

impl fmt::Display for ShorOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShorOutcome::Factored { modulus, factors, attempts } => {
                write!(f, "{} = {} x {} after {} attempt(s)", modulus, factors.0, factors.1, attempts.len())?;
                if let Some(r) = self.period() {
                    write!(f, ", period {}", r)?;
                }
                Ok(())
            }
            ShorOutcome::Exhausted { modulus, attempts } => {
                write!(f, "could not factor {} after {} attempt(s)", modulus, attempts.len())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShorFactoring {
    modulus: u64,
    base: Option<u64>,
    counting_qubits: usize,
}

impl ShorFactoring {
    /// `modulus` must be composite and its bit width within the Shor bounds.
    pub fn new(modulus: u64) -> Result<Self> {
        if modulus < 4 || is_prime(modulus) {
            return Err(QuantumError::invalid_parameter(format!("{} is not composite", modulus)));
        }
        let width = bit_width(modulus);
        SHOR_BOUNDS.check(width, "modulus bit width")?;
        Ok(Self { modulus, base: None, counting_qubits: width })
    }

    /// Modulus drawn by [`random_semiprime`] with [`MAX_PRIME`].
    pub fn random(rng: &mut dyn RngCore) -> Result<Self> {
        Self::new(random_semiprime(MAX_PRIME, rng)?)
    }

    /// Base tried first, `2 <= base < N`.
    pub fn with_base(mut self, base: u64) -> Result<Self> {
        if !(2..self.modulus).contains(&base) {
            return Err(QuantumError::invalid_parameter(format!(
                "base {} must lie in 2..{}",
                base, self.modulus
            )));
        }
        self.base = Some(base);
        Ok(self)
    }

    /// Counting register size; defaults to the modulus bit width.
    pub fn with_counting_qubits(mut self, counting_qubits: usize) -> Result<Self> {
        if counting_qubits == 0 {
            return Err(QuantumError::invalid_parameter("Shor needs at least one counting qubit"));
        }
        let total = counting_qubits + bit_width(self.modulus);
        if total > MAX_QUBITS {
            return Err(QuantumError::TooManyQubits { requested: total, limit: MAX_QUBITS });
        }
        self.counting_qubits = counting_qubits;
        Ok(self)
    }

    /// The number being factored.
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Width of the phase-estimation register.
    pub fn counting_qubits(&self) -> usize {
        self.counting_qubits
    }

    /// `x -> multiplier * x mod N` on `0..N`, identity on `N..2^w`.
    pub fn multiplication_table(&self, multiplier: u64) -> Vec<usize> {
        let n = self.modulus;
        (0..1u64 << bit_width(n))
            .map(|x| if x < n { (multiplier * x % n) as usize } else { x as usize })
            .collect()
    }

    /// Order-finding circuit for `base`, measuring the counting register.
    pub fn circuit(&self, base: u64) -> Result<Circuit> {
        if gcd(base, self.modulus) != 1 {
            return Err(QuantumError::invalid_parameter(format!(
                "base {} shares a factor with {}",
                base, self.modulus
            )));
        }
        let t = self.counting_qubits;
        let w = bit_width(self.modulus);
        let work: Vec<usize> = (t..t + w).collect();
        let mut circuit = Circuit::with_name(t + w, t, format!("shor-{}-mod-{}", base, self.modulus));
        circuit.x(t)?;
        circuit.h_all(0..t)?;
        let mut multiplier = base % self.modulus;
        for j in 0..t {
            circuit.add_gate(Gate::ControlledPermutation {
                control: j,
                targets: work.clone(),
                table: self.multiplication_table(multiplier),
            })?;
            multiplier = mod_pow(multiplier, 2, self.modulus);
        }
        circuit.add_gate(Gate::InverseQft { qubits: (0..t).collect() })?;
        for j in 0..t {
            circuit.add_measurement(j, j)?;
        }
        Ok(circuit)
    }

    /// Smallest `r` with `a^r = 1 (mod N)` among the denominators of the
    /// measured phases, scanning the most frequent outcomes first.
    pub fn extract_period(&self, base: u64, histogram: &Histogram) -> Option<u64> {
        let scale = 1u64 << self.counting_qubits;
        histogram
            .sorted_by_count()
            .into_iter()
            .map(|(measured, _)| Fraction::new(measured, scale).limit_denominator(self.modulus - 1).denom)
            .filter(|&r| mod_pow(base, r, self.modulus) == 1)
            .min()
    }

    /// Classical tail: turns a period into factors or a typed rejection.
    fn split(&self, base: u64, period: u64) -> (AttemptResult, Option<(u64, u64)>) {
        let n = self.modulus;
        if period % 2 == 1 {
            return (AttemptResult::OddPeriod(period), None);
        }
        let root = mod_pow(base, period / 2, n);
        if root == n - 1 {
            return (AttemptResult::TrivialRoot(period), None);
        }
        let candidates = [gcd(root + n - 1, n), gcd(root + 1, n)];
        match candidates.into_iter().find(|&f| f > 1 && f < n) {
            Some(f) => (AttemptResult::Factored(period), Some(ordered(f, n / f))),
            None => (AttemptResult::TrivialFactors(period), None),
        }
    }

    /// The caller's base first, then the other residues in random order.
    fn bases(&self, rng: &mut dyn RngCore) -> Vec<u64> {
        let mut rest: Vec<u64> = (2..self.modulus).filter(|&a| Some(a) != self.base).collect();
        rest.shuffle(rng);
        self.base.into_iter().chain(rest).collect()
    }

    /// Tries bases until one splits the modulus or all of `2..N` are spent.
    /// A base sharing a factor with `N` succeeds without running a circuit.
    ///
    /// # Arguments
    /// * `backend` - Where the circuit is executed.
    /// * `shots` - Samples per execution, at least 1.
    /// * `rng` - Sampling source handed to the backend.
    pub fn run<B: Backend + ?Sized>(&self, backend: &mut B, shots: usize, rng: &mut dyn RngCore) -> Result<ShorOutcome> {
        let n = self.modulus;
        let mut attempts = Vec::new();
        for base in self.bases(rng) {
            let shared = gcd(base, n);
            if shared != 1 {
                info!(modulus = n, base, factor = shared, "base shares a factor with the modulus");
                attempts.push(ShorAttempt { base, result: AttemptResult::SharedFactor(shared), histogram: None });
                return Ok(ShorOutcome::Factored { modulus: n, factors: ordered(shared, n / shared), attempts });
            }

            let histogram = execute(backend, &self.circuit(base)?, shots, rng)?;
            let (result, factors) = match self.extract_period(base, &histogram) {
                Some(period) => self.split(base, period),
                None => (AttemptResult::NoPeriod, None),
            };
            debug!(modulus = n, base, result = ?result, "order finding attempt");
            attempts.push(ShorAttempt { base, result, histogram: Some(histogram) });
            if let Some(factors) = factors {
                info!(modulus = n, base, p = factors.0, q = factors.1, "factored");
                return Ok(ShorOutcome::Factored { modulus: n, factors, attempts });
            }
        }
        warn!(modulus = n, attempts = attempts.len(), "every base failed");
        Ok(ShorOutcome::Exhausted { modulus: n, attempts })
    }
}

fn ordered(a: u64, b: u64) -> (u64, u64) {
    (a.min(b), a.max(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LocalBackend;
    use crate::simulation::Simulator;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn multiplication_tables_are_permutations() -> Result<()> {
        let shor = ShorFactoring::new(15)?;
        let table = shor.multiplication_table(7);
        assert_eq!(table.len(), 16);
        assert_eq!(&table[..5], &[0, 7, 14, 6, 13]);
        assert_eq!(table[15], 15);
        let mut sorted = table.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..16).collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn phases_for_base_two_mod_fifteen() -> Result<()> {
        let shor = ShorFactoring::new(15)?;
        let probabilities = Simulator::new().probabilities(&shor.circuit(2)?)?;
        let outcomes: Vec<u64> = probabilities.keys().copied().collect();
        assert_eq!(outcomes, vec![0, 4, 8, 12]);
        for p in probabilities.values() {
            assert!((p - 0.25).abs() < 1e-9);
        }
        Ok(())
    }

    #[test]
    fn factors_fifteen_with_base_two() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(15);
        let shor = ShorFactoring::new(15)?.with_base(2)?;
        let outcome = shor.run(&mut LocalBackend::new(), 200, &mut rng)?;
        assert_eq!(outcome.factors(), Some((3, 5)));
        assert_eq!(outcome.period(), Some(4));
        assert_eq!(outcome.attempts().len(), 1);
        assert!(outcome.histogram().is_some());
        Ok(())
    }

    #[test]
    fn shared_factor_skips_the_circuit() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = ShorFactoring::new(15)?.with_base(6)?.run(&mut LocalBackend::new(), 10, &mut rng)?;
        assert_eq!(outcome.factors(), Some((3, 5)));
        assert_eq!(outcome.attempts()[0].result, AttemptResult::SharedFactor(3));
        assert!(outcome.histogram().is_none());
        Ok(())
    }

    #[test]
    fn split_rejects_bad_periods() -> Result<()> {
        let shor = ShorFactoring::new(15)?;
        assert_eq!(shor.split(4, 2), (AttemptResult::Factored(2), Some((3, 5))));
        assert_eq!(shor.split(2, 3).0, AttemptResult::OddPeriod(3));
        // 14 = -1 mod 15, so 14^(2/2) is a trivial root.
        assert_eq!(shor.split(14, 2).0, AttemptResult::TrivialRoot(2));
        Ok(())
    }

    #[test]
    fn random_semiprimes_are_products_of_small_primes() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..10 {
            let n = random_semiprime(MAX_PRIME, &mut rng)?;
            assert!([6, 10, 15].contains(&n), "{}", n);
        }
        assert!(random_semiprime(2, &mut rng).is_err());
        Ok(())
    }

    #[test]
    fn rejects_primes_and_bad_bases() {
        assert!(ShorFactoring::new(13).is_err());
        assert!(ShorFactoring::new(2048).is_err());
        assert!(ShorFactoring::new(15).and_then(|s| s.with_base(15)).is_err());
        assert!(ShorFactoring::new(15).and_then(|s| s.with_counting_qubits(17)).is_err());
    }

    #[test]
    fn counting_register_size_errors() -> Result<()> {
        let empty = ShorFactoring::new(15)?.with_counting_qubits(0);
        assert!(matches!(empty, Err(QuantumError::InvalidParameter { .. })));
        let oversized = ShorFactoring::new(15)?.with_counting_qubits(17);
        assert!(matches!(oversized, Err(QuantumError::TooManyQubits { requested: 21, limit: MAX_QUBITS })));
        assert_eq!(ShorFactoring::new(15)?.with_counting_qubits(6)?.counting_qubits(), 6);
        Ok(())
    }
}
