// src/algorithms/number_theory.rs

//! Integer helpers for Shor's classical pre- and post-processing.

use std::fmt;

/// Greatest common divisor (`gcd(0, 0) = 0`).
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `base^exp mod modulus` by repeated squaring.
pub fn mod_pow(base: u64, mut exp: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }
    let m = modulus as u128;
    let mut result: u128 = 1;
    let mut b = base as u128 % m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * b % m;
        }
        b = b * b % m;
        exp >>= 1;
    }
    result as u64
}

/// Trial-division primality test.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

/// Number of bits needed to write `n` (`bit_width(15) = 4`).
pub fn bit_width(n: u64) -> usize {
    (u64::BITS - n.leading_zeros()) as usize
}

/// Continued-fraction coefficients `[a0; a1, a2, ...]` of `numer / denom`.
pub fn continued_fraction(mut numer: u64, mut denom: u64) -> Vec<u64> {
    let mut terms = Vec::new();
    while denom != 0 {
        terms.push(numer / denom);
        (numer, denom) = (denom, numer % denom);
    }
    terms
}

/// A non-negative rational in lowest terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    pub numer: u64,
    pub denom: u64,
}

impl Fraction {
    /// Reduces `numer / denom`. `denom` must be non-zero.
    pub fn new(numer: u64, denom: u64) -> Self {
        let g = gcd(numer, denom).max(1);
        Self { numer: numer / g, denom: denom / g }
    }

    /// Closest fraction to `self` whose denominator is at most `max_denom`.
    ///
    /// Walks the convergents of the continued-fraction expansion; when the
    /// next convergent would exceed the bound, the best semiconvergent is
    /// compared against the last convergent and the nearer one wins (the last
    /// convergent on a tie).
    pub fn limit_denominator(self, max_denom: u64) -> Fraction {
        if self.denom <= max_denom {
            return self;
        }
        let max_denom = max_denom.max(1);
        let (mut p0, mut q0, mut p1, mut q1) = (0u64, 1u64, 1u64, 0u64);
        let (mut n, mut d) = (self.numer, self.denom);
        loop {
            let a = n / d;
            let q2 = q0 + a * q1;
            if q2 > max_denom {
                break;
            }
            (p0, q0, p1, q1) = (p1, q1, p0 + a * p1, q2);
            (n, d) = (d, n - a * d);
            if d == 0 {
                break;
            }
        }
        let k = (max_denom - q0) / q1;
        let semi = Fraction::new(p0 + k * p1, q0 + k * q1);
        let last = Fraction::new(p1, q1);
        if last.closer_or_equal(semi, self) { last } else { semi }
    }

    /// `true` when `|self - target| <= |other - target|`.
    fn closer_or_equal(self, other: Fraction, target: Fraction) -> bool {
        let (a_num, a_den) = self.distance_to(target);
        let (b_num, b_den) = other.distance_to(target);
        match (a_num.checked_mul(b_den), b_num.checked_mul(a_den)) {
            (Some(lhs), Some(rhs)) => lhs <= rhs,
            _ => (self.as_f64() - target.as_f64()).abs() <= (other.as_f64() - target.as_f64()).abs(),
        }
    }

    /// `|self - other|` as an unreduced rational `(numer, denom)`.
    fn distance_to(self, other: Fraction) -> (u128, u128) {
        let lhs = self.numer as u128 * other.denom as u128;
        let rhs = other.numer as u128 * self.denom as u128;
        (lhs.abs_diff(rhs), self.denom as u128 * other.denom as u128)
    }

    /// Floating point value, for logging.
    pub fn as_f64(self) -> f64 {
        self.numer as f64 / self.denom as f64
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let lhs = self.numer as u128 * other.denom as u128;
        let rhs = other.numer as u128 * self.denom as u128;
        Some(lhs.cmp(&rhs))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numer, self.denom)
    }
}
