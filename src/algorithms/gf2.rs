// src/algorithms/gf2.rs

//! Linear algebra over GF(2) on bit-packed rows.
//!
//! Bit `i` of a row is the coefficient of unknown `s_i`, matching the qubit
//! ordering used everywhere else.

/// Parity of `a & b`, the GF(2) dot product.
pub fn dot(a: u64, b: u64) -> u8 {
    ((a & b).count_ones() & 1) as u8
}

/// Homogeneous system `y . s = 0` kept in reduced row echelon form.
///
/// Each stored row owns a distinct pivot (its highest set bit) and no other
/// row has that bit set, so inserting and solving are both linear in the
/// number of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gf2System {
    width: usize,
    rows: Vec<u64>,
}

impl Gf2System {
    /// Empty system over `width` unknowns (`width <= 64`).
    pub fn new(width: usize) -> Self {
        Self { width: width.min(64), rows: Vec::new() }
    }

    fn mask(&self) -> u64 {
        if self.width == 64 { u64::MAX } else { (1u64 << self.width) - 1 }
    }

    fn pivot(row: u64) -> u32 {
        63 - row.leading_zeros()
    }

    /// Adds the equation `y . s = 0`.
    ///
    /// Returns `true` when `y` is independent of the rows already held, i.e.
    /// the rank grew. Zero and dependent vectors are discarded.
    pub fn insert(&mut self, y: u64) -> bool {
        let mut v = y & self.mask();
        for &row in &self.rows {
            if v >> Self::pivot(row) & 1 == 1 {
                v ^= row;
            }
        }
        if v == 0 {
            return false;
        }
        let pivot = Self::pivot(v);
        for row in &mut self.rows {
            if *row >> pivot & 1 == 1 {
                *row ^= v;
            }
        }
        self.rows.push(v);
        self.rows.sort_unstable_by(|a, b| b.cmp(a));
        true
    }

    /// Number of independent equations collected.
    pub fn rank(&self) -> usize {
        self.rows.len()
    }

    /// Number of unknowns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Reduced rows, highest pivot first.
    pub fn rows(&self) -> &[u64] {
        &self.rows
    }

    /// Basis of `{ s : y . s = 0 for every stored y }`.
    ///
    /// One vector per free unknown; empty when the system has full rank.
    pub fn null_space(&self) -> Vec<u64> {
        let pivots = self.rows.iter().fold(0u64, |m, &r| m | 1 << Self::pivot(r));
        (0..self.width)
            .filter(|&f| pivots >> f & 1 == 0)
            .map(|free| {
                let mut v = 1u64 << free;
                for &row in &self.rows {
                    if row >> free & 1 == 1 {
                        v |= 1 << Self::pivot(row);
                    }
                }
                v
            })
            .collect()
    }

    /// `true` when `s` solves every stored equation.
    pub fn satisfies(&self, s: u64) -> bool {
        self.rows.iter().all(|&row| dot(row, s) == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn dependent_rows_do_not_raise_rank() {
        let mut system = Gf2System::new(3);
        assert!(system.insert(0b011));
        assert!(system.insert(0b101));
        assert!(!system.insert(0b110));
        assert!(!system.insert(0));
        assert_eq!(system.rank(), 2);
    }

    #[test]
    fn null_space_of_rank_deficient_system() {
        // Equations orthogonal to s = 110.
        let mut system = Gf2System::new(3);
        system.insert(0b001);
        system.insert(0b111);
        assert_eq!(system.null_space(), vec![0b110]);
        assert!(system.satisfies(0b110));
        assert!(!system.satisfies(0b010));
    }

    #[test]
    fn full_rank_leaves_only_zero() {
        let mut system = Gf2System::new(2);
        system.insert(0b01);
        system.insert(0b10);
        assert!(system.null_space().is_empty());
        assert!(system.satisfies(0));
    }

    #[test]
    fn bits_beyond_width_are_ignored() {
        let mut system = Gf2System::new(2);
        assert!(!system.insert(0b100));
        assert_eq!(system.rank(), 0);
        assert_eq!(system.null_space().len(), 2);
    }

    proptest! {
        #[test]
        fn null_space_vectors_solve_every_equation(
            rows in prop::collection::vec(0u64..256, 0..12)
        ) {
            let mut system = Gf2System::new(8);
            for row in &rows {
                system.insert(*row);
            }
            let basis = system.null_space();
            prop_assert_eq!(basis.len() + system.rank(), 8);
            for v in basis {
                prop_assert!(v != 0);
                for row in &rows {
                    prop_assert_eq!(dot(*row, v), 0);
                }
            }
        }
    }
}
