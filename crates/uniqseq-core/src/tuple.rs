use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

use crate::step::find_step;

/// Dimension that contributes to the composite space.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveDimension {
    index: usize,
    size: BigUint,
}

/// Unique tuple generator over several bounded dimensions.
///
/// The product of all dimensions larger than one forms a composite space that
/// is walked with a coprime step, and each composite index is decoded
/// positionally (mixed radix) into one value per dimension. Dimensions of size
/// `0` or `1` always decode to `0`.
///
/// [`TupleGenerator::next`] and [`TupleGenerator::peek`] return a view of an
/// internal decode buffer that is overwritten by the following call; use
/// [`TupleGenerator::snapshot`] or [`TupleGenerator::next_owned`] to keep a
/// value around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleGenerator {
    sizes: Vec<u64>,
    active: Vec<ActiveDimension>,
    size: BigUint,
    step: BigUint,
    counter: BigUint,
    cursor: BigUint,
    values: Vec<u64>,
}

impl TupleGenerator {
    pub fn new(sizes: &[u64]) -> Self {
        let mut active = Vec::new();
        let mut product = BigUint::one();
        let mut has_unit = false;
        for (index, &size) in sizes.iter().enumerate() {
            match size {
                0 => {}
                1 => has_unit = true,
                _ => {
                    let size = BigUint::from(size);
                    product *= &size;
                    active.push(ActiveDimension { index, size });
                }
            }
        }

        let size = if !active.is_empty() {
            product
        } else if has_unit {
            BigUint::one()
        } else {
            BigUint::zero()
        };
        let step = if active.is_empty() {
            size.clone()
        } else {
            find_step(&size, None)
        };

        Self {
            sizes: sizes.to_vec(),
            active,
            size,
            step,
            counter: BigUint::zero(),
            cursor: BigUint::zero(),
            values: vec![0; sizes.len()],
        }
    }

    /// Dimension sizes as supplied.
    pub fn sizes(&self) -> &[u64] {
        &self.sizes
    }

    /// Number of unique tuples in one cycle.
    pub fn size(&self) -> &BigUint {
        &self.size
    }

    pub fn step(&self) -> &BigUint {
        &self.step
    }

    /// Draws consumed since the last reset, capped at `size`.
    pub fn counter(&self) -> &BigUint {
        &self.counter
    }

    pub fn can_next(&self) -> bool {
        !self.size.is_zero() && self.counter < self.size
    }

    /// Decodes the upcoming tuple without advancing.
    pub fn peek(&mut self) -> &[u64] {
        if self.active.is_empty() {
            return &self.values;
        }
        let state = (&self.step * &self.cursor) % &self.size;
        self.decode(state);
        &self.values
    }

    pub fn next(&mut self) -> &[u64] {
        if !self.active.is_empty() {
            let state = (&self.step * &self.cursor) % &self.size;
            self.decode(state);
        }
        self.advance();
        &self.values
    }

    /// Draws a tuple and returns an owned copy of it.
    pub fn next_owned(&mut self) -> Vec<u64> {
        self.next().to_vec()
    }

    /// Copy of the last decoded tuple.
    pub fn snapshot(&self) -> Vec<u64> {
        self.values.clone()
    }

    pub fn reset(&mut self) {
        self.counter = BigUint::zero();
        self.cursor = BigUint::zero();
        self.values.fill(0);
    }

    fn advance(&mut self) {
        if self.size.is_zero() {
            return;
        }
        if self.counter < self.size {
            self.counter += 1u32;
        }
        self.cursor += 1u32;
        if self.cursor == self.size {
            self.cursor = BigUint::zero();
        }
    }

    fn decode(&mut self, mut state: BigUint) {
        for dimension in &self.active {
            let (quotient, digit) = state.div_rem(&dimension.size);
            // digit < dimension size, which came from a u64
            self.values[dimension.index] = digit.to_u64().unwrap_or_default();
            state = quotient;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn empty_inputs_never_advance() {
        let mut empty = TupleGenerator::new(&[]);
        assert!(!empty.can_next());
        assert!(empty.size().is_zero());
        assert!(empty.next().is_empty());

        let mut zeros = TupleGenerator::new(&[0, 0, 0]);
        assert!(!zeros.can_next());
        assert!(zeros.size().is_zero());
        assert_eq!(zeros.next(), &[0, 0, 0]);
        assert_eq!(zeros.next(), &[0, 0, 0]);
        assert!(zeros.counter().is_zero());
    }

    #[test]
    fn unit_dimensions_emit_one_zero_tuple() {
        let mut generator = TupleGenerator::new(&[1, 0, 1]);
        assert_eq!(generator.size(), &BigUint::one());
        assert!(generator.can_next());
        assert_eq!(generator.next(), &[0, 0, 0]);
        assert!(!generator.can_next());
        assert_eq!(generator.next(), &[0, 0, 0]);
    }

    #[test]
    fn two_by_three_covers_the_product() {
        let mut generator = TupleGenerator::new(&[2, 3]);
        assert_eq!(generator.size(), &BigUint::from(6u32));

        let first = generator.next_owned();
        assert_eq!(first, vec![0, 0]);
        let mut seen = HashSet::from([first.clone()]);
        for _ in 1..6 {
            assert!(generator.can_next());
            let tuple = generator.next_owned();
            assert!(tuple[0] < 2 && tuple[1] < 3);
            assert!(seen.insert(tuple));
        }
        assert_eq!(seen.len(), 6);
        assert!(!generator.can_next());
        assert_eq!(generator.next_owned(), first);
    }

    #[test]
    fn inactive_dimensions_stay_zero() {
        let mut generator = TupleGenerator::new(&[2, 0, 1, 3]);
        assert_eq!(generator.size(), &BigUint::from(6u32));
        let mut seen = HashSet::new();
        for _ in 0..6 {
            let tuple = generator.next_owned();
            assert_eq!(tuple[1], 0);
            assert_eq!(tuple[2], 0);
            seen.insert(tuple);
        }
        assert_eq!(seen.len(), 6);
        assert!(!generator.can_next());
        assert_eq!(generator.next(), &[0, 0, 0, 0]);
    }

    #[test]
    fn peek_matches_next() {
        let mut generator = TupleGenerator::new(&[4, 5, 6]);
        for _ in 0..20 {
            let peeked = generator.peek().to_vec();
            assert_eq!(generator.next(), peeked.as_slice());
        }
    }

    #[test]
    fn snapshot_survives_following_draws() {
        let mut generator = TupleGenerator::new(&[3, 3]);
        generator.next();
        generator.next();
        let kept = generator.snapshot();
        let following = generator.next_owned();
        assert_ne!(kept, following);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn reset_restarts_the_cycle() {
        let mut generator = TupleGenerator::new(&[5, 7]);
        let first: Vec<Vec<u64>> = (0..10).map(|_| generator.next_owned()).collect();
        generator.reset();
        assert!(generator.counter().is_zero());
        let second: Vec<Vec<u64>> = (0..10).map(|_| generator.next_owned()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn huge_products_use_big_integers() {
        let sizes = [u64::MAX, u64::MAX, 3];
        let mut generator = TupleGenerator::new(&sizes);
        let expected = BigUint::from(u64::MAX) * BigUint::from(u64::MAX) * 3u32;
        assert_eq!(generator.size(), &expected);
        generator.next();
        let tuple = generator.next_owned();
        assert_eq!(tuple.len(), 3);
        assert!(tuple[2] < 3);
        assert!(generator.can_next());
    }
}
