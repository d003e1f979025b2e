use num_bigint::BigUint;
use num_traits::Zero;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::orderings::{combinations, permutations};
use crate::sampler::WeightedSampler;
use crate::tuple::TupleGenerator;

#[derive(Debug, Clone)]
struct Branch {
    ordering: Vec<usize>,
    generator: TupleGenerator,
}

/// Unique generator over several orderings of the same dimensions.
///
/// Each ordering owns a [`TupleGenerator`] over the dimensions taken in that
/// order. A [`WeightedSampler`] weighted by every ordering's space size picks
/// which ordering supplies the next tuple, so all spaces run out together at
/// the end of a cycle.
#[derive(Debug, Clone)]
pub struct MultiGenerator {
    branches: Vec<Branch>,
    selector: WeightedSampler<usize>,
    size: BigUint,
    counter: BigUint,
}

impl MultiGenerator {
    /// Builds a generator over explicit orderings of `sizes`.
    ///
    /// Orderings whose space is empty are dropped. Indices past the end of
    /// `sizes` count as empty dimensions.
    pub fn new(sizes: &[u64], orderings: Vec<Vec<usize>>) -> Self {
        Self::with_rng(sizes, orderings, ChaCha8Rng::from_rng(&mut rand::rng()))
    }

    pub fn with_seed(sizes: &[u64], orderings: Vec<Vec<usize>>, seed: u64) -> Self {
        Self::with_rng(sizes, orderings, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Every full ordering of the dimensions.
    pub fn permutation(sizes: &[u64]) -> Self {
        Self::new(sizes, permutations(sizes.len()))
    }

    /// Every non-empty subset of the dimensions, in every order.
    pub fn combination(sizes: &[u64]) -> Self {
        Self::combination_with_min(sizes, 1)
    }

    /// Like [`MultiGenerator::combination`], skipping subsets smaller than `min_len`.
    pub fn combination_with_min(sizes: &[u64], min_len: usize) -> Self {
        Self::new(sizes, combinations(sizes.len(), min_len))
    }

    /// Replaces the ordering selector with a reproducible one and rewinds.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.selector = selector(&self.branches, ChaCha8Rng::seed_from_u64(seed));
        self.reset();
        self
    }

    fn with_rng(sizes: &[u64], orderings: Vec<Vec<usize>>, rng: ChaCha8Rng) -> Self {
        let mut min_len = sizes.len();
        let mut branches = Vec::new();
        for ordering in orderings {
            min_len = min_len.min(ordering.len());
            let ordered: Vec<u64> = ordering
                .iter()
                .map(|&index| sizes.get(index).copied().unwrap_or(0))
                .collect();
            let generator = TupleGenerator::new(&ordered);
            if !generator.size().is_zero() {
                branches.push(Branch {
                    ordering,
                    generator,
                });
            }
        }

        let size: BigUint = branches.iter().map(|branch| branch.generator.size()).sum();
        if branches.is_empty() {
            debug!(
                dimensions = sizes.len(),
                width = min_len,
                "no ordering has a non-empty space, using an all-zero generator"
            );
            branches.push(Branch {
                ordering: (0..min_len).collect(),
                generator: TupleGenerator::new(&vec![0; min_len]),
            });
        }

        let selector = selector(&branches, rng);
        Self {
            branches,
            selector,
            size,
            counter: BigUint::zero(),
        }
    }

    /// Total number of unique `(ordering, tuple)` pairs in one cycle.
    pub fn size(&self) -> &BigUint {
        &self.size
    }

    /// Draws consumed since the last reset, capped at `size`.
    pub fn counter(&self) -> &BigUint {
        &self.counter
    }

    /// Orderings that took part in generation.
    pub fn orderings(&self) -> impl Iterator<Item = &[usize]> {
        self.branches.iter().map(|branch| branch.ordering.as_slice())
    }

    pub fn can_next(&self) -> bool {
        !self.size.is_zero() && self.counter < self.size
    }

    /// Draws the next pair: the chosen ordering of dimension indices and the
    /// values generated for those dimensions, in the same order.
    ///
    /// The value slice is the chosen branch's decode buffer.
    pub fn next(&mut self) -> (&[usize], &[u64]) {
        let index = self
            .selector
            .next()
            .filter(|&index| index < self.branches.len())
            .unwrap_or(0);
        if self.counter < self.size {
            self.counter += 1u32;
        }
        let branch = &mut self.branches[index];
        (branch.ordering.as_slice(), branch.generator.next())
    }

    /// Draws the next pair as owned vectors.
    pub fn next_owned(&mut self) -> (Vec<usize>, Vec<u64>) {
        let (ordering, values) = self.next();
        (ordering.to_vec(), values.to_vec())
    }

    pub fn reset(&mut self) {
        self.counter = BigUint::zero();
        for branch in &mut self.branches {
            branch.generator.reset();
        }
        self.selector.reset();
    }
}

fn selector(branches: &[Branch], rng: ChaCha8Rng) -> WeightedSampler<usize> {
    WeightedSampler::with_rng(
        branches
            .iter()
            .enumerate()
            .map(|(index, branch)| (index, branch.generator.size().clone())),
        rng,
    )
}
