//! Quota-based weighted key sampler.
//!
//! Keys come out in a random order biased towards the larger remaining quota,
//! and every key is returned exactly its quota of times per cycle. When all
//! quotas are spent the table is rebuilt from the initial configuration.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

/// Largest integer an `f64` represents exactly (2^53 - 1).
const MAX_EXACT_FLOAT: u64 = (1 << 53) - 1;

/// Probability given to keys whose scaled weight rounds down to nothing.
const FLOOR_PROBABILITY: f64 = 0.05;

#[derive(Debug, Clone)]
struct Slot<K> {
    probability: f64,
    key: K,
    remaining: BigUint,
}

#[derive(Debug, Clone)]
pub struct WeightedSampler<K> {
    initial: Vec<(K, BigUint)>,
    initial_len: usize,
    slots: Vec<Slot<K>>,
    rng: ChaCha8Rng,
}

impl<K: Clone> WeightedSampler<K> {
    /// Builds a sampler seeded from the thread RNG.
    pub fn new<W: Into<BigUint>>(entries: impl IntoIterator<Item = (K, W)>) -> Self {
        Self::with_rng(entries, ChaCha8Rng::from_rng(&mut rand::rng()))
    }

    /// Builds a reproducible sampler.
    pub fn with_seed<W: Into<BigUint>>(entries: impl IntoIterator<Item = (K, W)>, seed: u64) -> Self {
        Self::with_rng(entries, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn with_rng<W: Into<BigUint>>(
        entries: impl IntoIterator<Item = (K, W)>,
        rng: ChaCha8Rng,
    ) -> Self {
        let initial: Vec<(K, BigUint)> = entries
            .into_iter()
            .map(|(key, quota)| (key, quota.into()))
            .collect();
        let initial_len = initial.iter().filter(|(_, quota)| !quota.is_zero()).count();
        let mut sampler = Self {
            initial,
            initial_len,
            slots: Vec::new(),
            rng,
        };
        sampler.reset();
        sampler
    }

    /// Number of keys in the live probability table.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of keys with a positive quota in the initial configuration.
    pub fn initial_len(&self) -> usize {
        self.initial_len
    }

    /// Draws the next key, or `None` when built without entries.
    pub fn next(&mut self) -> Option<K> {
        if self.slots.is_empty() {
            return None;
        }
        let roll: f64 = self.rng.random();
        let mut cumulative = 0.0;
        let mut chosen = 0;
        for (index, slot) in self.slots.iter().enumerate() {
            cumulative += slot.probability;
            if roll < cumulative {
                chosen = index;
                break;
            }
        }
        let key = self.slots[chosen].key.clone();
        self.consume(chosen);
        Some(key)
    }

    /// Restores the initial quotas, discarding the current cycle.
    pub fn reset(&mut self) {
        let pairs: Vec<(K, BigUint)> = self.initial.clone();
        self.rebuild(pairs);
    }

    fn consume(&mut self, index: usize) {
        let slot = &mut self.slots[index];
        if slot.remaining > BigUint::zero() {
            slot.remaining -= 1u32;
        }
        if !slot.remaining.is_zero() {
            return;
        }
        self.slots.remove(index);
        if self.slots.is_empty() {
            trace!(keys = self.initial_len, "weighted sampler cycle completed");
            self.reset();
        } else {
            let pairs: Vec<(K, BigUint)> = self
                .slots
                .drain(..)
                .map(|slot| (slot.key, slot.remaining))
                .collect();
            self.rebuild(pairs);
        }
    }

    fn rebuild(&mut self, pairs: Vec<(K, BigUint)>) {
        let total: BigUint = pairs.iter().map(|(_, quota)| quota).sum();

        let mut factor = BigUint::from(1u32);
        let mut scaled_total = total.clone();
        while scaled_total > BigUint::from(MAX_EXACT_FLOAT) {
            factor *= 10u32;
            scaled_total = &total / &factor;
        }
        let scaled_total = scaled_total.to_f64().unwrap_or(f64::MAX);

        let fallback = pairs.first().map(|(key, quota)| (key.clone(), quota.clone()));
        let mut slots: Vec<Slot<K>> = pairs
            .into_iter()
            .filter(|(_, quota)| !quota.is_zero())
            .map(|(key, quota)| {
                let scaled = (&quota / &factor).to_f64().unwrap_or_default();
                let probability = scaled / scaled_total;
                Slot {
                    probability: if probability > 0.0 {
                        probability
                    } else {
                        FLOOR_PROBABILITY
                    },
                    key,
                    remaining: quota,
                }
            })
            .collect();

        // every quota is zero: keep the first key selectable so `next` never stalls
        if slots.is_empty() {
            if let Some((key, remaining)) = fallback {
                slots.push(Slot {
                    probability: 1.0,
                    key,
                    remaining,
                });
            }
        }
        self.slots = slots;
    }
}
