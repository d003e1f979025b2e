//! Unique-sequence engine for synthetic data.
//!
//! The generators here produce values that never repeat until their whole
//! domain is used up, without storing the domain: every draw is a modular
//! multiplication by a step coprime with the domain size.
//!
//! - [`BijectiveGenerator`]: one bounded integer range.
//! - [`TupleGenerator`]: several ranges combined into one mixed-radix space.
//! - [`WeightedSampler`]: keys drawn by exact per-cycle quotas.
//! - [`MultiGenerator`]: tuple generators over several dimension orderings,
//!   chosen by space size.

pub mod error;
pub mod multi;
pub mod orderings;
pub mod ratio;
pub mod sampler;
pub mod sequence;
pub mod step;
pub mod tuple;

pub use error::{Result, SequenceError};
pub use multi::MultiGenerator;
pub use num_bigint::BigUint;
pub use orderings::{combinations, permutations};
pub use ratio::RatioPicker;
pub use sampler::WeightedSampler;
pub use sequence::BijectiveGenerator;
pub use step::{find_step, find_step_u64, is_probable_prime};
pub use tuple::TupleGenerator;
