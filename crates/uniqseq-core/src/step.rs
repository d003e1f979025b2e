//! Step search for the modular walks used by every generator.
//!
//! A walk `i -> (step * i) mod size` visits each index of `[0, size)` exactly
//! once when `step` is coprime with `size`. The search prefers a prime step
//! close to `size - size / 8`, which spreads consecutive values apart.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

/// Candidates inspected on each side of the search centre.
const SEARCH_RADIUS: u64 = 4096;

const SMALL_PRIMES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Computes a step coprime with `size`.
///
/// With a `desired` step the search walks forward from it and returns the
/// first value coprime with `size`; if none exists below `size` the prime
/// search is used instead. `size == 0` yields `0`, `size == 1` yields `1`.
pub fn find_step(size: &BigUint, desired: Option<&BigUint>) -> BigUint {
    if size.is_zero() {
        return BigUint::zero();
    }
    if size.is_one() {
        return BigUint::one();
    }
    if let Some(desired) = desired {
        let mut candidate = if desired.is_zero() {
            BigUint::one()
        } else {
            desired.clone()
        };
        while &candidate < size {
            if candidate.gcd(size).is_one() {
                return candidate;
            }
            candidate += 1u32;
        }
    }
    find_prime_step(size)
}

/// Native wrapper over [`find_step`].
pub fn find_step_u64(size: u64, desired: Option<u64>) -> u64 {
    let desired = desired.map(BigUint::from);
    find_step(&BigUint::from(size), desired.as_ref())
        .to_u64()
        .unwrap_or(1)
}

fn find_prime_step(size: &BigUint) -> BigUint {
    let one = BigUint::one();
    let upper = size - &one;
    let mut centre = size - (size / 8u32);
    if centre > upper {
        centre = upper;
    }
    if centre.is_zero() {
        centre = one.clone();
    }

    let mut fallback: Option<BigUint> = None;
    for distance in 0..=SEARCH_RADIUS {
        let above = &centre + distance;
        let below = if distance == 0 || centre <= BigUint::from(distance) {
            None
        } else {
            Some(&centre - distance)
        };
        let mut in_range = false;
        for candidate in [Some(above), below].into_iter().flatten() {
            if candidate.is_zero() || &candidate >= size {
                continue;
            }
            in_range = true;
            if !candidate.gcd(size).is_one() {
                continue;
            }
            if is_probable_prime(&candidate) {
                return candidate;
            }
            if fallback.is_none() {
                fallback = Some(candidate);
            }
        }
        if !in_range && distance > 0 {
            break;
        }
    }
    fallback.unwrap_or(one)
}

/// Miller-Rabin test over the first twelve primes.
///
/// Deterministic for every value below 3.3 * 10^24, which covers all 64-bit
/// inputs; above that it is a strong probable-prime check.
pub fn is_probable_prime(value: &BigUint) -> bool {
    let two = BigUint::from(2u32);
    if value < &two {
        return false;
    }
    for prime in SMALL_PRIMES {
        let prime = BigUint::from(prime);
        if value == &prime {
            return true;
        }
        if (value % &prime).is_zero() {
            return false;
        }
    }

    let one = BigUint::one();
    let value_minus_one = value - &one;
    let rounds = value_minus_one.trailing_zeros().unwrap_or(0);
    let odd = &value_minus_one >> rounds;

    'witness: for base in SMALL_PRIMES {
        let mut x = BigUint::from(base).modpow(&odd, value);
        if x == one || x == value_minus_one {
            continue;
        }
        for _ in 1..rounds {
            x = x.modpow(&two, value);
            if x == value_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_sizes_have_fixed_steps() {
        assert_eq!(find_step_u64(0, None), 0);
        assert_eq!(find_step_u64(1, None), 1);
        assert_eq!(find_step_u64(1, Some(7)), 1);
    }

    #[test]
    fn desired_step_is_kept_when_coprime() {
        assert_eq!(find_step_u64(10, Some(3)), 3);
        assert_eq!(find_step_u64(10, Some(1)), 1);
        assert_eq!(find_step_u64(10, Some(4)), 7);
        assert_eq!(find_step_u64(10, Some(0)), 1);
    }

    #[test]
    fn desired_step_beyond_size_uses_prime_search() {
        let step = find_step_u64(10, Some(25));
        assert_eq!(gcd(step, 10), 1);
        assert!(step < 10);
    }

    #[test]
    fn searched_step_is_coprime_and_in_range() {
        for size in 2..2000_u64 {
            let step = find_step_u64(size, None);
            assert!(step >= 1 && step < size, "size {size} step {step}");
            assert_eq!(gcd(step, size), 1, "size {size} step {step}");
        }
    }

    #[test]
    fn searched_step_prefers_primes_near_seven_eighths() {
        let step = find_step_u64(1000, None);
        assert!(is_probable_prime(&BigUint::from(step)));
        assert!((800..1000).contains(&step), "step {step}");
    }

    #[test]
    fn big_sizes_get_a_coprime_step() {
        let size = BigUint::from(u64::MAX) * BigUint::from(u64::MAX) * 6u32;
        let step = find_step(&size, None);
        assert!(step.gcd(&size).is_one());
        assert!(step < size);
    }

    #[test]
    fn primality_matches_known_values() {
        let primes = [2_u64, 3, 5, 37, 41, 7919, 1_000_000_007, 18_446_744_073_709_551_557];
        for prime in primes {
            assert!(is_probable_prime(&BigUint::from(prime)), "{prime}");
        }
        let composites = [0_u64, 1, 4, 9, 561, 1_000_000_008, 3_215_031_751];
        for composite in composites {
            assert!(!is_probable_prime(&BigUint::from(composite)), "{composite}");
        }
    }

    fn gcd(a: u64, b: u64) -> u64 {
        a.gcd(&b)
    }
}
