use std::collections::{HashMap, HashSet};

use uniqseq_core::{BigUint, BijectiveGenerator, MultiGenerator, TupleGenerator, WeightedSampler};

#[test]
fn bijective_generator_is_a_permutation_for_every_small_size() {
    for size in 1..300_u64 {
        let mut generator = BijectiveGenerator::new(size);
        let mut seen = HashSet::new();
        let mut first = None;
        for _ in 0..size {
            assert!(generator.can_next(), "size {size}");
            let value = generator.next();
            first.get_or_insert(value);
            assert!((0..size as i64).contains(&value));
            assert!(seen.insert(value), "size {size} repeated {value}");
        }
        assert!(!generator.can_next(), "size {size}");
        assert_eq!(Some(generator.next()), first, "size {size}");
    }
}

#[test]
fn tuple_generator_with_an_empty_dimension() {
    let mut generator = TupleGenerator::new(&[2, 0, 3]);
    assert_eq!(generator.size(), &BigUint::from(6u32));

    let first = generator.next_owned();
    assert_eq!(first, vec![0, 0, 0]);
    let mut seen = HashSet::from([first.clone()]);
    for _ in 1..6 {
        let tuple = generator.next_owned();
        assert_ne!(tuple, vec![0, 0, 0]);
        assert_eq!(tuple[1], 0);
        seen.insert(tuple);
    }
    assert_eq!(seen.len(), 6);
    assert!(!generator.can_next());
    assert_eq!(generator.next_owned(), first);
}

#[test]
fn tuple_decoding_is_mixed_radix() {
    let mut generator = TupleGenerator::new(&[3, 5]);
    let step = generator.step().clone();
    let three = BigUint::from(3u32);
    let fifteen = BigUint::from(15u32);
    for position in 0..15_u32 {
        let state = (&step * BigUint::from(position)) % &fifteen;
        let expected = vec![
            u64::try_from(&state % &three).expect("digit fits"),
            u64::try_from(&state / &three).expect("digit fits"),
        ];
        assert_eq!(generator.next_owned(), expected);
    }
}

#[test]
fn weighted_sampler_counts_match_quotas_over_two_cycles() {
    let mut sampler = WeightedSampler::new([("a", 245_u32), ("b", 0), ("c", 785)]);
    for _ in 0..2 {
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for _ in 0..1030 {
            let key = sampler.next().expect("entries present");
            *counts.entry(key).or_default() += 1;
        }
        assert_eq!(counts.get("a"), Some(&245));
        assert_eq!(counts.get("b"), None);
        assert_eq!(counts.get("c"), Some(&785));
    }
}

#[test]
fn permutation_generator_over_two_dimensions() {
    let mut generator = MultiGenerator::permutation(&[2, 3]);
    assert!(generator.can_next());
    assert_eq!(generator.size(), &BigUint::from(12u32));

    let mut seen = HashSet::new();
    for _ in 0..12 {
        assert!(generator.can_next());
        let (ordering, values) = generator.next_owned();
        let sizes: Vec<u64> = ordering.iter().map(|&index| [2, 3][index]).collect();
        assert!(values.iter().zip(&sizes).all(|(value, size)| value < size));
        assert!(seen.insert((ordering, values)));
    }
    assert!(!generator.can_next());
    let repeated = generator.next_owned();
    assert!(seen.contains(&repeated));
    assert_eq!(repeated.1, vec![0, 0]);
}

#[test]
fn combination_generator_over_two_dimensions() {
    let mut generator = MultiGenerator::combination(&[2, 3]);
    assert_eq!(generator.size(), &BigUint::from(17u32));

    let mut seen = HashSet::new();
    for _ in 0..17 {
        assert!(generator.can_next());
        assert!(seen.insert(generator.next_owned()));
    }
    assert!(!generator.can_next());

    // the second cycle replays exactly the same pairs
    let mut second: HashSet<(Vec<usize>, Vec<u64>)> = HashSet::new();
    for _ in 0..17 {
        second.insert(generator.next_owned());
    }
    assert_eq!(second, seen);
}

#[test]
fn combination_with_min_len_drops_singletons() {
    let generator = MultiGenerator::combination_with_min(&[2, 3], 2);
    assert_eq!(generator.size(), &BigUint::from(12u32));
    assert!(generator.orderings().all(|ordering| ordering.len() == 2));
}

#[test]
fn reset_rewinds_every_sub_generator() {
    let mut generator = MultiGenerator::permutation(&[3, 4]).seeded(99);
    let first: Vec<_> = (0..10).map(|_| generator.next_owned()).collect();
    generator.reset();
    assert_eq!(generator.counter(), &BigUint::from(0u32));
    let mut seen: HashSet<_> = HashSet::new();
    for _ in 0..24 {
        seen.insert(generator.next_owned());
    }
    assert_eq!(seen.len(), 24);
    assert!(first.iter().all(|pair| seen.contains(pair)));
}
