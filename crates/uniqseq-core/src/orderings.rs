//! Precomputed dimension orderings for the multi-generators.

/// Every ordering of `0..n`, in lexicographic order.
///
/// `n == 0` yields a single empty ordering.
pub fn permutations(n: usize) -> Vec<Vec<usize>> {
    let mut current: Vec<usize> = (0..n).collect();
    let mut result = vec![current.clone()];
    while next_permutation(&mut current) {
        result.push(current.clone());
    }
    result
}

/// Every non-empty subset of `0..n` with at least `min_len` members, each in
/// every order.
///
/// Subsets are listed by ascending bit mask; a `min_len` of `0` behaves like `1`.
pub fn combinations(n: usize, min_len: usize) -> Vec<Vec<usize>> {
    let min_len = min_len.max(1);
    let width = n.min(u64::BITS as usize - 1);
    let mut result = Vec::new();
    for mask in 1_u64..(1_u64 << width) {
        if (mask.count_ones() as usize) < min_len {
            continue;
        }
        let mut subset: Vec<usize> = (0..width).filter(|&bit| mask & (1 << bit) != 0).collect();
        result.push(subset.clone());
        while next_permutation(&mut subset) {
            result.push(subset.clone());
        }
    }
    result
}

/// Rearranges `items` into the next lexicographic permutation; returns `false`
/// (leaving `items` untouched) when it is already the last one.
fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let Some(pivot) = (0..items.len() - 1).rev().find(|&i| items[i] < items[i + 1]) else {
        return false;
    };
    let Some(successor) = (pivot + 1..items.len())
        .rev()
        .find(|&j| items[j] > items[pivot])
    else {
        return false;
    };
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}
