//! Seeded index selection over content pools.
//!
//! Single picks are `(seed + offset) mod n`. Multi-picks walk a stride and
//! never repeat an index; on collision the stride is bumped, and if that keeps
//! colliding the walk falls back to the next free slot.

use std::fmt::Display;

use crate::error::{EngineError, Result};
use crate::seed::label_hash;

fn ring(value: i64, len: usize) -> usize {
    value.rem_euclid(len as i64) as usize
}

/// `(seed + offset) mod len`. `EmptyPool` when `len == 0`.
pub fn pick_index(seed: i64, offset: i64, len: usize, pool: &str) -> Result<usize> {
    if len == 0 {
        return Err(EngineError::EmptyPool(pool.to_string()));
    }
    Ok(ring(seed + offset, len))
}

/// Up to `count` distinct indices; fewer only when the pool is smaller.
pub fn pick_distinct(
    seed: i64,
    offset: i64,
    stride: i64,
    count: usize,
    len: usize,
    pool: &str,
) -> Result<Vec<usize>> {
    if len == 0 {
        return Err(EngineError::EmptyPool(pool.to_string()));
    }
    let wanted = count.min(len);
    let mut taken = vec![false; len];
    let mut picks = Vec::with_capacity(wanted);

    for i in 0..wanted as i64 {
        let base = seed + offset;
        let mut idx = ring(base + i * stride, len);
        let mut bump = 1;
        while taken[idx] && bump <= len as i64 {
            idx = ring(base + i * (stride + bump), len);
            bump += 1;
        }
        while taken[idx] {
            idx = (idx + 1) % len;
        }
        taken[idx] = true;
        picks.push(idx);
    }
    Ok(picks)
}

/// Distinct stride picks from `pool`, padded with `default` up to `count`.
pub fn select_padded<T: AsRef<str>>(
    pool: &[T],
    seed: i64,
    offset: i64,
    stride: i64,
    count: usize,
    default: &str,
    name: &str,
) -> Result<Vec<String>> {
    let mut out: Vec<String> = pick_distinct(seed, offset, stride, count, pool.len(), name)?
        .into_iter()
        .map(|i| pool[i].as_ref().to_string())
        .collect();
    out.resize(count, default.to_string());
    Ok(out)
}

/// The first `count` items after a stable sort by `label_hash("{tag}-{item}")`.
pub fn hash_order<T: AsRef<str>>(items: &[T], tag: impl Display, count: usize) -> Vec<String> {
    let mut keyed: Vec<(u32, &str)> = items
        .iter()
        .map(|item| {
            let item = item.as_ref();
            (label_hash(&format!("{tag}-{item}")), item)
        })
        .collect();
    keyed.sort_by_key(|(key, _)| *key);
    keyed
        .into_iter()
        .take(count)
        .map(|(_, item)| item.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_pool_errors() {
        assert!(matches!(pick_index(5, 0, 0, "colors"), Err(EngineError::EmptyPool(p)) if p == "colors"));
        assert!(pick_distinct(5, 0, 17, 4, 0, "x").is_err());
        let empty: [&str; 0] = [];
        assert!(select_padded(&empty, 1, 0, 17, 4, "rest", "x").is_err());
    }

    #[test]
    fn test_pick_index_wraps_negative_seed() {
        assert_eq!(pick_index(-1, 0, 10, "p").unwrap(), 9);
        assert_eq!(pick_index(20_250_923, 37, 10, "p").unwrap(), 0);
    }

    #[test]
    fn test_stride_walk_without_collision() {
        // 0, 17, 34, 51 mod 100
        assert_eq!(pick_distinct(0, 0, 17, 4, 100, "p").unwrap(), vec![0, 17, 34, 51]);
    }

    #[test]
    fn test_collision_bumps_stride() {
        // stride 17 on a pool of 17 always lands on the same slot
        let picks = pick_distinct(3, 0, 17, 4, 17, "p").unwrap();
        assert_eq!(picks[0], 3);
        let mut sorted = picks.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 4);
    }

    #[test]
    fn test_small_pool_is_padded() {
        let pool = ["a", "b"];
        let got = select_padded(&pool, 0, 0, 17, 4, "rest", "p").unwrap();
        assert_eq!(got.len(), 4);
        assert_eq!(&got[2..], ["rest", "rest"]);
        assert!(got[..2].contains(&"a".to_string()) && got[..2].contains(&"b".to_string()));
    }

    #[test]
    fn test_hash_order_is_stable_and_capped() {
        let items = ["walnut", "pear", "millet", "tofu"];
        let first = hash_order(&items, 42, 3);
        assert_eq!(first.len(), 3);
        assert_eq!(first, hash_order(&items, 42, 3));
        assert_eq!(hash_order(&items, 42, 10).len(), 4);
        let empty: [&str; 0] = [];
        assert!(hash_order(&empty, 1, 2).is_empty());
    }

    proptest! {
        #[test]
        fn prop_distinct_and_in_range(
            seed in any::<i32>(),
            stride in 1i64..50,
            count in 0usize..12,
            len in 1usize..30,
        ) {
            let picks = pick_distinct(seed as i64, 0, stride, count, len, "p").unwrap();
            prop_assert_eq!(picks.len(), count.min(len));
            let mut seen = std::collections::HashSet::new();
            for i in &picks {
                prop_assert!(*i < len);
                prop_assert!(seen.insert(*i));
            }
        }
    }
}
