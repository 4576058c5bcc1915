//! Counting helpers shared by the aggregation operations.

use std::collections::HashMap;
use std::hash::Hash;

/// Counts items, keeping keys in first-seen order.
pub fn count_first_seen<K, I>(items: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();

    for item in items {
        match index.get(&item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
    }

    counts
}

/// Counts items and sorts by count, descending. Ties keep first-seen order
/// (the sort is stable).
pub fn most_common<K, I>(items: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut counts = count_first_seen(items);
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Percentage of `part` in `total`, rounded to two decimals. 0 for an empty
/// total.
pub fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(part as f64 / total as f64 * 100.0)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
