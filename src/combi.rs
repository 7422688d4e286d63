use itertools::Itertools;
use tracing::trace;

use crate::types::{ItemId, Itemset};

/// Joins (k-1)-itemsets sharing their leading k-2 items into k-itemsets.
///
/// Every joined itemset is in ascending order provided the inputs are. With
/// 1-itemsets the shared prefix is empty, so every pair is produced.
///
/// https://github.com/tommyod/Efficient-Apriori/blob/master/efficient_apriori/itemsets.py
pub fn join_step(mut itemsets: Vec<Itemset>) -> Vec<Itemset> {
    itemsets.retain(|itemset| !itemset.is_empty());
    itemsets.sort_unstable();
    itemsets.dedup();

    let mut final_itemsets: Vec<Itemset> = Vec::new();
    let mut tail_items: Vec<ItemId> = Vec::with_capacity(itemsets.len());

    let mut i = 0;
    while i < itemsets.len() {
        let itemset = &itemsets[i];
        let (itemset_first, _) = itemset.split_at(itemset.len() - 1);

        // sorted input keeps every itemset with this prefix contiguous
        let skip = itemsets[i..]
            .iter()
            .take_while(|other| other.len() == itemset.len() && other.starts_with(itemset_first))
            .count();

        tail_items.clear();
        tail_items.extend(itemsets[i..i + skip].iter().filter_map(|x| x.last().copied()));

        for (&a, &b) in tail_items.iter().tuple_combinations() {
            let mut joined = Vec::with_capacity(itemset.len() + 1);
            joined.extend_from_slice(itemset_first);
            joined.push(a);
            joined.push(b);
            final_itemsets.push(joined);
        }

        i += skip;
    }

    final_itemsets
}

/// Bottom-up search over an itemset lattice.
///
/// Starting from `seed`, `generate` proposes the next level of candidates
/// from the survivors of the current one and `filter` keeps the candidates
/// that pass an anti-monotone test. The search ends when either yields
/// nothing. Returns every non-empty level, seed first.
pub fn level_wise<T, G, F>(seed: Vec<T>, mut generate: G, mut filter: F) -> Vec<Vec<T>>
where
    G: FnMut(&[T]) -> Vec<Itemset>,
    F: FnMut(Vec<Itemset>) -> Vec<T>,
{
    let mut levels = Vec::new();
    let mut current = seed;

    while !current.is_empty() {
        let candidates = generate(&current);
        levels.push(current);
        if candidates.is_empty() {
            break;
        }
        trace!(
            level = levels.len() + 1,
            candidates = candidates.len(),
            "Filtering lattice level"
        );
        current = filter(candidates);
    }

    levels
}
