#![allow(non_snake_case)]

use std::collections::HashMap;

use bitvec::prelude::*;
use itertools::Itertools;
use tracing::{debug, info};

use crate::{
    combi::level_wise,
    config::HashTreeConfig,
    itemsets::{hashtree::HashTree, search::generate_candidates_from_prev},
    types::{FrequentItemsets, ItemCounts, Itemset, SupportRecord, Transaction},
};

/// Generate frequent itemsets of every size from encoded transactions.
///
/// Level 1 keeps items with `count / N >= min_support`; every later level
/// keeps candidates counted at least `ceil(min_support * N)` times. Mining
/// stops at the first level without frequent itemsets.
pub fn generate_frequent_itemsets(
    transactions: &[Transaction],
    min_support: f32,
    hash_tree: &HashTreeConfig,
) -> FrequentItemsets {
    let N = transactions.len();
    let min_support_count = (min_support * N as f32).ceil() as u32;

    let frequent_1 = generate_frequent_1_itemset_counts(transactions, min_support);
    debug!(size = 1, frequent = frequent_1.len(), "Counted itemsets");

    let mut transactions: Vec<Transaction> = transactions.to_vec();

    let levels = level_wise(
        frequent_1,
        |prev: &[SupportRecord]| {
            let prev: Vec<Itemset> = prev.iter().map(|record| record.itemset.clone()).collect();
            generate_candidates_from_prev(&prev)
        },
        |candidates| {
            let size = candidates.first().map_or(0, Vec::len);
            let num_candidates = candidates.len();
            retain_candidate_items(&mut transactions, &candidates);
            let frequent =
                generate_frequent_k_itemset_counts(candidates, &transactions, min_support_count, hash_tree);
            debug!(
                size,
                candidates = num_candidates,
                frequent = frequent.len(),
                "Counted itemsets"
            );
            frequent
        },
    );

    let frequent_itemsets = FrequentItemsets {
        levels,
        num_transactions: N,
    };
    info!(
        transactions = N,
        levels = frequent_itemsets.levels.len(),
        itemsets = frequent_itemsets.len(),
        "Frequent itemset mining finished"
    );
    frequent_itemsets
}

/// 1-itemsets in ascending item order.
fn generate_frequent_1_itemset_counts(
    transactions: &[Transaction],
    min_support: f32,
) -> Vec<SupportRecord> {
    let N = transactions.len() as f32;

    let mut item_counts: ItemCounts = HashMap::new();
    for transaction in transactions {
        for &item in transaction {
            *item_counts.entry(item).or_insert(0) += 1;
        }
    }

    item_counts
        .into_iter()
        .filter(|&(_, count)| count as f32 / N >= min_support)
        .map(|(item, count)| SupportRecord::new(vec![item], count))
        .sorted()
        .collect()
}

/// Registers the candidates in a fresh hash tree, counts every k-subset of
/// every transaction against it, and returns the sorted survivors.
fn generate_frequent_k_itemset_counts(
    candidates: Vec<Itemset>,
    transactions: &[Transaction],
    min_support_count: u32,
    config: &HashTreeConfig,
) -> Vec<SupportRecord> {
    let size = match candidates.first() {
        Some(candidate) => candidate.len(),
        None => return vec![],
    };

    let mut tree = HashTree::new(config.max_leaf, config.max_child);
    for candidate in candidates {
        tree.insert(candidate);
    }

    // transactions are sorted, so every combination is too
    for transaction in transactions.iter().filter(|t| t.len() >= size) {
        for subset in transaction.iter().copied().combinations(size) {
            tree.add_support(&subset);
        }
    }

    let mut frequent = tree.get_frequent(min_support_count);
    frequent.sort_unstable();
    frequent
}

/// Drops items that occur in no candidate, along with transactions left
/// shorter than the candidates. A k-subset containing such an item can never
/// match a candidate.
fn retain_candidate_items(transactions: &mut Vec<Transaction>, candidates: &[Itemset]) {
    let size = candidates.first().map_or(0, Vec::len);
    let max_item = candidates.iter().flatten().copied().max().unwrap_or(0);

    let mut mask = bitvec![0; max_item + 1];
    for &item in candidates.iter().flatten() {
        mask.set(item, true);
    }

    for transaction in transactions.iter_mut() {
        transaction.retain(|&item| mask.get(item).map_or(false, |bit| *bit));
    }
    transactions.retain(|transaction| transaction.len() >= size);
}
