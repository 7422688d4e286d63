use serde::Serialize;
use std::collections::HashMap;

pub type ItemId = usize;
pub type Itemset = Vec<ItemId>;

/// Sorted, duplicate-free item ids of one transaction.
pub type Transaction = Vec<ItemId>;

pub type ItemCounts = HashMap<ItemId, u32>;
pub type ItemsetCounts = HashMap<Itemset, u32>;

pub type ItemsetLength = usize;

/// An itemset together with the number of transactions containing it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SupportRecord {
    pub itemset: Itemset,
    pub count: u32,
}

impl SupportRecord {
    pub fn new(itemset: Itemset, count: u32) -> Self {
        SupportRecord { itemset, count }
    }
}

/// Frequent itemsets of every size, grouped by level.
///
/// `levels[0]` holds the 1-itemsets, `levels[k - 1]` the k-itemsets. Every
/// level is sorted in ascending itemset order and no level is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrequentItemsets {
    pub levels: Vec<Vec<SupportRecord>>,
    pub num_transactions: usize,
}

impl FrequentItemsets {
    pub fn iter(&self) -> impl Iterator<Item = &SupportRecord> {
        self.levels.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level(&self, size: ItemsetLength) -> &[SupportRecord] {
        match size.checked_sub(1).and_then(|i| self.levels.get(i)) {
            Some(level) => level,
            None => &[],
        }
    }

    /// Lookup table keyed by the canonical itemset.
    pub fn to_counts(&self) -> ItemsetCounts {
        self.iter()
            .map(|record| (record.itemset.clone(), record.count))
            .collect()
    }
}
