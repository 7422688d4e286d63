#![allow(non_snake_case)]

use serde::Serialize;
use tracing::warn;

use crate::types::{ItemId, Itemset, ItemsetCounts};

/// An association rule drawn from one frequent itemset.
///
/// `combi` holds the antecedent followed by the consequent, each sorted;
/// `split` is where the consequent starts.
#[derive(Debug, Clone, Serialize)]
pub struct Rule {
    pub split: usize,
    pub combi: Vec<ItemId>,
    pub confidence: f32,
    pub lift: f32,
}

impl Rule {
    /// The rule `itemset - consequent => consequent`. `consequent` must be a
    /// sorted subset of the sorted `itemset`.
    pub fn from_consequent(itemset: &[ItemId], consequent: &[ItemId]) -> Rule {
        let mut combi: Vec<ItemId> = itemset
            .iter()
            .copied()
            .filter(|item| !consequent.contains(item))
            .collect();
        let split = combi.len();
        combi.extend_from_slice(consequent);

        Rule {
            split,
            combi,
            confidence: 0.0,
            lift: 0.0,
        }
    }

    pub fn get_antecedent(&self) -> &[ItemId] {
        &self.combi[..self.split]
    }

    pub fn get_consequent(&self) -> &[ItemId] {
        &self.combi[self.split..]
    }

    /// The frequent itemset the rule was drawn from.
    pub fn itemset(&self) -> Itemset {
        let mut itemset = self.combi.clone();
        itemset.sort_unstable();
        itemset
    }

    /// Fills in confidence and lift from the mined support counts.
    ///
    /// A missing antecedent leaves the confidence at zero.
    pub fn compute_confidence(&mut self, counter: &ItemsetCounts, N: f32) {
        let antecedent_support_count = support_count(counter, self.get_antecedent()) as f32;
        let consequent_support_count = support_count(counter, self.get_consequent()) as f32;
        let union_support_count = support_count(counter, &self.itemset()) as f32;

        self.confidence = if antecedent_support_count > 0.0 {
            union_support_count / antecedent_support_count
        } else {
            0.0
        };
        self.lift = if consequent_support_count > 0.0 {
            self.confidence / consequent_support_count * N
        } else {
            0.0
        };
    }
}

// every subset of a frequent itemset was counted while mining
fn support_count(counter: &ItemsetCounts, itemset: &[ItemId]) -> u32 {
    match counter.get(itemset) {
        Some(&count) => count,
        None => {
            warn!(?itemset, "No support count for itemset");
            0
        }
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Rule) -> bool {
        self.get_antecedent() == other.get_antecedent()
            && self.get_consequent() == other.get_consequent()
    }
}
