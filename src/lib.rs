//! Frequent itemsets and association rules with the Apriori algorithm.
//!
//! Transactions come in as lists of item labels. Labels are mapped to dense
//! ids, frequent itemsets are mined level by level with a hash tree counting
//! the candidates of each level, and rules are derived from the frequent
//! itemsets by growing their consequents. Results go back out as labels.

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

pub mod combi;
pub mod config;
pub mod error;
pub mod itemsets;
pub mod rules;
pub mod types;
pub mod vocabulary;

#[cfg(feature = "python")]
mod wrapper;

pub use config::{HashTreeConfig, MinerConfig};
pub use error::{AprioriError, ConfigError, Result};
pub use types::{FrequentItemsets, ItemId, Itemset, SupportRecord};
pub use vocabulary::Vocabulary;

/// A frequent itemset in label form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledItemset {
    pub items: Vec<String>,
    pub support: u32,
}

/// An association rule in label form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledRule {
    pub antecedent: Vec<String>,
    pub consequent: Vec<String>,
    pub confidence: f32,
    pub lift: f32,
}

impl LabeledRule {
    /// `[antecedent.., "=>", consequent..]`
    pub fn to_tokens(&self) -> Vec<String> {
        let mut tokens = Vec::with_capacity(self.antecedent.len() + self.consequent.len() + 1);
        tokens.extend(self.antecedent.iter().cloned());
        tokens.push("=>".to_owned());
        tokens.extend(self.consequent.iter().cloned());
        tokens
    }
}

impl Display for LabeledRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}} => {{{}}}",
            self.antecedent.join(","),
            self.consequent.join(",")
        )
    }
}

/// Mines encoded transactions, returning the vocabulary used to encode them.
pub fn mine<S: AsRef<str>>(
    transactions: &[Vec<S>],
    config: &MinerConfig,
) -> Result<(Vocabulary, FrequentItemsets)> {
    let vocabulary = Vocabulary::build(transactions);
    let encoded = vocabulary.encode_all(transactions)?;
    let frequent_itemsets =
        itemsets::generate_frequent_itemsets(&encoded, config.min_support, &config.hash_tree);
    Ok((vocabulary, frequent_itemsets))
}

/// Frequent itemsets of every size, smallest first, each level in ascending
/// label order.
pub fn generate_frequent_itemsets<S: AsRef<str>>(
    transactions: &[Vec<S>],
    config: &MinerConfig,
) -> Result<Vec<LabeledItemset>> {
    let (vocabulary, frequent_itemsets) = mine(transactions, config)?;

    frequent_itemsets
        .iter()
        .map(|record| {
            Ok(LabeledItemset {
                items: vocabulary.decode(&record.itemset)?,
                support: record.count,
            })
        })
        .collect()
}

/// Association rules meeting `config.min_confidence`, which must be set.
pub fn generate_association_rules<S: AsRef<str>>(
    transactions: &[Vec<S>],
    config: &MinerConfig,
) -> Result<Vec<LabeledRule>> {
    let min_confidence = config.required_min_confidence()?;
    let (vocabulary, frequent_itemsets) = mine(transactions, config)?;

    rules::generate_rules(&frequent_itemsets, min_confidence)
        .into_iter()
        .map(|rule| {
            Ok(LabeledRule {
                antecedent: vocabulary.decode(rule.get_antecedent())?,
                consequent: vocabulary.decode(rule.get_consequent())?,
                confidence: rule.confidence,
                lift: rule.lift,
            })
        })
        .collect()
}

/// The itemsets alone, and the itemsets paired with their support counts.
pub fn split_supports(itemsets: Vec<LabeledItemset>) -> (Vec<Vec<String>>, Vec<(Vec<String>, u32)>) {
    let supports: Vec<(Vec<String>, u32)> = itemsets
        .into_iter()
        .map(|itemset| (itemset.items, itemset.support))
        .collect();
    let items = supports.iter().map(|(items, _)| items.clone()).collect();
    (items, supports)
}
