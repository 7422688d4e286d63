use std::collections::{BTreeSet, HashMap};

use crate::{
    error::{AprioriError, Result},
    types::{ItemId, Transaction},
};

/// Bijection between item labels and dense ids.
///
/// Ids are handed out from 1 in ascending label order, so sorting ids sorts
/// labels too. The mapping is fixed once built.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    reverse_lookup: HashMap<String, ItemId>,
    // inventory[id - 1] is the label of `id`
    inventory: Vec<String>,
}

impl Vocabulary {
    pub fn build<S: AsRef<str>>(transactions: &[Vec<S>]) -> Self {
        let labels: BTreeSet<&str> = transactions
            .iter()
            .flat_map(|transaction| transaction.iter().map(|label| label.as_ref()))
            .collect();

        let inventory: Vec<String> = labels.into_iter().map(str::to_owned).collect();
        let reverse_lookup = inventory
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i + 1))
            .collect();

        Vocabulary {
            reverse_lookup,
            inventory,
        }
    }

    pub fn len(&self) -> usize {
        self.inventory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }

    pub fn id_of(&self, label: &str) -> Option<ItemId> {
        self.reverse_lookup.get(label).copied()
    }

    pub fn label_of(&self, id: ItemId) -> Option<&str> {
        id.checked_sub(1)
            .and_then(|i| self.inventory.get(i))
            .map(String::as_str)
    }

    /// Sorted, de-duplicated ids of one transaction.
    pub fn encode<S: AsRef<str>>(&self, transaction: &[S]) -> Result<Transaction> {
        let mut items = transaction
            .iter()
            .map(|label| {
                let label = label.as_ref();
                self.id_of(label)
                    .ok_or_else(|| AprioriError::UnknownItem(label.to_owned()))
            })
            .collect::<Result<Transaction>>()?;
        items.sort_unstable();
        items.dedup();
        Ok(items)
    }

    pub fn encode_all<S: AsRef<str>>(&self, transactions: &[Vec<S>]) -> Result<Vec<Transaction>> {
        transactions
            .iter()
            .map(|transaction| self.encode(transaction.as_slice()))
            .collect()
    }

    pub fn decode(&self, itemset: &[ItemId]) -> Result<Vec<String>> {
        itemset
            .iter()
            .map(|&id| {
                self.label_of(id)
                    .map(str::to_owned)
                    .ok_or(AprioriError::UnknownItemId(id))
            })
            .collect()
    }
}
