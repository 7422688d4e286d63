#![allow(non_snake_case)]

use std::collections::BTreeSet;

use itertools::Itertools;
use tracing::debug;

use crate::{
    combi::level_wise,
    rules::rule::Rule,
    types::{FrequentItemsets, ItemId, Itemset, ItemsetCounts},
};

/// Generate rules based on frequent itemsets
pub fn generate_rules(frequent_itemsets: &FrequentItemsets, min_conf: f32) -> Vec<Rule> {
    let N = frequent_itemsets.num_transactions as f32;
    let counter = frequent_itemsets.to_counts();

    let rules: Vec<Rule> = frequent_itemsets
        .iter()
        .filter(|record| record.itemset.len() > 1)
        .flat_map(|record| bfs(&record.itemset, min_conf, &counter, N))
        .collect();

    debug!(rules = rules.len(), "Generated rules");
    rules
}

/// Given a frequent itemset, find the rules that can be generated from it.
///
/// Consequents grow one item per level, starting from single items. A
/// consequent failing `min_conf` is not grown any further: moving an item
/// from the antecedent to the consequent shrinks the antecedent, whose
/// support can only go up, so the confidence can only go down.
pub fn bfs(itemset: &[ItemId], min_conf: f32, counter: &ItemsetCounts, N: f32) -> Vec<Rule> {
    let prune = |consequents: Vec<Itemset>| -> Vec<Rule> {
        consequents
            .into_iter()
            .filter_map(|consequent| {
                let mut rule = Rule::from_consequent(itemset, &consequent);
                rule.compute_confidence(counter, N);
                if rule.confidence >= min_conf {
                    Some(rule)
                } else {
                    None
                }
            })
            .collect()
    };

    let seed = prune(itemset.iter().map(|&item| vec![item]).collect());

    level_wise(
        seed,
        |rules: &[Rule]| grow_consequents(itemset.len(), rules),
        prune,
    )
    .into_iter()
    .flatten()
    .collect()
}

/// All (m+1)-combinations of the items found in the surviving m-item
/// consequents, as long as they leave a non-empty antecedent.
fn grow_consequents(itemset_len: usize, rules: &[Rule]) -> Vec<Itemset> {
    let m = match rules.first() {
        Some(rule) => rule.get_consequent().len(),
        None => return vec![],
    };
    if m + 1 >= itemset_len {
        return vec![];
    }

    let items: BTreeSet<ItemId> = rules
        .iter()
        .flat_map(|rule| rule.get_consequent().iter().copied())
        .collect();
    items.into_iter().combinations(m + 1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;

    use crate::types::SupportRecord;

    fn counter() -> ItemsetCounts {
        hashmap! {
            vec![1] => 9,
            vec![2] => 8,
            vec![3] => 12,
            vec![4] => 13,
            vec![1, 2] => 4,
            vec![1, 3] => 5,
            vec![1, 4] => 6,
            vec![2, 3] => 3,
            vec![2, 4] => 5,
            vec![3, 4] => 3,
            vec![1, 2, 3] => 3,
            vec![1, 2, 4] => 3,
            vec![1, 3, 4] => 3,
            vec![2, 3, 4] => 3,
            vec![1, 2, 3, 4] => 2,
        }
    }

    fn frequent_itemsets() -> FrequentItemsets {
        let mut levels: Vec<Vec<SupportRecord>> = vec![vec![]; 4];
        for (itemset, count) in counter() {
            levels[itemset.len() - 1].push(SupportRecord::new(itemset, count));
        }
        levels.iter_mut().for_each(|level| level.sort());
        FrequentItemsets {
            levels,
            num_transactions: 20,
        }
    }

    fn consequents(rules: &[Rule]) -> Vec<Vec<ItemId>> {
        rules.iter().map(|rule| rule.get_consequent().to_vec()).collect()
    }

    #[test]
    fn single_item_consequents_come_first() {
        // {2, 3, 4}: support 3, antecedents {3, 4}, {2, 4}, {2, 3} have 3, 5, 3
        let rules = bfs(&[2, 3, 4], 0.8, &counter(), 20.0);
        assert_eq!(consequents(&rules), vec![vec![2], vec![4]]);
    }

    #[test]
    fn consequents_grow_from_survivors() {
        // {1, 2, 3} has support 3; antecedents {2, 3}, {1, 3}, {1, 2} have 3, 5, 4
        let rules = bfs(&[1, 2, 3], 0.6, &counter(), 20.0);
        assert_eq!(consequents(&rules), vec![vec![1], vec![2], vec![3]]);

        // two-item consequents leave antecedents {3}, {2}, {1}: 12, 8, 9
        let rules = bfs(&[1, 2, 3], 0.3, &counter(), 20.0);
        assert_eq!(
            consequents(&rules),
            vec![vec![1], vec![2], vec![3], vec![1, 3], vec![2, 3]]
        );
    }

    #[test]
    fn failed_consequents_are_not_grown() {
        let rules = bfs(&[1, 2, 3], 0.7, &counter(), 20.0);
        assert_eq!(consequents(&rules), vec![vec![1], vec![3]]);

        // one surviving item cannot form a two-item consequent
        let survivors = [Rule::from_consequent(&[1, 2, 4], &[4])];
        assert!(grow_consequents(3, &survivors).is_empty());

        let survivors = [
            Rule::from_consequent(&[1, 2, 4], &[1]),
            Rule::from_consequent(&[1, 2, 4], &[4]),
        ];
        assert_eq!(grow_consequents(3, &survivors), vec![vec![1, 4]]);
    }

    #[test]
    fn consequents_never_swallow_the_itemset() {
        let rules = bfs(&[1, 2, 3, 4], 0.0, &counter(), 20.0);
        assert!(rules.iter().all(|rule| !rule.get_antecedent().is_empty()));
        // 4 + 6 + 4 non-trivial splits
        assert_eq!(rules.len(), 14);
    }

    #[test]
    fn generate_rules_respects_min_conf() {
        let min_conf = 0.8;
        let rules = generate_rules(&frequent_itemsets(), min_conf);

        assert!(!rules.is_empty());
        for rule in &rules {
            let union = counter()[&rule.itemset()] as f32;
            let antecedent = counter()[rule.get_antecedent()] as f32;
            assert!(rule.confidence >= min_conf);
            assert!((rule.confidence - union / antecedent).abs() < 1e-6);
        }
    }

    #[test]
    fn singletons_give_no_rules() {
        let frequent = FrequentItemsets {
            levels: vec![vec![SupportRecord::new(vec![1], 3)]],
            num_transactions: 3,
        };
        assert!(generate_rules(&frequent, 0.1).is_empty());
    }
}
