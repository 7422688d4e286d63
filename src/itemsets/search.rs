use std::collections::HashSet;

use crate::{
    combi::join_step,
    types::{ItemId, Itemset},
};

/// Candidate k-itemsets from the frequent (k-1)-itemsets.
///
/// Joined candidates with any (k-1)-subset outside `prev` are dropped,
/// since a superset of an infrequent itemset cannot be frequent.
pub fn generate_candidates_from_prev(prev: &[Itemset]) -> Vec<Itemset> {
    let frequent: HashSet<&[ItemId]> = prev.iter().map(Vec::as_slice).collect();

    join_step(prev.to_vec())
        .into_iter()
        .filter(|candidate| !has_infrequent_subset(candidate, &frequent))
        .collect()
}

/// O(k) subsets per candidate, each a hash lookup.
pub fn has_infrequent_subset(candidate: &[ItemId], frequent: &HashSet<&[ItemId]>) -> bool {
    let mut subset: Itemset = Vec::with_capacity(candidate.len().saturating_sub(1));

    (0..candidate.len()).any(|skip| {
        subset.clear();
        subset.extend(
            candidate
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skip)
                .map(|(_, &item)| item),
        );
        !frequent.contains(subset.as_slice())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_from_singletons_are_all_kept() {
        let prev = vec![vec![1], vec![2], vec![3]];
        assert_eq!(
            generate_candidates_from_prev(&prev),
            vec![vec![1, 2], vec![1, 3], vec![2, 3]]
        );
    }

    #[test]
    fn candidate_with_infrequent_subset_is_pruned() {
        // [1, 2, 3] joins from [1, 2] and [1, 3] but [2, 3] is missing
        let prev = vec![vec![1, 2], vec![1, 3]];
        assert!(generate_candidates_from_prev(&prev).is_empty());

        let prev = vec![vec![1, 2], vec![1, 3], vec![2, 3]];
        assert_eq!(generate_candidates_from_prev(&prev), vec![vec![1, 2, 3]]);
    }

    #[test]
    fn only_fully_supported_candidates_survive() {
        let prev = vec![
            vec![1, 2, 3],
            vec![1, 2, 4],
            vec![1, 3, 4],
            vec![1, 3, 5],
            vec![2, 3, 4],
        ];
        // [1, 3, 4, 5] lacks [1, 4, 5] and [3, 4, 5]
        assert_eq!(generate_candidates_from_prev(&prev), vec![vec![1, 2, 3, 4]]);
    }

    #[test]
    fn infrequent_subset_check() {
        let prev = vec![vec![1, 2], vec![2, 3]];
        let frequent: HashSet<&[ItemId]> = prev.iter().map(Vec::as_slice).collect();

        assert!(has_infrequent_subset(&[1, 2, 3], &frequent));

        let singletons = vec![vec![2], vec![3]];
        let frequent: HashSet<&[ItemId]> = singletons.iter().map(Vec::as_slice).collect();
        assert!(!has_infrequent_subset(&[2, 3], &frequent));
    }

    #[test]
    fn nothing_from_nothing() {
        assert!(generate_candidates_from_prev(&[]).is_empty());
    }
}
