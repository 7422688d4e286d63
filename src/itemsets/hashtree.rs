//! Hash tree for counting candidate itemsets of one size.
//!
//! Nodes live in an arena and refer to their children by index. A leaf keeps
//! its candidates and their counts; once it holds `max_leaf` distinct
//! candidates it turns into an internal node whose children are picked by
//! hashing the item at the node's depth (`item % max_child`).

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::types::{ItemId, Itemset, SupportRecord};

pub type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Node {
    Leaf {
        #[serde(serialize_with = "entries_as_pairs")]
        entries: BTreeMap<Itemset, u32>,
    },
    Internal { children: Vec<Option<NodeId>> },
}

// itemset keys are not strings, so write the map as a list of pairs
fn entries_as_pairs<S: Serializer>(
    entries: &BTreeMap<Itemset, u32>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(entries.iter())
}

impl Node {
    fn empty_leaf() -> Self {
        Node::Leaf {
            entries: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HashTree {
    nodes: Vec<Node>,
    max_leaf: usize,
    max_child: usize,
    itemset_len: Option<usize>,
}

impl HashTree {
    pub fn new(max_leaf: usize, max_child: usize) -> Self {
        if max_child < 1 {
            panic!("max_child must be at least 1");
        }
        HashTree {
            nodes: vec![Node::empty_leaf()],
            max_leaf,
            max_child,
            itemset_len: None,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn root(&self) -> &Node {
        &self.nodes[ROOT]
    }

    /// Registers a sorted candidate with a count of zero.
    ///
    /// Registering the same candidate again leaves its count untouched. All
    /// candidates of one tree must have the same length.
    pub fn insert(&mut self, itemset: Itemset) {
        match self.itemset_len {
            None => self.itemset_len = Some(itemset.len()),
            Some(len) => assert_eq!(
                len,
                itemset.len(),
                "a hash tree only holds itemsets of one length"
            ),
        }
        self.place(ROOT, itemset, 0, 0);
    }

    /// Counts one occurrence of a sorted itemset. Itemsets that were never
    /// registered are ignored.
    pub fn add_support(&mut self, itemset: &[ItemId]) {
        let mut node = ROOT;
        let mut depth = 0;

        loop {
            match &mut self.nodes[node] {
                Node::Leaf { entries } => {
                    if let Some(count) = entries.get_mut(itemset) {
                        *count += 1;
                    }
                    return;
                }
                Node::Internal { children } => {
                    let child = itemset
                        .get(depth)
                        .and_then(|&item| children[item % self.max_child]);
                    match child {
                        Some(child) => {
                            node = child;
                            depth += 1;
                        }
                        None => return,
                    }
                }
            }
        }
    }

    /// Current count of a registered candidate.
    pub fn count(&self, itemset: &[ItemId]) -> Option<u32> {
        let mut node = ROOT;
        let mut depth = 0;

        loop {
            match &self.nodes[node] {
                Node::Leaf { entries } => return entries.get(itemset).copied(),
                Node::Internal { children } => {
                    node = itemset
                        .get(depth)
                        .and_then(|&item| children[item % self.max_child])?;
                    depth += 1;
                }
            }
        }
    }

    /// Candidates counted at least `min_support_count` times, leaves visited
    /// depth first.
    pub fn get_frequent(&self, min_support_count: u32) -> Vec<SupportRecord> {
        let mut frequent = Vec::new();
        let mut stack = vec![ROOT];

        while let Some(node) = stack.pop() {
            match &self.nodes[node] {
                Node::Leaf { entries } => frequent.extend(
                    entries
                        .iter()
                        .filter(|&(_, &count)| count >= min_support_count)
                        .map(|(itemset, &count)| SupportRecord::new(itemset.clone(), count)),
                ),
                Node::Internal { children } => {
                    stack.extend(children.iter().rev().flatten().copied());
                }
            }
        }

        frequent
    }

    fn hash(&self, item: ItemId) -> usize {
        item % self.max_child
    }

    fn place(&mut self, start: NodeId, itemset: Itemset, count: u32, depth: usize) {
        let (node, depth) = self.leaf_for(start, &itemset, depth);
        let len = itemset.len();

        let full = match &mut self.nodes[node] {
            Node::Leaf { entries } => {
                entries.entry(itemset).or_insert(count);
                entries.len() >= self.max_leaf
            }
            Node::Internal { .. } => unreachable!("leaf_for always stops at a leaf"),
        };

        // a leaf at full depth has no item left to hash on
        if full && depth < len {
            self.split(node, depth);
        }
    }

    fn leaf_for(&mut self, mut node: NodeId, itemset: &[ItemId], mut depth: usize) -> (NodeId, usize) {
        loop {
            let bucket = match &self.nodes[node] {
                Node::Leaf { .. } => return (node, depth),
                Node::Internal { .. } => self.hash(itemset[depth]),
            };
            node = self.child_or_insert(node, bucket);
            depth += 1;
        }
    }

    fn child_or_insert(&mut self, parent: NodeId, bucket: usize) -> NodeId {
        if let Node::Internal { children } = &self.nodes[parent] {
            if let Some(child) = children[bucket] {
                return child;
            }
        }

        let child = self.nodes.len();
        self.nodes.push(Node::empty_leaf());
        if let Node::Internal { children } = &mut self.nodes[parent] {
            children[bucket] = Some(child);
        }
        child
    }

    fn split(&mut self, node: NodeId, depth: usize) {
        let internal = Node::Internal {
            children: vec![None; self.max_child],
        };
        let entries = match std::mem::replace(&mut self.nodes[node], internal) {
            Node::Leaf { entries } => entries,
            Node::Internal { .. } => return,
        };

        for (itemset, count) in entries {
            let bucket = self.hash(itemset[depth]);
            let child = self.child_or_insert(node, bucket);
            self.place(child, itemset, count, depth + 1);
        }
    }
}
