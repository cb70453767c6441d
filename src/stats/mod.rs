//! Leaf-count statistics
//!
//! All statistics are taken over the counts of depth-8 nodes, i.e. over the
//! byte histogram. Empty populations yield 0 rather than NaN.

use crate::tree::{height, BitTrie, LeafCounts, PreOrder, TrieNode};

/// Summary of a trie's shape and byte histogram
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LeafStatistics {
    /// Edges on the longest root-to-node path
    pub height: usize,

    /// Present nodes, root included
    pub nodes: usize,

    /// Depth-8 nodes (distinct bytes seen)
    pub leaves: usize,

    /// Mean leaf count
    pub mean: f64,

    /// Population variance of leaf counts
    pub variance: f64,

    /// Population standard deviation of leaf counts
    pub std_dev: f64,
}

impl LeafStatistics {
    /// Gather statistics for a whole trie
    pub fn from_trie(trie: &BitTrie) -> Self {
        Self::from_root(trie.root())
    }

    /// Gather statistics below a root handle
    pub fn from_root(root: Option<&TrieNode>) -> Self {
        let counts = LeafCounts::new(root);
        let variance = population_variance(counts.clone());

        Self {
            height: height(root),
            nodes: PreOrder::new(root).count(),
            leaves: counts.clone().count(),
            mean: mean(counts),
            variance,
            std_dev: variance.sqrt(),
        }
    }
}

/// Arithmetic mean; 0 for an empty sequence
pub fn mean<I>(counts: I) -> f64
where
    I: IntoIterator<Item = u64>,
{
    let (n, sum) = counts
        .into_iter()
        .fold((0usize, 0.0f64), |(n, sum), count| (n + 1, sum + count as f64));

    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Population variance (mean squared deviation); 0 for fewer than two values
///
/// Needs two passes, hence the `Clone` bound on the iterator.
pub fn population_variance<I>(counts: I) -> f64
where
    I: IntoIterator<Item = u64>,
    I::IntoIter: Clone,
{
    let counts = counts.into_iter();
    let avg = mean(counts.clone());

    let (n, squares) = counts.fold((0usize, 0.0f64), |(n, acc), count| {
        let deviation = count as f64 - avg;
        (n + 1, acc + deviation * deviation)
    });

    if n == 0 {
        0.0
    } else {
        squares / n as f64
    }
}
