//! Depth-8 binary trie over byte bit-paths
//!
//! Every group of 8 inserted bits walks one root-to-leaf path and bumps the
//! count of the leaf it lands on, so the 256 possible leaves form a byte
//! histogram. Nodes are created lazily: only prefixes that actually occurred
//! exist in the tree.
//!
//! Ownership is strictly tree-shaped (`Option<Box<_>>` per child slot).
//! Copies are deep and moves hand over the root allocation untouched, which
//! [`NodeId`] makes observable.

mod node;
mod traversal;

pub use node::{Bit, InvalidBit, NodeId, TrieNode, MAX_DEPTH};
pub use traversal::{height, ByteCursor, LeafCounts, NodePath, PreOrder, Step};

use crate::stats;

/// Byte-frequency bit trie
///
/// `PartialEq` compares structure, counts and cursor state, never node
/// identities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitTrie {
    /// Root node, absent until the first insertion
    root: Option<Box<TrieNode>>,

    /// Position inside the current 8-bit group
    cursor: ByteCursor,
}

impl BitTrie {
    /// Create an empty trie
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one bit
    ///
    /// The eighth bit of a group increments the count of the depth-8 node
    /// it lands on; the next bit starts again from the root.
    pub fn insert(&mut self, bit: Bit) {
        let step = self.cursor.advance(bit);
        let root = self.root.get_or_insert_with(Box::default);

        // The prefix already exists, only the last node can be new
        let mut node: &mut TrieNode = root;
        for bit in step.path().iter() {
            node = node.child_or_insert(bit);
        }

        if let Step::Completed(_) = step {
            node.increment();
        }
    }

    /// Insert the 8 bits of `byte`, most significant bit first
    pub fn insert_byte(&mut self, byte: u8) {
        for bit in Bit::msb_first(byte) {
            self.insert(bit);
        }
    }

    /// Read-only handle to the root
    #[inline]
    pub fn root(&self) -> Option<&TrieNode> {
        self.root.as_deref()
    }

    /// Check if no bit has been inserted since creation or the last clear
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Bits of the unfinished group
    #[inline]
    pub fn pending_bits(&self) -> usize {
        self.cursor.pending()
    }

    /// Release every node and reset the cursor
    pub fn clear(&mut self) {
        self.root = None;
        self.cursor.reset();
    }

    /// Node at `path`, if that prefix was ever inserted
    pub fn get(&self, path: NodePath) -> Option<&TrieNode> {
        path.iter()
            .try_fold(self.root()?, |node, bit| node.child(bit))
    }

    /// How many times `byte` was inserted as a complete group
    pub fn count_of(&self, byte: u8) -> u64 {
        self.get(NodePath::from_byte(byte))
            .map_or(0, TrieNode::count)
    }

    /// Edges on the longest root-to-node path (0 when empty, at most 8)
    pub fn height(&self) -> usize {
        height(self.root())
    }

    /// Pre-order walk over all present nodes
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder::new(self.root())
    }

    /// Counts of all depth-8 nodes, in pre-order
    pub fn leaf_counts(&self) -> LeafCounts<'_> {
        LeafCounts::new(self.root())
    }

    /// Mean leaf count (0 when no leaf exists)
    pub fn average(&self) -> f64 {
        stats::mean(self.leaf_counts())
    }

    /// Population variance of leaf counts (0 for fewer than two leaves)
    pub fn variance(&self) -> f64 {
        stats::population_variance(self.leaf_counts())
    }

    /// Number of present nodes, root included
    pub fn node_count(&self) -> usize {
        self.pre_order().count()
    }

    /// Number of depth-8 nodes (distinct completed bytes)
    pub fn leaf_count(&self) -> usize {
        self.leaf_counts().count()
    }

    /// Identities of all nodes, in pre-order
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.pre_order().map(|(_, node)| node.id()).collect()
    }

    /// Digest of the (path, count) sequence in pre-order
    ///
    /// Equal for structurally equal tries, whatever their node identities.
    pub fn fingerprint(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        for (path, node) in self.pre_order() {
            hasher.update(&[path.depth() as u8, path.bits()]);
            hasher.update(&node.count().to_le_bytes());
        }
        hasher.finalize()
    }

    /// Replace the contents with a deep copy of `other`
    ///
    /// The copy is built before the old nodes are released, so `self` is
    /// never observed half-built.
    pub fn assign_copy(&mut self, other: &BitTrie) {
        let copy = other.clone();
        *self = copy;
    }

    /// Take over `other`'s nodes without allocating, leaving `other` empty
    pub fn take_ownership(&mut self, other: &mut BitTrie) {
        *self = other.take();
    }

    /// Move the nodes out into a new trie, leaving `self` empty
    pub fn take(&mut self) -> BitTrie {
        std::mem::take(self)
    }
}

impl Extend<Bit> for BitTrie {
    fn extend<I: IntoIterator<Item = Bit>>(&mut self, bits: I) {
        for bit in bits {
            self.insert(bit);
        }
    }
}

impl FromIterator<Bit> for BitTrie {
    fn from_iter<I: IntoIterator<Item = Bit>>(bits: I) -> Self {
        let mut trie = BitTrie::new();
        trie.extend(bits);
        trie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn trie_of(bytes: &[u8]) -> BitTrie {
        let mut trie = BitTrie::new();
        for &byte in bytes {
            trie.insert_byte(byte);
        }
        trie
    }

    #[test]
    fn test_empty_trie() {
        let trie = BitTrie::new();
        assert!(trie.is_empty());
        assert!(trie.root().is_none());
        assert_eq!(trie.height(), 0);
        assert_eq!(trie.average(), 0.0);
        assert_eq!(trie.variance(), 0.0);
        assert_eq!(trie.node_count(), 0);
    }

    #[test]
    fn test_root_created_lazily() {
        let mut trie = BitTrie::new();
        trie.insert(Bit::One);

        assert!(!trie.is_empty());
        assert_eq!(trie.height(), 1);
        assert_eq!(trie.node_count(), 2);
        assert_eq!(trie.pending_bits(), 1);
        assert_eq!(trie.leaf_count(), 0);
    }

    #[test]
    fn test_repeated_byte_accumulates() {
        let trie = trie_of(&[0x41; 5]);
        assert_eq!(trie.count_of(0x41), 5);
        assert_eq!(trie.count_of(0x42), 0);
        assert_eq!(trie.leaf_count(), 1);
        assert_eq!(trie.height(), MAX_DEPTH);
        // root + 8 path nodes
        assert_eq!(trie.node_count(), 9);
    }

    #[test]
    fn test_intermediate_nodes_do_not_count() {
        let trie = trie_of(&[0x41, 0x42]);
        for (path, node) in trie.pre_order() {
            if path.depth() < MAX_DEPTH {
                assert_eq!(node.count(), 0, "intermediate node {path} counted");
            }
        }
    }

    #[test]
    fn test_end_to_end_statistics() {
        let trie = trie_of(&[0x41, 0x41, 0x42]);

        let counts: Vec<u64> = trie.leaf_counts().collect();
        assert_eq!(counts, vec![2, 1]);
        assert_eq!(trie.average(), 1.5);
        assert_eq!(trie.variance(), 0.25);
        assert_eq!(trie.height(), 8);
    }

    #[test]
    fn test_cursor_continues_across_calls() {
        let mut bit_by_bit = BitTrie::new();
        for bit in Bit::msb_first(0x9c) {
            bit_by_bit.insert(bit);
        }
        assert_eq!(bit_by_bit, trie_of(&[0x9c]));
        assert_eq!(bit_by_bit.pending_bits(), 0);
    }

    #[test]
    fn test_get_walks_existing_prefixes() {
        let trie = trie_of(&[0x80]);
        let one = NodePath::ROOT.child(Bit::One).unwrap();
        assert!(trie.get(one).is_some());
        assert!(trie.get(NodePath::ROOT.child(Bit::Zero).unwrap()).is_none());
        assert_eq!(
            trie.get(NodePath::ROOT).map(TrieNode::id),
            trie.root().map(TrieNode::id)
        );
    }

    #[test]
    fn test_deep_copy_has_fresh_identities() {
        let original = trie_of(b"GATTACA");
        let mut copy = trie_of(b"junk");
        copy.assign_copy(&original);

        assert_eq!(copy, original);
        assert_eq!(copy.fingerprint(), original.fingerprint());

        let original_ids: HashSet<NodeId> = original.node_ids().into_iter().collect();
        assert!(copy.node_ids().iter().all(|id| !original_ids.contains(id)));
    }

    #[test]
    fn test_copy_of_empty_is_empty() {
        let mut copy = trie_of(b"ACGT");
        copy.assign_copy(&BitTrie::new());
        assert!(copy.is_empty());
        assert_eq!(copy.height(), 0);
    }

    #[test]
    fn test_move_preserves_identities_and_empties_source() {
        let mut source = trie_of(b"ACGT");
        let ids = source.node_ids();
        let fingerprint = source.fingerprint();

        let mut target = BitTrie::new();
        target.take_ownership(&mut source);

        assert_eq!(target.node_ids(), ids);
        assert_eq!(target.fingerprint(), fingerprint);
        assert!(source.is_empty());
        assert_eq!(source.pending_bits(), 0);

        source.insert_byte(b'T');
        assert_eq!(source.leaf_count(), 1);
        assert_eq!(target.count_of(b'T'), 1);
        assert_eq!(target.node_ids(), ids);
    }

    #[test]
    fn test_self_assignment_is_noop() {
        let mut trie = trie_of(b"AAC");
        let before = trie.clone();

        trie = trie.clone();
        assert_eq!(trie, before);

        let ids = trie.node_ids();
        trie = std::mem::take(&mut trie);
        assert_eq!(trie, before);
        assert_eq!(trie.node_ids(), ids);
    }

    #[test]
    fn test_clear_and_collect() {
        let mut trie: BitTrie = Bit::msb_first(0x01).into_iter().collect();
        assert_eq!(trie.count_of(0x01), 1);

        trie.insert(Bit::Zero);
        trie.clear();
        assert!(trie.is_empty());
        assert_eq!(trie.pending_bits(), 0);
    }
}
