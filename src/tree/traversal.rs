//! Pointerless cursor and pre-order traversal
//!
//! The insertion cursor never holds a reference into the tree. It stores the
//! bits of the unfinished group (at most 7 of them) and the current node is
//! recomputed on demand by walking down from the root.

use std::fmt;

use super::node::{Bit, TrieNode, MAX_DEPTH};

/// Root-to-node path, most significant bit first
///
/// Depth is at most 8, so the bits always fit in a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NodePath {
    /// Path bits, right-aligned
    bits: u8,

    /// Number of valid bits
    depth: u8,
}

impl NodePath {
    /// Path of the root (no bits)
    pub const ROOT: NodePath = NodePath { bits: 0, depth: 0 };

    /// Full path of a byte value
    pub fn from_byte(byte: u8) -> Self {
        Self {
            bits: byte,
            depth: MAX_DEPTH as u8,
        }
    }

    /// Number of bits on the path
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth as usize
    }

    /// Path bits, right-aligned
    #[inline]
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Byte encoded by a completed path
    pub fn byte(&self) -> Option<u8> {
        (self.depth() == MAX_DEPTH).then_some(self.bits)
    }

    /// Path extended by one bit, `None` once the path is complete
    pub fn child(self, bit: Bit) -> Option<Self> {
        (self.depth() < MAX_DEPTH).then(|| Self {
            bits: (self.bits << 1) | bit.value(),
            depth: self.depth + 1,
        })
    }

    /// Bits of the path from the root down
    pub fn iter(&self) -> impl Iterator<Item = Bit> {
        let bits = self.bits;
        (0..self.depth)
            .rev()
            .map(move |shift| Bit::from((bits >> shift) & 1 == 1))
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.depth == 0 {
            write!(f, "/")
        } else {
            write!(f, "{:0width$b}", self.bits, width = self.depth())
        }
    }
}

/// Outcome of feeding one bit to the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Group still open; cursor now sits at this path
    Partial(NodePath),

    /// Eighth bit of the group; cursor is back at the root
    Completed(NodePath),
}

impl Step {
    /// Path reached by the step
    pub fn path(&self) -> NodePath {
        match *self {
            Step::Partial(path) | Step::Completed(path) => path,
        }
    }
}

/// Modulo-8 insertion cursor
///
/// States are the bit indices 0..7; every 8th bit emits a completed path
/// and returns to the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ByteCursor {
    position: NodePath,
}

impl ByteCursor {
    /// Cursor at the root
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the node the cursor points at
    #[inline]
    pub fn position(&self) -> NodePath {
        self.position
    }

    /// Bits consumed since the last group boundary
    #[inline]
    pub fn pending(&self) -> usize {
        self.position.depth()
    }

    /// Consume one bit
    pub fn advance(&mut self, bit: Bit) -> Step {
        match self.position.child(bit) {
            Some(next) if next.depth() < MAX_DEPTH => {
                self.position = next;
                Step::Partial(next)
            }
            next => {
                // Position never rests on a complete path
                let completed = next.unwrap_or(self.position);
                self.position = NodePath::ROOT;
                Step::Completed(completed)
            }
        }
    }

    /// Return to the root, dropping any partial group
    pub fn reset(&mut self) {
        self.position = NodePath::ROOT;
    }
}

/// Height of a subtree: edges on its longest downward path
///
/// Absent nodes and lone nodes both have height 0, so a completed byte path
/// gives a trie of height 8.
pub fn height(node: Option<&TrieNode>) -> usize {
    node.map_or(0, |node| {
        node.children()
            .map(|(_, child)| 1 + height(Some(child)))
            .max()
            .unwrap_or(0)
    })
}

/// Depth-first pre-order walk: node, then left, then right
#[derive(Debug, Clone)]
pub struct PreOrder<'a> {
    stack: Vec<(NodePath, &'a TrieNode)>,
}

impl<'a> PreOrder<'a> {
    /// Walk the whole trie below `root`
    pub fn new(root: Option<&'a TrieNode>) -> Self {
        Self {
            stack: root.map(|node| (NodePath::ROOT, node)).into_iter().collect(),
        }
    }

    /// Walk a subtree whose root sits at `path`
    pub fn from_subtree(node: &'a TrieNode, path: NodePath) -> Self {
        Self {
            stack: vec![(path, node)],
        }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (NodePath, &'a TrieNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, node) = self.stack.pop()?;

        // Right first so that left is popped first
        for (bit, child) in [(Bit::One, node.right()), (Bit::Zero, node.left())] {
            if let (Some(child_path), Some(child)) = (path.child(bit), child) {
                self.stack.push((child_path, child));
            }
        }

        Some((path, node))
    }
}

/// Counts of every depth-8 node, in pre-order
///
/// Lazy and restartable: clone it to replay the sequence.
#[derive(Debug, Clone)]
pub struct LeafCounts<'a> {
    walk: PreOrder<'a>,
}

impl<'a> LeafCounts<'a> {
    /// Leaf counts of the whole trie below `root`
    pub fn new(root: Option<&'a TrieNode>) -> Self {
        Self {
            walk: PreOrder::new(root),
        }
    }

    /// Leaf counts of a subtree whose root sits at `path`
    pub fn from_subtree(node: &'a TrieNode, path: NodePath) -> Self {
        Self {
            walk: PreOrder::from_subtree(node, path),
        }
    }
}

impl Iterator for LeafCounts<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        self.walk
            .by_ref()
            .find(|(path, _)| path.depth() == MAX_DEPTH)
            .map(|(_, node)| node.count())
    }
}
