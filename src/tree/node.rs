//! Trie vertex representation
//!
//! Node = (left child, right child, count)
//!   Left child:  path extended with bit 0
//!   Right child: path extended with bit 1
//!
//! Children are boxed, so a node keeps its heap address for its whole life.
//! That address is what [`NodeId`] exposes.

use std::fmt;

use bitvec::{order::Msb0, view::BitView};
use thiserror::Error;

/// Depth of a completed path: one byte's worth of bits.
pub const MAX_DEPTH: usize = 8;

/// A single key bit. `Zero` selects the left child, `One` the right child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bit {
    /// Bit value 0 (left child)
    Zero,

    /// Bit value 1 (right child)
    One,
}

impl Bit {
    /// Numeric value (0 or 1)
    #[inline]
    pub fn value(self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }

    /// Unpack a byte into its 8 bits, most significant bit first.
    pub fn msb_first(byte: u8) -> [Bit; MAX_DEPTH] {
        let mut bits = [Bit::Zero; MAX_DEPTH];
        for (slot, bit) in bits
            .iter_mut()
            .zip(byte.view_bits::<Msb0>().iter().by_vals())
        {
            *slot = Bit::from(bit);
        }
        bits
    }
}

impl From<bool> for Bit {
    fn from(bit: bool) -> Self {
        if bit {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

/// Raw value that cannot be interpreted as a bit.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidBit {
    /// Numeric value other than 0 or 1
    #[error("bit value must be 0 or 1, got {0}")]
    Value(u8),

    /// Character other than '0' or '1'
    #[error("bit character must be '0' or '1', got {0:?}")]
    Char(char),
}

impl TryFrom<u8> for Bit {
    type Error = InvalidBit;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Bit::Zero),
            1 => Ok(Bit::One),
            other => Err(InvalidBit::Value(other)),
        }
    }
}

impl TryFrom<char> for Bit {
    type Error = InvalidBit;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '0' => Ok(Bit::Zero),
            '1' => Ok(Bit::One),
            other => Err(InvalidBit::Char(other)),
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Identity of a live node (its heap address).
///
/// Two ids are equal only if they name the same allocation, so a deep copy
/// never shares an id with its source while a move keeps every id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Trie node
///
/// `PartialEq` is structural: same shape and same counts, regardless of
/// where the nodes live.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrieNode {
    /// Subtree for bit 0
    left: Option<Box<TrieNode>>,

    /// Subtree for bit 1
    right: Option<Box<TrieNode>>,

    /// Completed paths ending here
    count: u64,
}

impl TrieNode {
    /// Create a node with no children and a zero count
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed paths ending at this node
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Left (bit 0) child
    #[inline]
    pub fn left(&self) -> Option<&TrieNode> {
        self.left.as_deref()
    }

    /// Right (bit 1) child
    #[inline]
    pub fn right(&self) -> Option<&TrieNode> {
        self.right.as_deref()
    }

    /// Child selected by `bit`
    #[inline]
    pub fn child(&self, bit: Bit) -> Option<&TrieNode> {
        match bit {
            Bit::Zero => self.left(),
            Bit::One => self.right(),
        }
    }

    /// Present children, left before right
    pub fn children(&self) -> impl Iterator<Item = (Bit, &TrieNode)> {
        self.left()
            .map(|node| (Bit::Zero, node))
            .into_iter()
            .chain(self.right().map(|node| (Bit::One, node)))
    }

    /// Check if node has no children
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Identity of this node
    #[inline]
    pub fn id(&self) -> NodeId {
        NodeId(self as *const TrieNode as usize)
    }

    /// Child selected by `bit`, created on first use
    pub(crate) fn child_or_insert(&mut self, bit: Bit) -> &mut TrieNode {
        let slot = match bit {
            Bit::Zero => &mut self.left,
            Bit::One => &mut self.right,
        };
        slot.get_or_insert_with(Box::default)
    }

    pub(crate) fn increment(&mut self) {
        self.count += 1;
    }
}
