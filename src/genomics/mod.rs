//! Genome text input
//!
//! Turns raw genome files into the bit stream the trie consumes: comment
//! lines and filler bases are removed, every remaining byte is unpacked into
//! 8 bits.

mod bit_source;
mod filter;

pub use bit_source::{filtered_bits, BitSource};
pub use filter::{FilterStats, SequenceFilter};
