use std::io::{self, BufRead, ErrorKind};

use tracing::{debug, trace};

use super::{FilterStats, SequenceFilter};
use crate::tree::{Bit, BitTrie};

/// Streams a reader through [`SequenceFilter`] into a trie
///
/// Every kept byte becomes exactly 8 insertions, most significant bit
/// first, so the trie's cursor is back at the root after each byte.
#[derive(Debug)]
pub struct BitSource<R> {
    reader: R,
    filter: SequenceFilter,
}

impl<R: BufRead> BitSource<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            filter: SequenceFilter::new(),
        }
    }

    /// Read to end of input, inserting the bits of every kept byte
    pub fn feed(mut self, trie: &mut BitTrie) -> io::Result<FilterStats> {
        loop {
            let chunk = match self.reader.fill_buf() {
                Ok(chunk) => chunk,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if chunk.is_empty() {
                break;
            }

            for &byte in chunk {
                if let Some(kept) = self.filter.accept(byte) {
                    trie.insert_byte(kept);
                }
            }

            let consumed = chunk.len();
            trace!(consumed, "consumed input chunk");
            self.reader.consume(consumed);
        }

        let stats = self.filter.into_stats();
        debug!(
            bytes_read = stats.bytes_read,
            bytes_kept = stats.bytes_kept,
            comment_bytes = stats.comment_bytes,
            filler_bytes = stats.filler_bytes,
            line_breaks = stats.line_breaks,
            "input exhausted"
        );
        Ok(stats)
    }
}

/// Bits of the sequence bytes of `input`, comments and filler removed
pub fn filtered_bits(input: &[u8]) -> impl Iterator<Item = Bit> + '_ {
    let mut filter = SequenceFilter::new();
    input
        .iter()
        .filter_map(move |&byte| filter.accept(byte))
        .flat_map(Bit::msb_first)
}
