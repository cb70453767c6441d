/// Starts a comment that runs to the end of the line
const COMMENT_START: u8 = b'>';
/// Ends a comment; never part of the sequence itself
const LINE_END: u8 = b'\n';
/// Filler base carrying no information
const FILLER: u8 = b'N';

/// Byte counters collected while filtering an input stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FilterStats {
    /// Every byte seen
    pub bytes_read: u64,
    /// Bytes passed on to the trie
    pub bytes_kept: u64,
    /// `>` markers and the bytes of the comments they open
    pub comment_bytes: u64,
    /// Dropped `N` bytes (inside or outside comments)
    pub filler_bytes: u64,
    /// Dropped line terminators
    pub line_breaks: u64,
}

impl FilterStats {
    /// Bytes that did not reach the trie
    pub fn bytes_skipped(&self) -> u64 {
        self.bytes_read - self.bytes_kept
    }
}

/// Two-state filter separating sequence bytes from comments and filler
///
/// `>` switches to comment state, `\n` switches back; both are dropped.
/// `N` is dropped in either state. Any other byte is kept unless a comment
/// is open.
#[derive(Debug, Clone, Default)]
pub struct SequenceFilter {
    in_comment: bool,
    stats: FilterStats,
}

impl SequenceFilter {
    /// Create a filter outside of any comment
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one byte, returning it if it belongs to the sequence
    pub fn accept(&mut self, byte: u8) -> Option<u8> {
        self.stats.bytes_read += 1;

        match byte {
            COMMENT_START => {
                self.in_comment = true;
                self.stats.comment_bytes += 1;
                None
            }
            LINE_END => {
                self.in_comment = false;
                self.stats.line_breaks += 1;
                None
            }
            FILLER => {
                self.stats.filler_bytes += 1;
                None
            }
            _ if self.in_comment => {
                self.stats.comment_bytes += 1;
                None
            }
            kept => {
                self.stats.bytes_kept += 1;
                Some(kept)
            }
        }
    }

    /// Whether a comment is currently open
    pub fn in_comment(&self) -> bool {
        self.in_comment
    }

    /// Counters so far
    pub fn stats(&self) -> &FilterStats {
        &self.stats
    }

    /// Consume the filter, returning its counters
    pub fn into_stats(self) -> FilterStats {
        self.stats
    }
}
