//! # Byte-frequency bit trie over genomic text
//!
//! Builds a depth-8 binary trie from a genome file and reports statistics
//! over its leaves.
//!
//! ## Pipeline
//!
//! 1. **Filtering**: `>` comment lines, line breaks and `N` filler are dropped
//! 2. **Unpacking**: every remaining byte becomes 8 bits, MSB first
//! 3. **Insertion**: each 8-bit group walks one root-to-leaf path and bumps
//!    the leaf's count, so leaves form a byte histogram
//! 4. **Reporting**: nodes in pre-order, then height, mean and variance of
//!    the leaf counts
//!
//! The report also shows a deep copy of the trie (same shape, new node
//! identities) and a move of it (same node identities, source left empty).
//!
//! ## Usage Example
//!
//! ```
//! use bitree::BitTrie;
//!
//! let mut trie = BitTrie::new();
//! for byte in [0x41, 0x41, 0x42] {
//!     trie.insert_byte(byte);
//! }
//! assert_eq!(trie.height(), 8);
//! assert_eq!(trie.average(), 1.5);
//! assert_eq!(trie.variance(), 0.25);
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod genomics; // Comment/filler filtering and bit unpacking
pub mod report; // Text rendering
pub mod stats; // Leaf-count statistics
pub mod tree; // Bit trie engine

// Re-exports for convenience
pub use genomics::{BitSource, FilterStats, SequenceFilter};
pub use stats::LeafStatistics;
pub use tree::{Bit, BitTrie, NodeId, NodePath, TrieNode};

use std::collections::HashSet;
use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{debug, info};

/// What a report contains
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Write one line per node before the statistics
    pub show_nodes: bool,

    /// Append each node's identity (heap address) to its line
    pub show_addresses: bool,

    /// Follow the original section with a deep copy and a moved trie
    pub ownership_demo: bool,

    /// Add standard deviation, leaf/node counts and fingerprint
    pub show_summary: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            show_nodes: true,
            show_addresses: true,
            ownership_demo: true,
            show_summary: false,
        }
    }
}

impl ReportConfig {
    /// Full report without node identities: identical across runs
    pub fn deterministic() -> Self {
        Self {
            show_addresses: false,
            ..Self::default()
        }
    }

    /// Statistics only
    pub fn statistics_only() -> Self {
        Self {
            show_nodes: false,
            show_addresses: false,
            ownership_demo: false,
            show_summary: false,
        }
    }
}

/// Errors that can occur during analysis
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Input could not be read
    #[error("failed to read input")]
    Read(#[source] io::Error),

    /// Report could not be written
    #[error("failed to write report")]
    Write(#[source] io::Error),

    /// Input contained no bytes at all
    #[error("input is empty")]
    EmptyInput,
}

/// Observations made while copying and moving the trie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnershipCheck {
    /// Copy has the same shape and counts as the original
    pub copy_matches: bool,

    /// Copy shares no node identity with the original
    pub copy_is_disjoint: bool,

    /// Moved trie has exactly the original node identities
    pub move_preserves_identity: bool,

    /// Original is empty after the move
    pub source_emptied: bool,
}

impl OwnershipCheck {
    /// All observations hold
    pub fn holds(&self) -> bool {
        self.copy_matches
            && self.copy_is_disjoint
            && self.move_preserves_identity
            && self.source_emptied
    }
}

/// Result of an analysis run
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// Input byte counters
    pub filter: FilterStats,

    /// Statistics of the original trie
    pub statistics: LeafStatistics,

    /// Copy/move observations (if the demo ran)
    pub ownership: Option<OwnershipCheck>,
}

/// Drives input → trie → report
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: ReportConfig,
}

impl Analyzer {
    /// Create analyzer
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Report configuration in use
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Build a trie from a genome stream
    ///
    /// Fails with [`AnalysisError::EmptyInput`] when the stream has no bytes.
    /// A stream holding only comments or filler yields an empty trie.
    pub fn build<R: BufRead>(&self, reader: R) -> Result<(BitTrie, FilterStats), AnalysisError> {
        let mut trie = BitTrie::new();
        let filter = BitSource::new(reader)
            .feed(&mut trie)
            .map_err(AnalysisError::Read)?;

        if filter.bytes_read == 0 {
            return Err(AnalysisError::EmptyInput);
        }

        info!(
            bytes_read = filter.bytes_read,
            bytes_kept = filter.bytes_kept,
            bytes_skipped = filter.bytes_skipped(),
            nodes = trie.node_count(),
            "trie built"
        );
        Ok((trie, filter))
    }

    /// Build the trie and write the full report
    ///
    /// Sections: the original trie; then, with `ownership_demo`, a deep copy
    /// under `COPY` and the original moved into a third trie under `MOVED`.
    pub fn run<R: BufRead, W: Write>(
        &self,
        reader: R,
        writer: &mut W,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let (trie, filter) = self.build(reader)?;
        self.report(trie, filter, writer)
    }

    /// Write the full report for an already built trie
    pub fn report<W: Write>(
        &self,
        mut trie: BitTrie,
        filter: FilterStats,
        writer: &mut W,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let statistics = LeafStatistics::from_trie(&trie);

        report::write_section(writer, &trie, &self.config).map_err(AnalysisError::Write)?;

        let ownership = if self.config.ownership_demo {
            Some(self.demonstrate_ownership(&mut trie, writer)?)
        } else {
            None
        };

        writer.flush().map_err(AnalysisError::Write)?;

        Ok(AnalysisOutcome {
            filter,
            statistics,
            ownership,
        })
    }

    fn demonstrate_ownership<W: Write>(
        &self,
        original: &mut BitTrie,
        writer: &mut W,
    ) -> Result<OwnershipCheck, AnalysisError> {
        let original_ids = original.node_ids();

        let mut copy = BitTrie::new();
        copy.assign_copy(original);
        debug!(nodes = copy.node_count(), "deep copy complete");

        report::write_banner(writer, "COPY").map_err(AnalysisError::Write)?;
        report::write_section(writer, &copy, &self.config).map_err(AnalysisError::Write)?;

        let seen: HashSet<NodeId> = original_ids.iter().copied().collect();
        let copy_matches = copy == *original;
        let copy_is_disjoint = copy.node_ids().iter().all(|id| !seen.contains(id));

        let mut moved = BitTrie::new();
        moved.take_ownership(original);
        debug!(nodes = moved.node_count(), "ownership transferred");

        report::write_banner(writer, "MOVED").map_err(AnalysisError::Write)?;
        report::write_section(writer, &moved, &self.config).map_err(AnalysisError::Write)?;

        Ok(OwnershipCheck {
            copy_matches,
            copy_is_disjoint,
            move_preserves_identity: moved.node_ids() == original_ids,
            source_emptied: original.is_empty(),
        })
    }
}
