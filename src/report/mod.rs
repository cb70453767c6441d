//! Plain-text rendering of tries and their statistics
//!
//! Node lines are written in pre-order (node, left, right), indented with
//! `---` per level:
//!
//! ```text
//! / depth=0 count=0
//! ---0 depth=1 count=0
//! ...
//! ------------------------01000001 depth=8 count=2 byte=0x41
//! ```

use std::io::{self, Write};

use anyhow::{anyhow, Result};

use crate::stats::{self, LeafStatistics};
use crate::tree::{height, BitTrie, LeafCounts, PreOrder, TrieNode};
use crate::ReportConfig;

const INDENT: &str = "---";

/// Write every present node below `root`, node identities included
pub fn print_all_nodes<W: Write>(root: Option<&TrieNode>, sink: &mut W) -> io::Result<()> {
    write_nodes(sink, root, true)
}

/// Write the height line
pub fn print_height<W: Write>(root: Option<&TrieNode>, sink: &mut W) -> io::Result<()> {
    writeln!(sink, "height = {}", height(root))
}

/// Write the mean leaf count line
pub fn print_average<W: Write>(root: Option<&TrieNode>, sink: &mut W) -> io::Result<()> {
    writeln!(sink, "average = {}", stats::mean(LeafCounts::new(root)))
}

/// Write the leaf count variance line
pub fn print_variance<W: Write>(root: Option<&TrieNode>, sink: &mut W) -> io::Result<()> {
    writeln!(
        sink,
        "variance = {}",
        stats::population_variance(LeafCounts::new(root))
    )
}

/// Write node lines, with or without node identities
pub fn write_nodes<W: Write>(
    sink: &mut W,
    root: Option<&TrieNode>,
    show_addresses: bool,
) -> io::Result<()> {
    for (path, node) in PreOrder::new(root) {
        write!(
            sink,
            "{}{} depth={} count={}",
            INDENT.repeat(path.depth()),
            path,
            path.depth(),
            node.count()
        )?;
        if let Some(byte) = path.byte() {
            write!(sink, " byte={byte:#04x}")?;
        }
        if show_addresses {
            write!(sink, " @{}", node.id())?;
        }
        writeln!(sink)?;
    }
    Ok(())
}

/// Write one trie section: nodes (optional), statistics, summary (optional)
pub fn write_section<W: Write>(
    sink: &mut W,
    trie: &BitTrie,
    config: &ReportConfig,
) -> io::Result<()> {
    let root = trie.root();
    if config.show_nodes {
        write_nodes(sink, root, config.show_addresses)?;
    }
    print_height(root, sink)?;
    print_average(root, sink)?;
    print_variance(root, sink)?;

    if config.show_summary {
        write_summary(sink, trie)?;
    }
    Ok(())
}

/// Write the extra statistics shown with `show_summary`
pub fn write_summary<W: Write>(sink: &mut W, trie: &BitTrie) -> io::Result<()> {
    let summary = LeafStatistics::from_trie(trie);
    writeln!(sink, "std_dev = {}", summary.std_dev)?;
    writeln!(sink, "leaves = {}", summary.leaves)?;
    writeln!(sink, "nodes = {}", summary.nodes)?;
    writeln!(sink, "fingerprint = {}", trie.fingerprint().to_hex())
}

/// Write a section separator such as `******* COPY *******`
pub fn write_banner<W: Write>(sink: &mut W, title: &str) -> io::Result<()> {
    write!(sink, "\n******* {title} *******\n\n")
}

/// Render one trie section into a string (useful for tests and snapshots)
pub fn render_section(trie: &BitTrie, config: &ReportConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_section(&mut buffer, trie, config)?;
    String::from_utf8(buffer).map_err(|_| anyhow!("rendered report is not valid UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BitTrie {
        let mut trie = BitTrie::new();
        for byte in [0x41u8, 0x41, 0x42] {
            trie.insert_byte(byte);
        }
        trie
    }

    fn rendered<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn statistic_lines() {
        let trie = sample();
        let root = trie.root();
        assert_eq!(rendered(|w| print_height(root, w)), "height = 8\n");
        assert_eq!(rendered(|w| print_average(root, w)), "average = 1.5\n");
        assert_eq!(rendered(|w| print_variance(root, w)), "variance = 0.25\n");
    }

    #[test]
    fn statistic_lines_for_empty_trie() {
        assert_eq!(rendered(|w| print_height(None, w)), "height = 0\n");
        assert_eq!(rendered(|w| print_average(None, w)), "average = 0\n");
        assert_eq!(rendered(|w| print_variance(None, w)), "variance = 0\n");
        assert_eq!(rendered(|w| print_all_nodes(None, w)), "");
    }

    #[test]
    fn node_lines_in_pre_order() {
        let trie = sample();
        let text = rendered(|w| write_nodes(w, trie.root(), false));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "/ depth=0 count=0");
        assert_eq!(lines[1], "---0 depth=1 count=0");
        assert_eq!(
            lines[8],
            "------------------------01000001 depth=8 count=2 byte=0x41"
        );
        assert_eq!(
            lines[10],
            "------------------------01000010 depth=8 count=1 byte=0x42"
        );
    }

    #[test]
    fn node_lines_carry_identities() {
        let trie = sample();
        let text = rendered(|w| print_all_nodes(trie.root(), w));
        let root_id = trie.root().unwrap().id();
        assert!(text.lines().next().unwrap().ends_with(&format!(" @{root_id}")));
        assert!(text.lines().all(|line| line.contains(" @0x")));
    }

    #[test]
    fn section_with_summary() {
        let config = ReportConfig {
            show_nodes: false,
            show_summary: true,
            ..ReportConfig::default()
        };
        let text = render_section(&sample(), &config).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            &lines[..6],
            &[
                "height = 8",
                "average = 1.5",
                "variance = 0.25",
                "std_dev = 0.5",
                "leaves = 2",
                "nodes = 11",
            ]
        );
        assert!(lines[6].starts_with("fingerprint = "));
    }

    #[test]
    fn banner_layout() {
        assert_eq!(
            rendered(|w| write_banner(w, "COPY")),
            "\n******* COPY *******\n\n"
        );
    }
}
