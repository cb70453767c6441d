use std::collections::HashSet;

use blake3::hash;
use bitree::{Analyzer, BitTrie, ReportConfig};

const GENOME: &[u8] = b">chrDeterministic\nACGTNNACGTTTGACCA\n>chrM\nGATTACA\n";

#[test]
fn deterministic_report_is_stable() {
    let mut fingerprints = HashSet::new();
    for _ in 0..5 {
        let mut out = Vec::new();
        Analyzer::new(ReportConfig::deterministic())
            .run(GENOME, &mut out)
            .expect("analysis succeeds");
        fingerprints.insert(hash(&out));
    }

    assert_eq!(fingerprints.len(), 1, "outputs diverged across runs");
}

#[test]
fn fingerprint_ignores_node_identity() {
    let (trie, _) = Analyzer::default().build(GENOME).unwrap();
    let mut copy = BitTrie::new();
    copy.assign_copy(&trie);

    assert_eq!(trie.fingerprint(), copy.fingerprint());

    copy.insert_byte(b'A');
    assert_ne!(trie.fingerprint(), copy.fingerprint());
}
