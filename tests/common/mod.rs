use std::fs;
use std::path::PathBuf;

const UPDATE_VAR: &str = "BITREE_UPDATE_SNAPSHOTS";

fn snapshot_path(name: &str) -> PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "tests", "snapshots", name]
        .iter()
        .collect()
}

/// Compare `actual` against `tests/snapshots/<name>`, or rewrite the file
/// when `BITREE_UPDATE_SNAPSHOTS` is set.
pub fn assert_snapshot(name: &str, actual: &str) {
    let path = snapshot_path(name);
    if std::env::var_os(UPDATE_VAR).is_some() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create snapshot directory");
        }
        fs::write(&path, actual).expect("write snapshot");
        return;
    }

    let expected = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("snapshot {} unreadable: {err}", path.display()));
    let expected = expected.replace("\r\n", "\n");

    if let Some((line_no, (want, got))) = expected
        .lines()
        .zip(actual.lines())
        .enumerate()
        .find(|(_, (want, got))| want != got)
    {
        panic!(
            "snapshot {} differs at line {}\n  expected: {want}\n  actual:   {got}\nSet {UPDATE_VAR}=1 to regenerate.",
            path.display(),
            line_no + 1
        );
    }
    assert_eq!(
        expected.lines().count(),
        actual.lines().count(),
        "snapshot {} line count differs; set {UPDATE_VAR}=1 to regenerate",
        path.display()
    );
}
