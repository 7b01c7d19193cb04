//! Integration tests for the testprune CLI flow.
//! Exercises the library path the binary drives: read both files, run the
//! engine with a non-interactive oracle, write the cleaned artifact.

use prune_core::engine::dedup;
use prune_core::oracle::IdenticalOracle;
use std::fs;

const FILE1: &str = "\
import math


def test_sqrt():
    assert math.sqrt(4) == 2


def test_local_only():
    assert True
";

const FILE2: &str = "\
def test_sqrt():
    assert math.sqrt(4) == 2
";

#[test]
fn test_end_to_end_writes_cleaned_copy() {
    let tmpdir = tempfile::tempdir().unwrap();
    let path1 = tmpdir.path().join("test_things.py");
    let path2 = tmpdir.path().join("test_other.py");
    fs::write(&path1, FILE1).unwrap();
    fs::write(&path2, FILE2).unwrap();

    let text1 = fs::read_to_string(&path1).unwrap();
    let text2 = fs::read_to_string(&path2).unwrap();
    let mut oracle = IdenticalOracle;
    let outcome = dedup(
        &path1.display().to_string(),
        &text1,
        &path2.display().to_string(),
        &text2,
        "test_",
        &mut oracle,
    )
    .unwrap();

    assert!(outcome.changed());
    let cleaned = tmpdir.path().join("test_things_cleaned.py");
    fs::write(&cleaned, &outcome.output).unwrap();

    let written = fs::read_to_string(&cleaned).unwrap();
    assert_eq!(written, "import math\n\n\ndef test_local_only():\n    assert True\n");
    // Inputs are never mutated in place.
    assert_eq!(fs::read_to_string(&path1).unwrap(), FILE1);
    assert_eq!(fs::read_to_string(&path2).unwrap(), FILE2);
}

#[test]
fn test_no_common_tests_means_nothing_to_write() {
    let tmpdir = tempfile::tempdir().unwrap();
    let path1 = tmpdir.path().join("a.py");
    let path2 = tmpdir.path().join("b.py");
    fs::write(&path1, "def test_a():\n    pass\n").unwrap();
    fs::write(&path2, "def test_b():\n    pass\n").unwrap();

    let text1 = fs::read_to_string(&path1).unwrap();
    let text2 = fs::read_to_string(&path2).unwrap();
    let mut oracle = IdenticalOracle;
    let outcome = dedup("a.py", &text1, "b.py", &text2, "test_", &mut oracle).unwrap();

    assert!(!outcome.changed());
    assert_eq!(outcome.output, text1);
}

#[test]
fn test_parse_error_reports_offending_file() {
    let err = dedup(
        "good.py",
        "def test_a():\n    pass\n",
        "bad.py",
        "class :\n",
        "test_",
        &mut IdenticalOracle,
    )
    .unwrap_err();
    assert!(err.to_string().contains("bad.py"));
}
