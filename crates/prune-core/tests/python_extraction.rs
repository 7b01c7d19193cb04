use prune_core::extract::{DEFAULT_PREFIX, extract};
use prune_core::source::SourceTree;

fn parse(source: &str) -> SourceTree {
    SourceTree::parse("test.py", source).unwrap()
}

#[test]
fn test_module_level_functions() {
    let source = "\
def test_alpha():
    assert True

def helper():
    pass

def test_beta():
    assert 2 == 2
";
    let tree = parse(source);
    let defs = extract(&tree, DEFAULT_PREFIX);
    assert_eq!(defs.len(), 2);
    let names: Vec<&str> = defs.names().collect();
    assert_eq!(names, vec!["test_alpha", "test_beta"]);
    assert!(defs.get("helper").is_none());
    assert!(defs.get("test_alpha").unwrap().scope.is_empty());
}

#[test]
fn test_methods_record_scope_path() {
    let source = "\
class TestSuite:
    def test_add(self):
        assert 1 + 1 == 2

    def setup(self):
        pass
";
    let tree = parse(source);
    let defs = extract(&tree, DEFAULT_PREFIX);
    assert_eq!(defs.len(), 1);
    let def = defs.get("test_add").unwrap();
    assert_eq!(def.scope, vec!["TestSuite".to_string()]);
    assert_eq!(def.line_start, 2);
}

#[test]
fn test_nested_class_scope_path() {
    let source = "\
class Outer:
    class Inner:
        def test_deep(self):
            pass
";
    let tree = parse(source);
    let defs = extract(&tree, DEFAULT_PREFIX);
    let def = defs.get("test_deep").unwrap();
    assert_eq!(def.scope, vec!["Outer".to_string(), "Inner".to_string()]);
}

#[test]
fn test_last_wins_on_name_collision() {
    let source = "\
class A:
    def test_dup(self):
        assert 1

class B:
    def test_dup(self):
        assert 2
";
    let tree = parse(source);
    let defs = extract(&tree, DEFAULT_PREFIX);
    assert_eq!(defs.len(), 1);
    let def = defs.get("test_dup").unwrap();
    assert_eq!(def.scope, vec!["B".to_string()]);
    assert_eq!(def.line_start, 6);
    // First-insertion order is preserved even though the value was replaced.
    assert_eq!(defs.names().collect::<Vec<_>>(), vec!["test_dup"]);
}

#[test]
fn test_decorated_definition_span_includes_decorators() {
    let source = "\
import pytest


@pytest.mark.slow
@pytest.mark.flaky
def test_slow():
    assert True
";
    let tree = parse(source);
    let defs = extract(&tree, DEFAULT_PREFIX);
    let def = defs.get("test_slow").unwrap();
    assert!(
        tree.text()[def.span.clone()].starts_with("@pytest.mark.slow"),
        "span must start at the first decorator"
    );
}

#[test]
fn test_display_text_includes_attached_comments() {
    let source = "\
def test_a():
    pass


# checks rounding
# of totals
def test_b():
    pass
";
    let tree = parse(source);
    let defs = extract(&tree, DEFAULT_PREFIX);
    let def = defs.get("test_b").unwrap();
    assert_eq!(
        def.display_text(&tree),
        "# checks rounding\n# of totals\ndef test_b():\n    pass"
    );
    // Blank lines above the comment run are never part of the display text.
    assert!(!def.display_text(&tree).starts_with('\n'));
}

#[test]
fn test_comment_separated_by_blank_is_not_attached() {
    let source = "\
# module-level note

def test_a():
    pass
";
    let tree = parse(source);
    let defs = extract(&tree, DEFAULT_PREFIX);
    let def = defs.get("test_a").unwrap();
    assert_eq!(def.display_text(&tree), "def test_a():\n    pass");
}

#[test]
fn test_deeper_indented_comment_stays_with_previous_body() {
    let source = "\
def keep():
    pass
    # belongs to keep's body
def test_next():
    pass
";
    let tree = parse(source);
    let defs = extract(&tree, DEFAULT_PREFIX);
    let def = defs.get("test_next").unwrap();
    assert_eq!(def.display_text(&tree), "def test_next():\n    pass");
}

#[test]
fn test_defs_inside_function_bodies_are_skipped() {
    let source = "\
def helper():
    def test_inner():
        pass
    return test_inner

def test_outer():
    pass
";
    let tree = parse(source);
    let defs = extract(&tree, DEFAULT_PREFIX);
    assert_eq!(defs.len(), 1);
    assert!(defs.get("test_outer").is_some());
    assert!(defs.get("test_inner").is_none());
}

#[test]
fn test_custom_prefix() {
    let source = "\
def check_invariant():
    pass

def test_regular():
    pass
";
    let tree = parse(source);
    let defs = extract(&tree, "check_");
    assert_eq!(defs.len(), 1);
    assert!(defs.get("check_invariant").is_some());
}

#[test]
fn test_empty_file() {
    let tree = parse("");
    let defs = extract(&tree, DEFAULT_PREFIX);
    assert!(defs.is_empty());
}
