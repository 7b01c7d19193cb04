//! Equivalence oracle abstraction.
//!
//! The decision source is injected so the engine works the same with the
//! interactive terminal prompt, a scripted oracle in tests, or the
//! byte-identity oracle used by `--auto`.

/// One verdict for a matched pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The two definitions are interchangeable; remove the left one.
    Equivalent,
    /// Keep both.
    Distinct,
    /// Cancel the run. No removal is applied.
    Abort,
}

/// Decides whether two same-named definitions are equivalent.
///
/// `left` and `right` are the exact source text of each definition, leading
/// comment and decorator lines included. Called once per matched pair, in
/// match order; the call may block on external input.
pub trait Oracle {
    fn judge(&mut self, name: &str, left: &str, right: &str) -> Verdict;
}

/// Equivalent iff the two texts are byte-identical.
pub struct IdenticalOracle;

impl Oracle for IdenticalOracle {
    fn judge(&mut self, _name: &str, left: &str, right: &str) -> Verdict {
        if left == right {
            Verdict::Equivalent
        } else {
            Verdict::Distinct
        }
    }
}

/// Adapter turning a closure into an [`Oracle`], for scripted decisions.
pub struct FnOracle<F>(pub F);

impl<F> Oracle for FnOracle<F>
where
    F: FnMut(&str, &str, &str) -> Verdict,
{
    fn judge(&mut self, name: &str, left: &str, right: &str) -> Verdict {
        (self.0)(name, left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_oracle() {
        let mut oracle = IdenticalOracle;
        assert_eq!(
            oracle.judge("test_a", "def test_a(): pass", "def test_a(): pass"),
            Verdict::Equivalent
        );
        assert_eq!(
            oracle.judge("test_a", "def test_a(): pass", "def test_a():  pass"),
            Verdict::Distinct
        );
    }
}
