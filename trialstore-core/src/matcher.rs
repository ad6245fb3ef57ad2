//! Membership tests over actor names, classes and implementations.

use glob_match::glob_match;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// How non-empty pattern lists are compared against candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Case-sensitive exact membership
    #[default]
    Exact,
    /// Shell-style globs (`*`, `?`, `[..]`, `{a,b}`)
    Glob,
}

/// Reusable membership test built from a list of patterns.
///
/// An empty pattern list builds [`Matcher::Unrestricted`], which matches
/// every candidate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Matcher {
    #[default]
    Unrestricted,
    Exact(HashSet<String>),
    Glob(Vec<String>),
}

impl Matcher {
    /// Build an exact-membership matcher
    pub fn build<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_mode(patterns, MatchMode::Exact)
    }

    pub fn with_mode<I, S>(patterns: I, mode: MatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match mode {
            MatchMode::Exact => {
                let set: HashSet<String> = patterns.into_iter().map(Into::into).collect();
                if set.is_empty() {
                    Matcher::Unrestricted
                } else {
                    Matcher::Exact(set)
                }
            }
            MatchMode::Glob => {
                let set: BTreeSet<String> = patterns.into_iter().map(Into::into).collect();
                if set.is_empty() {
                    Matcher::Unrestricted
                } else {
                    Matcher::Glob(set.into_iter().collect())
                }
            }
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Matcher::Unrestricted)
    }

    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            Matcher::Unrestricted => true,
            Matcher::Exact(set) => set.contains(candidate),
            Matcher::Glob(patterns) => patterns
                .iter()
                .any(|pattern| glob_match(pattern, candidate)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patterns_are_unrestricted() {
        let matcher = Matcher::build(Vec::<String>::new());
        assert!(matcher.is_unrestricted());
        assert!(matcher.matches("anything"));
        assert!(matcher.matches(""));

        let glob = Matcher::with_mode(Vec::<String>::new(), MatchMode::Glob);
        assert!(glob.is_unrestricted());
    }

    #[test]
    fn test_exact_membership_is_case_sensitive() {
        let matcher = Matcher::build(["my-actor-2", "my-actor-2", "other"]);
        assert!(!matcher.is_unrestricted());
        assert!(matcher.matches("my-actor-2"));
        assert!(matcher.matches("other"));
        assert!(!matcher.matches("My-Actor-2"));
        assert!(!matcher.matches("my-actor"));
        assert!(!matcher.matches("my-actor-*"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let matcher = Matcher::build(["a", "a", "a"]);
        match matcher {
            Matcher::Exact(set) => assert_eq!(set.len(), 1),
            other => panic!("Expected Exact, got {:?}", other),
        }
    }

    #[test]
    fn test_glob_mode() {
        let matcher = Matcher::with_mode(["my-actor-*", "scripted-?"], MatchMode::Glob);
        assert!(matcher.matches("my-actor-1"));
        assert!(matcher.matches("my-actor-22"));
        assert!(matcher.matches("scripted-a"));
        assert!(!matcher.matches("scripted-ab"));
        assert!(!matcher.matches("their-actor-1"));
    }
}
