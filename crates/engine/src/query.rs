//! Query compilation and the match predicate.
//!
//! A `Query` is validated and compiled once, before any scanning starts.
//! Regex compilation failures and empty search text surface here as
//! `QueryError`; the per-cell predicate itself never fails.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User-supplied search options, prior to compilation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryOptions {
    /// The text (or regex pattern) to search for.
    pub target: String,
    /// Match only cells whose entire content equals the target.
    pub whole_cell: bool,
    /// Compare case-sensitively.
    pub case_sensitive: bool,
    /// Interpret `target` as a regular expression.
    pub regex: bool,
}

impl QueryOptions {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            whole_cell: false,
            case_sensitive: false,
            regex: false,
        }
    }
}

/// Why a query could not be compiled.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Empty search text would match every cell in contains mode.
    #[error("search text is empty")]
    EmptyTarget,

    #[error("invalid regex pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A compiled, ready-to-evaluate search query.
///
/// When `pattern` is present it takes precedence entirely: the case and
/// whole-cell options were folded into it at compile time.
#[derive(Debug, Clone)]
pub struct Query {
    needle: String,
    whole_cell: bool,
    case_sensitive: bool,
    pattern: Option<Regex>,
}

impl Query {
    /// Validate and compile search options.
    pub fn compile(options: &QueryOptions) -> Result<Self, QueryError> {
        if options.target.is_empty() {
            return Err(QueryError::EmptyTarget);
        }

        let pattern = if options.regex {
            // Whole-cell folds into anchoring, case folds into a flag
            let source = if options.whole_cell {
                format!("^(?:{})$", options.target)
            } else {
                options.target.clone()
            };
            let compiled = RegexBuilder::new(&source)
                .case_insensitive(!options.case_sensitive)
                .build()
                .map_err(|e| QueryError::InvalidPattern {
                    pattern: options.target.clone(),
                    source: e,
                })?;
            Some(compiled)
        } else {
            None
        };

        // Lowercase the literal needle once, not per cell
        let needle = if options.case_sensitive || pattern.is_some() {
            options.target.clone()
        } else {
            options.target.to_lowercase()
        };

        Ok(Self {
            needle,
            whole_cell: options.whole_cell,
            case_sensitive: options.case_sensitive,
            pattern,
        })
    }

    /// The match predicate: does one cell's text satisfy this query?
    ///
    /// Total over all input strings; the cell text is already stringified
    /// (blank cells arrive as ""), so there is nothing left to fail.
    pub fn matches(&self, cell_text: &str) -> bool {
        if let Some(pattern) = &self.pattern {
            return pattern.is_match(cell_text);
        }

        if self.case_sensitive {
            if self.whole_cell {
                cell_text == self.needle
            } else {
                cell_text.contains(&self.needle)
            }
        } else {
            let folded = cell_text.to_lowercase();
            if self.whole_cell {
                folded == self.needle
            } else {
                folded.contains(&self.needle)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(target: &str, whole_cell: bool, case_sensitive: bool, regex: bool) -> Query {
        Query::compile(&QueryOptions {
            target: target.to_string(),
            whole_cell,
            case_sensitive,
            regex,
        })
        .unwrap()
    }

    #[test]
    fn test_contains_case_insensitive() {
        let q = compile("foo", false, false, false);
        assert!(q.matches("Foo"));
        assert!(q.matches("buFOOn"));
        assert!(!q.matches("fo"));
        assert!(!q.matches(""));
    }

    #[test]
    fn test_contains_case_sensitive() {
        let q = compile("foo", false, true, false);
        assert!(!q.matches("Foo"));
        assert!(q.matches("foo fighters"));
    }

    #[test]
    fn test_whole_cell() {
        let q = compile("Foo", true, false, false);
        assert!(q.matches("Foo"));
        assert!(q.matches("foo"));
        assert!(!q.matches("Foo "));

        let q = compile("Foo", true, true, false);
        assert!(q.matches("Foo"));
        assert!(!q.matches("foo"));
    }

    #[test]
    fn test_regex_ignores_literal_options() {
        // Case folds into the pattern flag, whole-cell into anchors
        let q = compile("a+pie", false, false, true);
        assert!(q.matches("grand A+Pie stand"));

        let q = compile("ap+le", true, true, true);
        assert!(q.matches("apple"));
        assert!(!q.matches("an apple"));
    }

    #[test]
    fn test_regex_compile_failure() {
        let err = Query::compile(&QueryOptions {
            target: "(unclosed".to_string(),
            whole_cell: false,
            case_sensitive: false,
            regex: true,
        });
        assert!(matches!(err, Err(QueryError::InvalidPattern { .. })));
    }

    #[test]
    fn test_empty_target_rejected() {
        for regex in [false, true] {
            let err = Query::compile(&QueryOptions {
                target: String::new(),
                whole_cell: false,
                case_sensitive: false,
                regex,
            });
            assert!(matches!(err, Err(QueryError::EmptyTarget)));
        }
    }

    #[test]
    fn test_predicate_total_over_odd_input() {
        let q = compile("x", false, false, false);
        // Never panics, whatever the cell contains
        q.matches("\u{0}\u{1}");
        q.matches("日本語のセル");
        q.matches(&"y".repeat(10_000));
    }
}
