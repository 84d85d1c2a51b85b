//! Exact substring search over lines.

use serde::Serialize;

use super::lines::FileLines;

/// A line that matched a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchCandidate {
    /// 0-based line index.
    pub line: usize,
    /// Full line content.
    pub content: String,
    /// 1.0 for exact hits, the similarity ratio for fuzzy ones.
    pub score: f64,
}

impl MatchCandidate {
    /// An exact hit.
    #[must_use]
    pub fn exact(line: usize, content: &str) -> Self {
        Self {
            line,
            content: content.to_owned(),
            score: 1.0,
        }
    }
}

/// Lines containing `pattern`, in file order, at most `max_matches`.
///
/// An empty pattern matches nothing.
#[must_use]
pub fn find_literal(
    lines: &FileLines,
    pattern: &str,
    max_matches: usize,
    ignore_case: bool,
) -> Vec<MatchCandidate> {
    if pattern.is_empty() {
        return Vec::new();
    }

    let needle = if ignore_case {
        pattern.to_lowercase()
    } else {
        pattern.to_owned()
    };

    lines
        .numbered()
        .filter(|(_, line)| {
            if ignore_case {
                line.to_lowercase().contains(&needle)
            } else {
                line.contains(&needle)
            }
        })
        .take(max_matches)
        .map(|(i, line)| MatchCandidate::exact(i, line))
        .collect()
}

/// Non-overlapping occurrences of `pattern` in `line`.
#[must_use]
pub fn count_occurrences(line: &str, pattern: &str) -> usize {
    if pattern.is_empty() {
        return 0;
    }
    line.matches(pattern).count()
}
