//! Line-level unified diffs and character-level inline diffs.

use std::fmt::Write as _;

use similar::{Algorithm, ChangeTag, DiffTag, TextDiff};

/// Line counts for a change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    /// Lines only in the new version.
    pub added: usize,
    /// Lines only in the old version.
    pub removed: usize,
}

/// Unified diff between two line sequences with `context` lines of context.
///
/// Headers are `--- before` / `+++ after`. Identical inputs give `""`.
#[must_use]
pub fn unified_diff(old: &[String], new: &[String], context: usize) -> String {
    let old: Vec<&str> = old.iter().map(String::as_str).collect();
    let new: Vec<&str> = new.iter().map(String::as_str).collect();

    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_slices(&old, &new);

    let mut udiff = diff.unified_diff();
    udiff
        .context_radius(context)
        .missing_newline_hint(false)
        .header("before", "after");
    let rendered = udiff.to_string();

    // No trailing newline after the last hunk line.
    match rendered.strip_suffix('\n') {
        Some(trimmed) => trimmed.to_owned(),
        None => rendered,
    }
}

/// Count added and removed lines.
#[must_use]
pub fn diff_stats(old: &[String], new: &[String]) -> DiffStats {
    let old: Vec<&str> = old.iter().map(String::as_str).collect();
    let new: Vec<&str> = new.iter().map(String::as_str).collect();
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_slices(&old, &new);

    diff.iter_all_changes()
        .fold(DiffStats::default(), |mut stats, change| {
            match change.tag() {
                ChangeTag::Insert => stats.added = stats.added.saturating_add(1),
                ChangeTag::Delete => stats.removed = stats.removed.saturating_add(1),
                ChangeTag::Equal => {},
            }
            stats
        })
}

/// Character diff of two strings: unchanged text verbatim, deletions as
/// `{-x-}`, insertions as `{+y+}`.
#[must_use]
pub fn inline_diff(old: &str, new: &str) -> String {
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_chars(old, new);
    let old_chars = diff.old_slices();
    let new_chars = diff.new_slices();

    let mut out = String::with_capacity(old.len().saturating_add(new.len()));
    for op in diff.ops() {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        let removed: String = old_chars[old_range].concat();
        let added: String = new_chars[new_range].concat();
        match tag {
            DiffTag::Equal => out.push_str(&removed),
            DiffTag::Delete => {
                let _ = write!(out, "{{-{removed}-}}");
            },
            DiffTag::Insert => {
                let _ = write!(out, "{{+{added}+}}");
            },
            DiffTag::Replace => {
                let _ = write!(out, "{{-{removed}-}}{{+{added}+}}");
            },
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &[&str]) -> Vec<String> {
        s.iter().map(|l| (*l).to_owned()).collect()
    }

    #[test]
    fn test_identical_is_empty() {
        let lines = v(&["a", "b"]);
        assert_eq!(unified_diff(&lines, &lines, 3), "");
        assert_eq!(diff_stats(&lines, &lines), DiffStats::default());
    }

    #[test]
    fn test_single_line_change() {
        let old = v(&["a", "b", "c"]);
        let new = v(&["a", "B", "c"]);
        let diff = unified_diff(&old, &new, 3);
        assert_eq!(diff, "--- before\n+++ after\n@@ -1,3 +1,3 @@\n a\n-b\n+B\n c");
    }

    #[test]
    fn test_context_limits_hunk() {
        let old: Vec<String> = (0..20).map(|i| i.to_string()).collect();
        let mut new = old.clone();
        new[10] = "ten".to_owned();
        let diff = unified_diff(&old, &new, 1);
        assert!(diff.contains("@@ -10,3 +10,3 @@"), "{diff}");
        assert!(!diff.contains(" 5\n"));
    }

    #[test]
    fn test_insert_into_empty_range() {
        let old = v(&["a"]);
        let new = v(&["x", "a"]);
        let diff = unified_diff(&old, &new, 0);
        assert!(diff.contains("@@ -0,0 +1 @@"), "{diff}");
        assert!(diff.ends_with("+x"));
    }

    #[test]
    fn test_multiple_hunks_share_one_header() {
        let old: Vec<String> = (0..30).map(|i| i.to_string()).collect();
        let mut new = old.clone();
        new[2] = "two".to_owned();
        new[25] = "twenty-five".to_owned();
        let diff = unified_diff(&old, &new, 1);
        assert_eq!(diff.matches("--- before").count(), 1);
        assert_eq!(diff.matches("@@ ").count(), 2);
        assert!(diff.contains("@@ -25,3 +25,3 @@"), "{diff}");
        assert!(diff.ends_with(" 26"));
    }

    #[test]
    fn test_stats() {
        let old = v(&["a", "b", "c"]);
        let new = v(&["a", "x", "y", "c"]);
        assert_eq!(
            diff_stats(&old, &new),
            DiffStats {
                added: 2,
                removed: 1
            }
        );
    }

    #[test]
    fn test_inline_diff_marks_changes() {
        assert_eq!(inline_diff("foo=1", "foo=2"), "foo={-1-}{+2+}");
        assert_eq!(inline_diff("abc", "abc"), "abc");
        assert_eq!(inline_diff("", "new"), "{+new+}");
        assert_eq!(inline_diff("gone", ""), "{-gone-}");
    }
}
