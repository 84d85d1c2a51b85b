//! Line-addressed edit operations.
//!
//! Every mutation follows the same shape: read the file fresh, validate the
//! addressing, locate the target text, apply the change in memory, then write
//! the whole file back. Any failure before the write leaves the file as it was.

use std::ops::Range;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use super::diff::{diff_stats, inline_diff, unified_diff};
use super::error::{Diagnostics, EditErrorKind, EditFailure, Suggestion};
use super::fuzzy::{FuzzyConfig, find_similar, similarity};
use super::lines::{FileLines, split_content};
use super::locate::{MatchCandidate, count_occurrences, find_literal};
use super::storage;

/// Exact matches listed when the text turns up on other lines.
const ELSEWHERE_LIMIT: usize = 5;

/// Minimum similarity before an inline diff against the addressed line is
/// worth showing.
const INLINE_DIFF_MIN_SIMILARITY: f64 = 0.3;

/// The kind of mutation that produced an [`EditSuccess`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// `insert_lines`
    Insert,
    /// `delete_lines`
    Delete,
    /// `replace_lines`
    ReplaceLines,
    /// `replace_at_line`
    ReplaceAtLine,
    /// `smart_replace`
    SmartReplace,
}

impl Operation {
    /// Tool name for this operation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert_lines",
            Self::Delete => "delete_lines",
            Self::ReplaceLines => "replace_lines",
            Self::ReplaceAtLine => "replace_at_line",
            Self::SmartReplace => "smart_replace",
        }
    }
}

/// A mutation that was applied (or was a no-op).
#[derive(Debug, Clone, Serialize)]
pub struct EditSuccess {
    /// Which operation ran.
    pub operation: Operation,
    /// File that was edited.
    pub path: PathBuf,
    /// Affected lines in the original file, half-open.
    pub range: Range<usize>,
    /// One-line description.
    pub summary: String,
    /// Unified diff of the change; empty when nothing changed.
    pub diff: String,
    /// Character diff for single-line replacements.
    pub inline_diff: Option<String>,
    /// Lines present only after the edit.
    pub lines_added: usize,
    /// Lines present only before the edit.
    pub lines_removed: usize,
    /// Content removed by `delete_lines`.
    pub removed: Vec<String>,
    /// Set when more than one occurrence was replaced or an index was clamped.
    pub warning: Option<String>,
    /// Whether the file was rewritten.
    pub written: bool,
}

/// Numbered slice of a file.
#[derive(Debug, Clone, Serialize)]
pub struct LineView {
    /// File that was read.
    pub path: PathBuf,
    /// Index of the first line in `lines`.
    pub start: usize,
    /// The requested lines.
    pub lines: Vec<String>,
    /// Total lines in the file.
    pub total: usize,
}

/// One search hit with its surrounding lines.
#[derive(Debug, Clone, Serialize)]
pub struct FindMatch {
    /// Index of the matching line.
    pub line: usize,
    /// `(index, content)` for the match and its context, in file order.
    pub context: Vec<(usize, String)>,
}

/// Result of `find_in_file`.
#[derive(Debug, Clone, Serialize)]
pub struct FindReport {
    /// File that was searched.
    pub path: PathBuf,
    /// The search text.
    pub pattern: String,
    /// Hits in file order.
    pub matches: Vec<FindMatch>,
    /// More hits exist beyond `max_matches`.
    pub truncated: bool,
    /// Similar lines, filled only when nothing matched.
    pub suggestions: Vec<MatchCandidate>,
    /// Total lines in the file.
    pub total: usize,
}

/// Runs edit operations with shared matching and diff settings.
#[derive(Debug, Clone)]
pub struct LineEditor {
    /// Fuzzy matcher settings.
    pub fuzzy: FuzzyConfig,
    /// Score at which a suggestion also gets a character diff.
    pub strong_match: f64,
    /// Context lines in unified diffs.
    pub diff_context: usize,
    /// Default hit cap for `find_in_file`.
    pub find_max_matches: usize,
}

impl Default for LineEditor {
    fn default() -> Self {
        Self {
            fuzzy: FuzzyConfig::default(),
            strong_match: 0.7,
            diff_context: 3,
            find_max_matches: 50,
        }
    }
}

impl LineEditor {
    /// Read `[start, end)` as a numbered view. `end` defaults to `start + 1`.
    ///
    /// # Errors
    ///
    /// `NotFound`, `OutOfRange`, `InvalidRange`, or `IoFailure`.
    pub fn read_lines(
        &self,
        path: &Path,
        start: i64,
        end: Option<i64>,
    ) -> Result<LineView, EditFailure> {
        let lines = storage::read_lines(path)?;
        let end = end.unwrap_or_else(|| start.saturating_add(1));
        let range = lines.check_range(path, start, end)?;

        Ok(LineView {
            path: path.to_path_buf(),
            start: range.start,
            lines: lines.as_slice()[range].to_vec(),
            total: lines.len(),
        })
    }

    /// Insert `content` before line `index`.
    ///
    /// The index is clamped into `[0, len]`, so this only fails on I/O.
    /// An empty file has no lines: the content replaces it outright.
    ///
    /// # Errors
    ///
    /// `NotFound` or `IoFailure`.
    pub fn insert_lines(
        &self,
        path: &Path,
        index: i64,
        content: &str,
    ) -> Result<EditSuccess, EditFailure> {
        let before = storage::read_lines(path)?;
        let blank = before.is_blank_file();
        let len = if blank { 0 } else { before.len() };
        let at = usize::try_from(index.max(0)).unwrap_or(usize::MAX).min(len);

        let warning = (usize::try_from(index).ok() != Some(at))
            .then(|| format!("Line {index} is outside 0..={len}; inserted at {at}"));

        let new_lines = split_content(content);
        let count = new_lines.len();
        let mut after = before.clone();
        let replaced = if blank { 0..1 } else { at..at };
        after.splice(replaced, new_lines);

        let summary = format!("Inserted {count} line(s) at line {at}");
        let mut success = self.commit(Operation::Insert, path, &before, &after, at..at, summary)?;
        success.warning = warning;
        Ok(success)
    }

    /// Remove lines `[start, end)`; `end` is clamped to the file length.
    ///
    /// # Errors
    ///
    /// `NotFound`, `OutOfRange`, `InvalidRange`, or `IoFailure`.
    pub fn delete_lines(
        &self,
        path: &Path,
        start: i64,
        end: i64,
    ) -> Result<EditSuccess, EditFailure> {
        let before = storage::read_lines(path)?;
        let range = before.check_range(path, start, end)?;

        let mut after = before.clone();
        let removed = after.splice(range.clone(), Vec::new());

        let summary = if removed.is_empty() {
            format!("No lines deleted (empty range {}..{})", range.start, range.end)
        } else {
            format!("Deleted {} line(s) [{}, {})", removed.len(), range.start, range.end)
        };
        let mut success = self.commit(Operation::Delete, path, &before, &after, range, summary)?;
        success.removed = removed;
        Ok(success)
    }

    /// Replace lines `[start, end)` with `content`.
    ///
    /// # Errors
    ///
    /// `NotFound`, `OutOfRange`, `InvalidRange`, or `IoFailure`.
    pub fn replace_lines(
        &self,
        path: &Path,
        start: i64,
        end: i64,
        content: &str,
    ) -> Result<EditSuccess, EditFailure> {
        let before = storage::read_lines(path)?;
        let range = before.check_range(path, start, end)?;

        let new_lines = split_content(content);
        let count = new_lines.len();
        let mut after = before.clone();
        let removed = after.splice(range.clone(), new_lines);

        let summary = format!(
            "Replaced {} line(s) [{}, {}) with {count} line(s)",
            removed.len(),
            range.start,
            range.end
        );
        self.commit(Operation::ReplaceLines, path, &before, &after, range, summary)
    }

    /// Replace every occurrence of `old_text` on line `index`.
    ///
    /// # Errors
    ///
    /// `TextNotFound` when the line does not contain `old_text`, plus the
    /// addressing and I/O failures.
    pub fn replace_at_line(
        &self,
        path: &Path,
        index: i64,
        old_text: &str,
        new_text: &str,
    ) -> Result<EditSuccess, EditFailure> {
        let before = storage::read_lines(path)?;
        if old_text.is_empty() {
            return Err(empty_search(path));
        }
        let line_no = before.check_index(path, index)?;
        let line = before.get(line_no).unwrap_or_default();

        if count_occurrences(line, old_text) == 0 {
            return Err(self.not_on_line(path, &before, line_no, old_text));
        }

        self.apply_on_line(Operation::ReplaceAtLine, path, &before, line_no, old_text, new_text)
    }

    /// Find `old_text` anywhere and replace it on the one line it identifies.
    ///
    /// `expected_line` picks among several matching lines and must name one
    /// of them.
    ///
    /// # Errors
    ///
    /// `TextNotFound` when nothing matches or `expected_line` misses,
    /// `Ambiguous` when several lines match and no hint was given.
    pub fn smart_replace(
        &self,
        path: &Path,
        old_text: &str,
        new_text: &str,
        expected_line: Option<i64>,
    ) -> Result<EditSuccess, EditFailure> {
        let before = storage::read_lines(path)?;
        if old_text.is_empty() {
            return Err(empty_search(path));
        }
        let matches = find_literal(&before, old_text, usize::MAX, false);

        if matches.is_empty() {
            let suggestions = self.suggestions(&before, old_text);
            let hint = suggestions.first().map_or_else(
                || "Use find_in_file with a shorter fragment to locate the text".to_owned(),
                |s| {
                    format!(
                        "Closest line is {}; copy its exact text into old_text",
                        s.candidate.line
                    )
                },
            );
            return Err(EditFailure::new(
                EditErrorKind::TextNotFound,
                path,
                "Text not found in file",
            )
            .with_diagnostics(Diagnostics {
                searched_for: Some(old_text.to_owned()),
                suggestions,
                expected_line,
                line_count: Some(before.len()),
                hint: Some(hint),
                ..Diagnostics::default()
            }));
        }

        let lines_list = join_lines(&matches);
        let target = match expected_line {
            Some(expected) => {
                let hit = usize::try_from(expected)
                    .ok()
                    .filter(|&e| matches.iter().any(|m| m.line == e));
                let Some(line_no) = hit else {
                    return Err(EditFailure::new(
                        EditErrorKind::TextNotFound,
                        path,
                        format!("Text not found on expected line {expected}"),
                    )
                    .with_diagnostics(Diagnostics {
                        searched_for: Some(old_text.to_owned()),
                        exact_matches: matches,
                        expected_line: Some(expected),
                        line_count: Some(before.len()),
                        hint: Some(format!(
                            "Text appears on line(s) {lines_list}; pass one as expected_line"
                        )),
                        ..Diagnostics::default()
                    }));
                };
                line_no
            },
            None if matches.len() == 1 => matches[0].line,
            None => {
                return Err(EditFailure::new(
                    EditErrorKind::Ambiguous,
                    path,
                    format!("Text found on {} lines", matches.len()),
                )
                .with_diagnostics(Diagnostics {
                    searched_for: Some(old_text.to_owned()),
                    exact_matches: matches,
                    line_count: Some(before.len()),
                    hint: Some(format!(
                        "Pass expected_line (one of {lines_list}) or use replace_at_line"
                    )),
                    ..Diagnostics::default()
                }));
            },
        };

        self.apply_on_line(Operation::SmartReplace, path, &before, target, old_text, new_text)
    }

    /// Case-insensitive search with optional context lines.
    ///
    /// `max_matches` defaults to the editor's configured cap. When nothing
    /// matches, the report carries fuzzy suggestions instead.
    ///
    /// # Errors
    ///
    /// `NotFound` or `IoFailure`.
    pub fn find_in_file(
        &self,
        path: &Path,
        pattern: &str,
        max_matches: Option<usize>,
        context: usize,
    ) -> Result<FindReport, EditFailure> {
        let lines = storage::read_lines(path)?;
        let cap = max_matches.unwrap_or(self.find_max_matches);

        let mut hits = find_literal(&lines, pattern, cap.saturating_add(1), true);
        let truncated = hits.len() > cap;
        hits.truncate(cap);

        let last = lines.len().saturating_sub(1);
        let matches = hits
            .iter()
            .map(|hit| {
                let from = hit.line.saturating_sub(context);
                let to = hit.line.saturating_add(context).min(last);
                FindMatch {
                    line: hit.line,
                    context: (from..=to)
                        .filter_map(|i| lines.get(i).map(|l| (i, l.to_owned())))
                        .collect(),
                }
            })
            .collect::<Vec<_>>();

        let suggestions = if matches.is_empty() {
            find_similar(&lines, pattern, &self.fuzzy)
        } else {
            Vec::new()
        };

        debug!(
            path = %path.display(),
            matches = matches.len(),
            truncated,
            "searched file"
        );

        Ok(FindReport {
            path: path.to_path_buf(),
            pattern: pattern.to_owned(),
            matches,
            truncated,
            suggestions,
            total: lines.len(),
        })
    }

    /// Replace all occurrences of `old_text` on `line_no` and commit.
    fn apply_on_line(
        &self,
        operation: Operation,
        path: &Path,
        before: &FileLines,
        line_no: usize,
        old_text: &str,
        new_text: &str,
    ) -> Result<EditSuccess, EditFailure> {
        let line = before.get(line_no).unwrap_or_default();
        let occurrences = count_occurrences(line, old_text);
        let replaced = line.replace(old_text, new_text);
        let char_diff = inline_diff(line, &replaced);

        let mut after = before.clone();
        after.set(line_no, replaced);

        let summary = format!("Replaced text on line {line_no}");
        let range = line_no..line_no.saturating_add(1);
        let mut success = self.commit(operation, path, before, &after, range, summary)?;
        success.inline_diff = Some(char_diff);
        if occurrences > 1 {
            success.warning = Some(format!(
                "Replaced {occurrences} occurrences on line {line_no}"
            ));
        }
        Ok(success)
    }

    /// Build the success record and write the file if anything changed.
    fn commit(
        &self,
        operation: Operation,
        path: &Path,
        before: &FileLines,
        after: &FileLines,
        range: Range<usize>,
        summary: String,
    ) -> Result<EditSuccess, EditFailure> {
        let changed = before != after;
        if changed {
            storage::write_lines(path, after)?;
            info!(
                op = operation.as_str(),
                path = %path.display(),
                start = range.start,
                end = range.end,
                "edit applied"
            );
        } else {
            debug!(op = operation.as_str(), path = %path.display(), "edit was a no-op");
        }

        let stats = diff_stats(before.as_slice(), after.as_slice());
        Ok(EditSuccess {
            operation,
            path: path.to_path_buf(),
            range,
            summary,
            diff: unified_diff(before.as_slice(), after.as_slice(), self.diff_context),
            inline_diff: None,
            lines_added: stats.added,
            lines_removed: stats.removed,
            removed: Vec::new(),
            warning: None,
            written: changed,
        })
    }

    /// Diagnostics for text that is absent from the addressed line.
    fn not_on_line(
        &self,
        path: &Path,
        lines: &FileLines,
        line_no: usize,
        old_text: &str,
    ) -> EditFailure {
        let actual = lines.get(line_no).unwrap_or_default();
        let trimmed = actual.trim();
        let char_diff = (!trimmed.is_empty()
            && similarity(old_text.trim(), trimmed) >= INLINE_DIFF_MIN_SIMILARITY)
            .then(|| inline_diff(old_text.trim(), trimmed));

        let elsewhere = find_literal(lines, old_text, ELSEWHERE_LIMIT, false);
        let suggestions = self.suggestions(lines, old_text);

        let hint = match elsewhere.first() {
            Some(first) => format!(
                "Text exists on line {}; retry with line_number={} or use smart_replace",
                first.line, first.line
            ),
            None => format!(
                "Use read_lines around line {line_no} or find_in_file to locate the text"
            ),
        };

        EditFailure::new(
            EditErrorKind::TextNotFound,
            path,
            format!("Text not found on line {line_no}"),
        )
        .with_diagnostics(Diagnostics {
            searched_for: Some(old_text.to_owned()),
            line_number: Some(line_no),
            actual_content: Some(actual.to_owned()),
            inline_diff: char_diff,
            exact_matches: elsewhere,
            suggestions,
            line_count: Some(lines.len()),
            hint: Some(hint),
            ..Diagnostics::default()
        })
    }

    /// Fuzzy candidates, with a character diff for the strong ones.
    fn suggestions(&self, lines: &FileLines, target: &str) -> Vec<Suggestion> {
        find_similar(lines, target, &self.fuzzy)
            .into_iter()
            .map(|candidate| {
                let inline_diff = (candidate.score >= self.strong_match)
                    .then(|| inline_diff(target.trim(), candidate.content.trim()));
                Suggestion {
                    candidate,
                    inline_diff,
                }
            })
            .collect()
    }
}

fn empty_search(path: &Path) -> EditFailure {
    EditFailure::new(EditErrorKind::TextNotFound, path, "Search text is empty")
}

fn join_lines(matches: &[MatchCandidate]) -> String {
    matches
        .iter()
        .map(|m| m.line.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.txt");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    fn read(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_read_lines_view() {
        let (_dir, path) = setup("a\nb\nc\nd");
        let editor = LineEditor::default();

        let view = editor.read_lines(&path, 1, Some(3)).unwrap();
        assert_eq!(view.start, 1);
        assert_eq!(view.lines, vec!["b", "c"]);
        assert_eq!(view.total, 4);

        let single = editor.read_lines(&path, 3, None).unwrap();
        assert_eq!(single.lines, vec!["d"]);

        let clamped = editor.read_lines(&path, 2, Some(100)).unwrap();
        assert_eq!(clamped.lines, vec!["c", "d"]);
    }

    #[test]
    fn test_insert_clamps() {
        let (_dir, path) = setup("a\nb");
        let editor = LineEditor::default();

        let success = editor.insert_lines(&path, 99, "z").unwrap();
        assert_eq!(read(&path), "a\nb\nz");
        assert!(success.warning.is_some());

        let success = editor.insert_lines(&path, -5, "first").unwrap();
        assert_eq!(read(&path), "first\na\nb\nz");
        assert_eq!(success.range, 0..0);
        assert_eq!(success.lines_added, 1);
    }

    #[test]
    fn test_insert_at_len_appends_without_warning() {
        let (_dir, path) = setup("a\nb");
        let success = LineEditor::default().insert_lines(&path, 2, "c\nd").unwrap();
        assert_eq!(read(&path), "a\nb\nc\nd");
        assert!(success.warning.is_none());
        assert!(success.diff.contains("+c"));
    }

    #[test]
    fn test_insert_into_empty_file_replaces_it() {
        let (_dir, path) = setup("");
        let success = LineEditor::default().insert_lines(&path, 3, "x\ny").unwrap();
        assert_eq!(read(&path), "x\ny");
        assert_eq!(success.range, 0..0);
        assert!(success.warning.is_some());
    }

    #[test]
    fn test_delete_returns_removed() {
        let (_dir, path) = setup("a\nb\nc\nd");
        let success = LineEditor::default().delete_lines(&path, 1, 3).unwrap();
        assert_eq!(success.removed, vec!["b", "c"]);
        assert_eq!(success.lines_removed, 2);
        assert_eq!(read(&path), "a\nd");
    }

    #[test]
    fn test_delete_empty_range_is_noop() {
        let (_dir, path) = setup("a\nb");
        let success = LineEditor::default().delete_lines(&path, 1, 1).unwrap();
        assert!(!success.written);
        assert!(success.diff.is_empty());
        assert_eq!(read(&path), "a\nb");
    }

    #[test]
    fn test_delete_invalid_range_untouched() {
        let (_dir, path) = setup("a\nb\nc");
        let err = LineEditor::default().delete_lines(&path, 2, 1).unwrap_err();
        assert_eq!(err.kind, EditErrorKind::InvalidRange);
        assert_eq!(read(&path), "a\nb\nc");
    }

    #[test]
    fn test_replace_lines_scenario() {
        let (_dir, path) = setup("a\nb\nc");
        let success = LineEditor::default()
            .replace_lines(&path, 1, 2, "x\ny")
            .unwrap();
        assert_eq!(read(&path), "a\nx\ny\nc");
        assert_eq!(success.lines_added, 2);
        assert_eq!(success.lines_removed, 1);
        assert!(success.diff.starts_with("--- before\n+++ after\n@@"));
    }

    #[test]
    fn test_replace_lines_out_of_range() {
        let (_dir, path) = setup("a");
        let err = LineEditor::default()
            .replace_lines(&path, 1, 2, "x")
            .unwrap_err();
        assert_eq!(err.kind, EditErrorKind::OutOfRange);
        assert_eq!(err.diagnostics.line_count, Some(1));
    }

    #[test]
    fn test_replace_at_line_inline_diff() {
        let (_dir, path) = setup("foo=1");
        let success = LineEditor::default()
            .replace_at_line(&path, 0, "1", "2")
            .unwrap();
        assert_eq!(read(&path), "foo=2");
        assert_eq!(success.inline_diff.as_deref(), Some("foo={-1-}{+2+}"));
        assert!(success.warning.is_none());
    }

    #[test]
    fn test_replace_at_line_multiple_occurrences_warns() {
        let (_dir, path) = setup("x = x + 1");
        let success = LineEditor::default()
            .replace_at_line(&path, 0, "x", "y")
            .unwrap();
        assert_eq!(read(&path), "y = y + 1");
        assert!(success.warning.unwrap().contains("2 occurrences"));
    }

    #[test]
    fn test_replace_at_line_absent_reports_elsewhere() {
        let (_dir, path) = setup("let a = 1;\nlet b = 2;\nlet c = 3;");
        let err = LineEditor::default()
            .replace_at_line(&path, 0, "let b = 2;", "let b = 5;")
            .unwrap_err();

        assert_eq!(err.kind, EditErrorKind::TextNotFound);
        assert_eq!(err.matching_lines(), vec![1]);
        assert_eq!(err.diagnostics.actual_content.as_deref(), Some("let a = 1;"));
        assert!(err.diagnostics.inline_diff.is_some());
        assert!(err.diagnostics.hint.unwrap().contains("line_number=1"));
        assert_eq!(read(&path), "let a = 1;\nlet b = 2;\nlet c = 3;");
    }

    #[test]
    fn test_replace_at_line_blank_line_no_inline_diff() {
        let (_dir, path) = setup("\nvalue");
        let err = LineEditor::default()
            .replace_at_line(&path, 0, "value", "v")
            .unwrap_err();
        assert!(err.diagnostics.inline_diff.is_none());
    }

    #[test]
    fn test_smart_replace_unique() {
        let (_dir, path) = setup("one\ntwo\nthree");
        let success = LineEditor::default()
            .smart_replace(&path, "two", "2", None)
            .unwrap();
        assert_eq!(success.range, 1..2);
        assert_eq!(read(&path), "one\n2\nthree");
    }

    #[test]
    fn test_smart_replace_ambiguous() {
        let (_dir, path) = setup("dup\ndup");
        let err = LineEditor::default()
            .smart_replace(&path, "dup", "x", None)
            .unwrap_err();
        assert_eq!(err.kind, EditErrorKind::Ambiguous);
        assert_eq!(err.matching_lines(), vec![0, 1]);
        assert_eq!(read(&path), "dup\ndup");
    }

    #[test]
    fn test_smart_replace_expected_line_narrows() {
        let (_dir, path) = setup("dup\ndup\ndup");
        LineEditor::default()
            .smart_replace(&path, "dup", "x", Some(2))
            .unwrap();
        assert_eq!(read(&path), "dup\ndup\nx");
    }

    #[test]
    fn test_smart_replace_expected_line_miss() {
        let (_dir, path) = setup("dup\nother\ndup");
        let err = LineEditor::default()
            .smart_replace(&path, "dup", "x", Some(1))
            .unwrap_err();
        assert_eq!(err.kind, EditErrorKind::TextNotFound);
        assert_eq!(err.matching_lines(), vec![0, 2]);
        assert_eq!(err.diagnostics.expected_line, Some(1));

        // a unique match does not excuse a wrong hint either
        let (_dir, path) = setup("only\nother");
        let err = LineEditor::default()
            .smart_replace(&path, "only", "x", Some(1))
            .unwrap_err();
        assert_eq!(err.kind, EditErrorKind::TextNotFound);
        assert_eq!(read(&path), "only\nother");
    }

    #[test]
    fn test_smart_replace_not_found_suggests() {
        let (_dir, path) = setup("fn compute_total() {}\nfn other() {}");
        let err = LineEditor::default()
            .smart_replace(&path, "fn compute_totl() {}", "x", None)
            .unwrap_err();
        assert_eq!(err.kind, EditErrorKind::TextNotFound);
        let first = &err.diagnostics.suggestions[0];
        assert_eq!(first.candidate.line, 0);
        assert!(first.inline_diff.is_some());
    }

    #[test]
    fn test_empty_search_text_rejected() {
        let (_dir, path) = setup("abc");
        let editor = LineEditor::default();
        assert!(editor.smart_replace(&path, "", "x", None).is_err());
        assert!(editor.replace_at_line(&path, 0, "", "x").is_err());
        assert_eq!(read(&path), "abc");
    }

    #[test]
    fn test_find_in_file_context_and_cap() {
        let (_dir, path) = setup("alpha\nBeta\ngamma\nbeta\ndelta");
        let editor = LineEditor::default();

        let report = editor.find_in_file(&path, "beta", None, 1).unwrap();
        assert_eq!(report.matches.len(), 2);
        assert!(!report.truncated);
        let lines: Vec<usize> = report.matches[0].context.iter().map(|(i, _)| *i).collect();
        assert_eq!(lines, vec![0, 1, 2]);
        let lines: Vec<usize> = report.matches[1].context.iter().map(|(i, _)| *i).collect();
        assert_eq!(lines, vec![2, 3, 4]);

        let capped = editor.find_in_file(&path, "beta", Some(1), 0).unwrap();
        assert_eq!(capped.matches.len(), 1);
        assert!(capped.truncated);
    }

    #[test]
    fn test_find_in_file_falls_back_to_fuzzy() {
        let (_dir, path) = setup("hello world\nunrelated");
        let report = LineEditor::default()
            .find_in_file(&path, "helo wrld", None, 0)
            .unwrap();
        assert!(report.matches.is_empty());
        assert_eq!(report.suggestions[0].line, 0);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = LineEditor::default()
            .insert_lines(&dir.path().join("missing"), 0, "x")
            .unwrap_err();
        assert_eq!(err.kind, EditErrorKind::NotFound);
    }
}
