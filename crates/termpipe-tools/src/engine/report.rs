//! Plain-text rendering of edit outcomes.

use std::fmt::{self, Display, Formatter};

use super::error::EditFailure;
use super::ops::{EditSuccess, FindReport, LineView};

/// Matching lines shown before the list is summarized.
const MAX_LISTED_MATCHES: usize = 10;

impl Display for EditSuccess {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "✓ {} in {}", self.summary, self.path.display())?;
        if let Some(warning) = &self.warning {
            writeln!(f, "⚠ {warning}")?;
        }
        if let Some(inline) = &self.inline_diff {
            writeln!(f, "Change: {inline}")?;
        }
        if !self.removed.is_empty() {
            writeln!(f, "Removed:")?;
            for line in &self.removed {
                writeln!(f, "  {line}")?;
            }
        }
        if self.diff.is_empty() {
            write!(f, "(no changes)")
        } else {
            write!(f, "```diff\n{}\n```", self.diff)
        }
    }
}

/// Full diagnostic rendering of an [`EditFailure`].
#[derive(Debug, Clone, Copy)]
pub struct FailureReport<'a>(&'a EditFailure);

impl EditFailure {
    /// Everything an agent needs to retry: located content, candidates, hint.
    #[must_use]
    pub fn report(&self) -> FailureReport<'_> {
        FailureReport(self)
    }
}

impl Display for FailureReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let failure = self.0;
        let d = &failure.diagnostics;
        writeln!(f, "✗ {}: {}", failure.kind, failure.message)?;
        write!(f, "File: {}", failure.path.display())?;

        if let Some(searched) = &d.searched_for {
            write!(f, "\nSearched for: {searched:?}")?;
        }
        if let (Some(line), Some(actual)) = (d.line_number, &d.actual_content) {
            write!(f, "\nLine {line} contains: {actual:?}")?;
        }
        if let Some(diff) = &d.inline_diff {
            write!(f, "\nDifference: {diff}")?;
        }

        if !d.exact_matches.is_empty() {
            write!(f, "\nFound on lines:")?;
            for m in d.exact_matches.iter().take(MAX_LISTED_MATCHES) {
                write!(f, "\n  {:>4} | {}", m.line, m.content)?;
            }
            let rest = d.exact_matches.len().saturating_sub(MAX_LISTED_MATCHES);
            if rest > 0 {
                write!(f, "\n  ... and {rest} more")?;
            }
        }

        if !d.suggestions.is_empty() {
            write!(f, "\nSimilar lines:")?;
            for s in &d.suggestions {
                write!(
                    f,
                    "\n  {:>4} | {} ({:.0}% similar)",
                    s.candidate.line,
                    s.candidate.content,
                    s.candidate.score * 100.0
                )?;
                if let Some(diff) = &s.inline_diff {
                    write!(f, "\n         {diff}")?;
                }
            }
        }

        if let Some(expected) = d.expected_line {
            write!(f, "\nExpected line: {expected}")?;
        }
        if let Some(count) = d.line_count {
            write!(f, "\nValid lines: 0..{count}")?;
        }
        if let Some(hint) = &d.hint {
            write!(f, "\nHint: {hint}")?;
        }
        if let Some(explanation) = &d.explanation {
            write!(f, "\n\nAI analysis:\n{explanation}")?;
        }
        Ok(())
    }
}

impl Display for LineView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let end = self.start.saturating_add(self.lines.len());
        write!(
            f,
            "{} (lines {}..{} of {})",
            self.path.display(),
            self.start,
            end,
            self.total
        )?;
        for (i, line) in self.lines.iter().enumerate() {
            write!(f, "\n{:>4} | {line}", self.start.saturating_add(i))?;
        }
        Ok(())
    }
}

impl Display for FindReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.matches.is_empty() {
            write!(
                f,
                "No matches for {:?} in {}",
                self.pattern,
                self.path.display()
            )?;
            if !self.suggestions.is_empty() {
                write!(f, "\nSimilar lines:")?;
                for s in &self.suggestions {
                    write!(
                        f,
                        "\n  {:>4} | {} ({:.0}% similar)",
                        s.line,
                        s.content,
                        s.score * 100.0
                    )?;
                }
            }
            return Ok(());
        }

        write!(
            f,
            "Found {} match(es) for {:?} in {}",
            self.matches.len(),
            self.pattern,
            self.path.display()
        )?;
        if self.truncated {
            write!(f, " (limit reached, more matches exist)")?;
        }

        let with_context = self.matches.iter().any(|m| m.context.len() > 1);
        for (n, m) in self.matches.iter().enumerate() {
            if with_context && n > 0 {
                write!(f, "\n--")?;
            }
            for (i, line) in &m.context {
                let marker = if *i == m.line { '→' } else { ' ' };
                write!(f, "\n{marker} {i:>4} | {line}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::engine::error::{Diagnostics, EditErrorKind};
    use crate::engine::locate::MatchCandidate;
    use crate::engine::ops::{FindMatch, Operation};

    #[test]
    fn test_success_renders_diff_block() {
        let success = EditSuccess {
            operation: Operation::ReplaceAtLine,
            path: PathBuf::from("a.txt"),
            range: 0..1,
            summary: "Replaced text on line 0".to_owned(),
            diff: "--- before\n+++ after\n@@ -1 +1 @@\n-foo=1\n+foo=2".to_owned(),
            inline_diff: Some("foo={-1-}{+2+}".to_owned()),
            lines_added: 1,
            lines_removed: 1,
            removed: Vec::new(),
            warning: Some("Replaced 2 occurrences on line 0".to_owned()),
            written: true,
        };
        let text = success.to_string();
        assert!(text.starts_with("✓ Replaced text on line 0 in a.txt"));
        assert!(text.contains("⚠ Replaced 2 occurrences"));
        assert!(text.contains("Change: foo={-1-}{+2+}"));
        assert!(text.ends_with("+foo=2\n```"));
    }

    #[test]
    fn test_failure_caps_match_list() {
        let exact_matches = (0..13).map(|i| MatchCandidate::exact(i, "dup")).collect();
        let failure = EditFailure::new(EditErrorKind::Ambiguous, Path::new("f"), "Text found on 13 lines")
            .with_diagnostics(Diagnostics {
                searched_for: Some("dup".to_owned()),
                exact_matches,
                hint: Some("Pass expected_line".to_owned()),
                explanation: Some("PROBLEM: many\nFIX: pick one".to_owned()),
                ..Diagnostics::default()
            });

        let text = failure.report().to_string();
        assert!(text.starts_with("✗ ambiguous: Text found on 13 lines"));
        assert!(text.contains("     9 | dup"));
        assert!(!text.contains("    10 | dup"));
        assert!(text.contains("... and 3 more"));
        assert!(text.contains("Hint: Pass expected_line"));
        assert!(text.ends_with("AI analysis:\nPROBLEM: many\nFIX: pick one"));
    }

    #[test]
    fn test_line_view_numbering() {
        let view = LineView {
            path: PathBuf::from("f"),
            start: 8,
            lines: vec!["x".to_owned(), "y".to_owned()],
            total: 20,
        };
        assert_eq!(view.to_string(), "f (lines 8..10 of 20)\n   8 | x\n   9 | y");
    }

    #[test]
    fn test_find_report_marks_hits() {
        let report = FindReport {
            path: PathBuf::from("f"),
            pattern: "b".to_owned(),
            matches: vec![FindMatch {
                line: 1,
                context: vec![(0, "a".to_owned()), (1, "b".to_owned()), (2, "c".to_owned())],
            }],
            truncated: false,
            suggestions: Vec::new(),
            total: 3,
        };
        let text = report.to_string();
        assert!(text.contains("\n→    1 | b"));
        assert!(text.contains("\n     0 | a"));
    }
}
