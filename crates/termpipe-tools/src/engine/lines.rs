//! In-memory line model and index validation.

use std::ops::Range;
use std::path::Path;

use super::error::{Diagnostics, EditErrorKind, EditFailure};

/// A file's content split on `'\n'`.
///
/// Joining with `'\n'` reproduces the original bytes exactly: a trailing
/// newline shows up as a final empty line, and `'\r'` stays part of the line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileLines {
    lines: Vec<String>,
}

impl FileLines {
    /// Split file content into lines.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        Self {
            lines: split_content(content),
        }
    }

    /// Wrap an existing line vector.
    #[must_use]
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Rejoin into file content.
    #[must_use]
    pub fn join(&self) -> String {
        self.lines.join("\n")
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether there are no lines at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether the content was the empty string, parsed as one empty line.
    #[must_use]
    pub fn is_blank_file(&self) -> bool {
        matches!(self.lines.as_slice(), [only] if only.is_empty())
    }

    /// Line at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// All lines.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }

    /// Iterate `(index, line)` pairs.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines.iter().map(String::as_str).enumerate()
    }

    /// Replace `range` with `replacement`, returning the removed lines.
    ///
    /// `range` must already be clamped to `0..=len`.
    pub fn splice(&mut self, range: Range<usize>, replacement: Vec<String>) -> Vec<String> {
        self.lines.splice(range, replacement).collect()
    }

    /// Overwrite a single line. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, line: String) {
        if let Some(slot) = self.lines.get_mut(index) {
            *slot = line;
        }
    }

    /// Validate that `index` addresses an existing line.
    ///
    /// # Errors
    ///
    /// Returns [`EditErrorKind::OutOfRange`] when `index < 0 || index >= len`.
    pub fn check_index(&self, path: &Path, index: i64) -> Result<usize, EditFailure> {
        usize::try_from(index)
            .ok()
            .filter(|&i| i < self.len())
            .ok_or_else(|| self.out_of_range(path, "Line", index))
    }

    /// Validate a half-open `[start, end)` range and clamp `end` to the file.
    ///
    /// # Errors
    ///
    /// [`EditErrorKind::OutOfRange`] for a bad `start`,
    /// [`EditErrorKind::InvalidRange`] when `end < start`.
    pub fn check_range(
        &self,
        path: &Path,
        start: i64,
        end: i64,
    ) -> Result<Range<usize>, EditFailure> {
        let first = usize::try_from(start)
            .ok()
            .filter(|&i| i < self.len())
            .ok_or_else(|| self.out_of_range(path, "Start line", start))?;

        if end < start {
            return Err(EditFailure::new(
                EditErrorKind::InvalidRange,
                path,
                format!("End line {end} is before start line {start}"),
            )
            .with_diagnostics(Diagnostics {
                line_count: Some(self.len()),
                hint: Some("end_line is exclusive and must be >= start_line".to_owned()),
                ..Diagnostics::default()
            }));
        }

        let last = usize::try_from(end).unwrap_or(usize::MAX).min(self.len());
        Ok(first..last)
    }

    fn out_of_range(&self, path: &Path, what: &str, index: i64) -> EditFailure {
        EditFailure::new(
            EditErrorKind::OutOfRange,
            path,
            format!("{what} {index} out of range (file has {} lines)", self.len()),
        )
        .with_diagnostics(Diagnostics {
            line_number: usize::try_from(index).ok(),
            line_count: Some(self.len()),
            ..Diagnostics::default()
        })
    }
}

/// Split text on `'\n'` only. `""` yields a single empty line.
#[must_use]
pub fn split_content(content: &str) -> Vec<String> {
    content.split('\n').map(str::to_owned).collect()
}
