//! Edit failure taxonomy and diagnostics.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::locate::MatchCandidate;

/// Why an edit could not be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditErrorKind {
    /// The file does not exist.
    NotFound,
    /// A line index is outside `[0, len)`.
    OutOfRange,
    /// `end < start`.
    InvalidRange,
    /// The search text is absent from the addressed line or file.
    TextNotFound,
    /// The search text matches several lines and no hint resolved it.
    Ambiguous,
    /// Reading or writing the file failed.
    IoFailure,
}

impl EditErrorKind {
    /// Stable snake-case identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::OutOfRange => "out_of_range",
            Self::InvalidRange => "invalid_range",
            Self::TextNotFound => "text_not_found",
            Self::Ambiguous => "ambiguous",
            Self::IoFailure => "io_failure",
        }
    }
}

impl std::fmt::Display for EditErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fuzzy suggestion, with a character diff when it is a strong match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    /// The similar line.
    pub candidate: MatchCandidate,
    /// Inline diff from the searched text to this line.
    pub inline_diff: Option<String>,
}

/// Everything a caller needs to retry a failed edit without re-reading the file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    /// The text the edit looked for.
    pub searched_for: Option<String>,
    /// The line the edit addressed.
    pub line_number: Option<usize>,
    /// What that line actually contains.
    pub actual_content: Option<String>,
    /// Inline diff from the searched text to the actual line.
    pub inline_diff: Option<String>,
    /// Lines that contain the searched text exactly.
    pub exact_matches: Vec<MatchCandidate>,
    /// Similar lines, best first.
    pub suggestions: Vec<Suggestion>,
    /// The disambiguation hint the caller passed.
    pub expected_line: Option<i64>,
    /// Number of lines in the file.
    pub line_count: Option<usize>,
    /// Suggested next call.
    pub hint: Option<String>,
    /// Model-written explanation, when an explainer is configured.
    pub explanation: Option<String>,
}

/// A failed edit. The file on disk is untouched.
///
/// `Display` is the one-line summary; [`EditFailure::report`] renders the
/// full diagnostics.
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct EditFailure {
    /// Failure category.
    pub kind: EditErrorKind,
    /// File the edit targeted.
    pub path: PathBuf,
    /// One-line description.
    pub message: String,
    /// Supporting detail.
    pub diagnostics: Diagnostics,
}

impl EditFailure {
    /// Create a failure with empty diagnostics.
    pub fn new(kind: EditErrorKind, path: &Path, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.to_path_buf(),
            message: message.into(),
            diagnostics: Diagnostics::default(),
        }
    }

    /// Attach diagnostics.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Wrap an I/O error.
    #[must_use]
    pub fn io(path: &Path, action: &str, err: &std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            return Self::new(
                EditErrorKind::NotFound,
                path,
                format!("File not found: {}", path.display()),
            );
        }
        Self::new(
            EditErrorKind::IoFailure,
            path,
            format!("Failed to {action} {}: {err}", path.display()),
        )
    }

    /// Line numbers of exact matches, in file order.
    #[must_use]
    pub fn matching_lines(&self) -> Vec<usize> {
        self.diagnostics.exact_matches.iter().map(|m| m.line).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(EditErrorKind::TextNotFound.to_string(), "text_not_found");
        assert_eq!(EditErrorKind::Ambiguous.as_str(), "ambiguous");
    }

    #[test]
    fn test_io_not_found_maps_kind() {
        let err = std::io::Error::from(std::io::ErrorKind::NotFound);
        let failure = EditFailure::io(Path::new("/x/y"), "read", &err);
        assert_eq!(failure.kind, EditErrorKind::NotFound);
    }

    #[test]
    fn test_io_other_maps_kind() {
        let err = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        let failure = EditFailure::io(Path::new("/x/y"), "write", &err);
        assert_eq!(failure.kind, EditErrorKind::IoFailure);
        assert!(failure.message.contains("Failed to write"));
    }

    #[test]
    fn test_display_is_one_line() {
        let failure = EditFailure::new(
            EditErrorKind::OutOfRange,
            Path::new("f"),
            "Line 9 out of range",
        )
        .with_diagnostics(Diagnostics {
            line_count: Some(2),
            ..Diagnostics::default()
        });
        assert_eq!(failure.to_string(), "out_of_range: Line 9 out of range");
        assert!(failure.report().to_string().contains("Valid lines: 0..2"));
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&EditErrorKind::OutOfRange).unwrap();
        assert_eq!(json, "\"out_of_range\"");
    }
}
