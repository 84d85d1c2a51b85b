//! Path resolution and whole-file read/write.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{EditErrorKind, EditFailure};
use super::lines::FileLines;

/// Expand a leading `~` to the home directory.
#[must_use]
pub fn expand_tilde(raw: &str) -> PathBuf {
    let home = || directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf());

    if raw == "~" {
        if let Some(home) = home() {
            return home;
        }
    } else if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = home()
    {
        return home.join(rest);
    }
    PathBuf::from(raw)
}

/// Expand `~` and anchor relative paths at `base`.
#[must_use]
pub fn resolve_path(raw: &str, base: &Path) -> PathBuf {
    let expanded = expand_tilde(raw);
    if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    }
}

/// Read a UTF-8 file into lines.
///
/// # Errors
///
/// `NotFound` when the file is missing, `IoFailure` for anything else
/// including invalid UTF-8.
pub fn read_lines(path: &Path) -> Result<FileLines, EditFailure> {
    let content = std::fs::read_to_string(path).map_err(|e| EditFailure::io(path, "read", &e))?;
    Ok(FileLines::parse(&content))
}

/// Replace the file's content with `lines` joined by `'\n'`.
///
/// The write goes through a temporary file in the same directory so a
/// failure never leaves a partially written target. Existing permissions are
/// kept and missing parent directories are created.
///
/// # Errors
///
/// `IoFailure` if any step fails.
pub fn write_lines(path: &Path, lines: &FileLines) -> Result<(), EditFailure> {
    write_content(path, &lines.join())
}

/// Atomically write raw content. See [`write_lines`].
///
/// # Errors
///
/// `IoFailure` if any step fails.
pub fn write_content(path: &Path, content: &str) -> Result<(), EditFailure> {
    let fail = |e: &std::io::Error| {
        EditFailure::new(
            EditErrorKind::IoFailure,
            path,
            format!("Failed to write {}: {e}", path.display()),
        )
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent).map_err(|e| fail(&e))?;

    let existing = std::fs::metadata(path).ok().map(|m| m.permissions());

    let mut tmp = tempfile::NamedTempFile::new_in(&parent).map_err(|e| fail(&e))?;
    tmp.write_all(content.as_bytes()).map_err(|e| fail(&e))?;
    tmp.as_file().sync_all().map_err(|e| fail(&e))?;
    if let Some(perms) = existing {
        tmp.as_file().set_permissions(perms).map_err(|e| fail(&e))?;
    }
    tmp.persist(path).map_err(|e| fail(&e.error))?;

    debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}
