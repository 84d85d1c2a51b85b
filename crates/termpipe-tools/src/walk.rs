//! Directory traversal shared by the search tools.

use std::path::Path;

use walkdir::{DirEntry, WalkDir};

/// Bytes inspected when sniffing for binary content.
const BINARY_SNIFF_LEN: usize = 512;

/// Regular files under `root`, skipping hidden entries below it.
pub(crate) fn files_under(root: &Path) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.'))
}

/// A NUL in the first few hundred bytes marks the data as binary.
pub(crate) fn looks_binary(data: &[u8]) -> bool {
    data.iter().take(BINARY_SNIFF_LEN).any(|&b| b == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_hidden_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        std::fs::write(dir.path().join(".git/HEAD"), "ref").unwrap();
        std::fs::write(dir.path().join(".env"), "x").unwrap();
        std::fs::write(dir.path().join("b.txt"), "").unwrap();
        std::fs::write(dir.path().join("a.txt"), "").unwrap();

        let names: Vec<String> = files_under(dir.path())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.txt", "b.txt"]);
    }

    #[test]
    fn test_binary_sniff() {
        assert!(looks_binary(b"PK\0\x03"));
        assert!(!looks_binary(b"plain text"));
    }
}
