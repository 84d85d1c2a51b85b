//! Search file content tool: case-insensitive text search across files.

use std::fmt::Write;
use std::path::Path;

use crate::args::{optional_usize, required_str, required_text};
use crate::engine::{FileLines, find_literal};
use crate::truncate_chars;
use crate::walk::{files_under, looks_binary};
use crate::{BuiltinTool, ToolContext, ToolError, ToolResult, run_blocking};
use serde_json::Value;

/// Hits listed when `max_results` is absent.
const DEFAULT_MAX_RESULTS: usize = 200;

/// Characters of each matching line shown.
const MAX_LINE_CHARS: usize = 100;

/// Built-in tool for searching text across a file or directory tree.
pub struct SearchFileContentTool;

#[async_trait::async_trait]
impl BuiltinTool for SearchFileContentTool {
    fn name(&self) -> &'static str {
        "search_file_content"
    }

    fn description(&self) -> &'static str {
        "Searches a file, or every text file under a directory, for a case-insensitive \
         substring. Prints file:line: content with 0-based line numbers, ready for the \
         line-editing tools. Hidden and binary files are skipped."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "File or directory to search"
                },
                "pattern": {
                    "type": "string",
                    "description": "Text to search for (case-insensitive)"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum matching lines to report (default 200)"
                }
            },
            "required": ["path", "pattern"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> ToolResult {
        let raw_path = required_str(&args, "path")?;
        let pattern = required_text(&args, "pattern")?.to_owned();
        let limit = optional_usize(&args, "max_results")?.unwrap_or(DEFAULT_MAX_RESULTS);

        let root = ctx.resolve_path(raw_path);
        if !tokio::fs::try_exists(&root).await.unwrap_or(false) {
            return Err(ToolError::PathNotFound(raw_path.to_string()));
        }

        let needle = pattern.clone();
        let hits = run_blocking(move || Ok(search_tree(&root, &needle, limit))).await?;

        if hits.is_empty() {
            return Ok(format!("No matches found for: {pattern}"));
        }

        let mut output = format!("Found {} matches for '{pattern}':\n", hits.len());
        for hit in &hits {
            let _ = write!(output, "\n{hit}");
        }
        Ok(output)
    }
}

/// `path:line: content` for each hit, stopping at `limit`.
fn search_tree(root: &Path, pattern: &str, limit: usize) -> Vec<String> {
    let mut hits = Vec::new();
    for entry in files_under(root) {
        let remaining = limit.saturating_sub(hits.len());
        if remaining == 0 {
            break;
        }
        let Ok(data) = std::fs::read(entry.path()) else {
            continue;
        };
        if looks_binary(&data) {
            continue;
        }
        let Ok(content) = String::from_utf8(data) else {
            continue;
        };

        let lines = FileLines::parse(&content);
        for m in find_literal(&lines, pattern, remaining, true) {
            let shown = truncate_chars(m.content.trim(), MAX_LINE_CHARS);
            hits.push(format!("{}:{}: {shown}", entry.path().display(), m.line));
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_search_directory_case_insensitive() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/a.rs"), "fn main() {\n    NOTE: fix\n}").unwrap();
        std::fs::write(dir.path().join("b.md"), "nothing here\nnote list").unwrap();
        std::fs::write(dir.path().join("blob.bin"), b"note\0\0").unwrap();
        let ctx = ToolContext::new(dir.path().to_path_buf());

        let result = SearchFileContentTool
            .execute(serde_json::json!({"path": ".", "pattern": "note"}), &ctx)
            .await
            .unwrap();

        assert!(result.starts_with("Found 2 matches for 'note':"));
        assert!(result.contains("b.md:1: note list"));
        assert!(result.contains("a.rs:1: NOTE: fix"));
        assert!(!result.contains("blob.bin"));
    }

    #[tokio::test]
    async fn test_single_file_and_limit() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("f.txt"), "x\nx\nx\nx").unwrap();
        let ctx = ToolContext::new(dir.path().to_path_buf());

        let result = SearchFileContentTool
            .execute(
                serde_json::json!({"path": "f.txt", "pattern": "X", "max_results": 2}),
                &ctx,
            )
            .await
            .unwrap();

        assert!(result.starts_with("Found 2 matches"));
        assert!(result.contains("f.txt:0: x"));
        assert!(result.contains("f.txt:1: x"));
        assert!(!result.contains("f.txt:2:"));
    }

    #[tokio::test]
    async fn test_no_matches_and_missing_path() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("f.txt"), "alpha").unwrap();
        let ctx = ToolContext::new(dir.path().to_path_buf());

        let none = SearchFileContentTool
            .execute(serde_json::json!({"path": "f.txt", "pattern": "beta"}), &ctx)
            .await
            .unwrap();
        assert_eq!(none, "No matches found for: beta");

        let err = SearchFileContentTool
            .execute(serde_json::json!({"path": "nope", "pattern": "a"}), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::PathNotFound(_)));
    }
}
