//! Glob files tool: find files by glob pattern.

use std::fmt::Write;
use std::path::PathBuf;

use crate::args::{optional_usize, required_text};
use crate::walk::files_under;
use crate::{BuiltinTool, ToolContext, ToolError, ToolResult, run_blocking};
use serde_json::Value;

/// Results listed when `max_results` is absent.
const DEFAULT_MAX_RESULTS: usize = 100;

/// Built-in tool for finding files by glob pattern.
pub struct GlobFilesTool;

#[async_trait::async_trait]
impl BuiltinTool for GlobFilesTool {
    fn name(&self) -> &'static str {
        "glob_files"
    }

    fn description(&self) -> &'static str {
        "Finds files whose path, relative to the search directory, matches a glob \
         (e.g. \"*.py\", \"**/*.json\"). Hidden files and directories are skipped. \
         Results are sorted by path and capped at max_results (default 100)."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "pattern": {
                    "type": "string",
                    "description": "Glob pattern to match"
                },
                "path": {
                    "type": "string",
                    "description": "Directory to search (defaults to the workspace root)"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum paths to list (default 100)"
                }
            },
            "required": ["pattern"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> ToolResult {
        let pattern = required_text(&args, "pattern")?.to_owned();
        let limit = optional_usize(&args, "max_results")?.unwrap_or(DEFAULT_MAX_RESULTS);
        let root = args
            .get("path")
            .and_then(Value::as_str)
            .map_or_else(|| ctx.workspace_root.clone(), |p| ctx.resolve_path(p));

        let matcher = globset::GlobBuilder::new(&pattern)
            .literal_separator(false)
            .build()
            .map_err(|e| ToolError::InvalidArguments(format!("Invalid glob pattern: {e}")))?
            .compile_matcher();

        if !tokio::fs::try_exists(&root).await.unwrap_or(false) {
            return Err(ToolError::PathNotFound(root.display().to_string()));
        }

        let (matches, truncated) = run_blocking(move || {
            let mut found: Vec<PathBuf> = Vec::new();
            let mut truncated = false;
            for entry in files_under(&root) {
                let rel = entry.path().strip_prefix(&root).unwrap_or(entry.path());
                if !matcher.is_match(rel) {
                    continue;
                }
                if found.len() >= limit {
                    truncated = true;
                    break;
                }
                found.push(entry.into_path());
            }
            Ok((found, truncated))
        })
        .await?;

        if matches.is_empty() {
            return Ok(format!("No files matching '{pattern}'"));
        }

        let mut output = format!("Found {} files matching '{pattern}':", matches.len());
        for path in &matches {
            let _ = write!(output, "\n  {}", path.display());
        }
        if truncated {
            let _ = write!(output, "\n  ... (limited to {limit} results)");
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("src/sub")).unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        std::fs::write(dir.path().join("src/main.rs"), "").unwrap();
        std::fs::write(dir.path().join("src/sub/lib.rs"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        std::fs::write(dir.path().join(".git/hook.rs"), "").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_recursive_glob_skips_hidden() {
        let dir = tree();
        let ctx = ToolContext::new(dir.path().to_path_buf());

        let result = GlobFilesTool
            .execute(serde_json::json!({"pattern": "**/*.rs"}), &ctx)
            .await
            .unwrap();

        assert!(result.starts_with("Found 2 files matching '**/*.rs':"));
        assert!(result.contains("main.rs"));
        assert!(result.contains("lib.rs"));
        assert!(!result.contains("hook.rs"));
        assert!(!result.contains("notes.txt"));
    }

    #[tokio::test]
    async fn test_limit_and_subdirectory() {
        let dir = tree();
        let ctx = ToolContext::new(dir.path().to_path_buf());

        let result = GlobFilesTool
            .execute(
                serde_json::json!({"pattern": "*", "path": "src", "max_results": 1}),
                &ctx,
            )
            .await
            .unwrap();

        assert!(result.starts_with("Found 1 files"));
        assert!(result.ends_with("(limited to 1 results)"));
    }

    #[tokio::test]
    async fn test_no_match_and_bad_pattern() {
        let dir = tree();
        let ctx = ToolContext::new(dir.path().to_path_buf());

        let none = GlobFilesTool
            .execute(serde_json::json!({"pattern": "*.py"}), &ctx)
            .await
            .unwrap();
        assert_eq!(none, "No files matching '*.py'");

        let bad = GlobFilesTool
            .execute(serde_json::json!({"pattern": "[oops"}), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(bad, ToolError::InvalidArguments(_)));
    }
}
