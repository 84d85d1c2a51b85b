//! Find in file tool: case-insensitive search with line numbers.

use crate::args::{optional_usize, required_str, required_text};
use crate::{BuiltinTool, ToolContext, ToolResult};
use serde_json::Value;

/// Built-in tool for locating text in a file.
pub struct FindInFileTool;

#[async_trait::async_trait]
impl BuiltinTool for FindInFileTool {
    fn name(&self) -> &'static str {
        "find_in_file"
    }

    fn description(&self) -> &'static str {
        "Searches a file for pattern (case-insensitive substring) and returns matching lines \
         with 0-based line numbers, optionally with surrounding context lines. When nothing \
         matches, similar lines are suggested. Read-only."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "File path (absolute, relative to the workspace, or ~/...)"
                },
                "pattern": {
                    "type": "string",
                    "description": "Text to search for"
                },
                "max_matches": {
                    "type": "integer",
                    "description": "Maximum matches to return (default: 50)"
                },
                "context": {
                    "type": "integer",
                    "description": "Lines of context around each match (default: 0)"
                }
            },
            "required": ["path", "pattern"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> ToolResult {
        let path = ctx.resolve_path(required_str(&args, "path")?);
        let pattern = required_text(&args, "pattern")?.to_owned();
        let max_matches = optional_usize(&args, "max_matches")?;
        let context = optional_usize(&args, "context")?.unwrap_or(0);

        let report = ctx
            .edit(move |editor| editor.find_in_file(&path, &pattern, max_matches, context))
            .await?;
        Ok(report.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToolError;
    use tempfile::TempDir;

    fn setup(content: &str) -> (TempDir, ToolContext) {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("f.txt"), content).unwrap();
        let ctx = ToolContext::new(dir.path().to_path_buf());
        (dir, ctx)
    }

    #[tokio::test]
    async fn test_find_case_insensitive() {
        let (_dir, ctx) = setup("fn Main() {}\nfn helper() {}\nmain();");
        let output = FindInFileTool
            .execute(serde_json::json!({"path": "f.txt", "pattern": "main"}), &ctx)
            .await
            .unwrap();

        assert!(output.starts_with("Found 2 match(es)"));
        assert!(output.contains("→    0 | fn Main() {}"));
        assert!(output.contains("→    2 | main();"));
    }

    #[tokio::test]
    async fn test_find_with_context() {
        let (_dir, ctx) = setup("a\nb\nTARGET\nc\nd");
        let output = FindInFileTool
            .execute(
                serde_json::json!({"path": "f.txt", "pattern": "target", "context": 1}),
                &ctx,
            )
            .await
            .unwrap();

        assert!(output.contains("\n     1 | b\n→    2 | TARGET\n     3 | c"));
        assert!(!output.contains("| a"));
    }

    #[tokio::test]
    async fn test_find_no_match_suggests() {
        let (_dir, ctx) = setup("calculate_total(items)\nother");
        let output = FindInFileTool
            .execute(
                serde_json::json!({"path": "f.txt", "pattern": "calculate_totl(items)"}),
                &ctx,
            )
            .await
            .unwrap();

        assert!(output.starts_with("No matches"));
        assert!(output.contains("Similar lines:"));
        assert!(output.contains("calculate_total(items)"));
    }

    #[tokio::test]
    async fn test_find_empty_pattern_rejected() {
        let (_dir, ctx) = setup("abc");
        let err = FindInFileTool
            .execute(serde_json::json!({"path": "f.txt", "pattern": ""}), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
