//! Read lines tool: a numbered view of a line range.

use crate::args::{optional_i64, required_i64, required_str};
use crate::{BuiltinTool, ToolContext, ToolResult};
use serde_json::Value;

/// Built-in tool for reading a range of lines.
pub struct ReadLinesTool;

#[async_trait::async_trait]
impl BuiltinTool for ReadLinesTool {
    fn name(&self) -> &'static str {
        "read_lines"
    }

    fn description(&self) -> &'static str {
        "Shows lines [start_line, end_line) of a file with their 0-based line numbers. \
         end_line is exclusive, defaults to start_line + 1, and is clamped to the file length. \
         Use this to check exact line content before an edit."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "File path (absolute, relative to the workspace, or ~/...)"
                },
                "start_line": {
                    "type": "integer",
                    "description": "First line to show (0-based)"
                },
                "end_line": {
                    "type": "integer",
                    "description": "Line after the last one to show (exclusive)"
                }
            },
            "required": ["path", "start_line"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> ToolResult {
        let path = ctx.resolve_path(required_str(&args, "path")?);
        let start = required_i64(&args, "start_line")?;
        let end = optional_i64(&args, "end_line")?;

        let view = ctx
            .edit(move |editor| editor.read_lines(&path, start, end))
            .await?;
        Ok(view.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EditErrorKind, ToolError};
    use tempfile::TempDir;

    fn setup(content: &str) -> (TempDir, ToolContext) {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("f.txt"), content).unwrap();
        let ctx = ToolContext::new(dir.path().to_path_buf());
        (dir, ctx)
    }

    #[tokio::test]
    async fn test_read_lines_range() {
        let (_dir, ctx) = setup("zero\none\ntwo\nthree");
        let output = ReadLinesTool
            .execute(
                serde_json::json!({"path": "f.txt", "start_line": 1, "end_line": 3}),
                &ctx,
            )
            .await
            .unwrap();

        assert!(output.contains("   1 | one"));
        assert!(output.contains("   2 | two"));
        assert!(!output.contains("three"));
    }

    #[tokio::test]
    async fn test_read_lines_default_single() {
        let (_dir, ctx) = setup("zero\none");
        let output = ReadLinesTool
            .execute(serde_json::json!({"path": "f.txt", "start_line": "1"}), &ctx)
            .await
            .unwrap();
        assert!(output.ends_with("   1 | one"));
    }

    #[tokio::test]
    async fn test_read_lines_out_of_range() {
        let (_dir, ctx) = setup("zero");
        let err = ReadLinesTool
            .execute(serde_json::json!({"path": "f.txt", "start_line": 5}), &ctx)
            .await
            .unwrap_err();
        assert_eq!(err.as_edit().unwrap().kind, EditErrorKind::OutOfRange);
    }

    #[tokio::test]
    async fn test_read_lines_requires_start() {
        let (_dir, ctx) = setup("zero");
        let err = ReadLinesTool
            .execute(serde_json::json!({"path": "f.txt"}), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
