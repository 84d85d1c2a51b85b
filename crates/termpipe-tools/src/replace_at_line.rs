//! Replace-at-line tool: text replacement pinned to one line.

use crate::args::{required_i64, required_str, required_text};
use crate::{BuiltinTool, ToolContext, ToolResult};
use serde_json::Value;

/// Built-in tool for replacing text on a known line.
pub struct ReplaceAtLineTool;

#[async_trait::async_trait]
impl BuiltinTool for ReplaceAtLineTool {
    fn name(&self) -> &'static str {
        "replace_at_line"
    }

    fn description(&self) -> &'static str {
        "Replaces old_text with new_text on line line_number (0-based) only. Every occurrence \
         on that line is replaced. If the line does not contain old_text, nothing is written \
         and the error shows the actual line, a character diff, and where the text really is."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "File path (absolute, relative to the workspace, or ~/...)"
                },
                "line_number": {
                    "type": "integer",
                    "description": "Line to edit (0-based)"
                },
                "old_text": {
                    "type": "string",
                    "description": "Exact text to replace (case-sensitive)"
                },
                "new_text": {
                    "type": "string",
                    "description": "Replacement text"
                }
            },
            "required": ["path", "line_number", "old_text", "new_text"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> ToolResult {
        let path = ctx.resolve_path(required_str(&args, "path")?);
        let index = required_i64(&args, "line_number")?;
        let old_text = required_text(&args, "old_text")?.to_owned();
        let new_text = required_str(&args, "new_text")?.to_owned();

        let success = ctx
            .edit(move |editor| editor.replace_at_line(&path, index, &old_text, &new_text))
            .await?;
        Ok(success.to_string())
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
    async fn test_replace_at_line_basic() {
        let (dir, ctx) = setup("foo=1\nbar=1");
        let output = ReplaceAtLineTool
            .execute(
                serde_json::json!({
                    "path": "f.txt",
                    "line_number": 0,
                    "old_text": "1",
                    "new_text": "2"
                }),
                &ctx,
            )
            .await
            .unwrap();

        assert!(output.contains("Change: foo={-1-}{+2+}"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("f.txt")).unwrap(),
            "foo=2\nbar=1"
        );
    }

    #[tokio::test]
    async fn test_replace_at_line_wrong_line() {
        let (dir, ctx) = setup("alpha = 1\nbeta = 2");
        let err = ReplaceAtLineTool
            .execute(
                serde_json::json!({
                    "path": "f.txt",
                    "line_number": 0,
                    "old_text": "beta = 2",
                    "new_text": "beta = 3"
                }),
                &ctx,
            )
            .await
            .unwrap_err();

        let failure = err.as_edit().unwrap();
        assert_eq!(failure.kind, EditErrorKind::TextNotFound);
        assert_eq!(failure.matching_lines(), vec![1]);
        let report = err.to_string();
        assert!(report.contains("Line 0 contains: \"alpha = 1\""));
        assert!(report.contains("Found on lines:"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("f.txt")).unwrap(),
            "alpha = 1\nbeta = 2"
        );
    }

    #[tokio::test]
    async fn test_replace_at_line_empty_old_text() {
        let (_dir, ctx) = setup("abc");
        let err = ReplaceAtLineTool
            .execute(
                serde_json::json!({
                    "path": "f.txt",
                    "line_number": 0,
                    "old_text": "",
                    "new_text": "x"
                }),
                &ctx,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
