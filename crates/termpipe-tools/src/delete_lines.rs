//! Delete lines tool: remove a half-open line range.

use crate::args::{required_i64, required_str};
use crate::{BuiltinTool, ToolContext, ToolResult};
use serde_json::Value;

/// Built-in tool for deleting lines.
pub struct DeleteLinesTool;

#[async_trait::async_trait]
impl BuiltinTool for DeleteLinesTool {
    fn name(&self) -> &'static str {
        "delete_lines"
    }

    fn description(&self) -> &'static str {
        "Deletes lines [start_line, end_line) (0-based, end exclusive, clamped to the file). \
         Returns the removed content so it can be re-inserted."
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
                    "description": "First line to delete (0-based)"
                },
                "end_line": {
                    "type": "integer",
                    "description": "Line after the last one to delete (exclusive)"
                }
            },
            "required": ["path", "start_line", "end_line"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> ToolResult {
        let path = ctx.resolve_path(required_str(&args, "path")?);
        let start = required_i64(&args, "start_line")?;
        let end = required_i64(&args, "end_line")?;

        let success = ctx
            .edit(move |editor| editor.delete_lines(&path, start, end))
            .await?;
        Ok(success.to_string())
    }
}
