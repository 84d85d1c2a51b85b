//! Replace lines tool: swap a line range for new content.

use crate::args::{required_i64, required_str};
use crate::{BuiltinTool, ToolContext, ToolResult};
use serde_json::Value;

/// Built-in tool for replacing a range of lines.
pub struct ReplaceLinesTool;

#[async_trait::async_trait]
impl BuiltinTool for ReplaceLinesTool {
    fn name(&self) -> &'static str {
        "replace_lines"
    }

    fn description(&self) -> &'static str {
        "Replaces lines [start_line, end_line) (0-based, end exclusive) with content. \
         The new content may have a different number of lines. Returns a unified diff."
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
                    "description": "First line to replace (0-based)"
                },
                "end_line": {
                    "type": "integer",
                    "description": "Line after the last one to replace (exclusive)"
                },
                "content": {
                    "type": "string",
                    "description": "Replacement text; may span several lines"
                }
            },
            "required": ["path", "start_line", "end_line", "content"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> ToolResult {
        let path = ctx.resolve_path(required_str(&args, "path")?);
        let start = required_i64(&args, "start_line")?;
        let end = required_i64(&args, "end_line")?;
        let content = required_str(&args, "content")?.to_owned();

        let success = ctx
            .edit(move |editor| editor.replace_lines(&path, start, end, &content))
            .await?;
        Ok(success.to_string())
    }
}
