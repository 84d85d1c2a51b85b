//! Insert lines tool: splice new lines before a line index.

use crate::args::{required_i64, required_str};
use crate::{BuiltinTool, ToolContext, ToolResult};
use serde_json::Value;

/// Built-in tool for inserting lines.
pub struct InsertLinesTool;

#[async_trait::async_trait]
impl BuiltinTool for InsertLinesTool {
    fn name(&self) -> &'static str {
        "insert_lines"
    }

    fn description(&self) -> &'static str {
        "Inserts content before line_number (0-based). line_number equal to the line count \
         appends; out-of-range values are clamped. Content is split on newlines."
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
                    "description": "Insert before this line (0-based)"
                },
                "content": {
                    "type": "string",
                    "description": "Text to insert; may span several lines"
                }
            },
            "required": ["path", "line_number", "content"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> ToolResult {
        let path = ctx.resolve_path(required_str(&args, "path")?);
        let index = required_i64(&args, "line_number")?;
        let content = required_str(&args, "content")?.to_owned();

        let success = ctx
            .edit(move |editor| editor.insert_lines(&path, index, &content))
            .await?;
        Ok(success.to_string())
    }
}
