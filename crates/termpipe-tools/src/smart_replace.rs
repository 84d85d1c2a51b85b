//! Smart replace tool: locate text anywhere, replace it on the one line it names.

use crate::args::{optional_i64, required_str, required_text};
use crate::{BuiltinTool, ToolContext, ToolResult};
use serde_json::Value;

/// Built-in tool for search-and-replace with disambiguation.
pub struct SmartReplaceTool;

#[async_trait::async_trait]
impl BuiltinTool for SmartReplaceTool {
    fn name(&self) -> &'static str {
        "smart_replace"
    }

    fn description(&self) -> &'static str {
        "Finds old_text in the file and replaces it on the single line that contains it. \
         If several lines match, pass expected_line (0-based) to pick one; otherwise the call \
         fails and lists every matching line. If nothing matches, similar lines are suggested."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "File path (absolute, relative to the workspace, or ~/...)"
                },
                "old_text": {
                    "type": "string",
                    "description": "Exact text to replace (case-sensitive)"
                },
                "new_text": {
                    "type": "string",
                    "description": "Replacement text"
                },
                "expected_line": {
                    "type": "integer",
                    "description": "Line to edit when old_text appears on several lines (0-based)"
                }
            },
            "required": ["path", "old_text", "new_text"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> ToolResult {
        let path = ctx.resolve_path(required_str(&args, "path")?);
        let old_text = required_text(&args, "old_text")?.to_owned();
        let new_text = required_str(&args, "new_text")?.to_owned();
        let expected_line = optional_i64(&args, "expected_line")?;

        let success = ctx
            .edit(move |editor| editor.smart_replace(&path, &old_text, &new_text, expected_line))
            .await?;
        Ok(success.to_string())
    }
}
