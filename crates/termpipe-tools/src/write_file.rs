//! Write file tool: replace a file's content, creating parent directories.

use crate::args::required_str;
use crate::engine::storage;
use crate::{BuiltinTool, ToolContext, ToolResult};
use serde_json::Value;

/// Built-in tool for writing files.
pub struct WriteFileTool;

#[async_trait::async_trait]
impl BuiltinTool for WriteFileTool {
    fn name(&self) -> &'static str {
        "write_file"
    }

    fn description(&self) -> &'static str {
        "Writes content to a file, replacing it if it exists. Creates parent directories. \
         The write is atomic. Prefer the line tools for small edits to existing files."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "File path (absolute, relative to the workspace, or ~/...)"
                },
                "content": {
                    "type": "string",
                    "description": "The content to write to the file"
                }
            },
            "required": ["path", "content"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> ToolResult {
        let raw_path = required_str(&args, "path")?;
        let content = required_str(&args, "content")?.to_owned();

        let path = ctx.resolve_path(raw_path);
        let chars = content.chars().count();
        ctx.edit(move |_| storage::write_content(&path, &content)).await?;

        Ok(format!("✓ Wrote {chars} chars to {raw_path}"))
    }
}
