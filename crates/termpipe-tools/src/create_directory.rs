//! Create directory tool.

use crate::args::required_str;
use crate::{BuiltinTool, ToolContext, ToolResult};
use serde_json::Value;

/// Built-in tool for creating directories.
pub struct CreateDirectoryTool;

#[async_trait::async_trait]
impl BuiltinTool for CreateDirectoryTool {
    fn name(&self) -> &'static str {
        "create_directory"
    }

    fn description(&self) -> &'static str {
        "Creates a directory and any missing parents. Succeeds if it already exists."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Directory to create"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> ToolResult {
        let raw_path = required_str(&args, "path")?;
        tokio::fs::create_dir_all(ctx.resolve_path(raw_path)).await?;
        Ok(format!("✓ Created directory: {raw_path}"))
    }
}
