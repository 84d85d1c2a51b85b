//! Read multiple files tool: several whole files in one call.

use std::fmt::Write;

use crate::{BuiltinTool, ToolContext, ToolError, ToolResult};
use serde_json::Value;

/// Extensions reported by size instead of content.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Built-in tool for reading several files at once.
pub struct ReadMultipleFilesTool;

#[async_trait::async_trait]
impl BuiltinTool for ReadMultipleFilesTool {
    fn name(&self) -> &'static str {
        "read_multiple_files"
    }

    fn description(&self) -> &'static str {
        "Reads several files in one call. Each file is shown under an \"=== path ===\" \
         header; a file that cannot be read shows its error instead of failing the call. \
         Images are summarized by size."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "paths": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Files to read (absolute, relative to the workspace, or ~/...)"
                }
            },
            "required": ["paths"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> ToolResult {
        let paths: Vec<&str> = args
            .get("paths")
            .and_then(Value::as_array)
            .ok_or_else(|| ToolError::InvalidArguments("paths is required".into()))?
            .iter()
            .map(|p| {
                p.as_str()
                    .ok_or_else(|| ToolError::InvalidArguments("paths must be strings".into()))
            })
            .collect::<Result<_, _>>()?;

        if paths.is_empty() {
            return Err(ToolError::InvalidArguments("paths must not be empty".into()));
        }

        let mut output = String::new();
        for raw in paths {
            let path = ctx.resolve_path(raw);
            let body = match tokio::fs::read(&path).await {
                Ok(data) if is_image(&path) => {
                    format!("[Image file: {} bytes]", data.len())
                },
                Ok(data) => String::from_utf8(data)
                    .unwrap_or_else(|_| "[Error: not valid UTF-8]".to_owned()),
                Err(e) => format!("[Error: {e}]"),
            };
            let _ = writeln!(output, "=== {raw} ===\n{body}\n");
        }

        Ok(output.trim_end().to_owned())
    }
}

fn is_image(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}
