//! List directory tool: directory entries with type and size.

use std::fmt::Write;

use crate::args::required_str;
use crate::{BuiltinTool, ToolContext, ToolError, ToolResult};
use serde_json::Value;

/// Built-in tool for listing a directory.
pub struct ListDirectoryTool;

#[async_trait::async_trait]
impl BuiltinTool for ListDirectoryTool {
    fn name(&self) -> &'static str {
        "list_directory"
    }

    fn description(&self) -> &'static str {
        "Lists a directory: subdirectories first, then files with their sizes, \
         each group sorted by name."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Directory path (absolute, relative to the workspace, or ~/...)"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> ToolResult {
        let raw_path = required_str(&args, "path")?;
        let path = ctx.resolve_path(raw_path);

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ToolError::PathNotFound(raw_path.to_string()));
            },
            Err(e) => return Err(e.into()),
        };
        if !metadata.is_dir() {
            return Err(ToolError::InvalidArguments(format!(
                "{raw_path} is not a directory"
            )));
        }

        let mut dirs: Vec<String> = Vec::new();
        let mut files: Vec<(String, u64)> = Vec::new();

        let mut entries = tokio::fs::read_dir(&path).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            let meta = entry.metadata().await?;
            if meta.is_dir() {
                dirs.push(name);
            } else {
                files.push((name, meta.len()));
            }
        }

        if dirs.is_empty() && files.is_empty() {
            return Ok(format!("{raw_path} is empty"));
        }

        dirs.sort();
        files.sort();

        let mut output = String::new();
        for name in &dirs {
            let _ = writeln!(output, "  {name}/");
        }
        for (name, size) in &files {
            let _ = writeln!(output, "  {name}  ({})", format_size(*size));
        }
        let _ = write!(
            output,
            "\n({} directories, {} files)",
            dirs.len(),
            files.len()
        );

        Ok(output)
    }
}

/// Human-readable byte count.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
