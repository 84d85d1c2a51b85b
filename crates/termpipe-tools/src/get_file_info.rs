//! File info tool: size, type, modification time and line count.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::args::required_str;
use crate::list_directory::format_size;
use crate::{BuiltinTool, ToolContext, ToolError, ToolResult};
use serde_json::Value;

/// Files above this size are not read for a line count.
const LINE_COUNT_MAX_BYTES: u64 = 1024 * 1024;

/// Built-in tool for file metadata.
pub struct GetFileInfoTool;

#[async_trait::async_trait]
impl BuiltinTool for GetFileInfoTool {
    fn name(&self) -> &'static str {
        "get_file_info"
    }

    fn description(&self) -> &'static str {
        "Shows size, type and last modification time of a file or directory. \
         Text files under 1 MB also report their line count."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path to inspect (absolute, relative to the workspace, or ~/...)"
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

        let mut output = format!("{raw_path}\n");
        let _ = writeln!(output, "  Size: {}", format_size(metadata.len()));
        if let Ok(modified) = metadata.modified() {
            let modified: DateTime<Utc> = modified.into();
            let _ = writeln!(output, "  Modified: {}", modified.to_rfc3339());
        }
        let kind = if metadata.is_dir() { "directory" } else { "file" };
        let _ = write!(output, "  Type: {kind}");

        if metadata.is_file()
            && metadata.len() < LINE_COUNT_MAX_BYTES
            && let Ok(content) = tokio::fs::read_to_string(&path).await
        {
            let _ = write!(output, "\n  Lines: {}", content.lines().count());
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_info_reports_lines() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("f.txt"), "a\nb\nc\n").unwrap();
        let ctx = ToolContext::new(dir.path().to_path_buf());

        let result = GetFileInfoTool
            .execute(serde_json::json!({"path": "f.txt"}), &ctx)
            .await
            .unwrap();

        assert!(result.starts_with("f.txt\n  Size: 6 B"));
        assert!(result.contains("  Modified: "));
        assert!(result.contains("  Type: file"));
        assert!(result.ends_with("  Lines: 3"));
    }

    #[tokio::test]
    async fn test_directory_and_missing() {
        let dir = TempDir::new().unwrap();
        let ctx = ToolContext::new(dir.path().to_path_buf());

        let result = GetFileInfoTool
            .execute(serde_json::json!({"path": "."}), &ctx)
            .await
            .unwrap();
        assert!(result.ends_with("  Type: directory"));

        let err = GetFileInfoTool
            .execute(serde_json::json!({"path": "gone.txt"}), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::PathNotFound(_)));
    }
}
