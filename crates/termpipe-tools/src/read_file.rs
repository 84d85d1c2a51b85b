//! Read file tool: raw file content with optional line window.

use crate::args::{optional_i64, optional_usize, required_str};
use crate::{BuiltinTool, ToolContext, ToolError, ToolResult, truncate_output};
use serde_json::Value;

/// Output cap for a single read, in characters.
const MAX_READ_CHARS: usize = 50_000;

/// Built-in tool for reading files.
pub struct ReadFileTool;

#[async_trait::async_trait]
impl BuiltinTool for ReadFileTool {
    fn name(&self) -> &'static str {
        "read_file"
    }

    fn description(&self) -> &'static str {
        "Reads a file and returns its raw content. offset (0-based, negative counts from the \
         end) and length select a window of lines. Output over 50000 characters is truncated."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "File path (absolute, relative to the workspace, or ~/...)"
                },
                "offset": {
                    "type": "integer",
                    "description": "First line to return (0-based). Negative counts from the end."
                },
                "length": {
                    "type": "integer",
                    "description": "Maximum number of lines to return"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> ToolResult {
        let raw_path = required_str(&args, "path")?;
        let offset = optional_i64(&args, "offset")?;
        let length = optional_usize(&args, "length")?;

        let path = ctx.resolve_path(raw_path);
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ToolError::PathNotFound(raw_path.to_string()));
            },
            Err(e) => return Err(e.into()),
        };
        let content = String::from_utf8(raw)
            .map_err(|_| ToolError::ExecutionFailed(format!("{raw_path} is not valid UTF-8")))?;

        let content = if offset.is_some() || length.is_some() {
            window(&content, offset.unwrap_or(0), length)
        } else {
            content
        };

        Ok(truncate_output(content, MAX_READ_CHARS))
    }
}

/// Lines `[offset, offset + length)` of `content`, clamped to the file.
fn window(content: &str, offset: i64, length: Option<usize>) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let total = lines.len();

    let start = if offset < 0 {
        let back = usize::try_from(offset.unsigned_abs()).unwrap_or(usize::MAX);
        total.saturating_sub(back)
    } else {
        usize::try_from(offset).unwrap_or(usize::MAX).min(total)
    };
    let end = length.map_or(total, |n| start.saturating_add(n).min(total));

    lines[start..end].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup(content: &str) -> (TempDir, ToolContext) {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("f.txt"), content).unwrap();
        let ctx = ToolContext::new(dir.path().to_path_buf());
        (dir, ctx)
    }

    #[tokio::test]
    async fn test_read_whole_file() {
        let (_dir, ctx) = setup("line 1\nline 2\n");
        let output = ReadFileTool
            .execute(serde_json::json!({"path": "f.txt"}), &ctx)
            .await
            .unwrap();
        assert_eq!(output, "line 1\nline 2\n");
    }

    #[tokio::test]
    async fn test_read_window() {
        let (_dir, ctx) = setup("a\nb\nc\nd\ne");
        let output = ReadFileTool
            .execute(serde_json::json!({"path": "f.txt", "offset": 1, "length": 2}), &ctx)
            .await
            .unwrap();
        assert_eq!(output, "b\nc");
    }

    #[tokio::test]
    async fn test_read_negative_offset() {
        let (_dir, ctx) = setup("a\nb\nc\nd\ne");
        let output = ReadFileTool
            .execute(serde_json::json!({"path": "f.txt", "offset": -2}), &ctx)
            .await
            .unwrap();
        assert_eq!(output, "d\ne");
    }

    #[tokio::test]
    async fn test_read_not_found() {
        let dir = TempDir::new().unwrap();
        let ctx = ToolContext::new(dir.path().to_path_buf());
        let err = ReadFileTool
            .execute(serde_json::json!({"path": "missing.txt"}), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::PathNotFound(_)));
    }

    #[tokio::test]
    async fn test_read_truncates() {
        let (_dir, ctx) = setup(&"z".repeat(60_000));
        let output = ReadFileTool
            .execute(serde_json::json!({"path": "f.txt"}), &ctx)
            .await
            .unwrap();
        assert!(output.ends_with("[... truncated, 60000 total chars]"));
    }

    #[test]
    fn test_window_clamps() {
        assert_eq!(window("a\nb", 5, None), "");
        assert_eq!(window("a\nb", -10, Some(1)), "a");
        assert_eq!(window("a\nb\nc", 1, Some(100)), "b\nc");
    }
}
