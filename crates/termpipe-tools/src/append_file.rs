//! Append file tool: add text to the end of a file.

use crate::args::required_str;
use crate::{BuiltinTool, ToolContext, ToolResult};
use serde_json::Value;
use tokio::io::AsyncWriteExt;

/// Built-in tool for appending to a file.
pub struct AppendFileTool;

#[async_trait::async_trait]
impl BuiltinTool for AppendFileTool {
    fn name(&self) -> &'static str {
        "append_file"
    }

    fn description(&self) -> &'static str {
        "Appends content to the end of a file, creating it and its parent directories \
         if needed. No newline is added; include one in content if required."
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
                    "description": "Text to append"
                }
            },
            "required": ["path", "content"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> ToolResult {
        let raw_path = required_str(&args, "path")?;
        let content = required_str(&args, "content")?;

        let path = ctx.resolve_path(raw_path);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;

        let chars = content.chars().count();
        Ok(format!("✓ Appended {chars} chars to {raw_path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_append_extends_existing_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("log.txt"), "one\n").unwrap();
        let ctx = ToolContext::new(dir.path().to_path_buf());

        let result = AppendFileTool
            .execute(
                serde_json::json!({"path": "log.txt", "content": "two\n"}),
                &ctx,
            )
            .await
            .unwrap();

        assert_eq!(result, "✓ Appended 4 chars to log.txt");
        assert_eq!(
            std::fs::read_to_string(dir.path().join("log.txt")).unwrap(),
            "one\ntwo\n"
        );
    }

    #[tokio::test]
    async fn test_append_creates_missing_parents() {
        let dir = TempDir::new().unwrap();
        let ctx = ToolContext::new(dir.path().to_path_buf());

        AppendFileTool
            .execute(
                serde_json::json!({"path": "new/dir/notes.md", "content": "é"}),
                &ctx,
            )
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("new/dir/notes.md")).unwrap(),
            "é"
        );
    }
}
