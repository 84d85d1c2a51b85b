//! Move file tool: rename or relocate a file or directory.

use crate::args::required_str;
use crate::{BuiltinTool, ToolContext, ToolError, ToolResult};
use serde_json::Value;

/// Built-in tool for moving files.
pub struct MoveFileTool;

#[async_trait::async_trait]
impl BuiltinTool for MoveFileTool {
    fn name(&self) -> &'static str {
        "move_file"
    }

    fn description(&self) -> &'static str {
        "Moves or renames a file or directory. Missing parent directories of the \
         destination are created; an existing destination file is replaced."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "source": {
                    "type": "string",
                    "description": "Current path"
                },
                "destination": {
                    "type": "string",
                    "description": "New path"
                }
            },
            "required": ["source", "destination"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> ToolResult {
        let raw_source = required_str(&args, "source")?;
        let raw_destination = required_str(&args, "destination")?;

        let source = ctx.resolve_path(raw_source);
        let destination = ctx.resolve_path(raw_destination);

        if !tokio::fs::try_exists(&source).await.unwrap_or(false) {
            return Err(ToolError::PathNotFound(raw_source.to_string()));
        }
        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::rename(&source, &destination).await?;

        Ok(format!("✓ Moved {raw_source} → {raw_destination}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_move_into_new_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("old.txt"), "data").unwrap();
        let ctx = ToolContext::new(dir.path().to_path_buf());

        let result = MoveFileTool
            .execute(
                serde_json::json!({"source": "old.txt", "destination": "archive/new.txt"}),
                &ctx,
            )
            .await
            .unwrap();

        assert_eq!(result, "✓ Moved old.txt → archive/new.txt");
        assert!(!dir.path().join("old.txt").exists());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("archive/new.txt")).unwrap(),
            "data"
        );
    }

    #[tokio::test]
    async fn test_missing_source() {
        let dir = TempDir::new().unwrap();
        let ctx = ToolContext::new(dir.path().to_path_buf());

        let err = MoveFileTool
            .execute(
                serde_json::json!({"source": "ghost.txt", "destination": "b.txt"}),
                &ctx,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::PathNotFound(_)));
    }
}
