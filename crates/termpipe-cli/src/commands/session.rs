//! Session command: JSON-lines request/response loop over one tool context.
//!
//! Each input line is `{"id": ..., "tool": "...", "args": {...}}`. Each output
//! line answers it with `ok` plus either `output` or `error`. The reserved
//! tool name `history` returns the most recent calls (`args.n`, default 20).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use termpipe_tools::{ToolContext, ToolError, ToolRegistry};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

/// Calls listed by `history` when `n` is absent.
const DEFAULT_HISTORY: usize = 20;

#[derive(Debug, Deserialize)]
struct SessionRequest {
    #[serde(default)]
    id: Value,
    tool: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    id: Value,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
}

impl SessionResponse {
    fn ok(id: Value, output: String) -> Self {
        Self {
            id,
            ok: true,
            output: Some(output),
            error: None,
            kind: None,
        }
    }

    fn failed(id: Value, error: &ToolError) -> Self {
        Self {
            id,
            ok: false,
            output: None,
            error: Some(error.to_string()),
            kind: error.as_edit().map(|f| f.kind.as_str()),
        }
    }

    fn invalid(message: String) -> Self {
        Self {
            id: Value::Null,
            ok: false,
            output: None,
            error: Some(message),
            kind: None,
        }
    }
}

/// Serve requests from stdin until EOF.
pub(crate) async fn run_stdio(registry: &ToolRegistry, ctx: &ToolContext) -> anyhow::Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    run_session(registry, ctx, stdin, stdout).await
}

/// Serve requests from `reader`, writing one response line per request.
pub(crate) async fn run_session<R, W>(
    registry: &ToolRegistry,
    ctx: &ToolContext,
    reader: R,
    mut writer: W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!(workspace = %ctx.workspace_root.display(), "session started");
    let mut lines = reader.lines();
    let mut served: usize = 0;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<SessionRequest>(&line) {
            Ok(request) => handle(registry, ctx, request).await,
            Err(e) => SessionResponse::invalid(format!("invalid request: {e}")),
        };

        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        writer.write_all(&encoded).await?;
        writer.flush().await?;
        served = served.saturating_add(1);
    }

    debug!(served, "session ended");
    Ok(())
}

async fn handle(
    registry: &ToolRegistry,
    ctx: &ToolContext,
    request: SessionRequest,
) -> SessionResponse {
    if request.tool == "history" {
        let n = request
            .args
            .get("n")
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(DEFAULT_HISTORY);
        let calls = ctx.recent_calls(n).await;
        return match serde_json::to_string(&calls) {
            Ok(json) => SessionResponse::ok(request.id, json),
            Err(e) => SessionResponse::invalid(e.to_string()),
        };
    }

    let args = if request.args.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        request.args
    };

    match registry.execute(&request.tool, args, ctx).await {
        Ok(output) => SessionResponse::ok(request.id, output),
        Err(e) => SessionResponse::failed(request.id, &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn run(input: &str, ctx: &ToolContext) -> Vec<Value> {
        let registry = ToolRegistry::with_defaults();
        let mut out = Vec::new();
        run_session(&registry, ctx, input.as_bytes(), &mut out)
            .await
            .unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_session_shares_context() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("f.txt"), "a\nb").unwrap();
        let ctx = ToolContext::new(dir.path().to_path_buf());

        let input = concat!(
            r#"{"id": 1, "tool": "insert_lines", "args": {"path": "f.txt", "line_number": 2, "content": "c"}}"#,
            "\n\n",
            r#"{"id": 2, "tool": "read_lines", "args": {"path": "f.txt", "start_line": 2}}"#,
            "\n",
            r#"{"id": 3, "tool": "history"}"#,
            "\n",
        );
        let responses = run(input, &ctx).await;

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[0]["ok"], true);
        assert!(responses[1]["output"].as_str().unwrap().ends_with("   2 | c"));
        let history: Vec<Value> =
            serde_json::from_str(responses[2]["output"].as_str().unwrap()).unwrap();
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn test_session_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("f.txt"), "dup\ndup").unwrap();
        let ctx = ToolContext::new(dir.path().to_path_buf());

        let input = concat!(
            r#"{"id": "x", "tool": "smart_replace", "args": {"path": "f.txt", "old_text": "dup", "new_text": "y"}}"#,
            "\n",
            "not json\n",
            r#"{"tool": "no_such_tool"}"#,
            "\n",
        );
        let responses = run(input, &ctx).await;

        assert_eq!(responses[0]["ok"], false);
        assert_eq!(responses[0]["kind"], "ambiguous");
        assert_eq!(responses[0]["id"], "x");
        assert!(responses[1]["error"].as_str().unwrap().starts_with("invalid request"));
        assert!(responses[2]["error"].as_str().unwrap().contains("Unknown tool"));
    }
}
