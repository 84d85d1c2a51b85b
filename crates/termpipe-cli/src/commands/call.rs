//! Call command: run a single tool invocation.

use serde_json::Value;
use termpipe_tools::{ToolContext, ToolRegistry};

/// Run `tool` with JSON `args` and print its output.
///
/// Edit failures print their diagnostic report to stdout so callers can
/// parse it, then surface as an error for the exit status.
pub(crate) async fn call_tool(
    registry: &ToolRegistry,
    ctx: &ToolContext,
    tool: &str,
    args: &str,
) -> anyhow::Result<()> {
    let args: Value = serde_json::from_str(args)
        .map_err(|e| anyhow::anyhow!("--args is not valid JSON: {e}"))?;
    if !args.is_object() {
        anyhow::bail!("--args must be a JSON object");
    }

    match registry.execute(tool, args, ctx).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        },
        Err(e) if e.as_edit().is_some() => {
            println!("{e}");
            anyhow::bail!("{tool} failed")
        },
        Err(e) => Err(e.into()),
    }
}
