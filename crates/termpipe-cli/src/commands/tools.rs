//! Tools command: list the available tools.

use termpipe_tools::ToolRegistry;

use crate::theme::Theme;

/// Print every tool with its description, or the full definitions as JSON.
pub(crate) fn list_tools(registry: &ToolRegistry, json: bool) -> anyhow::Result<()> {
    let definitions = registry.all_definitions();

    if json {
        println!("{}", serde_json::to_string_pretty(&definitions)?);
        return Ok(());
    }

    println!("\n{}", Theme::header("Available tools"));
    println!("{}", Theme::separator());
    for def in &definitions {
        println!("  {}", def.name);
        if let Some(description) = &def.description {
            println!("    {}", Theme::dimmed(description));
        }
    }
    println!();

    Ok(())
}
