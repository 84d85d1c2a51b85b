//! Config command: show, locate, and validate configuration.

use std::path::Path;

use termpipe_config::{Config, ResolvedConfig, ShowFormat};

use crate::theme::Theme;

/// Print the resolved configuration with source annotations.
pub(crate) fn show_config(
    workspace: &Path,
    format: &str,
    section: Option<&str>,
) -> anyhow::Result<()> {
    let format = match format {
        "json" => ShowFormat::Json,
        "toml" => ShowFormat::Toml,
        other => anyhow::bail!("unknown format '{other}' (expected toml or json)"),
    };

    let resolved = Config::load(Some(workspace))?;
    let rendered = resolved
        .show(format, section)
        .map_err(|_| anyhow::anyhow!("cannot render section {section:?}"))?;
    println!("{rendered}");
    Ok(())
}

/// Print every file the loader consults, marking the ones that exist.
pub(crate) fn show_paths(workspace: &Path) {
    println!("\n{}", Theme::header("Config files (lowest to highest precedence)"));
    for path in ResolvedConfig::config_paths(home_dir().as_deref(), Some(workspace)) {
        let marker = if Path::new(&path).exists() {
            Theme::success(&path)
        } else {
            Theme::dimmed(&format!("  {path} (not found)"))
        };
        println!("  {marker}");
    }
    println!();
}

/// Load and validate, reporting the first problem.
pub(crate) fn validate_config(workspace: &Path) -> anyhow::Result<()> {
    match Config::load(Some(workspace)) {
        Ok(resolved) => {
            println!("{}", Theme::success("Configuration is valid"));
            for file in &resolved.loaded_files {
                println!("  {}", Theme::dimmed(file));
            }
            if resolved.config.explain.enabled && !resolved.config.explain.is_usable() {
                println!(
                    "{}",
                    Theme::warning("No API key configured; AI explanations are off")
                );
            }
            Ok(())
        },
        Err(e) => {
            println!("{}", Theme::error(&e.to_string()));
            Err(e.into())
        },
    }
}

fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME").map(std::path::PathBuf::from)
}
