//! Bridge from `termpipe_config::Config` to engine, provider, and logging types.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use termpipe_config::{Config, ExplainSection};
use termpipe_llm::{OpenAiCompatProvider, ProviderConfig};
use termpipe_telemetry::{LogConfig, LogFormat};
use termpipe_tools::engine::FuzzyConfig;
use termpipe_tools::{LineEditor, LlmExplainer, ToolContext};
use tracing::debug;

/// Convert config to [`LogConfig`].
pub(crate) fn to_log_config(cfg: &Config) -> LogConfig {
    let format = cfg.logging.format.parse().unwrap_or(LogFormat::Compact);

    let mut log_config = LogConfig::new(&cfg.logging.level).with_format(format);
    if let Some(dir) = &cfg.logging.directory {
        log_config = log_config.with_file_logging(dir, "termpipe");
    }
    for directive in &cfg.logging.directives {
        log_config = log_config.with_directive(directive);
    }

    log_config
}

/// Convert the `[editor]` section to a [`LineEditor`].
pub(crate) fn to_line_editor(cfg: &Config) -> LineEditor {
    let editor = &cfg.editor;
    LineEditor {
        fuzzy: FuzzyConfig {
            threshold: editor.fuzzy_threshold,
            containment_score: editor.containment_score,
            limit: editor.max_suggestions,
        },
        strong_match: editor.strong_match_threshold,
        diff_context: editor.diff_context,
        find_max_matches: editor.find_max_matches,
    }
}

/// Convert the `[explain]` section to a [`ProviderConfig`], if it has a key.
pub(crate) fn to_provider_config(explain: &ExplainSection) -> Option<ProviderConfig> {
    let key = explain.api_key.as_deref().filter(|k| !k.is_empty())?;
    Some(
        ProviderConfig::new(key, &explain.model)
            .max_tokens(explain.max_tokens)
            .temperature(explain.temperature)
            .base_url(&explain.api_url)
            .timeout(Duration::from_secs(explain.timeout_secs)),
    )
}

/// Build the shared tool context for a workspace.
///
/// The explainer is attached only when explanations are enabled, a key is
/// configured, and `no_explain` is not set.
pub(crate) fn build_context(
    cfg: &Config,
    workspace: PathBuf,
    no_explain: bool,
) -> anyhow::Result<ToolContext> {
    let mut ctx = ToolContext::new(workspace)
        .with_editor(to_line_editor(cfg))
        .with_max_output_chars(cfg.editor.max_output_chars);

    if no_explain || !cfg.explain.is_usable() {
        debug!(no_explain, "explanations off");
        return Ok(ctx);
    }

    if let Some(provider_config) = to_provider_config(&cfg.explain) {
        let provider = OpenAiCompatProvider::from_config(&provider_config)?;
        debug!(model = %cfg.explain.model, "explanations on");
        ctx = ctx.with_explainer(
            Arc::new(LlmExplainer::new(provider)),
            Duration::from_secs(cfg.explain.timeout_secs),
        );
    }

    Ok(ctx)
}
