//! Post-merge configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_editor(config)?;
    validate_explain(config)?;
    validate_logging(config)?;
    Ok(())
}

/// Upper bound on explanation length; they are meant to be two lines.
const MAX_EXPLAIN_TOKENS: usize = 4096;
/// Upper bound on the explainer timeout.
const MAX_EXPLAIN_TIMEOUT_SECS: u64 = 120;

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_owned(),
        message: message.into(),
    }
}

fn check_ratio(field: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(
            field,
            format!("{value} is out of range; must be between 0.0 and 1.0"),
        ))
    }
}

fn validate_editor(config: &Config) -> ConfigResult<()> {
    let e = &config.editor;

    check_ratio("editor.fuzzy_threshold", e.fuzzy_threshold)?;
    check_ratio("editor.containment_score", e.containment_score)?;
    check_ratio("editor.strong_match_threshold", e.strong_match_threshold)?;

    if e.max_suggestions == 0 {
        return Err(invalid(
            "editor.max_suggestions",
            "max_suggestions must be at least 1",
        ));
    }

    if e.find_max_matches == 0 {
        return Err(invalid(
            "editor.find_max_matches",
            "find_max_matches must be at least 1",
        ));
    }

    if e.max_output_chars < 1024 {
        return Err(invalid(
            "editor.max_output_chars",
            "max_output_chars must be at least 1024",
        ));
    }

    Ok(())
}

fn validate_explain(config: &Config) -> ConfigResult<()> {
    let x = &config.explain;

    if x.provider != "openai-compat" {
        return Err(invalid(
            "explain.provider",
            format!(
                "unsupported provider '{}'; expected: openai-compat",
                x.provider
            ),
        ));
    }

    if !x.api_url.starts_with("http://") && !x.api_url.starts_with("https://") {
        return Err(invalid(
            "explain.api_url",
            "api_url must start with http:// or https://",
        ));
    }

    if x.model.trim().is_empty() {
        return Err(invalid("explain.model", "model must not be empty"));
    }

    check_ratio("explain.temperature", x.temperature)?;

    if x.max_tokens == 0 || x.max_tokens > MAX_EXPLAIN_TOKENS {
        return Err(invalid(
            "explain.max_tokens",
            format!("max_tokens must be between 1 and {MAX_EXPLAIN_TOKENS}"),
        ));
    }

    if x.timeout_secs == 0 || x.timeout_secs > MAX_EXPLAIN_TIMEOUT_SECS {
        return Err(invalid(
            "explain.timeout_secs",
            format!("timeout_secs must be between 1 and {MAX_EXPLAIN_TIMEOUT_SECS}"),
        ));
    }

    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.logging.level.as_str()) {
        return Err(invalid(
            "logging.level",
            format!(
                "unsupported log level '{}'; expected one of: {}",
                config.logging.level,
                valid_levels.join(", ")
            ),
        ));
    }

    let valid_formats = ["pretty", "compact", "json", "full"];
    if !valid_formats.contains(&config.logging.format.as_str()) {
        return Err(invalid(
            "logging.format",
            format!(
                "unsupported log format '{}'; expected one of: {}",
                config.logging.format,
                valid_formats.join(", ")
            ),
        ));
    }

    Ok(())
}
