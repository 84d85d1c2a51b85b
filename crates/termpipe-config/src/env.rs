//! Environment variable and legacy-settings fallbacks.
//!
//! Env vars are fallback, not override: they only fill fields that no config
//! file set. Embedded defaults do not block them.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::merge::{ConfigLayer, FieldSources};

/// Mapping from environment variable name to config field path.
struct EnvMapping {
    var_name: &'static str,
    field_path: &'static str,
}

/// Supported variables, in priority order. The first hit per field wins.
const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "TERMPIPE_API_KEY",
        field_path: "explain.api_key",
    },
    EnvMapping {
        var_name: "TERMPIPE_API_URL",
        field_path: "explain.api_url",
    },
    EnvMapping {
        var_name: "TERMPIPE_MODEL",
        field_path: "explain.model",
    },
    EnvMapping {
        var_name: "TERMPIPE_EXPLAIN",
        field_path: "explain.enabled",
    },
    EnvMapping {
        var_name: "TERMPIPE_EXPLAIN_TIMEOUT_SECS",
        field_path: "explain.timeout_secs",
    },
    EnvMapping {
        var_name: "TERMPIPE_LOG",
        field_path: "logging.level",
    },
    EnvMapping {
        var_name: "TERMPIPE_LOG_FORMAT",
        field_path: "logging.format",
    },
    // Standard OpenAI SDK variable.
    EnvMapping {
        var_name: "OPENAI_API_KEY",
        field_path: "explain.api_key",
    },
];

/// Apply environment variable fallbacks to fields no config file set.
///
/// Returns the number of env vars applied.
pub fn apply_env_fallbacks<S: ::std::hash::BuildHasher>(
    merged: &mut toml::Value,
    sources: &mut FieldSources,
    env_vars: &HashMap<String, String, S>,
) -> usize {
    let mut count: usize = 0;

    for mapping in ENV_MAPPINGS {
        let taken = sources
            .get(mapping.field_path)
            .is_some_and(|layer| *layer != ConfigLayer::Defaults);
        if taken {
            continue;
        }

        if let Some(val) = env_vars.get(mapping.var_name).filter(|v| !v.is_empty()) {
            debug!(
                var = mapping.var_name,
                field = mapping.field_path,
                "applying env var fallback"
            );

            set_field_from_string(merged, mapping.field_path, val);
            sources.insert(mapping.field_path.to_owned(), ConfigLayer::Environment);
            count = count.saturating_add(1);
        }
    }

    count
}

/// Settings written by the iFlow CLI, which shares its endpoint and key.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacySettings {
    api_key: Option<String>,
    base_url: Option<String>,
}

/// Fill `explain.api_key` (and `explain.api_url` if still defaulted) from
/// `~/.iflow/settings.json` when nothing else provided a key.
///
/// Returns whether the legacy file contributed a key.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file exists but cannot be read or parsed.
pub fn apply_legacy_settings(
    merged: &mut toml::Value,
    sources: &mut FieldSources,
    settings_path: &Path,
) -> ConfigResult<bool> {
    if sources.contains_key("explain.api_key") {
        return Ok(false);
    }

    let content = match std::fs::read_to_string(settings_path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: settings_path.display().to_string(),
                source: e,
            });
        },
    };

    let settings: LegacySettings =
        serde_json::from_str(&content).map_err(|e| ConfigError::LegacyParseError {
            path: settings_path.display().to_string(),
            source: e,
        })?;

    let Some(api_key) = settings.api_key.filter(|k| !k.is_empty()) else {
        warn!(path = %settings_path.display(), "legacy settings file has no apiKey");
        return Ok(false);
    };

    set_field_from_string(merged, "explain.api_key", &api_key);
    sources.insert("explain.api_key".to_owned(), ConfigLayer::Legacy);

    let url_defaulted = sources
        .get("explain.api_url")
        .is_none_or(|layer| *layer == ConfigLayer::Defaults);
    if url_defaulted && let Some(base_url) = settings.base_url.filter(|u| !u.is_empty()) {
        set_field_from_string(merged, "explain.api_url", &base_url);
        sources.insert("explain.api_url".to_owned(), ConfigLayer::Legacy);
    }

    debug!(path = %settings_path.display(), "using legacy iFlow settings for explain endpoint");
    Ok(true)
}

/// Set a field in the TOML tree from a string value, creating intermediate
/// tables as needed.
fn set_field_from_string(root: &mut toml::Value, path: &str, val: &str) {
    let toml_val = coerce_to_toml_value(path, val);

    let mut segments: Vec<&str> = path.split('.').collect();
    let Some(leaf) = segments.pop() else {
        return;
    };

    let mut current = root;
    for segment in segments {
        let Some(table) = current.as_table_mut() else {
            return;
        };
        current = table
            .entry(segment)
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }

    if let Some(table) = current.as_table_mut() {
        table.insert(leaf.to_owned(), toml_val);
    }
}

/// Coerce an env var string to the TOML type expected at `path`.
fn coerce_to_toml_value(path: &str, val: &str) -> toml::Value {
    if matches!(path, "explain.temperature")
        && let Ok(f) = val.parse::<f64>()
    {
        return toml::Value::Float(f);
    }

    if matches!(path, "explain.max_tokens" | "explain.timeout_secs")
        && let Ok(i) = val.parse::<i64>()
    {
        return toml::Value::Integer(i);
    }

    if matches!(path, "explain.enabled")
        && let Some(b) = parse_bool(val)
    {
        return toml::Value::Boolean(b);
    }

    toml::Value::String(val.to_owned())
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Collect all current environment variables into a map.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    fn defaults() -> (toml::Value, FieldSources) {
        let val: toml::Value = toml::from_str(
            "[explain]\nmodel = \"qwen3-coder-plus\"\napi_url = \"https://apis.iflow.cn/v1\"\n",
        )
        .unwrap();
        let mut sources = FieldSources::new();
        crate::merge::record_leaves(&val, "", &ConfigLayer::Defaults, &mut sources);
        (val, sources)
    }

    #[test]
    fn test_env_overrides_defaults() {
        let (mut merged, mut sources) = defaults();
        let env = make_env(&[("TERMPIPE_MODEL", "gpt-4o-mini")]);

        let applied = apply_env_fallbacks(&mut merged, &mut sources, &env);

        assert_eq!(applied, 1);
        assert_eq!(merged["explain"]["model"].as_str(), Some("gpt-4o-mini"));
        assert_eq!(
            sources.get("explain.model"),
            Some(&ConfigLayer::Environment)
        );
    }

    #[test]
    fn test_env_does_not_override_files() {
        let (mut merged, mut sources) = defaults();
        sources.insert("explain.model".to_owned(), ConfigLayer::User);
        let env = make_env(&[("TERMPIPE_MODEL", "gpt-4o-mini")]);

        assert_eq!(apply_env_fallbacks(&mut merged, &mut sources, &env), 0);
        assert_eq!(merged["explain"]["model"].as_str(), Some("qwen3-coder-plus"));
    }

    #[test]
    fn test_first_key_variable_wins() {
        let (mut merged, mut sources) = defaults();
        let env = make_env(&[("TERMPIPE_API_KEY", "tp-key"), ("OPENAI_API_KEY", "oa-key")]);

        apply_env_fallbacks(&mut merged, &mut sources, &env);

        assert_eq!(merged["explain"]["api_key"].as_str(), Some("tp-key"));
    }

    #[test]
    fn test_bool_and_int_coercion() {
        let (mut merged, mut sources) = defaults();
        let env = make_env(&[
            ("TERMPIPE_EXPLAIN", "off"),
            ("TERMPIPE_EXPLAIN_TIMEOUT_SECS", "3"),
        ]);

        apply_env_fallbacks(&mut merged, &mut sources, &env);

        assert_eq!(merged["explain"]["enabled"].as_bool(), Some(false));
        assert_eq!(merged["explain"]["timeout_secs"].as_integer(), Some(3));
    }

    #[test]
    fn test_legacy_settings_fill_key_and_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"apiKey": "legacy-key", "baseUrl": "https://legacy.example/v1"}"#,
        )
        .unwrap();

        let (mut merged, mut sources) = defaults();
        assert!(apply_legacy_settings(&mut merged, &mut sources, &path).unwrap());

        assert_eq!(merged["explain"]["api_key"].as_str(), Some("legacy-key"));
        assert_eq!(
            merged["explain"]["api_url"].as_str(),
            Some("https://legacy.example/v1")
        );
        assert_eq!(sources.get("explain.api_key"), Some(&ConfigLayer::Legacy));
    }

    #[test]
    fn test_legacy_settings_skipped_when_key_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"apiKey": "legacy-key"}"#).unwrap();

        let (mut merged, mut sources) = defaults();
        sources.insert("explain.api_key".to_owned(), ConfigLayer::Environment);

        assert!(!apply_legacy_settings(&mut merged, &mut sources, &path).unwrap());
    }

    #[test]
    fn test_legacy_settings_missing_file() {
        let (mut merged, mut sources) = defaults();
        let result =
            apply_legacy_settings(&mut merged, &mut sources, Path::new("/nonexistent/s.json"));
        assert!(!result.unwrap());
    }

    #[test]
    fn test_legacy_settings_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        let (mut merged, mut sources) = defaults();
        assert!(matches!(
            apply_legacy_settings(&mut merged, &mut sources, &path),
            Err(ConfigError::LegacyParseError { .. })
        ));
    }
}
