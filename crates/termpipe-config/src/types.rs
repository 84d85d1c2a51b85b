//! Configuration types for `TermPipe`.
//!
//! Every struct implements [`Default`] matching `defaults.toml`, so a bare
//! `[section]` header in TOML produces a working configuration.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Matching thresholds and output limits for the editing engine.
    pub editor: EditorSection,
    /// AI diagnostic explainer endpoint.
    pub explain: ExplainSection,
    /// Logging level, format, and per-crate directives.
    pub logging: LoggingSection,
}

// ---------------------------------------------------------------------------
// EditorSection
// ---------------------------------------------------------------------------

/// Tuning for fuzzy suggestions, diffs, and search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSection {
    /// Minimum similarity ratio for a line to be suggested.
    pub fuzzy_threshold: f64,
    /// Score given when one side contains the other.
    pub containment_score: f64,
    /// Maximum fuzzy suggestions per failure.
    pub max_suggestions: usize,
    /// Suggestions scoring above this also get a character diff.
    pub strong_match_threshold: f64,
    /// Unchanged lines shown around each diff hunk.
    pub diff_context: usize,
    /// Default cap on `find_in_file` matches.
    pub find_max_matches: usize,
    /// Tool output is truncated beyond this many characters.
    pub max_output_chars: usize,
}

impl Default for EditorSection {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 0.6,
            containment_score: 0.9,
            max_suggestions: 5,
            strong_match_threshold: 0.7,
            diff_context: 3,
            find_max_matches: 50,
            max_output_chars: 30_000,
        }
    }
}

// ---------------------------------------------------------------------------
// ExplainSection
// ---------------------------------------------------------------------------

/// Completion endpoint used to explain failed edits.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ExplainSection {
    /// Whether failed edits ask the model for an explanation.
    pub enabled: bool,
    /// Provider identifier. Only `"openai-compat"` is supported.
    pub provider: String,
    /// Model name sent to the endpoint.
    pub model: String,
    /// Base URL of the chat-completions API.
    pub api_url: String,
    /// API key. Prefer `TERMPIPE_API_KEY` over storing this in a file.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Maximum tokens per explanation.
    pub max_tokens: usize,
    /// Sampling temperature.
    pub temperature: f64,
    /// Whole-request timeout. Explanations slower than this are dropped.
    pub timeout_secs: u64,
}

impl ExplainSection {
    /// Whether an explainer can actually be constructed.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.enabled && self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }
}

impl std::fmt::Debug for ExplainSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplainSection")
            .field("enabled", &self.enabled)
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .field("has_api_key", &self.api_key.is_some())
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Serialize for ExplainSection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ExplainSection", 7)?;
        state.serialize_field("enabled", &self.enabled)?;
        state.serialize_field("provider", &self.provider)?;
        state.serialize_field("model", &self.model)?;
        state.serialize_field("api_url", &self.api_url)?;
        state.serialize_field("max_tokens", &self.max_tokens)?;
        state.serialize_field("temperature", &self.temperature)?;
        state.serialize_field("timeout_secs", &self.timeout_secs)?;
        state.end()
    }
}

impl Default for ExplainSection {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: "openai-compat".to_owned(),
            model: "qwen3-coder-plus".to_owned(),
            api_url: "https://apis.iflow.cn/v1".to_owned(),
            api_key: None,
            max_tokens: 150,
            temperature: 0.1,
            timeout_secs: 8,
        }
    }
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging and tracing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"`, `"json"`, or `"full"`.
    pub format: String,
    /// Per-crate tracing directives (e.g. `["termpipe_llm=debug"]`).
    pub directives: Vec<String>,
    /// When set, logs go to rolling files in this directory instead of stderr.
    pub directory: Option<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
            directory: None,
        }
    }
}
