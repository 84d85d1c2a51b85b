//! Optional model-written analysis of failed edits.
//!
//! Explanations are advisory: a slow or failing explainer never changes the
//! outcome of an edit, it only drops the extra text.

use std::fmt::Write;
use std::time::Duration;

use termpipe_llm::{LlmError, LlmProvider, Message};
use tracing::debug;

use crate::engine::{EditErrorKind, EditFailure};

/// Which failure is being explained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplainKind {
    /// The text is nowhere in the file.
    TextNotFound,
    /// The text exists, but not on the addressed line.
    WrongLine,
    /// The text is on several lines.
    Ambiguous,
}

/// Facts about a failure, handed to the explainer.
#[derive(Debug, Clone, Default)]
pub struct ExplainContext {
    /// File the edit targeted.
    pub path: String,
    /// Text the edit searched for.
    pub searched: String,
    /// Line the edit addressed, if any.
    pub line_number: Option<usize>,
    /// Content of that line.
    pub actual_line: Option<String>,
    /// Lines that contain the text exactly.
    pub matching_lines: Vec<usize>,
    /// Similar lines with their content.
    pub similar: Vec<(usize, String)>,
}

impl ExplainContext {
    /// Build a context for failures worth explaining.
    ///
    /// Returns `None` for addressing and I/O failures, whose message already
    /// says everything.
    #[must_use]
    pub fn from_failure(failure: &EditFailure) -> Option<(ExplainKind, Self)> {
        let d = &failure.diagnostics;
        let kind = match failure.kind {
            EditErrorKind::Ambiguous => ExplainKind::Ambiguous,
            EditErrorKind::TextNotFound if !d.exact_matches.is_empty() => ExplainKind::WrongLine,
            EditErrorKind::TextNotFound => ExplainKind::TextNotFound,
            _ => return None,
        };

        let context = Self {
            path: failure.path.display().to_string(),
            searched: d.searched_for.clone().unwrap_or_default(),
            line_number: d.line_number,
            actual_line: d.actual_content.clone(),
            matching_lines: failure.matching_lines(),
            similar: d
                .suggestions
                .iter()
                .map(|s| (s.candidate.line, s.candidate.content.clone()))
                .collect(),
        };
        Some((kind, context))
    }
}

/// Explainer errors.
#[derive(Debug, thiserror::Error)]
pub enum ExplainError {
    /// No explainer is configured.
    #[error("explanations are disabled")]
    Disabled,

    /// The model call failed.
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// The model did not answer in time.
    #[error("explanation timed out after {0:?}")]
    Timeout(Duration),
}

/// Produces a short diagnosis for a failed edit.
#[async_trait::async_trait]
pub trait Explainer: Send + Sync {
    /// Explain the failure.
    async fn explain(
        &self,
        kind: ExplainKind,
        context: &ExplainContext,
    ) -> Result<String, ExplainError>;
}

/// Explainer that never explains.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopExplainer;

#[async_trait::async_trait]
impl Explainer for NoopExplainer {
    async fn explain(
        &self,
        _kind: ExplainKind,
        _context: &ExplainContext,
    ) -> Result<String, ExplainError> {
        Err(ExplainError::Disabled)
    }
}

/// Asks a chat model what went wrong.
pub struct LlmExplainer<P> {
    provider: P,
}

impl<P: LlmProvider> LlmExplainer<P> {
    /// Wrap a provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

const SYSTEM_PROMPT: &str = "You diagnose failed text edits made by a coding agent. \
Answer in at most two lines, formatted exactly as:\n\
PROBLEM: <what went wrong>\n\
FIX: <the exact next tool call or argument change>";

fn build_prompt(kind: ExplainKind, ctx: &ExplainContext) -> String {
    let mut prompt = match kind {
        ExplainKind::TextNotFound => format!(
            "An edit in {} searched for text that is not in the file.\nSearched: {:?}",
            ctx.path, ctx.searched
        ),
        ExplainKind::WrongLine => format!(
            "An edit in {} targeted the wrong line.\nSearched: {:?}\nText is on lines: {:?}",
            ctx.path, ctx.searched, ctx.matching_lines
        ),
        ExplainKind::Ambiguous => format!(
            "An edit in {} matched several lines and could not choose.\nSearched: {:?}\nMatching lines: {:?}",
            ctx.path, ctx.searched, ctx.matching_lines
        ),
    };

    if let (Some(line), Some(actual)) = (ctx.line_number, &ctx.actual_line) {
        let _ = write!(prompt, "\nLine {line} actually contains: {actual:?}");
    }
    for (line, content) in &ctx.similar {
        let _ = write!(prompt, "\nSimilar line {line}: {content:?}");
    }
    prompt
}

#[async_trait::async_trait]
impl<P: LlmProvider> Explainer for LlmExplainer<P> {
    async fn explain(
        &self,
        kind: ExplainKind,
        context: &ExplainContext,
    ) -> Result<String, ExplainError> {
        let prompt = build_prompt(kind, context);
        let response = self
            .provider
            .complete(&[Message::user(prompt)], SYSTEM_PROMPT)
            .await?;
        Ok(response.message.content)
    }
}

/// Run the explainer under `timeout`, dropping any error.
pub async fn explain_best_effort(
    explainer: &dyn Explainer,
    kind: ExplainKind,
    context: &ExplainContext,
    timeout: Duration,
) -> Option<String> {
    let result = match tokio::time::timeout(timeout, explainer.explain(kind, context)).await {
        Ok(result) => result,
        Err(_) => Err(ExplainError::Timeout(timeout)),
    };

    match result {
        Ok(text) if !text.trim().is_empty() => Some(text.trim().to_owned()),
        Ok(_) => None,
        Err(ExplainError::Disabled) => None,
        Err(e) => {
            debug!(error = %e, path = %context.path, "explanation dropped");
            None
        },
    }
}
