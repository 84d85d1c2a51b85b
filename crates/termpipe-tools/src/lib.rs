#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Surgical line-editing tools for AI agents.
//!
//! Edits address files by 0-based line number and half-open ranges, and
//! failures come back with enough context (actual line content, where the
//! text really is, similar lines) for the caller to retry without re-reading
//! the file.

mod append_file;
mod args;
mod create_directory;
mod delete_lines;
pub mod engine;
pub mod explain;
mod find_in_file;
mod get_file_info;
mod glob_files;
mod insert_lines;
mod list_directory;
mod move_file;
mod read_file;
mod read_lines;
mod read_multiple_files;
mod replace_at_line;
mod replace_lines;
mod search_file_content;
mod smart_replace;
mod truncate;
mod walk;
mod write_file;

pub use append_file::AppendFileTool;
pub use create_directory::CreateDirectoryTool;
pub use delete_lines::DeleteLinesTool;
pub use engine::{EditErrorKind, EditFailure, EditSuccess, LineEditor};
pub use explain::{
    ExplainContext, ExplainError, ExplainKind, Explainer, LlmExplainer, NoopExplainer,
    explain_best_effort,
};
pub use find_in_file::FindInFileTool;
pub use get_file_info::GetFileInfoTool;
pub use glob_files::GlobFilesTool;
pub use insert_lines::InsertLinesTool;
pub use list_directory::ListDirectoryTool;
pub use move_file::MoveFileTool;
pub use read_file::ReadFileTool;
pub use read_lines::ReadLinesTool;
pub use read_multiple_files::ReadMultipleFilesTool;
pub use replace_at_line::ReplaceAtLineTool;
pub use replace_lines::ReplaceLinesTool;
pub use search_file_content::SearchFileContentTool;
pub use smart_replace::SmartReplaceTool;
pub use truncate::{truncate_chars, truncate_output};
pub use write_file::WriteFileTool;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use termpipe_llm::LlmToolDefinition;
use tokio::sync::RwLock;
use tracing::debug;

/// Default maximum output size in characters before truncation.
pub const MAX_OUTPUT_CHARS: usize = 30_000;

/// Tool calls kept in the per-context history.
pub const HISTORY_CAPACITY: usize = 1000;

/// Default time allowed for an explanation.
pub const DEFAULT_EXPLAIN_TIMEOUT: Duration = Duration::from_secs(8);

/// A built-in tool that executes directly in-process.
#[async_trait::async_trait]
pub trait BuiltinTool: Send + Sync {
    /// Tool name.
    fn name(&self) -> &'static str;

    /// Human-readable description for the LLM.
    fn description(&self) -> &'static str;

    /// JSON schema for tool input parameters.
    fn input_schema(&self) -> Value;

    /// Execute the tool with the given arguments.
    async fn execute(&self, args: Value, ctx: &ToolContext) -> ToolResult;
}

/// One entry in the tool-call history.
#[derive(Debug, Clone, Serialize)]
pub struct CallRecord {
    /// Tool name.
    pub tool: String,
    /// Arguments as received.
    pub arguments: Value,
    /// Whether the call returned `Ok`.
    pub success: bool,
    /// When the call finished.
    pub timestamp: DateTime<Utc>,
    /// Wall time spent in the tool.
    pub duration_ms: u64,
}

/// Shared context available to all built-in tools.
pub struct ToolContext {
    /// Base for relative paths.
    pub workspace_root: PathBuf,
    /// Matching and diff settings for edits.
    pub editor: LineEditor,
    explainer: Arc<dyn Explainer>,
    explain_timeout: Duration,
    max_output_chars: usize,
    history: RwLock<VecDeque<CallRecord>>,
}

impl ToolContext {
    /// Create a context with default settings and no explainer.
    #[must_use]
    pub fn new(workspace_root: PathBuf) -> Self {
        Self {
            workspace_root,
            editor: LineEditor::default(),
            explainer: Arc::new(NoopExplainer),
            explain_timeout: DEFAULT_EXPLAIN_TIMEOUT,
            max_output_chars: MAX_OUTPUT_CHARS,
            history: RwLock::new(VecDeque::new()),
        }
    }

    /// Use `explainer` for failed edits, bounded by `timeout`.
    #[must_use]
    pub fn with_explainer(mut self, explainer: Arc<dyn Explainer>, timeout: Duration) -> Self {
        self.explainer = explainer;
        self.explain_timeout = timeout;
        self
    }

    /// Replace the editor settings.
    #[must_use]
    pub fn with_editor(mut self, editor: LineEditor) -> Self {
        self.editor = editor;
        self
    }

    /// Change the output truncation limit.
    #[must_use]
    pub fn with_max_output_chars(mut self, max_chars: usize) -> Self {
        self.max_output_chars = max_chars;
        self
    }

    /// Output truncation limit in characters.
    #[must_use]
    pub fn max_output_chars(&self) -> usize {
        self.max_output_chars
    }

    /// Resolve a tool path argument: `~` expands, relative paths join the workspace root.
    #[must_use]
    pub fn resolve_path(&self, raw: &str) -> PathBuf {
        engine::storage::resolve_path(raw, &self.workspace_root)
    }

    /// Attach a best-effort explanation and convert to a tool error.
    pub async fn explained(&self, mut failure: EditFailure) -> ToolError {
        if let Some((kind, context)) = ExplainContext::from_failure(&failure) {
            failure.diagnostics.explanation =
                explain_best_effort(self.explainer.as_ref(), kind, &context, self.explain_timeout)
                    .await;
        }
        ToolError::Edit(Box::new(failure))
    }

    /// Run an engine operation on the blocking pool, explaining any failure.
    ///
    /// # Errors
    ///
    /// The explained edit failure, or `ExecutionFailed` if the task died.
    pub async fn edit<T, F>(&self, op: F) -> Result<T, ToolError>
    where
        T: Send + 'static,
        F: FnOnce(&LineEditor) -> Result<T, EditFailure> + Send + 'static,
    {
        let editor = self.editor.clone();
        match tokio::task::spawn_blocking(move || op(&editor)).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(failure)) => Err(self.explained(failure).await),
            Err(e) => Err(ToolError::ExecutionFailed(format!("edit task failed: {e}"))),
        }
    }

    /// Append to the call history, dropping the oldest entry at capacity.
    pub async fn record_call(&self, record: CallRecord) {
        let mut history = self.history.write().await;
        while history.len() >= HISTORY_CAPACITY {
            history.pop_front();
        }
        history.push_back(record);
    }

    /// The `n` most recent calls, oldest first.
    pub async fn recent_calls(&self, n: usize) -> Vec<CallRecord> {
        let history = self.history.read().await;
        let skip = history.len().saturating_sub(n);
        history.iter().skip(skip).cloned().collect()
    }
}

/// Tool execution errors.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid arguments.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// No tool with this name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Execution failed.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// Path not found.
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// An edit was rejected; renders the full diagnostic report.
    #[error("{}", .0.report())]
    Edit(Box<EditFailure>),
}

impl From<EditFailure> for ToolError {
    fn from(failure: EditFailure) -> Self {
        Self::Edit(Box::new(failure))
    }
}

impl ToolError {
    /// The edit failure, if this is one.
    #[must_use]
    pub fn as_edit(&self) -> Option<&EditFailure> {
        match self {
            Self::Edit(failure) => Some(&**failure),
            _ => None,
        }
    }
}

/// Result type for tool execution.
pub type ToolResult = Result<String, ToolError>;

/// Run blocking filesystem work on the blocking pool.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T, ToolError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ToolError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ToolError::ExecutionFailed(format!("blocking task failed: {e}")))?
}

/// Registry of built-in tools for lookup and LLM definition export.
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn BuiltinTool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Create a registry with all default tools registered.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ReadLinesTool));
        registry.register(Box::new(InsertLinesTool));
        registry.register(Box::new(DeleteLinesTool));
        registry.register(Box::new(ReplaceLinesTool));
        registry.register(Box::new(ReplaceAtLineTool));
        registry.register(Box::new(SmartReplaceTool));
        registry.register(Box::new(FindInFileTool));
        registry.register(Box::new(ReadFileTool));
        registry.register(Box::new(ReadMultipleFilesTool));
        registry.register(Box::new(WriteFileTool));
        registry.register(Box::new(AppendFileTool));
        registry.register(Box::new(ListDirectoryTool));
        registry.register(Box::new(GlobFilesTool));
        registry.register(Box::new(SearchFileContentTool));
        registry.register(Box::new(GetFileInfoTool));
        registry.register(Box::new(MoveFileTool));
        registry.register(Box::new(CreateDirectoryTool));
        registry
    }

    /// Register a tool.
    pub fn register(&mut self, tool: Box<dyn BuiltinTool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn BuiltinTool> {
        self.tools.get(name).map(AsRef::as_ref)
    }

    /// Registered tool names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Export all tool definitions for the LLM, sorted by name.
    #[must_use]
    pub fn all_definitions(&self) -> Vec<LlmToolDefinition> {
        let mut defs: Vec<LlmToolDefinition> = self
            .tools
            .values()
            .map(|t| {
                LlmToolDefinition::new(t.name())
                    .with_description(t.description())
                    .with_schema(t.input_schema())
            })
            .collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Run a tool by name, record the call, and truncate its output.
    ///
    /// # Errors
    ///
    /// [`ToolError::UnknownTool`] for an unregistered name, otherwise
    /// whatever the tool returns.
    pub async fn execute(&self, name: &str, args: Value, ctx: &ToolContext) -> ToolResult {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_owned()))?;

        debug!(tool = name, "executing tool");
        let started = Instant::now();
        let result = tool.execute(args.clone(), ctx).await;
        let elapsed = started.elapsed();

        ctx.record_call(CallRecord {
            tool: name.to_owned(),
            arguments: args,
            success: result.is_ok(),
            timestamp: Utc::now(),
            duration_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        })
        .await;

        match &result {
            Ok(_) => debug!(tool = name, elapsed_ms = elapsed.as_millis(), "tool succeeded"),
            Err(e) => debug!(tool = name, error = %first_line(&e.to_string()), "tool failed"),
        }

        result.map(|output| truncate_output(output, ctx.max_output_chars))
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or_default()
}
