#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! `TermPipe` LLM - chat-completion client used for edit diagnostics.
//!
//! This crate provides:
//! - The [`LlmProvider`] trait, the seam the editing tools depend on
//! - An `OpenAI`-compatible implementation (iFlow, `OpenAI`, LM Studio, vLLM, ...)
//! - [`LlmToolDefinition`], the exported shape of a built-in tool
//!
//! # Example
//!
//! ```rust,no_run
//! use termpipe_llm::{LlmProvider, OpenAiCompatProvider, ProviderConfig};
//!
//! # async fn example() -> Result<(), termpipe_llm::LlmError> {
//! let config = ProviderConfig::new("your-api-key", "qwen3-coder-plus")
//!     .base_url("https://apis.iflow.cn/v1")
//!     .max_tokens(150)
//!     .temperature(0.1);
//! let provider = OpenAiCompatProvider::from_config(&config)?;
//!
//! let answer = provider.complete_simple("Why did my edit fail?").await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

mod error;
mod openai_compat;
mod provider;
mod types;

pub use error::{LlmError, LlmResult};
pub use openai_compat::OpenAiCompatProvider;
pub use provider::{LlmProvider, ProviderConfig};
pub use types::{LlmResponse, LlmToolDefinition, Message, MessageRole, StopReason, Usage};
