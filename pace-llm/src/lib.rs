//! LLM provider clients for the dashboard chat.
//!
//! Pure HTTP clients over reqwest. The conversation driver only sees the
//! provider-agnostic [`ChatProvider`] trait and the shared message/tool
//! model; translating the tool catalog into each provider's
//! function-calling encoding happens entirely inside this crate.

mod anthropic;
mod client;
mod error;
mod openai;
mod types;

pub use client::{ChatProvider, LlmClient, Provider, validate_tool_name};
pub use error::{LlmError, Result};
pub use types::{ChatMessage, ChatResponse, Role, ToolCall, ToolDefinition, Usage};
