//! AI integration for card generation.
//!
//! This module provides:
//! - AI provider abstraction (the upstream generation call)
//! - Anthropic Messages API implementation
//! - The planning prompt used for card generation

pub mod anthropic;
pub mod prompts;
pub mod provider;

pub use anthropic::AnthropicProvider;
pub use provider::{
    AIMessage, AIProvider, AIResponse, AIRole, GenerateOptions, ServerTool, TokenUsage,
};
