#![warn(clippy::pedantic)]
// Allow common pedantic lints that don't affect correctness
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

//! # Cards
//!
//! Turns free-form requests into dependency-linked task cards.
//!
//! This crate provides:
//! - Task card entities (research, phone and image-generation tasks)
//! - A strict reply pipeline: JSON extraction, schema validation and
//!   dependency-graph validation
//! - A generation orchestrator with bounded exponential backoff against
//!   the upstream model, plus a demo mode that needs no credentials
//! - A deep-search agent built on the same provider abstraction
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cards::{AnthropicProvider, CardGenerator, GeneratorConfig};
//!
//! let provider = Arc::new(AnthropicProvider::from_env());
//! let generator = CardGenerator::new(provider, GeneratorConfig::default());
//!
//! let result = generator.generate_cards("Plan our EV market launch").await?;
//! for card in &result.card_data {
//!     println!("{} [{}] <- {:?}", card.title, card.task_type, card.dependencies);
//! }
//! ```

// Core entities
pub mod entities;

// Error types
pub mod errors;

// AI integration
pub mod ai;

// Reply pipeline, orchestration and agents
pub mod domain;

// Re-export key types for convenience
pub use entities::{
    AgentRequest, AgentResponse, CardStatus, GenerationMetadata, GenerationResult, TaskCard,
    TaskType,
};
pub use errors::{CardsError, CardsResult, DependencyViolation};

pub use ai::{
    AIMessage, AIProvider, AIResponse, AnthropicProvider, GenerateOptions, ServerTool, TokenUsage,
};
pub use domain::{
    parse_plan, CardGenerator, DeepSearch, DeepSearchConfig, GeneratorConfig, RetryPolicy,
};
