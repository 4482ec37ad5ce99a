//! Core entities for card generation.

mod card;
mod generation;

pub use card::{CardStatus, TaskCard, TaskType};
pub use generation::{AgentRequest, AgentResponse, GenerationMetadata, GenerationResult};
