//! Domain logic for card generation.
//!
//! The reply pipeline runs in strict order, with no partial acceptance:
//! extract → schema → dependency graph.

pub mod extract;
pub mod generator;
pub mod graph;
pub mod retry;
pub mod schema;
pub mod search;

pub use extract::extract_json;
pub use generator::{demo_batch, CardGenerator, GeneratorConfig};
pub use graph::{dependency_order, find_cycles, validate_dependencies};
pub use retry::{Attempted, RetryPolicy};
pub use schema::{decode_batch, decode_reply, validate_cards};
pub use search::{DeepSearch, DeepSearchConfig};

use crate::entities::TaskCard;
use crate::errors::CardsResult;

/// Decode a raw model reply into a validated card batch.
pub fn parse_plan(text: &str) -> CardsResult<Vec<TaskCard>> {
    let cards = decode_reply(text)?;
    validate_dependencies(&cards)?;
    Ok(cards)
}

/// Per-process identity of an agent, e.g. `new-card-func-1a2b3c4d`.
pub(crate) fn agent_id(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &id[..8])
}

/// First 70 characters of a prompt, for log lines.
pub(crate) fn preview(prompt: &str) -> String {
    const LIMIT: usize = 70;
    if prompt.chars().count() <= LIMIT {
        prompt.to_string()
    } else {
        let head: String = prompt.chars().take(LIMIT).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plan_runs_every_stage() {
        let missing_dep = r#"{"cards": [{"card_id": "task-2", "title": "Call", "description": "d",
            "task_type": "phone_task", "dependencies": ["task-99"]}]}"#;
        assert!(matches!(
            parse_plan(missing_dep),
            Err(crate::CardsError::Dependency(_))
        ));
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview("short"), "short");
        let long = "x".repeat(100);
        assert_eq!(preview(&long).len(), 73);
    }

    #[test]
    fn test_agent_ids_are_unique() {
        assert_ne!(agent_id("a"), agent_id("a"));
    }
}
