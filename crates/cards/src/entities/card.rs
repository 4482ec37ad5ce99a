//! Task card entity and related types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of work a card represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// Investigation (web research, market analysis, ...)
    ResearchTask,
    /// Calling an expert or team member about the results
    PhoneTask,
    /// Producing an image from the results
    ImageGenerationTask,
}

impl TaskType {
    /// Wire name of the variant.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ResearchTask => "research_task",
            Self::PhoneTask => "phone_task",
            Self::ImageGenerationTask => "image_generation_task",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Card status values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl std::fmt::Display for CardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Todo => write!(f, "todo"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// One unit of work in a generated plan.
///
/// `card_id` is local to the batch it was generated in; it is not a global key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskCard {
    /// Batch-local identifier (e.g. "task-1")
    pub card_id: String,

    pub title: String,

    pub description: String,

    pub task_type: TaskType,

    #[serde(default)]
    pub status: CardStatus,

    /// Type-dependent payload, left open
    #[serde(default)]
    pub parameters: Option<Map<String, Value>>,

    /// `card_id`s of prerequisite cards in the same batch
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl TaskCard {
    /// Cards without dependencies can start immediately.
    pub fn is_root(&self) -> bool {
        self.dependencies.is_empty()
    }
}

#[cfg(test)]
impl TaskCard {
    /// Create a card with no parameters and no dependencies.
    pub fn new(
        card_id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        task_type: TaskType,
    ) -> Self {
        Self {
            card_id: card_id.into(),
            title: title.into(),
            description: description.into(),
            task_type,
            status: CardStatus::Todo,
            parameters: None,
            dependencies: Vec::new(),
        }
    }

    /// Add prerequisite card ids.
    pub fn depends_on<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies.extend(ids.into_iter().map(Into::into));
        self
    }
}
