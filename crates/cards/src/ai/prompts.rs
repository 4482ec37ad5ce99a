//! Prompts sent to the upstream model.

/// Planning policy for card generation.
///
/// Asks for a single JSON object with a `cards` list whose entries carry
/// batch-local ids and dependency edges between them.
pub const CARD_PLANNER_SYSTEM_PROMPT: &str = r#"You are an expert project manager. Analyze the user's request and break it down into a series of logical, actionable task cards linked by dependencies.

Respond with a single JSON object with one key, "cards", holding a list of task card objects.

For EACH card in the list:
1. Assign a unique `card_id` string ("task-1", "task-2", ...). The id is temporary and only meaningful inside this response.
2. Fill in `title` and `description`.
3. Pick the `task_type`:
   - `research_task` for investigation,
   - `phone_task` for calling experts or team members to tell them about the results,
   - `image_generation_task` when an image of the results would help or the user asked for one.
4. Set `status` to "todo".
5. For any card that needs another card to finish first, put the prerequisite's `card_id` in its `dependencies` list. The first task(s) have an empty `dependencies` list.

Create at most one research task.

Example of the expected output:
```json
{
  "cards": [
    {
      "card_id": "task-1",
      "title": "Research German EV Market",
      "description": "Analyze the German market for electric vehicles.",
      "task_type": "research_task",
      "status": "todo",
      "parameters": { "topics": ["market size", "key players"], "scope": "Market Analysis" },
      "dependencies": []
    },
    {
      "card_id": "task-2",
      "title": "Call Supervisor",
      "description": "Tell the supervisor about the market research results.",
      "task_type": "phone_task",
      "status": "todo",
      "parameters": null,
      "dependencies": ["task-1"]
    },
    {
      "card_id": "task-3",
      "title": "Create Marketing Poster",
      "description": "Generate a sleek, futuristic poster for electric vehicles in Germany: a modern EV on a road with wind turbines behind it, blue and green palette, text 'The Future is Electric'.",
      "task_type": "image_generation_task",
      "status": "todo",
      "parameters": null,
      "dependencies": ["task-1"]
    }
  ]
}
```"#;

/// Appended to every deep-search prompt to bound the answer length.
pub const DEEP_SEARCH_SUFFIX: &str = "\n\nThe final answer should be less then 50 sentences.";

/// Build the prompt actually sent to the deep-search model.
pub fn deep_search_prompt(prompt: &str) -> String {
    format!("{prompt}{DEEP_SEARCH_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{decode_reply, validate_dependencies};

    #[test]
    fn test_prompt_example_is_a_valid_batch() {
        let cards = decode_reply(CARD_PLANNER_SYSTEM_PROMPT).unwrap();
        assert_eq!(cards.len(), 3);
        validate_dependencies(&cards).unwrap();
    }

    #[test]
    fn test_deep_search_prompt() {
        let prompt = deep_search_prompt("EV market");
        assert!(prompt.starts_with("EV market"));
        assert!(prompt.ends_with("less then 50 sentences."));
    }
}
