//! Card schema validation.
//!
//! Turns the untyped JSON of a model reply into [`TaskCard`]s. A single bad
//! record rejects the whole batch.

use serde_json::Value;

use crate::entities::TaskCard;
use crate::errors::{CardsError, CardsResult};

use super::extract::extract_json;

/// Validate untyped card records, aborting on the first bad one.
pub fn validate_cards(records: &[Value]) -> CardsResult<Vec<TaskCard>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| validate_card(index, record))
        .collect()
}

fn validate_card(index: usize, record: &Value) -> CardsResult<TaskCard> {
    serde_json::from_value(record.clone()).map_err(|e| CardsError::SchemaValidation {
        index: Some(index),
        card_id: record
            .get("card_id")
            .and_then(Value::as_str)
            .map(str::to_string),
        reason: e.to_string(),
    })
}

/// Decode the `{"cards": [...]}` envelope and validate every card.
///
/// An envelope carrying an `"error"` key is the model refusing the request;
/// its value is surfaced as the failure reason.
pub fn decode_batch(json_text: &str) -> CardsResult<Vec<TaskCard>> {
    let value: Value = serde_json::from_str(json_text)
        .map_err(|e| CardsError::schema(format!("response is not valid JSON: {e}")))?;

    let Value::Object(envelope) = value else {
        return Err(CardsError::schema("response is not a JSON object"));
    };

    if let Some(error) = envelope.get("error") {
        let reason = error
            .as_str()
            .map_or_else(|| error.to_string(), str::to_string);
        return Err(CardsError::schema(reason));
    }

    let records = envelope
        .get("cards")
        .and_then(Value::as_array)
        .ok_or_else(|| CardsError::schema("AI response is missing the 'cards' list."))?;

    validate_cards(records)
}

/// Extract and decode a raw model reply.
pub fn decode_reply(text: &str) -> CardsResult<Vec<TaskCard>> {
    decode_batch(extract_json(text)?)
}
