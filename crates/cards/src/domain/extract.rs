//! Locate the JSON object embedded in a model reply.

use crate::errors::{CardsError, CardsResult};

/// Return the span from the first `{` through the last `}` (inclusive).
///
/// This is a greedy scan: prose and code fences around the object are
/// dropped, but a reply holding several independent objects yields one
/// merged span that will fail to decode. The span is not checked for
/// well-formedness here.
pub fn extract_json(text: &str) -> CardsResult<&str> {
    let start = text.find('{').ok_or_else(|| CardsError::Extraction {
        reason: "no opening '{' in reply".to_string(),
    })?;
    let end = text.rfind('}').ok_or_else(|| CardsError::Extraction {
        reason: "no closing '}' in reply".to_string(),
    })?;

    if end < start {
        return Err(CardsError::Extraction {
            reason: "last '}' comes before first '{'".to_string(),
        });
    }

    Ok(&text[start..=end])
}
