// src/services/normalize.rs
// DOCUMENTATION: Suggestion response normalization
// PURPOSE: Reduce raw provider suggestions to a flat, cache-safe shape

use crate::models::{FormattableText, PlacePrediction, Suggestion};

/// Flatten raw suggestions into cache-safe predictions
/// DOCUMENTATION: Unwraps each suggestion's nested prediction (wrappers
/// without one are skipped) and strips highlight-match metadata from every
/// present formattable field so the result can be serialized and replayed
/// from cache. Pure; empty or absent input yields an empty list.
pub fn flatten_suggestions(suggestions: Option<Vec<Suggestion>>) -> Vec<PlacePrediction> {
    suggestions
        .unwrap_or_default()
        .into_iter()
        .filter_map(|suggestion| suggestion.place_prediction)
        .map(flatten_prediction)
        .collect()
}

fn flatten_prediction(mut prediction: PlacePrediction) -> PlacePrediction {
    prediction.main_text = flatten_text(prediction.main_text);
    prediction.secondary_text = flatten_text(prediction.secondary_text);
    prediction.text = flatten_text(prediction.text);
    prediction
}

/// Reduce a formattable field to plain text with no matches
/// DOCUMENTATION: Absent fields stay absent; a present field with empty text
/// is left untouched.
fn flatten_text(field: Option<FormattableText>) -> Option<FormattableText> {
    field.map(|formattable| {
        if formattable.text.is_empty() {
            formattable
        } else {
            FormattableText::plain(formattable.text)
        }
    })
}
