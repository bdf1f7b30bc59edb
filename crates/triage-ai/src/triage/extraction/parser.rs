use serde_json::Value;

use super::{ExtractionError, ScoreSuggestions};
use crate::triage::domain::Score;

/// Parse the model's JSON reply into suggestions. Models routinely drop
/// fields, emit integral floats, or guess outside 1-5; all of those collapse
/// to "no suggestion" instead of failing the caller.
pub(crate) fn parse_suggestions(payload: &str) -> Result<ScoreSuggestions, ExtractionError> {
    let value: Value = serde_json::from_str(payload)?;

    Ok(ScoreSuggestions {
        fep: score_field(&value, "fep"),
        oxygen_need: score_field(&value, "oxygen_need"),
        vital_signs_control: score_field(&value, "vital_signs_control"),
        medication_and_nutrition: score_field(&value, "medication_and_nutrition"),
        unit_specific_scale: score_field(&value, "unit_specific_scale"),
        reasoning: value
            .get("reasoning")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

fn score_field(value: &Value, key: &str) -> Option<Score> {
    let field = value.get(key)?;
    let raw = field.as_u64().or_else(|| {
        field
            .as_f64()
            .filter(|number| number.fract() == 0.0 && *number >= 0.0)
            .map(|number| number as u64)
    })?;

    u8::try_from(raw).ok().and_then(|raw| Score::try_from(raw).ok())
}
