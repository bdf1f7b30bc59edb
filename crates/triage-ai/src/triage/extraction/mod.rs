mod parser;
mod prompt;

pub use prompt::extraction_prompt;

use serde::{Deserialize, Serialize};

use super::domain::{Score, TriageSelection};

/// Free-text clinical input handed to the extraction collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionInput {
    pub patient_notes: String,
    pub lab_results: String,
}

/// Best-guess scores extracted from clinical text. Every field is optional;
/// an absent field means "no suggestion", never the lowest score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSuggestions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fep: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oxygen_need: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vital_signs_control: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medication_and_nutrition: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_specific_scale: Option<Score>,
    #[serde(default)]
    pub reasoning: String,
}

impl ScoreSuggestions {
    /// Parse a raw model payload. Field-level problems (absent, fractional,
    /// or out-of-range values) degrade to "no suggestion"; only a payload
    /// that is not JSON at all is an error.
    pub fn from_model_payload(payload: &str) -> Result<Self, ExtractionError> {
        parser::parse_suggestions(payload)
    }

    pub fn is_empty(&self) -> bool {
        self.fep.is_none()
            && self.oxygen_need.is_none()
            && self.vital_signs_control.is_none()
            && self.medication_and_nutrition.is_none()
            && self.unit_specific_scale.is_none()
    }

    /// Apply the suggestions to a working selection as prefill defaults.
    ///
    /// This is the single merge point: callers invoke it exactly once per
    /// successful extraction, so a failed extraction never touches the
    /// selection. The unit-specific scale is skipped until a unit type is
    /// chosen because suggestions carry no unit type of their own. Merged
    /// values are ordinary selection values and stay overridable.
    pub fn merge_into(&self, selection: TriageSelection) -> TriageSelection {
        let mut selection = selection;
        if let Some(score) = self.fep {
            selection = selection.with_fep(score);
        }
        if let Some(score) = self.oxygen_need {
            selection = selection.with_oxygen_need(score);
        }
        if let Some(score) = self.vital_signs_control {
            selection = selection.with_vital_signs_control(score);
        }
        if let Some(score) = self.medication_and_nutrition {
            selection = selection.with_medication_and_nutrition(score);
        }
        if let Some(score) = self.unit_specific_scale {
            if let Ok(next) = selection.with_unit_scale(score) {
                selection = next;
            }
        }
        selection
    }
}

/// Clinical-text extraction backend. Transport, timeouts, and retries live
/// with the implementation; the engine only consumes the parsed result.
pub trait PatientDataExtractor: Send + Sync {
    fn extract(&self, input: &ExtractionInput) -> Result<ScoreSuggestions, ExtractionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("no extraction backend is configured")]
    Unconfigured,
    #[error("extraction transport failed: {0}")]
    Transport(String),
    #[error("model returned a payload that is not JSON: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}
