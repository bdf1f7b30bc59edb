use std::fmt;

use serde::{Deserialize, Serialize};

/// A single category score. Construction is fallible so an unset field can
/// never be confused with the lowest valid score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    /// Every admissible score, in ascending order.
    pub const ALL: [Score; 5] = [Score(1), Score(2), Score(3), Score(4), Score(5)];

    pub const fn get(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("score {0} outside the valid 1-5 range")]
pub struct ScoreOutOfRange(pub u8);

impl TryFrom<u8> for Score {
    type Error = ScoreOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=5).contains(&value) {
            Ok(Score(value))
        } else {
            Err(ScoreOutOfRange(value))
        }
    }
}

impl From<Score> for u8 {
    fn from(value: Score) -> Self {
        value.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Care-setting variant deciding which unit-specific scale applies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Hospitalization,
    Psychiatric,
    Penitentiary,
    Icu,
    Isolation,
}

impl UnitType {
    pub const ALL: [UnitType; 5] = [
        UnitType::Hospitalization,
        UnitType::Psychiatric,
        UnitType::Penitentiary,
        UnitType::Icu,
        UnitType::Isolation,
    ];

    /// Stable wire key, also used by the CLI.
    pub const fn key(self) -> &'static str {
        match self {
            UnitType::Hospitalization => "hospitalization",
            UnitType::Psychiatric => "psychiatric",
            UnitType::Penitentiary => "penitentiary",
            UnitType::Icu => "icu",
            UnitType::Isolation => "isolation",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        UnitType::ALL
            .iter()
            .copied()
            .find(|unit_type| unit_type.key() == key)
    }
}

/// Unit-specific scale value tagged with the unit type it was chosen under.
/// A tag that no longer matches the selected unit type renders the selection
/// incomplete instead of silently carrying a score across scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitScaleScore {
    pub unit_type: UnitType,
    pub value: Score,
}

/// Fields a triage selection must fill before a composite score exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionField {
    Fep,
    OxygenNeed,
    VitalSignsControl,
    MedicationAndNutrition,
    UnitType,
    UnitSpecificScale,
}

impl SelectionField {
    pub const fn label(self) -> &'static str {
        match self {
            SelectionField::Fep => "F.E.P.",
            SelectionField::OxygenNeed => "Necesidad de Oxígeno",
            SelectionField::VitalSignsControl => "Control de Constantes Vitales",
            SelectionField::MedicationAndNutrition => "Medicación y Nutrición",
            SelectionField::UnitType => "Tipo de Unidad",
            SelectionField::UnitSpecificScale => "Escala Específica de Unidad",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("a unit type must be chosen before the unit-specific scale")]
    ScaleBeforeUnitType,
}

/// Working triage state built up field by field. All transitions consume the
/// value and return the next one; no field is ever defaulted to a score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageSelection {
    fep: Option<Score>,
    oxygen_need: Option<Score>,
    vital_signs_control: Option<Score>,
    medication_and_nutrition: Option<Score>,
    unit_type: Option<UnitType>,
    unit_specific_scale: Option<UnitScaleScore>,
}

impl TriageSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fep(self, score: Score) -> Self {
        Self {
            fep: Some(score),
            ..self
        }
    }

    pub fn with_oxygen_need(self, score: Score) -> Self {
        Self {
            oxygen_need: Some(score),
            ..self
        }
    }

    pub fn with_vital_signs_control(self, score: Score) -> Self {
        Self {
            vital_signs_control: Some(score),
            ..self
        }
    }

    pub fn with_medication_and_nutrition(self, score: Score) -> Self {
        Self {
            medication_and_nutrition: Some(score),
            ..self
        }
    }

    /// Choosing a different unit type drops any previously chosen scale; the
    /// five scale options are re-read from the new unit type's list.
    pub fn with_unit_type(self, unit_type: UnitType) -> Self {
        let unit_specific_scale = self
            .unit_specific_scale
            .filter(|scale| scale.unit_type == unit_type);
        Self {
            unit_type: Some(unit_type),
            unit_specific_scale,
            ..self
        }
    }

    pub fn with_unit_scale(self, value: Score) -> Result<Self, SelectionError> {
        match self.unit_type {
            Some(unit_type) => Ok(Self {
                unit_specific_scale: Some(UnitScaleScore { unit_type, value }),
                ..self
            }),
            None => Err(SelectionError::ScaleBeforeUnitType),
        }
    }

    pub fn fep(&self) -> Option<Score> {
        self.fep
    }

    pub fn oxygen_need(&self) -> Option<Score> {
        self.oxygen_need
    }

    pub fn vital_signs_control(&self) -> Option<Score> {
        self.vital_signs_control
    }

    pub fn medication_and_nutrition(&self) -> Option<Score> {
        self.medication_and_nutrition
    }

    pub fn unit_type(&self) -> Option<UnitType> {
        self.unit_type
    }

    pub fn unit_specific_scale(&self) -> Option<UnitScaleScore> {
        self.unit_specific_scale
    }

    /// Scale value counted toward the composite: present and tagged with the
    /// currently selected unit type.
    pub fn active_scale(&self) -> Option<Score> {
        let unit_type = self.unit_type?;
        self.unit_specific_scale
            .filter(|scale| scale.unit_type == unit_type)
            .map(|scale| scale.value)
    }

    pub fn missing_fields(&self) -> Vec<SelectionField> {
        let mut missing = Vec::new();
        if self.fep.is_none() {
            missing.push(SelectionField::Fep);
        }
        if self.oxygen_need.is_none() {
            missing.push(SelectionField::OxygenNeed);
        }
        if self.vital_signs_control.is_none() {
            missing.push(SelectionField::VitalSignsControl);
        }
        if self.medication_and_nutrition.is_none() {
            missing.push(SelectionField::MedicationAndNutrition);
        }
        if self.unit_type.is_none() {
            missing.push(SelectionField::UnitType);
        }
        if self.active_scale().is_none() {
            missing.push(SelectionField::UnitSpecificScale);
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.completed().is_some()
    }

    /// Extract the fully specified selection, if every field is set and the
    /// scale tag matches the current unit type.
    pub fn completed(&self) -> Option<CompletedTriage> {
        Some(CompletedTriage {
            fep: self.fep?,
            oxygen_need: self.oxygen_need?,
            vital_signs_control: self.vital_signs_control?,
            medication_and_nutrition: self.medication_and_nutrition?,
            unit_type: self.unit_type?,
            unit_specific_scale: self.active_scale()?,
        })
    }
}

/// A selection with every field present. The composite total is only defined
/// here, so partial sums can never leak out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletedTriage {
    pub fep: Score,
    pub oxygen_need: Score,
    pub vital_signs_control: Score,
    pub medication_and_nutrition: Score,
    pub unit_type: UnitType,
    pub unit_specific_scale: Score,
}

impl CompletedTriage {
    /// Sum of the five category scores; the unit type contributes no value.
    pub fn total(&self) -> u8 {
        self.fep.get()
            + self.oxygen_need.get()
            + self.vital_signs_control.get()
            + self.medication_and_nutrition.get()
            + self.unit_specific_scale.get()
    }
}
