use serde::Serialize;

use super::catalog::TriageCatalog;
use super::domain::{Score, SelectionField, TriageSelection, UnitType};

/// One row of the transport-resource table. Band boundaries are a versioned
/// clinical constant; changing them is a data update, not a code change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceBand {
    pub min_score: u8,
    pub max_score: u8,
    pub resource_type: &'static str,
    pub crew: &'static str,
}

impl ResourceBand {
    pub const fn contains(&self, total: u8) -> bool {
        self.min_score <= total && total <= self.max_score
    }

    pub fn score_range(&self) -> String {
        format!("{}-{}", self.min_score, self.max_score)
    }
}

/// Contiguous, inclusive bands covering the whole 5-25 composite range.
pub const RESOURCE_BANDS: [ResourceBand; 4] = [
    ResourceBand {
        min_score: 5,
        max_score: 9,
        resource_type: "A - A1 o A2 Transporte",
        crew: "TES",
    },
    ResourceBand {
        min_score: 10,
        max_score: 14,
        resource_type: "B - USVB",
        crew: "2 TES",
    },
    ResourceBand {
        min_score: 15,
        max_score: 19,
        resource_type: "C - USVA.E",
        crew: "TES-ENF",
    },
    ResourceBand {
        min_score: 20,
        max_score: 25,
        resource_type: "C - USVA.M",
        crew: "TES-ENF-MED",
    },
];

/// Resolve a composite total to its transport-resource band. Totals outside
/// 5-25 have no recommendation; callers present that as an informational
/// state, not an error.
pub fn recommend(total: u8) -> Option<&'static ResourceBand> {
    RESOURCE_BANDS.iter().find(|band| band.contains(total))
}

/// Composite C.C.E.E. total, defined only once every field is set.
pub fn composite_total(selection: &TriageSelection) -> Option<u8> {
    selection.completed().map(|completed| completed.total())
}

/// Per-category contribution to the composite, labelled for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub field: SelectionField,
    pub score: Score,
    pub option_label: &'static str,
}

/// Computed total plus its breakdown and resolved recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreSummary {
    pub total: u8,
    pub unit_type: UnitType,
    pub unit_label: &'static str,
    pub components: Vec<ScoreComponent>,
    pub recommendation: Option<ResourceBand>,
}

/// Build the full summary for a selection. Returns `None` while any field is
/// unset; partial sums are never surfaced.
pub fn summarize(selection: &TriageSelection, catalog: &TriageCatalog) -> Option<ScoreSummary> {
    let completed = selection.completed()?;

    let components = vec![
        ScoreComponent {
            field: SelectionField::Fep,
            score: completed.fep,
            option_label: catalog.fep_level(completed.fep)?.label,
        },
        ScoreComponent {
            field: SelectionField::OxygenNeed,
            score: completed.oxygen_need,
            option_label: catalog.oxygen_need_option(completed.oxygen_need)?.label,
        },
        ScoreComponent {
            field: SelectionField::VitalSignsControl,
            score: completed.vital_signs_control,
            option_label: catalog
                .vital_signs_option(completed.vital_signs_control)?
                .label,
        },
        ScoreComponent {
            field: SelectionField::MedicationAndNutrition,
            score: completed.medication_and_nutrition,
            option_label: catalog
                .medication_nutrition_option(completed.medication_and_nutrition)?
                .label,
        },
        ScoreComponent {
            field: SelectionField::UnitSpecificScale,
            score: completed.unit_specific_scale,
            option_label: catalog
                .unit_scale_option(completed.unit_type, completed.unit_specific_scale)?
                .label,
        },
    ];

    let total = completed.total();

    Some(ScoreSummary {
        total,
        unit_type: completed.unit_type,
        unit_label: catalog.unit_type_option(completed.unit_type)?.label,
        components,
        recommendation: recommend(total).copied(),
    })
}
