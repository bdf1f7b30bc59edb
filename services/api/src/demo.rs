use std::sync::Arc;

use clap::Args;
use triage_ai::error::AppError;
use triage_ai::triage::{
    scoring, ExtractionInput, Score, ScoreSuggestions, ScoreSummary, TriageCatalog, TriageIntake,
    TriageSelection, TriageService, UnitType,
};

use crate::cli::ScoreArgs;
use crate::infra::{InMemoryTriageHistory, ScriptedExtractor};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Patient identifier used for the demo intake (defaults to the sentinel)
    #[arg(long)]
    pub(crate) patient_id: Option<String>,
    /// Skip the AI suggestion portion of the demo
    #[arg(long)]
    pub(crate) skip_suggestion: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        fep,
        oxygen_need,
        vital_signs,
        medication_nutrition,
        unit_type,
        unit_scale,
        json,
    } = args;

    let selection = match TriageSelection::new()
        .with_fep(fep)
        .with_oxygen_need(oxygen_need)
        .with_vital_signs_control(vital_signs)
        .with_medication_and_nutrition(medication_nutrition)
        .with_unit_type(unit_type)
        .with_unit_scale(unit_scale)
    {
        Ok(selection) => selection,
        Err(err) => {
            println!("Selection rejected: {err}");
            return Ok(());
        }
    };

    let catalog = TriageCatalog::standard();
    let Some(summary) = scoring::summarize(&selection, &catalog) else {
        println!("Selection incomplete; all five scores and a unit type are required.");
        return Ok(());
    };

    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("Summary unavailable: {err}"),
        }
        return Ok(());
    }

    render_summary(&summary);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        patient_id,
        skip_suggestion,
    } = args;

    println!("Evacuation triage demo");

    let catalog = TriageCatalog::standard();
    println!(
        "Catalog: {} F.E.P. levels, {} unit types, 5 options per category",
        catalog.fep_levels().len(),
        catalog.unit_types().len()
    );

    let extractor = Arc::new(ScriptedExtractor {
        suggestions: demo_suggestions(),
    });
    let history = Arc::new(InMemoryTriageHistory::default());
    let service = TriageService::new(history, extractor);

    let mut selection = TriageSelection::new().with_unit_type(UnitType::Icu);

    if !skip_suggestion {
        println!("\nClinical-text suggestion (scripted backend)");
        let input = ExtractionInput {
            patient_notes: "Paciente sedado, portador de SNG, nebulizaciones pautadas."
                .to_string(),
            lab_results: "Constantes monitorizadas. SOFA 13.".to_string(),
        };
        match service.suggest(&input) {
            Ok(suggestions) => {
                println!("  Reasoning: {}", suggestions.reasoning);
                selection = suggestions.merge_into(selection);
            }
            Err(err) => println!("  Suggestion unavailable ({err}); continuing manually"),
        }
    }

    // The clinician fills the remaining fields and keeps the last word.
    selection = selection.with_fep(demo_score(3));
    if selection.active_scale().is_none() {
        selection = match selection.with_unit_scale(demo_score(5)) {
            Ok(next) => next,
            Err(err) => {
                println!("Scale selection rejected: {err}");
                return Ok(());
            }
        };
    }

    let summary = match service.summarize(&selection) {
        Ok(summary) => summary,
        Err(err) => {
            println!("Summary unavailable: {err}");
            return Ok(());
        }
    };
    println!();
    render_summary(&summary);

    let record = match service.finalize(TriageIntake {
        patient_id,
        captured_image: None,
        selection,
    }) {
        Ok(record) => record,
        Err(err) => {
            println!("Intake rejected: {err}");
            return Ok(());
        }
    };
    println!(
        "\nRecorded entry {} for patient {} at {}",
        record.entry_id.0, record.patient_id, record.recorded_at
    );

    let listed = match service.history() {
        Ok(listed) => listed,
        Err(err) => {
            println!("History unavailable: {err}");
            return Ok(());
        }
    };
    println!("\nSession history ({} entries, newest first)", listed.len());
    for entry in &listed {
        let view = entry.history_view(service.catalog());
        println!(
            "- {} | {} | {} | total {} | {}",
            view.entry_id.0,
            view.patient_id,
            view.unit_label,
            view.total_score,
            view.resource_type.unwrap_or("sin recomendación")
        );
    }

    Ok(())
}

fn render_summary(summary: &ScoreSummary) {
    println!("C.C.E.E. composite for {}", summary.unit_label);
    for component in &summary.components {
        println!(
            "- {}: {} ({})",
            component.field.label(),
            component.score,
            component.option_label
        );
    }
    println!("Total: {}", summary.total);

    match &summary.recommendation {
        Some(band) => println!(
            "Recommended resource: {} | crew {} | band {}",
            band.resource_type,
            band.crew,
            band.score_range()
        ),
        None => println!("No recommendation defined for this total"),
    }
}

fn demo_score(value: u8) -> Score {
    // The demo only feeds literals from the valid range.
    Score::try_from(value).unwrap_or_else(|_| Score::ALL[0])
}

fn demo_suggestions() -> ScoreSuggestions {
    ScoreSuggestions {
        fep: None,
        oxygen_need: Some(demo_score(2)),
        vital_signs_control: Some(demo_score(4)),
        medication_and_nutrition: Some(demo_score(1)),
        unit_specific_scale: None,
        reasoning: "Nebulizaciones pautadas; constantes monitorizadas en UCI; sin tratamiento \
                    farmacológico continuo."
            .to_string(),
    }
}
