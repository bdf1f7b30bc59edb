use std::fmt::Write;

use super::ExtractionInput;
use crate::triage::catalog::TriageCatalog;

/// Render the extraction prompt for one request, inlining the full category
/// reference so the model scores against the same definitions the form uses.
pub fn extraction_prompt(catalog: &TriageCatalog, input: &ExtractionInput) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "You are an AI assistant that extracts patient data from clinical notes and lab \
         results to pre-fill an evacuation triage form.\n\n\
         Based on the provided patient notes and lab results, suggest a score from 1-5 for \
         each category you can justify from the text:\n\n",
    );

    prompt.push_str("- fep (Facilidad de Evacuación del Paciente):\n");
    for level in catalog.fep_levels() {
        let _ = writeln!(
            prompt,
            "  {}. {}: {}",
            level.value, level.label, level.description
        );
    }

    prompt.push_str("\n- oxygen_need:\n");
    for option in catalog.oxygen_need_levels() {
        let _ = writeln!(
            prompt,
            "  {}. {}: {}",
            option.value, option.label, option.description
        );
    }

    prompt.push_str("\n- vital_signs_control:\n");
    for option in catalog.vital_signs_levels() {
        let _ = writeln!(
            prompt,
            "  {}. {}: {}",
            option.value, option.label, option.description
        );
    }

    prompt.push_str("\n- medication_and_nutrition:\n");
    for option in catalog.medication_nutrition_levels() {
        let _ = writeln!(
            prompt,
            "  {}. {}: {}",
            option.value, option.label, option.description
        );
    }

    prompt.push_str("\n- unit_specific_scale, by care setting:\n");
    for unit in catalog.unit_types() {
        let _ = writeln!(prompt, "  {}:", unit.label);
        for option in catalog.unit_scale_levels(unit.unit_type) {
            let _ = writeln!(
                prompt,
                "    {}. {}: {}",
                option.value, option.label, option.description
            );
        }
    }

    let _ = write!(
        prompt,
        "\nPatient Notes: {}\nLab Results: {}\n\n\
         Reply with a single JSON object using the category names above as keys, plus a \
         \"reasoning\" string citing the specific data points behind each score. Omit any \
         category the text does not support; never substitute a guess for missing evidence.\n",
        input.patient_notes, input.lab_results
    );

    prompt
}
