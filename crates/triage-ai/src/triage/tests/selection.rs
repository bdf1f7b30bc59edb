use super::common::*;
use crate::triage::domain::{SelectionField, TriageSelection, UnitType};
use crate::triage::scoring::composite_total;

fn selection_from_mask(mask: u32) -> TriageSelection {
    let mut selection = TriageSelection::new().with_unit_type(UnitType::Hospitalization);
    if mask & 1 != 0 {
        selection = selection.with_fep(score(1));
    }
    if mask & 2 != 0 {
        selection = selection.with_oxygen_need(score(2));
    }
    if mask & 4 != 0 {
        selection = selection.with_vital_signs_control(score(3));
    }
    if mask & 8 != 0 {
        selection = selection.with_medication_and_nutrition(score(4));
    }
    if mask & 16 != 0 {
        selection = selection
            .with_unit_scale(score(5))
            .expect("unit type chosen");
    }
    selection
}

#[test]
fn every_partial_combination_yields_no_total() {
    for mask in 0u32..31 {
        let selection = selection_from_mask(mask);
        assert_eq!(composite_total(&selection), None, "mask {mask:05b}");
        assert!(!selection.is_complete(), "mask {mask:05b}");
        assert!(!selection.missing_fields().is_empty(), "mask {mask:05b}");
    }
}

#[test]
fn the_full_combination_yields_the_exact_sum() {
    let selection = selection_from_mask(31);
    assert_eq!(composite_total(&selection), Some(1 + 2 + 3 + 4 + 5));
}

#[test]
fn missing_unit_type_blocks_completion_even_with_all_scores() {
    let selection = TriageSelection::new()
        .with_fep(score(1))
        .with_oxygen_need(score(1))
        .with_vital_signs_control(score(1))
        .with_medication_and_nutrition(score(1));

    assert_eq!(composite_total(&selection), None);
    let missing = selection.missing_fields();
    assert!(missing.contains(&SelectionField::UnitType));
    assert!(missing.contains(&SelectionField::UnitSpecificScale));
}

#[test]
fn unit_type_change_invalidates_a_previously_complete_selection() {
    let selection = completed_selection();
    assert_eq!(composite_total(&selection), Some(15));

    let switched = selection.with_unit_type(UnitType::Isolation);
    assert_eq!(composite_total(&switched), None);
    assert_eq!(
        switched.missing_fields(),
        vec![SelectionField::UnitSpecificScale]
    );

    let recompleted = switched
        .with_unit_scale(score(2))
        .expect("unit type chosen");
    assert_eq!(composite_total(&recompleted), Some(12));
}

#[test]
fn transitions_do_not_disturb_unrelated_fields() {
    let selection = completed_selection().with_oxygen_need(score(5));
    assert_eq!(selection.fep(), Some(score(3)));
    assert_eq!(selection.oxygen_need(), Some(score(5)));
    assert_eq!(selection.unit_type(), Some(UnitType::Icu));
    assert_eq!(composite_total(&selection), Some(18));
}
