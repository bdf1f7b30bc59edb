use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{Score, UnitType};

/// Triage color code attached to each F.E.P. level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FepColor {
    Green,
    Yellow,
    Orange,
    Red,
    Blue,
}

impl FepColor {
    pub const fn label(self) -> &'static str {
        match self {
            FepColor::Green => "Verde",
            FepColor::Yellow => "Amarillo",
            FepColor::Orange => "Naranja",
            FepColor::Red => "Rojo",
            FepColor::Blue => "Azul",
        }
    }
}

/// Evacuation-difficulty level (F.E.P.), color coded for triage tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FepLevel {
    pub value: Score,
    pub color: FepColor,
    pub label: &'static str,
    pub description: &'static str,
}

/// Oxygen-need level with the projected oxygen volume an evacuation window of
/// 24 hours would consume, where the documented flow rate makes it derivable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OxygenNeedOption {
    pub value: Score,
    pub label: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projected_liters_per_24h: Option<u32>,
}

/// One selectable choice within a scoring category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    pub value: Score,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitTypeOption {
    pub unit_type: UnitType,
    pub label: &'static str,
    pub description: &'static str,
}

/// Fixed reference data for the five scoring categories. Every value 1-5
/// resolves to exactly one option per category and per unit type.
#[derive(Debug, Serialize)]
pub struct TriageCatalog {
    fep_levels: Vec<FepLevel>,
    oxygen_need: Vec<OxygenNeedOption>,
    vital_signs_control: Vec<CategoryOption>,
    medication_and_nutrition: Vec<CategoryOption>,
    unit_types: Vec<UnitTypeOption>,
    unit_scales: BTreeMap<UnitType, Vec<CategoryOption>>,
}

impl TriageCatalog {
    pub fn standard() -> Self {
        Self {
            fep_levels: fep_levels(),
            oxygen_need: oxygen_need_levels(),
            vital_signs_control: vital_signs_levels(),
            medication_and_nutrition: medication_nutrition_levels(),
            unit_types: unit_type_options(),
            unit_scales: UnitType::ALL
                .iter()
                .map(|unit_type| (*unit_type, unit_scale_levels(*unit_type)))
                .collect(),
        }
    }

    pub fn fep_levels(&self) -> &[FepLevel] {
        &self.fep_levels
    }

    pub fn oxygen_need_levels(&self) -> &[OxygenNeedOption] {
        &self.oxygen_need
    }

    pub fn vital_signs_levels(&self) -> &[CategoryOption] {
        &self.vital_signs_control
    }

    pub fn medication_nutrition_levels(&self) -> &[CategoryOption] {
        &self.medication_and_nutrition
    }

    pub fn unit_types(&self) -> &[UnitTypeOption] {
        &self.unit_types
    }

    pub fn unit_scale_levels(&self, unit_type: UnitType) -> &[CategoryOption] {
        self.unit_scales
            .get(&unit_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn fep_level(&self, score: Score) -> Option<&FepLevel> {
        self.fep_levels.iter().find(|level| level.value == score)
    }

    pub fn oxygen_need_option(&self, score: Score) -> Option<&OxygenNeedOption> {
        self.oxygen_need.iter().find(|option| option.value == score)
    }

    pub fn vital_signs_option(&self, score: Score) -> Option<&CategoryOption> {
        self.vital_signs_control
            .iter()
            .find(|option| option.value == score)
    }

    pub fn medication_nutrition_option(&self, score: Score) -> Option<&CategoryOption> {
        self.medication_and_nutrition
            .iter()
            .find(|option| option.value == score)
    }

    pub fn unit_type_option(&self, unit_type: UnitType) -> Option<&UnitTypeOption> {
        self.unit_types
            .iter()
            .find(|option| option.unit_type == unit_type)
    }

    pub fn unit_scale_option(&self, unit_type: UnitType, score: Score) -> Option<&CategoryOption> {
        self.unit_scale_levels(unit_type)
            .iter()
            .find(|option| option.value == score)
    }
}

fn options(entries: [(&'static str, &'static str); 5]) -> Vec<CategoryOption> {
    Score::ALL
        .iter()
        .copied()
        .zip(entries)
        .map(|(value, (label, description))| CategoryOption {
            value,
            label,
            description,
        })
        .collect()
}

fn fep_levels() -> Vec<FepLevel> {
    let colors = [
        FepColor::Green,
        FepColor::Yellow,
        FepColor::Orange,
        FepColor::Red,
        FepColor::Blue,
    ];
    let entries = [
        (
            "Nivel 1 - Verde",
            "Evacuación MUY FÁCIL: Puede evacuar él solo (sin ayuda de ningún tipo).",
        ),
        (
            "Nivel 2 - Amarillo",
            "Evacuación FÁCIL: Puede evacuar con POCA ayuda (de otros enfermos/residentes, familiares, etc.). Uso de bastón, muletas, andador o apoyado, a buen ritmo.",
        ),
        (
            "Nivel 3 - Naranja",
            "Evacuación COMPLICADA: Necesita ayuda. Uso de bastón, muletas, andador o apoyado, pero NO a buen ritmo, o silla de ruedas autónoma/ayudada (no personal centro).",
        ),
        (
            "Nivel 4 - Rojo",
            "Evacuación DIFÍCIL: Necesita ayuda del personal del centro (una persona).",
        ),
        (
            "Nivel 5 - Azul",
            "Evacuación MUY DIFÍCIL: Necesita ayuda y soporte del personal del centro (dos o más personas).",
        ),
    ];

    Score::ALL
        .iter()
        .copied()
        .zip(colors)
        .zip(entries)
        .map(|((value, color), (label, description))| FepLevel {
            value,
            color,
            label,
            description,
        })
        .collect()
}

// Projected volumes follow the documented flow caps: 7 l.p.m. continuous over
// 24 h for low flow, 15 l.p.m. for high flow and ventilation. Intermittent
// nebulization has no defined projection.
fn oxygen_need_levels() -> Vec<OxygenNeedOption> {
    let liters = [Some(0), None, Some(10_080), Some(21_600), Some(21_600)];
    let entries = [
        (
            "No Precisa",
            "Respiración eupneica, no requiere O2.",
        ),
        (
            "NEB Pautadas",
            "Nebulizaciones/aerosoles pautados, O2 por periodos limitados.",
        ),
        (
            "Oxígeno Bajo Caudal",
            "Aporte continuo de O2 a bajo caudal (≤7 l.p.m.).",
        ),
        (
            "Oxígeno Alto Caudal",
            "Aporte continuo de O2 a alto caudal (7-15 l.p.m.). CPAP nocturno.",
        ),
        (
            "Ventilación Mecánica",
            "VM invasiva o no invasiva permanente. Necesita respirador/Ambu.",
        ),
    ];

    Score::ALL
        .iter()
        .copied()
        .zip(liters)
        .zip(entries)
        .map(
            |((value, projected_liters_per_24h), (label, description))| OxygenNeedOption {
                value,
                label,
                description,
                projected_liters_per_24h,
            },
        )
        .collect()
}

fn vital_signs_levels() -> Vec<CategoryOption> {
    options([
        (
            "Por Turno",
            "Control de CSV básicas 1 vez/turno (c/8-10h).",
        ),
        (
            "Cada 4h o menos",
            "Medir/valorar al menos una CSV c/4h o menos.",
        ),
        (
            "Cada 2h o menos",
            "Supervisión más continua, al menos una CSV c/2h o menos.",
        ),
        (
            "Constantes Modifican Medicación",
            "Alteraciones de CSV implican cambio en tto. farmacológico.",
        ),
        (
            "Monitorización",
            "Al menos una CSV monitorizada continuamente. UCI/UVI, telemetría.",
        ),
    ])
}

fn medication_nutrition_levels() -> Vec<CategoryOption> {
    options([
        ("No Precisa", "No precisa tto. médico/farmacológico."),
        (
            "Sólo Vía Oral",
            "Solo medicamentos vía oral (excluye SNG).",
        ),
        (
            "SNG / IV. Puntual",
            "Alimentación/medicación por SNG o IV puntual (bolo/sueros).",
        ),
        (
            "Sueroterapia / Nutri. Enteral",
            "Sueros 24h o nutrición enteral (caída libre/bomba).",
        ),
        (
            "Bomba Perfusión / Nutri. Parenteral",
            "Medicación IV/sueros por bomba perfusión. Nutrición parenteral.",
        ),
    ])
}

fn unit_type_options() -> Vec<UnitTypeOption> {
    vec![
        UnitTypeOption {
            unit_type: UnitType::Hospitalization,
            label: "Hospitalización / Residencia Mayores",
            description: "Unidad de hospitalización general o residencia de mayores.",
        },
        UnitTypeOption {
            unit_type: UnitType::Psychiatric,
            label: "Psiquiátrica",
            description: "Unidad de atención psiquiátrica.",
        },
        UnitTypeOption {
            unit_type: UnitType::Penitentiary,
            label: "Penitenciaria",
            description: "Unidad en centro penitenciario.",
        },
        UnitTypeOption {
            unit_type: UnitType::Icu,
            label: "UCI / UVI",
            description: "Unidad de Cuidados Intensivos o Vigilancia Intensiva.",
        },
        UnitTypeOption {
            unit_type: UnitType::Isolation,
            label: "Aislamiento / NRBQ",
            description: "Unidad de aislamiento o pacientes expuestos a NRBQ.",
        },
    ]
}

fn unit_scale_levels(unit_type: UnitType) -> Vec<CategoryOption> {
    match unit_type {
        UnitType::Hospitalization => options([
            (
                "I.A.B.V.D",
                "Independiente para actividades básicas de la vida diaria.",
            ),
            (
                "I.A.B.V.D con Ayuda",
                "Independiente para A.B.V.D. pero necesita ayuda para ciertas acciones (movilidad).",
            ),
            ("D.A.B.V.D", "Totalmente dependiente para A.B.V.D."),
            (
                "Contención Farmacológica",
                "Precisa tto. de contención farmacológica (parcial/total).",
            ),
            (
                "Contención Mecánica",
                "Contenido mecánicamente (cintura, MMSS, MMII).",
            ),
        ]),
        UnitType::Psychiatric => options([
            (
                "Autónomo",
                "No precisa vigilancia/supervisión especial. Colabora, sin riesgo de fuga.",
            ),
            (
                "Necesita Supervisión",
                "Necesita ser supervisado, guiado, controlado. Colabora con mínimo control.",
            ),
            (
                "Peligro de Fuga",
                "Debe ser controlado por riesgo de escaparse.",
            ),
            (
                "Contención Farmacológica",
                "Precisa tto. de contención farmacológica (parcial/total).",
            ),
            (
                "Contención Mecánica",
                "Contenido mecánicamente (cintura, MMSS, MMII, grilletes).",
            ),
        ]),
        UnitType::Penitentiary => options([
            (
                "Sin Grilletes",
                "Colabora, no precisa vigilancia/grilletes.",
            ),
            (
                "Grilletes por Delante",
                "Mínimo riesgo, engrilletado por delante. Necesita vigilancia FFCCSS/Seg. Privada.",
            ),
            (
                "Grilletes por Detrás",
                "Precisa vigilancia directa de al menos un agente.",
            ),
            (
                "Reo Peligroso",
                "Presencia y vigilancia policial permanente o seg. privada (2 vigilantes).",
            ),
            (
                "Reo Muy Peligroso",
                "Alto riesgo de fuga, comportamiento violento. Férreo control policial (agente armado).",
            ),
        ]),
        UnitType::Icu => options([
            ("SOFA 0-1", "Pacientes UCI/UVI/Rea sin riesgo de complicación."),
            ("SOFA 2-5", "Limitado riesgo de complicación."),
            (
                "SOFA 6-8",
                "Alto riesgo de complicación, mucha necesidad de cuidados.",
            ),
            (
                "SOFA 9-11",
                "Muy alto riesgo de complicaciones, numerosos cuidados.",
            ),
            (
                "SOFA >12",
                "Tolera muy mal ser movilizado, alto riesgo de muerte.",
            ),
        ]),
        UnitType::Isolation => options([
            ("Sin Aislamiento", "No necesidad de aislamiento (ni inverso)."),
            (
                "Aislamiento Básico",
                "Nivel básico de aislamiento de contacto o inverso. EPI: protección parcial (PB) o trajes tipo 6, FFP3, guantes, gafas.",
            ),
            (
                "NRBQ Nivel I EPI",
                "EPI Nivel I (Trajes tipo 3,4,5,6), máscaras/semimáscaras FFP3, guantes, gafas antisalpicadura.",
            ),
            (
                "NRBQ Nivel II EPI",
                "EPI Nivel II (Traje tipo 2 escafandra/buzo), botas/guantes sellados, E.R.A.",
            ),
            (
                "NRBQ Nivel III EPI",
                "EPI Nivel III (Traje tipo 1 integral), botas/guantes sellados, E.R.A.",
            ),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_exposes_five_ordered_options() {
        let catalog = TriageCatalog::standard();

        assert_eq!(catalog.fep_levels().len(), 5);
        assert_eq!(catalog.oxygen_need_levels().len(), 5);
        assert_eq!(catalog.vital_signs_levels().len(), 5);
        assert_eq!(catalog.medication_nutrition_levels().len(), 5);
        assert_eq!(catalog.unit_types().len(), 5);

        for unit_type in UnitType::ALL {
            let scale = catalog.unit_scale_levels(unit_type);
            assert_eq!(scale.len(), 5, "scale for {:?}", unit_type);
            for (index, option) in scale.iter().enumerate() {
                assert_eq!(option.value.get() as usize, index + 1);
            }
        }
    }

    #[test]
    fn every_score_resolves_to_exactly_one_option() {
        let catalog = TriageCatalog::standard();

        for score in Score::ALL {
            assert!(catalog.fep_level(score).is_some());
            assert!(catalog.oxygen_need_option(score).is_some());
            assert!(catalog.vital_signs_option(score).is_some());
            assert!(catalog.medication_nutrition_option(score).is_some());
            for unit_type in UnitType::ALL {
                assert!(catalog.unit_scale_option(unit_type, score).is_some());
            }
        }
    }

    #[test]
    fn fep_levels_carry_their_triage_colors() {
        let catalog = TriageCatalog::standard();
        let colors: Vec<FepColor> = catalog.fep_levels().iter().map(|level| level.color).collect();
        assert_eq!(
            colors,
            vec![
                FepColor::Green,
                FepColor::Yellow,
                FepColor::Orange,
                FepColor::Red,
                FepColor::Blue
            ]
        );
        assert_eq!(FepColor::Blue.label(), "Azul");
    }

    #[test]
    fn oxygen_projection_follows_documented_flow_caps() {
        let catalog = TriageCatalog::standard();
        let projections: Vec<Option<u32>> = catalog
            .oxygen_need_levels()
            .iter()
            .map(|option| option.projected_liters_per_24h)
            .collect();
        assert_eq!(
            projections,
            vec![Some(0), None, Some(10_080), Some(21_600), Some(21_600)]
        );
    }

    #[test]
    fn unit_scales_differ_between_unit_types() {
        let catalog = TriageCatalog::standard();
        let icu_labels: Vec<&str> = catalog
            .unit_scale_levels(UnitType::Icu)
            .iter()
            .map(|option| option.label)
            .collect();
        let psychiatric_labels: Vec<&str> = catalog
            .unit_scale_levels(UnitType::Psychiatric)
            .iter()
            .map(|option| option.label)
            .collect();
        assert_ne!(icu_labels, psychiatric_labels);
        assert!(icu_labels.iter().all(|label| label.starts_with("SOFA")));
    }
}
