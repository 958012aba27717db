use crate::models::{BirthChart, DoshaKind, DoshaWarning, Severity};

/// Evaluate doshas that sit outside the 36-point total
///
/// Only Manglik is checked. A warning is emitted when at least one party is
/// Manglik; when both are, the dosha cancels and severity drops to `None`.
/// Warnings are advisory and never change the score.
pub fn evaluate_dosha(a: &BirthChart, b: &BirthChart) -> Vec<DoshaWarning> {
    let warning = match (a.is_manglik, b.is_manglik) {
        (false, false) => return Vec::new(),
        (true, true) => DoshaWarning {
            kind: DoshaKind::Manglik,
            present: true,
            severity: Severity::None,
            note: "Both charts are Manglik; mutual cancellation applies".to_string(),
        },
        (true, false) | (false, true) => {
            let who = if a.is_manglik { "first" } else { "second" };
            DoshaWarning {
                kind: DoshaKind::Manglik,
                present: true,
                severity: Severity::Full,
                note: format!("Only the {} chart is Manglik; remedial review advised", who),
            }
        }
    };

    vec![warning]
}
