use crate::models::{CompatibilityReport, DoshaWarning, KootaResult, Points, Tier, MAX_TOTAL_SCORE};

/// Inclusive whole-point ranges for each tier
const TIER_TABLE: [(u8, u8, Tier); 4] = [
    (0, 17, Tier::NotRecommended),
    (18, 24, Tier::Average),
    (25, 32, Tier::Good),
    (33, MAX_TOTAL_SCORE, Tier::Excellent),
];

/// Classify a total into its tier
///
/// A half-point total is classified by its whole part, so 17.5 is still
/// Not Recommended.
pub fn classify(total: Points) -> Tier {
    let whole = total.whole_part();
    TIER_TABLE
        .iter()
        .find(|(low, high, _)| (*low..=*high).contains(&whole))
        .map(|(_, _, tier)| *tier)
        .unwrap_or(Tier::Excellent)
}

/// Sum the koota scores and build the final report
pub fn aggregate(kootas: Vec<KootaResult>, dosha_warnings: Vec<DoshaWarning>) -> CompatibilityReport {
    let total_score: Points = kootas.iter().map(|k| k.score).sum();
    let max_score = kootas.iter().map(|k| k.max_score).sum();

    CompatibilityReport {
        tier: classify(total_score),
        kootas,
        total_score,
        max_score,
        dosha_warnings,
    }
}
