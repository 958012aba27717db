use crate::core::aggregator::aggregate;
use crate::core::chart::resolve_chart;
use crate::core::dosha::evaluate_dosha;
use crate::core::error::ScoringError;
use crate::core::kootas::KOOTA_RULES;
use crate::models::{
    BirthChart, ChartRecord, CompatibilityReport, KootaOptions, KootaResult, RankedMatch,
    SeekerRole,
};
use crate::services::ProfileStore;
use rayon::prelude::*;

/// Ashtakoot scoring entry point
///
/// # Pipeline
/// 1. Resolve both charts (records or profile ids)
/// 2. Evaluate the eight kootas independently
/// 3. Evaluate doshas
/// 4. Aggregate into a report with a tier
///
/// The first chart plays the groom, the second the bride.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    options: KootaOptions,
}

impl Scorer {
    pub fn new(options: KootaOptions) -> Self {
        Self { options }
    }

    pub fn with_default_options() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &KootaOptions {
        &self.options
    }

    /// Score two resolved charts
    pub fn score_charts(&self, a: &BirthChart, b: &BirthChart) -> CompatibilityReport {
        let kootas: Vec<KootaResult> = KOOTA_RULES
            .iter()
            .map(|(name, rule)| {
                let result = rule(a, b, &self.options);
                tracing::trace!("{:?}: {} ({})", name, result.score, result.rationale);
                result
            })
            .collect();

        let report = aggregate(kootas, evaluate_dosha(a, b));
        tracing::debug!("Scored pair: {} / 36 ({:?})", report.total_score, report.tier);
        report
    }

    /// Resolve two stored chart documents, then score them
    pub fn score_records(
        &self,
        a: &ChartRecord,
        b: &ChartRecord,
    ) -> Result<CompatibilityReport, ScoringError> {
        let chart_a = resolve_chart(a)?;
        let chart_b = resolve_chart(b)?;
        Ok(self.score_charts(&chart_a, &chart_b))
    }

    /// Look up two profiles and score them
    ///
    /// The same id twice is rejected before any lookup.
    pub async fn score_profiles<S: ProfileStore + ?Sized>(
        &self,
        store: &S,
        profile_id_a: &str,
        profile_id_b: &str,
    ) -> Result<CompatibilityReport, ScoringError> {
        if profile_id_a == profile_id_b {
            return Err(ScoringError::SelfComparison(profile_id_a.to_string()));
        }

        let chart_a = load_chart(store, profile_id_a).await?;
        let chart_b = load_chart(store, profile_id_b).await?;

        Ok(self.score_charts(&chart_a, &chart_b))
    }

    /// Score a seeker against many candidates and return the best
    ///
    /// Candidates with the seeker's own id are skipped. Results are ordered
    /// by total score, highest first, then by profile id.
    pub fn rank_candidates(
        &self,
        seeker_id: &str,
        seeker: &BirthChart,
        role: SeekerRole,
        candidates: Vec<(String, BirthChart)>,
        limit: usize,
        min_score: f64,
    ) -> Vec<RankedMatch> {
        let mut ranked: Vec<RankedMatch> = candidates
            .into_par_iter()
            .filter(|(id, _)| id != seeker_id)
            .map(|(profile_id, candidate)| {
                let report = match role {
                    SeekerRole::Groom => self.score_charts(seeker, &candidate),
                    SeekerRole::Bride => self.score_charts(&candidate, seeker),
                };
                RankedMatch { profile_id, report }
            })
            .filter(|m| m.report.total_score.as_f64() >= min_score)
            .collect();

        ranked.sort_by(|a, b| {
            b.report
                .total_score
                .cmp(&a.report.total_score)
                .then_with(|| a.profile_id.cmp(&b.profile_id))
        });
        ranked.truncate(limit);
        ranked
    }
}

/// Fetch and resolve one profile's chart
pub async fn load_chart<S: ProfileStore + ?Sized>(
    store: &S,
    profile_id: &str,
) -> Result<BirthChart, ScoringError> {
    let record = store
        .fetch_chart(profile_id)
        .await?
        .ok_or_else(|| ScoringError::MissingChartData(format!("no chart for profile {}", profile_id)))?;

    resolve_chart(&record)
}
