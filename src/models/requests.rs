use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::chart::ChartRecord;
use crate::models::domain::SeekerRole;

/// Request to score two stored profiles
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScoreProfilesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "profile_id_a", rename = "profileIdA")]
    pub profile_id_a: String,
    #[validate(length(min = 1))]
    #[serde(alias = "profile_id_b", rename = "profileIdB")]
    pub profile_id_b: String,
}

/// Request to score two charts supplied inline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreChartsRequest {
    #[serde(alias = "chart_a", rename = "chartA")]
    pub chart_a: ChartRecord,
    #[serde(alias = "chart_b", rename = "chartB")]
    pub chart_b: ChartRecord,
}

/// Request to rank candidate profiles against one seeker
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankCandidatesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "profile_id", rename = "profileId")]
    pub profile_id: String,
    #[serde(default)]
    pub role: SeekerRole,
    #[validate(length(min = 1))]
    #[serde(alias = "candidate_ids", rename = "candidateIds")]
    pub candidate_ids: Vec<String>,
    #[serde(default = "default_limit")]
    pub limit: u16,
    #[validate(range(min = 0.0, max = 36.0))]
    #[serde(default, alias = "min_score", rename = "minScore")]
    pub min_score: f64,
}

fn default_limit() -> u16 {
    20
}
