// Model exports
pub mod chart;
pub mod domain;
pub mod requests;
pub mod responses;

pub use chart::{BirthChart, ChartRecord, Gana, Nadi, Nakshatra, Planet, Rashi, UnknownAttribute, Varna, VashyaGroup, Yoni};
pub use domain::{CompatibilityReport, DoshaKind, DoshaWarning, KootaName, KootaOptions, KootaResult, Points, RankedMatch, SeekerRole, Severity, Tier, KOOTA_ORDER, MAX_TOTAL_SCORE};
pub use requests::{RankCandidatesRequest, ScoreChartsRequest, ScoreProfilesRequest};
pub use responses::{ErrorResponse, HealthResponse, RankCandidatesResponse};
