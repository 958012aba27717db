use actix_web::{http::header, web, HttpRequest, HttpResponse, Responder};
use validator::Validate;
use crate::core::{load_chart, Scorer, ScoringError};
use crate::models::{
    BirthChart, ErrorResponse, HealthResponse, RankCandidatesRequest, RankCandidatesResponse,
    ScoreChartsRequest, ScoreProfilesRequest,
};
use crate::services::{Claims, JwtVerifier, ProfileStore};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
    pub auth: Arc<JwtVerifier>,
    pub scorer: Scorer,
    pub max_rank_candidates: usize,
    pub max_rank_limit: usize,
    pub rank_fetch_concurrency: usize,
}

/// Configure all compatibility routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/compatibility/profiles", web::post().to(score_profiles))
        .route("/compatibility/charts", web::post().to(score_charts))
        .route("/compatibility/rank", web::post().to(rank_candidates));
}

fn error_body(status: u16, error: &str, message: impl ToString) -> ErrorResponse {
    ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: status,
    }
}

/// Map a scoring failure to its HTTP response
pub fn scoring_error_response(err: &ScoringError) -> HttpResponse {
    let body = |status| error_body(status, err.code(), err);
    match err {
        ScoringError::MissingChartData(_) => HttpResponse::NotFound().json(body(404)),
        ScoringError::SelfComparison(_) => HttpResponse::BadRequest().json(body(400)),
        ScoringError::InvalidAttribute { .. } => HttpResponse::InternalServerError().json(body(500)),
        ScoringError::Store(_) => HttpResponse::BadGateway().json(body(502)),
    }
}

fn authorize(state: &AppState, req: &HttpRequest) -> Result<Claims, HttpResponse> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    state.auth.verify_header(header).map_err(|e| {
        tracing::info!("Rejected request on {}: {}", req.path(), e);
        HttpResponse::Unauthorized().json(error_body(401, "unauthorized", e))
    })
}

/// Load candidate charts concurrently, at most `concurrency` at a time
///
/// The seeker and repeated ids are dropped, and candidates that fail to
/// load are skipped. The result keeps request order.
async fn fetch_candidates(
    store: &Arc<dyn ProfileStore>,
    seeker_id: &str,
    candidate_ids: &[String],
    concurrency: usize,
) -> Vec<(String, BirthChart)> {
    let mut seen = HashSet::new();
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for (index, id) in candidate_ids
        .iter()
        .filter(|id| id.as_str() != seeker_id && seen.insert(id.as_str()))
        .enumerate()
    {
        let store = Arc::clone(store);
        let permits = Arc::clone(&permits);
        let id = id.clone();

        tasks.spawn(async move {
            let _permit = permits.acquire_owned().await;
            let chart = load_chart(store.as_ref(), &id).await;
            (index, id, chart)
        });
    }

    let mut loaded = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, id, Ok(chart))) => loaded.push((index, id, chart)),
            Ok((_, id, Err(e))) => tracing::warn!("Skipping candidate {}: {}", id, e),
            Err(e) => tracing::error!("Candidate fetch task failed: {}", e),
        }
    }

    loaded.sort_unstable_by_key(|(index, _, _)| *index);
    loaded.into_iter().map(|(_, id, chart)| (id, chart)).collect()
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(error_body(400, "Validation failed", errors))
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Score two stored profiles
///
/// POST /api/v1/compatibility/profiles
///
/// Request body:
/// ```json
/// { "profileIdA": "string", "profileIdB": "string" }
/// ```
async fn score_profiles(
    state: web::Data<AppState>,
    req: web::Json<ScoreProfilesRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    let claims = match authorize(&state, &http_req) {
        Ok(claims) => claims,
        Err(resp) => return resp,
    };
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    tracing::info!(
        "Scoring profiles {} / {} for {}",
        req.profile_id_a,
        req.profile_id_b,
        claims.sub
    );

    match state
        .scorer
        .score_profiles(state.store.as_ref(), &req.profile_id_a, &req.profile_id_b)
        .await
    {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => {
            tracing::warn!("Scoring {} / {} failed: {}", req.profile_id_a, req.profile_id_b, e);
            scoring_error_response(&e)
        }
    }
}

/// Score two charts supplied in the request body
///
/// POST /api/v1/compatibility/charts
async fn score_charts(
    state: web::Data<AppState>,
    req: web::Json<ScoreChartsRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(resp) = authorize(&state, &http_req) {
        return resp;
    }

    match state.scorer.score_records(&req.chart_a, &req.chart_b) {
        Ok(report) => HttpResponse::Ok().json(report),
        // Inline chart defects are client errors here
        Err(e @ ScoringError::InvalidAttribute { .. }) | Err(e @ ScoringError::MissingChartData(_)) => {
            HttpResponse::BadRequest().json(error_body(400, e.code(), &e))
        }
        Err(e) => scoring_error_response(&e),
    }
}

/// Rank candidate profiles against a seeker
///
/// POST /api/v1/compatibility/rank
///
/// Request body:
/// ```json
/// {
///   "profileId": "string",
///   "role": "groom|bride",
///   "candidateIds": ["string"],
///   "limit": 20,
///   "minScore": 18
/// }
/// ```
async fn rank_candidates(
    state: web::Data<AppState>,
    req: web::Json<RankCandidatesRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(resp) = authorize(&state, &http_req) {
        return resp;
    }
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }
    if req.candidate_ids.len() > state.max_rank_candidates {
        return HttpResponse::BadRequest().json(error_body(
            400,
            "Validation failed",
            format!("at most {} candidates per request", state.max_rank_candidates),
        ));
    }

    let seeker_id = &req.profile_id;
    let limit = (req.limit as usize).min(state.max_rank_limit);

    let seeker = match load_chart(state.store.as_ref(), seeker_id).await {
        Ok(chart) => chart,
        Err(e) => {
            tracing::error!("Failed to load seeker chart {}: {}", seeker_id, e);
            return scoring_error_response(&e);
        }
    };

    let candidates = fetch_candidates(
        &state.store,
        seeker_id,
        &req.candidate_ids,
        state.rank_fetch_concurrency,
    )
    .await;

    let total_candidates = candidates.len();
    let matches = state.scorer.rank_candidates(
        seeker_id,
        &seeker,
        req.role,
        candidates,
        limit,
        req.min_score,
    );

    tracing::info!(
        "Returning {} matches for {} (from {} candidates)",
        matches.len(),
        seeker_id,
        total_candidates
    );

    HttpResponse::Ok().json(RankCandidatesResponse {
        matches,
        total_candidates,
    })
}
