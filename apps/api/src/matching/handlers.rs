//! Axum route handlers for the Matching API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::orchestrator::{run_matching, CandidateFailure, MatchOptions};
use crate::matching::scorer::MatchResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchQuery {
    /// Only return the top N matches. Persistence still covers the whole pool.
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub job_id: String,
    pub total_ranked: usize,
    pub matches: Vec<MatchResult>,
    pub failures: Vec<CandidateFailure>,
    pub applications_created: usize,
}

#[derive(Debug, Serialize)]
pub struct QueuedResponse {
    pub run_id: Uuid,
    pub job_id: String,
    pub status: String,
}

/// POST /api/v1/jobs/:job_id/matches
///
/// Runs matching synchronously and returns the ranked result set.
pub async fn handle_run_matching(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<MatchResponse>, AppError> {
    let options = MatchOptions::now(state.config.match_concurrency);
    let run = run_matching(state.store.clone(), &job_id, options).await?;

    let total_ranked = run.matches.len();
    let mut matches = run.matches;
    if let Some(limit) = query.limit {
        matches.truncate(limit);
    }

    Ok(Json(MatchResponse {
        job_id: run.job_id,
        total_ranked,
        matches,
        failures: run.failures,
        applications_created: run.applications_created,
    }))
}

/// POST /api/v1/jobs/:job_id/matches/background
///
/// Queues a matching run and returns immediately. The run's outcome is only logged.
pub async fn handle_queue_matching(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<(StatusCode, Json<QueuedResponse>), AppError> {
    let run_id = state.dispatcher.enqueue(job_id.clone())?;

    Ok((
        StatusCode::ACCEPTED,
        Json(QueuedResponse {
            run_id,
            job_id,
            status: "queued".to_string(),
        }),
    ))
}
