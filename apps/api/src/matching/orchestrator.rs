//! Matching Orchestrator: scores one job post against the whole applicant pool.
//!
//! Flow: fetch posting → fetch candidates → bounded fan-out (one spawned task per
//! candidate: decode, score, persist if qualifying) → fan-in → rank.
//!
//! A bad resume or a failed write only affects its own candidate; the failure is
//! recorded on the returned `MatchRun` and the rest of the pool is still scored.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::matching::scorer::{score_candidate, MatchResult};
use crate::matching::store::{MatchStore, StoreError};
use crate::models::applicant::CandidateRecord;
use crate::models::job_post::{JobLocation, JobPosting};
use crate::models::resume::CandidateResume;

pub const DEFAULT_CONCURRENCY: usize = 16;
const TOP_MATCHES_LOGGED: usize = 5;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("job post '{0}' not found")]
    PostingNotFound(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy)]
pub struct MatchOptions {
    /// Instant that ongoing experience entries are measured up to.
    pub evaluated_at: DateTime<Utc>,
    /// Maximum number of candidates scored at once.
    pub concurrency: usize,
}

impl MatchOptions {
    pub fn now(concurrency: usize) -> Self {
        Self {
            evaluated_at: Utc::now(),
            concurrency,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Scoring,
    Persistence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateFailure {
    pub applicant_id: Uuid,
    pub stage: FailureStage,
    pub message: String,
}

/// Outcome of one matching run. `matches` is sorted by total score, descending.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRun {
    pub job_id: String,
    pub evaluated_at: DateTime<Utc>,
    pub matches: Vec<MatchResult>,
    pub failures: Vec<CandidateFailure>,
    pub applications_created: usize,
}

struct CandidateOutcome {
    result: Result<MatchResult, CandidateFailure>,
    created: bool,
    persist_failure: Option<CandidateFailure>,
}

/// Runs matching for `job_id` and returns the full ranked result set.
///
/// Qualifying candidates get an application record through the store's
/// insert-if-absent, so repeated or concurrent runs never duplicate a record.
#[instrument(skip(store, options))]
pub async fn run_matching(
    store: Arc<dyn MatchStore>,
    job_id: &str,
    options: MatchOptions,
) -> Result<MatchRun, MatchError> {
    let posting = store
        .fetch_posting(job_id)
        .await?
        .ok_or_else(|| MatchError::PostingNotFound(job_id.to_string()))?;

    info!(
        job_id = %posting.job_id,
        role = %posting.role,
        required_skills = ?posting.skills,
        experience = posting.experience.map(|b| b.label()).unwrap_or("unspecified"),
        remote = matches!(posting.location, JobLocation::Remote),
        "Matching job post"
    );

    let candidates = store.fetch_candidates().await?;
    info!("Scoring {} applicants for job {}", candidates.len(), job_id);

    let posting = Arc::new(posting);
    let evaluated_at = options.evaluated_at;

    let outcomes: Vec<_> = stream::iter(candidates.into_iter().enumerate())
        .map(|(position, candidate)| {
            let applicant_id = candidate.id;
            let handle = tokio::spawn(evaluate_candidate(
                Arc::clone(&store),
                Arc::clone(&posting),
                candidate,
                evaluated_at,
            ));
            async move { (position, applicant_id, handle.await) }
        })
        .buffer_unordered(options.concurrency.max(1))
        .collect()
        .await;

    let mut ranked: Vec<(usize, MatchResult)> = Vec::with_capacity(outcomes.len());
    let mut failures: Vec<(usize, CandidateFailure)> = Vec::new();
    let mut applications_created = 0;

    for (position, applicant_id, joined) in outcomes {
        let outcome = match joined {
            Ok(outcome) => outcome,
            Err(e) => {
                failures.push((
                    position,
                    CandidateFailure {
                        applicant_id,
                        stage: FailureStage::Scoring,
                        message: format!("scoring task aborted: {e}"),
                    },
                ));
                continue;
            }
        };

        if outcome.created {
            applications_created += 1;
        }
        if let Some(failure) = outcome.persist_failure {
            failures.push((position, failure));
        }
        match outcome.result {
            Ok(result) => ranked.push((position, result)),
            Err(failure) => failures.push((position, failure)),
        }
    }

    // Equal totals keep the pool's fetch order.
    ranked.sort_by(|(pos_a, a), (pos_b, b)| {
        b.total_score.cmp(&a.total_score).then(pos_a.cmp(pos_b))
    });
    failures.sort_by_key(|(position, _)| *position);

    let matches: Vec<MatchResult> = ranked.into_iter().map(|(_, m)| m).collect();
    let failures: Vec<CandidateFailure> = failures.into_iter().map(|(_, f)| f).collect();

    for (rank, m) in matches.iter().take(TOP_MATCHES_LOGGED).enumerate() {
        info!(
            rank = rank + 1,
            name = %m.name,
            email = %m.email,
            total_score = m.total_score,
            recommendation = %m.recommendation.recommendation,
            insights = ?m.recommendation.insights,
            "Top match"
        );
    }
    info!(
        "Matching for job {} complete: {} ranked, {} failed, {} new applications",
        job_id,
        matches.len(),
        failures.len(),
        applications_created
    );

    Ok(MatchRun {
        job_id: job_id.to_string(),
        evaluated_at,
        matches,
        failures,
        applications_created,
    })
}

async fn evaluate_candidate(
    store: Arc<dyn MatchStore>,
    posting: Arc<JobPosting>,
    candidate: CandidateRecord,
    evaluated_at: DateTime<Utc>,
) -> CandidateOutcome {
    let applicant_id = candidate.id;
    let scored = serde_json::from_value::<CandidateResume>(candidate.resume)
        .map_err(|e| format!("malformed resume document: {e}"))
        .and_then(|resume| {
            score_candidate(applicant_id, &posting, &resume, evaluated_at)
                .map_err(|e| e.to_string())
        });

    let result = match scored {
        Ok(result) => result,
        Err(message) => {
            warn!("Skipping applicant {applicant_id}: {message}");
            return CandidateOutcome {
                result: Err(CandidateFailure {
                    applicant_id,
                    stage: FailureStage::Scoring,
                    message,
                }),
                created: false,
                persist_failure: None,
            };
        }
    };

    debug!(
        %applicant_id,
        total_score = result.total_score,
        details = ?result.details,
        "Scored applicant"
    );

    let mut created = false;
    let mut persist_failure = None;
    if result.qualifies() {
        match store
            .upsert_application(posting.id, applicant_id, result.total_score)
            .await
        {
            Ok(true) => {
                created = true;
                info!("Applicant {applicant_id} applied for job {}", posting.job_id);
            }
            Ok(false) => {
                debug!("Applicant {applicant_id} already applied for job {}", posting.job_id);
            }
            Err(e) => {
                warn!("Failed to record application for applicant {applicant_id}: {e}");
                persist_failure = Some(CandidateFailure {
                    applicant_id,
                    stage: FailureStage::Persistence,
                    message: e.to_string(),
                });
            }
        }
    }

    CandidateOutcome {
        result: Ok(result),
        created,
        persist_failure,
    }
}
