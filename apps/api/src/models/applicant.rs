use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// An applicant as fetched for matching. The resume document is decoded
/// per candidate so one malformed document cannot fail the whole pool.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRecord {
    pub id: Uuid,
    pub resume: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRecord {
    pub id: Uuid,
    pub job_post_id: Uuid,
    pub applicant_id: Uuid,
    pub match_score: i32,
    pub created_at: DateTime<Utc>,
}
