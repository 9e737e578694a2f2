//! Persistence seam for the matching engine.
//!
//! `AppState` holds an `Arc<dyn MatchStore>`; `PgMatchStore` is the production
//! backend. The engine only ever needs three operations, and the write is an
//! atomic insert-if-absent keyed on (posting, applicant).

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use crate::models::applicant::{ApplicationRecord, CandidateRecord};
use crate::models::job_post::{JobPostRow, JobPosting, PostingError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid job post: {0}")]
    InvalidPosting(#[from] PostingError),
}

#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn fetch_posting(&self, job_id: &str) -> Result<Option<JobPosting>, StoreError>;

    /// All applicants, in a stable order (creation time, then id).
    async fn fetch_candidates(&self) -> Result<Vec<CandidateRecord>, StoreError>;

    /// Inserts the application unless one already exists for the pair.
    /// Returns `true` when a new record was written.
    async fn upsert_application(
        &self,
        job_post_id: Uuid,
        applicant_id: Uuid,
        match_score: u8,
    ) -> Result<bool, StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL backend
// ────────────────────────────────────────────────────────────────────────────

pub struct PgMatchStore {
    pool: PgPool,
}

impl PgMatchStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchStore for PgMatchStore {
    #[instrument(skip(self))]
    async fn fetch_posting(&self, job_id: &str) -> Result<Option<JobPosting>, StoreError> {
        let row = sqlx::query_as::<_, JobPostRow>("SELECT * FROM job_posts WHERE job_id = $1")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(JobPosting::try_from).transpose()?)
    }

    #[instrument(skip(self))]
    async fn fetch_candidates(&self) -> Result<Vec<CandidateRecord>, StoreError> {
        Ok(sqlx::query_as::<_, CandidateRecord>(
            "SELECT id, resume FROM job_applicants ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    #[instrument(skip(self))]
    async fn upsert_application(
        &self,
        job_post_id: Uuid,
        applicant_id: Uuid,
        match_score: u8,
    ) -> Result<bool, StoreError> {
        // Unique (job_post_id, applicant_id) makes concurrent runs race-free.
        let inserted = sqlx::query_as::<_, ApplicationRecord>(
            r#"
            INSERT INTO job_applications (id, job_post_id, applicant_id, match_score)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (job_post_id, applicant_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(job_post_id)
        .bind(applicant_id)
        .bind(i32::from(match_score))
        .fetch_optional(&self.pool)
        .await?;

        Ok(inserted.is_some())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory backend for tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub mod memory {
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;

    #[derive(Default)]
    pub struct InMemoryMatchStore {
        pub postings: Vec<JobPosting>,
        pub candidates: Vec<CandidateRecord>,
        /// Applicants whose upsert fails with a database error.
        pub failing_applicants: HashSet<Uuid>,
        applications: Mutex<HashMap<(Uuid, Uuid), ApplicationRecord>>,
    }

    impl InMemoryMatchStore {
        pub fn new(postings: Vec<JobPosting>, candidates: Vec<CandidateRecord>) -> Self {
            Self {
                postings,
                candidates,
                ..Default::default()
            }
        }

        pub fn applications(&self) -> Vec<ApplicationRecord> {
            let guard = self.applications.lock().unwrap();
            guard.values().cloned().collect()
        }
    }

    #[async_trait]
    impl MatchStore for InMemoryMatchStore {
        async fn fetch_posting(&self, job_id: &str) -> Result<Option<JobPosting>, StoreError> {
            Ok(self.postings.iter().find(|p| p.job_id == job_id).cloned())
        }

        async fn fetch_candidates(&self) -> Result<Vec<CandidateRecord>, StoreError> {
            Ok(self.candidates.clone())
        }

        async fn upsert_application(
            &self,
            job_post_id: Uuid,
            applicant_id: Uuid,
            match_score: u8,
        ) -> Result<bool, StoreError> {
            if self.failing_applicants.contains(&applicant_id) {
                return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
            }

            let mut guard = self.applications.lock().unwrap();
            if guard.contains_key(&(job_post_id, applicant_id)) {
                return Ok(false);
            }
            guard.insert(
                (job_post_id, applicant_id),
                ApplicationRecord {
                    id: Uuid::new_v4(),
                    job_post_id,
                    applicant_id,
                    match_score: i32::from(match_score),
                    created_at: Utc::now(),
                },
            );
            Ok(true)
        }
    }
}
