//! Background matching runs.
//!
//! The posting workflow (or an operator) hands a job id to `MatchDispatcher::enqueue`
//! and moves on; it never holds a handle to the run. A single worker drains the
//! bounded queue one run at a time, each run in its own spawned task so a panicking
//! run is logged and the worker keeps going. Outcomes surface only through tracing
//! events tagged with the run id.

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{error, info};
use uuid::Uuid;

use crate::matching::orchestrator::{run_matching, MatchOptions};
use crate::matching::store::MatchStore;

#[derive(Debug, Clone)]
pub struct MatchJob {
    pub run_id: Uuid,
    pub job_id: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum DispatchError {
    #[error("match queue is full")]
    QueueFull,

    #[error("match worker is not running")]
    Closed,
}

#[derive(Clone)]
pub struct MatchDispatcher {
    tx: mpsc::Sender<MatchJob>,
}

impl MatchDispatcher {
    /// Starts the worker on the current tokio runtime.
    pub fn spawn(store: Arc<dyn MatchStore>, queue_capacity: usize, concurrency: usize) -> Self {
        let (tx, rx) = mpsc::channel(queue_capacity.max(1));
        tokio::spawn(run_worker(rx, store, concurrency));
        Self { tx }
    }

    /// Queues a run for `job_id` without waiting for it. Returns the run id.
    pub fn enqueue(&self, job_id: impl Into<String>) -> Result<Uuid, DispatchError> {
        let job = MatchJob {
            run_id: Uuid::new_v4(),
            job_id: job_id.into(),
        };
        let run_id = job.run_id;

        self.tx.try_send(job).map_err(|e| match e {
            TrySendError::Full(_) => DispatchError::QueueFull,
            TrySendError::Closed(_) => DispatchError::Closed,
        })?;

        info!("Queued matching run {run_id}");
        Ok(run_id)
    }
}

async fn run_worker(
    mut rx: mpsc::Receiver<MatchJob>,
    store: Arc<dyn MatchStore>,
    concurrency: usize,
) {
    info!("Match worker started (concurrency={concurrency})");
    while let Some(job) = rx.recv().await {
        let run_id = job.run_id;
        let job_id = job.job_id.clone();
        let handle = tokio::spawn(execute_job(Arc::clone(&store), job, concurrency));
        if let Err(e) = handle.await {
            error!(
                run_id = %run_id,
                job_id = %job_id,
                "Matching run aborted: {e}"
            );
        }
    }
    info!("Match worker stopped");
}

async fn execute_job(store: Arc<dyn MatchStore>, job: MatchJob, concurrency: usize) {
    let started = Instant::now();
    match run_matching(store, &job.job_id, MatchOptions::now(concurrency)).await {
        Ok(run) => info!(
            run_id = %job.run_id,
            job_id = %job.job_id,
            ranked = run.matches.len(),
            failed = run.failures.len(),
            applications_created = run.applications_created,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Matching process completed"
        ),
        Err(e) => error!(
            run_id = %job.run_id,
            job_id = %job.job_id,
            "Error during matching: {e}"
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use async_trait::async_trait;

    use super::*;
    use crate::matching::store::memory::InMemoryMatchStore;
    use crate::matching::store::StoreError;
    use crate::models::applicant::CandidateRecord;
    use crate::models::job_post::{ExperienceBucket, JobLocation, JobPosting};

    fn store_with_one_qualifier() -> Arc<InMemoryMatchStore> {
        let posting = JobPosting {
            id: Uuid::new_v4(),
            job_id: "JOB-7".to_string(),
            role: "Data Engineer".to_string(),
            description: "Spark pipelines".to_string(),
            skills: vec!["Spark".to_string()],
            experience: Some(ExperienceBucket::EightPlus),
            location: JobLocation::Remote,
        };
        let candidate = CandidateRecord {
            id: Uuid::new_v4(),
            resume: json!({
                "skills": [{"name": "Apache Spark"}],
                "professionalSummary": "Data engineer",
                "experience": [{
                    "role": "Data Engineer",
                    "description": "Spark pipelines",
                    "startDate": "01/2010"
                }]
            }),
        };
        Arc::new(InMemoryMatchStore::new(vec![posting], vec![candidate]))
    }

    #[tokio::test]
    async fn test_enqueued_run_persists_in_background() {
        let store = store_with_one_qualifier();
        let dispatcher = MatchDispatcher::spawn(store.clone(), 4, 2);

        dispatcher.enqueue("JOB-7").unwrap();

        for _ in 0..100 {
            if !store.applications().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(store.applications().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_run_does_not_affect_caller() {
        let store = store_with_one_qualifier();
        let dispatcher = MatchDispatcher::spawn(store.clone(), 4, 2);

        assert!(dispatcher.enqueue("JOB-MISSING").is_ok());
        assert!(dispatcher.enqueue("JOB-7").is_ok());

        for _ in 0..100 {
            if !store.applications().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(store.applications().len(), 1);
    }

    /// Panics while loading `JOB-PANIC`; everything else goes to the inner store.
    struct PanickingStore {
        inner: Arc<InMemoryMatchStore>,
    }

    #[async_trait]
    impl MatchStore for PanickingStore {
        async fn fetch_posting(&self, job_id: &str) -> Result<Option<JobPosting>, StoreError> {
            if job_id == "JOB-PANIC" {
                panic!("posting lookup blew up");
            }
            self.inner.fetch_posting(job_id).await
        }

        async fn fetch_candidates(&self) -> Result<Vec<CandidateRecord>, StoreError> {
            self.inner.fetch_candidates().await
        }

        async fn upsert_application(
            &self,
            job_post_id: Uuid,
            applicant_id: Uuid,
            match_score: u8,
        ) -> Result<bool, StoreError> {
            self.inner
                .upsert_application(job_post_id, applicant_id, match_score)
                .await
        }
    }

    #[tokio::test]
    async fn test_worker_survives_panicking_run() {
        let inner = store_with_one_qualifier();
        let store = Arc::new(PanickingStore {
            inner: inner.clone(),
        });
        let dispatcher = MatchDispatcher::spawn(store, 4, 2);

        dispatcher.enqueue("JOB-PANIC").unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(dispatcher.enqueue("JOB-7").is_ok());
        for _ in 0..100 {
            if !inner.applications().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(inner.applications().len(), 1);
    }

    #[tokio::test]
    async fn test_full_queue_is_reported() {
        let (tx, _rx) = mpsc::channel(1);
        let dispatcher = MatchDispatcher { tx };

        assert!(dispatcher.enqueue("JOB-1").is_ok());
        assert_eq!(dispatcher.enqueue("JOB-2"), Err(DispatchError::QueueFull));
    }

    #[tokio::test]
    async fn test_stopped_worker_is_reported() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let dispatcher = MatchDispatcher { tx };

        assert_eq!(dispatcher.enqueue("JOB-1"), Err(DispatchError::Closed));
    }
}
