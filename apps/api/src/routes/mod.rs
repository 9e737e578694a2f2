pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route(
            "/api/v1/jobs/:job_id/matches",
            post(handlers::handle_run_matching),
        )
        .route(
            "/api/v1/jobs/:job_id/matches/background",
            post(handlers::handle_queue_matching),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::config::Config;
    use crate::matching::dispatch::MatchDispatcher;
    use crate::matching::store::memory::InMemoryMatchStore;
    use crate::matching::store::MatchStore;
    use crate::models::applicant::CandidateRecord;
    use crate::models::job_post::{ExperienceBucket, JobLocation, JobPosting};

    fn test_config() -> Config {
        Config {
            database_url: "postgres://unused".to_string(),
            database_max_connections: 1,
            port: 0,
            rust_log: "info".to_string(),
            match_concurrency: 4,
            match_queue_capacity: 4,
        }
    }

    fn test_state() -> AppState {
        let posting = JobPosting {
            id: Uuid::new_v4(),
            job_id: "JOB-1".to_string(),
            role: "Backend Engineer".to_string(),
            description: "Rust services".to_string(),
            skills: vec!["Rust".to_string()],
            experience: Some(ExperienceBucket::ZeroToOne),
            location: JobLocation::Remote,
        };
        let candidates = ["Rust", "Rust", "COBOL"]
            .iter()
            .map(|skill| CandidateRecord {
                id: Uuid::new_v4(),
                resume: json!({"skills": [{"name": skill}], "professionalSummary": "Engineer"}),
            })
            .collect();
        let store: Arc<dyn MatchStore> =
            Arc::new(InMemoryMatchStore::new(vec![posting], candidates));

        AppState {
            config: test_config(),
            dispatcher: MatchDispatcher::spawn(store.clone(), 4, 4),
            store,
        }
    }

    async fn send(state: AppState, uri: &str) -> (StatusCode, Value) {
        let response = build_router(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let response = build_router(test_state())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_run_matching_returns_ranked_top_n() {
        let (status, body) = send(test_state(), "/api/v1/jobs/JOB-1/matches?limit=2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_ranked"], 3);
        let matches = body["matches"].as_array().unwrap();
        assert_eq!(matches.len(), 2);
        assert!(matches[0]["total_score"].as_u64() >= matches[1]["total_score"].as_u64());
    }

    #[tokio::test]
    async fn test_unknown_job_is_404() {
        let (status, body) = send(test_state(), "/api/v1/jobs/NOPE/matches").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_background_matching_is_accepted() {
        let (status, body) = send(test_state(), "/api/v1/jobs/JOB-1/matches/background").await;

        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body["status"], "queued");
        assert!(body["run_id"].as_str().is_some());
    }
}
