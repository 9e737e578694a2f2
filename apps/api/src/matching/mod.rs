// Candidate/job matching engine.
// Component scorers are pure; the orchestrator owns fan-out, persistence and ranking.
// All persistence goes through `store::MatchStore`.

pub mod aggregate;
pub mod dispatch;
pub mod education;
pub mod experience;
pub mod handlers;
pub mod location;
pub mod orchestrator;
pub mod recommendation;
pub mod scorer;
pub mod skills;
pub mod store;
pub mod text_similarity;
