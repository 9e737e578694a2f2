//! Per-candidate scoring: runs every component scorer, aggregates, and attaches
//! the recommendation. Pure: depends only on the posting, the resume and the
//! evaluation instant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::matching::aggregate::{ComponentScores, ScoreBreakdown};
use crate::matching::education::education_relevance;
use crate::matching::experience::{experience_match, ExperienceError};
use crate::matching::location::location_match;
use crate::matching::recommendation::{generate_recommendation, Recommendation};
use crate::matching::skills::skills_match;
use crate::matching::text_similarity::text_similarity;
use crate::models::job_post::JobPosting;
use crate::models::resume::CandidateResume;

/// Minimum total score for which an application record is created.
pub const QUALIFYING_SCORE: u8 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub applicant_id: Uuid,
    pub name: String,
    pub email: String,
    pub total_score: u8,
    pub details: ScoreBreakdown,
    pub recommendation: Recommendation,
}

impl MatchResult {
    pub fn qualifies(&self) -> bool {
        self.total_score >= QUALIFYING_SCORE
    }
}

pub fn posting_text(posting: &JobPosting) -> String {
    format!("{} {}", posting.role, posting.description)
}

/// Summary followed by every experience entry's role and description.
pub fn candidate_text(resume: &CandidateResume) -> String {
    let narrative = resume
        .experience
        .iter()
        .map(|exp| format!("{} {}", exp.role, exp.description))
        .collect::<Vec<_>>()
        .join(" ");
    format!("{} {}", resume.professional_summary, narrative)
}

pub fn score_components(
    posting: &JobPosting,
    resume: &CandidateResume,
    evaluated_at: DateTime<Utc>,
) -> Result<ComponentScores, ExperienceError> {
    let location = resume.normalized_location();

    Ok(ComponentScores {
        skills: skills_match(&posting.skills, &resume.skills),
        experience: experience_match(posting.experience, &resume.experience, evaluated_at)?,
        location: location_match(&posting.location, &location),
        text_similarity: text_similarity(&posting_text(posting), &candidate_text(resume)),
        education: education_relevance(&posting.role, &resume.education),
    })
}

pub fn score_candidate(
    applicant_id: Uuid,
    posting: &JobPosting,
    resume: &CandidateResume,
    evaluated_at: DateTime<Utc>,
) -> Result<MatchResult, ExperienceError> {
    let components = score_components(posting, resume, evaluated_at)?;
    let total_score = components.total();
    let details = components.breakdown();

    Ok(MatchResult {
        applicant_id,
        name: resume.display_name(),
        email: resume.personal.email.clone(),
        total_score,
        details,
        recommendation: generate_recommendation(total_score, &details),
    })
}
