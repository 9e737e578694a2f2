use serde::{Deserialize, Serialize};

/// Fixed component weights. Must sum to 1.0.
pub const MATCH_WEIGHTS: Weights = Weights {
    skills: 0.35,
    experience: 0.25,
    location: 0.15,
    text_similarity: 0.15,
    education: 0.10,
};

#[derive(Debug, Clone, Copy)]
pub struct Weights {
    pub skills: f64,
    pub experience: f64,
    pub location: f64,
    pub text_similarity: f64,
    pub education: f64,
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.location + self.text_similarity + self.education
    }
}

/// Unrounded component scores for one candidate, each on a 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentScores {
    pub skills: f64,
    pub experience: f64,
    pub location: f64,
    pub text_similarity: f64,
    pub education: f64,
}

/// Rounded per-component scores reported alongside the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills_match: u8,
    pub experience_match: u8,
    pub location_match: u8,
    pub role_similarity: u8,
    pub education_relevance: u8,
}

impl ComponentScores {
    /// Weighted total, rounded once at the end.
    pub fn total(&self) -> u8 {
        let w = &MATCH_WEIGHTS;
        debug_assert!((w.sum() - 1.0).abs() < 1e-9);
        let weighted = self.skills * w.skills
            + self.experience * w.experience
            + self.location * w.location
            + self.text_similarity * w.text_similarity
            + self.education * w.education;
        to_percent(weighted)
    }

    pub fn breakdown(&self) -> ScoreBreakdown {
        ScoreBreakdown {
            skills_match: to_percent(self.skills),
            experience_match: to_percent(self.experience),
            location_match: to_percent(self.location),
            role_similarity: to_percent(self.text_similarity),
            education_relevance: to_percent(self.education),
        }
    }
}

fn to_percent(score: f64) -> u8 {
    score.clamp(0.0, 100.0).round() as u8
}
