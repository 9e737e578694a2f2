use serde::{Deserialize, Serialize};

use crate::matching::aggregate::ScoreBreakdown;

const STRONG_THRESHOLD: u8 = 85;
const GOOD_THRESHOLD: u8 = 70;
const POTENTIAL_THRESHOLD: u8 = 60;

const COMPONENT_STRONG: u8 = 80;
const COMPONENT_GAP: u8 = 50;
const ROLE_ALIGNMENT: u8 = 75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    StrongMatch,
    GoodMatch,
    PotentialMatch,
    WeakMatch,
}

impl RecommendationTier {
    pub fn from_score(total: u8) -> Self {
        if total >= STRONG_THRESHOLD {
            Self::StrongMatch
        } else if total >= GOOD_THRESHOLD {
            Self::GoodMatch
        } else if total >= POTENTIAL_THRESHOLD {
            Self::PotentialMatch
        } else {
            Self::WeakMatch
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Self::StrongMatch => "Strong Match: Highly recommended for interview",
            Self::GoodMatch => "Good Match: Consider for interview",
            Self::PotentialMatch => "Potential Match: Review additional qualifications",
            Self::WeakMatch => "Weak Match: May not meet core requirements",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub tier: RecommendationTier,
    pub recommendation: String,
    pub score: u8,
    pub insights: Vec<String>,
}

/// Builds the tiered recommendation and the per-component insights.
/// Each component is checked independently; several insights may co-occur.
pub fn generate_recommendation(total: u8, details: &ScoreBreakdown) -> Recommendation {
    let tier = RecommendationTier::from_score(total);
    let mut insights = Vec::new();

    if details.skills_match >= COMPONENT_STRONG {
        insights.push("Strong skills alignment with job requirements");
    } else if details.skills_match < COMPONENT_GAP {
        insights.push("Consider evaluating technical skill gaps");
    }

    if details.experience_match >= COMPONENT_STRONG {
        insights.push("Experience level well-suited for the position");
    } else if details.experience_match < COMPONENT_GAP {
        insights.push("May need additional experience in the field");
    }

    if details.location_match < COMPONENT_GAP {
        insights.push("Location might be a consideration for this role");
    }

    if details.role_similarity >= ROLE_ALIGNMENT {
        insights.push("Previous roles strongly align with position");
    }

    Recommendation {
        tier,
        recommendation: tier.summary().to_string(),
        score: total,
        insights: insights.into_iter().map(str::to_string).collect(),
    }
}
