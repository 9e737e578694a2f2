use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPostRow {
    pub id: Uuid,
    pub job_id: String,
    pub job_role: String,
    pub job_description: String,
    pub skills: Vec<String>,
    pub experience: String,
    pub job_location: String,
    pub country: Option<String>,
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error, PartialEq)]
pub enum PostingError {
    #[error("unknown job location mode '{0}'")]
    UnknownLocationMode(String),
}

/// Required years of experience, as one of four fixed labeled ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceBucket {
    #[serde(rename = "0-1")]
    ZeroToOne,
    #[serde(rename = "2-4")]
    TwoToFour,
    #[serde(rename = "5-7")]
    FiveToSeven,
    #[serde(rename = "8+")]
    EightPlus,
}

impl ExperienceBucket {
    /// Accepts both the short label (`2-4`) and the long form (`2-4 years`).
    pub fn parse(label: &str) -> Option<Self> {
        let lower = label.trim().to_ascii_lowercase();
        let key = lower.strip_suffix("years").unwrap_or(lower.as_str()).trim();
        match key {
            "0-1" => Some(Self::ZeroToOne),
            "2-4" => Some(Self::TwoToFour),
            "5-7" => Some(Self::FiveToSeven),
            "8+" => Some(Self::EightPlus),
            _ => None,
        }
    }

    /// Closed `[lower, upper]` range in years. `EightPlus` is unbounded above.
    pub fn range(self) -> (f64, f64) {
        match self {
            Self::ZeroToOne => (0.0, 1.0),
            Self::TwoToFour => (2.0, 4.0),
            Self::FiveToSeven => (5.0, 7.0),
            Self::EightPlus => (8.0, f64::INFINITY),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ZeroToOne => "0-1",
            Self::TwoToFour => "2-4",
            Self::FiveToSeven => "5-7",
            Self::EightPlus => "8+",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum JobLocation {
    Remote,
    Onsite { country: String, city: String },
}

/// A job posting as seen by the matching engine. Immutable for a whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: Uuid,
    pub job_id: String,
    pub role: String,
    pub description: String,
    pub skills: Vec<String>,
    /// `None` when the stored label is not one of the known buckets.
    pub experience: Option<ExperienceBucket>,
    pub location: JobLocation,
}

impl TryFrom<JobPostRow> for JobPosting {
    type Error = PostingError;

    fn try_from(row: JobPostRow) -> Result<Self, Self::Error> {
        let location = match row.job_location.trim().to_ascii_lowercase().as_str() {
            "remote" => JobLocation::Remote,
            "onsite" => JobLocation::Onsite {
                country: row.country.unwrap_or_default(),
                city: row.city.unwrap_or_default(),
            },
            _ => return Err(PostingError::UnknownLocationMode(row.job_location)),
        };

        Ok(JobPosting {
            id: row.id,
            job_id: row.job_id,
            role: row.job_role,
            description: row.job_description,
            skills: row.skills,
            experience: ExperienceBucket::parse(&row.experience),
            location,
        })
    }
}
