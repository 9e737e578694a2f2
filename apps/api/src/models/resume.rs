use serde::{Deserialize, Serialize};

/// Candidate resume document, stored as JSONB on the applicant row.
/// Field names follow the document's camelCase layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResume {
    #[serde(default)]
    pub personal: Personal,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub professional_summary: String,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Personal {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    pub country: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub description: String,
    /// `MM/YYYY`
    #[serde(default)]
    pub start_date: String,
    /// `MM/YYYY`, or `Present` / absent for an ongoing role.
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: Option<String>,
}

/// Location fields of a resume with absent values replaced by an empty placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateLocation {
    pub country: String,
    pub city: String,
}

impl CandidateResume {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.personal.first_name, self.personal.last_name)
            .trim()
            .to_string()
    }

    /// Returns a normalized copy of the location fields. The resume itself is never touched.
    pub fn normalized_location(&self) -> CandidateLocation {
        CandidateLocation {
            country: self.personal.country.clone().unwrap_or_default(),
            city: self.personal.city.clone().unwrap_or_default(),
        }
    }
}
