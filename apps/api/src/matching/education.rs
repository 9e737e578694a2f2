use crate::models::resume::EducationEntry;

/// 100 when any degree mentions the role title, otherwise 50.
/// Lack of a field-specific degree is a soft penalty, never disqualifying.
pub fn education_relevance(role: &str, education: &[EducationEntry]) -> f64 {
    let role = role.to_lowercase();
    let relevant = education
        .iter()
        .filter_map(|e| e.degree.as_deref())
        .any(|degree| degree.to_lowercase().contains(&role));

    if relevant {
        100.0
    } else {
        50.0
    }
}
