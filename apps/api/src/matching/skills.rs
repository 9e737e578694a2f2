use crate::models::resume::Skill;

/// Percentage of required skills covered by the candidate.
///
/// A required skill is covered when it contains, or is contained in, any
/// candidate skill name (case-insensitive). "Go" covers "Golang" and the
/// other way round.
pub fn skills_match(required: &[String], candidate: &[Skill]) -> f64 {
    let candidate_names: Vec<String> = candidate
        .iter()
        .map(|s| s.name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    if required.is_empty() || candidate_names.is_empty() {
        return 0.0;
    }

    let matched = required
        .iter()
        .map(|skill| skill.to_lowercase())
        .filter(|skill| {
            candidate_names
                .iter()
                .any(|name| name.contains(skill.as_str()) || skill.contains(name.as_str()))
        })
        .count();

    matched as f64 / required.len() as f64 * 100.0
}
