use crate::models::job_post::JobLocation;
use crate::models::resume::CandidateLocation;

pub fn location_match(job: &JobLocation, candidate: &CandidateLocation) -> f64 {
    let (country, city) = match job {
        JobLocation::Remote => return 100.0,
        JobLocation::Onsite { country, city } => (country, city),
    };

    if candidate.country.trim().is_empty() || candidate.city.trim().is_empty() {
        return 0.0;
    }

    let same_country = country.trim().to_lowercase() == candidate.country.trim().to_lowercase();
    let same_city = city.trim().to_lowercase() == candidate.city.trim().to_lowercase();

    match (same_country, same_city) {
        (true, true) => 100.0,
        (true, false) => 50.0,
        _ => 0.0,
    }
}
