// Heuristic scoring over the freelancer population.
// Everything below `handlers` is pure and synchronous: no I/O, no shared state.

pub mod handlers;
pub mod market;
pub mod matching;
pub mod project;
pub mod recommend;
pub mod report;
pub mod similarity;

#[cfg(test)]
pub(crate) mod test_support {
    use uuid::Uuid;

    use crate::models::freelancer::FreelancerProfile;

    pub fn profile(
        name: &str,
        skills: &[&str],
        hourly_rate: f64,
        rating: f64,
        completed_projects: u32,
    ) -> FreelancerProfile {
        FreelancerProfile {
            id: Uuid::new_v4(),
            name: name.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            hourly_rate,
            rating,
            completed_projects,
            description: String::new(),
            experience: None,
            availability: None,
            location: None,
            image_url: None,
        }
    }
}
