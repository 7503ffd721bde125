use serde::{Deserialize, Serialize};

use crate::insights::similarity::skill_similarity;
use crate::models::freelancer::FreelancerProfile;

/// Search terms this short or shorter are ignored.
const MIN_TERM_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: f64,
    pub max: f64,
}

impl BudgetRange {
    pub fn contains(&self, rate: f64) -> bool {
        rate >= self.min && rate <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchWeights {
    pub name: f64,
    pub skills: f64,
    pub description: f64,
}

impl Default for SearchWeights {
    fn default() -> Self {
        Self {
            name: 0.3,
            skills: 0.5,
            description: 0.2,
        }
    }
}

/// Job fit on a 0–100 scale: 70% skill similarity, 30% rate within budget.
pub fn calculate_job_match<A, B>(
    freelancer_skills: &[A],
    job_skills: &[B],
    hourly_rate: f64,
    budget: BudgetRange,
) -> f64
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let skill_match = skill_similarity(freelancer_skills, job_skills);
    let rate_match = if budget.contains(hourly_rate) { 1.0 } else { 0.0 };
    (skill_match * 0.7 + rate_match * 0.3) * 100.0
}

/// Case-insensitive keyword search over name, skills and description.
///
/// Every query term adds the matching field weights to a profile's score.
/// Profiles scoring zero are dropped; the rest come back best first.
/// A query without usable terms returns the population unchanged.
pub fn smart_search(
    query: &str,
    population: &[FreelancerProfile],
    weights: SearchWeights,
) -> Vec<FreelancerProfile> {
    let query = query.to_lowercase();
    let terms: Vec<&str> = query
        .split(' ')
        .filter(|t| t.chars().count() > MIN_TERM_LEN)
        .collect();

    if terms.is_empty() {
        return population.to_vec();
    }

    let mut scored: Vec<(f64, &FreelancerProfile)> = population
        .iter()
        .map(|f| {
            let name = f.name.to_lowercase();
            let description = f.description.to_lowercase();
            let skills: Vec<String> = f.skills.iter().map(|s| s.to_lowercase()).collect();

            let score: f64 = terms
                .iter()
                .map(|term| {
                    let mut s = 0.0;
                    if name.contains(term) {
                        s += weights.name;
                    }
                    if skills.iter().any(|skill| skill.contains(term)) {
                        s += weights.skills;
                    }
                    if description.contains(term) {
                        s += weights.description;
                    }
                    s
                })
                .sum();
            (score, f)
        })
        .filter(|(score, _)| *score > 0.0)
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().map(|(_, f)| f.clone()).collect()
}
