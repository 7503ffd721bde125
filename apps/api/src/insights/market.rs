use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::freelancer::FreelancerProfile;

pub const DEFAULT_TOP_SKILLS_LIMIT: usize = 15;

const RATE_CAP: f64 = 100.0;
const PROJECTS_CAP: f64 = 50.0;
const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillTrend {
    Rising,
    Stable,
    Declining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDemand {
    pub skill: String,
    pub score: f64,
    pub trend: SkillTrend,
    pub demand_level: DemandLevel,
    pub freelancer_count: u32,
    pub avg_rate: f64,
    pub avg_rating: f64,
    pub projects_per_freelancer: f64,
}

#[derive(Default)]
struct SkillTotals {
    freelancers: u32,
    rate: f64,
    rating: f64,
    projects: f64,
}

/// Ranks every skill in the population by a composite demand score.
///
/// score = 0.3 popularity share + 0.3 rating/5 + 0.2 min(rate,100)/100
///       + 0.2 min(projects per freelancer,50)/50
pub fn analyze_top_skills(population: &[FreelancerProfile], limit: usize) -> Vec<SkillDemand> {
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, SkillTotals> = HashMap::new();

    for freelancer in population {
        let mut seen = HashSet::new();
        for skill in freelancer.skills.iter().map(String::as_str) {
            if !seen.insert(skill) {
                continue;
            }
            let entry = totals.entry(skill).or_insert_with(|| {
                order.push(skill);
                SkillTotals::default()
            });
            entry.freelancers += 1;
            entry.rate += freelancer.hourly_rate;
            entry.rating += freelancer.rating;
            entry.projects += f64::from(freelancer.completed_projects);
        }
    }

    let population_size = population.len() as f64;
    let mut demand: Vec<SkillDemand> = order
        .into_iter()
        .map(|skill| {
            let t = &totals[skill];
            let n = f64::from(t.freelancers);
            let avg_rate = t.rate / n;
            let avg_rating = t.rating / n;
            let projects_per_freelancer = t.projects / n;

            let score = (n / population_size) * 0.3
                + (avg_rating / MAX_RATING) * 0.3
                + (avg_rate.min(RATE_CAP) / RATE_CAP) * 0.2
                + (projects_per_freelancer.min(PROJECTS_CAP) / PROJECTS_CAP) * 0.2;

            SkillDemand {
                skill: skill.to_string(),
                score,
                trend: classify_trend(avg_rate, avg_rating),
                demand_level: classify_demand(score),
                freelancer_count: t.freelancers,
                avg_rate,
                avg_rating,
                projects_per_freelancer,
            }
        })
        .collect();

    demand.sort_by(|a, b| b.score.total_cmp(&a.score));
    demand.truncate(limit);
    demand
}

/// Rising is inclusive at 50/h and 4.5 stars; the stable band is exclusive.
fn classify_trend(avg_rate: f64, avg_rating: f64) -> SkillTrend {
    if avg_rate >= 50.0 && avg_rating >= 4.5 {
        SkillTrend::Rising
    } else if avg_rate > 30.0 && avg_rating > 4.0 {
        SkillTrend::Stable
    } else {
        SkillTrend::Declining
    }
}

fn classify_demand(score: f64) -> DemandLevel {
    match score {
        s if s > 0.7 => DemandLevel::High,
        s if s > 0.4 => DemandLevel::Medium,
        _ => DemandLevel::Low,
    }
}
