use serde::{Deserialize, Serialize};

use crate::insights::similarity::skill_similarity;
use crate::models::freelancer::FreelancerProfile;

pub const HOURS_PER_WEEK: f64 = 40.0;
const OPTIMAL_PROJECT_COUNT: usize = 2;
const EXPERIENCED_PROJECT_COUNT: f64 = 50.0;
const MIN_EFFICIENCY: f64 = 0.6;
const MIN_NEW_PROJECT_HOURS: i64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRequirements {
    pub required_skills: Vec<String>,
    pub duration_weeks: f64,
    /// 1 (trivial) to 5 (very complex).
    pub complexity: u8,
    pub budget: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveProject {
    pub hours_per_week: f64,
    pub remaining_weeks: f64,
    pub complexity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSuccess {
    pub success_probability: f64,
    pub skill_match: f64,
    pub estimated_cost: f64,
    pub risk_factors: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkloadStatus {
    Overloaded,
    #[serde(rename = "Available for more work")]
    Available,
    #[serde(rename = "Near capacity")]
    NearCapacity,
    Optimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workload {
    pub can_take_new_project: bool,
    pub recommended_hours: i64,
    pub current_hours: f64,
    pub workload_status: WorkloadStatus,
    pub efficiency: f64,
}

/// Weighted estimate that `profile` completes a project meeting `requirements`.
///
/// 0.4 skill match, 0.2 experience, 0.2 budget fit, 0.2 simplicity.
/// The result is clamped to [0, 1].
pub fn predict_project_success(
    profile: &FreelancerProfile,
    requirements: &ProjectRequirements,
) -> ProjectSuccess {
    let skill_match = skill_similarity(&requirements.required_skills, &profile.skills);
    let complexity = f64::from(requirements.complexity);

    let experience_factor =
        (f64::from(profile.completed_projects) / EXPERIENCED_PROJECT_COUNT).min(1.0) * 0.2;

    let estimated_cost = profile.hourly_rate * requirements.duration_weeks * HOURS_PER_WEEK;
    let over_budget = estimated_cost > requirements.budget;
    let budget_factor = if over_budget { 0.1 } else { 0.2 };

    let complexity_factor = (6.0 - complexity) / 5.0 * 0.2;

    let success_probability =
        (skill_match * 0.4 + experience_factor + budget_factor + complexity_factor)
            .clamp(0.0, 1.0);

    let mut risk_factors = Vec::new();
    let mut suggestions = Vec::new();

    if skill_match < 0.7 {
        risk_factors.push("Skill gap in required technologies".to_string());
        suggestions.push("Consider upskilling in required technologies".to_string());
    }
    if over_budget {
        risk_factors.push("Project might exceed budget".to_string());
        suggestions.push("Consider negotiating project scope or timeline".to_string());
    }
    if requirements.complexity > 3 {
        if skill_match < 0.8 {
            risk_factors.push("High project complexity relative to skill match".to_string());
        }
        suggestions.push("Break down the project into smaller milestones".to_string());
    }

    ProjectSuccess {
        success_probability,
        skill_match,
        estimated_cost,
        risk_factors,
        suggestions,
    }
}

/// Capacity check for taking on another project given the current load.
///
/// Efficiency peaks at two concurrent projects and drops 10% per project of
/// distance from that, scaled by the average complexity, never below 0.6.
pub fn calculate_optimal_workload(
    _profile: &FreelancerProfile,
    active_projects: &[ActiveProject],
) -> Workload {
    let count = active_projects.len();
    let current_hours: f64 = active_projects.iter().map(|p| p.hours_per_week).sum();

    let avg_complexity = active_projects
        .iter()
        .map(|p| f64::from(p.complexity))
        .sum::<f64>()
        / count.max(1) as f64;

    let complexity_factor = 1.0 - (avg_complexity - 1.0) * 0.1;
    let distance = count.abs_diff(OPTIMAL_PROJECT_COUNT) as f64;
    let efficiency = (1.0 - distance * 0.1 * complexity_factor).max(MIN_EFFICIENCY);

    let recommended_hours = ((HOURS_PER_WEEK - current_hours) * efficiency).floor() as i64;

    let workload_status = if current_hours > HOURS_PER_WEEK {
        WorkloadStatus::Overloaded
    } else if current_hours < HOURS_PER_WEEK * 0.5 {
        WorkloadStatus::Available
    } else if current_hours > HOURS_PER_WEEK * 0.8 {
        WorkloadStatus::NearCapacity
    } else {
        WorkloadStatus::Optimal
    };

    Workload {
        can_take_new_project: recommended_hours >= MIN_NEW_PROJECT_HOURS,
        recommended_hours,
        current_hours,
        workload_status,
        efficiency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::test_support::profile;

    fn requirements(skills: &[&str], weeks: f64, complexity: u8, budget: f64) -> ProjectRequirements {
        ProjectRequirements {
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            duration_weeks: weeks,
            complexity,
            budget,
        }
    }

    fn active(hours: f64, complexity: u8) -> ActiveProject {
        ActiveProject {
            hours_per_week: hours,
            remaining_weeks: 4.0,
            complexity,
        }
    }

    #[test]
    fn test_perfect_fit_scores_one() {
        let f = profile("A", &["Rust"], 50.0, 5.0, 60);
        let req = requirements(&["Rust"], 1.0, 1, 10_000.0);
        let result = predict_project_success(&f, &req);
        // 0.4 + 0.2 + 0.2 + 0.2
        assert!((result.success_probability - 1.0).abs() < 1e-9);
        assert!(result.risk_factors.is_empty());
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_probability_always_in_unit_interval() {
        let f = profile("A", &[], 500.0, 0.0, 0);
        for complexity in 1..=5 {
            for budget in [0.0, 100.0, 1e9] {
                let req = requirements(&["Go"], 52.0, complexity, budget);
                let p = predict_project_success(&f, &req).success_probability;
                assert!((0.0..=1.0).contains(&p), "p was {p}");
            }
        }
    }

    #[test]
    fn test_over_budget_flags_risk_and_suggestion() {
        let f = profile("A", &["Rust"], 100.0, 4.5, 10);
        // 100 * 2 * 40 = 8000 > 5000
        let result = predict_project_success(&f, &requirements(&["Rust"], 2.0, 2, 5_000.0));
        assert_eq!(result.estimated_cost, 8_000.0);
        assert!(result
            .risk_factors
            .contains(&"Project might exceed budget".to_string()));
        assert!(result
            .suggestions
            .contains(&"Consider negotiating project scope or timeline".to_string()));
    }

    #[test]
    fn test_complex_project_with_weak_match() {
        let f = profile("A", &["Rust", "SQL"], 10.0, 4.5, 10);
        let result = predict_project_success(&f, &requirements(&["Rust"], 1.0, 4, 10_000.0));
        // similarity 0.5
        assert_eq!(result.risk_factors.len(), 2);
        assert!(result
            .suggestions
            .contains(&"Break down the project into smaller milestones".to_string()));
    }

    #[test]
    fn test_complex_project_with_strong_match_only_suggests_milestones() {
        let f = profile("A", &["Rust"], 10.0, 4.5, 10);
        let result = predict_project_success(&f, &requirements(&["Rust"], 1.0, 5, 10_000.0));
        assert!(result.risk_factors.is_empty());
        assert_eq!(
            result.suggestions,
            vec!["Break down the project into smaller milestones".to_string()]
        );
    }

    #[test]
    fn test_no_active_projects() {
        let f = profile("A", &["Rust"], 50.0, 4.5, 10);
        let w = calculate_optimal_workload(&f, &[]);
        assert_eq!(w.workload_status, WorkloadStatus::Available);
        // complexity factor 1.1, distance 2 -> 1 - 0.22
        assert!((w.efficiency - 0.78).abs() < 1e-9);
        assert_eq!(w.recommended_hours, 31);
        assert!(w.can_take_new_project);
        assert_eq!(w.current_hours, 0.0);
    }

    #[test]
    fn test_two_projects_is_fully_efficient() {
        let f = profile("A", &["Rust"], 50.0, 4.5, 10);
        let w = calculate_optimal_workload(&f, &[active(10.0, 3), active(15.0, 5)]);
        assert!((w.efficiency - 1.0).abs() < 1e-9);
        assert_eq!(w.recommended_hours, 15);
        assert_eq!(w.workload_status, WorkloadStatus::Optimal);
    }

    #[test]
    fn test_near_capacity_cannot_take_more() {
        let f = profile("A", &["Rust"], 50.0, 4.5, 10);
        let w = calculate_optimal_workload(&f, &[active(20.0, 3), active(15.0, 3)]);
        assert_eq!(w.workload_status, WorkloadStatus::NearCapacity);
        assert_eq!(w.recommended_hours, 5);
        assert!(!w.can_take_new_project);
    }

    #[test]
    fn test_overloaded() {
        let f = profile("A", &["Rust"], 50.0, 4.5, 10);
        let w = calculate_optimal_workload(&f, &[active(30.0, 2), active(15.0, 2)]);
        assert_eq!(w.workload_status, WorkloadStatus::Overloaded);
        assert!(w.recommended_hours < 0);
        assert!(!w.can_take_new_project);
    }

    #[test]
    fn test_efficiency_floor() {
        let f = profile("A", &["Rust"], 50.0, 4.5, 10);
        let projects: Vec<_> = (0..8).map(|_| active(1.0, 1)).collect();
        let w = calculate_optimal_workload(&f, &projects);
        assert_eq!(w.efficiency, MIN_EFFICIENCY);
    }

    #[test]
    fn test_status_serializes_as_label() {
        let json = serde_json::to_string(&WorkloadStatus::Available).unwrap();
        assert_eq!(json, "\"Available for more work\"");
    }
}
