//! Kind-tagged insight requests and results.
//!
//! Every heuristic has a fixed-field result record; `InsightReport` tags it with
//! the computation kind so API consumers never deal with loosely-shaped bags.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::insights::market::{analyze_top_skills, SkillDemand, DEFAULT_TOP_SKILLS_LIMIT};
use crate::insights::matching::{calculate_job_match, BudgetRange};
use crate::insights::project::{
    calculate_optimal_workload, predict_project_success, ActiveProject, ProjectRequirements,
    ProjectSuccess, Workload,
};
use crate::insights::recommend::{
    analyze_skill_gap, predict_price_range, recommend_similar_profiles, recommend_skills,
    PriceRange, SkillGap, DEFAULT_SIMILAR_LIMIT, DEFAULT_SKILL_LIMIT,
};
use crate::insights::similarity::feature_vector;
use crate::models::freelancer::FreelancerProfile;
use crate::store::seed::SKILL_CATALOG;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InsightRequest {
    SimilarProfiles {
        skills: Vec<String>,
        limit: Option<usize>,
    },
    PriceRange {
        skills: Vec<String>,
    },
    SkillRecommendations {
        skills: Vec<String>,
        limit: Option<usize>,
    },
    SkillGap {
        freelancer_id: Uuid,
        required_skills: Vec<String>,
    },
    ProjectSuccess {
        freelancer_id: Uuid,
        requirements: ProjectRequirements,
    },
    Workload {
        freelancer_id: Uuid,
        active_projects: Vec<ActiveProject>,
    },
    TopSkills {
        limit: Option<usize>,
    },
    JobMatch {
        freelancer_id: Uuid,
        job_skills: Vec<String>,
        budget: BudgetRange,
    },
    /// Encodes skills against the catalog returned by `GET /api/v1/skills`.
    FeatureVector {
        skills: Vec<String>,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InsightReport {
    SimilarProfiles { profiles: Vec<FreelancerProfile> },
    PriceRange(PriceRange),
    SkillRecommendations { skills: Vec<String> },
    SkillGap(SkillGap),
    ProjectSuccess(ProjectSuccess),
    Workload(Workload),
    TopSkills { skills: Vec<SkillDemand> },
    JobMatch { freelancer_id: Uuid, score: f64 },
    FeatureVector { vector: Vec<u8> },
}

/// Runs one heuristic over `population`.
pub fn evaluate(
    request: &InsightRequest,
    population: &[FreelancerProfile],
) -> Result<InsightReport, AppError> {
    let report = match request {
        InsightRequest::SimilarProfiles { skills, limit } => {
            let profiles = recommend_similar_profiles(
                skills,
                population,
                limit.unwrap_or(DEFAULT_SIMILAR_LIMIT),
            )
            .into_iter()
            .cloned()
            .collect();
            InsightReport::SimilarProfiles { profiles }
        }
        InsightRequest::PriceRange { skills } => {
            InsightReport::PriceRange(predict_price_range(skills, population))
        }
        InsightRequest::SkillRecommendations { skills, limit } => {
            InsightReport::SkillRecommendations {
                skills: recommend_skills(
                    skills,
                    population,
                    limit.unwrap_or(DEFAULT_SKILL_LIMIT),
                ),
            }
        }
        InsightRequest::SkillGap {
            freelancer_id,
            required_skills,
        } => {
            if required_skills.is_empty() {
                return Err(AppError::Validation(
                    "required_skills cannot be empty".to_string(),
                ));
            }
            let profile = find_profile(population, *freelancer_id)?;
            InsightReport::SkillGap(analyze_skill_gap(required_skills, profile))
        }
        InsightRequest::ProjectSuccess {
            freelancer_id,
            requirements,
        } => {
            validate_requirements(requirements)?;
            let profile = find_profile(population, *freelancer_id)?;
            InsightReport::ProjectSuccess(predict_project_success(profile, requirements))
        }
        InsightRequest::Workload {
            freelancer_id,
            active_projects,
        } => {
            for project in active_projects {
                validate_active_project(project)?;
            }
            let profile = find_profile(population, *freelancer_id)?;
            InsightReport::Workload(calculate_optimal_workload(profile, active_projects))
        }
        InsightRequest::TopSkills { limit } => InsightReport::TopSkills {
            skills: analyze_top_skills(population, limit.unwrap_or(DEFAULT_TOP_SKILLS_LIMIT)),
        },
        InsightRequest::JobMatch {
            freelancer_id,
            job_skills,
            budget,
        } => {
            if budget.min > budget.max {
                return Err(AppError::Validation(
                    "budget.min must not exceed budget.max".to_string(),
                ));
            }
            let profile = find_profile(population, *freelancer_id)?;
            InsightReport::JobMatch {
                freelancer_id: profile.id,
                score: calculate_job_match(
                    &profile.skills,
                    job_skills,
                    profile.hourly_rate,
                    *budget,
                ),
            }
        }
        InsightRequest::FeatureVector { skills } => InsightReport::FeatureVector {
            vector: feature_vector(skills, SKILL_CATALOG),
        },
    };
    Ok(report)
}

fn find_profile(
    population: &[FreelancerProfile],
    id: Uuid,
) -> Result<&FreelancerProfile, AppError> {
    population
        .iter()
        .find(|f| f.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Freelancer {id} not found")))
}

fn validate_complexity(complexity: u8) -> Result<(), AppError> {
    if (1..=5).contains(&complexity) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "complexity must be between 1 and 5, got {complexity}"
        )))
    }
}

fn validate_non_negative(field: &str, value: f64) -> Result<(), AppError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{field} must be a non-negative number"
        )))
    }
}

fn validate_requirements(requirements: &ProjectRequirements) -> Result<(), AppError> {
    validate_complexity(requirements.complexity)?;
    validate_non_negative("duration_weeks", requirements.duration_weeks)?;
    validate_non_negative("budget", requirements.budget)
}

fn validate_active_project(project: &ActiveProject) -> Result<(), AppError> {
    validate_complexity(project.complexity)?;
    validate_non_negative("hours_per_week", project.hours_per_week)?;
    validate_non_negative("remaining_weeks", project.remaining_weeks)
}
