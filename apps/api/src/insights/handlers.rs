//! Axum route handlers for the Insights API.

use axum::{
    extract::State,
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::extract::{JsonBody, QueryParams};
use crate::insights::market::{analyze_top_skills, SkillDemand, DEFAULT_TOP_SKILLS_LIMIT};
use crate::insights::report::{evaluate, InsightReport, InsightRequest};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TopSkillsQuery {
    pub limit: Option<usize>,
}

/// POST /api/v1/insights
///
/// Runs one heuristic, selected by `kind`, over the current freelancer population.
pub async fn handle_insight(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<InsightRequest>,
) -> Result<Json<InsightReport>, AppError> {
    let population = state.store.list_freelancers().await?;
    debug!("Evaluating insight over {} freelancers", population.len());
    let report = evaluate(&request, &population)?;
    Ok(Json(report))
}

/// GET /api/v1/insights/top-skills
pub async fn handle_top_skills(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<TopSkillsQuery>,
) -> Result<Json<Vec<SkillDemand>>, AppError> {
    let population = state.store.list_freelancers().await?;
    let limit = params.limit.unwrap_or(DEFAULT_TOP_SKILLS_LIMIT);
    Ok(Json(analyze_top_skills(&population, limit)))
}
