//! Axum route handlers for browsing freelancers and hiring them.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::session::Session;
use crate::errors::AppError;
use crate::extract::{JsonBody, PathParams, QueryParams};
use crate::insights::matching::{smart_search, SearchWeights};
use crate::models::freelancer::FreelancerProfile;
use crate::models::hire::{Hire, HireRow, NewHire};
use crate::state::AppState;
use crate::store::seed::SKILL_CATALOG;

#[derive(Debug, Deserialize)]
pub struct FreelancerQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HireRequest {
    pub freelancer_id: Uuid,
    pub hours: f64,
}

/// GET /api/v1/freelancers
///
/// Highest rated first. With `q`, returns keyword search results instead.
pub async fn handle_list_freelancers(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<FreelancerQuery>,
) -> Result<Json<Vec<FreelancerProfile>>, AppError> {
    let freelancers = state.store.list_freelancers().await?;
    let freelancers = match params.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => smart_search(q, &freelancers, SearchWeights::default()),
        _ => freelancers,
    };
    Ok(Json(freelancers))
}

/// GET /api/v1/freelancers/:id
pub async fn handle_get_freelancer(
    State(state): State<AppState>,
    PathParams(id): PathParams<Uuid>,
) -> Result<Json<FreelancerProfile>, AppError> {
    let freelancer = state
        .store
        .get_freelancer(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Freelancer {id} not found")))?;
    Ok(Json(freelancer))
}

/// GET /api/v1/skills
pub async fn handle_skill_catalog() -> Json<&'static [&'static str]> {
    Json(SKILL_CATALOG)
}

/// POST /api/v1/hires
pub async fn handle_create_hire(
    State(state): State<AppState>,
    session: Session,
    JsonBody(req): JsonBody<HireRequest>,
) -> Result<(StatusCode, Json<HireRow>), AppError> {
    session.require_client()?;

    if !req.hours.is_finite() || req.hours <= 0.0 {
        return Err(AppError::Validation(
            "hours must be a positive number".to_string(),
        ));
    }

    let freelancer = state
        .store
        .get_freelancer(req.freelancer_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Freelancer {} not found", req.freelancer_id)))?;

    let hire = state
        .store
        .create_hire(NewHire {
            user_id: session.subject,
            freelancer_id: freelancer.id,
            hours: req.hours,
            total_cost: freelancer.hourly_rate * req.hours,
        })
        .await?;

    info!(
        "User {} hired freelancer {} for {}h",
        session.subject, freelancer.id, hire.hours
    );
    Ok((StatusCode::CREATED, Json(hire)))
}

/// GET /api/v1/hires
pub async fn handle_list_hires(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<Hire>>, AppError> {
    session.require_client()?;
    let hires = state.store.list_hires(session.subject).await?;
    Ok(Json(hires))
}
