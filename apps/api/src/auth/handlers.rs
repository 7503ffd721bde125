//! Axum route handlers for registration, login and the current session.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::session::Session;
use crate::errors::AppError;
use crate::extract::JsonBody;
use crate::models::freelancer::{FreelancerProfile, NewFreelancer};
use crate::models::user::{NewUser, Role, User};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct FreelancerRegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub experience: String,
}

#[derive(Debug, Serialize)]
pub struct UserSessionResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct FreelancerSessionResponse {
    pub token: String,
    pub freelancer: FreelancerProfile,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: MeUser,
}

#[derive(Debug, Serialize)]
pub struct MeUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub is_admin: bool,
}

/// POST /api/v1/auth/register
///
/// The very first account becomes the admin.
pub async fn handle_register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<UserSessionResponse>), AppError> {
    let email = normalize_email(&req.email);
    require_fields(&[
        ("name", req.name.trim()),
        ("email", email.as_str()),
        ("password", req.password.as_str()),
    ])?;

    if state.store.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let role = if state.store.count_users().await? == 0 {
        Role::Admin
    } else {
        Role::User
    };

    let account = state
        .store
        .create_user(NewUser {
            name: req.name.trim().to_string(),
            email,
            password_hash: hash_password(&req.password).await?,
            role,
        })
        .await?;

    let user = account.user;
    info!("User {} registered with role {}", user.id, user.role);
    let token = state.sessions.issue(user.id, &user.email, user.role)?;
    Ok((StatusCode::CREATED, Json(UserSessionResponse { token, user })))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<UserSessionResponse>, AppError> {
    let email = normalize_email(&req.email);
    require_fields(&[("email", email.as_str()), ("password", req.password.as_str())])?;

    let account = state
        .store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(invalid_credentials)?;
    if !verify_password(&req.password, &account.password_hash).await? {
        return Err(invalid_credentials());
    }

    let user = account.user;
    let token = state.sessions.issue(user.id, &user.email, user.role)?;
    Ok(Json(UserSessionResponse { token, user }))
}

/// GET /api/v1/auth/me
pub async fn handle_me(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<MeResponse>, AppError> {
    let user = match session.role {
        Role::Freelancer => {
            let profile = state
                .store
                .get_freelancer(session.subject)
                .await?
                .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;
            MeUser {
                id: profile.id,
                email: session.email.clone(),
                name: profile.name,
                role: Role::Freelancer,
                is_admin: session.is_admin(),
            }
        }
        Role::Admin | Role::User => {
            let user = state
                .store
                .find_user(session.subject)
                .await?
                .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?
                .user;
            MeUser {
                id: user.id,
                email: user.email,
                name: user.name,
                role: user.role,
                is_admin: user.role == Role::Admin,
            }
        }
    };
    Ok(Json(MeResponse { user }))
}

/// POST /api/v1/freelancer/register
pub async fn handle_freelancer_register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<FreelancerRegisterRequest>,
) -> Result<(StatusCode, Json<FreelancerSessionResponse>), AppError> {
    let email = normalize_email(&req.email);
    require_fields(&[
        ("name", req.name.trim()),
        ("email", email.as_str()),
        ("password", req.password.as_str()),
        ("description", req.description.trim()),
        ("experience", req.experience.trim()),
    ])?;

    let skills = dedup_skills(req.skills);
    if skills.is_empty() {
        return Err(AppError::Validation("skills cannot be empty".to_string()));
    }
    let hourly_rate = match req.hourly_rate {
        Some(rate) if rate.is_finite() && rate > 0.0 => rate,
        _ => {
            return Err(AppError::Validation(
                "hourly_rate must be a positive number".to_string(),
            ))
        }
    };

    if state.store.find_freelancer_account(&email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let freelancer = state
        .store
        .create_freelancer(NewFreelancer {
            email: email.clone(),
            password_hash: hash_password(&req.password).await?,
            name: req.name.trim().to_string(),
            skills,
            hourly_rate,
            description: req.description.trim().to_string(),
            experience: Some(req.experience.trim().to_string()),
        })
        .await?;

    let token = state
        .sessions
        .issue(freelancer.id, &email, Role::Freelancer)?;
    Ok((
        StatusCode::CREATED,
        Json(FreelancerSessionResponse { token, freelancer }),
    ))
}

/// POST /api/v1/freelancer/login
pub async fn handle_freelancer_login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<FreelancerSessionResponse>, AppError> {
    let email = normalize_email(&req.email);
    require_fields(&[("email", email.as_str()), ("password", req.password.as_str())])?;

    let account = state
        .store
        .find_freelancer_account(&email)
        .await?
        .ok_or_else(invalid_credentials)?;
    if !verify_password(&req.password, &account.password_hash).await? {
        return Err(invalid_credentials());
    }

    let token = state
        .sessions
        .issue(account.profile.id, &account.email, Role::Freelancer)?;
    Ok(Json(FreelancerSessionResponse {
        token,
        freelancer: account.profile,
    }))
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("invalid credentials".to_string())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn require_fields(fields: &[(&str, &str)]) -> Result<(), AppError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Trims labels and drops blanks and repeats, keeping first-seen order.
fn dedup_skills(skills: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(skills.len());
    for skill in skills {
        let skill = skill.trim();
        if !skill.is_empty() && !out.iter().any(|s| s == skill) {
            out.push(skill.to_string());
        }
    }
    out
}
