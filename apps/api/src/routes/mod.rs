pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::insights::handlers as insights;
use crate::marketplace::handlers as marketplace;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/api/v1/auth/register", post(auth::handle_register))
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/me", get(auth::handle_me))
        .route(
            "/api/v1/freelancer/register",
            post(auth::handle_freelancer_register),
        )
        .route(
            "/api/v1/freelancer/login",
            post(auth::handle_freelancer_login),
        )
        // Marketplace
        .route(
            "/api/v1/freelancers",
            get(marketplace::handle_list_freelancers),
        )
        .route(
            "/api/v1/freelancers/:id",
            get(marketplace::handle_get_freelancer),
        )
        .route("/api/v1/skills", get(marketplace::handle_skill_catalog))
        .route(
            "/api/v1/hires",
            get(marketplace::handle_list_hires).post(marketplace::handle_create_hire),
        )
        // Insights
        .route("/api/v1/insights", post(insights::handle_insight))
        .route(
            "/api/v1/insights/top-skills",
            get(insights::handle_top_skills),
        )
        .with_state(state)
}
