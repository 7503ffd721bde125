use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::freelancer::FreelancerProfile;

pub const HIRE_STATUS_ACTIVE: &str = "active";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HireRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub freelancer_id: Uuid,
    pub hours: f64,
    pub total_cost: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// A hire with the hired freelancer embedded, as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct Hire {
    #[serde(flatten)]
    pub hire: HireRow,
    pub freelancer: FreelancerProfile,
}

#[derive(Debug, Clone)]
pub struct NewHire {
    pub user_id: Uuid,
    pub freelancer_id: Uuid,
    pub hours: f64,
    pub total_cost: f64,
}
