use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::freelancer::{
    FreelancerAccount, FreelancerProfile, FreelancerRow, NewFreelancer,
};
use crate::models::hire::{Hire, HireRow, NewHire, HIRE_STATUS_ACTIVE};
use crate::models::user::{NewUser, UserAccount, UserRow};
use crate::store::MarketplaceStore;

/// Postgres SQLSTATE for unique_violation.
const UNIQUE_VIOLATION: &str = "23505";

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn conflict_on_unique(err: sqlx::Error, message: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            AppError::Conflict(message.to_string())
        }
        _ => AppError::Database(err),
    }
}

#[async_trait]
impl MarketplaceStore for PgStore {
    async fn list_freelancers(&self) -> Result<Vec<FreelancerProfile>, AppError> {
        let rows = sqlx::query_as::<_, FreelancerRow>(
            "SELECT * FROM freelancers ORDER BY rating DESC, created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(FreelancerRow::into_profile).collect())
    }

    async fn get_freelancer(&self, id: Uuid) -> Result<Option<FreelancerProfile>, AppError> {
        let row = sqlx::query_as::<_, FreelancerRow>("SELECT * FROM freelancers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(FreelancerRow::into_profile))
    }

    async fn find_freelancer_account(
        &self,
        email: &str,
    ) -> Result<Option<FreelancerAccount>, AppError> {
        let row =
            sqlx::query_as::<_, FreelancerRow>("SELECT * FROM freelancers WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(FreelancerRow::into_account))
    }

    async fn create_freelancer(&self, new: NewFreelancer) -> Result<FreelancerProfile, AppError> {
        let skills = serde_json::to_string(&new.skills).map_err(anyhow::Error::from)?;

        let row = sqlx::query_as::<_, FreelancerRow>(
            r#"
            INSERT INTO freelancers
                (id, email, password_hash, name, skills, hourly_rate, rating,
                 description, experience, availability, completed_projects)
            VALUES ($1, $2, $3, $4, $5, $6, 0, $7, $8, 'available', 0)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(&new.name)
        .bind(&skills)
        .bind(new.hourly_rate)
        .bind(&new.description)
        .bind(&new.experience)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "Email already registered"))?;

        info!("Registered freelancer {}", row.id);
        Ok(row.into_profile())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<UserAccount>, AppError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(UserRow::into_account))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserAccount>, AppError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(UserRow::into_account))
    }

    async fn count_users(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn create_user(&self, new: NewUser) -> Result<UserAccount, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, name, email, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(new.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "User already exists"))?;

        info!("Registered user {} with role {}", row.id, row.role);
        Ok(row.into_account())
    }

    async fn create_hire(&self, new: NewHire) -> Result<HireRow, AppError> {
        let row = sqlx::query_as::<_, HireRow>(
            r#"
            INSERT INTO hires (id, user_id, freelancer_id, hours, total_cost, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(new.freelancer_id)
        .bind(new.hours)
        .bind(new.total_cost)
        .bind(HIRE_STATUS_ACTIVE)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_hires(&self, user_id: Uuid) -> Result<Vec<Hire>, AppError> {
        let hires = sqlx::query_as::<_, HireRow>(
            "SELECT * FROM hires WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        if hires.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = hires.iter().map(|h| h.freelancer_id).collect();
        let freelancers = sqlx::query_as::<_, FreelancerRow>(
            "SELECT * FROM freelancers WHERE id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        let profiles: Vec<FreelancerProfile> = freelancers
            .into_iter()
            .map(FreelancerRow::into_profile)
            .collect();

        Ok(hires
            .into_iter()
            .filter_map(|hire| {
                let freelancer = profiles.iter().find(|p| p.id == hire.freelancer_id)?.clone();
                Some(Hire { hire, freelancer })
            })
            .collect())
    }
}
