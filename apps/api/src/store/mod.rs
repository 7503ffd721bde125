//! Persistence seam. Everything the handlers read or write goes through
//! `MarketplaceStore`.
//!
//! `AppState` holds an `Arc<dyn MarketplaceStore>`, chosen at startup:
//! `PgStore` when `DATABASE_URL` is set, otherwise `MemoryStore` seeded with
//! the bundled demo catalog.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::freelancer::{FreelancerAccount, FreelancerProfile, NewFreelancer};
use crate::models::hire::{Hire, HireRow, NewHire};
use crate::models::user::{NewUser, UserAccount};

pub mod memory;
pub mod postgres;
pub mod seed;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait MarketplaceStore: Send + Sync {
    /// All freelancers, highest rating first.
    async fn list_freelancers(&self) -> Result<Vec<FreelancerProfile>, AppError>;

    async fn get_freelancer(&self, id: Uuid) -> Result<Option<FreelancerProfile>, AppError>;

    async fn find_freelancer_account(
        &self,
        email: &str,
    ) -> Result<Option<FreelancerAccount>, AppError>;

    async fn create_freelancer(&self, new: NewFreelancer) -> Result<FreelancerProfile, AppError>;

    async fn find_user(&self, id: Uuid) -> Result<Option<UserAccount>, AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserAccount>, AppError>;

    async fn count_users(&self) -> Result<i64, AppError>;

    async fn create_user(&self, new: NewUser) -> Result<UserAccount, AppError>;

    async fn create_hire(&self, new: NewHire) -> Result<HireRow, AppError>;

    /// Hires made by `user_id`, newest first.
    async fn list_hires(&self, user_id: Uuid) -> Result<Vec<Hire>, AppError>;
}
