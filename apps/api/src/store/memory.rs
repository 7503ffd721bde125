use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::freelancer::{FreelancerAccount, FreelancerProfile, NewFreelancer};
use crate::models::hire::{Hire, HireRow, NewHire, HIRE_STATUS_ACTIVE};
use crate::models::user::{NewUser, User, UserAccount};
use crate::store::seed::demo_freelancers;
use crate::store::MarketplaceStore;

struct FreelancerRecord {
    profile: FreelancerProfile,
    /// Catalog entries carry no credentials and cannot log in.
    credentials: Option<(String, String)>,
}

#[derive(Default)]
struct MemoryData {
    freelancers: Vec<FreelancerRecord>,
    users: Vec<UserAccount>,
    hires: Vec<HireRow>,
}

/// Process-local store. Data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<MemoryData>,
}

impl MemoryStore {
    pub fn with_freelancers(profiles: Vec<FreelancerProfile>) -> Self {
        let freelancers = profiles
            .into_iter()
            .map(|profile| FreelancerRecord {
                profile,
                credentials: None,
            })
            .collect();
        Self {
            data: RwLock::new(MemoryData {
                freelancers,
                ..MemoryData::default()
            }),
        }
    }

    pub fn with_demo_catalog() -> anyhow::Result<Self> {
        Ok(Self::with_freelancers(demo_freelancers()?))
    }
}

#[async_trait]
impl MarketplaceStore for MemoryStore {
    async fn list_freelancers(&self) -> Result<Vec<FreelancerProfile>, AppError> {
        let data = self.data.read().await;
        let mut profiles: Vec<FreelancerProfile> =
            data.freelancers.iter().map(|r| r.profile.clone()).collect();
        profiles.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        Ok(profiles)
    }

    async fn get_freelancer(&self, id: Uuid) -> Result<Option<FreelancerProfile>, AppError> {
        let data = self.data.read().await;
        Ok(data
            .freelancers
            .iter()
            .find(|r| r.profile.id == id)
            .map(|r| r.profile.clone()))
    }

    async fn find_freelancer_account(
        &self,
        email: &str,
    ) -> Result<Option<FreelancerAccount>, AppError> {
        let data = self.data.read().await;
        Ok(data.freelancers.iter().find_map(|r| match &r.credentials {
            Some((e, hash)) if e == email => Some(FreelancerAccount {
                profile: r.profile.clone(),
                email: e.clone(),
                password_hash: hash.clone(),
            }),
            _ => None,
        }))
    }

    async fn create_freelancer(&self, new: NewFreelancer) -> Result<FreelancerProfile, AppError> {
        let mut data = self.data.write().await;
        let taken = data
            .freelancers
            .iter()
            .any(|r| matches!(&r.credentials, Some((e, _)) if *e == new.email));
        if taken {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let profile = FreelancerProfile {
            id: Uuid::new_v4(),
            name: new.name,
            skills: new.skills,
            hourly_rate: new.hourly_rate,
            rating: 0.0,
            completed_projects: 0,
            description: new.description,
            experience: new.experience,
            availability: Some("available".to_string()),
            location: None,
            image_url: None,
        };
        data.freelancers.push(FreelancerRecord {
            profile: profile.clone(),
            credentials: Some((new.email, new.password_hash)),
        });
        Ok(profile)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<UserAccount>, AppError> {
        let data = self.data.read().await;
        Ok(data.users.iter().find(|u| u.user.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserAccount>, AppError> {
        let data = self.data.read().await;
        Ok(data.users.iter().find(|u| u.user.email == email).cloned())
    }

    async fn count_users(&self) -> Result<i64, AppError> {
        Ok(self.data.read().await.users.len() as i64)
    }

    async fn create_user(&self, new: NewUser) -> Result<UserAccount, AppError> {
        let mut data = self.data.write().await;
        if data.users.iter().any(|u| u.user.email == new.email) {
            return Err(AppError::Conflict("User already exists".to_string()));
        }
        let account = UserAccount {
            user: User {
                id: Uuid::new_v4(),
                name: new.name,
                email: new.email,
                role: new.role,
                created_at: Utc::now(),
            },
            password_hash: new.password_hash,
        };
        data.users.push(account.clone());
        Ok(account)
    }

    async fn create_hire(&self, new: NewHire) -> Result<HireRow, AppError> {
        let hire = HireRow {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            freelancer_id: new.freelancer_id,
            hours: new.hours,
            total_cost: new.total_cost,
            status: HIRE_STATUS_ACTIVE.to_string(),
            created_at: Utc::now(),
        };
        self.data.write().await.hires.push(hire.clone());
        Ok(hire)
    }

    async fn list_hires(&self, user_id: Uuid) -> Result<Vec<Hire>, AppError> {
        let data = self.data.read().await;
        let mut hires: Vec<Hire> = data
            .hires
            .iter()
            .filter(|h| h.user_id == user_id)
            .filter_map(|h| {
                let freelancer = data
                    .freelancers
                    .iter()
                    .find(|r| r.profile.id == h.freelancer_id)?;
                Some(Hire {
                    hire: h.clone(),
                    freelancer: freelancer.profile.clone(),
                })
            })
            .collect();
        // push order is creation order
        hires.reverse();
        Ok(hires)
    }
}
