use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracing::warn;
use uuid::Uuid;

/// Raw `freelancers` row. `skills` is a JSON array stored as text.
#[derive(Debug, Clone, FromRow)]
pub struct FreelancerRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub skills: String,
    pub hourly_rate: f64,
    pub rating: f64,
    pub description: String,
    pub experience: Option<String>,
    pub availability: Option<String>,
    pub completed_projects: i32,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A freelancer as consumed by listings and the insights module.
/// Skills are already parsed into a sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreelancerProfile {
    pub id: Uuid,
    pub name: String,
    pub skills: Vec<String>,
    pub hourly_rate: f64,
    pub rating: f64,
    pub completed_projects: u32,
    pub description: String,
    pub experience: Option<String>,
    pub availability: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
}

/// Login material for a freelancer account. Never serialized.
#[derive(Debug, Clone)]
pub struct FreelancerAccount {
    pub profile: FreelancerProfile,
    pub email: String,
    pub password_hash: String,
}

/// Input for creating a freelancer account. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewFreelancer {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub skills: Vec<String>,
    pub hourly_rate: f64,
    pub description: String,
    pub experience: Option<String>,
}

impl FreelancerRow {
    pub fn into_account(self) -> FreelancerAccount {
        let skills = parse_skills(self.id, &self.skills);
        FreelancerAccount {
            email: self.email,
            password_hash: self.password_hash,
            profile: FreelancerProfile {
                id: self.id,
                name: self.name,
                skills,
                hourly_rate: self.hourly_rate,
                rating: self.rating,
                completed_projects: self.completed_projects.max(0) as u32,
                description: self.description,
                experience: self.experience,
                availability: self.availability,
                location: self.location,
                image_url: self.image_url,
            },
        }
    }

    pub fn into_profile(self) -> FreelancerProfile {
        self.into_account().profile
    }
}

/// Parses the stored skills column. A malformed value degrades to no skills.
pub fn parse_skills(id: Uuid, raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(skills) => skills,
        Err(e) => {
            warn!("Unparseable skills for freelancer {id}: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skills_json_array() {
        let skills = parse_skills(Uuid::nil(), r#"["React","Node.js"]"#);
        assert_eq!(skills, vec!["React".to_string(), "Node.js".to_string()]);
    }

    #[test]
    fn test_parse_skills_malformed_is_empty() {
        assert!(parse_skills(Uuid::nil(), "React, Node.js").is_empty());
        assert!(parse_skills(Uuid::nil(), r#"{"a":1}"#).is_empty());
    }

    #[test]
    fn test_negative_project_count_clamped() {
        let row = FreelancerRow {
            id: Uuid::new_v4(),
            email: "a@example.com".to_string(),
            password_hash: "x".to_string(),
            name: "A".to_string(),
            skills: "[]".to_string(),
            hourly_rate: 30.0,
            rating: 4.0,
            description: String::new(),
            experience: None,
            availability: None,
            completed_projects: -3,
            location: None,
            image_url: None,
            created_at: Utc::now(),
        };
        assert_eq!(row.into_profile().completed_projects, 0);
    }
}
