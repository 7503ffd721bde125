use anyhow::{Context, Result};
use serde::Deserialize;
use uuid::Uuid;

use crate::models::freelancer::FreelancerProfile;

const DEMO_FREELANCERS: &str = include_str!("../../data/freelancers.json");

/// Ordered skill universe offered by the registration form and used for feature vectors.
pub const SKILL_CATALOG: &[&str] = &[
    // Development
    "React", "Next.js", "TypeScript", "JavaScript", "Python", "Django", "Node.js", "Express.js",
    "Vue.js", "Angular", "PHP", "Laravel", "Ruby", "Ruby on Rails", "Java", "Spring Boot",
    "C#", ".NET", "AWS", "Azure", "Google Cloud", "Docker", "Kubernetes", "GraphQL",
    "MongoDB", "PostgreSQL", "MySQL", "Redis", "Elasticsearch", "Firebase",
    // Mobile
    "React Native", "Flutter", "iOS Development", "Swift", "Android Development", "Kotlin",
    "Xamarin", "Ionic", "Mobile UI/UX",
    // Design
    "UI Design", "UX Design", "Figma", "Adobe XD", "Sketch", "Photoshop", "Illustrator",
    "Motion Design", "Brand Design", "Web Design", "Mobile Design", "Design Systems",
    // Data & AI
    "Machine Learning", "Deep Learning", "TensorFlow", "PyTorch", "Data Analysis",
    "Data Visualization", "Natural Language Processing", "Computer Vision", "R Programming",
    "Statistical Analysis", "Big Data", "Apache Spark",
    // Marketing
    "SEO", "Content Marketing", "Social Media Marketing", "Email Marketing", "Google Ads",
    "Facebook Ads", "Marketing Analytics", "Growth Hacking", "Copywriting",
    // Project management
    "Agile", "Scrum", "Jira", "Project Planning", "Team Leadership", "Risk Management",
    "Stakeholder Management", "Budgeting", "Resource Management",
];

#[derive(Debug, Deserialize)]
struct DemoFreelancer {
    seq: u128,
    name: String,
    description: String,
    skills: Vec<String>,
    hourly_rate: f64,
    rating: f64,
    completed_projects: u32,
    location: String,
    image_url: String,
}

/// Loads the bundled demo catalog. Ids are stable across restarts.
pub fn demo_freelancers() -> Result<Vec<FreelancerProfile>> {
    let raw: Vec<DemoFreelancer> =
        serde_json::from_str(DEMO_FREELANCERS).context("bundled freelancer catalog is invalid")?;

    Ok(raw
        .into_iter()
        .map(|d| FreelancerProfile {
            id: Uuid::from_u128(d.seq),
            name: d.name,
            skills: d.skills,
            hourly_rate: d.hourly_rate,
            rating: d.rating,
            completed_projects: d.completed_projects,
            description: d.description,
            experience: None,
            availability: Some("available".to_string()),
            location: Some(d.location),
            image_url: Some(d.image_url),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::similarity::feature_vector;
    use std::collections::HashSet;

    #[test]
    fn test_demo_catalog_loads() {
        let catalog = demo_freelancers().unwrap();
        assert_eq!(catalog.len(), 12);
        assert_eq!(catalog[0].id, Uuid::from_u128(1));
        assert!(catalog.iter().all(|f| f.hourly_rate > 0.0));
        assert!(catalog.iter().all(|f| (0.0..=5.0).contains(&f.rating)));
    }

    #[test]
    fn test_skill_catalog_has_no_duplicates() {
        let unique: HashSet<_> = SKILL_CATALOG.iter().collect();
        assert_eq!(unique.len(), SKILL_CATALOG.len());
    }

    #[test]
    fn test_demo_profiles_project_onto_catalog() {
        let catalog = demo_freelancers().unwrap();
        let vector = feature_vector(&catalog[0].skills, SKILL_CATALOG);
        assert_eq!(vector.len(), SKILL_CATALOG.len());
        // React, Node.js, TypeScript, MongoDB, AWS, GraphQL
        assert_eq!(vector.iter().map(|&b| u32::from(b)).sum::<u32>(), 6);
    }
}
