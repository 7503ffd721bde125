use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::insights::similarity::skill_similarity;
use crate::models::freelancer::FreelancerProfile;

pub const DEFAULT_SIMILAR_LIMIT: usize = 5;
pub const DEFAULT_SKILL_LIMIT: usize = 3;

/// How many neighbours feed the price estimate.
const PRICE_SAMPLE_SIZE: usize = 10;
const DEFAULT_PRICE_RANGE: PriceRange = PriceRange { min: 20, max: 50 };
const PRICE_FLOOR: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub match_percentage: f64,
    pub recommendations: Vec<String>,
}

/// Ranks the population by skill similarity to `target_skills`, best first.
/// Equal scores keep their input order.
pub fn recommend_similar_profiles<'a, S: AsRef<str>>(
    target_skills: &[S],
    population: &'a [FreelancerProfile],
    limit: usize,
) -> Vec<&'a FreelancerProfile> {
    let mut scored: Vec<(f64, &FreelancerProfile)> = population
        .iter()
        .map(|f| (skill_similarity(target_skills, &f.skills), f))
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().take(limit).map(|(_, f)| f).collect()
}

/// Hourly rate band from the ten most similar profiles: mean ± population std-dev.
pub fn predict_price_range<S: AsRef<str>>(
    skills: &[S],
    population: &[FreelancerProfile],
) -> PriceRange {
    let similar = recommend_similar_profiles(skills, population, PRICE_SAMPLE_SIZE);
    if similar.is_empty() {
        return DEFAULT_PRICE_RANGE;
    }

    let n = similar.len() as f64;
    let mean = similar.iter().map(|f| f.hourly_rate).sum::<f64>() / n;
    let variance = similar
        .iter()
        .map(|f| (f.hourly_rate - mean).powi(2))
        .sum::<f64>()
        / n;
    let std_dev = variance.sqrt();

    PriceRange {
        min: ((mean - std_dev).round() as i64).max(PRICE_FLOOR),
        max: (mean + std_dev).round() as i64,
    }
}

/// Suggests skills that co-occur with the ones already held.
///
/// score = profiles carrying the skill alongside a current skill / profiles carrying it.
/// Skills that never co-occur are not candidates.
pub fn recommend_skills<S: AsRef<str>>(
    current_skills: &[S],
    population: &[FreelancerProfile],
    limit: usize,
) -> Vec<String> {
    let current: HashSet<&str> = current_skills.iter().map(AsRef::as_ref).collect();

    // first-seen order, used to break score ties
    let mut order: Vec<&str> = Vec::new();
    let mut frequency: HashMap<&str, u32> = HashMap::new();
    let mut co_occurrence: HashMap<&str, u32> = HashMap::new();

    for freelancer in population {
        let overlaps = freelancer
            .skills
            .iter()
            .any(|s| current.contains(s.as_str()));

        let mut seen: HashSet<&str> = HashSet::new();
        for skill in freelancer.skills.iter().map(String::as_str) {
            if current.contains(skill) || !seen.insert(skill) {
                continue;
            }
            *frequency.entry(skill).or_insert(0) += 1;
            if overlaps {
                let count = co_occurrence.entry(skill).or_insert(0);
                if *count == 0 {
                    order.push(skill);
                }
                *count += 1;
            }
        }
    }

    let mut scored: Vec<(&str, f64)> = order
        .into_iter()
        .map(|skill| {
            let co = co_occurrence[skill] as f64;
            let freq = frequency[skill].max(1) as f64;
            (skill, co / freq)
        })
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored
        .into_iter()
        .take(limit)
        .map(|(skill, _)| skill.to_string())
        .collect()
}

/// Partitions `required_skills` against a profile and phrases a learning hint
/// for every missing skill.
///
/// Matching is exact. The transferable-skill hint is looser:
/// a held skill counts as related when either label contains the other,
/// ignoring case. An empty requirement list yields a 0% match.
pub fn analyze_skill_gap<S: AsRef<str>>(
    required_skills: &[S],
    profile: &FreelancerProfile,
) -> SkillGap {
    let held: HashSet<&str> = profile.skills.iter().map(String::as_str).collect();

    let (matching, missing): (Vec<&str>, Vec<&str>) = required_skills
        .iter()
        .map(AsRef::as_ref)
        .partition(|skill| held.contains(skill));

    let match_percentage = if required_skills.is_empty() {
        0.0
    } else {
        matching.len() as f64 / required_skills.len() as f64 * 100.0
    };

    let recommendations = missing
        .iter()
        .map(|skill| {
            let wanted = skill.to_lowercase();
            let related: Vec<&str> = profile
                .skills
                .iter()
                .filter(|s| {
                    let have = s.to_lowercase();
                    have.contains(&wanted) || wanted.contains(&have)
                })
                .map(String::as_str)
                .collect();

            if related.is_empty() {
                format!("Consider learning {skill} to improve your job matches")
            } else {
                format!(
                    "You have experience in {}, which could help you learn {skill}",
                    related.join(", ")
                )
            }
        })
        .collect();

    SkillGap {
        matching_skills: matching.into_iter().map(str::to_string).collect(),
        missing_skills: missing.into_iter().map(str::to_string).collect(),
        match_percentage,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::test_support::profile;

    fn pair() -> Vec<FreelancerProfile> {
        vec![
            profile("Ada", &["React", "Node.js"], 50.0, 4.8, 30),
            profile("Ben", &["React", "SQL", "Go"], 40.0, 4.0, 10),
        ]
    }

    #[test]
    fn test_similar_profiles_best_first() {
        let population = pair();
        let top = recommend_similar_profiles(&["React"], &population, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "Ada");
    }

    #[test]
    fn test_similar_profiles_ties_keep_input_order() {
        let population = vec![
            profile("First", &["Go"], 40.0, 4.0, 1),
            profile("Second", &["Go"], 40.0, 4.0, 1),
            profile("Third", &["Go"], 40.0, 4.0, 1),
        ];
        let names: Vec<_> = recommend_similar_profiles(&["Go"], &population, 3)
            .into_iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_similar_profiles_limit_larger_than_population() {
        let population = pair();
        assert_eq!(recommend_similar_profiles(&["React"], &population, 10).len(), 2);
    }

    #[test]
    fn test_price_range_default_without_population() {
        let empty: [&str; 0] = [];
        assert_eq!(
            predict_price_range(&empty, &[]),
            PriceRange { min: 20, max: 50 }
        );
    }

    #[test]
    fn test_price_range_mean_plus_minus_std_dev() {
        // mean 45, std-dev 5
        let range = predict_price_range(&["React"], &pair());
        assert_eq!(range, PriceRange { min: 40, max: 50 });
    }

    #[test]
    fn test_price_range_floor_is_ten() {
        let population = vec![
            profile("Cheap", &["SEO"], 5.0, 4.0, 1),
            profile("Dear", &["SEO"], 95.0, 4.0, 1),
        ];
        // mean 50, std-dev 45
        let range = predict_price_range(&["SEO"], &population);
        assert_eq!(range, PriceRange { min: 10, max: 95 });
    }

    #[test]
    fn test_recommend_skills_excludes_current_and_unrelated() {
        let population = vec![
            profile("A", &["React", "TypeScript"], 50.0, 4.5, 10),
            profile("B", &["React", "GraphQL"], 50.0, 4.5, 10),
            profile("C", &["Python", "Django"], 50.0, 4.5, 10),
        ];
        let skills = recommend_skills(&["React"], &population, 10);
        assert!(!skills.contains(&"React".to_string()));
        assert!(!skills.contains(&"Python".to_string()));
        assert!(!skills.contains(&"Django".to_string()));
        assert_eq!(skills, vec!["TypeScript".to_string(), "GraphQL".to_string()]);
    }

    #[test]
    fn test_recommend_skills_scores_by_conditional_ratio() {
        let population = vec![
            profile("A", &["React", "Docker"], 50.0, 4.5, 10),
            profile("B", &["Go", "Docker"], 50.0, 4.5, 10),
            profile("C", &["React", "Jest"], 50.0, 4.5, 10),
        ];
        // Jest 1/1 beats Docker 1/2
        let skills = recommend_skills(&["React"], &population, 2);
        assert_eq!(skills, vec!["Jest".to_string(), "Docker".to_string()]);
    }

    #[test]
    fn test_recommend_skills_respects_limit() {
        let population = vec![profile("A", &["React", "X", "Y", "Z"], 50.0, 4.5, 10)];
        assert_eq!(recommend_skills(&["React"], &population, 2).len(), 2);
    }

    #[test]
    fn test_skill_gap_partition_and_percentage() {
        let f = profile("A", &["React", "JavaScript"], 50.0, 4.5, 10);
        let gap = analyze_skill_gap(&["React", "Java", "Kubernetes", "Go"], &f);
        assert_eq!(gap.matching_skills, vec!["React".to_string()]);
        assert_eq!(gap.missing_skills.len(), 3);
        assert!((gap.match_percentage - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_skill_gap_transferable_hint_is_case_insensitive() {
        let f = profile("A", &["JavaScript"], 50.0, 4.5, 10);
        let gap = analyze_skill_gap(&["java"], &f);
        assert_eq!(
            gap.recommendations[0],
            "You have experience in JavaScript, which could help you learn java"
        );
    }

    #[test]
    fn test_skill_gap_generic_hint() {
        let f = profile("A", &["Figma"], 50.0, 4.5, 10);
        let gap = analyze_skill_gap(&["Rust"], &f);
        assert_eq!(
            gap.recommendations[0],
            "Consider learning Rust to improve your job matches"
        );
    }

    #[test]
    fn test_skill_gap_empty_requirements_is_zero() {
        let f = profile("A", &["Figma"], 50.0, 4.5, 10);
        let empty: [&str; 0] = [];
        let gap = analyze_skill_gap(&empty, &f);
        assert_eq!(gap.match_percentage, 0.0);
        assert!(gap.recommendations.is_empty());
    }
}
