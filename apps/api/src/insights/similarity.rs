use std::collections::HashSet;

/// Jaccard index between two skill sets: |A ∩ B| / |A ∪ B|.
///
/// Duplicates are ignored. Returns 0.0 when both sets are empty.
pub fn skill_similarity<A, B>(a: &[A], b: &[B]) -> f64
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let left: HashSet<&str> = a.iter().map(AsRef::as_ref).collect();
    let right: HashSet<&str> = b.iter().map(AsRef::as_ref).collect();

    let union = left.union(&right).count();
    if union == 0 {
        return 0.0;
    }
    let common = left.intersection(&right).count();
    common as f64 / union as f64
}

/// Presence indicator per entry of an ordered skill universe.
pub fn feature_vector<S, U>(skills: &[S], universe: &[U]) -> Vec<u8>
where
    S: AsRef<str>,
    U: AsRef<str>,
{
    let held: HashSet<&str> = skills.iter().map(AsRef::as_ref).collect();
    universe
        .iter()
        .map(|skill| u8::from(held.contains(skill.as_ref())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sets_are_zero_not_nan() {
        let empty: [&str; 0] = [];
        let s = skill_similarity(&empty, &empty);
        assert_eq!(s, 0.0);
    }

    #[test]
    fn test_identical_sets_are_one() {
        let a = ["Rust", "SQL"];
        assert_eq!(skill_similarity(&a, &a), 1.0);
    }

    #[test]
    fn test_symmetric() {
        let a = ["React", "Node.js", "AWS"];
        let b = ["React", "SQL"];
        assert_eq!(skill_similarity(&a, &b), skill_similarity(&b, &a));
        // 1 common of 4 distinct
        assert!((skill_similarity(&a, &b) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_duplicates_ignored() {
        let a = ["React", "React"];
        let b = ["React"];
        assert_eq!(skill_similarity(&a, &b), 1.0);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(skill_similarity(&["react"], &["React"]), 0.0);
    }

    #[test]
    fn test_one_side_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(skill_similarity(&empty, &["Go"]), 0.0);
    }

    #[test]
    fn test_feature_vector_follows_universe_order() {
        let universe = ["Go", "Rust", "SQL", "React"];
        let v = feature_vector(&["SQL", "Go"], &universe);
        assert_eq!(v, vec![1, 0, 1, 0]);
    }
}
