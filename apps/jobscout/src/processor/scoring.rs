//! Keyword relevance scoring.
//!
//! Pure and deterministic: the same job and profile always produce the same
//! score. Contributions:
//!
//! | signal | points |
//! |---|---|
//! | any high-priority keyword in title | +10 |
//! | any medium-priority keyword in title | +5 |
//! | any low-priority keyword in title | +2 |
//! | each distinct preferred skill in title or description | +1 |
//! | ≥5 skills matched / 3–4 skills matched | +5 / +2 (exclusive) |
//! | any preferred location in the normalized location | +3 |
//! | participation | +1 |

use std::collections::HashSet;

use crate::models::job::JobRecord;
use crate::processor::profile::KeywordProfile;

pub const HIGH_PRIORITY_POINTS: f64 = 10.0;
pub const MEDIUM_PRIORITY_POINTS: f64 = 5.0;
pub const LOW_PRIORITY_POINTS: f64 = 2.0;
pub const SKILL_POINTS: f64 = 1.0;
pub const MANY_SKILLS_BONUS: f64 = 5.0;
pub const SOME_SKILLS_BONUS: f64 = 2.0;
pub const LOCATION_POINTS: f64 = 3.0;
pub const PARTICIPATION_POINTS: f64 = 1.0;

const MANY_SKILLS_THRESHOLD: usize = 5;
const SOME_SKILLS_THRESHOLD: usize = 3;

/// Computes the relevance score of one job against a keyword profile.
///
/// Expects `job.location` to be normalized already.
pub fn score_job(job: &JobRecord, profile: &KeywordProfile) -> f64 {
    let title = job.title.to_lowercase();
    let description = job.description.to_lowercase();
    let location = job.location.to_lowercase();

    let mut score = 0.0;

    if any_contained(&profile.high_priority, &title) {
        score += HIGH_PRIORITY_POINTS;
    }
    if any_contained(&profile.medium_priority, &title) {
        score += MEDIUM_PRIORITY_POINTS;
    }
    if any_contained(&profile.low_priority, &title) {
        score += LOW_PRIORITY_POINTS;
    }

    let skills_matched = count_skills(&profile.preferred_skills, &title, &description);
    score += skills_matched as f64 * SKILL_POINTS;
    score += skill_bonus(skills_matched);

    if any_contained(&profile.preferred_locations, &location) {
        score += LOCATION_POINTS;
    }

    score + PARTICIPATION_POINTS
}

/// Number of distinct preferred skills present in the title or description.
pub fn count_skills(skills: &[String], title: &str, description: &str) -> usize {
    let mut seen = HashSet::new();
    skills
        .iter()
        .map(|s| s.to_lowercase())
        .filter(|s| seen.insert(s.clone()))
        .filter(|s| description.contains(s.as_str()) || title.contains(s.as_str()))
        .count()
}

fn skill_bonus(skills_matched: usize) -> f64 {
    if skills_matched >= MANY_SKILLS_THRESHOLD {
        MANY_SKILLS_BONUS
    } else if skills_matched >= SOME_SKILLS_THRESHOLD {
        SOME_SKILLS_BONUS
    } else {
        0.0
    }
}

fn any_contained(keywords: &[String], haystack: &str) -> bool {
    keywords
        .iter()
        .any(|kw| haystack.contains(&kw.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn job(title: &str, description: &str, location: &str) -> JobRecord {
        JobRecord {
            title: title.to_string(),
            description: description.to_string(),
            location: location.to_string(),
            ..Default::default()
        }
    }

    fn profile() -> KeywordProfile {
        KeywordProfile {
            high_priority: list(&["staff", "principal"]),
            medium_priority: list(&["senior"]),
            low_priority: list(&["engineer"]),
            preferred_skills: list(&["rust", "kubernetes", "postgres", "kafka", "terraform", "grpc"]),
            preferred_locations: list(&["remote", "berlin"]),
            exclude_keywords: vec![],
        }
    }

    #[test]
    fn test_empty_profile_scores_participation_only() {
        let score = score_job(&job("Anything", "", "Unknown"), &KeywordProfile::default());
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_all_title_tiers_stack() {
        // staff(10) + senior(5) + engineer(2) + participation(1)
        let score = score_job(&job("Senior Staff Engineer", "", "Unknown"), &profile());
        assert_eq!(score, 18.0);
    }

    #[test]
    fn test_high_tier_counts_once() {
        // staff + principal both present, still +10
        let score = score_job(&job("Staff Principal", "", "Unknown"), &profile());
        assert_eq!(score, 11.0);
    }

    #[test]
    fn test_three_skills_get_small_bonus() {
        // 3 skills (3) + bonus(2) + participation(1)
        let j = job("Developer", "rust, kafka and postgres", "Unknown");
        assert_eq!(score_job(&j, &profile()), 6.0);
    }

    #[test]
    fn test_five_skills_get_large_bonus_only() {
        // 5 skills (5) + bonus(5) + participation(1); the 3-skill bonus does not stack
        let j = job("Developer", "rust kubernetes postgres kafka terraform", "Unknown");
        assert_eq!(score_job(&j, &profile()), 11.0);
    }

    #[test]
    fn test_skill_in_title_counts() {
        let j = job("Rust Developer", "", "Unknown");
        assert_eq!(score_job(&j, &profile()), 2.0);
    }

    #[test]
    fn test_duplicate_skill_entries_count_once() {
        let mut p = KeywordProfile::default();
        p.preferred_skills = list(&["Rust", "rust", "RUST"]);
        let j = job("Developer", "rust everywhere", "Unknown");
        assert_eq!(score_job(&j, &p), 2.0);
    }

    #[test]
    fn test_preferred_location_matches_normalized() {
        let j = job("Developer", "", "Remote");
        assert_eq!(score_job(&j, &profile()), 4.0);
    }

    #[test]
    fn test_score_is_deterministic() {
        let j = job("Senior Rust Engineer", "kubernetes postgres grpc", "Berlin");
        let p = profile();
        assert_eq!(score_job(&j, &p), score_job(&j, &p));
    }

    #[test]
    fn test_count_skills_matches_description_or_title() {
        let skills = list(&["rust", "go"]);
        assert_eq!(count_skills(&skills, "rust dev", "we use go"), 2);
        assert_eq!(count_skills(&skills, "dev", "python"), 0);
    }
}
