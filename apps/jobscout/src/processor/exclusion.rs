use tracing::info;

use crate::models::job::JobRecord;

/// Returns the first exclude keyword found in the job's title or description.
///
/// The search text is `"{title} {description}"`, case-folded; keywords are
/// case-folded before the substring check.
pub fn matching_exclusion<'a>(job: &JobRecord, exclude_keywords: &'a [String]) -> Option<&'a str> {
    if exclude_keywords.is_empty() {
        return None;
    }

    let text = format!("{} {}", job.title, job.description).to_lowercase();
    exclude_keywords
        .iter()
        .find(|kw| text.contains(&kw.to_lowercase()))
        .map(String::as_str)
}

/// Whether the job must be dropped from the pipeline.
pub fn should_exclude(job: &JobRecord, exclude_keywords: &[String]) -> bool {
    match matching_exclusion(job, exclude_keywords) {
        Some(keyword) => {
            info!("Excluding job '{}' - contains '{}'", job.title, keyword);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, description: &str) -> JobRecord {
        JobRecord {
            title: title.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    fn keywords(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_title_match_excludes() {
        let kws = keywords(&["Intern"]);
        assert!(should_exclude(&job("Software Engineering Intern", ""), &kws));
    }

    #[test]
    fn test_description_match_is_case_insensitive() {
        let kws = keywords(&["security clearance"]);
        let j = job("Backend Engineer", "Active SECURITY CLEARANCE required.");
        assert!(should_exclude(&j, &kws));
    }

    #[test]
    fn test_first_match_reported() {
        let kws = keywords(&["php", "intern", "contract"]);
        let j = job("Intern", "PHP and contract work");
        assert_eq!(matching_exclusion(&j, &kws), Some("php"));
    }

    #[test]
    fn test_no_keywords_keeps_everything() {
        assert!(!should_exclude(&job("Intern", "php"), &[]));
    }

    #[test]
    fn test_no_match_keeps_job() {
        let kws = keywords(&["php"]);
        assert!(!should_exclude(&job("Rust Engineer", "Tokio and axum"), &kws));
    }
}
