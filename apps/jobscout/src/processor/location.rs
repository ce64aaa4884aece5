/// Substrings that mark a posting as remote, matched case-insensitively.
const REMOTE_INDICATORS: &[&str] = &["remote", "anywhere", "distributed"];

pub const REMOTE: &str = "Remote";
pub const UNKNOWN: &str = "Unknown";

/// Canonicalizes a raw location string.
///
/// Empty (or whitespace-only) → `"Unknown"`; any remote indicator → `"Remote"`;
/// otherwise the trimmed input.
pub fn normalize_location(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return UNKNOWN.to_string();
    }

    let lower = trimmed.to_lowercase();
    if REMOTE_INDICATORS.iter().any(|term| lower.contains(term)) {
        return REMOTE.to_string();
    }

    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_variants() {
        assert_eq!(normalize_location("Remote - US"), "Remote");
        assert_eq!(normalize_location("anywhere"), "Remote");
        assert_eq!(normalize_location("Distributed team, EU hours"), "Remote");
        assert_eq!(normalize_location("REMOTE"), "Remote");
    }

    #[test]
    fn test_empty_is_unknown() {
        assert_eq!(normalize_location(""), "Unknown");
        assert_eq!(normalize_location("   "), "Unknown");
    }

    #[test]
    fn test_other_locations_trimmed() {
        assert_eq!(normalize_location("  San Francisco, CA "), "San Francisco, CA");
        assert_eq!(normalize_location("Berlin"), "Berlin");
    }
}
