//! Keyword profile: the structured document that drives exclusion and scoring.
//!
//! Recognized keys: `keywords.high_priority`, `keywords.medium_priority`,
//! `keywords.low_priority`, `preferred_skills`, `preferred_locations`,
//! `exclude_keywords`. Absent (or null) keys default to empty lists; a key of
//! the wrong type is a configuration error.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordProfile {
    pub high_priority: Vec<String>,
    pub medium_priority: Vec<String>,
    pub low_priority: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub preferred_locations: Vec<String>,
    pub exclude_keywords: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawProfile {
    #[serde(default)]
    keywords: Option<RawTiers>,
    #[serde(default)]
    preferred_skills: Option<Vec<String>>,
    #[serde(default)]
    preferred_locations: Option<Vec<String>>,
    #[serde(default)]
    exclude_keywords: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTiers {
    #[serde(default)]
    high_priority: Option<Vec<String>>,
    #[serde(default)]
    medium_priority: Option<Vec<String>>,
    #[serde(default)]
    low_priority: Option<Vec<String>>,
}

impl KeywordProfile {
    /// Reads and parses a YAML keyword profile from disk.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!(
                "cannot read keyword configuration {}: {e}",
                path.display()
            ))
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, AppError> {
        let value: serde_yaml::Value = serde_yaml::from_str(text)
            .map_err(|e| AppError::config(format!("invalid keyword configuration: {e}")))?;
        if value.is_null() {
            return Ok(Self::default());
        }
        let raw: RawProfile = serde_yaml::from_value(value)
            .map_err(|e| AppError::config(format!("invalid keyword configuration: {e}")))?;
        Ok(raw.into())
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, AppError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        let raw: RawProfile = serde_json::from_value(value)
            .map_err(|e| AppError::config(format!("invalid keyword configuration: {e}")))?;
        Ok(raw.into())
    }

    pub fn is_empty(&self) -> bool {
        self.high_priority.is_empty()
            && self.medium_priority.is_empty()
            && self.low_priority.is_empty()
            && self.preferred_skills.is_empty()
            && self.preferred_locations.is_empty()
            && self.exclude_keywords.is_empty()
    }
}

impl From<RawProfile> for KeywordProfile {
    fn from(raw: RawProfile) -> Self {
        let tiers = raw.keywords.unwrap_or_default();
        Self {
            high_priority: clean(tiers.high_priority),
            medium_priority: clean(tiers.medium_priority),
            low_priority: clean(tiers.low_priority),
            preferred_skills: clean(raw.preferred_skills),
            preferred_locations: clean(raw.preferred_locations),
            exclude_keywords: clean(raw.exclude_keywords),
        }
    }
}

/// Drops blank entries: an empty substring would match every record.
fn clean(list: Option<Vec<String>>) -> Vec<String> {
    list.unwrap_or_default()
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect()
}
