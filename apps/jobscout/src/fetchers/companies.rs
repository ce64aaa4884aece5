use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::job::JobSource;

/// One entry of the companies document.
///
/// Greenhouse boards are addressed by `board_token`; Lever and Ashby by
/// `board_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyEntry {
    pub name: String,
    #[serde(default)]
    pub ats: String,
    #[serde(default)]
    pub board_token: Option<String>,
    #[serde(default)]
    pub board_url: Option<String>,
}

impl CompanyEntry {
    pub fn source(&self) -> Option<JobSource> {
        JobSource::parse(&self.ats)
    }

    /// The board identity the adapter for `source` expects, if configured.
    pub fn identity_for(&self, source: JobSource) -> Option<&str> {
        let identity = match source {
            JobSource::Greenhouse => self.board_token.as_deref(),
            JobSource::Lever | JobSource::Ashby => self.board_url.as_deref(),
        };
        identity.map(str::trim).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
struct CompaniesDocument {
    #[serde(default)]
    companies: Option<Vec<CompanyEntry>>,
}

pub fn load_companies(path: &Path) -> Result<Vec<CompanyEntry>, AppError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        AppError::config(format!(
            "cannot read companies configuration {}: {e}",
            path.display()
        ))
    })?;
    parse_companies(&text)
}

pub fn parse_companies(text: &str) -> Result<Vec<CompanyEntry>, AppError> {
    let value: serde_yaml::Value = serde_yaml::from_str(text)
        .map_err(|e| AppError::config(format!("invalid companies configuration: {e}")))?;
    if value.is_null() {
        return Ok(Vec::new());
    }
    let doc: CompaniesDocument = serde_yaml::from_value(value)
        .map_err(|e| AppError::config(format!("invalid companies configuration: {e}")))?;
    Ok(doc.companies.unwrap_or_default())
}
