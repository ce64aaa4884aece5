//! Writes the aggregated JSON, the dated Markdown report and the AI insights
//! file.

pub mod markdown;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assistant::AiInsights;
use crate::errors::AppError;
use crate::models::job::JobRecord;

pub const JOBS_FILE: &str = "jobs_agg.json";
pub const INSIGHTS_FILE: &str = "ai_insights.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub markdown: PathBuf,
}

#[derive(Serialize)]
struct JobsDocument<'a> {
    generated_at: DateTime<Utc>,
    total_jobs: usize,
    jobs: &'a [JobRecord],
}

#[derive(Debug, Clone)]
pub struct Reporter {
    data_dir: PathBuf,
    report_dir: PathBuf,
}

impl Reporter {
    /// Creates both output directories if they do not exist yet.
    pub fn new(data_dir: impl Into<PathBuf>, report_dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let data_dir = data_dir.into();
        let report_dir = report_dir.into();
        fs::create_dir_all(&data_dir)?;
        fs::create_dir_all(&report_dir)?;
        Ok(Self {
            data_dir,
            report_dir,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn report_dir(&self) -> &Path {
        &self.report_dir
    }

    pub fn save_jobs_json(&self, jobs: &[JobRecord], now: DateTime<Utc>) -> Result<PathBuf, AppError> {
        let path = self.data_dir.join(JOBS_FILE);
        let document = JobsDocument {
            generated_at: now,
            total_jobs: jobs.len(),
            jobs,
        };
        fs::write(&path, serde_json::to_string_pretty(&document)?)?;
        info!("Saved {} jobs to {}", jobs.len(), path.display());
        Ok(path)
    }

    pub fn generate_markdown_report(
        &self,
        jobs: &[JobRecord],
        now: DateTime<Utc>,
    ) -> Result<PathBuf, AppError> {
        let path = self
            .report_dir
            .join(format!("{}.md", now.format("%Y-%m-%d")));
        fs::write(&path, markdown::render_report(jobs, now))?;
        info!("Generated markdown report: {}", path.display());
        Ok(path)
    }

    pub fn generate_reports(&self, jobs: &[JobRecord], now: DateTime<Utc>) -> Result<ReportPaths, AppError> {
        Ok(ReportPaths {
            json: self.save_jobs_json(jobs, now)?,
            markdown: self.generate_markdown_report(jobs, now)?,
        })
    }

    pub fn save_ai_insights(&self, insights: &AiInsights) -> Result<PathBuf, AppError> {
        let path = self.data_dir.join(INSIGHTS_FILE);
        fs::write(&path, serde_json::to_string_pretty(insights)?)?;
        info!("Saved AI insights to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::JobAnalysis;
    use crate::models::job::JobSource;
    use chrono::TimeZone;
    use serde_json::Value;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 6, 0, 0).unwrap()
    }

    fn jobs() -> Vec<JobRecord> {
        vec![JobRecord {
            id: "gh_acme_1".to_string(),
            title: "Senior Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            source: Some(JobSource::Greenhouse),
            score: 15.0,
            processed_at: Some(now()),
            ..Default::default()
        }]
    }

    #[test]
    fn test_new_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = Reporter::new(dir.path().join("data"), dir.path().join("nested/report")).unwrap();
        assert!(reporter.data_dir().is_dir());
        assert!(reporter.report_dir().is_dir());
    }

    #[test]
    fn test_generate_reports_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = Reporter::new(dir.path().join("data"), dir.path().join("report")).unwrap();

        let paths = reporter.generate_reports(&jobs(), now()).unwrap();
        assert_eq!(paths.json, dir.path().join("data/jobs_agg.json"));
        assert_eq!(paths.markdown, dir.path().join("report/2026-10-19.md"));

        let doc: Value = serde_json::from_str(&fs::read_to_string(&paths.json).unwrap()).unwrap();
        assert_eq!(doc["total_jobs"], 1);
        assert_eq!(doc["generated_at"], "2026-10-19T06:00:00Z");
        assert_eq!(doc["jobs"][0]["id"], "gh_acme_1");
        assert_eq!(doc["jobs"][0]["source"], "greenhouse");

        let md = fs::read_to_string(&paths.markdown).unwrap();
        assert!(md.contains("### 1. Senior Engineer"));
    }

    #[test]
    fn test_empty_job_list_still_writes() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = Reporter::new(dir.path().join("data"), dir.path().join("report")).unwrap();
        let paths = reporter.generate_reports(&[], now()).unwrap();

        let doc: Value = serde_json::from_str(&fs::read_to_string(&paths.json).unwrap()).unwrap();
        assert_eq!(doc["total_jobs"], 0);
        assert_eq!(doc["jobs"], Value::Array(vec![]));
    }

    #[test]
    fn test_save_ai_insights() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = Reporter::new(dir.path().join("data"), dir.path().join("report")).unwrap();
        let insights = AiInsights {
            enabled: true,
            total_analyzed: 1,
            analyses: vec![JobAnalysis {
                job_id: "gh_acme_1".to_string(),
                title: "Senior Engineer".to_string(),
                company: "Acme".to_string(),
                analysis: "Strong match".to_string(),
            }],
            message: None,
        };

        let path = reporter.save_ai_insights(&insights).unwrap();
        let loaded: AiInsights = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(loaded, insights);
    }
}
