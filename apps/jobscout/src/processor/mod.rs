//! Job processor: normalization, exclusion, scoring, deduplication, ranking.
//!
//! Flow: normalize location → drop excluded → score → stamp `processed_at` →
//!       deduplicate → stable sort by score (descending).
//!
//! Each stage takes ownership of the jobs and hands them to the next; nothing
//! outside the returned list is mutated.

pub mod dedup;
pub mod exclusion;
pub mod location;
pub mod profile;
pub mod scoring;

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::job::JobRecord;
use crate::processor::dedup::deduplicate;
use crate::processor::exclusion::should_exclude;
use crate::processor::location::normalize_location;
use crate::processor::profile::KeywordProfile;
use crate::processor::scoring::score_job;

/// Inputs to a single processing pass that are not part of the jobs themselves.
#[derive(Debug, Clone, Copy)]
pub struct ProcessingContext {
    pub now: DateTime<Utc>,
}

impl ProcessingContext {
    pub fn now() -> Self {
        Self { now: Utc::now() }
    }
}

/// Counts reported by one processing pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingStats {
    pub input: usize,
    pub excluded: usize,
    pub duplicates_dropped: usize,
    pub output: usize,
}

#[derive(Debug, Clone)]
pub struct ProcessedJobs {
    pub jobs: Vec<JobRecord>,
    pub stats: ProcessingStats,
}

#[derive(Debug, Clone)]
pub struct JobProcessor {
    profile: KeywordProfile,
}

impl JobProcessor {
    pub fn new(profile: KeywordProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &KeywordProfile {
        &self.profile
    }

    /// Runs the full pipeline and returns the ranked, unique jobs.
    pub fn process(&self, jobs: Vec<JobRecord>, ctx: ProcessingContext) -> ProcessedJobs {
        let input = jobs.len();
        info!("Processing {input} jobs");

        let normalized = jobs.into_iter().map(with_normalized_location);

        let kept: Vec<JobRecord> = normalized
            .filter(|job| !should_exclude(job, &self.profile.exclude_keywords))
            .collect();
        let excluded = input - kept.len();

        let scored: Vec<JobRecord> = kept
            .into_iter()
            .map(|job| self.stamp(job, ctx))
            .collect();
        let scored_len = scored.len();

        let mut unique = deduplicate(scored);
        rank(&mut unique);

        let stats = ProcessingStats {
            input,
            excluded,
            duplicates_dropped: scored_len - unique.len(),
            output: unique.len(),
        };
        info!(
            "Processing complete: {} jobs after filtering and ranking ({} excluded, {} duplicates)",
            stats.output, stats.excluded, stats.duplicates_dropped
        );

        ProcessedJobs {
            jobs: unique,
            stats,
        }
    }

    fn stamp(&self, job: JobRecord, ctx: ProcessingContext) -> JobRecord {
        let score = score_job(&job, &self.profile);
        JobRecord {
            score,
            processed_at: Some(ctx.now),
            ..job
        }
    }
}

fn with_normalized_location(job: JobRecord) -> JobRecord {
    let location = normalize_location(&job.location);
    JobRecord { location, ..job }
}

/// Stable sort, highest score first. Equal scores keep their relative order.
fn rank(jobs: &mut [JobRecord]) {
    jobs.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}
