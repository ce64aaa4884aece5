use chrono::{DateTime, Utc};

use crate::models::job::JobRecord;
use crate::reporter::markdown::{company_label, count_by, or_na};

pub const DIGEST_TITLE: &str = "Daily Roles Digest";
pub const DIGEST_LABELS: [&str; 2] = ["job-digest", "automated"];

const TOP_COMPANIES: usize = 10;
const TOP_JOBS: usize = 10;

/// Markdown body of the digest issue. `jobs` is expected in ranked order.
pub fn render_digest(jobs: &[JobRecord], report_path: &str, now: DateTime<Utc>) -> String {
    let stamp = now.format("%Y-%m-%d %H:%M:%S");
    let mut body = format!("# Daily Job Scraping Digest - {}\n\n", now.format("%Y-%m-%d"));

    body.push_str("## Summary\n\n");
    body.push_str(&format!("- **Total Jobs**: {}\n", jobs.len()));
    body.push_str(&format!("- **Report Generated**: {stamp} UTC\n"));
    body.push_str(&format!("- **Full Report**: [View Report]({report_path})\n\n"));

    body.push_str("## Top Companies\n\n");
    for (company, count) in count_by(jobs, |j| company_label(j).to_string())
        .into_iter()
        .take(TOP_COMPANIES)
    {
        body.push_str(&format!("- **{company}**: {count} jobs\n"));
    }

    body.push_str("\n## Top 10 Job Opportunities\n\n");
    for (idx, job) in jobs.iter().take(TOP_JOBS).enumerate() {
        body.push_str(&format!(
            "### {}. {} at {}\n",
            idx + 1,
            or_na(&job.title),
            or_na(&job.company)
        ));
        body.push_str(&format!("- **Location**: {}\n", or_na(&job.location)));
        body.push_str(&format!("- **Score**: {:.1}\n", job.score));
        body.push_str(&format!("- **Apply**: {}\n\n", or_na(&job.url)));
    }

    body.push_str("---\n\n");
    body.push_str(&format!(
        "*This issue is automatically updated daily. Last update: {stamp} UTC*"
    ));
    body
}
