//! Markdown rendering for the daily report. Pure: the caller supplies `now`.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use scraper::Html;

use crate::models::job::JobRecord;

pub const TOP_JOBS_LIMIT: usize = 20;
pub const TOP_COMPANIES_LIMIT: usize = 5;
pub const JOBS_PER_COMPANY_LIMIT: usize = 10;
pub const DESCRIPTION_PREVIEW_CHARS: usize = 300;

pub fn render_report(jobs: &[JobRecord], now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let today = now.format("%Y-%m-%d");

    out.push_str(&format!("# Daily Job Scraping Report - {today}\n\n"));
    out.push_str(&format!(
        "Generated: {} UTC\n\n",
        now.format("%Y-%m-%d %H:%M:%S")
    ));

    // Summary
    let companies = count_by(jobs, |j| company_label(j).to_string());
    out.push_str("## Summary\n\n");
    out.push_str(&format!("- **Total Jobs Found**: {}\n", jobs.len()));
    out.push_str(&format!("- **Companies**: {}\n", companies.len()));
    out.push_str("- **Top Companies**:\n");
    for (company, count) in companies.iter().take(TOP_COMPANIES_LIMIT) {
        out.push_str(&format!("  - {company}: {count} jobs\n"));
    }
    out.push('\n');

    out.push_str("- **Sources**:\n");
    for (source, count) in count_by(jobs, |j| j.source_label().to_string()) {
        out.push_str(&format!("  - {source}: {count} jobs\n"));
    }
    out.push('\n');

    // Top jobs
    out.push_str("## Top Job Opportunities\n\n");
    out.push_str("Jobs ranked by relevance score:\n\n");
    for (idx, job) in jobs.iter().take(TOP_JOBS_LIMIT).enumerate() {
        out.push_str(&format!("### {}. {}\n\n", idx + 1, or_na(&job.title)));
        out.push_str(&format!("- **Company**: {}\n", or_na(&job.company)));
        out.push_str(&format!("- **Location**: {}\n", or_na(&job.location)));
        out.push_str(&format!("- **Relevance Score**: {:.1}\n", job.score));
        out.push_str(&format!(
            "- **Apply**: [{}]({})\n",
            or_na(&job.url),
            link_target(&job.url)
        ));
        out.push_str(&format!(
            "- **Description**: {}\n\n",
            or_na(&description_preview(&job.description, DESCRIPTION_PREVIEW_CHARS))
        ));
    }

    // Per company
    out.push_str("## All Jobs by Company\n\n");
    let mut by_company: BTreeMap<&str, Vec<&JobRecord>> = BTreeMap::new();
    for job in jobs {
        by_company.entry(company_label(job)).or_default().push(job);
    }
    for (company, company_jobs) in &by_company {
        out.push_str(&format!("### {} ({} jobs)\n\n", company, company_jobs.len()));
        for job in company_jobs.iter().take(JOBS_PER_COMPANY_LIMIT) {
            out.push_str(&format!(
                "- **{}** - {} [Apply]({}) (Score: {:.1})\n",
                or_na(&job.title),
                or_na(&job.location),
                link_target(&job.url),
                job.score
            ));
        }
        if company_jobs.len() > JOBS_PER_COMPANY_LIMIT {
            out.push_str(&format!(
                "\n  _...and {} more jobs_\n",
                company_jobs.len() - JOBS_PER_COMPANY_LIMIT
            ));
        }
        out.push('\n');
    }

    out.push_str("---\n\n");
    out.push_str("*Report generated by jobscout*\n");
    out
}

/// Counts jobs per key, highest count first; ties keep first-appearance order.
pub(crate) fn count_by<F>(jobs: &[JobRecord], key: F) -> Vec<(String, usize)>
where
    F: Fn(&JobRecord) -> String,
{
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for job in jobs {
        let k = key(job);
        match index.get(&k) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(k.clone(), order.len());
                order.push((k, 1));
            }
        }
    }
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
}

pub(crate) fn company_label(job: &JobRecord) -> &str {
    if job.company.trim().is_empty() {
        "Unknown"
    } else {
        &job.company
    }
}

pub(crate) fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

/// Plain-text preview of a description: markup and entities resolved,
/// whitespace collapsed, cut at `max_chars` characters with a trailing `...`.
///
/// Board content is often escaped HTML (`&lt;p&gt;We&amp;rsquo;re`), so the
/// text is parsed twice: once to unescape it and once to drop the tags.
pub fn description_preview(description: &str, max_chars: usize) -> String {
    let unescaped = fragment_text(description);
    let text = fragment_text(&unescaped);
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() > max_chars {
        let cut: String = collapsed.chars().take(max_chars).collect();
        format!("{}...", cut.trim_end())
    } else {
        collapsed
    }
}

/// Text nodes of an HTML fragment, joined with spaces so adjacent blocks
/// don't run together.
fn fragment_text(html: &str) -> String {
    Html::parse_fragment(html)
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ")
}

fn link_target(url: &str) -> &str {
    if url.trim().is_empty() {
        "#"
    } else {
        url
    }
}
