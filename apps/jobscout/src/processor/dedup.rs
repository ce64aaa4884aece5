use std::collections::HashMap;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::models::job::JobRecord;

/// Derives the identity key of a posting from its company and title.
///
/// Company and title are lower-cased and trimmed; whitespace runs in the title
/// collapse to one space, then every character that is neither alphanumeric
/// nor whitespace is removed. The result `"{company}:{title}"` is hashed with
/// SHA-256 and hex encoded.
pub fn dedup_key(job: &JobRecord) -> String {
    let company = job.company.trim().to_lowercase();
    let title = normalize_title(&job.title);

    let digest = Sha256::digest(format!("{company}:{title}").as_bytes());
    hex::encode(digest)
}

fn normalize_title(title: &str) -> String {
    let collapsed = title
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    collapsed
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Removes postings that share a dedup key.
///
/// On a collision the record with the strictly longer description wins; ties
/// keep the first-seen record. A winning newcomer is moved to the end of the
/// output, after the previous survivor is removed. The loser is discarded
/// whole, score included.
pub fn deduplicate(jobs: Vec<JobRecord>) -> Vec<JobRecord> {
    let input_len = jobs.len();
    let mut unique: Vec<(String, JobRecord)> = Vec::with_capacity(input_len);
    let mut survivor_len: HashMap<String, usize> = HashMap::new();

    for job in jobs {
        let key = dedup_key(&job);
        let len = job.description_len();

        match survivor_len.get(&key).copied() {
            None => {
                survivor_len.insert(key.clone(), len);
                unique.push((key, job));
            }
            Some(existing_len) if len > existing_len => {
                debug!(
                    "Replacing duplicate '{}' at {} with a more detailed posting ({} > {} chars)",
                    job.title, job.company, len, existing_len
                );
                unique.retain(|(k, _)| k != &key);
                survivor_len.insert(key.clone(), len);
                unique.push((key, job));
            }
            Some(_) => {
                debug!("Dropping duplicate '{}' at {}", job.title, job.company);
            }
        }
    }

    info!(
        "Deduplicated {} jobs to {} unique jobs",
        input_len,
        unique.len()
    );
    unique.into_iter().map(|(_, job)| job).collect()
}
