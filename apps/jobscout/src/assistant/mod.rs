//! Career assistant on top of the chat-completion client.
//!
//! Every operation is optional: with no API key configured, or when a call
//! fails, the result is `None` and the pipeline carries on without it.

pub mod prompts;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::llm_client::LlmClient;
use crate::models::job::JobRecord;

pub const DESCRIPTION_PROMPT_CHARS: usize = 2000;
pub const INSIGHTS_SAMPLE: usize = 20;
pub const INSIGHTS_LIST_LIMIT: usize = 10;
pub const DISABLED_MESSAGE: &str = "AI analysis disabled - configure OPENAI_API_KEY to enable";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobAnalysis {
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub analysis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiInsights {
    pub enabled: bool,
    #[serde(default)]
    pub total_analyzed: usize,
    #[serde(default)]
    pub analyses: Vec<JobAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AiInsights {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            total_analyzed: 0,
            analyses: Vec::new(),
            message: Some(DISABLED_MESSAGE.to_string()),
        }
    }
}

/// The per-job assistance a caller can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistKind {
    Analysis,
    ResumeTips,
    CoverLetter,
    InterviewPrep,
}

#[derive(Clone, Default)]
pub struct AiAssistant {
    llm: Option<LlmClient>,
}

impl AiAssistant {
    pub fn new(llm: Option<LlmClient>) -> Self {
        Self { llm }
    }

    pub fn disabled() -> Self {
        Self { llm: None }
    }

    pub fn enabled(&self) -> bool {
        self.llm.is_some()
    }

    async fn ask(&self, task: &str, system: &str, prompt: String, max_tokens: u32) -> Option<String> {
        let Some(llm) = &self.llm else {
            warn!("OpenAI API key not configured - skipping {}", task);
            return None;
        };

        match llm.complete(&prompt, system, max_tokens).await {
            Ok(text) => Some(text),
            Err(e) => {
                error!("Error calling chat completion for {}: {}", task, e);
                None
            }
        }
    }

    pub async fn analyze_job_description(&self, job: &JobRecord) -> Option<JobAnalysis> {
        if !self.enabled() {
            return None;
        }
        let description = truncate_chars(&job.description, DESCRIPTION_PROMPT_CHARS);
        let prompt = prompts::analysis_prompt(&job.title, &job.company, description);

        let analysis = self
            .ask(
                "job analysis",
                prompts::ANALYSIS_SYSTEM,
                prompt,
                prompts::ANALYSIS_MAX_TOKENS,
            )
            .await?;

        Some(JobAnalysis {
            job_id: job.id.clone(),
            title: job.title.clone(),
            company: job.company.clone(),
            analysis,
        })
    }

    pub async fn generate_resume_tips(
        &self,
        job: &JobRecord,
        user_skills: &[String],
    ) -> Option<String> {
        if !self.enabled() {
            return None;
        }
        let description = truncate_chars(&job.description, DESCRIPTION_PROMPT_CHARS);
        let prompt = prompts::resume_tips_prompt(&job.title, description, user_skills);
        self.ask(
            "resume tips",
            prompts::RESUME_SYSTEM,
            prompt,
            prompts::RESUME_MAX_TOKENS,
        )
        .await
    }

    pub async fn generate_cover_letter_outline(&self, job: &JobRecord) -> Option<String> {
        if !self.enabled() {
            return None;
        }
        let description = truncate_chars(&job.description, DESCRIPTION_PROMPT_CHARS);
        let prompt = prompts::cover_letter_prompt(&job.title, &job.company, description);
        self.ask(
            "cover letter outline",
            prompts::COVER_LETTER_SYSTEM,
            prompt,
            prompts::COVER_LETTER_MAX_TOKENS,
        )
        .await
    }

    pub async fn generate_interview_prep(&self, job: &JobRecord) -> Option<String> {
        if !self.enabled() {
            return None;
        }
        let description = truncate_chars(&job.description, DESCRIPTION_PROMPT_CHARS);
        let prompt = prompts::interview_prep_prompt(&job.title, &job.company, description);
        self.ask(
            "interview prep",
            prompts::INTERVIEW_SYSTEM,
            prompt,
            prompts::INTERVIEW_MAX_TOKENS,
        )
        .await
    }

    /// Market-level commentary over the first 20 jobs: up to 10 titles and
    /// up to 10 distinct companies.
    pub async fn generate_career_insights(&self, jobs: &[JobRecord]) -> Option<String> {
        if !self.enabled() || jobs.is_empty() {
            return None;
        }

        let sample = &jobs[..jobs.len().min(INSIGHTS_SAMPLE)];
        let titles: Vec<&str> = sample
            .iter()
            .take(INSIGHTS_LIST_LIMIT)
            .map(|j| j.title.as_str())
            .collect();

        let mut seen = HashSet::new();
        let companies: Vec<&str> = sample
            .iter()
            .map(|j| j.company.as_str())
            .filter(|c| seen.insert(*c))
            .take(INSIGHTS_LIST_LIMIT)
            .collect();

        let prompt = prompts::career_insights_prompt(&titles, &companies);
        self.ask(
            "career insights",
            prompts::INSIGHTS_SYSTEM,
            prompt,
            prompts::INSIGHTS_MAX_TOKENS,
        )
        .await
    }

    /// Runs the requested assistance for one job. `Analysis` yields the
    /// analysis text only.
    pub async fn assist(
        &self,
        job: &JobRecord,
        kind: AssistKind,
        user_skills: &[String],
    ) -> Option<String> {
        match kind {
            AssistKind::Analysis => self
                .analyze_job_description(job)
                .await
                .map(|a| a.analysis),
            AssistKind::ResumeTips => self.generate_resume_tips(job, user_skills).await,
            AssistKind::CoverLetter => self.generate_cover_letter_outline(job).await,
            AssistKind::InterviewPrep => self.generate_interview_prep(job).await,
        }
    }

    /// Analyzes the first `top_n` ranked jobs sequentially; failed analyses
    /// are left out.
    pub async fn analyze_top_jobs(&self, jobs: &[JobRecord], top_n: usize) -> AiInsights {
        if !self.enabled() {
            info!("OpenAI API key not configured - skipping AI analysis");
            return AiInsights::disabled();
        }

        let mut analyses = Vec::new();
        for job in jobs.iter().take(top_n) {
            info!("Analyzing job: {} at {}", job.title, job.company);
            if let Some(analysis) = self.analyze_job_description(job).await {
                analyses.push(analysis);
            }
        }

        AiInsights {
            enabled: true,
            total_analyzed: analyses.len(),
            analyses,
            message: None,
        }
    }
}

/// Prefix of at most `max_chars` characters, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use reqwest::Client;
    use serde_json::json;

    fn job(id: &str, title: &str, company: &str) -> JobRecord {
        JobRecord {
            id: id.to_string(),
            title: title.to_string(),
            company: company.to_string(),
            description: "Build reliable systems".to_string(),
            ..Default::default()
        }
    }

    fn assistant_for(server: &mockito::Server) -> AiAssistant {
        AiAssistant::new(Some(LlmClient::new(
            Client::new(),
            "sk-test".to_string(),
            "gpt-3.5-turbo".to_string(),
            &server.url(),
        )))
    }

    fn completion(text: &str) -> String {
        json!({ "choices": [{ "message": { "content": text } }] }).to_string()
    }

    #[tokio::test]
    async fn test_disabled_assistant_returns_nothing() {
        let assistant = AiAssistant::disabled();
        let j = job("1", "Engineer", "Acme");

        assert!(!assistant.enabled());
        assert!(assistant.analyze_job_description(&j).await.is_none());
        assert!(assistant.generate_resume_tips(&j, &[]).await.is_none());
        assert!(assistant.generate_cover_letter_outline(&j).await.is_none());
        assert!(assistant.generate_interview_prep(&j).await.is_none());
        assert!(assistant.generate_career_insights(&[j]).await.is_none());

        let insights = assistant.analyze_top_jobs(&[], 5).await;
        assert_eq!(insights, AiInsights::disabled());
        let value = serde_json::to_value(&insights).unwrap();
        assert_eq!(value["enabled"], false);
        assert_eq!(value["message"], DISABLED_MESSAGE);
    }

    #[tokio::test]
    async fn test_analyze_top_jobs_limits_and_collects() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_body(Matcher::PartialJson(json!({ "max_tokens": 700 })))
            .with_status(200)
            .with_body(completion("Looks solid."))
            .expect(2)
            .create_async()
            .await;

        let jobs = vec![
            job("1", "Staff Engineer", "Acme"),
            job("2", "Engineer", "Globex"),
            job("3", "Designer", "Initech"),
        ];
        let insights = assistant_for(&server).analyze_top_jobs(&jobs, 2).await;

        assert!(insights.enabled);
        assert_eq!(insights.total_analyzed, 2);
        assert_eq!(insights.analyses[0].job_id, "1");
        assert_eq!(insights.analyses[1].company, "Globex");
        assert_eq!(insights.analyses[0].analysis, "Looks solid.");
        assert!(insights.message.is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_analysis_is_omitted() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .create_async()
            .await;

        let insights = assistant_for(&server)
            .analyze_top_jobs(&[job("1", "Engineer", "Acme")], 5)
            .await;
        assert!(insights.enabled);
        assert_eq!(insights.total_analyzed, 0);
        assert!(insights.analyses.is_empty());
    }

    #[tokio::test]
    async fn test_resume_tips_include_skills() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_body(Matcher::Regex("Candidate's skills: Rust, Kafka".to_string()))
            .with_status(200)
            .with_body(completion("Mention Kafka."))
            .create_async()
            .await;

        let tips = assistant_for(&server)
            .assist(
                &job("1", "Engineer", "Acme"),
                AssistKind::ResumeTips,
                &["Rust".to_string(), "Kafka".to_string()],
            )
            .await;
        assert_eq!(tips.as_deref(), Some("Mention Kafka."));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_career_insights_uses_distinct_companies() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_body(Matcher::Regex("Companies hiring: Acme, Globex\\\\n".to_string()))
            .with_status(200)
            .with_body(completion("Hiring is strong."))
            .create_async()
            .await;

        let jobs = vec![
            job("1", "A", "Acme"),
            job("2", "B", "Acme"),
            job("3", "C", "Globex"),
        ];
        let insights = assistant_for(&server).generate_career_insights(&jobs).await;
        assert_eq!(insights.as_deref(), Some("Hiring is strong."));
        mock.assert_async().await;
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 3), "");
    }
}
