mod assistant;
mod config;
mod errors;
mod fetchers;
mod github;
mod llm_client;
mod models;
mod pipeline;
mod processor;
mod reporter;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::assistant::AiAssistant;
use crate::config::Config;
use crate::fetchers::companies::load_companies;
use crate::fetchers::{build_http_client, FetcherManager};
use crate::github::GitHubClient;
use crate::llm_client::LlmClient;
use crate::pipeline::{run_once, RunOptions, RunOutcome, Services};
use crate::processor::profile::KeywordProfile;
use crate::processor::JobProcessor;
use crate::reporter::Reporter;
use crate::routes::build_router;
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "jobscout", version, about = "Aggregates, ranks and reports job postings")]
struct Cli {
    /// Path to the companies document (overrides COMPANIES_CONFIG)
    #[arg(long, global = true)]
    companies: Option<PathBuf>,

    /// Path to the keyword profile (overrides KEYWORDS_CONFIG)
    #[arg(long, global = true)]
    keywords: Option<PathBuf>,

    /// Skip the git commit/push and the digest issue
    #[arg(long, global = true)]
    no_publish: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the pipeline once and exit (default)
    Run,
    /// Serve the HTTP API
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(path) = cli.companies {
        config.companies_config = path;
    }
    if let Some(path) = cli.keywords {
        config.keywords_config = path;
    }

    let _log_guard = init_logging(&config)?;

    info!("Starting jobscout v{}", env!("CARGO_PKG_VERSION"));

    let services = build_services(&config)?;
    let run_options = RunOptions {
        publish: !cli.no_publish,
        ai_top_n: config.ai_top_n,
    };

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => run(&services, run_options).await,
        Command::Serve => serve(services, run_options, config.port).await,
    }
}

/// Console output filtered by `RUST_LOG`, plus a DEBUG-level file under
/// `LOG_DIR` that rolls over daily (`job_scraping.YYYY-MM-DD.log`).
/// The returned guard flushes the file writer on drop.
fn init_logging(config: &Config) -> Result<WorkerGuard> {
    let (file_writer, guard) = tracing_appender::non_blocking(log_file_appender(&config.log_dir)?);

    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
    });
    let file_filter = EnvFilter::new(format!("{}=debug", env!("CARGO_PKG_NAME")));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(console_filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer)
                .with_filter(file_filter),
        )
        .init();

    Ok(guard)
}

fn log_file_appender(dir: &Path) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("job_scraping")
        .filename_suffix("log")
        .build(dir)
        .context("Failed to open log file")
}

fn build_services(config: &Config) -> Result<Services> {
    let companies = load_companies(&config.companies_config)?;
    info!(
        "Loaded {} companies from {}",
        companies.len(),
        config.companies_config.display()
    );

    let profile = KeywordProfile::load(&config.keywords_config)?;
    info!("Loaded keyword profile from {}", config.keywords_config.display());
    let processor = JobProcessor::new(profile);
    if processor.profile().is_empty() {
        warn!("Keyword profile is empty; every job will score the same");
    }

    let http = build_http_client(config.http_timeout)?;

    let llm = config.openai_api_key.clone().map(|key| {
        LlmClient::new(
            http.clone(),
            key,
            config.openai_model.clone(),
            &config.openai_base_url,
        )
    });
    match &llm {
        Some(client) => info!("AI assistant enabled (model: {})", client.model()),
        None => info!("AI assistant disabled (OPENAI_API_KEY not set)"),
    }

    let github = GitHubClient::new(
        http.clone(),
        config.github_token.clone(),
        config.github_repository.clone(),
        &config.github_api_url,
        ".",
    );
    if !github.issues_enabled() {
        info!("GitHub digest issue disabled (GITHUB_TOKEN or GITHUB_REPOSITORY not set)");
    }

    Ok(Services {
        companies,
        fetchers: FetcherManager::new(http),
        processor,
        reporter: Reporter::new(&config.data_dir, &config.report_dir)?,
        assistant: AiAssistant::new(llm),
        github,
    })
}

async fn run(services: &Services, options: RunOptions) -> Result<()> {
    match run_once(services, options).await? {
        RunOutcome::NoJobs => warn!("Run finished without any jobs to report"),
        RunOutcome::Completed(summary) => {
            info!(
                "Job scraping completed successfully: {} jobs ranked, report at {}",
                summary.jobs.len(),
                summary.reports.markdown.display()
            );
        }
    }
    Ok(())
}

async fn serve(services: Services, options: RunOptions, port: u16) -> Result<()> {
    let state = AppState::new(services, options);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_log_file_is_dated_under_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");

        let mut appender = log_file_appender(&log_dir).unwrap();
        appender.write_all(b"DEBUG jobscout: hello\n").unwrap();
        appender.flush().unwrap();

        let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
        let names: Vec<String> = std::fs::read_dir(&log_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![format!("job_scraping.{today}.log")]);

        let contents = std::fs::read_to_string(log_dir.join(&names[0])).unwrap();
        assert!(contents.contains("hello"));
    }
}
