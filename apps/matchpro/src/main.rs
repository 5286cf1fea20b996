mod analysis;
mod cli;
mod config;
mod errors;
mod intake;
mod llm_client;
mod render;
mod state;
#[cfg(test)]
mod test_support;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::analyzer::{AnalysisProvider, GeminiAnalyzer};
use crate::cli::{handle_command, Cli};
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::state::Session;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries only the report.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting MatchPro v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(
        config.api_key.clone(),
        config.api_base.clone(),
        config.request_timeout,
    )?;
    if !llm.has_api_key() {
        warn!("No API key configured (GEMINI_API_KEY / API_KEY); analysis will fail");
    }
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm_client::MODEL,
        config.request_timeout.as_secs()
    );

    let provider: Arc<dyn AnalysisProvider> = Arc::new(GeminiAnalyzer::new(llm));
    let mut session = Session::new(provider);

    handle_command(cli, &mut session).await.map(ExitCode::from)
}
