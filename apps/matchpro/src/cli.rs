use std::future::Future;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::warn;

use crate::errors::AppError;
use crate::intake::load_resume;
use crate::render::{render_error, render_result, OutputFormat};
use crate::state::Session;

#[derive(Parser)]
#[command(name = "matchpro", version)]
#[command(about = "Score a resume against a job description with Gemini")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze how well a resume fits a job description
    Analyze(AnalyzeArgs),
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Resume file (PDF or TXT, max 5MB)
    #[arg(long)]
    pub resume: PathBuf,

    /// Override the resume MIME type instead of inferring it from the extension
    #[arg(long)]
    pub mime_type: Option<String>,

    /// Job description text
    #[arg(long, conflicts_with = "job_description_file")]
    pub job_description: Option<String>,

    /// Read the job description from a file
    #[arg(long)]
    pub job_description_file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_VALIDATION: u8 = 2;
pub const EXIT_INTERRUPTED: u8 = 130;

/// Runs one command and returns the process exit status.
pub async fn handle_command(cli: Cli, session: &mut Session) -> Result<u8> {
    match cli.command {
        Command::Analyze(args) => run_analyze(&args, session, tokio::signal::ctrl_c()).await,
    }
}

/// Runs an analysis until it finishes or `cancel` resolves with `Ok`.
/// A `cancel` future that fails (no signal handler) is ignored.
async fn run_analyze<C>(args: &AnalyzeArgs, session: &mut Session, cancel: C) -> Result<u8>
where
    C: Future<Output = std::io::Result<()>>,
{
    let outcome = tokio::select! {
        outcome = analyze_once(args, session) => outcome,
        Ok(()) = cancel => {
            warn!("Analysis cancelled by user");
            eprintln!("{}", render_error("Analysis cancelled.", args.format));
            return Ok(EXIT_INTERRUPTED);
        }
    };

    match outcome {
        Ok(()) => {
            if let Some(result) = session.current_result() {
                println!("{}", render_result(result, args.format)?);
            }
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            let message = e.report();
            match args.format {
                OutputFormat::Json => println!("{}", render_error(&message, args.format)),
                OutputFormat::Text => eprintln!("{}", render_error(&message, args.format)),
            }
            Ok(if e.is_validation() {
                EXIT_VALIDATION
            } else {
                EXIT_FAILURE
            })
        }
    }
}

async fn analyze_once(args: &AnalyzeArgs, session: &mut Session) -> Result<(), AppError> {
    let resume = load_resume(&args.resume, args.mime_type.as_deref()).await?;
    session.select_resume(resume);

    let job_description = match (&args.job_description, &args.job_description_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => tokio::fs::read_to_string(path).await?,
        // Empty input fails the length check in `submit`.
        (None, None) => String::new(),
    };

    session.submit(&job_description).await?;
    Ok(())
}
