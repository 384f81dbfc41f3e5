//! resumelink CLI - Overleaf resume to LinkedIn profile
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use resumelink::summarizer::{NoopSummarizer, OllamaSummarizer, Summarizer};
use resumelink::{pipeline, Config, LinkedInUploader, OverleafDownloader, ResumeProcessor, UploadMode};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "resumelink")]
#[command(author, version, about = "Latex PDF to LinkedIn automation CLI", long_about = None)]
struct Cli {
    /// Path to a resumelink.toml (defaults to ./resumelink.toml, then ~/.config/resumelink/)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Download PDF from Overleaf
    Download {
        /// Overleaf project or share URL
        #[arg(long, env = "OVERLEAF_PROJECT_URL")]
        from_url: String,
    },
    /// Upload parsed resume to LinkedIn
    Upload {
        /// Path to local resume PDF
        #[arg(long)]
        from_pdf: PathBuf,
        /// Write fields into the profile editor instead of only printing them
        #[arg(long)]
        apply: bool,
        /// Skip the Ollama summaries and leave descriptions empty
        #[arg(long)]
        no_summarize: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env first so clap's env fallbacks can see it
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::InvalidSubcommand => {
            Cli::command().print_help()?;
            return Ok(());
        }
        Err(e) => e.exit(),
    };

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = Config::load(cli.config.as_deref())?;

    match command {
        Commands::Download { from_url } => {
            let overleaf = OverleafDownloader::new(config.overleaf.clone(), config.browser.clone());
            overleaf
                .download_pdf(&from_url, &config.output.pdf_path)
                .await
                .context("Overleaf download failed")?;
        }
        Commands::Upload {
            from_pdf,
            apply,
            no_summarize,
        } => {
            let summarizer: Box<dyn Summarizer> = if no_summarize {
                Box::new(NoopSummarizer)
            } else {
                Box::new(OllamaSummarizer::new(&config.summarizer)?)
            };

            let processor = ResumeProcessor::new(summarizer);
            let profile = processor.process(&from_pdf).await?;

            pipeline::save_profile(&profile, &config.output.json_path)?;
            println!(
                "{} Saved as {}",
                "✅".green(),
                config.output.json_path.display()
            );

            let credentials = config.linkedin_credentials()?;
            let mode = if apply {
                UploadMode::Apply
            } else {
                UploadMode::DryRun
            };
            let linkedin = LinkedInUploader::new(
                config.linkedin.clone(),
                config.browser.clone(),
                credentials,
                mode,
            );
            linkedin
                .fill_profile(&profile)
                .await
                .context("LinkedIn upload failed")?;
        }
    }

    Ok(())
}
