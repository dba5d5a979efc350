use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use hahu_client::build_loader;
use hahu_core::config::{DEFAULT_ALLOWED_DOMAIN, DEFAULT_SOURCE_URL};
use hahu_core::{Job, JobStore, JsonFileStore, LoadOutcome, LoaderConfig};

#[derive(Parser)]
#[command(name = "hahu", version, about = "Scrape job listings from hahu.jobs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the listing page, save it to the jobs file and print it
    Scrape {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the jobs saved by the last successful scrape
    Show {
        /// Jobs file to read
        #[arg(long, env = "HAHU_JOBS_FILE", default_value = "jobs.json")]
        jobs_file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Scrape, falling back to the jobs file if the scrape fails
    Load {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Listing page to scrape
    #[arg(short, long, env = "HAHU_SOURCE_URL", default_value = DEFAULT_SOURCE_URL)]
    url: String,

    /// Only this host may be fetched
    #[arg(long, env = "HAHU_ALLOWED_DOMAIN", default_value = DEFAULT_ALLOWED_DOMAIN)]
    allowed_domain: String,

    /// Jobs file to write (and read on fallback)
    #[arg(long, env = "HAHU_JOBS_FILE", default_value = "jobs.json")]
    jobs_file: PathBuf,

    /// Fetch timeout in seconds
    #[arg(short, long, env = "HAHU_FETCH_TIMEOUT_SECS", default_value_t = 30,
          value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// JSON layout file overriding the built-in selectors
    #[arg(long, env = "HAHU_LAYOUT_FILE")]
    layout: Option<PathBuf>,
}

impl SourceArgs {
    fn into_config(self) -> LoaderConfig {
        LoaderConfig {
            source_url: self.url,
            allowed_domain: self.allowed_domain,
            jobs_file: self.jobs_file,
            fetch_timeout: Duration::from_secs(self.timeout),
            layout_file: self.layout,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("hahu=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape { source } => cmd_scrape(source.into_config()).await?,
        Commands::Show { jobs_file, format } => cmd_show(jobs_file, format).await?,
        Commands::Load { source } => cmd_load(source.into_config()).await?,
    }

    Ok(())
}

/// Token cancelled on Ctrl-C, so an interrupted fetch ends cleanly.
fn interrupt_token() -> CancellationToken {
    let token = CancellationToken::new();
    let guard = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            guard.cancel();
        }
    });
    token
}

async fn cmd_scrape(config: LoaderConfig) -> Result<()> {
    let loader = build_loader(&config).context("Failed to build job loader")?;

    let jobs = loader
        .scrape_live(&interrupt_token())
        .await
        .context("Live scrape failed")?;

    if let Err(e) = loader.store().save(&jobs).await {
        tracing::warn!(error = %e, "Failed to save jobs");
    }

    write_jobs(&mut std::io::stdout().lock(), &jobs, OutputFormat::Json)
}

async fn cmd_show(jobs_file: PathBuf, format: OutputFormat) -> Result<()> {
    let store = JsonFileStore::new(&jobs_file);
    let jobs = store
        .load()
        .await
        .with_context(|| format!("Failed to load {}", jobs_file.display()))?;

    write_jobs(&mut std::io::stdout().lock(), &jobs, format)
}

async fn cmd_load(config: LoaderConfig) -> Result<()> {
    let loader = build_loader(&config).context("Failed to build job loader")?;
    let outcome = loader.load_jobs(&interrupt_token()).await;

    match &outcome {
        LoadOutcome::Live(jobs) => {
            tracing::info!(count = jobs.len(), "Loaded jobs from the board");
        }
        LoadOutcome::Fallback { jobs, cause } => {
            tracing::warn!(count = jobs.len(), %cause, "Loaded jobs from the jobs file");
        }
        LoadOutcome::Unavailable {
            live_error,
            fallback_error,
        } => {
            bail!("No jobs available (scrape: {live_error}; jobs file: {fallback_error})");
        }
    }

    write_jobs(&mut std::io::stdout().lock(), outcome.jobs(), OutputFormat::Json)
}

fn write_jobs(out: &mut impl Write, jobs: &[Job], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, jobs)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for job in jobs {
                writer.serialize(job)?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}
