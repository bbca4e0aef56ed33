use clap::Parser;
use color_eyre::{eyre::WrapErr, Result};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use novella::{DownloaderBuilder, FetchPolicy, RunSummary, Status};
use std::{path::PathBuf, time::Duration};
use tracing_subscriber::EnvFilter;

/// Download the first chapters of a web novel as text files.
#[derive(Debug, Parser)]
#[command(name = "novella", version, about)]
struct Cli {
    /// URL of the novel's index (table of contents) page.
    url: String,

    /// Number of chapters to download.
    #[arg(short = 'n', long = "num", default_value_t = 5)]
    num: usize,

    /// Maximum number of chapters downloaded at once.
    #[arg(short, long, default_value_t = 6)]
    concurrency: usize,

    /// Seconds to pause after each chapter.
    #[arg(short, long, default_value = "0.4", value_parser = parse_seconds)]
    delay: Duration,

    /// Output directory.
    #[arg(short, long = "out", default_value = "chapters")]
    out: PathBuf,

    /// Attempts per page, including the first one.
    #[arg(long, default_value_t = 5)]
    retries: u32,

    /// Timeout of a single request, in seconds.
    #[arg(long, default_value = "25", value_parser = parse_seconds)]
    timeout: Duration,

    /// User agent sent with every request.
    #[arg(long)]
    user_agent: Option<String>,

    /// Hide the progress bar.
    #[arg(short, long)]
    quiet: bool,
}

fn parse_seconds(value: &str) -> std::result::Result<Duration, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|e| format!("`{value}` is not a number: {e}"))?;
    Duration::try_from_secs_f64(seconds).map_err(|e| format!("`{value}` is not a valid duration: {e}"))
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("novella=info"))
        .wrap_err("build log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| color_eyre::eyre::eyre!("initialize tracing subscriber: {err}"))
}

fn summary_table(summary: &RunSummary) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Chapter", "Status", "Detail"]);

    for chapter in summary.chapters() {
        let (status, detail) = match chapter.status() {
            Status::Saved => (
                "saved",
                chapter
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            Status::Skipped(reason) => ("skipped", reason.clone()),
            Status::Failed(reason) => ("failed", reason.clone()),
        };
        table.add_row(vec![chapter.chapter().label(), status.to_string(), detail]);
    }

    table
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging()?;

    let cli = Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    let builder = if cli.quiet {
        DownloaderBuilder::hidden()
    } else {
        DownloaderBuilder::new()
    };

    let mut builder = builder
        .directory(cli.out.clone())
        .chapters(cli.num)
        .concurrent_downloads(cli.concurrency)
        .delay(cli.delay)
        .fetch_policy(FetchPolicy {
            timeout: cli.timeout,
            max_attempts: cli.retries.max(1),
            ..FetchPolicy::default()
        });
    if let Some(user_agent) = cli.user_agent {
        builder = builder.user_agent(user_agent);
    }

    let summary = builder
        .build()
        .run(&cli.url)
        .await
        .wrap_err_with(|| format!("downloading {}", cli.url))?;

    println!("{}", summary_table(&summary));
    println!(
        "Saved {}, skipped {}, failed {} of {} chapters in {}",
        summary.saved(),
        summary.skipped(),
        summary.failed(),
        summary.total(),
        cli.out.display()
    );

    Ok(())
}
