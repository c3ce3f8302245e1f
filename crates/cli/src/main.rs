use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use status_poller::{HttpStatusSource, PollOutcome, StatusPoller, StatusSource, VideoId};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use url::Url;

#[derive(Parser)]
#[command(name = "vidwatch-cli")]
#[command(about = "Headless watcher for asynchronously generated chat videos")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch a page, reloading it as pending videos finish generating
    Watch {
        /// Page to watch
        #[arg(long)]
        page: String,

        /// Base URL of the status endpoint (defaults to the page's origin)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// List pending video ids found in a saved HTML document
    Scan {
        /// HTML file to scan
        file: PathBuf,
    },

    /// Fetch one video's status and print it
    Status {
        /// Base URL of the status endpoint
        #[arg(long)]
        base_url: String,

        /// Video id
        video_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt().with_max_level(level).init();

    match cli.command {
        Commands::Watch { page, base_url } => watch_command(page, base_url).await,
        Commands::Scan { file } => scan_command(file),
        Commands::Status { base_url, video_id } => status_command(base_url, video_id).await,
    }
}

async fn watch_command(page: String, base_url: Option<String>) -> Result<()> {
    let base_url = match base_url {
        Some(url) => url,
        None => page_origin(&page)?,
    };

    let source: Arc<dyn StatusSource> = Arc::new(HttpStatusSource::new(base_url));
    let client = reqwest::Client::new();

    // Reload cycle: fetch the page, poll until a video settles, fetch again.
    // Videos still pending after a reload are rediscovered and polled anew.
    loop {
        let document = fetch_page(&client, &page).await?;
        let poller = StatusPoller::initialize(&document, Arc::clone(&source));

        if poller.pending().is_empty() {
            info!(page = %page, "no pending videos, nothing left to watch");
            return Ok(());
        }

        info!(page = %page, pending = poller.pending().len(), "watching page");

        if let Some(trigger) = poller.run().await {
            match &trigger.outcome {
                PollOutcome::Completed { video_url } => {
                    info!(
                        video_id = %trigger.video_id,
                        video_url = %video_url,
                        "video ready, reloading page"
                    );
                }
                PollOutcome::Failed { .. } => {
                    error!(video_id = %trigger.video_id, "video generation failed, reloading page");
                }
            }
        }
    }
}

fn scan_command(file: PathBuf) -> Result<()> {
    let html = std::fs::read_to_string(&file).with_context(|| format!("reading {:?}", file))?;

    let pending = status_poller::discover_pending(&html);
    if pending.is_empty() {
        println!("No pending videos.");
        return Ok(());
    }

    for video in pending {
        println!("{}", video.id);
    }

    Ok(())
}

async fn status_command(base_url: String, video_id: String) -> Result<()> {
    let source = HttpStatusSource::new(base_url);
    let response = source.fetch_status(&VideoId(video_id)).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("fetching {url}"))?;

    let body = response
        .error_for_status()
        .with_context(|| format!("fetching {url}"))?
        .text()
        .await?;

    Ok(body)
}

/// Derive the status endpoint's base URL from the watched page.
fn page_origin(page: &str) -> Result<String> {
    let url = Url::parse(page).with_context(|| format!("invalid page URL: {page}"))?;

    let host = url
        .host_str()
        .with_context(|| format!("page URL has no host: {page}"))?;

    let origin = match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    };

    Ok(origin)
}
