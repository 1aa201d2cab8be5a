use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;

use gigfeed::config::Config;
use gigfeed::controller::{ControllerOptions, FilterController};
use gigfeed::logging::init_tracing;
use gigfeed::page::MemoryPage;
use gigfeed::runtime::FeedRuntime;
use gigfeed::shell::Shell;
use gigfeed::transport::{FeedTransport, HttpTransport};

/// Browse and filter a gig feed from the terminal.
#[derive(Debug, Parser)]
#[command(name = "gigfeed", version)]
struct Cli {
    /// Config file (default: ~/.config/gigfeed/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Feed site base URL, overrides `server.base_url`
    #[arg(long)]
    server: Option<String>,

    /// Feed page path, overrides `server.feed_path`
    #[arg(long)]
    path: Option<String>,

    /// Viewport width the page reports, overrides `page.viewport_width`
    #[arg(long)]
    viewport_width: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    apply_overrides(&mut config, &cli);
    config.validate()?;

    let base_url = config.base_url()?;
    let page_url = base_url
        .join(&config.server.feed_path)
        .with_context(|| format!("Invalid feed path '{}'", config.server.feed_path))?;

    let transport = Arc::new(HttpTransport::new(&config.server)?);
    let document = transport
        .fetch_page(&page_url)
        .await
        .context("Failed to load the feed page")?;

    let address = match page_url.query() {
        Some(query) => format!("{}?{}", page_url.path(), query),
        None => page_url.path().to_string(),
    };
    let page = MemoryPage::from_document(&document, &address)
        .with_viewport_width(config.page.viewport_width);

    let options = ControllerOptions {
        base_url,
        narrow_viewport_px: config.page.narrow_viewport_px,
    };
    let Some(controller) = FilterController::attach(page.handles(), page.browser(), options)
    else {
        println!("{} has no event filters", page_url);
        return Ok(());
    };
    tracing::info!(url = %page_url, "Feed page loaded");

    println!("{}", controller.rendered().count_label());
    let runtime = FeedRuntime::new(controller, transport);
    Shell::new(page, runtime)
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;
    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(server) = &cli.server {
        config.server.base_url = server.clone();
    }
    if let Some(path) = &cli.path {
        config.server.feed_path = path.clone();
    }
    if let Some(width) = cli.viewport_width {
        config.page.viewport_width = width;
    }
}
