use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use frontpage::app::{category_from_value, App, AppEvent};
use frontpage::config::Config;
use frontpage::source::{ArticleSource, PageQuery, SourceError, StubSource};
use frontpage::ui;

/// Get the config directory path (~/.config/frontpage/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("frontpage"))
}

#[derive(Parser, Debug)]
#[command(
    name = "frontpage",
    about = "Browse articles by category, one page at a time"
)]
struct Args {
    /// Config file (defaults to ~/.config/frontpage/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Color theme: dark or light
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Simulated source latency in milliseconds
    #[arg(long, value_name = "N")]
    latency_ms: Option<u64>,

    /// Fetch one page, print it as JSON and exit
    #[arg(long)]
    dump: bool,

    /// Initial category filter
    #[arg(long, value_name = "NAME")]
    category: Option<String>,

    /// Initial page
    #[arg(long, value_name = "N", default_value_t = 1,
          value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
}

fn load_config(args: &Args) -> Result<Config> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_dir()?.join("config.toml"),
    };

    let mut config = Config::load(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    if let Some(theme) = &args.theme {
        config.theme = theme.clone();
    }
    if let Some(latency) = args.latency_ms {
        config.source_latency_ms = latency;
    }

    Ok(config)
}

/// Run one fetch without the TUI and print the page as pretty JSON.
async fn dump(source: &dyn ArticleSource, config: &Config, query: PageQuery) -> Result<()> {
    let fetch = source.fetch(&query);
    let page = match config.fetch_timeout() {
        Some(limit) => tokio::time::timeout(limit, fetch)
            .await
            .unwrap_or(Err(SourceError::Timeout(limit))),
        None => fetch.await,
    }
    .context("Failed to fetch articles")?;

    let json = serde_json::to_string_pretty(&page).context("Failed to serialize page")?;
    println!("{}", json);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // stderr keeps log lines off the alternate screen
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let source = Arc::new(StubSource::new(config.source_latency()));
    let category = args.category.as_deref().and_then(category_from_value);

    if args.dump {
        return dump(source.as_ref(), &config, PageQuery::new(category, args.page)).await;
    }

    let mut app = App::new(source, &config);
    app.selected_category = category;
    app.current_page = args.page;

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}
