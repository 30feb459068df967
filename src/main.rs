use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pawnav::nav::NoopRenderHook;
use pawnav::{util, Config, Console, Dashboard, HttpBackend, MemoryLocation};
use tokio::io::BufReader;

#[derive(Parser)]
#[command(name = "pawnav", version, about = "Dashboard hash-route tooling")]
struct Cli {
    /// Config file (defaults to <data dir>/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory for config and logs (defaults to ~/.pawnav)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the route a fragment describes, as JSON
    Parse { fragment: String },
    /// Print the canonical fragment for a fragment
    Href { fragment: String },
    /// Run a headless dashboard session driven by commands on stdin
    Follow {
        /// Dashboard API base URL (overrides the config file)
        #[arg(long)]
        api_url: Option<String>,
        /// Fragment the session starts on
        #[arg(long, default_value = "")]
        start: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = util::init_data_dir(cli.data_dir.clone());

    // Initialize logging to file (~/.pawnav/logs/pawnav.log)
    fs::create_dir_all(data_dir.logs())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.log_file())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false) // Disable ANSI colors in log file
        .init();

    match cli.command {
        Command::Parse { fragment } => {
            let route = pawnav::parse(&fragment);
            println!("{}", serde_json::to_string_pretty(&route)?);
        }
        Command::Href { fragment } => {
            println!("{}", pawnav::to_fragment(&pawnav::parse(&fragment)));
        }
        Command::Follow { api_url, start } => {
            let mut config = match &cli.config {
                Some(path) => Config::load_from(path)
                    .with_context(|| format!("Failed to load {}", path.display()))?,
                None => Config::load(),
            };
            if let Some(url) = api_url {
                config = config.with_api_base_url(url);
            }

            let backend = HttpBackend::new(&config.api_base_url, config.http_timeout)?;
            let (location, events) = MemoryLocation::new(&start);
            let location = Arc::new(location);
            let dashboard = Arc::new(Dashboard::new(
                &config,
                Arc::new(backend),
                location.clone(),
                Arc::new(NoopRenderHook),
            ));

            if let Some(listener) = dashboard.start(events) {
                if let Some(initial) = listener.initial {
                    initial.settle().await;
                }
            }

            let console = Console::new(dashboard, location);
            console
                .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
                .await?;
        }
    }

    Ok(())
}
