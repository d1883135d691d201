use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use wglog::{Pipeline, MAX_WORKERS};
use wglog_core::config::{Config, OutputFormat};
use wglog_core::{Extractor, RecordSerializer};
use wglog_feeds::{FileFeed, LineFeed, StdinFeed};

#[derive(Parser)]
#[command(name = "wglog", about = "Extract WireGuard kernel log lines as syslog-shaped JSON records")]
struct Cli {
    /// Kernel log to read (`-` or omitted: stdin).
    input: Option<PathBuf>,

    /// Output file (omitted: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Append to the output file instead of replacing it.
    #[arg(long)]
    append: bool,

    /// Extra config file, layered over ~/.config/wglog/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worker tasks; 1 processes lines on the main thread.
    #[arg(short, long, default_value_t = 1, value_parser = parse_workers)]
    workers: usize,

    /// Output layout: pretty or compact.
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Subsystem tag that token 6 must match, e.g. `wireguard:`.
    #[arg(long)]
    tag: Option<String>,

    /// Reject lines whose peer can not be resolved.
    #[arg(long)]
    strict_peer: bool,

    /// Write diagnostics to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Raise the default log level to debug.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_workers(raw: &str) -> Result<usize, String> {
    let workers: usize = raw.parse().map_err(|e| format!("{raw:?} is not a worker count: {e}"))?;
    if (1..=MAX_WORKERS).contains(&workers) {
        Ok(workers)
    } else {
        Err(format!("worker count must be between 1 and {MAX_WORKERS}"))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if let Some(tag) = cli.tag.clone() {
        config.extractor.subsystem_tag = tag;
    }
    config.extractor.strict_peer |= cli.strict_peer;
    tracing::debug!(?config, "configuration loaded");

    let pipeline = Pipeline::new(
        Extractor::new(&config.extractor),
        RecordSerializer::new(config.output.clone()),
    );

    let mut feed: Box<dyn LineFeed> = match cli.input.as_deref() {
        None => Box::new(StdinFeed::new()),
        Some(path) if path.as_os_str() == "-" => Box::new(StdinFeed::new()),
        Some(path) => Box::new(FileFeed::open(path)?),
    };
    let mut sink = wglog_feeds::open_sink(cli.output.as_deref(), cli.append)?;

    let stats = pipeline.run_concurrent(feed.as_mut(), sink.as_mut(), cli.workers)?;
    tracing::info!(%stats, "done");
    if stats.rejected() > 0 {
        tracing::warn!(rejected = stats.rejected(), "some wireguard lines could not be converted");
    }
    Ok(())
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_env_filter(filter)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
        }
    }
    Ok(())
}
