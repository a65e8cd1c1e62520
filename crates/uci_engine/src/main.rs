use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use alphabeta_engine::SearchConfig;
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod session;

use session::{Flow, UciSession};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Search configuration in TOML
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (logs go to stderr)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries the UCI protocol only.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let config = match &args.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("loading search config {}", path.display()))?,
        None => SearchConfig::default(),
    };
    tracing::debug!(?config, "search configuration");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = UciSession::new(config);

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let flow = session.handle(&line, &mut stdout)?;
        stdout.flush()?;
        if flow == Flow::Quit {
            break;
        }
    }
    Ok(())
}
