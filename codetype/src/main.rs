use std::path::PathBuf;

use clap::Parser;
use quill::SnippetProvider;

mod app;
mod catalog;
mod config;
mod identity;
mod logging;
mod page;
mod results;
mod utils;

/// Type real code snippets in your terminal
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Directory holding `settings.toml` and the `snippets` folder
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start typing right away in this language (e.g. `rust`)
    #[arg(short, long)]
    language: Option<String>,

    /// Write logs to this file instead of `codetype.log` in the config directory
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_dir = config::directory(cli.config)?;
    let log_file = cli.log.unwrap_or_else(|| config_dir.join("codetype.log"));
    logging::init(&log_file)?;

    let mut config = config::Config::load(config_dir)?;
    config.settings.theme.palette = config::theme::Palette::detect();
    tracing::info!(
        languages = config.catalog.languages().len(),
        "codetype starting"
    );

    app::App::new(config, cli.language).run()?;

    tracing::info!("codetype exiting");
    Ok(())
}
