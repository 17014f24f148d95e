//! Value Glance CLI
//!
//! # Commands
//!
//! - `value-glance tui` - Interactive income-statement table (default)
//! - `value-glance show --sort revenue:desc --query "date: 2020-2022"` - Print once

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glance_core::prelude::*;
use glance_tui::prelude::*;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Annual income statements in a sortable, searchable table
#[derive(Parser)]
#[command(name = "value-glance")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Ticker to fetch (overrides config)
    #[arg(short, long, global = true)]
    ticker: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive table
    Tui {
        /// Read statements from a JSON file instead of the provider
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Fetch once and print a text table
    Show {
        /// Sort as <column>[:asc|desc] (date, revenue, netIncome)
        #[arg(short, long)]
        sort: Option<SortDescriptor>,

        /// Range query as "<column>: <min>-<max>"
        #[arg(short, long)]
        query: Option<String>,

        /// Read statements from a JSON file instead of the provider
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = GlanceConfig::load_or_default(&cli.config)?.with_env_override();
    if let Some(ticker) = cli.ticker {
        config.ticker = ticker;
    }
    config.validate()?;

    match cli.command.unwrap_or(Commands::Tui { input: None }) {
        Commands::Tui { input } => {
            // The TUI owns the terminal, so logs go to a file
            init_file_tracing(&config, cli.verbose)?;
            tracing::info!("Value Glance starting for {}", config.ticker);

            let source = open_source(&config, input.as_deref())?;
            let mut app = TuiApp::new(source)?;
            app.run().await?;
        }
        Commands::Show { sort, query, input } => {
            init_stderr_tracing(&config, cli.verbose)?;

            let source = open_source(&config, input.as_deref())?;
            let records = source.fetch().await.map_err(GlanceError::from)?;
            let view = build_view(records, sort, query.as_deref()).map_err(GlanceError::from)?;
            print!("{}", render_text_table(&view));
        }
    }

    Ok(())
}

/// Pick the record source: a local JSON file or the provider API
fn open_source(config: &GlanceConfig, input: Option<&Path>) -> Result<Arc<dyn RecordSource>> {
    let source: Arc<dyn RecordSource> = match input {
        Some(path) => Arc::new(StaticSource::from_json_file(path).map_err(GlanceError::from)?),
        None => Arc::new(FmpClient::from_config(config)?),
    };
    Ok(source)
}

fn env_filter(config: &GlanceConfig, verbose: bool) -> Result<EnvFilter> {
    let level = if verbose {
        "debug".to_string()
    } else {
        config.log_level.to_lowercase()
    };

    Ok(EnvFilter::from_default_env()
        .add_directive(format!("glance_tui={}", level).parse()?)
        .add_directive(format!("glance_core={}", level).parse()?))
}

fn init_file_tracing(config: &GlanceConfig, verbose: bool) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("opening log file {}", config.log_file.display()))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(env_filter(config, verbose)?)
        .init();
    Ok(())
}

fn init_stderr_tracing(config: &GlanceConfig, verbose: bool) -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter(config, verbose)?)
        .init();
    Ok(())
}
