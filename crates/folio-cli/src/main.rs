use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use folio_core::AppConfig;

mod commands;

use commands::watch::Panel;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "A terminal portfolio driven by interruptible carousels")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// Stream one panel's rotation events without a UI
    Watch {
        /// Panel to drive
        #[arg(short, long, value_enum)]
        panel: Panel,
        /// Stop after this many seconds (runs until Ctrl+C otherwise)
        #[arg(short, long)]
        seconds: Option<u64>,
        /// Print one JSON object per event
        #[arg(long)]
        json: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Print the configuration file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    // The TUI owns the terminal, so it logs to a file instead
    let tui = matches!(cli.command, Some(Commands::Run) | None);
    let _guard = init_logging(&config, tui)?;

    // Handle commands
    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Watch {
            panel,
            seconds,
            json,
        }) => commands::watch::run(&config, panel, seconds, json).await,
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init { force } => commands::config::init(force),
            ConfigAction::Path => commands::config::path(),
        },
    }
}

/// Initialize logging; the returned guard flushes the log file on drop
fn init_logging(config: &AppConfig, to_file: bool) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    if to_file {
        let log_dir = config.data_dir();
        std::fs::create_dir_all(&log_dir)?;
        let file_appender = tracing_appender::rolling::never(&log_dir, "folio.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
            .init();
        Ok(Some(guard))
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
        Ok(None)
    }
}
