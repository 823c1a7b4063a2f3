use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use shutterfeed::app::{self, App};
use shutterfeed::config::Config;
use shutterfeed::feeds::fixture::source_for;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "shutterfeed",
    version,
    about = "Browse, like and hire photographers from your terminal"
)]
struct Args {
    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON fixture to load instead of the bundled photographers
    #[arg(short, long)]
    fixture: Option<PathBuf>,

    /// Write a default config file and exit
    #[arg(long)]
    init_config: bool,

    /// Where to write logs
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("shutterfeed").join("shutterfeed.log"))
}

/// Logs go to a file: the terminal belongs to the UI.
fn init_logging(path: Option<PathBuf>) -> Result<()> {
    let Some(path) = path.or_else(default_log_path) else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Runs `setup`, calling `restore` before returning its error so a half
/// initialised terminal is not left behind.
fn setup_or_restore<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    setup().inspect_err(|_| restore())
}

fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    setup_or_restore(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            Ok(Terminal::new(CrosstermBackend::new(stdout))?)
        },
        || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        },
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file)?;

    let config_path = args
        .config
        .or_else(Config::default_path)
        .context("Could not determine a config directory; pass --config")?;

    if args.init_config {
        Config::write_default(&config_path)?;
        println!("Wrote default config to {}", config_path.display());
        return Ok(());
    }

    let config = Config::load(&config_path)?;
    let fixture_path = args.fixture.or_else(|| config.general.fixture_path.clone());
    let data = source_for(fixture_path).fetch().await?;
    tracing::info!(
        photographers = data.photographers.len(),
        user = %data.current_user.name,
        "fixture loaded"
    );

    let mut app = App::new(&config, data);

    let mut terminal = init_terminal()?;

    let result = app::run(
        &mut terminal,
        &mut app,
        Duration::from_millis(config.general.tick_rate_ms.max(10)),
    )
    .await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "event loop failed");
    }
    result
}
