use alert_control::app::{App, Surface};
use alert_control::Config;
use alert_control_streamlabs::auth::SessionStore;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use directories::ProjectDirs;
use ratatui::crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Mute and suppress Streamlabs alerts from the terminal.
#[derive(Debug, Parser)]
#[command(name = "alert-control", version)]
struct Cli {
    /// Path to config.toml
    #[arg(long, env = "ALERT_CONTROL_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Login and mute/suppress controls (default)
    Control,
    /// Full-screen state view for a second monitor
    Display,
    /// Forget the stored access token
    Logout,
}

fn get_config_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "alert-control", "alert-control") {
        proj_dirs.config_dir().join("config.toml")
    } else {
        PathBuf::from("config/default.toml")
    }
}

/// The terminal belongs to the UI, so logs go to a file next to the session.
fn init_logging(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("alert-control.log"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(get_config_path);
    let config = Config::load_or_default(&config_path).with_env_overrides();
    let session_store = SessionStore::default_location().map_err(|e| eyre!("{e:#}"))?;

    init_logging(session_store.dir())?;

    let surface = match cli.command.unwrap_or(Command::Control) {
        Command::Control => Surface::Control,
        Command::Display => Surface::Display,
        Command::Logout => {
            session_store.clear().map_err(|e| eyre!("{e:#}"))?;
            tracing::info!("Session cleared");
            println!("Logged out.");
            return Ok(());
        }
    };

    run_tui(config, session_store, surface)
}

fn run_tui(config: Config, session_store: SessionStore, surface: Surface) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    let mut terminal = ratatui::init();
    ratatui::crossterm::execute!(io::stdout(), EnableBracketedPaste)?;

    let mut app = App::new(config, session_store, surface);
    app.init();
    tracing::info!(?surface, "Started");

    let result = run(&mut terminal, &mut app);

    let _ = ratatui::crossterm::execute!(io::stdout(), DisableBracketedPaste);
    ratatui::restore();

    result
}

fn run(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(50))? {
            let event = event::read()?;
            match app.handle_event(event) {
                Ok(true) => break,
                Ok(false) => {}
                Err(e) => tracing::warn!("Failed to handle event: {e:#}"),
            }
        }

        app.process_async_events();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
