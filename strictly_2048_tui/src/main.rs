//! Strictly 2048 - terminal frontend
//!
//! Interactive play in a ratatui TUI, or a headless replay that prints the
//! final game state as JSON.

#![warn(missing_docs)]

mod app;
mod cli;
mod keys;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use strictly_2048::{Direction, GameConfig, Session};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

use app::App;
use cli::{Cli, Command};

const DEFAULT_LOG_FILTER: &str = "info,strictly_2048=debug";

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { log_file } => {
            initialize_file_tracing(&log_file)?;
            let config = load_config(cli.config.as_deref(), cli.seed)?;
            run_tui(config)
        }
        Command::Replay { moves } => {
            initialize_stderr_tracing();
            let config = load_config(cli.config.as_deref(), cli.seed)?;
            let json = run_replay(config, &moves)?;
            println!("{json}");
            Ok(())
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Logs go to a file while the TUI owns the terminal.
fn initialize_file_tracing(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    info!(log_file = %path.display(), "File tracing initialized");
    Ok(())
}

fn initialize_stderr_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .init();
}

#[instrument]
fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<GameConfig> {
    let config = match path {
        Some(path) => GameConfig::from_file(path)?,
        None => {
            info!("No config file given, using defaults");
            GameConfig::default()
        }
    };

    match seed {
        Some(seed) => {
            info!(seed, "Overriding seed from command line");
            Ok(config.with_seed(Some(seed)))
        }
        None => Ok(config),
    }
}

/// Runs a comma-separated move list and returns the final state as JSON.
#[instrument(skip(config))]
fn run_replay(config: GameConfig, moves: &str) -> Result<String> {
    let directions = moves
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::parse::<Direction>)
        .collect::<Result<Vec<_>, _>>()?;

    let mut session = Session::new(config);
    let mut state = session.new_game()?;
    for direction in directions {
        state = session.handle_directional_input(direction)?.into_state();
    }

    info!(score = state.score(), status = %state.status(), "Replay finished");
    Ok(state.to_json()?)
}

#[instrument(skip(config))]
fn run_tui(config: GameConfig) -> Result<()> {
    info!("Starting Strictly 2048 TUI");
    let app = App::new(config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = %err, "TUI exited with error");
    }
    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let action = keys::action_for(key.code);
            debug!(?action, "Key pressed");
            app.handle_action(action)?;
        }

        if app.should_quit() {
            info!("Quitting");
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_replay_is_reproducible() {
        let config = GameConfig::default().with_seed(Some(99));
        let a = run_replay(config.clone(), "left, up, right,down").unwrap();
        let b = run_replay(config, "left,up,right,down").unwrap();
        assert_eq!(a, b);
        assert!(a.contains("\"status\""));
    }

    #[test]
    fn test_replay_rejects_unknown_direction() {
        let config = GameConfig::default().with_seed(Some(1));
        let err = run_replay(config, "left,sideways").unwrap_err();
        assert!(err.to_string().contains("sideways"));
    }

    #[test]
    fn test_seed_flag_overrides_config() {
        let config = load_config(None, Some(5)).unwrap();
        assert_eq!(*config.seed(), Some(5));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let path = PathBuf::from("/nonexistent/strictly_2048.toml");
        assert!(load_config(Some(&path), None).is_err());
    }
}
