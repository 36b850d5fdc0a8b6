//! TETRS Arcade - a classic falling-block puzzle in the terminal
//!
//! One loop drives input, gravity and drawing in sequence.

mod board;
mod game;
mod input;
mod piece;
mod rotation;
mod score;
mod settings;
mod tetromino;
mod ui;

use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use game::Game;
use input::InputHandler;
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::Settings;
use std::{
    io::{self, stdout},
    path::PathBuf,
    time::{Duration, Instant},
};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Directory for session logs
fn log_dir() -> PathBuf {
    std::env::temp_dir().join("tetrs-arcade")
}

fn main() -> anyhow::Result<()> {
    let session_id: u32 = rand::random();

    // The terminal belongs to the renderer, so logs go to a file
    let dir = log_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tetrs_arcade=debug".parse()?),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "TETRS Arcade starting up, session={:08x}, log={}",
        session_id,
        dir.join(&log_file).display()
    );

    let settings = Settings::load();

    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    execute!(stdout(), EnterAlternateScreen).context("entering alternate screen")?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    let game = result?;
    let score = game.score();
    tracing::info!(
        "Shutting down: score {}, lines {}, level {}",
        score.points,
        score.lines,
        score.level
    );
    println!("Thanks for playing TETRS Arcade!");
    println!("{} | {} | {}", score.score_text(), score.level_text(), score.lines_text());

    Ok(())
}

/// Input, gravity, draw, until the game asks to quit
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &Settings,
) -> anyhow::Result<Game> {
    let input = InputHandler::from_settings(settings);
    let mut game = Game::new();

    while game.is_running() {
        terminal.draw(|frame| ui::render_game(frame, &game, settings))?;

        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                if let Some(action) = input.key_down(key) {
                    tracing::trace!("Action {:?}", action);
                    game.process_action(action);
                }
            }
        }

        game.update(Instant::now());
    }

    Ok(game)
}
