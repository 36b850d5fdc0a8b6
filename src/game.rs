//! Core game state and logic

use crate::board::{Board, CellKind, BOARD_HEIGHT};
use crate::piece::Piece;
use crate::score::Score;
use crate::tetromino::TetrominoType;
use rand::distributions::Standard;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ratatui::style::Color;
use std::time::Instant;
use tracing::{debug, info};

/// Piece colors use channels from this range so they stay visible on black
const MIN_COLOR_CHANNEL: u8 = 50;

/// Observable phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    NoPiece,
    Falling,
    Paused,
    AwaitingRestart,
}

/// Commands the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    TogglePause,
    ToggleInfo,
    StartOrRestart,
    Quit,
}

/// The main game struct
pub struct Game {
    board: Board,
    /// Current falling piece
    current_piece: Option<Piece>,
    score: Score,
    rng: ChaCha8Rng,
    running: bool,
    paused: bool,
    /// Set by an overflow until the next start command
    awaiting_restart: bool,
    /// Whether the instructions are hidden
    info_hidden: bool,
    /// Last gravity tick
    last_tick: Instant,
}

impl Game {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a game whose piece sequence is fixed by `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self {
            board: Board::new(),
            current_piece: None,
            score: Score::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            running: true,
            paused: false,
            awaiting_restart: false,
            info_hidden: false,
            last_tick: Instant::now(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn info_hidden(&self) -> bool {
        self.info_hidden
    }

    pub fn phase(&self) -> GamePhase {
        if self.paused {
            GamePhase::Paused
        } else if self.awaiting_restart {
            GamePhase::AwaitingRestart
        } else if self.current_piece.is_some() {
            GamePhase::Falling
        } else {
            GamePhase::NoPiece
        }
    }

    /// Process a command
    pub fn process_action(&mut self, action: Action) {
        match action {
            Action::MoveLeft => {
                self.try_move(-1, 0);
            }
            Action::MoveRight => {
                self.try_move(1, 0);
            }
            Action::SoftDrop => {
                self.try_move(0, 1);
            }
            Action::Rotate => {
                self.try_rotate();
            }
            Action::HardDrop => self.hard_drop(),
            Action::TogglePause => self.toggle_pause(),
            Action::ToggleInfo => self.toggle_info(),
            Action::StartOrRestart => self.start_or_restart(),
            Action::Quit => self.quit(),
        }
    }

    /// Gravity clock: tick once the fall interval has elapsed since the last tick
    pub fn update(&mut self, now: Instant) {
        if now.duration_since(self.last_tick) > self.score.fall_interval {
            self.tick();
            self.last_tick = now;
        }
    }

    /// Movement, rotation, gravity and spawning are all inert while this holds
    fn is_suspended(&self) -> bool {
        self.paused || self.awaiting_restart
    }

    /// Spawn a random piece. Refused while a piece is live, paused, or
    /// awaiting restart.
    pub fn spawn(&mut self) -> bool {
        if self.current_piece.is_some() || self.is_suspended() {
            return false;
        }
        let piece_type: TetrominoType = self.rng.sample(Standard);
        let color = Color::Rgb(
            self.rng.gen_range(MIN_COLOR_CHANNEL..=u8::MAX),
            self.rng.gen_range(MIN_COLOR_CHANNEL..=u8::MAX),
            self.rng.gen_range(MIN_COLOR_CHANNEL..=u8::MAX),
        );
        self.place_piece(Piece::new(piece_type, color));
        true
    }

    fn place_piece(&mut self, piece: Piece) {
        debug!("Spawning {:?} at ({}, {})", piece.piece_type, piece.x, piece.y);
        self.current_piece = Some(piece);
        self.repaint();
    }

    /// Move the current piece by (dx, dy). A blocked downward move locks the
    /// piece in place and spawns the next one.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        if self.is_suspended() {
            return false;
        }
        let Some(piece) = &mut self.current_piece else {
            return false;
        };

        if piece.collides(&self.board, dx, dy) {
            if dy > 0 {
                self.lock_piece();
            }
            return false;
        }

        piece.x += dx;
        piece.y += dy;
        self.repaint();
        true
    }

    pub fn try_rotate(&mut self) -> bool {
        if self.is_suspended() {
            return false;
        }
        let Some(piece) = &mut self.current_piece else {
            return false;
        };
        if !piece.rotate() {
            return false;
        }
        debug!("Rotated {:?} to {}", piece.piece_type, piece.rotation.degrees());
        self.repaint();
        true
    }

    /// One gravity step followed by the settle pass
    pub fn tick(&mut self) {
        if self.current_piece.is_none() || self.is_suspended() {
            return;
        }
        self.try_move(0, 1);
        self.settle();
    }

    /// Drop the current piece until it locks, then run a full tick on the
    /// piece that replaced it
    pub fn hard_drop(&mut self) {
        if self.current_piece.is_none() || self.is_suspended() {
            return;
        }
        for _ in 0..BOARD_HEIGHT {
            if !self.try_move(0, 1) {
                break;
            }
        }
        self.try_move(0, 1);
        self.settle();
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!("Game {}", if self.paused { "paused" } else { "resumed" });
    }

    pub fn toggle_info(&mut self) {
        self.info_hidden = !self.info_hidden;
    }

    pub fn quit(&mut self) {
        info!("Quit requested");
        self.running = false;
    }

    /// Spawn if possible, then leave the awaiting-restart state
    pub fn start_or_restart(&mut self) {
        self.spawn();
        if self.awaiting_restart {
            info!("Restart acknowledged");
            self.awaiting_restart = false;
        }
        self.info_hidden = true;
    }

    /// Stamp the current piece as locked, clear rows, spawn the next piece
    fn lock_piece(&mut self) {
        let Some(piece) = self.current_piece.take() else {
            return;
        };
        for (x, y) in piece.block_positions() {
            self.board.set_cell(x, y, CellKind::Locked, piece.color);
        }
        debug!("Locked {:?} at ({}, {})", piece.piece_type, piece.x, piece.y);

        self.board.clear_interior_keeping_locked();
        self.clear_full_rows();
        self.spawn();
    }

    /// Overflow check, repaint, line clear
    fn settle(&mut self) {
        if self.board.any_locked_in_top_play_row() {
            self.restart_after_overflow();
            return;
        }
        self.board.clear_interior_keeping_locked();
        self.clear_full_rows();
        self.repaint();
    }

    /// Score and collapse every full row, top to bottom
    fn clear_full_rows(&mut self) -> usize {
        let full_rows = self.board.find_full_rows();
        for &row in &full_rows {
            if self.score.add_line() {
                info!(
                    "Level up: level {}, fall interval {:?}",
                    self.score.level, self.score.fall_interval
                );
            }
            self.board.collapse_row(row);
        }
        if !full_rows.is_empty() {
            info!(
                "Cleared {} line(s), score {}, lines {}",
                full_rows.len(),
                self.score.points,
                self.score.lines
            );
        }
        full_rows.len()
    }

    fn restart_after_overflow(&mut self) {
        info!(
            "Playfield overflow: final score {}, lines {}, level {}",
            self.score.points, self.score.lines, self.score.level
        );
        self.board.reset();
        self.score.reset();
        self.current_piece = None;
        self.awaiting_restart = true;
    }

    /// Redraw the falling overlay over the locked content
    fn repaint(&mut self) {
        self.board.clear_interior_keeping_locked();
        if let Some(piece) = &self.current_piece {
            for (x, y) in piece.block_positions() {
                if self.board.get(x, y).is_some_and(|cell| cell.is_empty()) {
                    self.board.set_cell(x, y, CellKind::Falling, piece.color);
                }
            }
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl Game {
    pub(crate) fn current_piece(&self) -> Option<&Piece> {
        self.current_piece.as_ref()
    }
}
