//! Terminal UI rendering with ratatui

use crate::board::{CellKind, BOARD_HEIGHT, BOARD_WIDTH};
use crate::game::{Game, GamePhase};
use crate::settings::Settings;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const EMPTY: &str = "  ";

/// Each cell is two columns wide
const BOARD_COLS: u16 = BOARD_WIDTH as u16 * 2;
const PANEL_WIDTH: u16 = 40;
const GAME_WIDTH: u16 = BOARD_COLS + 2 + PANEL_WIDTH;
const GAME_HEIGHT: u16 = BOARD_HEIGHT as u16;

const INSTRUCTIONS: [&str; 4] = [
    "Use wasd or arrow keys for movement",
    "Press space to drop",
    "Press p to pause game",
    "Press enter to start game",
];

/// Render the playfield and the stats panel
pub fn render_game(frame: &mut Frame, game: &Game, settings: &Settings) {
    let area = center_rect(frame.area(), GAME_WIDTH, GAME_HEIGHT);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BOARD_COLS),
            Constraint::Length(2),
            Constraint::Length(PANEL_WIDTH),
        ])
        .split(area);

    render_board(frame, layout[0], game, settings.visual.block_char());
    render_stats(frame, layout[2], game);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Draw every non-empty cell, walls included
fn render_board(frame: &mut Frame, area: Rect, game: &Game, block_char: &str) {
    let lines: Vec<Line> = game
        .board()
        .rows()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|cell| match cell.kind {
                    CellKind::Empty => Span::raw(EMPTY),
                    _ => Span::styled(block_char.to_string(), Style::default().fg(cell.color)),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, game: &Game) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let score = game.score();
    let mut lines = vec![
        Line::styled(score.score_text(), Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(score.lines_text(), Style::default().fg(Color::Green)),
        Line::raw(""),
        Line::styled(score.level_text(), Style::default().fg(Color::Cyan)),
        Line::raw(""),
    ];

    if game.is_paused() {
        lines.push(Line::styled("PAUSED", Style::default().fg(Color::Yellow).bold()));
        lines.push(Line::styled("Press p to resume", Style::default().fg(Color::Gray)));
    } else if game.phase() == GamePhase::AwaitingRestart {
        lines.push(Line::styled("GAME OVER", Style::default().fg(Color::Red).bold()));
        lines.push(Line::styled("Press enter to restart", Style::default().fg(Color::Gray)));
    }

    if !game.info_hidden() {
        lines.push(Line::raw(""));
        lines.extend(
            INSTRUCTIONS
                .iter()
                .map(|text| Line::styled(*text, Style::default().fg(Color::White))),
        );
        lines.push(Line::styled("Press h to hide this text", Style::default().fg(Color::DarkGray)));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
