//! Playfield representation: a fixed grid with a permanent wall border

use ratatui::style::Color;

/// Playfield dimensions, walls included
pub const BOARD_WIDTH: usize = 20;
pub const BOARD_HEIGHT: usize = 30;
/// Thickness of the wall border on every side
pub const MARGIN: usize = 2;

/// Interior bounds, half-open
pub const INTERIOR_LEFT: usize = MARGIN;
pub const INTERIOR_RIGHT: usize = BOARD_WIDTH - MARGIN;
pub const INTERIOR_TOP: usize = MARGIN;
pub const INTERIOR_BOTTOM: usize = BOARD_HEIGHT - MARGIN;

/// Row checked for overflow
pub const TOP_PLAY_ROW: usize = INTERIOR_TOP;

pub const WALL_COLOR: Color = Color::White;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellKind {
    #[default]
    Empty,
    Wall,
    Locked,
    Falling,
}

/// A cell on the board. The color only matters when the kind is not Empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub kind: CellKind,
    pub color: Color,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        kind: CellKind::Empty,
        color: Color::Reset,
    };
    pub const WALL: Cell = Cell {
        kind: CellKind::Wall,
        color: WALL_COLOR,
    };

    pub fn is_empty(&self) -> bool {
        self.kind == CellKind::Empty
    }

    pub fn is_locked(&self) -> bool {
        self.kind == CellKind::Locked
    }

    /// Walls and locked cells stop a piece
    pub fn is_blocking(&self) -> bool {
        matches!(self.kind, CellKind::Wall | CellKind::Locked)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::EMPTY
    }
}

/// The game board
#[derive(Debug, Clone)]
pub struct Board {
    /// Grid stored as [row][col], row 0 is the top
    cells: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a board with an empty interior inside the wall border
    pub fn new() -> Self {
        let mut board = Self {
            cells: [[Cell::WALL; BOARD_WIDTH]; BOARD_HEIGHT],
        };
        board.reset();
        board
    }

    pub fn is_interior(x: i32, y: i32) -> bool {
        (INTERIOR_LEFT as i32..INTERIOR_RIGHT as i32).contains(&x)
            && (INTERIOR_TOP as i32..INTERIOR_BOTTOM as i32).contains(&y)
    }

    /// Get the cell at (x, y), None if out of range
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cells
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_WIDTH]> {
        self.cells.iter()
    }

    /// True if (x, y) holds a wall or a locked cell. Every coordinate a piece
    /// can reach is inside the wall border, so out-of-range never happens in
    /// play; it is treated as blocked regardless.
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_none_or(|cell| cell.is_blocking())
    }

    /// Overwrite a single interior cell
    pub fn set_cell(&mut self, x: i32, y: i32, kind: CellKind, color: Color) {
        debug_assert!(
            Self::is_interior(x, y),
            "set_cell outside the interior: ({}, {})",
            x,
            y
        );
        self.cells[y as usize][x as usize] = Cell { kind, color };
    }

    /// Reset every interior cell that is not locked (repaint pass)
    pub fn clear_interior_keeping_locked(&mut self) {
        for row in &mut self.cells[INTERIOR_TOP..INTERIOR_BOTTOM] {
            for cell in &mut row[INTERIOR_LEFT..INTERIOR_RIGHT] {
                if !cell.is_locked() {
                    *cell = Cell::EMPTY;
                }
            }
        }
    }

    /// Full interior rows, top to bottom
    pub fn find_full_rows(&self) -> Vec<usize> {
        (INTERIOR_TOP..INTERIOR_BOTTOM)
            .filter(|&row| self.is_row_full(row))
            .collect()
    }

    fn is_row_full(&self, row: usize) -> bool {
        self.cells[row][INTERIOR_LEFT..INTERIOR_RIGHT]
            .iter()
            .all(Cell::is_locked)
    }

    /// Drop everything above `row` down by one, discarding `row`. The top
    /// interior row is left empty; the border is never touched.
    pub fn collapse_row(&mut self, row: usize) {
        debug_assert!((INTERIOR_TOP..INTERIOR_BOTTOM).contains(&row));
        for y in (INTERIOR_TOP + 1..=row).rev() {
            let above = self.cells[y - 1];
            self.cells[y][INTERIOR_LEFT..INTERIOR_RIGHT]
                .copy_from_slice(&above[INTERIOR_LEFT..INTERIOR_RIGHT]);
        }
        self.cells[INTERIOR_TOP][INTERIOR_LEFT..INTERIOR_RIGHT].fill(Cell::EMPTY);
    }

    /// Overflow detector: locked content in the first playable row
    pub fn any_locked_in_top_play_row(&self) -> bool {
        self.cells[TOP_PLAY_ROW][INTERIOR_LEFT..INTERIOR_RIGHT]
            .iter()
            .any(Cell::is_locked)
    }

    /// Empty the whole interior
    pub fn reset(&mut self) {
        for row in &mut self.cells[INTERIOR_TOP..INTERIOR_BOTTOM] {
            row[INTERIOR_LEFT..INTERIOR_RIGHT].fill(Cell::EMPTY);
        }
    }
}

#[cfg(test)]
impl Board {
    /// Check if the interior holds no locked cells
    pub(crate) fn is_empty(&self) -> bool {
        self.cells[INTERIOR_TOP..INTERIOR_BOTTOM]
            .iter()
            .all(|row| !row[INTERIOR_LEFT..INTERIOR_RIGHT].iter().any(Cell::is_locked))
    }
}

#[cfg(test)]
pub(crate) fn border_is_intact(board: &Board) -> bool {
    (0..BOARD_HEIGHT as i32).all(|y| {
        (0..BOARD_WIDTH as i32).all(|x| {
            Board::is_interior(x, y) || board.get(x, y) == Some(Cell::WALL)
        })
    })
}

#[cfg(test)]
pub(crate) fn fill_row(board: &mut Board, row: usize, gap: Option<usize>) {
    for x in INTERIOR_LEFT..INTERIOR_RIGHT {
        if Some(x) != gap {
            board.set_cell(x as i32, row as i32, CellKind::Locked, Color::Red);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_has_walls_and_empty_interior() {
        let board = Board::new();
        assert!(border_is_intact(&board));
        assert!(board.is_empty());
        assert_eq!(board.get(2, 2), Some(Cell::EMPTY));
        assert_eq!(board.get(17, 27), Some(Cell::EMPTY));
        assert_eq!(board.get(1, 10), Some(Cell::WALL));
        assert_eq!(board.get(10, 28), Some(Cell::WALL));
        assert_eq!(board.get(10, 1), Some(Cell::WALL));
    }

    #[test]
    fn test_out_of_range() {
        let board = Board::new();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(BOARD_WIDTH as i32, 0), None);
        assert_eq!(board.get(0, BOARD_HEIGHT as i32), None);
        assert!(board.is_blocked(-1, 5));
    }

    #[test]
    fn test_is_blocked() {
        let mut board = Board::new();
        assert!(!board.is_blocked(5, 5));
        board.set_cell(5, 5, CellKind::Locked, Color::Blue);
        assert!(board.is_blocked(5, 5));
        board.set_cell(6, 5, CellKind::Falling, Color::Blue);
        assert!(!board.is_blocked(6, 5));
        assert!(board.is_blocked(0, 5));
    }

    #[test]
    fn test_repaint_keeps_locked() {
        let mut board = Board::new();
        board.set_cell(5, 5, CellKind::Locked, Color::Blue);
        board.set_cell(6, 5, CellKind::Falling, Color::Green);
        board.clear_interior_keeping_locked();
        assert!(board.get(5, 5).is_some_and(|c| c.is_locked()));
        assert!(board.get(6, 5).is_some_and(|c| c.is_empty()));
        assert!(border_is_intact(&board));
    }

    #[test]
    fn test_find_full_rows_top_to_bottom() {
        let mut board = Board::new();
        fill_row(&mut board, 20, None);
        fill_row(&mut board, 10, None);
        fill_row(&mut board, 15, Some(7));
        assert_eq!(board.find_full_rows(), vec![10, 20]);
    }

    #[test]
    fn test_falling_cells_do_not_complete_a_row() {
        let mut board = Board::new();
        fill_row(&mut board, 27, Some(4));
        board.set_cell(4, 27, CellKind::Falling, Color::Green);
        assert!(board.find_full_rows().is_empty());
    }

    #[test]
    fn test_collapse_row_shifts_content_down() {
        let mut board = Board::new();
        fill_row(&mut board, 27, None);
        board.set_cell(3, 26, CellKind::Locked, Color::Cyan);
        board.set_cell(9, 2, CellKind::Locked, Color::Yellow);

        board.collapse_row(27);

        assert_eq!(board.get(3, 27).map(|c| c.color), Some(Color::Cyan));
        assert!(board.get(4, 27).is_some_and(|c| c.is_empty()));
        assert!(board.get(9, 3).is_some_and(|c| c.is_locked()));
        assert!(board.get(9, 2).is_some_and(|c| c.is_empty()));
        assert!(board.find_full_rows().is_empty());
        assert!(border_is_intact(&board));
    }

    #[test]
    fn test_top_play_row_overflow() {
        let mut board = Board::new();
        assert!(!board.any_locked_in_top_play_row());
        board.set_cell(12, TOP_PLAY_ROW as i32 + 1, CellKind::Locked, Color::Red);
        assert!(!board.any_locked_in_top_play_row());
        board.set_cell(12, TOP_PLAY_ROW as i32, CellKind::Locked, Color::Red);
        assert!(board.any_locked_in_top_play_row());
        board.reset();
        assert!(!board.any_locked_in_top_play_row());
        assert!(board.is_empty());
    }
}
