//! Active falling piece logic

use crate::board::{Board, INTERIOR_BOTTOM, INTERIOR_LEFT, INTERIOR_RIGHT, INTERIOR_TOP};
use crate::rotation::RotationRule;
use crate::tetromino::{occupied_count, Footprint, Rotation, TetrominoType, CELLS_PER_PIECE};
use ratatui::style::Color;

/// Anchor every piece spawns at
pub const SPAWN_X: i32 = 10;
pub const SPAWN_Y: i32 = INTERIOR_TOP as i32;

/// An active falling piece
#[derive(Debug, Clone)]
pub struct Piece {
    pub piece_type: TetrominoType,
    pub rotation: Rotation,
    /// Board position of the local grid's top-left corner
    pub x: i32,
    pub y: i32,
    pub blocks: Footprint,
    pub color: Color,
}

impl Piece {
    /// Create a new piece at the spawn anchor
    pub fn new(piece_type: TetrominoType, color: Color) -> Self {
        Self {
            piece_type,
            rotation: Rotation::R0,
            x: SPAWN_X,
            y: SPAWN_Y,
            blocks: piece_type.footprint(),
            color,
        }
    }

    /// Occupied cells in local (col, row) coordinates
    fn local_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.blocks.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter()
                .enumerate()
                .filter(|&(_, &occupied)| occupied)
                .map(move |(col, _)| (col as i32, row as i32))
        })
    }

    /// Absolute (x, y) board positions of all occupied cells
    pub fn block_positions(&self) -> Vec<(i32, i32)> {
        self.offset_positions(0, 0)
    }

    /// Board positions the occupied cells would have after moving by (dx, dy)
    pub fn offset_positions(&self, dx: i32, dy: i32) -> Vec<(i32, i32)> {
        self.local_cells()
            .map(|(col, row)| (col + self.x + dx, row + self.y + dy))
            .collect()
    }

    /// True if moving by (dx, dy) would put any cell on a wall or locked cell
    pub fn collides(&self, board: &Board, dx: i32, dy: i32) -> bool {
        self.offset_positions(dx, dy)
            .into_iter()
            .any(|(x, y)| board.is_blocked(x, y))
    }

    /// Rotate one step according to the shape's rule. Returns false for
    /// shapes that do not rotate. The result is not checked against locked
    /// cells; the anchor is only nudged back inside the side walls and above
    /// the floor.
    pub fn rotate(&mut self) -> bool {
        let rule = RotationRule::for_type(self.piece_type);
        let Some(blocks) = rule.apply(self.piece_type, &self.blocks, self.rotation) else {
            return false;
        };
        debug_assert_eq!(occupied_count(&blocks), CELLS_PER_PIECE);
        self.blocks = blocks;
        self.rotation = self.rotation.cw();
        self.nudge_inside();
        true
    }

    fn nudge_inside(&mut self) {
        let positions = self.block_positions();
        let (Some(min_x), Some(max_x), Some(max_y)) = (
            positions.iter().map(|&(x, _)| x).min(),
            positions.iter().map(|&(x, _)| x).max(),
            positions.iter().map(|&(_, y)| y).max(),
        ) else {
            return;
        };

        if min_x < INTERIOR_LEFT as i32 {
            self.x += INTERIOR_LEFT as i32 - min_x;
        } else if max_x >= INTERIOR_RIGHT as i32 {
            self.x -= max_x - (INTERIOR_RIGHT as i32 - 1);
        }
        if max_y >= INTERIOR_BOTTOM as i32 {
            self.y -= max_y - (INTERIOR_BOTTOM as i32 - 1);
        }
    }
}
