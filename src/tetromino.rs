//! Tetromino definitions and spawn footprints
//!
//! Every shape lives in a 4x4 local grid indexed `[row][col]`, row 0 at the top.

use rand::distributions::{Distribution, Standard};
use rand::Rng;

/// Side length of the local grid a piece occupies
pub const FOOTPRINT_SIZE: usize = 4;

/// Occupancy of a piece's local 4x4 grid, `[row][col]`
pub type Footprint = [[bool; FOOTPRINT_SIZE]; FOOTPRINT_SIZE];

/// Number of occupied cells in every standard shape
pub const CELLS_PER_PIECE: usize = 4;

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I, // long bar
    O, // square
    T,
    J,
    L,
    S,
    Z,
}

impl TetrominoType {
    /// All seven types, in catalog order
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::O,
            TetrominoType::T,
            TetrominoType::J,
            TetrominoType::L,
            TetrominoType::S,
            TetrominoType::Z,
        ]
    }

    /// Occupancy pattern used when a piece of this type spawns
    pub fn footprint(&self) -> Footprint {
        let rows: [&str; FOOTPRINT_SIZE] = match self {
            TetrominoType::I => ["..#.", "..#.", "..#.", "..#."],
            TetrominoType::O => [".##.", ".##.", "....", "...."],
            TetrominoType::T => ["..#.", ".##.", "..#.", "...."],
            TetrominoType::J => ["..#.", "..#.", ".##.", "...."],
            TetrominoType::L => [".#..", ".#..", ".##.", "...."],
            TetrominoType::S => [".#..", ".##.", "..#.", "...."],
            TetrominoType::Z => ["..#.", ".##.", ".#..", "...."],
        };
        parse_footprint(rows)
    }
}

impl Distribution<TetrominoType> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> TetrominoType {
        TetrominoType::all()[rng.gen_range(0..7)]
    }
}

fn parse_footprint(rows: [&str; FOOTPRINT_SIZE]) -> Footprint {
    let mut footprint = [[false; FOOTPRINT_SIZE]; FOOTPRINT_SIZE];
    for (row, pattern) in rows.iter().enumerate() {
        for (col, ch) in pattern.chars().enumerate() {
            footprint[row][col] = ch == '#';
        }
    }
    footprint
}

/// Count the occupied cells of a footprint
pub fn occupied_count(footprint: &Footprint) -> usize {
    footprint.iter().flatten().filter(|&&cell| cell).count()
}

/// Rotation counter, stepped in quarter turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// Advance by 90 degrees: 0 → 90 → 180 → 270 → 0
    pub fn cw(&self) -> Rotation {
        match self {
            Rotation::R0 => Rotation::R90,
            Rotation::R90 => Rotation::R180,
            Rotation::R180 => Rotation::R270,
            Rotation::R270 => Rotation::R0,
        }
    }

    pub fn degrees(&self) -> u16 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }

    /// True on the quarter-turned states (90 and 270)
    pub fn is_sideways(&self) -> bool {
        matches!(self, Rotation::R90 | Rotation::R270)
    }
}
