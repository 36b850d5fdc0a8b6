//! Rotation strategies keyed by shape type
//!
//! Most shapes turn a quarter clockwise about a fixed pivot cell. O never
//! turns, and I flips between two bars because the pivot turn does not
//! keep its footprint inside the 4x4 grid cleanly.

use crate::tetromino::{Footprint, Rotation, TetrominoType, FOOTPRINT_SIZE};

/// Pivot cell (col, row) of the local grid
const PIVOT: (i32, i32) = (2, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationRule {
    /// Rotation is ignored entirely
    Fixed,
    /// Alternates between the spawn footprint and its pivot turn
    Toggle,
    /// Quarter turn about the pivot
    Pivot,
}

impl RotationRule {
    pub fn for_type(piece_type: TetrominoType) -> Self {
        match piece_type {
            TetrominoType::O => RotationRule::Fixed,
            TetrominoType::I => RotationRule::Toggle,
            _ => RotationRule::Pivot,
        }
    }

    /// Footprint after one rotation step from `rotation`, or None when the
    /// shape does not rotate
    pub fn apply(
        &self,
        piece_type: TetrominoType,
        footprint: &Footprint,
        rotation: Rotation,
    ) -> Option<Footprint> {
        match self {
            RotationRule::Fixed => None,
            RotationRule::Toggle if rotation.is_sideways() => Some(piece_type.footprint()),
            RotationRule::Toggle | RotationRule::Pivot => Some(turn_about_pivot(footprint)),
        }
    }
}

/// Quarter turn clockwise (screen coordinates, y down) about `PIVOT`.
/// Cells that would leave the local grid are dropped.
pub fn turn_about_pivot(footprint: &Footprint) -> Footprint {
    let mut turned = [[false; FOOTPRINT_SIZE]; FOOTPRINT_SIZE];
    let size = FOOTPRINT_SIZE as i32;
    for (row, cols) in footprint.iter().enumerate() {
        for (col, &occupied) in cols.iter().enumerate() {
            if !occupied {
                continue;
            }
            let dx = col as i32 - PIVOT.0;
            let dy = row as i32 - PIVOT.1;
            let new_col = -dy + PIVOT.0;
            let new_row = dx + PIVOT.1;
            if (0..size).contains(&new_col) && (0..size).contains(&new_row) {
                turned[new_row as usize][new_col as usize] = true;
            }
        }
    }
    turned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::{occupied_count, CELLS_PER_PIECE};

    fn rows(footprint: &Footprint) -> Vec<String> {
        footprint
            .iter()
            .map(|r| r.iter().map(|&c| if c { '#' } else { '.' }).collect())
            .collect()
    }

    #[test]
    fn test_rule_dispatch() {
        assert_eq!(RotationRule::for_type(TetrominoType::O), RotationRule::Fixed);
        assert_eq!(RotationRule::for_type(TetrominoType::I), RotationRule::Toggle);
        for piece_type in [
            TetrominoType::T,
            TetrominoType::J,
            TetrominoType::L,
            TetrominoType::S,
            TetrominoType::Z,
        ] {
            assert_eq!(RotationRule::for_type(piece_type), RotationRule::Pivot);
        }
    }

    #[test]
    fn test_t_turns_clockwise() {
        // ..#.      ..#.
        // .##.  ->  .###
        // ..#.      ....
        let turned = turn_about_pivot(&TetrominoType::T.footprint());
        assert_eq!(rows(&turned), vec!["..#.", ".###", "....", "...."]);
    }

    #[test]
    fn test_i_first_turn_is_horizontal_bar() {
        let turned = turn_about_pivot(&TetrominoType::I.footprint());
        assert_eq!(rows(&turned), vec!["....", "####", "....", "...."]);
    }

    #[test]
    fn test_pivot_shapes_keep_four_cells_through_full_turn() {
        for piece_type in [
            TetrominoType::T,
            TetrominoType::J,
            TetrominoType::L,
            TetrominoType::S,
            TetrominoType::Z,
        ] {
            let mut footprint = piece_type.footprint();
            for _ in 0..4 {
                footprint = turn_about_pivot(&footprint);
                assert_eq!(occupied_count(&footprint), CELLS_PER_PIECE, "{:?}", piece_type);
            }
            assert_eq!(footprint, piece_type.footprint(), "{:?}", piece_type);
        }
    }

    #[test]
    fn test_fixed_rule_declines() {
        let footprint = TetrominoType::O.footprint();
        assert_eq!(
            RotationRule::Fixed.apply(TetrominoType::O, &footprint, Rotation::R0),
            None
        );
    }
}
