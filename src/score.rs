//! Score, level and fall-speed progression

use std::time::Duration;

/// Points per cleared line, multiplied by the level
const POINTS_PER_LINE: u64 = 10;
/// Lines needed for each level-up
const LINES_PER_LEVEL: u32 = 10;

pub const INITIAL_FALL_INTERVAL: Duration = Duration::from_millis(500);
/// Fall interval reduction per level-up
pub const FALL_INTERVAL_STEP: Duration = Duration::from_millis(10);
pub const MIN_FALL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    pub points: u64,
    pub lines: u32,
    pub level: u32,
    /// Time between gravity ticks
    pub fall_interval: Duration,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            lines: 0,
            level: 1,
            fall_interval: INITIAL_FALL_INTERVAL,
        }
    }

    /// Credit one cleared line at the current level. Returns true when this
    /// line raised the level.
    pub fn add_line(&mut self) -> bool {
        self.points += POINTS_PER_LINE * self.level as u64;
        self.lines += 1;

        if self.lines % LINES_PER_LEVEL == 0 {
            self.level += 1;
            self.fall_interval = self
                .fall_interval
                .saturating_sub(FALL_INTERVAL_STEP)
                .max(MIN_FALL_INTERVAL);
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn score_text(&self) -> String {
        format!("SCORE: {}", self.points)
    }

    pub fn level_text(&self) -> String {
        format!("Level: {}", self.level)
    }

    pub fn lines_text(&self) -> String {
        format!("Lines: {}", self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let mut score = Score::new();
        assert!(!score.add_line());
        assert_eq!(score.points, 10);
        assert_eq!(score.lines, 1);
        assert_eq!(score.level, 1);
    }

    #[test]
    fn test_level_up_every_ten_lines() {
        let mut score = Score::new();
        for _ in 0..10 {
            score.add_line();
        }
        assert_eq!(score.level, 2);
        assert_eq!(score.fall_interval, Duration::from_millis(490));
        assert_eq!(score.points, 100);

        for _ in 0..10 {
            score.add_line();
        }
        assert_eq!(score.level, 3);
        assert_eq!(score.fall_interval, Duration::from_millis(480));
        // Lines 11-20 score at level 2
        assert_eq!(score.points, 100 + 200);
    }

    #[test]
    fn test_fall_interval_floor() {
        let mut score = Score::new();
        for _ in 0..1000 {
            score.add_line();
        }
        assert_eq!(score.level, 101);
        assert_eq!(score.fall_interval, MIN_FALL_INTERVAL);
    }

    #[test]
    fn test_reset() {
        let mut score = Score::new();
        for _ in 0..12 {
            score.add_line();
        }
        score.reset();
        assert_eq!(score, Score::new());
    }

    #[test]
    fn test_display_strings() {
        let mut score = Score::new();
        for _ in 0..12 {
            score.add_line();
        }
        assert_eq!(score.score_text(), "SCORE: 140");
        assert_eq!(score.level_text(), "Level: 2");
        assert_eq!(score.lines_text(), "Lines: 12");
    }
}
