//! Scoring module - per-player score, level, combo and back-to-back state
//!
//! Rules:
//! - Base points come from the line, T-spin or T-spin mini tables and are
//!   multiplied by the level in effect before the clear.
//! - A "difficult" clear is a tetris or any T-spin (including minis and zero-line
//!   T-spins). A difficult clear following another one gets a 3/2 multiplier on
//!   the base points, floored, before the combo bonus is added.
//! - Combo bonus is `50 * combo * level`, with combo counted after this clear.
//! - A lock that clears nothing and is not a T-spin resets the combo to -1 and
//!   leaves back-to-back untouched.

use crate::types::{
    TSpinKind, B2B_DENOMINATOR, B2B_NUMERATOR, COMBO_BASE, LINES_PER_LEVEL, LINE_SCORES,
    TSPIN_MINI_SCORES, TSPIN_SCORES,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of a scoring event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoreEvent {
    /// Points added by this clear (base, B2B and combo bonus)
    pub score_delta: u32,
    /// Combo counter after this clear
    pub combo: i32,
    /// Back-to-back flag after this clear
    pub back_to_back: bool,
}

/// Snapshot of a player's score state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoreState {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub combo: i32,
    pub back_to_back: bool,
}

/// Calculate line clear score
/// lines: number of lines cleared (1-4)
/// level: current level (1-based)
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    LINE_SCORES
        .get(lines as usize)
        .copied()
        .unwrap_or(0)
        .saturating_mul(level)
}

/// Calculate T-spin score; lines outside the table score nothing
pub fn calculate_tspin_score(tspin: TSpinKind, lines: u32, level: u32) -> u32 {
    let table: &[u32] = match tspin {
        TSpinKind::Full => &TSPIN_SCORES,
        TSpinKind::Mini => &TSPIN_MINI_SCORES,
        TSpinKind::None => return calculate_line_score(lines, level),
    };
    table
        .get(lines as usize)
        .copied()
        .unwrap_or(0)
        .saturating_mul(level)
}

/// Calculate combo bonus.
///
/// `combo` is the counter after incrementing for this clear:
/// - `0`: first clear in chain (no bonus)
/// - `1+`: bonus applies as `COMBO_BASE * combo * level`
pub fn calculate_combo_bonus(combo: i32, level: u32) -> u32 {
    if combo <= 0 {
        return 0;
    }
    COMBO_BASE
        .saturating_mul(combo as u32)
        .saturating_mul(level)
}

/// Tetrises and every T-spin variant are difficult clears
pub fn is_difficult(lines: u32, tspin: TSpinKind) -> bool {
    lines == 4 || tspin.is_any()
}

/// Apply the B2B multiplier (3/2, floored) to a point value.
pub fn apply_b2b_multiplier(points: u32) -> u32 {
    points.saturating_mul(B2B_NUMERATOR) / B2B_DENOMINATOR
}

/// Level management
/// Level starts at 1 and increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    1 + total_lines / LINES_PER_LEVEL
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells.saturating_mul(2)
    } else {
        cells
    }
}

/// Per-player score state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringEngine {
    score: u32,
    lines: u32,
    combo: i32,
    back_to_back: bool,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self {
            score: 0,
            lines: 0,
            combo: -1,
            back_to_back: false,
        }
    }

    /// Apply a lock's line clear.
    ///
    /// Returns `None` (and breaks the combo) when nothing was cleared and the lock
    /// was not a T-spin.
    pub fn add_line_clear(&mut self, lines_cleared: u32, tspin: TSpinKind) -> Option<ScoreEvent> {
        if lines_cleared == 0 && !tspin.is_any() {
            self.combo = -1;
            return None;
        }

        let level = self.level();
        let difficult = is_difficult(lines_cleared, tspin);

        let mut base = calculate_tspin_score(tspin, lines_cleared, level);
        if self.back_to_back && difficult {
            base = apply_b2b_multiplier(base);
        }

        self.combo += 1;
        let combo_bonus = calculate_combo_bonus(self.combo, level);

        self.back_to_back = difficult;
        self.lines = self.lines.saturating_add(lines_cleared);

        let score_delta = base.saturating_add(combo_bonus);
        self.score = self.score.saturating_add(score_delta);

        Some(ScoreEvent {
            score_delta,
            combo: self.combo,
            back_to_back: self.back_to_back,
        })
    }

    pub fn add_hard_drop(&mut self, cells_moved: u32) {
        self.score = self
            .score
            .saturating_add(calculate_drop_score(cells_moved, true));
    }

    pub fn add_soft_drop(&mut self, cells_moved: u32) {
        self.score = self
            .score
            .saturating_add(calculate_drop_score(cells_moved, false));
    }

    pub fn level(&self) -> u32 {
        calculate_level(self.lines)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> i32 {
        self.combo
    }

    pub fn back_to_back(&self) -> bool {
        self.back_to_back
    }

    pub fn state(&self) -> ScoreState {
        ScoreState {
            score: self.score,
            level: self.level(),
            lines: self.lines,
            combo: self.combo,
            back_to_back: self.back_to_back,
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(calculate_line_score(1, 1), 100);
        assert_eq!(calculate_line_score(2, 1), 300);
        assert_eq!(calculate_line_score(3, 1), 500);
        assert_eq!(calculate_line_score(4, 1), 800);

        assert_eq!(calculate_line_score(1, 2), 200);
        assert_eq!(calculate_line_score(4, 3), 2400);
        assert_eq!(calculate_line_score(0, 3), 0);
        assert_eq!(calculate_line_score(5, 1), 0);
    }

    #[test]
    fn test_tspin_scores() {
        assert_eq!(calculate_tspin_score(TSpinKind::Full, 0, 1), 400);
        assert_eq!(calculate_tspin_score(TSpinKind::Full, 1, 1), 800);
        assert_eq!(calculate_tspin_score(TSpinKind::Full, 2, 1), 1200);
        assert_eq!(calculate_tspin_score(TSpinKind::Full, 3, 1), 1600);
        assert_eq!(calculate_tspin_score(TSpinKind::Mini, 0, 1), 100);
        assert_eq!(calculate_tspin_score(TSpinKind::Mini, 1, 1), 200);
        assert_eq!(calculate_tspin_score(TSpinKind::Full, 1, 3), 2400);
        assert_eq!(calculate_tspin_score(TSpinKind::Mini, 3, 1), 0);
    }

    #[test]
    fn test_combo_bonus() {
        assert_eq!(calculate_combo_bonus(-1, 1), 0);
        assert_eq!(calculate_combo_bonus(0, 1), 0);
        assert_eq!(calculate_combo_bonus(1, 1), 50);
        assert_eq!(calculate_combo_bonus(3, 2), 300);
    }

    #[test]
    fn test_difficulty() {
        assert!(is_difficult(4, TSpinKind::None));
        assert!(is_difficult(0, TSpinKind::Full));
        assert!(is_difficult(1, TSpinKind::Mini));
        assert!(!is_difficult(3, TSpinKind::None));
    }

    #[test]
    fn test_b2b_multiplier() {
        assert_eq!(apply_b2b_multiplier(0), 0);
        assert_eq!(apply_b2b_multiplier(800), 1200);
        assert_eq!(apply_b2b_multiplier(101), 151);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(29), 3);
    }

    #[test]
    fn test_new_engine_state() {
        let engine = ScoringEngine::new();
        assert_eq!(
            engine.state(),
            ScoreState {
                score: 0,
                level: 1,
                lines: 0,
                combo: -1,
                back_to_back: false,
            }
        );
    }

    #[test]
    fn test_no_clear_resets_combo_and_keeps_b2b() {
        let mut engine = ScoringEngine::new();
        engine.add_line_clear(4, TSpinKind::None);
        assert_eq!(engine.combo(), 0);

        assert_eq!(engine.add_line_clear(0, TSpinKind::None), None);
        assert_eq!(engine.combo(), -1);
        assert!(engine.back_to_back());
        assert_eq!(engine.score(), 800);
    }

    #[test]
    fn test_zero_line_tspin_scores_and_extends_combo() {
        let mut engine = ScoringEngine::new();
        let event = engine.add_line_clear(0, TSpinKind::Full).unwrap();
        assert_eq!(event.score_delta, 400);
        assert_eq!(event.combo, 0);
        assert!(event.back_to_back);
        assert_eq!(engine.lines(), 0);
    }

    #[test]
    fn test_level_multiplier_uses_level_before_clear() {
        let mut engine = ScoringEngine::new();
        for _ in 0..2 {
            engine.add_line_clear(4, TSpinKind::None);
        }
        engine.add_line_clear(0, TSpinKind::None);
        assert_eq!(engine.level(), 1);

        // 8 -> 11 lines: still scored at level 1, then level 2 afterwards.
        let event = engine.add_line_clear(3, TSpinKind::None).unwrap();
        assert_eq!(event.score_delta, 500);
        assert_eq!(engine.level(), 2);
    }
}
