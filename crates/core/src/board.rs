//! Board module - one player's complete game state
//!
//! A [`Board`] ties together the grid, the active piece, the hold slot, the
//! randomizer and the scoring engine. It handles movement, rotation, locking,
//! line clears and garbage materialization.
//!
//! Operations that can lock a piece take the match's [`GarbageCoordinator`] as an
//! explicit `&mut` argument. A lock therefore runs clear detection, scoring,
//! cancellation, distribution and the drain of this board's own queue as one
//! uninterrupted step.
//!
//! Once a board tops out (`alive == false`) every mutating call is a no-op.

use crate::garbage::{GarbageCoordinator, GarbageOutcome};
use crate::pieces::{get_shape, t_corners, try_rotate, PieceShape};
use crate::rng::{RandomSource, Randomizer, SimpleRng};
use crate::scoring::{ScoreState, ScoringEngine};
use crate::snapshot::{ActiveSnapshot, BoardSnapshot};
use crate::types::*;
use crate::Grid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a new piece at the spawn anchor
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Create a piece at an explicit position and rotation
    pub fn at(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> Self {
        Self { kind, rotation, x, y }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute grid cells occupied by the piece
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Check if all minos are at free positions on the grid, offset by (dx, dy)
    pub fn fits(&self, grid: &Grid, dx: i8, dy: i8) -> bool {
        self.cells()
            .iter()
            .all(|&(x, y)| grid.is_free(x + dx, y + dy))
    }
}

/// Everything that happened during one lock
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LockResult {
    pub lines_cleared: u32,
    pub tspin: TSpinKind,
    /// Combo counter after the lock (-1 when the chain broke)
    pub combo: i32,
    pub back_to_back: bool,
    /// Points from the clear itself (drop points excluded)
    pub score_delta: u32,
    /// Cancellation and attack produced by this clear
    pub garbage: GarbageOutcome,
    /// Garbage rows materialized on this board after the clear
    pub garbage_received: u32,
    /// Whether the board survived the lock (garbage and respawn included)
    pub alive: bool,
}

impl LockResult {
    pub fn is_tspin(&self) -> bool {
        self.tspin == TSpinKind::Full
    }

    pub fn is_tspin_mini(&self) -> bool {
        self.tspin == TSpinKind::Mini
    }
}

/// Result of one gravity step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// No active piece (or the board is dead)
    Idle,
    /// The piece moved down one row
    Moved,
    /// The piece could not move and was locked
    Locked(LockResult),
}

/// A single player's board
#[derive(Debug, Clone)]
pub struct Board<R = SimpleRng> {
    player: PlayerId,
    grid: Grid,
    active: Option<ActivePiece>,
    hold: Option<PieceKind>,
    hold_used: bool,
    randomizer: Randomizer<R>,
    scoring: ScoringEngine,
    alive: bool,
    /// Most recent successful positioning change was a rotation
    last_move_was_rotation: bool,
    pieces_locked: u32,
}

impl Board<SimpleRng> {
    /// Create a board whose randomizer is seeded with `seed`
    pub fn with_seed(player: PlayerId, seed: u32) -> Self {
        Self::new(player, SimpleRng::new(seed))
    }
}

impl<R: RandomSource> Board<R> {
    /// Create an empty board. No piece is active until [`Board::spawn_piece`].
    pub fn new(player: PlayerId, rng: R) -> Self {
        Self {
            player,
            grid: Grid::new(),
            active: None,
            hold: None,
            hold_used: false,
            randomizer: Randomizer::new(rng),
            scoring: ScoringEngine::new(),
            alive: true,
            last_move_was_rotation: false,
            pieces_locked: 0,
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn alive(&self) -> bool {
        self.alive
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn hold_used(&self) -> bool {
        self.hold_used
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access for setting up positions (puzzles, tests, replays)
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn scoring(&self) -> &ScoringEngine {
        &self.scoring
    }

    pub fn score(&self) -> ScoreState {
        self.scoring.state()
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// Replace the active piece with an explicit placement.
    ///
    /// Returns false (and changes nothing) if the board is dead or the piece does
    /// not fit.
    pub fn place_active(&mut self, piece: ActivePiece) -> bool {
        if !self.alive || !piece.fits(&self.grid, 0, 0) {
            return false;
        }
        self.active = Some(piece);
        self.last_move_was_rotation = false;
        true
    }

    /// Spawn the next piece from the randomizer
    pub fn spawn_piece(&mut self) -> bool {
        if !self.alive {
            return false;
        }

        let piece = ActivePiece::new(self.randomizer.next());
        if !piece.fits(&self.grid, 0, 0) {
            self.top_out();
            return false;
        }

        self.active = Some(piece);
        self.hold_used = false;
        self.last_move_was_rotation = false;
        true
    }

    fn top_out(&mut self) {
        self.alive = false;
        self.active = None;
    }

    /// Try to translate the active piece
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.alive {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        if !active.fits(&self.grid, dx, dy) {
            return false;
        }

        self.active = Some(ActivePiece {
            x: active.x + dx,
            y: active.y + dy,
            ..active
        });
        self.last_move_was_rotation = false;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Try to rotate the active piece with SRS wall kicks
    fn try_rotate(&mut self, clockwise: bool) -> bool {
        if !self.alive {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let grid = &self.grid;
        let Some(outcome) = try_rotate(
            active.kind,
            active.rotation,
            active.x,
            active.y,
            clockwise,
            |x, y| grid.is_free(x, y),
        ) else {
            return false;
        };

        self.active = Some(ActivePiece {
            rotation: outcome.rotation,
            x: outcome.x,
            y: outcome.y,
            ..active
        });
        self.last_move_was_rotation = true;
        true
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.try_rotate(true)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.try_rotate(false)
    }

    /// Move down one row, scoring 1 point. Never locks.
    pub fn soft_drop(&mut self) -> bool {
        let moved = self.try_move(0, 1);
        if moved {
            self.scoring.add_soft_drop(1);
        }
        moved
    }

    /// Rows the active piece can fall before colliding
    fn drop_distance(&self, piece: &ActivePiece) -> i8 {
        let mut distance = 0;
        while piece.fits(&self.grid, 0, distance + 1) {
            distance += 1;
        }
        distance
    }

    /// Calculate the ghost piece Y position (where the piece would land)
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        Some(active.y + self.drop_distance(&active))
    }

    /// Drop to the lowest valid row (2 points per row) and lock.
    pub fn hard_drop<G: RandomSource>(
        &mut self,
        garbage: &mut GarbageCoordinator<G>,
    ) -> Option<LockResult> {
        if !self.alive {
            return None;
        }
        let active = self.active?;

        let distance = self.drop_distance(&active);
        if distance > 0 {
            self.active = Some(ActivePiece {
                y: active.y + distance,
                ..active
            });
            self.last_move_was_rotation = false;
        }
        self.scoring.add_hard_drop(distance as u32);

        self.lock_piece(garbage)
    }

    /// One gravity step: fall a row, or lock if the piece is resting.
    pub fn step_down<G: RandomSource>(&mut self, garbage: &mut GarbageCoordinator<G>) -> StepOutcome {
        if !self.alive || self.active.is_none() {
            return StepOutcome::Idle;
        }
        if self.try_move(0, 1) {
            return StepOutcome::Moved;
        }
        match self.lock_piece(garbage) {
            Some(result) => StepOutcome::Locked(result),
            None => StepOutcome::Idle,
        }
    }

    /// Swap active piece with hold piece
    pub fn hold(&mut self) -> bool {
        if !self.alive || self.hold_used {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match self.hold.replace(active.kind) {
            Some(held) => {
                let piece = ActivePiece::new(held);
                if piece.fits(&self.grid, 0, 0) {
                    self.active = Some(piece);
                } else {
                    self.top_out();
                }
            }
            None => {
                self.active = None;
                self.spawn_piece();
            }
        }

        self.hold_used = true;
        self.last_move_was_rotation = false;
        true
    }

    /// Lock the active piece and run the full lock sequence.
    fn lock_piece<G: RandomSource>(
        &mut self,
        garbage: &mut GarbageCoordinator<G>,
    ) -> Option<LockResult> {
        let active = self.active.take()?;

        // The active piece always fits, so this write cannot fail.
        self.grid
            .lock_piece(&active.shape(), active.x, active.y, Cell::Block(active.kind));
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        // Corners must be read before rows shift.
        let tspin = if active.kind == PieceKind::T && self.last_move_was_rotation {
            t_spin_kind(&self.grid, &active)
        } else {
            TSpinKind::None
        };
        self.last_move_was_rotation = false;

        let lines_cleared = self.grid.clear_full_rows().len() as u32;

        // The garbage bonus needs a difficult clear before this one.
        let chain_before = self.scoring.back_to_back();
        let score_delta = self
            .scoring
            .add_line_clear(lines_cleared, tspin)
            .map_or(0, |event| event.score_delta);
        let combo = self.scoring.combo();
        let back_to_back = self.scoring.back_to_back();

        let outcome = garbage.process_line_clear(
            self.player,
            lines_cleared,
            tspin == TSpinKind::Full,
            combo,
            chain_before,
        );

        let garbage_received = self.receive_garbage(garbage);

        if self.alive {
            self.spawn_piece();
        }

        Some(LockResult {
            lines_cleared,
            tspin,
            combo,
            back_to_back,
            score_delta,
            garbage: outcome,
            garbage_received,
            alive: self.alive,
        })
    }

    /// Drain this board's queue and insert the rows at the bottom.
    fn receive_garbage<G: RandomSource>(&mut self, garbage: &mut GarbageCoordinator<G>) -> u32 {
        let mut received = 0u32;
        let mut overflow = false;
        for entry in garbage.take_incoming(self.player) {
            overflow |= self
                .grid
                .push_garbage_rows(entry.lines as usize, entry.gap_column);
            received = received.saturating_add(entry.lines);
        }

        if received > 0 && (overflow || self.grid.buffer_occupied()) {
            self.top_out();
        }
        received
    }
}

impl<R: RandomSource + Clone> Board<R> {
    /// Upcoming pieces, next first
    pub fn next_preview(&self) -> [PieceKind; NEXT_PREVIEW_LEN] {
        self.randomizer.preview()
    }

    /// Snapshot for renderers and serializers.
    ///
    /// `pending_garbage` is left at 0; the match layer fills it from the coordinator.
    pub fn state(&self) -> BoardSnapshot {
        BoardSnapshot {
            player: self.player,
            grid: self.grid.to_ids(),
            active: self.active.map(ActiveSnapshot::from),
            ghost_y: self.ghost_y(),
            hold: self.hold,
            hold_used: self.hold_used,
            next: self.next_preview(),
            score: self.scoring.state(),
            alive: self.alive,
            pending_garbage: 0,
        }
    }
}

/// Classify a T lock by the occupancy of the four pivot diagonals.
///
/// Out-of-bounds corners count as occupied. Three or more occupied corners is a
/// full T-spin; exactly the two back corners occupied is a mini.
pub fn t_spin_kind(grid: &Grid, piece: &ActivePiece) -> TSpinKind {
    let occupied = |(cx, cy): (i8, i8)| grid.is_blocked(piece.x + cx, piece.y + cy);

    let (front, back) = t_corners(piece.rotation);
    let front_filled = front.into_iter().filter(|&c| occupied(c)).count();
    let back_filled = back.into_iter().filter(|&c| occupied(c)).count();

    if front_filled + back_filled >= 3 {
        TSpinKind::Full
    } else if front_filled == 0 && back_filled == 2 {
        TSpinKind::Mini
    } else {
        TSpinKind::None
    }
}
