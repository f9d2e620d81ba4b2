//! The match container: every board of one battle plus their shared garbage
//! coordinator.
//!
//! All mutation goes through `&mut Match`, so player actions are applied one at a
//! time in the order they arrive. Seeds are derived from the match seed and the
//! player id, which makes a match replayable from (config, action sequence).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use stack_battle_core::{Board, BoardSnapshot, GarbageCoordinator, LockResult, SimpleRng, StepOutcome};
use stack_battle_types::{GameAction, PlayerId};

use crate::config::MatchConfig;
use crate::error::ArenaError;

/// Seed salt for the garbage coordinator's gap column generator
const GARBAGE_SEED_SALT: u32 = 0x5EED_6A2B;

/// Derive a board seed that depends only on the match seed and the player id.
pub fn player_seed(match_seed: u32, player: PlayerId) -> u32 {
    // Fibonacci hashing spreads consecutive ids across the seed space.
    match_seed ^ player.0.wrapping_add(1).wrapping_mul(0x9E37_79B9)
}

/// What one action did to the acting player's board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub player: PlayerId,
    pub action: GameAction,
    /// Whether the board accepted the action
    pub accepted: bool,
    /// Present when the action locked a piece
    pub lock: Option<LockResult>,
}

/// One row of the leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub alive: bool,
}

/// Every board of the match at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub seed: u32,
    pub boards: Vec<BoardSnapshot>,
    pub standings: Vec<Standing>,
    pub winner: Option<PlayerId>,
}

/// A running battle
#[derive(Debug, Clone)]
pub struct Match {
    config: MatchConfig,
    boards: BTreeMap<PlayerId, Board>,
    garbage: GarbageCoordinator,
    winner: Option<PlayerId>,
}

impl Match {
    pub fn new(config: MatchConfig) -> Self {
        let garbage = GarbageCoordinator::new(
            SimpleRng::new(config.seed ^ GARBAGE_SEED_SALT),
            config.garbage_columns(),
        );
        Self {
            config,
            boards: BTreeMap::new(),
            garbage,
            winner: None,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Joined players in ascending id order
    pub fn players(&self) -> Vec<PlayerId> {
        self.boards.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    pub fn board(&self, player: PlayerId) -> Option<&Board> {
        self.boards.get(&player)
    }

    pub fn garbage(&self) -> &GarbageCoordinator {
        &self.garbage
    }

    /// Add a player with a fresh board and spawn its first piece.
    pub fn join(&mut self, player: PlayerId) -> Result<(), ArenaError> {
        if self.boards.contains_key(&player) {
            return Err(ArenaError::DuplicatePlayer(player));
        }
        if self.boards.len() >= self.config.max_players {
            return Err(ArenaError::MatchFull(self.config.max_players));
        }

        let mut board = Board::with_seed(player, player_seed(self.config.seed, player));
        board.spawn_piece();
        self.boards.insert(player, board);
        self.garbage.add_player(player);

        info!(%player, players = self.boards.len(), "player joined");
        Ok(())
    }

    /// Remove a player and discard their board and pending garbage.
    pub fn leave(&mut self, player: PlayerId) -> Result<(), ArenaError> {
        if self.boards.remove(&player).is_none() {
            return Err(ArenaError::UnknownPlayer(player));
        }
        self.garbage.remove_player(player);

        info!(%player, players = self.boards.len(), "player left");
        self.check_winner();
        Ok(())
    }

    /// Apply one input to a player's board.
    pub fn apply(&mut self, player: PlayerId, action: GameAction) -> Result<ActionResult, ArenaError> {
        let Some(board) = self.boards.get_mut(&player) else {
            warn!(%player, action = action.as_str(), "action from unknown player");
            return Err(ArenaError::UnknownPlayer(player));
        };

        let (accepted, lock) = match action {
            GameAction::MoveLeft => (board.move_left(), None),
            GameAction::MoveRight => (board.move_right(), None),
            GameAction::SoftDrop => (board.soft_drop(), None),
            GameAction::RotateCw => (board.rotate_cw(), None),
            GameAction::RotateCcw => (board.rotate_ccw(), None),
            GameAction::Hold => (board.hold(), None),
            GameAction::HardDrop => {
                let lock = board.hard_drop(&mut self.garbage);
                (lock.is_some(), lock)
            }
        };

        let alive = board.alive();
        if let Some(lock) = &lock {
            log_lock(player, lock);
        }
        if !alive {
            self.retire(player);
            self.check_winner();
        }

        Ok(ActionResult {
            player,
            action,
            accepted,
            lock,
        })
    }

    /// Advance gravity by one row on every living board, in player id order.
    ///
    /// Returns the locks that happened during this tick.
    pub fn tick(&mut self) -> Vec<(PlayerId, LockResult)> {
        let mut locks = Vec::new();
        for (&player, board) in self.boards.iter_mut() {
            if let StepOutcome::Locked(lock) = board.step_down(&mut self.garbage) {
                log_lock(player, &lock);
                locks.push((player, lock));
            }
        }
        for (player, lock) in &locks {
            if !lock.alive {
                self.retire(*player);
            }
        }
        if !locks.is_empty() {
            self.check_winner();
        }
        locks
    }

    /// Snapshot of one board, including the garbage waiting in its queue
    pub fn snapshot(&self, player: PlayerId) -> Result<BoardSnapshot, ArenaError> {
        let board = self
            .boards
            .get(&player)
            .ok_or(ArenaError::UnknownPlayer(player))?;
        Ok(self.board_snapshot(board))
    }

    fn board_snapshot(&self, board: &Board) -> BoardSnapshot {
        let mut snap = board.state();
        snap.pending_garbage = self.garbage.pending_lines(board.player());
        snap
    }

    pub fn match_snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            seed: self.config.seed,
            boards: self.boards.values().map(|b| self.board_snapshot(b)).collect(),
            standings: self.standings(),
            winner: self.winner,
        }
    }

    /// Leaderboard: survivors first, then by score (highest first), then by id
    pub fn standings(&self) -> Vec<Standing> {
        let mut rows: Vec<Standing> = self
            .boards
            .values()
            .map(|board| {
                let score = board.score();
                Standing {
                    player: board.player(),
                    score: score.score,
                    lines: score.lines,
                    level: score.level,
                    alive: board.alive(),
                }
            })
            .collect();
        rows.sort_by(|a, b| {
            b.alive
                .cmp(&a.alive)
                .then(b.score.cmp(&a.score))
                .then(a.player.cmp(&b.player))
        });
        rows
    }

    /// The last surviving player of a match that started with two or more
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Players whose board is still alive
    pub fn alive_players(&self) -> Vec<PlayerId> {
        self.boards
            .values()
            .filter(|b| b.alive())
            .map(|b| b.player())
            .collect()
    }

    /// Drop a topped-out board from garbage distribution. Its queue goes with it.
    fn retire(&mut self, player: PlayerId) {
        if self.garbage.contains(player) {
            self.garbage.remove_player(player);
            debug!(%player, "board retired from garbage exchange");
        }
    }

    fn check_winner(&mut self) {
        if self.winner.is_some() || self.boards.len() < 2 {
            return;
        }
        let alive = self.alive_players();
        if let [last] = alive.as_slice() {
            self.winner = Some(*last);
            info!(winner = %last, "match decided");
        }
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

fn log_lock(player: PlayerId, lock: &LockResult) {
    if let Some(kind) = lock.tspin.as_str() {
        debug!(%player, kind, lines = lock.lines_cleared, "t-spin");
    }
    if lock.garbage.cancelled > 0 {
        debug!(%player, lines = lock.garbage.cancelled, "garbage cancelled");
    }
    for delivery in &lock.garbage.deliveries {
        debug!(
            from = %delivery.from,
            to = %delivery.to,
            lines = delivery.lines,
            gap = delivery.gap_column,
            "garbage sent"
        );
    }
    if lock.garbage_received > 0 {
        debug!(%player, lines = lock.garbage_received, "garbage received");
    }
    if !lock.alive {
        info!(%player, "player topped out");
    }
}
