//! Garbage module - the match-scoped attack economy
//!
//! One [`GarbageCoordinator`] exists per match and owns a FIFO queue of pending
//! attacks for every player. A clear first cancels the sender's own pending
//! garbage (oldest first), then fans the remainder out to every opponent with a
//! single shared gap column.
//!
//! Queue invariants:
//! - every entry has `lines > 0`
//! - the oldest entry is at the front
//! - entries are only ever removed from the front or have the front entry reduced

use std::collections::{BTreeMap, VecDeque};

use crate::rng::{RandomSource, SimpleRng};
use crate::types::{
    PlayerId, BOARD_WIDTH, B2B_GARBAGE_BONUS, COMBO_GARBAGE, GARBAGE_TABLE,
    TSPIN_GARBAGE_MULTIPLIER,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A pending attack in a player's queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GarbageEntry {
    pub lines: u32,
    pub gap_column: u8,
    pub sender: PlayerId,
}

/// One opponent receiving an attack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Delivery {
    pub from: PlayerId,
    pub to: PlayerId,
    pub lines: u32,
    pub gap_column: u8,
}

/// Result of processing one clear
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GarbageOutcome {
    /// Lines delivered to each opponent (0 if nobody received anything)
    pub sent: u32,
    /// Lines removed from the sender's own queue
    pub cancelled: u32,
    pub deliveries: Vec<Delivery>,
}

impl GarbageOutcome {
    pub fn is_empty(&self) -> bool {
        self.sent == 0 && self.cancelled == 0
    }
}

/// Garbage lines produced by a clear, before cancellation.
///
/// `combo` is the combo counter after the clear (-1 means no chain).
pub fn calculate_garbage(lines_cleared: u32, is_tspin: bool, combo: i32, back_to_back: bool) -> u32 {
    if lines_cleared == 0 {
        return 0;
    }

    let mut garbage = GARBAGE_TABLE
        .get(lines_cleared as usize)
        .copied()
        .unwrap_or(0);

    if is_tspin {
        garbage *= TSPIN_GARBAGE_MULTIPLIER;
    }

    if combo >= 0 {
        let index = (combo as usize).min(COMBO_GARBAGE.len() - 1);
        garbage += COMBO_GARBAGE[index];
    }

    if back_to_back && (lines_cleared == 4 || is_tspin) {
        garbage += B2B_GARBAGE_BONUS;
    }

    garbage
}

/// Owns every player's incoming garbage queue for one match
#[derive(Debug, Clone)]
pub struct GarbageCoordinator<R = SimpleRng> {
    queues: BTreeMap<PlayerId, VecDeque<GarbageEntry>>,
    rng: R,
    columns: u8,
}

impl GarbageCoordinator<SimpleRng> {
    /// Coordinator for standard-width boards with a seeded [`SimpleRng`]
    pub fn with_seed(seed: u32) -> Self {
        Self::new(SimpleRng::new(seed), BOARD_WIDTH)
    }
}

impl<R: RandomSource> GarbageCoordinator<R> {
    /// `columns` bounds the gap column choice (the board width).
    pub fn new(rng: R, columns: u8) -> Self {
        Self {
            queues: BTreeMap::new(),
            rng,
            columns: columns.max(1),
        }
    }

    /// Create an empty queue for a joining player. Re-adding keeps the existing queue.
    pub fn add_player(&mut self, player: PlayerId) {
        self.queues.entry(player).or_default();
    }

    /// Drop a leaving player's queue. Unknown players are ignored.
    pub fn remove_player(&mut self, player: PlayerId) {
        self.queues.remove(&player);
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.queues.contains_key(&player)
    }

    /// Registered players in ascending id order
    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.queues.keys().copied()
    }

    /// Process a clear reported by `sender`.
    ///
    /// Cancels against the sender's own queue, then pushes the remainder onto every
    /// other player's queue. A sender that is no longer registered gets a zero
    /// outcome.
    pub fn process_line_clear(
        &mut self,
        sender: PlayerId,
        lines_cleared: u32,
        is_tspin: bool,
        combo: i32,
        back_to_back: bool,
    ) -> GarbageOutcome {
        let total = calculate_garbage(lines_cleared, is_tspin, combo, back_to_back);
        if total == 0 {
            return GarbageOutcome::default();
        }

        let Some(own_queue) = self.queues.get_mut(&sender) else {
            return GarbageOutcome::default();
        };

        let mut remaining = total;
        let mut cancelled = 0;
        while remaining > 0 {
            let Some(front) = own_queue.front_mut() else {
                break;
            };
            if front.lines <= remaining {
                remaining -= front.lines;
                cancelled += front.lines;
                own_queue.pop_front();
            } else {
                front.lines -= remaining;
                cancelled += remaining;
                remaining = 0;
            }
        }

        let mut outcome = GarbageOutcome {
            sent: 0,
            cancelled,
            deliveries: Vec::new(),
        };

        if remaining == 0 {
            return outcome;
        }

        let gap_column = self.rng.next_range(self.columns as u32) as u8;
        for (&player, queue) in self.queues.iter_mut() {
            if player == sender {
                continue;
            }
            queue.push_back(GarbageEntry {
                lines: remaining,
                gap_column,
                sender,
            });
            outcome.deliveries.push(Delivery {
                from: sender,
                to: player,
                lines: remaining,
                gap_column,
            });
        }

        if !outcome.deliveries.is_empty() {
            outcome.sent = remaining;
        }

        outcome
    }

    /// Remove and return everything queued for `player`, oldest first.
    pub fn take_incoming(&mut self, player: PlayerId) -> Vec<GarbageEntry> {
        self.queues
            .get_mut(&player)
            .map(|queue| queue.drain(..).collect())
            .unwrap_or_default()
    }

    /// Pending entries for `player`, oldest first, without draining
    pub fn pending(&self, player: PlayerId) -> impl Iterator<Item = &GarbageEntry> + '_ {
        self.queues.get(&player).into_iter().flatten()
    }

    /// Total pending lines for `player` (0 for unknown players)
    pub fn pending_lines(&self, player: PlayerId) -> u32 {
        self.pending(player).map(|entry| entry.lines).sum()
    }

    /// Queue an attack directly (used to seed scenarios and by external rules)
    ///
    /// Zero-line entries and unknown targets are ignored.
    pub fn enqueue(&mut self, target: PlayerId, entry: GarbageEntry) {
        if entry.lines == 0 {
            return;
        }
        if let Some(queue) = self.queues.get_mut(&target) {
            queue.push_back(entry);
        }
    }
}

impl Default for GarbageCoordinator<SimpleRng> {
    fn default() -> Self {
        Self::with_seed(1)
    }
}
