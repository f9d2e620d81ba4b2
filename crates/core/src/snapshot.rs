use crate::board::ActivePiece;
use crate::grid::CellIds;
use crate::scoring::ScoreState;
use crate::types::{PieceKind, PlayerId, Rotation, BOARD_HEIGHT, BOARD_WIDTH, NEXT_PREVIEW_LEN};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

impl From<ActiveSnapshot> for ActivePiece {
    fn from(value: ActiveSnapshot) -> Self {
        ActivePiece::at(value.kind, value.rotation, value.x, value.y)
    }
}

/// Read-only view of one board, suitable for rendering or serializing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardSnapshot {
    pub player: PlayerId,
    /// Cell ids, row 0 is the top of the buffer
    pub grid: CellIds,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub hold_used: bool,
    pub next: [PieceKind; NEXT_PREVIEW_LEN],
    pub score: ScoreState,
    pub alive: bool,
    /// Lines queued against this player and not yet materialized
    pub pending_garbage: u32,
}

impl BoardSnapshot {
    /// Visible playfield rows only (buffer rows dropped)
    pub fn visible_rows(&self) -> &[[u8; BOARD_WIDTH as usize]] {
        let start = (BOARD_HEIGHT - crate::types::VISIBLE_HEIGHT) as usize;
        &self.grid[start..]
    }

    /// Height of the tallest column, counted from the floor
    pub fn stack_height(&self) -> usize {
        self.grid
            .iter()
            .position(|row| row.iter().any(|&id| id != 0))
            .map_or(0, |top| BOARD_HEIGHT as usize - top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn snapshot_reflects_fresh_board() {
        let mut board = Board::with_seed(PlayerId(4), 77);
        let next = board.next_preview();
        board.spawn_piece();

        let snap = board.state();
        assert_eq!(snap.player, PlayerId(4));
        assert!(snap.alive);
        assert_eq!(snap.active.map(|a| a.kind), Some(next[0]));
        assert_eq!(&snap.next[..4], &next[1..]);
        assert_eq!(snap.stack_height(), 0);
        assert_eq!(snap.visible_rows().len(), 20);
        assert_eq!(snap.pending_garbage, 0);
        assert!(snap.ghost_y.is_some());
    }

    #[test]
    fn active_snapshot_roundtrips_to_piece() {
        let piece = ActivePiece::at(PieceKind::L, Rotation::West, 2, 9);
        let snap = ActiveSnapshot::from(piece);
        assert_eq!(ActivePiece::from(snap), piece);
    }
}
