//! Property tests over random action sequences.
//!
//! Invariants covered:
//! - the active piece always fits: inside the grid and on empty cells
//! - a failed translation leaves the piece where it was
//! - no full row survives a lock
//! - score, lines and level only move forward, and level tracks lines
//! - a dead board stays dead and ignores every action

use proptest::prelude::*;

use stack_battle::core::{Board, GarbageCoordinator, Randomizer};
use stack_battle::types::{GameAction, PieceKind, PlayerId, BOARD_HEIGHT, BOARD_WIDTH};

const ACTIONS: [GameAction; 7] = [
    GameAction::MoveLeft,
    GameAction::MoveRight,
    GameAction::SoftDrop,
    GameAction::HardDrop,
    GameAction::RotateCw,
    GameAction::RotateCcw,
    GameAction::Hold,
];

fn apply(board: &mut Board, garbage: &mut GarbageCoordinator, action: GameAction) -> bool {
    match action {
        GameAction::MoveLeft => board.move_left(),
        GameAction::MoveRight => board.move_right(),
        GameAction::SoftDrop => board.soft_drop(),
        GameAction::HardDrop => board.hard_drop(garbage).is_some(),
        GameAction::RotateCw => board.rotate_cw(),
        GameAction::RotateCcw => board.rotate_ccw(),
        GameAction::Hold => board.hold(),
    }
}

fn assert_active_fits(board: &Board) {
    if let Some(active) = board.active() {
        for (x, y) in active.cells() {
            assert!((0..BOARD_WIDTH as i8).contains(&x), "column {} out of range", x);
            assert!((0..BOARD_HEIGHT as i8).contains(&y), "row {} out of range", y);
            assert!(board.grid().is_free(x, y), "active overlaps ({}, {})", x, y);
        }
    }
}

proptest! {
    #[test]
    fn random_play_respects_board_invariants(
        seed in any::<u32>(),
        actions in prop::collection::vec(0usize..ACTIONS.len(), 1..400),
    ) {
        let player = PlayerId(1);
        let mut garbage = GarbageCoordinator::with_seed(seed);
        garbage.add_player(player);
        let mut board = Board::with_seed(player, seed);
        board.spawn_piece();

        for index in actions {
            let action = ACTIONS[index];
            let before = board.clone();
            let accepted = apply(&mut board, &mut garbage, action);

            assert_active_fits(&board);

            if !before.alive() {
                prop_assert!(!accepted);
                prop_assert!(!board.alive());
                continue;
            }

            if !accepted && matches!(action, GameAction::MoveLeft | GameAction::MoveRight) {
                prop_assert_eq!(board.active(), before.active());
            }

            for y in 0..BOARD_HEIGHT as usize {
                prop_assert!(!board.grid().is_row_full(y));
            }

            let (old, new) = (before.score(), board.score());
            prop_assert!(new.score >= old.score);
            prop_assert!(new.lines >= old.lines);
            prop_assert_eq!(new.level, 1 + new.lines / 10);
        }
    }

    #[test]
    fn bag_windows_are_permutations(seed in any::<u32>(), bags in 1usize..20) {
        let mut randomizer = Randomizer::with_seed(seed);
        for _ in 0..bags {
            let mut seen = [false; 7];
            for _ in 0..7 {
                let kind = randomizer.next();
                let slot = PieceKind::ALL.iter().position(|&k| k == kind).unwrap();
                prop_assert!(!seen[slot]);
                seen[slot] = true;
            }
        }
    }

    #[test]
    fn column_stays_in_range(seed in any::<u32>(), moves in prop::collection::vec(any::<bool>(), 0..40)) {
        let mut board = Board::with_seed(PlayerId(1), seed);
        board.spawn_piece();
        for left in moves {
            let before = board.active();
            let moved = if left { board.move_left() } else { board.move_right() };
            if !moved {
                prop_assert_eq!(board.active(), before);
            }
            assert_active_fits(&board);
        }
    }
}
