//! Piece catalog and SRS tests

use stack_battle::core::pieces::{get_kick_table, get_shape, kicks_for, try_rotate};
use stack_battle::core::Randomizer;
use stack_battle::types::{PieceKind, Rotation};

const ROTATIONS: [Rotation; 4] = [Rotation::North, Rotation::East, Rotation::South, Rotation::West];

#[test]
fn test_every_state_has_four_distinct_minos_in_the_box() {
    for kind in PieceKind::ALL {
        for rotation in ROTATIONS {
            let shape = get_shape(kind, rotation);
            for (i, &(x, y)) in shape.iter().enumerate() {
                assert!((0..4).contains(&x) && (0..4).contains(&y));
                assert!(!shape[i + 1..].contains(&(x, y)), "{:?} {:?} repeats a mino", kind, rotation);
            }
        }
    }
}

#[test]
fn test_o_states_are_identical() {
    let north = get_shape(PieceKind::O, Rotation::North);
    for rotation in ROTATIONS {
        assert_eq!(get_shape(PieceKind::O, rotation), north);
    }
}

#[test]
fn test_kick_tables_cover_every_transition() {
    for kind in PieceKind::ALL {
        for rotation in ROTATIONS {
            for clockwise in [true, false] {
                let kicks = kicks_for(kind, rotation, clockwise);
                if kind == PieceKind::O {
                    assert!(kicks.is_none());
                } else {
                    assert_eq!(kicks.unwrap()[0], (0, 0));
                }
            }
        }
    }
}

#[test]
fn test_i_uses_its_own_table() {
    let i = get_kick_table(PieceKind::I).unwrap();
    let t = get_kick_table(PieceKind::T).unwrap();
    assert_ne!(i, t);
    assert_eq!(get_kick_table(PieceKind::J), get_kick_table(PieceKind::Z));
}

#[test]
fn test_opposite_kicks_mirror_each_other() {
    // N->E and E->N use negated offsets.
    for kind in [PieceKind::T, PieceKind::I] {
        let forward = kicks_for(kind, Rotation::North, true).unwrap();
        let back = kicks_for(kind, Rotation::East, false).unwrap();
        for (f, b) in forward.iter().zip(back.iter()) {
            assert_eq!((f.0, f.1), (-b.0, -b.1));
        }
    }
}

#[test]
fn test_ccw_then_cw_restores_state() {
    for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::Z, PieceKind::T, PieceKind::I] {
        let left = try_rotate(kind, Rotation::North, 4, 8, false, |_, _| true).unwrap();
        assert_eq!(left.rotation, Rotation::West);
        let back = try_rotate(kind, left.rotation, left.x, left.y, true, |_, _| true).unwrap();
        assert_eq!((back.rotation, back.x, back.y), (Rotation::North, 4, 8));
    }
}

#[test]
fn test_kick_candidates_tried_in_order() {
    // Only the last candidate of the I N->E transition is open.
    let kicks = kicks_for(PieceKind::I, Rotation::North, true).unwrap();
    let (dx, dy) = kicks[4];
    let target = get_shape(PieceKind::I, Rotation::East).map(|(mx, my)| (5 + dx + mx, 10 + dy + my));
    let out = try_rotate(PieceKind::I, Rotation::North, 5, 10, true, |x, y| target.contains(&(x, y))).unwrap();
    assert_eq!(out.kick_index, 4);
    assert_eq!((out.x, out.y), (5 + dx, 10 + dy));
}

#[test]
fn test_seven_draws_from_bag_boundary_are_a_permutation() {
    let mut all = PieceKind::ALL.to_vec();
    all.sort();

    let mut randomizer = Randomizer::with_seed(2024);
    for _ in 0..5 {
        let mut bag: Vec<PieceKind> = (0..7).map(|_| randomizer.next()).collect();
        bag.sort();
        assert_eq!(bag, all);
    }
}
