use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stack_battle::arena::{Match, MatchConfig};
use stack_battle::core::{Board, GarbageCoordinator, GarbageEntry, Grid};
use stack_battle::types::{Cell, GameAction, PieceKind, PlayerId, BOARD_HEIGHT, BOARD_WIDTH};

fn bench_match_tick(c: &mut Criterion) {
    let mut game = Match::new(MatchConfig::default().with_seed(12345));
    for id in 1..=8 {
        let _ = game.join(PlayerId(id));
    }

    c.bench_function("match_tick_8_players", |b| {
        b.iter(|| {
            black_box(game.tick());
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new();
            for y in (BOARD_HEIGHT - 4)..BOARD_HEIGHT {
                for x in 0..BOARD_WIDTH {
                    grid.set(x as i8, y as i8, Cell::Block(PieceKind::I));
                }
            }
            black_box(grid.clear_full_rows());
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    c.bench_function("hard_drop_lock", |b| {
        b.iter(|| {
            let mut garbage = GarbageCoordinator::with_seed(1);
            garbage.add_player(PlayerId(1));
            let mut board = Board::with_seed(PlayerId(1), 12345);
            board.spawn_piece();
            for _ in 0..8 {
                black_box(board.hard_drop(&mut garbage));
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut board = Board::with_seed(PlayerId(1), 12345);
    board.spawn_piece();

    c.bench_function("rotate_cw", |b| {
        b.iter(|| {
            black_box(board.rotate_cw());
        })
    });
}

fn bench_garbage_exchange(c: &mut Criterion) {
    c.bench_function("garbage_cancel_and_fan_out", |b| {
        b.iter(|| {
            let mut garbage = GarbageCoordinator::with_seed(7);
            for id in 1..=8 {
                garbage.add_player(PlayerId(id));
            }
            garbage.enqueue(
                PlayerId(1),
                GarbageEntry {
                    lines: 2,
                    gap_column: 3,
                    sender: PlayerId(2),
                },
            );
            black_box(garbage.process_line_clear(PlayerId(1), 4, false, 2, true));
            for id in 2..=8 {
                black_box(garbage.take_incoming(PlayerId(id)));
            }
        })
    });
}

fn bench_apply_action(c: &mut Criterion) {
    let mut game = Match::new(MatchConfig::default().with_seed(99));
    let _ = game.join(PlayerId(1));
    let _ = game.join(PlayerId(2));

    c.bench_function("apply_move", |b| {
        b.iter(|| {
            let _ = black_box(game.apply(PlayerId(1), GameAction::MoveRight));
            let _ = black_box(game.apply(PlayerId(1), GameAction::MoveLeft));
        })
    });
}

criterion_group!(
    benches,
    bench_match_tick,
    bench_line_clear,
    bench_hard_drop,
    bench_rotate,
    bench_garbage_exchange,
    bench_apply_action
);
criterion_main!(benches);
