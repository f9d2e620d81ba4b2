//! Core rules module - pure, deterministic, and testable
//!
//! This crate contains the complete rules of a stacking-block battle: boards,
//! pieces, rotation, scoring and the garbage economy between players.
//! It has **zero dependencies** on UI, networking, timing or I/O, making it:
//!
//! - **Deterministic**: Same seeds and the same action sequence produce identical matches
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Can run in any environment (server, client prediction, headless bots)
//!
//! # Module Structure
//!
//! - [`grid`]: 10x24 cell matrix with collision, line clearing and garbage insertion
//! - [`board`]: One player's state: active piece, hold, lock sequence, T-spin detection
//! - [`pieces`]: Tetromino shape definitions and SRS rotation with wall kicks
//! - [`rng`]: Injectable random sources and 7-bag piece generation
//! - [`scoring`]: Score, level, combo and back-to-back bookkeeping
//! - [`garbage`]: Match-wide attack queues with cancellation and fan-out
//! - [`snapshot`]: Read-only board views for renderers and serializers
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: Pieces are drawn from a shuffled bag of 7
//! - **SRS Rotation**: Super Rotation System with wall kicks for all pieces except O
//! - **Ghost Piece**: The row the active piece would land on
//! - **Hold**: Store one piece for later use (once per spawned piece)
//! - **T-Spin Detection**: Mini and full T-spins based on pivot corner occupancy
//! - **Garbage**: Clears attack every opponent after cancelling the sender's own queue
//!
//! # Example
//!
//! ```
//! use stack_battle_core::{Board, GarbageCoordinator};
//! use stack_battle_core::types::PlayerId;
//!
//! let mut garbage = GarbageCoordinator::with_seed(9);
//! garbage.add_player(PlayerId(1));
//!
//! let mut board = Board::with_seed(PlayerId(1), 12345);
//! board.spawn_piece();
//!
//! board.move_right();
//! board.rotate_cw();
//! let result = board.hard_drop(&mut garbage).unwrap();
//!
//! assert_eq!(result.lines_cleared, 0);
//! assert!(board.score().score > 0); // Hard drop awards points
//! ```
//!
//! There is no clock in this crate. Callers drive gravity with
//! [`Board::step_down`](board::Board::step_down) at whatever cadence they choose.

pub mod board;
pub mod garbage;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use stack_battle_types as types;

// Re-export commonly used types for convenience
pub use board::{t_spin_kind, ActivePiece, Board, LockResult, StepOutcome};
pub use garbage::{calculate_garbage, Delivery, GarbageCoordinator, GarbageEntry, GarbageOutcome};
pub use grid::{CellIds, Grid};
pub use pieces::{get_kick_table, get_shape, try_rotate, RotationOutcome};
pub use rng::{RandomSource, Randomizer, SimpleRng};
pub use scoring::{ScoreEvent, ScoreState, ScoringEngine};
pub use snapshot::{ActiveSnapshot, BoardSnapshot};
