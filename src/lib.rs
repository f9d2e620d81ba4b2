//! Stack Battle (workspace facade crate).
//!
//! Re-exports the workspace crates as `stack_battle::{arena, core, types}` so
//! hosts depend on one package, and carries the headless replay driver used by
//! the `stack-battle` binary.

pub use stack_battle_arena as arena;
pub use stack_battle_core as core;
pub use stack_battle_types as types;

pub mod replay;
