use stack_battle_types::PlayerId;
use thiserror::Error;

/// Caller-side failures of match operations.
///
/// Rule violations inside a board (a blocked move, a second hold) are not errors;
/// they are reported as `false` in [`ActionResult`](crate::ActionResult).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArenaError {
    #[error("player {0} has already joined this match")]
    DuplicatePlayer(PlayerId),

    #[error("player {0} is not part of this match")]
    UnknownPlayer(PlayerId),

    #[error("match is full ({0} players)")]
    MatchFull(usize),

    #[error("match actor has shut down")]
    ActorClosed,
}
