//! Match actor.
//!
//! Owns a [`Match`] on a single tokio task and applies commands from an mpsc
//! channel strictly in arrival order. Each request carries a oneshot sender for
//! its reply.

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use stack_battle_core::{BoardSnapshot, LockResult};
use stack_battle_types::{GameAction, PlayerId};

use crate::battle::{ActionResult, Match, MatchSnapshot, Standing};
use crate::config::MatchConfig;
use crate::error::ArenaError;

type Reply<T> = oneshot::Sender<T>;

/// Command delivered to the match task.
#[derive(Debug)]
enum Command {
    Join {
        player: PlayerId,
        reply: Reply<Result<(), ArenaError>>,
    },
    Leave {
        player: PlayerId,
        reply: Reply<Result<(), ArenaError>>,
    },
    Apply {
        player: PlayerId,
        action: GameAction,
        reply: Reply<Result<ActionResult, ArenaError>>,
    },
    Tick {
        reply: Reply<Vec<(PlayerId, LockResult)>>,
    },
    Snapshot {
        player: PlayerId,
        reply: Reply<Result<BoardSnapshot, ArenaError>>,
    },
    MatchSnapshot {
        reply: Reply<MatchSnapshot>,
    },
    Standings {
        reply: Reply<Vec<Standing>>,
    },
    Winner {
        reply: Reply<Option<PlayerId>>,
    },
}

/// Cloneable handle to a match running on its own task.
///
/// The task stops once every handle has been dropped.
#[derive(Debug, Clone)]
pub struct MatchHandle {
    tx: mpsc::Sender<Command>,
}

impl MatchHandle {
    /// Spawn a new match on the current tokio runtime.
    pub fn spawn(config: MatchConfig) -> Self {
        let capacity = config.command_buffer.max(1);
        Self::spawn_match(Match::new(config), capacity)
    }

    /// Spawn an existing match (for example one restored for a replay).
    pub fn spawn_match(game: Match, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        tokio::spawn(run(game, rx));
        Self { tx }
    }

    async fn request<T>(&self, make: impl FnOnce(Reply<T>) -> Command) -> Result<T, ArenaError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(make(reply))
            .await
            .map_err(|_| ArenaError::ActorClosed)?;
        rx.await.map_err(|_| ArenaError::ActorClosed)
    }

    pub async fn join(&self, player: PlayerId) -> Result<(), ArenaError> {
        self.request(|reply| Command::Join { player, reply }).await?
    }

    pub async fn leave(&self, player: PlayerId) -> Result<(), ArenaError> {
        self.request(|reply| Command::Leave { player, reply }).await?
    }

    pub async fn apply(&self, player: PlayerId, action: GameAction) -> Result<ActionResult, ArenaError> {
        self.request(|reply| Command::Apply {
            player,
            action,
            reply,
        })
        .await?
    }

    pub async fn tick(&self) -> Result<Vec<(PlayerId, LockResult)>, ArenaError> {
        self.request(|reply| Command::Tick { reply }).await
    }

    pub async fn snapshot(&self, player: PlayerId) -> Result<BoardSnapshot, ArenaError> {
        self.request(|reply| Command::Snapshot { player, reply }).await?
    }

    pub async fn match_snapshot(&self) -> Result<MatchSnapshot, ArenaError> {
        self.request(|reply| Command::MatchSnapshot { reply }).await
    }

    pub async fn standings(&self) -> Result<Vec<Standing>, ArenaError> {
        self.request(|reply| Command::Standings { reply }).await
    }

    pub async fn winner(&self) -> Result<Option<PlayerId>, ArenaError> {
        self.request(|reply| Command::Winner { reply }).await
    }
}

async fn run(mut game: Match, mut rx: mpsc::Receiver<Command>) {
    while let Some(command) = rx.recv().await {
        // A dropped reply receiver only means the caller stopped waiting.
        match command {
            Command::Join { player, reply } => {
                let _ = reply.send(game.join(player));
            }
            Command::Leave { player, reply } => {
                let _ = reply.send(game.leave(player));
            }
            Command::Apply {
                player,
                action,
                reply,
            } => {
                let _ = reply.send(game.apply(player, action));
            }
            Command::Tick { reply } => {
                let _ = reply.send(game.tick());
            }
            Command::Snapshot { player, reply } => {
                let _ = reply.send(game.snapshot(player));
            }
            Command::MatchSnapshot { reply } => {
                let _ = reply.send(game.match_snapshot());
            }
            Command::Standings { reply } => {
                let _ = reply.send(game.standings());
            }
            Command::Winner { reply } => {
                let _ = reply.send(game.winner());
            }
        }
    }
    debug!(players = game.len(), "match actor stopped");
}
