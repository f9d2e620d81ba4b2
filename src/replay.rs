//! Deterministic headless replay of a recorded action script.
//!
//! A script is a JSON array of steps:
//!
//! ```json
//! [
//!   { "player": 1, "action": "moveLeft" },
//!   { "player": 2, "action": "hardDrop" },
//!   { "tick": 3 }
//! ]
//! ```
//!
//! `tick` advances gravity on every board that many times. The same script with
//! the same seed and player count always produces the same final snapshot.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tracing::info;

use crate::arena::{Match, MatchConfig, MatchSnapshot};
use crate::types::{GameAction, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayConfig {
    pub script: PathBuf,
    pub seed: u32,
    pub players: u32,
}

/// One entry of an action script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    Action { player: PlayerId, action: GameAction },
    Tick { tick: u32 },
}

/// Parse `replay --script <file> [--seed N] [--players N]`.
///
/// Returns `Ok(None)` when the first argument is not `replay`. Unset flags fall
/// back to `defaults` (usually [`MatchConfig::from_env`]); two players by default.
pub fn parse_replay_args(args: &[String], defaults: &MatchConfig) -> Result<Option<ReplayConfig>> {
    if args.is_empty() || args[0] != "replay" {
        return Ok(None);
    }

    let mut script: Option<PathBuf> = None;
    let mut seed = defaults.seed;
    let mut players: u32 = 2;
    let mut i = 1usize;
    while i < args.len() {
        match args[i].as_str() {
            "--script" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("replay: missing value for --script"))?;
                script = Some(PathBuf::from(v));
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("replay: missing value for --seed"))?;
                seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("replay: invalid --seed value: {}", v))?;
            }
            "--players" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("replay: missing value for --players"))?;
                players = v
                    .parse::<u32>()
                    .ok()
                    .filter(|&n| n > 0 && n as usize <= defaults.max_players)
                    .ok_or_else(|| anyhow!("replay: invalid --players value: {}", v))?;
            }
            other => {
                return Err(anyhow!("replay: unknown argument: {}", other));
            }
        }
        i += 1;
    }

    let script = script.ok_or_else(|| anyhow!("replay: --script is required"))?;
    Ok(Some(ReplayConfig {
        script,
        seed,
        players,
    }))
}

pub fn parse_script(json: &str) -> Result<Vec<ScriptStep>> {
    serde_json::from_str(json).map_err(|e| anyhow!("replay: invalid script: {}", e))
}

/// Run `steps` against a fresh match with players `1..=players`.
pub fn run_replay(config: &ReplayConfig, base: &MatchConfig, steps: &[ScriptStep]) -> Result<MatchSnapshot> {
    let match_config = MatchConfig {
        seed: config.seed,
        max_players: base.max_players.max(config.players as usize),
        ..base.clone()
    };
    let mut game = Match::new(match_config);
    for id in 1..=config.players {
        game.join(PlayerId(id))
            .map_err(|e| anyhow!("replay: join failed: {}", e))?;
    }

    for (index, step) in steps.iter().enumerate() {
        match *step {
            ScriptStep::Action { player, action } => {
                game.apply(player, action)
                    .map_err(|e| anyhow!("replay: step {}: {}", index, e))?;
            }
            ScriptStep::Tick { tick } => {
                for _ in 0..tick {
                    game.tick();
                }
            }
        }
    }

    info!(steps = steps.len(), seed = config.seed, "replay finished");
    Ok(game.match_snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_replay_args_reads_flags() {
        let cfg = parse_replay_args(
            &args(&["replay", "--script", "game.json", "--seed", "99", "--players", "3"]),
            &MatchConfig::default(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            cfg,
            ReplayConfig {
                script: PathBuf::from("game.json"),
                seed: 99,
                players: 3,
            }
        );
    }

    #[test]
    fn parse_replay_args_uses_defaults() {
        let defaults = MatchConfig::default().with_seed(1234);
        let cfg = parse_replay_args(&args(&["replay", "--script", "a.json"]), &defaults)
            .unwrap()
            .unwrap();
        assert_eq!(cfg.seed, 1234);
        assert_eq!(cfg.players, 2);
    }

    #[test]
    fn parse_replay_args_rejects_bad_input() {
        let defaults = MatchConfig::default();
        assert!(parse_replay_args(&args(&["play"]), &defaults).unwrap().is_none());
        assert!(parse_replay_args(&args(&["replay"]), &defaults).is_err());
        assert!(parse_replay_args(&args(&["replay", "--seed", "x"]), &defaults).is_err());
        assert!(parse_replay_args(&args(&["replay", "--players", "0"]), &defaults).is_err());
        assert!(parse_replay_args(&args(&["replay", "--bogus"]), &defaults).is_err());
    }

    #[test]
    fn parse_script_accepts_actions_and_ticks() {
        let steps = parse_script(
            r#"[{"player": 1, "action": "rotateCcw"}, {"tick": 2}, {"player": 2, "action": "hold"}]"#,
        )
        .unwrap();
        assert_eq!(
            steps,
            vec![
                ScriptStep::Action {
                    player: PlayerId(1),
                    action: GameAction::RotateCcw
                },
                ScriptStep::Tick { tick: 2 },
                ScriptStep::Action {
                    player: PlayerId(2),
                    action: GameAction::Hold
                },
            ]
        );
        assert!(parse_script(r#"[{"player": 1, "action": "jump"}]"#).is_err());
    }

    #[test]
    fn run_replay_is_deterministic() {
        let config = ReplayConfig {
            script: PathBuf::from("unused.json"),
            seed: 8,
            players: 2,
        };
        let steps = parse_script(
            r#"[{"player": 1, "action": "hardDrop"}, {"tick": 5}, {"player": 2, "action": "moveRight"}]"#,
        )
        .unwrap();
        let base = MatchConfig::default();
        let a = run_replay(&config, &base, &steps).unwrap();
        let b = run_replay(&config, &base, &steps).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.boards.len(), 2);
    }

    #[test]
    fn run_replay_rejects_unknown_player() {
        let config = ReplayConfig {
            script: PathBuf::from("unused.json"),
            seed: 8,
            players: 1,
        };
        let steps = [ScriptStep::Action {
            player: PlayerId(5),
            action: GameAction::HardDrop,
        }];
        assert!(run_replay(&config, &MatchConfig::default(), &steps).is_err());
    }
}
