//! Stack Battle runner (default binary).
//!
//! Replays a recorded action script against a fresh match and prints the final
//! match snapshot as JSON on stdout. Logs go to stderr (`RUST_LOG`, default `info`).

use std::fs;

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

use stack_battle::arena::MatchConfig;
use stack_battle::replay::{parse_replay_args, parse_script, run_replay};

const USAGE: &str = "usage: stack-battle replay --script <file.json> [--seed N] [--players N]";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let defaults = MatchConfig::from_env();

    let Some(config) = parse_replay_args(&args, &defaults)? else {
        return Err(anyhow!(USAGE));
    };

    let script = fs::read_to_string(&config.script)
        .map_err(|e| anyhow!("replay: cannot read {}: {}", config.script.display(), e))?;
    let steps = parse_script(&script)?;
    let snapshot = run_replay(&config, &defaults, &steps)?;

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
