//! Match configuration.

use stack_battle_types::BOARD_WIDTH;

/// Settings fixed for the lifetime of one match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    /// Root seed; every board and the garbage coordinator derive their own from it
    pub seed: u32,
    /// Maximum number of simultaneously joined players
    pub max_players: usize,
    /// Number of columns a garbage gap may be placed in
    pub columns: u8,
    /// Capacity of the actor's command channel
    pub command_buffer: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            max_players: 8,
            columns: BOARD_WIDTH,
            command_buffer: 64,
        }
    }
}

impl MatchConfig {
    /// Create from environment variables, falling back to the defaults
    ///
    /// - `STACK_BATTLE_SEED`
    /// - `STACK_BATTLE_MAX_PLAYERS`
    /// - `STACK_BATTLE_COMMAND_BUFFER`
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let seed = env::var("STACK_BATTLE_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let max_players = env::var("STACK_BATTLE_MAX_PLAYERS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(defaults.max_players);

        let command_buffer = env::var("STACK_BATTLE_COMMAND_BUFFER")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(defaults.command_buffer);

        Self {
            seed,
            max_players,
            command_buffer,
            ..defaults
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_players(mut self, max_players: usize) -> Self {
        self.max_players = max_players;
        self
    }

    /// Gap column range actually used (always within the grid width)
    pub fn garbage_columns(&self) -> u8 {
        self.columns.clamp(1, BOARD_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MatchConfig::default();
        assert_eq!(config.columns, 10);
        assert!(config.max_players >= 2);
    }

    #[test]
    fn test_garbage_columns_clamped() {
        let mut config = MatchConfig::default();
        config.columns = 0;
        assert_eq!(config.garbage_columns(), 1);
        config.columns = 40;
        assert_eq!(config.garbage_columns(), BOARD_WIDTH);
    }

    #[test]
    fn test_config_from_env() {
        // Unset variables fall back to the defaults; just make sure it doesn't panic.
        let config = MatchConfig::from_env();
        assert!(config.max_players > 0);
    }
}
