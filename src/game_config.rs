//! Game configuration for simulations.

use crate::agents::{DEFAULT_SABOTAGE_CHANCE, RandomAgent};
use crate::games::avalon::{Game, SetupError, VisibilityRules};
use crate::orchestrator::DEFAULT_MAX_STEPS;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Configuration for one simulated game.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seat names in seat order; the length is the player count.
    player_names: Vec<String>,

    /// Seed for role assignment and agents; random when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// House rules for Merlin's sight.
    #[serde(default)]
    visibility: VisibilityRules,

    /// Orchestration step guard.
    #[serde(default = "default_max_steps")]
    max_steps: usize,

    /// Probability that an evil agent fails a mission.
    #[serde(default = "default_sabotage_chance")]
    sabotage_chance: f64,
}

fn default_max_steps() -> usize {
    DEFAULT_MAX_STEPS
}

fn default_sabotage_chance() -> f64 {
    DEFAULT_SABOTAGE_CHANCE
}

/// Default seat names, `Player1..PlayerN`.
pub fn default_names(player_count: usize) -> Vec<String> {
    (1..=player_count).map(|i| format!("Player{i}")).collect()
}

impl GameConfig {
    /// Creates a configuration with default settings.
    #[instrument(skip(player_names), fields(players = player_names.len()))]
    pub fn new(player_names: Vec<String>) -> Self {
        Self {
            player_names,
            seed: None,
            visibility: VisibilityRules::default(),
            max_steps: default_max_steps(),
            sabotage_chance: default_sabotage_chance(),
        }
    }

    /// Configuration for `player_count` default-named seats.
    pub fn for_players(player_count: usize) -> Self {
        Self::new(default_names(player_count))
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(
            players = config.player_names.len(),
            seed = ?config.seed,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Checks ranges serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.sabotage_chance) {
            return Err(ConfigError::new(format!(
                "sabotage_chance must be within 0.0..=1.0, got {}",
                self.sabotage_chance
            )));
        }
        if self.max_steps == 0 {
            return Err(ConfigError::new("max_steps must be positive".to_string()));
        }
        Ok(())
    }

    /// Number of seats.
    pub fn player_count(&self) -> usize {
        self.player_names.len()
    }

    /// Deals a game, reproducibly when a seed is set.
    #[instrument(skip(self), fields(players = self.player_count(), seed = ?self.seed))]
    pub fn build_game(&self) -> Result<Game, SetupError> {
        let game = match self.seed {
            Some(seed) => Game::with_seed(self.player_count(), &self.player_names, seed)?,
            None => Game::new(self.player_count(), &self.player_names)?,
        };
        Ok(game.with_visibility(self.visibility))
    }

    /// One random agent per seat, each seeded from the game seed.
    pub fn build_agents(&self) -> Vec<RandomAgent> {
        let base = self.seed.unwrap_or_else(rand::random);
        self.player_names
            .iter()
            .zip(0u64..)
            .map(|(name, offset)| {
                RandomAgent::new(name.clone(), base.wrapping_add(offset + 1))
                    .with_sabotage_chance(self.sabotage_chance)
            })
            .collect()
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"player_names = ["A", "B", "C", "D", "E"]"#).unwrap();

        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(config.player_count(), 5);
        assert_eq!(*config.seed(), None);
        assert_eq!(*config.visibility(), VisibilityRules::default());
        assert_eq!(*config.max_steps(), DEFAULT_MAX_STEPS);
    }

    #[test]
    fn test_house_rules_and_seed_parse() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
player_names = ["A", "B", "C", "D", "E", "F", "G"]
seed = 42
sabotage_chance = 0.5

[visibility]
merlin_sees_morgana = true
"#
        )
        .unwrap();

        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.seed(), Some(42));
        assert!(config.visibility().merlin_sees_morgana);
        assert!(!config.visibility().merlin_sees_mordred);
        assert_eq!(config.build_game().unwrap().players().len(), 7);
    }

    #[test]
    fn test_out_of_range_chance_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "player_names = [\"A\"]\nsabotage_chance = 1.5").unwrap();
        let err = GameConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.contains("sabotage_chance"));
    }

    #[test]
    fn test_missing_file() {
        let err = GameConfig::from_file("/nonexistent/avalon.toml").unwrap_err();
        assert!(err.message.starts_with("Failed to read config file"));
    }

    #[test]
    fn test_seeded_config_builds_same_game() {
        let config = GameConfig::for_players(8).with_seed(Some(3));
        assert_eq!(config.build_game().unwrap(), config.build_game().unwrap());
    }
}
