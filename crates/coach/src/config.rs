//! Coach configuration from environment variables

use std::env;
use std::time::Duration;

use crate::engine::Difficulty;
use crate::error::CoachError;

#[derive(Clone, Debug)]
pub struct CoachConfig {
    /// Path to the UCI engine binary
    pub stockfish_path: String,

    /// Tier the bot plays at
    pub difficulty: Difficulty,

    /// How long to wait for `bestmove`; `None` waits indefinitely
    pub engine_timeout: Option<Duration>,

    /// Seed for reproducible template selection
    pub seed: Option<u64>,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            stockfish_path: "/usr/local/bin/stockfish".to_string(),
            difficulty: Difficulty::Medium,
            engine_timeout: Some(Duration::from_secs(30)),
            seed: None,
        }
    }
}

impl CoachConfig {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self, CoachError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoachError> {
        let defaults = Self::default();

        let stockfish_path = lookup("STOCKFISH_PATH").unwrap_or(defaults.stockfish_path);

        let difficulty = match lookup("COACH_DIFFICULTY") {
            Some(v) => v.parse()?,
            None => defaults.difficulty,
        };

        let engine_timeout = match lookup("ENGINE_TIMEOUT_SECS") {
            Some(v) => {
                let secs: u64 = v.trim().parse().map_err(|_| {
                    CoachError::Config(format!("ENGINE_TIMEOUT_SECS is not a number: {v}"))
                })?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => defaults.engine_timeout,
        };

        let seed = match lookup("COACH_SEED") {
            Some(v) => Some(
                v.trim()
                    .parse()
                    .map_err(|_| CoachError::Config(format!("COACH_SEED is not a number: {v}")))?,
            ),
            None => None,
        };

        Ok(Self {
            stockfish_path,
            difficulty,
            engine_timeout,
            seed,
        })
    }
}
