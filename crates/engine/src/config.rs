//! Runtime configuration from environment variables.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `SNAKE_TICK_MS` | inter-tick delay in ms | 150 |
//! | `SNAKE_EXHAUSTION` | `reseed` or `halt` | `reseed` |
//! | `SNAKE_SEED` | fixed entropy seed | unset (OS entropy) |

use thiserror::Error;

use crate::types::{ConfigIssue, ExhaustionPolicy, GameConfig};

pub const TICK_MS_VAR: &str = "SNAKE_TICK_MS";
pub const EXHAUSTION_VAR: &str = "SNAKE_EXHAUSTION";
pub const SEED_VAR: &str = "SNAKE_SEED";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value:?} is not {expected}")]
    InvalidVar {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("invalid game config: {0}")]
    Invalid(ConfigIssue),
}

impl From<ConfigIssue> for ConfigError {
    fn from(issue: ConfigIssue) -> Self {
        ConfigError::Invalid(issue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    /// Fixed entropy seed for a reproducible food sequence.
    pub seed: Option<u32>,
}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut game = GameConfig::default();

        if let Some(value) = get(TICK_MS_VAR) {
            game.tick_ms = value.parse().map_err(|_| ConfigError::InvalidVar {
                var: TICK_MS_VAR,
                expected: "a delay in milliseconds",
                value,
            })?;
        }

        if let Some(value) = get(EXHAUSTION_VAR) {
            game.exhaustion =
                ExhaustionPolicy::from_str(&value).ok_or(ConfigError::InvalidVar {
                    var: EXHAUSTION_VAR,
                    expected: "`reseed` or `halt`",
                    value,
                })?;
        }

        let seed: Option<u32> = match get(SEED_VAR) {
            Some(value) => Some(value.parse().map_err(|_| ConfigError::InvalidVar {
                var: SEED_VAR,
                expected: "an unsigned 32-bit seed",
                value,
            })?),
            None => None,
        };

        game.validate()?;
        Ok(Self { game, seed })
    }
}
