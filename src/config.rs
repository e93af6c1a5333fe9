//! Game settings read from the environment (and `.env`, when present).

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::quiz::session::Timing;

pub const BANK_DIR_VAR: &str = "QUIZ_BANK_DIR";
pub const QUESTION_SECONDS_VAR: &str = "QUIZ_QUESTION_SECONDS";
pub const INSTRUCTIONS_SECONDS_VAR: &str = "QUIZ_INSTRUCTIONS_SECONDS";
pub const FEEDBACK_MILLIS_VAR: &str = "QUIZ_FEEDBACK_MILLIS";
pub const TICK_HZ_VAR: &str = "QUIZ_TICK_HZ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a valid number")]
    NotANumber { var: &'static str, value: String },

    #[error("{var} must be greater than 0")]
    NotPositive { var: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Where `math.txt`, `english.txt`, `science.txt` and authored quizzes live.
    pub bank_dir: PathBuf,
    pub timing: Timing,
    pub tick_hz: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bank_dir: PathBuf::from("banks"),
            timing: Timing::default(),
            tick_hz: 60,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from any variable source; unset variables keep their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(dir) = lookup(BANK_DIR_VAR).filter(|d| !d.trim().is_empty()) {
            config.bank_dir = PathBuf::from(dir);
        }
        if let Some(secs) = positive(&lookup, QUESTION_SECONDS_VAR)? {
            config.timing.question = Duration::from_secs(secs);
        }
        if let Some(secs) = positive(&lookup, INSTRUCTIONS_SECONDS_VAR)? {
            config.timing.instructions = Duration::from_secs(secs);
        }
        if let Some(millis) = positive(&lookup, FEEDBACK_MILLIS_VAR)? {
            config.timing.feedback = Duration::from_millis(millis);
        }
        if let Some(hz) = positive(&lookup, TICK_HZ_VAR)? {
            config.tick_hz = u32::try_from(hz).map_err(|_| ConfigError::NotANumber {
                var: TICK_HZ_VAR,
                value: hz.to_string(),
            })?;
        }
        Ok(config)
    }

    /// Length of one fixed tick.
    pub fn tick(&self) -> Duration {
        Duration::from_secs(1) / self.tick_hz
    }
}

fn positive(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u64>, ConfigError> {
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    let parsed = value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::NotANumber {
            var,
            value: value.clone(),
        })?;
    if parsed == 0 {
        return Err(ConfigError::NotPositive { var });
    }
    Ok(Some(parsed))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = GameConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.timing.question, Duration::from_secs(10));
        assert_eq!(config.timing.instructions, Duration::from_secs(5));
        assert_eq!(config.tick_hz, 60);
    }

    #[test]
    fn reads_overrides() {
        let config = GameConfig::from_lookup(lookup(&[
            (BANK_DIR_VAR, "quizzes"),
            (QUESTION_SECONDS_VAR, "15"),
            (FEEDBACK_MILLIS_VAR, " 250 "),
            (TICK_HZ_VAR, "30"),
        ]))
        .unwrap();
        assert_eq!(config.bank_dir, PathBuf::from("quizzes"));
        assert_eq!(config.timing.question, Duration::from_secs(15));
        assert_eq!(config.timing.feedback, Duration::from_millis(250));
        assert_eq!(config.tick(), Duration::from_secs(1) / 30);
    }

    #[test]
    fn rejects_garbage_and_zero() {
        let err = GameConfig::from_lookup(lookup(&[(QUESTION_SECONDS_VAR, "ten")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NotANumber {
                var: QUESTION_SECONDS_VAR,
                value: "ten".to_string()
            }
        );
        let err = GameConfig::from_lookup(lookup(&[(TICK_HZ_VAR, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::NotPositive { var: TICK_HZ_VAR });
    }
}
