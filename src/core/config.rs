//! Game configuration types.
//!
//! - `Difficulty`: Easy or Hard, fixed for a game's lifetime
//! - `GameConfig`: timing and scoring constants
//!
//! Hosts usually keep the defaults; tests shorten delays or durations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};

/// Difficulty level.
///
/// Hard rotates the board every `rotation_interval_secs` while the countdown
/// runs. Easy never moves cards on its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl Difficulty {
    /// Does this difficulty rotate the board on the countdown?
    #[must_use]
    pub const fn rotates_board(self) -> bool {
        matches!(self, Difficulty::Hard)
    }

    /// Display name used by hosts for labels and score tables.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(GameError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Timing and scoring parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Countdown length in seconds (default: 45).
    pub duration_secs: u32,

    /// Maximum number of distinct symbols dealt (default: 4).
    /// Symbols past the cap are ignored.
    pub max_symbols: usize,

    /// Points gained for a matched pair (default: 3).
    pub match_reward: i64,

    /// Points lost for a mismatched pair (default: 1).
    pub mismatch_penalty: i64,

    /// Hard difficulty rotates whenever the remaining seconds are a
    /// multiple of this (default: 10).
    pub rotation_interval_secs: u32,

    /// Length of one countdown tick in milliseconds (default: 1000).
    pub tick_ms: u64,

    /// How long a mismatched pair stays face up (default: 300).
    pub flip_back_delay_ms: u64,

    /// Pause between clearing the board and announcing the win (default: 1000).
    pub finish_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            duration_secs: 45,
            max_symbols: 4,
            match_reward: 3,
            mismatch_penalty: 1,
            rotation_interval_secs: 10,
            tick_ms: 1000,
            flip_back_delay_ms: 300,
            finish_delay_ms: 1000,
        }
    }
}

impl GameConfig {
    /// Set the countdown length.
    pub fn with_duration(mut self, secs: u32) -> Self {
        self.duration_secs = secs;
        self
    }

    /// Set the symbol cap.
    pub fn with_max_symbols(mut self, cap: usize) -> Self {
        self.max_symbols = cap;
        self
    }

    /// Set the match reward and mismatch penalty.
    pub fn with_scoring(mut self, reward: i64, penalty: i64) -> Self {
        self.match_reward = reward;
        self.mismatch_penalty = penalty;
        self
    }

    /// Set the Hard rotation interval.
    pub fn with_rotation_interval(mut self, secs: u32) -> Self {
        self.rotation_interval_secs = secs;
        self
    }

    /// Set the flip-back and finish delays.
    pub fn with_delays(mut self, flip_back_ms: u64, finish_ms: u64) -> Self {
        self.flip_back_delay_ms = flip_back_ms;
        self.finish_delay_ms = finish_ms;
        self
    }

    /// Check the values the engine divides by or counts down from.
    pub fn validate(&self) -> Result<()> {
        if self.max_symbols == 0 {
            return Err(GameError::ZeroSymbolCap);
        }
        if self.duration_secs == 0 {
            return Err(GameError::ZeroDuration);
        }
        if self.tick_ms == 0 {
            return Err(GameError::ZeroTickPeriod);
        }
        if self.rotation_interval_secs == 0 {
            return Err(GameError::ZeroRotationInterval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.duration_secs, 45);
        assert_eq!(config.max_symbols, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zeroes() {
        assert_eq!(
            GameConfig::default().with_max_symbols(0).validate(),
            Err(GameError::ZeroSymbolCap)
        );
        assert_eq!(
            GameConfig::default().with_duration(0).validate(),
            Err(GameError::ZeroDuration)
        );
        assert_eq!(
            GameConfig::default().with_rotation_interval(0).validate(),
            Err(GameError::ZeroRotationInterval)
        );

        let mut config = GameConfig::default();
        config.tick_ms = 0;
        assert_eq!(config.validate(), Err(GameError::ZeroTickPeriod));
    }

    #[test]
    fn test_difficulty_parse_and_display() {
        assert_eq!("Easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(" hard ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(
            "medium".parse::<Difficulty>(),
            Err(GameError::UnknownDifficulty("medium".to_string()))
        );

        assert_eq!(Difficulty::Hard.to_string(), "Hard");
        assert!(Difficulty::Hard.rotates_board());
        assert!(!Difficulty::Easy.rotates_board());
    }

    #[test]
    fn test_config_serde_fills_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"duration_secs": 30}"#).unwrap();
        assert_eq!(config.duration_secs, 30);
        assert_eq!(config.match_reward, 3);

        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
