use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WinCondition {
    /// The first capture of any stone ends the game.
    Capture1,
    /// The first side to reach three captures wins.
    Capture3,
    /// Only a double pass ends the game; territory plus captures decides it.
    #[default]
    Territory,
}

impl WinCondition {
    pub fn capture_target(&self) -> Option<u32> {
        match self {
            WinCondition::Capture1 => Some(1),
            WinCondition::Capture3 => Some(3),
            WinCondition::Territory => None,
        }
    }
}

impl fmt::Display for WinCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WinCondition::Capture1 => write!(f, "capture1"),
            WinCondition::Capture3 => write!(f, "capture3"),
            WinCondition::Territory => write!(f, "territory"),
        }
    }
}

impl std::str::FromStr for WinCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "capture1" => Ok(WinCondition::Capture1),
            "capture3" => Ok(WinCondition::Capture3),
            "territory" => Ok(WinCondition::Territory),
            _ => Err(format!("unknown win condition: {s}")),
        }
    }
}

/// Move-selection policy for the computer side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Random,
    Attack,
    Greedy,
    Advanced,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Random => write!(f, "random"),
            Strategy::Attack => write!(f, "attack"),
            Strategy::Greedy => write!(f, "greedy"),
            Strategy::Advanced => write!(f, "advanced"),
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(Strategy::Random),
            "attack" => Ok(Strategy::Attack),
            "greedy" => Ok(Strategy::Greedy),
            "advanced" => Ok(Strategy::Advanced),
            _ => Err(format!("unknown strategy: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    /// Free placement of either color, no computer and no win check.
    Explore,
    #[default]
    VsComputer,
    Challenge,
}

impl Mode {
    pub fn has_computer(&self) -> bool {
        matches!(self, Mode::VsComputer | Mode::Challenge)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Explore => write!(f, "explore"),
            Mode::VsComputer => write!(f, "vsComputer"),
            Mode::Challenge => write!(f, "challenge"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "explore" => Ok(Mode::Explore),
            "vsComputer" => Ok(Mode::VsComputer),
            "challenge" => Ok(Mode::Challenge),
            _ => Err(format!("unknown mode: {s}")),
        }
    }
}

/// A progressive challenge level. Each level fixes the win condition and the
/// computer's strategy, overriding the configured ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ChallengeLevel(u8);

impl ChallengeLevel {
    pub const MAX: u8 = 3;

    pub fn new(level: u8) -> Result<Self, ConfigError> {
        if (1..=Self::MAX).contains(&level) {
            Ok(ChallengeLevel(level))
        } else {
            Err(ConfigError::UnknownLevel(level))
        }
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    pub fn win_condition(&self) -> WinCondition {
        match self.0 {
            1 => WinCondition::Capture1,
            _ => WinCondition::Capture3,
        }
    }

    // Levels 2 and 3 share a win condition; only the opponent gets stronger.
    pub fn strategy(&self) -> Strategy {
        match self.0 {
            1 => Strategy::Random,
            2 => Strategy::Attack,
            _ => Strategy::Greedy,
        }
    }

    pub fn all() -> impl Iterator<Item = ChallengeLevel> {
        (1..=Self::MAX).map(ChallengeLevel)
    }
}

impl TryFrom<u8> for ChallengeLevel {
    type Error = ConfigError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        ChallengeLevel::new(level)
    }
}

impl From<ChallengeLevel> for u8 {
    fn from(level: ChallengeLevel) -> Self {
        level.0
    }
}

impl fmt::Display for ChallengeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {}", self.0)
    }
}

/// Configuration consumed at game start and fixed for the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub win_condition: WinCondition,
    #[serde(alias = "aiStrategy")]
    pub strategy: Strategy,
    pub mode: Mode,
    pub level: Option<ChallengeLevel>,
    /// Seed for the computer's random choices; drawn from the thread RNG when absent.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn explore() -> Self {
        GameConfig {
            mode: Mode::Explore,
            ..Default::default()
        }
    }

    pub fn vs_computer(win_condition: WinCondition, strategy: Strategy) -> Self {
        GameConfig {
            win_condition,
            strategy,
            mode: Mode::VsComputer,
            ..Default::default()
        }
    }

    pub fn challenge(level: ChallengeLevel) -> Self {
        GameConfig {
            mode: Mode::Challenge,
            level: Some(level),
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mode == Mode::Challenge && self.level.is_none() {
            return Err(ConfigError::MissingLevel);
        }
        Ok(())
    }

    pub fn effective_win_condition(&self) -> WinCondition {
        match (self.mode, self.level) {
            (Mode::Challenge, Some(level)) => level.win_condition(),
            _ => self.win_condition,
        }
    }

    pub fn effective_strategy(&self) -> Strategy {
        match (self.mode, self.level) {
            (Mode::Challenge, Some(level)) => level.strategy(),
            _ => self.strategy,
        }
    }
}
