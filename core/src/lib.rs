#![no_std]

extern crate alloc;

use alloc::format;
use alloc::string::String;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use clicker::*;
pub use dodge::*;
pub use error::*;
pub use geometry::*;
pub use guess::*;
pub use leaderboard::*;
pub use nickname::*;
pub use round::*;
pub use rps::*;
pub use store::*;

mod clicker;
mod dodge;
mod error;
mod geometry;
mod guess;
mod leaderboard;
mod nickname;
mod round;
mod rps;
mod store;

/// Score type shared by every game and stored in leaderboards.
pub type Score = u32;

/// Identifies one of the minigames and the leaderboard it owns.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameKind {
    Clicker,
    Guess,
    Rocket,
    CosmicDodge,
    RockPaperScissors,
}

impl GameKind {
    pub const ALL: [GameKind; 5] = [
        Self::Clicker,
        Self::Guess,
        Self::Rocket,
        Self::CosmicDodge,
        Self::RockPaperScissors,
    ];

    pub const fn slug(self) -> &'static str {
        use GameKind::*;
        match self {
            Clicker => "clicker",
            Guess => "guess",
            Rocket => "rocket",
            CosmicDodge => "dodge",
            RockPaperScissors => "rps",
        }
    }

    pub const fn title(self) -> &'static str {
        use GameKind::*;
        match self {
            Clicker => "Turbo Clicker",
            Guess => "Number Guessing",
            Rocket => "Rocket Dodge",
            CosmicDodge => "Cosmic Dodge",
            RockPaperScissors => "Rock Paper Scissors",
        }
    }

    /// Score text shown on leaderboard rows.
    pub fn format_score(self, score: Score) -> String {
        use GameKind::*;
        match self {
            Clicker => format!("{}", score),
            Guess if score == 1 => String::from("1 attempt"),
            Guess => format!("{} attempts", score),
            Rocket => format!("{}s", score),
            CosmicDodge => format!("Score: {}", score),
            RockPaperScissors => format!("Wins: {}", score),
        }
    }

    pub const fn leaderboard(self) -> LeaderboardConfig {
        use GameKind::*;
        use MergePolicy::*;
        use SortOrder::*;
        match self {
            Clicker => LeaderboardConfig::new("minigames:clicker:leaderboard", 10, HigherIsBetter, Append),
            Guess => LeaderboardConfig::new("minigames:guess:leaderboard", 5, LowerIsBetter, Append),
            Rocket => LeaderboardConfig::new("minigames:rocket:leaderboard", 5, HigherIsBetter, Append),
            CosmicDodge => {
                LeaderboardConfig::new("minigames:dodge:leaderboard", 10, HigherIsBetter, Append)
            }
            RockPaperScissors => {
                LeaderboardConfig::new("minigames:rps:leaderboard", 5, HigherIsBetter, BestPerName)
            }
        }
    }
}

impl Default for GameKind {
    fn default() -> Self {
        Self::Clicker
    }
}

impl FromStr for GameKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnknownGame)
    }
}
