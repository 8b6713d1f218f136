use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickerConfig {
    /// Round length, counted down once per second.
    pub duration_secs: u32,
}

impl ClickerConfig {
    pub const DEFAULT: Self = Self { duration_secs: 10 };
}

impl Default for ClickerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Running { time_left: u32 },
    TimeUp { score: Score },
}

/// Countdown round where each click scores a point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClickerRound {
    config: ClickerConfig,
    phase: RoundPhase,
    score: Score,
    time_left: u32,
}

impl ClickerRound {
    pub fn new(config: ClickerConfig) -> Self {
        Self {
            config,
            phase: RoundPhase::Idle,
            score: 0,
            time_left: config.duration_secs,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn start(&mut self) {
        self.phase.start();
        self.score = 0;
        self.time_left = self.config.duration_secs;
        log::debug!("clicker round started, {}s", self.time_left);
    }

    pub fn click(&mut self) -> Result<Score> {
        self.phase.ensure_playing()?;
        self.score = self.score.saturating_add(1);
        Ok(self.score)
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        self.phase.ensure_playing()?;
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.phase.finish();
            log::info!("clicker round over with {} clicks", self.score);
            Ok(TickOutcome::TimeUp { score: self.score })
        } else {
            Ok(TickOutcome::Running {
                time_left: self.time_left,
            })
        }
    }
}

impl Default for ClickerRound {
    fn default() -> Self {
        Self::new(ClickerConfig::DEFAULT)
    }
}
