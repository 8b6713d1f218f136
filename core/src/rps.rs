use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Self::Rock, Self::Paper, Self::Scissors];

    pub const fn beats(self, other: Choice) -> bool {
        use Choice::*;
        matches!(
            (self, other),
            (Rock, Scissors) | (Scissors, Paper) | (Paper, Rock)
        )
    }

    pub fn against(self, other: Choice) -> Verdict {
        if self == other {
            Verdict::Draw
        } else if self.beats(other) {
            Verdict::Win
        } else {
            Verdict::Lose
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub const fn label(self) -> &'static str {
        use Choice::*;
        match self {
            Rock => "rock",
            Paper => "paper",
            Scissors => "scissors",
        }
    }
}

/// Result of one throw, from the player's side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Win,
    Lose,
    Draw,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Throw {
    pub player: Choice,
    pub computer: Choice,
    pub verdict: Verdict,
    /// Player's win count after this throw.
    pub wins: Score,
}

/// Open-ended match against the computer. There is no terminal state; the
/// live win count is what gets submitted after every win.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RpsMatch {
    phase: RoundPhase,
    wins: Score,
    losses: Score,
}

impl RpsMatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn wins(&self) -> Score {
        self.wins
    }

    pub fn losses(&self) -> Score {
        self.losses
    }

    pub fn start(&mut self) {
        if !self.phase.is_playing() {
            self.phase.start();
            log::debug!("rps match started");
        }
    }

    pub fn play<R: Rng + ?Sized>(&mut self, choice: Choice, rng: &mut R) -> Result<Throw> {
        self.phase.ensure_playing()?;
        let computer = Choice::random(rng);
        self.play_against(choice, computer)
    }

    pub fn play_against(&mut self, player: Choice, computer: Choice) -> Result<Throw> {
        self.phase.ensure_playing()?;
        let verdict = player.against(computer);
        match verdict {
            Verdict::Win => self.wins = self.wins.saturating_add(1),
            Verdict::Lose => self.losses = self.losses.saturating_add(1),
            Verdict::Draw => {}
        }
        log::trace!("{:?} vs {:?}: {:?}", player, computer, verdict);
        Ok(Throw {
            player,
            computer,
            verdict,
            wins: self.wins,
        })
    }

    /// Zeroes both counters; the match stays in whatever phase it was.
    pub fn reset(&mut self) {
        self.wins = 0;
        self.losses = 0;
    }
}
