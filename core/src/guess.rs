use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Storage key of the fewest-attempts record, kept apart from the leaderboard.
pub const BEST_ATTEMPTS_KEY: &str = "minigames:guess:best";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessConfig {
    pub min: u32,
    pub max: u32,
    pub attempts: u32,
}

impl GuessConfig {
    pub const DEFAULT: Self = Self {
        min: 1,
        max: 100,
        attempts: 5,
    };

    /// Orders the bounds and allows at least one attempt.
    pub const fn normalized(self) -> Self {
        let (min, max) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        let attempts = if self.attempts == 0 { 1 } else { self.attempts };
        Self { min, max, attempts }
    }
}

impl Default for GuessConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    TooLow { attempts_left: u32 },
    TooHigh { attempts_left: u32 },
    Won { attempts: u32 },
    Lost { secret: u32 },
}

impl GuessOutcome {
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won { .. } | Self::Lost { .. })
    }
}

/// Number guessing round. The recorded score is attempts used, lower is better.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuessRound {
    config: GuessConfig,
    phase: RoundPhase,
    secret: u32,
    attempts_left: u32,
    won: bool,
}

impl GuessRound {
    pub fn new(config: GuessConfig) -> Self {
        let config = config.normalized();
        Self {
            config,
            phase: RoundPhase::Idle,
            secret: config.min,
            attempts_left: config.attempts,
            won: false,
        }
    }

    pub fn config(&self) -> &GuessConfig {
        &self.config
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn attempts_left(&self) -> u32 {
        self.attempts_left
    }

    pub fn attempts_used(&self) -> u32 {
        self.config.attempts.saturating_sub(self.attempts_left)
    }

    /// Whether the last finished round found the number.
    pub fn won(&self) -> bool {
        self.phase.is_ended() && self.won
    }

    /// The secret number, revealed once the round is over.
    pub fn secret(&self) -> Option<u32> {
        self.phase.is_ended().then_some(self.secret)
    }

    /// Starts a round with a secret drawn uniformly from the configured range.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let secret = rng.random_range(self.config.min..=self.config.max);
        self.start_with_secret(secret);
    }

    pub fn start_with_secret(&mut self, secret: u32) {
        self.phase.start();
        self.secret = secret.clamp(self.config.min, self.config.max);
        self.attempts_left = self.config.attempts;
        self.won = false;
        log::debug!("guess round started, {} attempts", self.attempts_left);
    }

    /// Parses and scores one guess. Invalid input leaves the round untouched.
    pub fn guess(&mut self, raw: &str) -> Result<GuessOutcome> {
        self.phase.ensure_playing()?;
        let guess = self.parse(raw)?;

        self.attempts_left = self.attempts_left.saturating_sub(1);

        let outcome = if guess == self.secret {
            self.won = true;
            self.phase.finish();
            GuessOutcome::Won {
                attempts: self.attempts_used(),
            }
        } else if self.attempts_left == 0 {
            self.phase.finish();
            GuessOutcome::Lost {
                secret: self.secret,
            }
        } else if guess < self.secret {
            GuessOutcome::TooLow {
                attempts_left: self.attempts_left,
            }
        } else {
            GuessOutcome::TooHigh {
                attempts_left: self.attempts_left,
            }
        };

        if outcome.is_final() {
            log::info!("guess round over: {:?}", outcome);
        }
        Ok(outcome)
    }

    fn parse(&self, raw: &str) -> Result<u32> {
        let value: i64 = raw
            .trim()
            .parse()
            .map_err(|_| GameError::GuessNotANumber)?;
        let GuessConfig { min, max, .. } = self.config;
        if value < i64::from(min) || value > i64::from(max) {
            return Err(GameError::GuessOutOfRange { min, max });
        }
        Ok(value as u32)
    }
}

impl Default for GuessRound {
    fn default() -> Self {
        Self::new(GuessConfig::DEFAULT)
    }
}

/// Fewest attempts ever needed to win. Unlike the top score of other games,
/// smaller values are better.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestAttempts(pub u32);

impl BestAttempts {
    pub fn is_beaten_by(self, attempts: u32) -> bool {
        attempts < self.0
    }
}

impl<S: KeyValueStore> LeaderboardStore<S> {
    pub fn best_attempts(&self) -> Option<BestAttempts> {
        self.load_record::<BestAttempts>(BEST_ATTEMPTS_KEY)
            .filter(|best| best.0 > 0)
    }

    /// Stores `attempts` if it beats the current record and returns the record
    /// in effect afterwards.
    pub fn record_best_attempts(&mut self, attempts: u32) -> Option<BestAttempts> {
        if attempts == 0 {
            return self.best_attempts();
        }
        match self.best_attempts() {
            Some(best) if !best.is_beaten_by(attempts) => Some(best),
            _ => {
                let best = BestAttempts(attempts);
                self.save_record(BEST_ATTEMPTS_KEY, &best);
                Some(best)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn playing(secret: u32) -> GuessRound {
        let mut round = GuessRound::default();
        round.start_with_secret(secret);
        round
    }

    #[test]
    fn guesses_before_start_are_ignored() {
        let mut round = GuessRound::default();
        assert_eq!(round.guess("50"), Err(GameError::NotPlaying));
        assert_eq!(round.attempts_left(), 5);
    }

    #[test]
    fn exact_guess_wins_on_any_attempt() {
        for misses in 0..5 {
            let mut round = playing(42);
            for _ in 0..misses {
                round.guess("41").unwrap();
            }
            assert_eq!(
                round.guess("42"),
                Ok(GuessOutcome::Won {
                    attempts: misses + 1
                })
            );
            assert!(round.won());
            assert_eq!(round.secret(), Some(42));
        }
    }

    #[test]
    fn five_misses_lose() {
        let mut round = playing(42);
        for raw in ["1", "100", "2", "99"] {
            assert!(!round.guess(raw).unwrap().is_final());
        }
        assert_eq!(round.guess("3"), Ok(GuessOutcome::Lost { secret: 42 }));
        assert!(!round.won());
        assert!(round.phase().is_ended());
        assert_eq!(round.guess("42"), Err(GameError::NotPlaying));
    }

    #[test]
    fn hints_point_towards_secret() {
        let mut round = playing(42);
        assert_eq!(
            round.guess("10"),
            Ok(GuessOutcome::TooLow { attempts_left: 4 })
        );
        assert_eq!(
            round.guess(" 77 "),
            Ok(GuessOutcome::TooHigh { attempts_left: 3 })
        );
    }

    #[test]
    fn invalid_input_costs_nothing() {
        let mut round = playing(42);
        assert_eq!(round.guess("abc"), Err(GameError::GuessNotANumber));
        assert_eq!(round.guess(""), Err(GameError::GuessNotANumber));
        assert_eq!(round.guess("4.5"), Err(GameError::GuessNotANumber));
        assert_eq!(
            round.guess("0"),
            Err(GameError::GuessOutOfRange { min: 1, max: 100 })
        );
        assert_eq!(
            round.guess("-3"),
            Err(GameError::GuessOutOfRange { min: 1, max: 100 })
        );
        assert_eq!(
            round.guess("101"),
            Err(GameError::GuessOutOfRange { min: 1, max: 100 })
        );
        assert_eq!(round.attempts_left(), 5);
        assert!(round.phase().is_playing());
    }

    #[test]
    fn secret_hidden_while_playing() {
        let round = playing(7);
        assert_eq!(round.secret(), None);
    }

    #[test]
    fn random_secret_is_in_range() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut round = GuessRound::default();
        for _ in 0..100 {
            round.start(&mut rng);
            assert!((1..=100).contains(&round.secret));
        }
    }

    #[test]
    fn restart_restores_attempts() {
        let mut round = playing(42);
        round.guess("1").unwrap();
        round.start_with_secret(9);
        assert_eq!(round.attempts_left(), 5);
        assert!(!round.won());
    }

    #[test]
    fn zero_attempt_config_still_allows_one_guess() {
        let mut round = GuessRound::new(GuessConfig {
            min: 1,
            max: 100,
            attempts: 0,
        });
        round.start_with_secret(5);
        assert_eq!(round.attempts_left(), 1);
        assert_eq!(round.guess("7"), Ok(GuessOutcome::Lost { secret: 5 }));
        assert_eq!(round.attempts_used(), 1);
    }

    #[test]
    fn reversed_bounds_are_reordered() {
        let mut round = GuessRound::new(GuessConfig {
            min: 10,
            max: 1,
            attempts: 3,
        });
        assert_eq!(*round.config(), GuessConfig { min: 1, max: 10, attempts: 3 });

        let mut rng = SmallRng::seed_from_u64(9);
        round.start(&mut rng);
        assert!((1..=10).contains(&round.secret));
        assert_eq!(
            round.guess("11"),
            Err(GameError::GuessOutOfRange { min: 1, max: 10 })
        );
    }

    #[test]
    fn best_attempts_only_improves() {
        let mut store = LeaderboardStore::new(MemoryStore::new());
        assert_eq!(store.best_attempts(), None);
        assert_eq!(store.record_best_attempts(4), Some(BestAttempts(4)));
        assert_eq!(store.record_best_attempts(5), Some(BestAttempts(4)));
        assert_eq!(store.record_best_attempts(2), Some(BestAttempts(2)));
        assert_eq!(store.best_attempts(), Some(BestAttempts(2)));
    }

    #[test]
    fn zero_best_means_no_record() {
        let store = LeaderboardStore::new(MemoryStore::new().with(BEST_ATTEMPTS_KEY, "0"));
        assert_eq!(store.best_attempts(), None);
    }
}
