use serde::{Deserialize, Serialize};

use crate::*;

/// Lifecycle shared by every game round.
///
/// `Idle` is only observed before the first round of a session. A finished
/// round can be started again directly from `Ended`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Idle,
    Playing,
    Ended,
}

impl RoundPhase {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_ended(self) -> bool {
        matches!(self, Self::Ended)
    }

    /// Moves into `Playing` from any phase and reports the phase left behind.
    pub fn start(&mut self) -> RoundPhase {
        let previous = *self;
        if previous.is_playing() {
            log::debug!("restarting a round that was still playing");
        }
        *self = Self::Playing;
        previous
    }

    /// Ends a round in progress. Returns `false` if there was nothing to end.
    pub fn finish(&mut self) -> bool {
        if self.is_playing() {
            *self = Self::Ended;
            true
        } else {
            false
        }
    }

    pub fn ensure_playing(self) -> Result<()> {
        if self.is_playing() {
            Ok(())
        } else {
            Err(GameError::NotPlaying)
        }
    }
}

impl Default for RoundPhase {
    fn default() -> Self {
        Self::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_started() {
        let phase = RoundPhase::default();
        assert_eq!(phase, RoundPhase::Idle);
        assert_eq!(phase.ensure_playing(), Err(GameError::NotPlaying));
    }

    #[test]
    fn finish_only_from_playing() {
        let mut phase = RoundPhase::default();
        assert!(!phase.finish());
        assert_eq!(phase, RoundPhase::Idle);

        assert_eq!(phase.start(), RoundPhase::Idle);
        assert!(phase.finish());
        assert!(phase.is_ended());
        assert!(!phase.finish());
    }

    #[test]
    fn ended_round_can_be_restarted() {
        let mut phase = RoundPhase::Ended;
        assert_eq!(phase.start(), RoundPhase::Ended);
        assert!(phase.ensure_playing().is_ok());
    }
}
