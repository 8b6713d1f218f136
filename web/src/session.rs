use minigames_core::{
    GameKind, KeyValueStore, Leaderboard, LeaderboardStore, Nickname, Score, ScoreEntry,
};

use crate::audio::{self, FadeSettings, MusicFade};
use crate::utils::BrowserStorage;

/// UI step of a game session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Stage {
    Setup,
    Instructions,
    Playing,
    GameOver,
}

/// State every game keeps for the lifetime of its page: who is playing, which
/// step is shown, and the leaderboard the game owns.
#[derive(Debug)]
pub(crate) struct Session<S = BrowserStorage> {
    kind: GameKind,
    stage: Stage,
    nickname: Option<Nickname>,
    store: LeaderboardStore<S>,
    board: Leaderboard,
    last_rank: Option<usize>,
    music: Option<MusicFade>,
}

impl Session {
    pub(crate) fn in_browser(kind: GameKind) -> Self {
        Self::new(kind, BrowserStorage)
    }

    /// Side effect of accepting a nickname; the game works without it.
    pub(crate) fn start_music(&mut self) {
        self.music = audio::fade_in(FadeSettings::for_game(self.kind));
    }
}

impl<S: KeyValueStore> Session<S> {
    pub(crate) fn new(kind: GameKind, storage: S) -> Self {
        let store = LeaderboardStore::new(storage);
        let board = store.read(&kind.leaderboard());
        Self {
            kind,
            stage: Stage::Setup,
            nickname: None,
            store,
            board,
            last_rank: None,
            music: None,
        }
    }

    pub(crate) fn stage(&self) -> Stage {
        self.stage
    }

    pub(crate) fn nickname(&self) -> Option<&Nickname> {
        self.nickname.as_ref()
    }

    pub(crate) fn board(&self) -> &Leaderboard {
        &self.board
    }

    pub(crate) fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    pub(crate) fn store(&self) -> &LeaderboardStore<S> {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut LeaderboardStore<S> {
        &mut self.store
    }

    pub(crate) fn accept(&mut self, nickname: Nickname) {
        log::debug!("{}: player {}", self.kind.slug(), nickname);
        self.nickname = Some(nickname);
        self.stage = Stage::Instructions;
    }

    /// Switches to the play step. Without a nickname the session stays put.
    pub(crate) fn begin_round(&mut self) -> bool {
        if self.nickname.is_none() {
            log::warn!("{}: round requested before nickname", self.kind.slug());
            return false;
        }
        self.stage = Stage::Playing;
        self.last_rank = None;
        true
    }

    pub(crate) fn end_round(&mut self) {
        self.stage = Stage::GameOver;
    }

    /// Submits `score` for the current player and refreshes the board.
    pub(crate) fn record(&mut self, score: Score, date: Option<String>) -> Option<usize> {
        let nickname = self.nickname.as_ref()?;
        let mut entry = ScoreEntry::new(nickname, score);
        if let Some(date) = date {
            entry = entry.with_date(date);
        }
        let submission = self.store.submit(&self.kind.leaderboard(), entry);
        self.board = submission.board;
        self.last_rank = submission.rank;
        submission.rank
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minigames_core::MemoryStore;

    fn session(kind: GameKind) -> Session<MemoryStore> {
        Session::new(kind, MemoryStore::new())
    }

    #[test]
    fn starts_at_setup_with_persisted_board() {
        let key = GameKind::Clicker.leaderboard().key;
        let storage = MemoryStore::new().with(key, r#"[{"name":"Ann","score":4}]"#);
        let session = Session::new(GameKind::Clicker, storage);
        assert_eq!(session.stage(), Stage::Setup);
        assert_eq!(session.board().len(), 1);
    }

    #[test]
    fn corrupt_board_starts_empty() {
        let key = GameKind::Rocket.leaderboard().key;
        let session = Session::new(GameKind::Rocket, MemoryStore::new().with(key, "{not json"));
        assert!(session.board().is_empty());
    }

    #[test]
    fn round_needs_nickname() {
        let mut session = session(GameKind::Clicker);
        assert!(!session.begin_round());
        assert_eq!(session.stage(), Stage::Setup);
        assert_eq!(session.record(3, None), None);

        session.accept(Nickname::parse("Ann").unwrap());
        assert_eq!(session.stage(), Stage::Instructions);
        assert!(session.begin_round());
        assert_eq!(session.stage(), Stage::Playing);
    }

    #[test]
    fn record_updates_board_and_rank() {
        let mut session = session(GameKind::Clicker);
        session.accept(Nickname::parse("Ann").unwrap());
        session.begin_round();
        assert_eq!(session.record(7, Some("2024-05-01T10:00:00.000Z".into())), Some(1));
        session.end_round();

        session.begin_round();
        assert_eq!(session.last_rank(), None);
        assert_eq!(session.record(12, None), Some(1));
        assert_eq!(session.last_rank(), Some(1));

        let scores: Vec<_> = session.board().entries().iter().map(ScoreEntry::score).collect();
        assert_eq!(scores, [12, 7]);
        assert_eq!(session.store().read(&GameKind::Clicker.leaderboard()).len(), 2);
    }

    #[test]
    fn replay_keeps_nickname() {
        let mut session = session(GameKind::Guess);
        session.accept(Nickname::parse("Ann").unwrap());
        session.begin_round();
        session.end_round();
        assert!(session.begin_round());
        assert_eq!(session.nickname().map(Nickname::as_str), Some("Ann"));
    }
}
