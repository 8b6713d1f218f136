use alloc::vec::Vec;
use bitflags::bitflags;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Longest frame a single `advance` accounts for. Longer gaps, such as a tab
/// coming back from the background, count as this much.
pub const MAX_FRAME_MS: f64 = 250.;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Maps a `KeyboardEvent.key` value to a direction, arrows or A/D.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Self::Left),
            "ArrowRight" | "d" | "D" => Some(Self::Right),
            _ => None,
        }
    }

    const fn flag(self) -> HeldKeys {
        match self {
            Self::Left => HeldKeys::LEFT,
            Self::Right => HeldKeys::RIGHT,
        }
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct HeldKeys: u8 {
        const LEFT  = 1;
        const RIGHT = 1 << 1;
    }
}

/// How the player steers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controls {
    /// Move every frame while a key is held.
    Held,
    /// Move one step per key press.
    Press,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SpawnPolicy {
    /// Independent chance of a new obstacle on every frame.
    Chance { per_frame: f64 },
    /// One obstacle each time this much time has elapsed.
    Interval { every_ms: f64 },
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ScoringRule {
    /// Score grows by a fixed amount per survived frame.
    Survival { per_frame: f64 },
    /// One point per obstacle that falls out of the arena.
    Dodged,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DodgeConfig {
    pub arena_width: f64,
    pub arena_height: f64,
    pub player_size: f64,
    /// Distance from the player's top edge to the arena floor.
    pub player_floor_offset: f64,
    pub player_speed: f64,
    pub obstacle_size: f64,
    pub fall_speed_min: f64,
    pub fall_speed_max: f64,
    pub spawn: SpawnPolicy,
    pub scoring: ScoringRule,
    pub controls: Controls,
}

impl DodgeConfig {
    pub const ROCKET: Self = Self {
        arena_width: 400.,
        arena_height: 500.,
        player_size: 40.,
        player_floor_offset: 60.,
        player_speed: 7.,
        obstacle_size: 30.,
        fall_speed_min: 3.,
        fall_speed_max: 6.,
        spawn: SpawnPolicy::Chance { per_frame: 0.02 },
        scoring: ScoringRule::Survival { per_frame: 0.1 },
        controls: Controls::Held,
    };

    pub const COSMIC: Self = Self {
        arena_width: 480.,
        arena_height: 320.,
        player_size: 40.,
        player_floor_offset: 40.,
        player_speed: 10.,
        obstacle_size: 20.,
        fall_speed_min: 1.5,
        fall_speed_max: 3.5,
        spawn: SpawnPolicy::Interval { every_ms: 800. },
        scoring: ScoringRule::Dodged,
        controls: Controls::Press,
    };

    fn player_start(&self) -> Rect {
        Rect::new(
            self.arena_width / 2. - self.player_size / 2.,
            self.arena_height - self.player_floor_offset,
            self.player_size,
            self.player_size,
        )
    }

    fn max_player_x(&self) -> f64 {
        (self.arena_width - self.player_size).max(0.)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
    /// Pixels per frame.
    pub speed: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Running { score: Score },
    Crashed { score: Score },
}

/// Falling-obstacle round, advanced once per animation frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DodgeRound {
    config: DodgeConfig,
    phase: RoundPhase,
    player: Rect,
    obstacles: Vec<Obstacle>,
    held: HeldKeys,
    progress: f64,
    since_spawn_ms: f64,
}

impl DodgeRound {
    pub fn new(config: DodgeConfig) -> Self {
        Self {
            config,
            phase: RoundPhase::Idle,
            player: config.player_start(),
            obstacles: Vec::new(),
            held: HeldKeys::empty(),
            progress: 0.,
            since_spawn_ms: 0.,
        }
    }

    pub fn config(&self) -> &DodgeConfig {
        &self.config
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn player(&self) -> &Rect {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn score(&self) -> Score {
        // progress is never negative, so truncation floors
        self.progress as Score
    }

    pub fn start(&mut self) {
        self.phase.start();
        self.player = self.config.player_start();
        self.obstacles.clear();
        self.progress = 0.;
        self.since_spawn_ms = 0.;
        log::debug!("dodge round started");
    }

    /// Records a key going up or down. Tracked in every phase so a key held
    /// across a restart keeps working.
    pub fn set_held(&mut self, direction: Direction, pressed: bool) {
        self.held.set(direction.flag(), pressed);
    }

    /// Moves one step, for press-to-move controls.
    pub fn nudge(&mut self, direction: Direction) -> Result<()> {
        self.phase.ensure_playing()?;
        self.step_player(direction);
        Ok(())
    }

    /// Runs one frame: steer, spawn, fall, collide, clean up and score.
    pub fn advance<R: Rng + ?Sized>(&mut self, elapsed_ms: f64, rng: &mut R) -> Result<FrameOutcome> {
        self.phase.ensure_playing()?;
        let elapsed_ms = elapsed_ms.clamp(0., MAX_FRAME_MS);

        if self.held.contains(HeldKeys::LEFT) {
            self.step_player(Direction::Left);
        }
        if self.held.contains(HeldKeys::RIGHT) {
            self.step_player(Direction::Right);
        }

        self.spawn(elapsed_ms, rng);

        let player = self.player;
        for obstacle in &mut self.obstacles {
            obstacle.rect.y += obstacle.speed;
        }
        if self.obstacles.iter().any(|o| o.rect.intersects(&player)) {
            self.phase.finish();
            let score = self.score();
            log::info!("dodge round over with {}", score);
            return Ok(FrameOutcome::Crashed { score });
        }

        let floor = self.config.arena_height;
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.rect.y <= floor);
        let dodged = before - self.obstacles.len();

        match self.config.scoring {
            ScoringRule::Survival { per_frame } => self.progress += per_frame,
            ScoringRule::Dodged => self.progress += dodged as f64,
        }

        Ok(FrameOutcome::Running {
            score: self.score(),
        })
    }

    fn step_player(&mut self, direction: Direction) {
        let delta = match direction {
            Direction::Left => -self.config.player_speed,
            Direction::Right => self.config.player_speed,
        };
        self.player.x = (self.player.x + delta).clamp(0., self.config.max_player_x());
    }

    fn spawn<R: Rng + ?Sized>(&mut self, elapsed_ms: f64, rng: &mut R) {
        match self.config.spawn {
            SpawnPolicy::Chance { per_frame } => {
                if rng.random_bool(per_frame.clamp(0., 1.)) {
                    self.spawn_one(rng);
                }
            }
            SpawnPolicy::Interval { every_ms } if every_ms > 0. => {
                self.since_spawn_ms += elapsed_ms;
                while self.since_spawn_ms >= every_ms {
                    self.since_spawn_ms -= every_ms;
                    self.spawn_one(rng);
                }
            }
            SpawnPolicy::Interval { .. } => {}
        }
    }

    fn spawn_one<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let DodgeConfig {
            arena_width,
            obstacle_size,
            fall_speed_min,
            fall_speed_max,
            ..
        } = self.config;

        let max_x = arena_width - obstacle_size;
        let x = if max_x > 0. {
            rng.random_range(0. ..max_x)
        } else {
            0.
        };
        let speed = if fall_speed_max > fall_speed_min {
            rng.random_range(fall_speed_min..fall_speed_max)
        } else {
            fall_speed_min
        };

        self.obstacles.push(Obstacle {
            rect: Rect::new(x, -obstacle_size, obstacle_size, obstacle_size),
            speed,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn quiet(config: DodgeConfig) -> DodgeConfig {
        DodgeConfig {
            spawn: SpawnPolicy::Chance { per_frame: 0. },
            ..config
        }
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(3)
    }

    #[test]
    fn frames_before_start_are_ignored() {
        let mut round = DodgeRound::new(DodgeConfig::ROCKET);
        let mut rng = rng();
        assert_eq!(round.advance(16., &mut rng), Err(GameError::NotPlaying));
        assert_eq!(round.nudge(Direction::Left), Err(GameError::NotPlaying));
        assert_eq!(round.score(), 0);
    }

    #[test]
    fn overlapping_obstacle_crashes_on_that_frame() {
        let mut round = DodgeRound::new(quiet(DodgeConfig::ROCKET));
        round.start();
        round.player.x = 0.;
        let y = round.player.y;
        round.obstacles.push(Obstacle {
            rect: Rect::new(20., y - 5., 30., 30.),
            speed: 5.,
        });

        let outcome = round.advance(16., &mut rng()).unwrap();
        assert_eq!(outcome, FrameOutcome::Crashed { score: 0 });
        assert!(round.phase().is_ended());
        assert!(round.advance(16., &mut rng()).is_err());
    }

    #[test]
    fn obstacle_in_other_column_does_not_crash() {
        let mut round = DodgeRound::new(quiet(DodgeConfig::ROCKET));
        round.start();
        round.player.x = 0.;
        let y = round.player.y;
        round.obstacles.push(Obstacle {
            rect: Rect::new(200., y, 30., 30.),
            speed: 1.,
        });

        assert!(matches!(
            round.advance(16., &mut rng()),
            Ok(FrameOutcome::Running { .. })
        ));
    }

    #[test]
    fn survival_score_grows_per_frame() {
        let mut round = DodgeRound::new(quiet(DodgeConfig::ROCKET));
        round.start();
        let mut rng = rng();
        for _ in 0..25 {
            round.advance(16., &mut rng).unwrap();
        }
        // 25 * 0.1 with float error, floored
        assert!(matches!(round.score(), 2 | 3));
        let before = round.score();
        for _ in 0..10 {
            round.advance(16., &mut rng).unwrap();
        }
        assert!(round.score() > before);
    }

    #[test]
    fn dodged_obstacles_score_and_disappear() {
        let mut round = DodgeRound::new(quiet(DodgeConfig::COSMIC));
        round.start();
        let floor = round.config.arena_height;
        round.obstacles.push(Obstacle {
            rect: Rect::new(0., floor - 1., 20., 20.),
            speed: 3.,
        });
        round.player.x = 400.;

        let outcome = round.advance(16., &mut rng()).unwrap();
        assert_eq!(outcome, FrameOutcome::Running { score: 1 });
        assert!(round.obstacles().is_empty());
    }

    #[test]
    fn held_keys_move_and_clamp() {
        let mut round = DodgeRound::new(quiet(DodgeConfig::ROCKET));
        round.start();
        let start_x = round.player().x;
        let mut rng = rng();

        round.set_held(Direction::Left, true);
        round.advance(16., &mut rng).unwrap();
        assert_eq!(round.player().x, start_x - 7.);

        for _ in 0..100 {
            round.advance(16., &mut rng).unwrap();
        }
        assert_eq!(round.player().x, 0.);

        round.set_held(Direction::Left, false);
        round.set_held(Direction::Right, true);
        for _ in 0..100 {
            round.advance(16., &mut rng).unwrap();
        }
        assert_eq!(round.player().x, 360.);
    }

    #[test]
    fn nudge_moves_one_step() {
        let mut round = DodgeRound::new(DodgeConfig::COSMIC);
        round.start();
        let start_x = round.player().x;
        round.nudge(Direction::Right).unwrap();
        assert_eq!(round.player().x, start_x + 10.);
    }

    #[test]
    fn interval_spawning_follows_elapsed_time() {
        let mut round = DodgeRound::new(DodgeConfig::COSMIC);
        round.start();
        let mut rng = rng();

        for _ in 0..3 {
            round.advance(200., &mut rng).unwrap();
        }
        assert!(round.obstacles().is_empty());
        round.advance(200., &mut rng).unwrap();
        assert_eq!(round.obstacles().len(), 1);

        let spawned = round.obstacles()[0];
        assert!(spawned.rect.x >= 0. && spawned.rect.right() <= 480.);
        assert!(spawned.speed >= 1.5 && spawned.speed < 3.5);
    }

    #[test]
    fn long_pause_does_not_burst_spawn() {
        let mut round = DodgeRound::new(DodgeConfig::COSMIC);
        round.start();
        let mut rng = rng();
        round.advance(16., &mut rng).unwrap();
        round.advance(60_000., &mut rng).unwrap();
        assert!(round.obstacles().is_empty());

        // the next frames keep the regular cadence
        for _ in 0..3 {
            round.advance(MAX_FRAME_MS, &mut rng).unwrap();
        }
        assert_eq!(round.obstacles().len(), 1);
    }

    #[test]
    fn restart_clears_arena() {
        let mut round = DodgeRound::new(DodgeConfig::COSMIC);
        round.start();
        let mut rng = rng();
        for _ in 0..5 {
            round.advance(200., &mut rng).unwrap();
        }
        assert!(!round.obstacles().is_empty());

        round.start();
        assert!(round.obstacles().is_empty());
        assert_eq!(round.score(), 0);
        assert_eq!(*round.player(), DodgeConfig::COSMIC.player_start());
    }

    #[test]
    fn key_names_map_to_directions() {
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("d"), Some(Direction::Right));
        assert_eq!(Direction::from_key("ArrowUp"), None);
    }
}
