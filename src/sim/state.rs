//! Game state and core simulation types
//!
//! `GameState` is the whole session: one run plus the high score that
//! survives restarts. It is owned by the host loop and only mutated through
//! `tick`.

use glam::Vec2;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::cinematic::{Cinematic, CinematicPhase};
use crate::consts::*;
use crate::highscores::HighScore;
use crate::tuning::Tuning;
use crate::whole_points;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start input
    Waiting,
    /// Active run
    Running,
    /// Hit an obstacle
    GameOver,
    /// Secret win (there is no legitimate finish line)
    Win,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Win)
    }
}

/// Notable things that happened during a tick, drained by the host each frame
/// to drive audio, persistence and logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Jumped,
    Ducked,
    Stood,
    ObstacleSpawned { kind: ObstacleKind },
    FinalLevel,
    Cinematic(CinematicPhase),
    ChaosStarted,
    Message(String),
    GameOver { score: u64 },
    Won { score: u64 },
    NewHighScore(u64),
    QuitAcknowledged,
    Restarted,
}

/// The running figure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; x never changes
    pub pos: Vec2,
    pub size: Vec2,
    pub stand_height: f32,
    pub duck_height: f32,
    /// Vertical velocity (px/s, positive is down)
    pub vel_y: f32,
    pub jumps_used: u8,
    pub ducking: bool,
}

impl Player {
    /// Standing on the ground
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(PLAYER_SCREEN_X, GROUND_Y - tuning.stand_height),
            size: Vec2::new(tuning.player_width, tuning.stand_height),
            stand_height: tuning.stand_height,
            duck_height: tuning.duck_height,
            vel_y: 0.0,
            jumps_used: 0,
            ducking: false,
        }
    }

    /// Screen y of the player's feet
    #[inline]
    pub fn feet(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb {
            min: self.pos,
            size: self.size,
        }
    }

    pub fn is_grounded(&self, tolerance: f32) -> bool {
        (self.feet() - GROUND_Y).abs() < tolerance
    }

    /// Jump (or double jump). Returns false once every jump is spent.
    pub fn jump(&mut self, tuning: &Tuning) -> bool {
        if self.jumps_used >= tuning.max_jumps {
            return false;
        }
        self.vel_y = tuning.jump_velocity;
        self.jumps_used += 1;
        true
    }

    /// Crouch; only allowed on the ground. Feet stay where they are.
    pub fn duck(&mut self, tuning: &Tuning) -> bool {
        if self.ducking || !self.is_grounded(tuning.grounded_tolerance) {
            return false;
        }
        self.set_height(self.duck_height);
        self.ducking = true;
        true
    }

    /// Stand back up, keeping the feet anchored
    pub fn stand(&mut self) -> bool {
        if !self.ducking {
            return false;
        }
        self.set_height(self.stand_height);
        self.ducking = false;
        true
    }

    fn set_height(&mut self, height: f32) {
        let feet = self.feet();
        self.size.y = height;
        self.pos.y = feet - height;
    }

    /// Gravity step followed by the ground clamp. Returns true when touching ground.
    pub fn integrate(&mut self, gravity: f32, dt: f32) -> bool {
        self.vel_y += gravity * dt;
        self.pos.y += self.vel_y * dt;

        if self.feet() >= GROUND_Y {
            self.pos.y = GROUND_Y - self.size.y;
            self.vel_y = 0.0;
            self.jumps_used = 0;
            true
        } else {
            false
        }
    }
}

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Sits on the ground; jump over it
    Ground,
    /// Flies at head height; duck under it
    Air,
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObstacleKind,
    /// 0xRRGGBB
    pub color: u32,
}

impl Obstacle {
    pub fn hitbox(&self) -> Aabb {
        Aabb {
            min: self.pos,
            size: self.size,
        }
    }

    /// Move left at world speed
    pub fn advance(&mut self, speed: f32, dt: f32) {
        self.pos.x -= speed * dt;
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x <= CULL_X
    }
}

/// Obstacle colors
pub const GROUND_COLOR: u32 = 0xffffff;
pub const AIR_COLOR: u32 = 0xff9f43;
pub const CHAOS_AIR_COLOR: u32 = 0xff6b81;

/// Complete session state (serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed of the current run
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    /// World scroll speed (px/s)
    pub speed: f32,
    /// Active obstacles (ascending id)
    pub obstacles: Vec<Obstacle>,
    /// Seconds since the last spawn attempt
    pub spawn_elapsed: f32,
    /// Chaos-mode wait before the next spawn, rolled per spawn
    pub chaos_interval: f32,
    pub final_level: bool,
    pub chaos: bool,
    pub cinematic: Cinematic,
    /// Fractional score; shown floored
    pub score: f32,
    pub high_score: u64,
    /// Cosmetic "distance to finish" that never finishes
    pub fake_progress: f32,
    pub message: Option<String>,
    pub next_message_at: f32,
    /// Simulated seconds spent running
    pub time: f32,
    /// Ground stripe scroll (visual only)
    pub stripe_offset: f32,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64, high_score: u64) -> Self {
        Self::with_tuning(seed, high_score, Tuning::default())
    }

    pub fn with_tuning(seed: u64, high_score: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let chaos_interval = super::spawn::roll_chaos_interval(&mut rng, &tuning);
        Self {
            seed,
            rng,
            phase: GamePhase::Waiting,
            player: Player::new(&tuning),
            speed: tuning.base_speed,
            obstacles: Vec::new(),
            spawn_elapsed: 0.0,
            chaos_interval,
            final_level: false,
            chaos: false,
            cinematic: Cinematic::default(),
            score: 0.0,
            high_score,
            fake_progress: 0.0,
            message: None,
            next_message_at: tuning.first_message_at,
            time: 0.0,
            stripe_offset: 0.0,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand the accumulated events to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Points shown on the HUD
    pub fn points(&self) -> u64 {
        whole_points(self.score)
    }

    /// Throw away the current run and return to the title screen.
    /// The high score, tuning and pending events survive.
    pub fn reset_to_waiting(&mut self) {
        let seed = self.rng.next_u64();
        let mut events = self.drain_events();
        events.push(GameEvent::Restarted);

        *self = Self::with_tuning(seed, self.high_score, self.tuning.clone());
        self.events = events;
        log::info!("Run reset (next seed {})", seed);
    }

    /// Raise the high score if this run beat it
    pub fn record_high_score(&mut self) {
        let points = self.points();
        let mut best = HighScore::new(self.high_score);
        if best.record(points) {
            self.high_score = best.best;
            self.push_event(GameEvent::NewHighScore(points));
            log::info!("New high score: {}", points);
        }
    }

    /// Enter a terminal phase, settling the high score
    pub fn finish(&mut self, phase: GamePhase) {
        debug_assert!(phase.is_terminal());
        self.phase = phase;
        let score = self.points();
        self.push_event(match phase {
            GamePhase::Win => GameEvent::Won { score },
            _ => GameEvent::GameOver { score },
        });
        self.record_high_score();
        log::info!("Run ended: {:?} with {} points", phase, score);
    }

    /// Rightmost obstacle x, if any
    pub fn rightmost_obstacle_x(&self) -> Option<f32> {
        self.obstacles
            .iter()
            .map(|o| o.pos.x)
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_stands_on_ground() {
        let tuning = Tuning::default();
        let player = Player::new(&tuning);
        assert_eq!(player.feet(), GROUND_Y);
        assert!(player.is_grounded(tuning.grounded_tolerance));
        assert_eq!(player.jumps_used, 0);
    }

    #[test]
    fn test_duck_and_stand_keep_feet_anchored() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);

        assert!(player.duck(&tuning));
        assert_eq!(player.size.y, tuning.duck_height);
        assert_eq!(player.feet(), GROUND_Y);
        assert_eq!(player.pos.y, GROUND_Y - tuning.duck_height);

        // Already ducking
        assert!(!player.duck(&tuning));

        assert!(player.stand());
        assert_eq!(player.size.y, tuning.stand_height);
        assert_eq!(player.feet(), GROUND_Y);
        assert!(!player.stand());
    }

    #[test]
    fn test_duck_ignored_while_airborne() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.jump(&tuning);
        player.integrate(tuning.gravity, 0.1);
        assert!(player.feet() < GROUND_Y);

        assert!(!player.duck(&tuning));
        assert!(!player.ducking);
        assert_eq!(player.size.y, tuning.stand_height);
    }

    #[test]
    fn test_stand_mid_air_preserves_feet() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.duck(&tuning);
        player.jump(&tuning);
        player.integrate(tuning.gravity, 0.05);
        let feet = player.feet();

        player.stand();
        assert!((player.feet() - feet).abs() < 1e-4);
    }

    #[test]
    fn test_landing_resets_jumps() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        assert!(player.jump(&tuning));
        assert!(player.jump(&tuning));
        assert!(!player.jump(&tuning));
        assert_eq!(player.jumps_used, 2);

        let mut landed = false;
        for _ in 0..1000 {
            if player.integrate(tuning.gravity, 1.0 / 120.0) {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert_eq!(player.jumps_used, 0);
        assert_eq!(player.vel_y, 0.0);
        assert_eq!(player.feet(), GROUND_Y);
    }

    #[test]
    fn test_obstacle_culled_past_left_margin() {
        let mut obstacle = Obstacle {
            id: 1,
            pos: Vec2::new(0.0, 272.0),
            size: Vec2::new(40.0, 48.0),
            kind: ObstacleKind::Ground,
            color: GROUND_COLOR,
        };
        assert!(!obstacle.is_off_screen());
        obstacle.advance(300.0, 0.8);
        assert!(obstacle.is_off_screen());
    }

    #[test]
    fn test_high_score_only_rises() {
        let mut state = GameState::new(1, 500);
        state.score = 120.0;
        state.record_high_score();
        assert_eq!(state.high_score, 500);
        assert!(state.drain_events().is_empty());

        state.score = 612.7;
        state.record_high_score();
        assert_eq!(state.high_score, 612);
        assert_eq!(state.drain_events(), vec![GameEvent::NewHighScore(612)]);
    }

    #[test]
    fn test_reset_preserves_high_score_and_events() {
        let mut state = GameState::new(7, 0);
        state.phase = GamePhase::Running;
        state.score = 42.0;
        state.finish(GamePhase::GameOver);
        state.reset_to_waiting();

        assert_eq!(state.phase, GamePhase::Waiting);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.high_score, 42);
        assert!(state.obstacles.is_empty());
        assert_ne!(state.seed, 7);

        let events = state.drain_events();
        assert_eq!(events.first(), Some(&GameEvent::GameOver { score: 42 }));
        assert_eq!(events.last(), Some(&GameEvent::Restarted));
    }

    #[test]
    fn test_state_serializes_to_json() {
        let state = GameState::new(99, 10);
        let json = serde_json::to_string(&state).expect("serialize");
        let back: GameState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.seed, 99);
        assert_eq!(back.high_score, 10);
        assert_eq!(back.phase, GamePhase::Waiting);
    }
}
