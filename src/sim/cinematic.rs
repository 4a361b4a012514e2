//! Final-level chaser cinematic
//!
//! A one-shot scripted sequence: a chaser follows the player, overtakes,
//! disappears, then comes back from the right with a bigger friend. While it
//! plays, spawning and collisions are suspended.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::consts::*;
use crate::tuning::Tuning;

/// Chaser dimensions
pub const CHASER_SIZE: Vec2 = Vec2::new(44.0, 70.0);
pub const BIG_CHASER_SIZE: Vec2 = Vec2::new(80.0, 100.0);

/// How far behind the player the chaser starts
const CHASER_START_BEHIND: f32 = 300.0;
/// The chaser counts as gone once past the right edge by this much
const PASS_EXIT_MARGIN: f32 = 60.0;
/// Where the big chaser re-enters, past the right edge
const BIG_CHASER_ENTRY_OFFSET: f32 = 240.0;
/// The big chaser must clear the left edge by this much to end the sequence
const RETURN_EXIT_MARGIN: f32 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CinematicPhase {
    #[default]
    Idle,
    /// Chaser creeps up from behind
    Follow,
    /// Chaser overtakes at speed
    Pass,
    /// Chaser is off screen; brief quiet
    Passed,
    /// Both chasers run back right-to-left
    Returning,
    Done,
}

/// A scripted entity; never collides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chaser {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed (px/s, negative is leftward)
    pub speed: f32,
}

impl Chaser {
    fn parked(size: Vec2) -> Self {
        Self {
            pos: Vec2::new(PLAYER_SCREEN_X - CHASER_START_BEHIND, GROUND_Y - size.y),
            size,
            speed: 0.0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            min: self.pos,
            size: self.size,
        }
    }

    fn advance(&mut self, dt: f32) {
        self.pos.x += self.speed * dt;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cinematic {
    pub phase: CinematicPhase,
    pub chaser: Chaser,
    pub big_chaser: Chaser,
    /// Seconds spent in the current phase
    pub phase_time: f32,
}

impl Default for Cinematic {
    fn default() -> Self {
        let mut big_chaser = Chaser::parked(BIG_CHASER_SIZE);
        big_chaser.pos.x = VIEW_WIDTH + BIG_CHASER_ENTRY_OFFSET;
        Self {
            phase: CinematicPhase::Idle,
            chaser: Chaser::parked(CHASER_SIZE),
            big_chaser,
            phase_time: 0.0,
        }
    }
}

impl Cinematic {
    /// Spawning and collisions are suspended while this is true
    pub fn is_active(&self) -> bool {
        matches!(
            self.phase,
            CinematicPhase::Follow
                | CinematicPhase::Pass
                | CinematicPhase::Passed
                | CinematicPhase::Returning
        )
    }

    pub fn chaser_visible(&self) -> bool {
        matches!(
            self.phase,
            CinematicPhase::Follow | CinematicPhase::Pass | CinematicPhase::Returning
        )
    }

    pub fn big_chaser_visible(&self) -> bool {
        self.phase == CinematicPhase::Returning
    }

    /// Start the sequence. Only possible once, from `Idle`.
    pub fn begin(&mut self, world_speed: f32, tuning: &Tuning) -> bool {
        if self.phase != CinematicPhase::Idle {
            return false;
        }
        self.chaser = Chaser::parked(CHASER_SIZE);
        self.chaser.speed = world_speed * tuning.chaser_follow_factor;
        self.enter(CinematicPhase::Follow);
        true
    }

    fn enter(&mut self, phase: CinematicPhase) {
        log::debug!("Cinematic {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.phase_time = 0.0;
    }

    /// Advance the sequence; may adjust world speed. Returns the new phase on a transition.
    pub fn update(&mut self, dt: f32, speed: &mut f32, tuning: &Tuning) -> Option<CinematicPhase> {
        let before = self.phase;
        self.phase_time += dt;

        match self.phase {
            CinematicPhase::Idle | CinematicPhase::Done => return None,
            CinematicPhase::Follow => {
                self.chaser.advance(dt);
                *speed = tuning.clamp_speed(*speed + tuning.follow_speed_growth * dt);
                if self.phase_time >= tuning.follow_duration {
                    self.chaser.speed = *speed * tuning.pass_multiplier;
                    self.enter(CinematicPhase::Pass);
                }
            }
            CinematicPhase::Pass => {
                self.chaser.advance(dt);
                if self.chaser.pos.x > VIEW_WIDTH + PASS_EXIT_MARGIN {
                    self.enter(CinematicPhase::Passed);
                }
            }
            CinematicPhase::Passed => {
                if self.phase_time >= tuning.passed_wait {
                    self.chaser.pos.x = VIEW_WIDTH + PASS_EXIT_MARGIN;
                    self.chaser.speed = -(*speed * tuning.chaser_return_factor);
                    self.big_chaser.pos = Vec2::new(
                        VIEW_WIDTH + BIG_CHASER_ENTRY_OFFSET,
                        GROUND_Y - self.big_chaser.size.y,
                    );
                    self.big_chaser.speed = -(*speed * tuning.big_chaser_return_factor);
                    self.enter(CinematicPhase::Returning);
                }
            }
            CinematicPhase::Returning => {
                self.chaser.advance(dt);
                self.big_chaser.advance(dt);
                if self.big_chaser.bounds().right() < -RETURN_EXIT_MARGIN {
                    *speed = tuning.clamp_speed(*speed * tuning.exit_speed_boost);
                    self.enter(CinematicPhase::Done);
                }
            }
        }

        (self.phase != before).then_some(self.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_completion(cinematic: &mut Cinematic, speed: &mut f32) -> Vec<CinematicPhase> {
        let tuning = Tuning::default();
        let mut visited = vec![cinematic.phase];
        for _ in 0..200_000 {
            if let Some(phase) = cinematic.update(SIM_DT, speed, &tuning) {
                visited.push(phase);
            }
            if cinematic.phase == CinematicPhase::Done {
                break;
            }
        }
        visited
    }

    #[test]
    fn test_idle_does_nothing() {
        let tuning = Tuning::default();
        let mut cinematic = Cinematic::default();
        let mut speed = 300.0;
        assert_eq!(cinematic.update(1.0, &mut speed, &tuning), None);
        assert_eq!(cinematic.phase, CinematicPhase::Idle);
        assert_eq!(speed, 300.0);
        assert!(!cinematic.is_active());
    }

    #[test]
    fn test_begin_places_chaser_behind_player() {
        let tuning = Tuning::default();
        let mut cinematic = Cinematic::default();
        assert!(cinematic.begin(400.0, &tuning));
        assert_eq!(cinematic.phase, CinematicPhase::Follow);
        assert_eq!(cinematic.chaser.pos.x, PLAYER_SCREEN_X - 300.0);
        assert_eq!(cinematic.chaser.bounds().bottom(), GROUND_Y);
        assert!((cinematic.chaser.speed - 380.0).abs() < 1e-3);
        assert!(cinematic.is_active());
    }

    #[test]
    fn test_follow_lasts_thirty_seconds_and_ramps_speed() {
        let tuning = Tuning::default();
        let mut cinematic = Cinematic::default();
        let mut speed = 300.0;
        cinematic.begin(speed, &tuning);

        assert_eq!(cinematic.update(10.0, &mut speed, &tuning), None);
        assert!((speed - 900.0).abs() < 1e-2);

        assert_eq!(
            cinematic.update(20.0, &mut speed, &tuning),
            Some(CinematicPhase::Pass)
        );
        assert!((cinematic.chaser.speed - speed * 3.0).abs() < 1e-2);
    }

    #[test]
    fn test_full_sequence_in_order() {
        let tuning = Tuning::default();
        let mut cinematic = Cinematic::default();
        let mut speed = 300.0;
        cinematic.begin(speed, &tuning);

        let visited = run_to_completion(&mut cinematic, &mut speed);
        assert_eq!(
            visited,
            vec![
                CinematicPhase::Follow,
                CinematicPhase::Pass,
                CinematicPhase::Passed,
                CinematicPhase::Returning,
                CinematicPhase::Done,
            ]
        );
        assert!(!cinematic.is_active());
        assert!(speed <= tuning.max_speed);
    }

    #[test]
    fn test_runs_only_once() {
        let tuning = Tuning::default();
        let mut cinematic = Cinematic::default();
        let mut speed = 300.0;
        cinematic.begin(speed, &tuning);
        run_to_completion(&mut cinematic, &mut speed);

        assert!(!cinematic.begin(speed, &tuning));
        assert_eq!(cinematic.phase, CinematicPhase::Done);
        assert_eq!(cinematic.update(1.0, &mut speed, &tuning), None);
    }

    #[test]
    fn test_returning_chasers_move_left_big_one_faster() {
        let tuning = Tuning::default();
        let mut cinematic = Cinematic::default();
        let mut speed = 500.0;
        cinematic.begin(speed, &tuning);
        cinematic.phase = CinematicPhase::Passed;
        cinematic.phase_time = 0.0;

        assert_eq!(
            cinematic.update(5.0, &mut speed, &tuning),
            Some(CinematicPhase::Returning)
        );
        assert!(cinematic.chaser.speed < 0.0);
        assert!(cinematic.big_chaser.speed < cinematic.chaser.speed);
        assert!(cinematic.big_chaser.pos.x > VIEW_WIDTH);
        assert!(cinematic.big_chaser_visible());
    }
}
