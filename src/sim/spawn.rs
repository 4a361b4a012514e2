//! Obstacle spawning
//!
//! Normal mode fires on a fixed interval and refuses to crowd the rightmost
//! obstacle. Chaos mode (after the final-level cinematic) fires on a random
//! interval with no spacing rule and more air obstacles.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{
    AIR_COLOR, CHAOS_AIR_COLOR, GROUND_COLOR, GameEvent, GameState, Obstacle, ObstacleKind,
};
use crate::consts::*;
use crate::tuning::Tuning;

/// Which spawning regime is in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnMode {
    Normal,
    Chaos,
    /// Cinematic in progress
    Paused,
}

impl SpawnMode {
    pub fn of(state: &GameState) -> Self {
        if state.cinematic.is_active() {
            SpawnMode::Paused
        } else if state.chaos {
            SpawnMode::Chaos
        } else {
            SpawnMode::Normal
        }
    }
}

/// Roll the wait before the next chaos spawn
pub fn roll_chaos_interval(rng: &mut Pcg32, tuning: &Tuning) -> f32 {
    if tuning.chaos_interval_max <= tuning.chaos_interval_min {
        return tuning.chaos_interval_min;
    }
    rng.random_range(tuning.chaos_interval_min..tuning.chaos_interval_max)
}

/// Whether a new obstacle at `spawn_x` keeps the minimum gap to `rightmost_x`
pub fn gap_allows_spawn(spawn_x: f32, rightmost_x: Option<f32>, min_gap: f32) -> bool {
    match rightmost_x {
        Some(x) => spawn_x - x >= min_gap,
        None => true,
    }
}

/// Advance spawn timers and emit at most one obstacle
pub fn update_spawner(state: &mut GameState, dt: f32) {
    match SpawnMode::of(state) {
        SpawnMode::Paused => {}
        SpawnMode::Normal => {
            state.spawn_elapsed += dt;
            if state.spawn_elapsed >= state.tuning.normal_spawn_interval {
                // The timer restarts whether or not the candidate survives the gap check
                state.spawn_elapsed = 0.0;
                spawn_normal(state);
            }
        }
        SpawnMode::Chaos => {
            state.spawn_elapsed += dt;
            if state.spawn_elapsed >= state.chaos_interval {
                state.spawn_elapsed = 0.0;
                spawn_chaos(state);
                state.chaos_interval = roll_chaos_interval(&mut state.rng, &state.tuning);
            }
        }
    }
}

/// Try to place a normal obstacle. Returns false when the gap rule rejects it.
pub fn spawn_normal(state: &mut GameState) -> bool {
    let is_air = state.rng.random_bool(state.tuning.normal_air_chance);
    let width = state
        .rng
        .random_range(state.tuning.normal_width_min..state.tuning.normal_width_max);

    if !gap_allows_spawn(SPAWN_X, state.rightmost_obstacle_x(), state.tuning.min_gap) {
        log::debug!("Spawn skipped: too close to previous obstacle");
        return false;
    }

    let color = if is_air { AIR_COLOR } else { GROUND_COLOR };
    push_obstacle(state, is_air, width as f32, color);
    true
}

/// Place a chaos obstacle; no spacing rule
pub fn spawn_chaos(state: &mut GameState) {
    let is_air = state.rng.random_bool(state.tuning.chaos_air_chance);
    let width = state
        .rng
        .random_range(state.tuning.chaos_width_min..state.tuning.chaos_width_max);
    let color = if is_air { CHAOS_AIR_COLOR } else { GROUND_COLOR };
    push_obstacle(state, is_air, width as f32, color);
}

fn push_obstacle(state: &mut GameState, is_air: bool, width: f32, color: u32) {
    let tuning = &state.tuning;
    let (kind, height, top) = if is_air {
        (
            ObstacleKind::Air,
            tuning.air_height,
            GROUND_Y - tuning.air_altitude,
        )
    } else {
        (
            ObstacleKind::Ground,
            tuning.ground_height,
            GROUND_Y - tuning.ground_height,
        )
    };

    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        pos: Vec2::new(SPAWN_X, top),
        size: Vec2::new(width, height),
        kind,
        color,
    });
    state.push_event(GameEvent::ObstacleSpawned { kind });
    log::debug!("Spawned {:?} obstacle #{} (w={})", kind, id, width);
}
