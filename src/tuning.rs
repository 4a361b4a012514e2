//! Gameplay balance
//!
//! Every number that shapes difficulty lives here so the simulation code reads
//! as rules rather than magic constants. Tuning is compiled in; it is never
//! loaded from storage.

use serde::{Deserialize, Serialize};

/// Balance values for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    // === Player ===
    pub player_width: f32,
    pub stand_height: f32,
    pub duck_height: f32,
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Velocity applied on jump (px/s, negative is up)
    pub jump_velocity: f32,
    pub max_jumps: u8,
    /// Feet within this distance of the ground count as grounded
    pub grounded_tolerance: f32,

    // === World speed (px/s) ===
    pub base_speed: f32,
    pub max_speed: f32,
    /// Organic speed growth every running frame (px/s²)
    pub speed_growth: f32,
    /// Extra growth while the chaser follows (px/s²)
    pub follow_speed_growth: f32,

    // === Normal spawning ===
    pub normal_spawn_interval: f32,
    pub normal_air_chance: f64,
    pub normal_width_min: u32,
    /// Exclusive upper bound of the width roll
    pub normal_width_max: u32,
    /// Smallest allowed horizontal gap to the rightmost obstacle (inclusive)
    pub min_gap: f32,

    // === Chaos spawning ===
    pub chaos_interval_min: f32,
    pub chaos_interval_max: f32,
    pub chaos_air_chance: f64,
    pub chaos_width_min: u32,
    pub chaos_width_max: u32,

    // === Obstacle shapes ===
    pub air_height: f32,
    /// Air obstacles float this far above the ground line (top edge)
    pub air_altitude: f32,
    pub ground_height: f32,
    /// Feet may sink this far past a ground obstacle's top and still clear it
    pub ground_clearance: f32,

    // === Final level & cinematic ===
    pub final_level_score: f32,
    /// Reaching the final level plays the chaser cinematic before chaos
    pub cinematic_on_final_level: bool,
    pub follow_duration: f32,
    pub chaser_follow_factor: f32,
    pub pass_multiplier: f32,
    pub passed_wait: f32,
    pub chaser_return_factor: f32,
    pub big_chaser_return_factor: f32,
    pub exit_speed_boost: f32,

    // === Scoring ===
    pub points_per_second: f32,
    pub first_message_at: f32,
    pub message_gap_min: f32,
    pub message_gap_jitter: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_width: 40.0,
            stand_height: 70.0,
            duck_height: 40.0,
            gravity: 1400.0,
            jump_velocity: -700.0,
            max_jumps: 2,
            grounded_tolerance: 1.0,

            base_speed: 280.0,
            max_speed: 1400.0,
            speed_growth: 10.0,
            follow_speed_growth: 60.0,

            normal_spawn_interval: 1.0,
            normal_air_chance: 0.45,
            normal_width_min: 28,
            normal_width_max: 56,
            min_gap: 220.0,

            chaos_interval_min: 0.4,
            chaos_interval_max: 1.2,
            chaos_air_chance: 0.55,
            chaos_width_min: 26,
            chaos_width_max: 62,

            air_height: 36.0,
            air_altitude: 80.0,
            ground_height: 48.0,
            ground_clearance: 6.0,

            final_level_score: 200.0,
            cinematic_on_final_level: true,
            follow_duration: 30.0,
            chaser_follow_factor: 0.95,
            pass_multiplier: 3.0,
            passed_wait: 5.0,
            chaser_return_factor: 1.2,
            big_chaser_return_factor: 1.7,
            exit_speed_boost: 1.2,

            points_per_second: 10.0,
            first_message_at: 300.0,
            message_gap_min: 400.0,
            message_gap_jitter: 300.0,
        }
    }
}

impl Tuning {
    /// Clamp a world speed into the allowed band
    pub fn clamp_speed(&self, speed: f32) -> f32 {
        speed.clamp(self.base_speed, self.max_speed)
    }
}
