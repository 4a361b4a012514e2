//! Sarcastic Runner - an endless runner that mocks you while you play
//!
//! Core modules:
//! - `audio`: Procedural Web Audio cues
//! - `sim`: Deterministic simulation (physics, spawning, collisions, cinematic, game state)
//! - `renderer`: Canvas 2D presentation
//! - `platform`: Browser input mapping
//! - `persistence`: LocalStorage access (in-memory on native)
//! - `highscores` / `settings`: What survives a page reload
//! - `tuning`: Gameplay balance

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Viewport dimensions
    pub const VIEW_WIDTH: f32 = 900.0;
    pub const VIEW_HEIGHT: f32 = 400.0;

    /// Running surface (screen y of the player's feet when grounded)
    pub const GROUND_Y: f32 = 320.0;
    /// Player's fixed screen x
    pub const PLAYER_SCREEN_X: f32 = 120.0;

    /// New obstacles appear just past the right edge
    pub const SPAWN_X: f32 = VIEW_WIDTH + 20.0;
    /// Obstacles are dropped once their right edge passes this x
    pub const CULL_X: f32 = -200.0;
}

/// Round a fractional score down to the points shown to the player
#[inline]
pub fn whole_points(score: f32) -> u64 {
    if score <= 0.0 { 0 } else { score.floor() as u64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_points_floors() {
        assert_eq!(whole_points(0.0), 0);
        assert_eq!(whole_points(-3.0), 0);
        assert_eq!(whole_points(199.99), 199);
        assert_eq!(whole_points(200.0), 200);
    }
}
