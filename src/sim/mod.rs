//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod cinematic;
pub mod collision;
pub mod messages;
pub mod spawn;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use cinematic::{Chaser, Cinematic, CinematicPhase};
pub use collision::{check_collision, first_collision};
pub use spawn::{SpawnMode, update_spawner};
pub use state::{GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Player};
pub use tick::{TickInput, tick};
