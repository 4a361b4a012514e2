//! Player vs obstacle collision
//!
//! Plain box overlap, then two forgiveness rules: ducking clears air
//! obstacles, and feet above a ground obstacle's top (with a little slack)
//! clear ground obstacles.

use super::state::{GameState, Obstacle, ObstacleKind, Player};
use crate::tuning::Tuning;

/// Does this obstacle end the run?
pub fn check_collision(player: &Player, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    if !player.hitbox().overlaps(&obstacle.hitbox()) {
        return false;
    }

    match obstacle.kind {
        ObstacleKind::Air if player.ducking => false,
        ObstacleKind::Ground if player.feet() < obstacle.pos.y + tuning.ground_clearance => false,
        _ => true,
    }
}

/// Id of the first obstacle the player runs into, if any.
/// Always `None` while the cinematic plays.
pub fn first_collision(state: &GameState) -> Option<u32> {
    if state.cinematic.is_active() {
        return None;
    }
    state
        .obstacles
        .iter()
        .find(|o| check_collision(&state.player, o, &state.tuning))
        .map(|o| o.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{AIR_COLOR, GROUND_COLOR};
    use glam::Vec2;
    use proptest::prelude::*;

    fn ground_at(x: f32) -> Obstacle {
        Obstacle {
            id: 1,
            pos: Vec2::new(x, GROUND_Y - 48.0),
            size: Vec2::new(40.0, 48.0),
            kind: ObstacleKind::Ground,
            color: GROUND_COLOR,
        }
    }

    fn air_at(x: f32) -> Obstacle {
        Obstacle {
            id: 2,
            pos: Vec2::new(x, GROUND_Y - 80.0),
            size: Vec2::new(40.0, 36.0),
            kind: ObstacleKind::Air,
            color: AIR_COLOR,
        }
    }

    #[test]
    fn test_standing_player_hits_ground_obstacle() {
        let tuning = Tuning::default();
        let player = Player::new(&tuning);
        assert!(check_collision(&player, &ground_at(PLAYER_SCREEN_X + 10.0), &tuning));
    }

    #[test]
    fn test_no_overlap_no_collision() {
        let tuning = Tuning::default();
        let player = Player::new(&tuning);
        assert!(!check_collision(&player, &ground_at(PLAYER_SCREEN_X + 200.0), &tuning));
        // Touching edge only
        assert!(!check_collision(&player, &ground_at(PLAYER_SCREEN_X + 40.0), &tuning));
    }

    #[test]
    fn test_standing_player_hits_air_obstacle() {
        let tuning = Tuning::default();
        let player = Player::new(&tuning);
        assert!(check_collision(&player, &air_at(PLAYER_SCREEN_X), &tuning));
    }

    #[test]
    fn test_ducking_clears_air_obstacle() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.duck(&tuning);
        assert!(!check_collision(&player, &air_at(PLAYER_SCREEN_X), &tuning));
        // Ducking does not help against rocks
        assert!(check_collision(&player, &ground_at(PLAYER_SCREEN_X), &tuning));
    }

    #[test]
    fn test_ground_clearance_tolerance() {
        let tuning = Tuning::default();
        let obstacle = ground_at(PLAYER_SCREEN_X);
        let top = obstacle.pos.y;
        let mut player = Player::new(&tuning);

        // Feet sunk 5px into the rock: still counts as cleared
        player.pos.y = top + 5.0 - player.size.y;
        assert!(!check_collision(&player, &obstacle, &tuning));

        // Feet 6px in: hit
        player.pos.y = top + 6.0 - player.size.y;
        assert!(check_collision(&player, &obstacle, &tuning));
    }

    #[test]
    fn test_cinematic_suspends_collisions() {
        let mut state = GameState::new(1, 0);
        state.obstacles.push(ground_at(PLAYER_SCREEN_X));
        assert_eq!(first_collision(&state), Some(1));

        state.cinematic.begin(state.speed, &state.tuning);
        assert_eq!(first_collision(&state), None);
    }

    proptest! {
        #[test]
        fn prop_ducking_never_hits_air(x in 0.0f32..300.0, w in 20.0f32..80.0) {
            let tuning = Tuning::default();
            let mut player = Player::new(&tuning);
            player.duck(&tuning);
            let mut obstacle = air_at(x);
            obstacle.size.x = w;
            prop_assert!(!check_collision(&player, &obstacle, &tuning));
        }

        #[test]
        fn prop_feet_above_rock_never_hit(x in 60.0f32..200.0, lift in 0.01f32..200.0) {
            let tuning = Tuning::default();
            let obstacle = ground_at(x);
            let mut player = Player::new(&tuning);
            player.pos.y = obstacle.pos.y - lift - player.size.y;
            prop_assert!(!check_collision(&player, &obstacle, &tuning));
        }
    }
}
