//! Fixed timestep simulation tick
//!
//! Applies the frame's input to the game-state machine, then advances a
//! running game in a fixed order: world speed, obstacle movement, spawning,
//! player physics, final level / cinematic, collision, scoring.

use rand::Rng;

use super::cinematic::CinematicPhase;
use super::collision::first_collision;
use super::messages::{FINAL_LEVEL_MESSAGE, FLAVOR_MESSAGES};
use super::spawn::update_spawner;
use super::state::{GameEvent, GamePhase, GameState, ObstacleKind};

/// Ground stripes repeat every this many pixels
const STRIPE_PERIOD: f32 = 20.0;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Leave the title screen
    pub start: bool,
    /// Jump / double jump
    pub jump: bool,
    /// Duck key went down
    pub duck_pressed: bool,
    /// Duck key came up
    pub duck_released: bool,
    /// Back to the title screen from a finished run
    pub restart: bool,
    /// Abandon whatever is going on
    pub quit: bool,
    /// Cheat code
    pub secret_win: bool,
    /// Demo mode - the game plays itself (persistent, not one-shot)
    pub autopilot: bool,
}

impl TickInput {
    /// Forget everything except persistent toggles
    pub fn clear_one_shots(&mut self) {
        *self = Self {
            autopilot: self.autopilot,
            ..Default::default()
        };
    }
}

/// Advance the game state by one timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.quit {
        log::info!("Quit requested, back to title");
        state.push_event(GameEvent::QuitAcknowledged);
        state.reset_to_waiting();
        return;
    }

    match state.phase {
        GamePhase::Waiting => {
            if input.start {
                state.phase = GamePhase::Running;
                state.push_event(GameEvent::Started);
                log::info!("Run started (seed {})", state.seed);
            }
            return;
        }
        GamePhase::GameOver | GamePhase::Win => {
            if input.restart {
                state.reset_to_waiting();
            }
            return;
        }
        GamePhase::Running => {}
    }

    if input.secret_win {
        state.finish(GamePhase::Win);
        return;
    }

    let mut input = input.clone();
    if input.autopilot {
        autopilot(state, &mut input);
    }
    apply_player_input(state, &input);

    step_running(state, dt);
}

fn apply_player_input(state: &mut GameState, input: &TickInput) {
    if input.jump && state.player.jump(&state.tuning) {
        state.push_event(GameEvent::Jumped);
    }
    if input.duck_pressed && state.player.duck(&state.tuning) {
        state.push_event(GameEvent::Ducked);
    }
    if input.duck_released && state.player.stand() {
        state.push_event(GameEvent::Stood);
    }
}

fn step_running(state: &mut GameState, dt: f32) {
    state.time += dt;

    // World speed creeps up
    state.speed = state
        .tuning
        .clamp_speed(state.speed + state.tuning.speed_growth * dt);
    state.stripe_offset = (state.stripe_offset + state.speed * dt) % STRIPE_PERIOD;

    // Obstacles scroll left and fall off the edge
    let speed = state.speed;
    for obstacle in &mut state.obstacles {
        obstacle.advance(speed, dt);
    }
    state.obstacles.retain(|o| !o.is_off_screen());

    update_spawner(state, dt);

    state.player.integrate(state.tuning.gravity, dt);

    if !state.final_level && state.score >= state.tuning.final_level_score {
        enter_final_level(state);
    }
    if let Some(phase) = state
        .cinematic
        .update(dt, &mut state.speed, &state.tuning)
    {
        state.push_event(GameEvent::Cinematic(phase));
        if phase == CinematicPhase::Done {
            state.chaos = true;
            state.spawn_elapsed = 0.0;
            state.push_event(GameEvent::ChaosStarted);
            log::info!("Cinematic finished, chaos mode on");
        }
    }

    if let Some(id) = first_collision(state) {
        log::debug!("Collided with obstacle #{}", id);
        state.finish(GamePhase::GameOver);
        return;
    }

    state.fake_progress += state.speed * dt;
    state.score += state.tuning.points_per_second * dt;
    update_message(state);
}

/// Score threshold reached: cinematic first, chaos once it is over
fn enter_final_level(state: &mut GameState) {
    state.final_level = true;
    state.message = Some(FINAL_LEVEL_MESSAGE.to_string());
    state.push_event(GameEvent::FinalLevel);
    state.push_event(GameEvent::Message(FINAL_LEVEL_MESSAGE.to_string()));
    log::info!("Final level reached at {} points", state.points());

    if state.tuning.cinematic_on_final_level {
        if state.cinematic.begin(state.speed, &state.tuning) {
            state.spawn_elapsed = 0.0;
            state.push_event(GameEvent::Cinematic(CinematicPhase::Follow));
        }
    } else {
        state.chaos = true;
        state.push_event(GameEvent::ChaosStarted);
    }
}

fn update_message(state: &mut GameState) {
    if (state.points() as f32) <= state.next_message_at {
        return;
    }
    let idx = state.rng.random_range(0..FLAVOR_MESSAGES.len());
    let message = FLAVOR_MESSAGES[idx].to_string();
    state.next_message_at +=
        state.tuning.message_gap_min + state.rng.random::<f32>() * state.tuning.message_gap_jitter;
    state.message = Some(message.clone());
    state.push_event(GameEvent::Message(message));
}

/// Demo mode: jump rocks, duck missiles
fn autopilot(state: &GameState, input: &mut TickInput) {
    let player = &state.player;
    let front = player.pos.x + player.size.x;
    let grounded = player.is_grounded(state.tuning.grounded_tolerance);

    // Nearest obstacle that has not fully passed the player
    let next = state
        .obstacles
        .iter()
        .filter(|o| o.hitbox().right() > player.pos.x)
        .min_by(|a, b| {
            a.pos
                .x
                .partial_cmp(&b.pos.x)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(obstacle) = next else {
        if player.ducking {
            input.duck_released = true;
        }
        return;
    };

    let distance = obstacle.pos.x - front;
    match obstacle.kind {
        ObstacleKind::Air => {
            let lookahead = state.speed * 0.25 + 20.0;
            if distance < lookahead && grounded && !player.ducking {
                input.duck_pressed = true;
            }
        }
        ObstacleKind::Ground => {
            if player.ducking {
                input.duck_released = true;
            }
            let trigger = state.speed * 0.12 + 20.0;
            if grounded && distance >= 0.0 && distance <= trigger {
                input.jump = true;
            }
        }
    }
}
