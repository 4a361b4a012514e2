//! Keyboard mapping

use crate::sim::{GamePhase, TickInput};

/// What a key means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Start on the title screen, jump while running
    Primary,
    Duck,
    Restart,
    Quit,
    SecretWin,
    /// Toggle demo mode
    Autopilot,
    /// Toggle sound; handled by the host, never reaches the sim
    ToggleMute,
}

impl InputAction {
    /// Map a `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Space" | "ArrowUp" => Some(InputAction::Primary),
            "ArrowDown" => Some(InputAction::Duck),
            "KeyR" => Some(InputAction::Restart),
            "KeyQ" => Some(InputAction::Quit),
            "KeyW" => Some(InputAction::SecretWin),
            "KeyI" => Some(InputAction::Autopilot),
            "KeyM" => Some(InputAction::ToggleMute),
            _ => None,
        }
    }

    /// Keys whose browser default (scrolling) must be suppressed
    pub fn blocks_default(&self) -> bool {
        matches!(self, InputAction::Primary | InputAction::Duck)
    }
}

/// Record a key press for the next tick
pub fn apply_key_down(input: &mut TickInput, phase: GamePhase, action: InputAction) {
    match action {
        InputAction::Primary => match phase {
            GamePhase::Waiting => input.start = true,
            GamePhase::Running => input.jump = true,
            _ => {}
        },
        InputAction::Duck => input.duck_pressed = true,
        InputAction::Restart => input.restart = true,
        InputAction::Quit => input.quit = true,
        InputAction::SecretWin => input.secret_win = true,
        InputAction::Autopilot => {
            input.autopilot = !input.autopilot;
            log::info!("Autopilot: {}", input.autopilot);
        }
        InputAction::ToggleMute => {}
    }
}

/// Record a key release for the next tick
pub fn apply_key_up(input: &mut TickInput, action: InputAction) {
    if action == InputAction::Duck {
        input.duck_released = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(InputAction::from_code("Space"), Some(InputAction::Primary));
        assert_eq!(InputAction::from_code("ArrowUp"), Some(InputAction::Primary));
        assert_eq!(InputAction::from_code("ArrowDown"), Some(InputAction::Duck));
        assert_eq!(InputAction::from_code("KeyR"), Some(InputAction::Restart));
        assert_eq!(InputAction::from_code("KeyQ"), Some(InputAction::Quit));
        assert_eq!(InputAction::from_code("KeyW"), Some(InputAction::SecretWin));
        assert_eq!(InputAction::from_code("KeyM"), Some(InputAction::ToggleMute));
        assert_eq!(InputAction::from_code("KeyX"), None);
    }

    #[test]
    fn test_mute_leaves_tick_input_alone() {
        let mut input = TickInput::default();
        apply_key_down(&mut input, GamePhase::Running, InputAction::ToggleMute);
        assert!(!input.start && !input.jump && !input.duck_pressed);
        assert!(!input.restart && !input.quit && !input.secret_win && !input.autopilot);
    }

    #[test]
    fn test_primary_depends_on_phase() {
        let mut input = TickInput::default();
        apply_key_down(&mut input, GamePhase::Waiting, InputAction::Primary);
        assert!(input.start && !input.jump);

        let mut input = TickInput::default();
        apply_key_down(&mut input, GamePhase::Running, InputAction::Primary);
        assert!(input.jump && !input.start);

        let mut input = TickInput::default();
        apply_key_down(&mut input, GamePhase::GameOver, InputAction::Primary);
        assert!(!input.jump && !input.start);
    }

    #[test]
    fn test_duck_press_and_release() {
        let mut input = TickInput::default();
        apply_key_down(&mut input, GamePhase::Running, InputAction::Duck);
        apply_key_up(&mut input, InputAction::Duck);
        assert!(input.duck_pressed);
        assert!(input.duck_released);

        let mut input = TickInput::default();
        apply_key_up(&mut input, InputAction::Primary);
        assert!(!input.duck_released);
    }

    #[test]
    fn test_autopilot_toggles() {
        let mut input = TickInput::default();
        apply_key_down(&mut input, GamePhase::Running, InputAction::Autopilot);
        assert!(input.autopilot);
        apply_key_down(&mut input, GamePhase::Running, InputAction::Autopilot);
        assert!(!input.autopilot);
    }
}
