//! Audio system using Web Audio API
//!
//! Procedurally generated cues - no sound files to go missing. Every failure
//! (no AudioContext, autoplay block, node errors) is ignored.

use crate::sim::{CinematicPhase, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player jumped (either jump)
    Jump,
    /// Player crouched
    Duck,
    /// Chaser arrives
    FinalLevel,
    /// Run ended on an obstacle
    GameOver,
    /// New best score
    HighScore,
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::Ducked => Some(SoundEffect::Duck),
            GameEvent::Cinematic(CinematicPhase::Follow) => Some(SoundEffect::FinalLevel),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::NewHighScore(_) => Some(SoundEffect::HighScore),
            _ => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, volume: 0.8 }
        }

        /// Effective sound effect volume (0.0 - 1.0)
        pub fn set_volume(&mut self, vol: f32) {
            self.volume = vol.clamp(0.0, 1.0);
        }

        /// Fire and forget
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Jump => self.play_jump(ctx, vol),
                SoundEffect::Duck => self.play_duck(ctx, vol),
                SoundEffect::FinalLevel => self.play_final_level(ctx, vol),
                SoundEffect::GameOver => self.play_game_over(ctx, vol),
                SoundEffect::HighScore => self.play_high_score(ctx, vol),
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Rising boing
        fn play_jump(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.18)
                .ok();
            osc.frequency().set_value_at_time(220.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(660.0, t + 0.12)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }

        /// Short downward swoosh
        fn play_duck(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(120.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.12).ok();
        }

        /// Low alarm pulses
        fn play_final_level(&self, ctx: &AudioContext, vol: f32) {
            for i in 0..3 {
                let delay = i as f64 * 0.25;
                if let Some((osc, gain)) = self.create_osc(ctx, 110.0, OscillatorType::Sawtooth) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.2, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.22).ok();
                }
            }
        }

        /// Crash: a low thud under a short square-wave crunch
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 140.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.5, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.45)
                    .ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(40.0, t + 0.4)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.5).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 90.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.15, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.1).ok();
            }
        }

        /// Two-note "ta-da", the second note held
        fn play_high_score(&self, ctx: &AudioContext, vol: f32) {
            let notes = [(523.25, 0.0, 0.12), (783.99, 0.14, 0.45)];
            for (freq, delay, len) in notes {
                let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) else {
                    continue;
                };
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().linear_ramp_to_value_at_time(vol * 0.15, t + 0.02).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + len)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + len + 0.02).ok();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_cues() {
        assert_eq!(SoundEffect::for_event(&GameEvent::Jumped), Some(SoundEffect::Jump));
        assert_eq!(SoundEffect::for_event(&GameEvent::Ducked), Some(SoundEffect::Duck));
        assert_eq!(
            SoundEffect::for_event(&GameEvent::GameOver { score: 3 }),
            Some(SoundEffect::GameOver)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Cinematic(CinematicPhase::Follow)),
            Some(SoundEffect::FinalLevel)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::Stood), None);
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Cinematic(CinematicPhase::Pass)),
            None
        );
    }
}
