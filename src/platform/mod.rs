//! Platform abstraction layer
//!
//! Browser key codes to simulation input. Kept free of web-sys so it can be
//! tested natively; the host forwards `KeyboardEvent.code` strings.

pub mod input;

pub use input::{InputAction, apply_key_down, apply_key_up};
