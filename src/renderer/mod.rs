//! Canvas 2D rendering module
//!
//! Geometry lives in `shapes` and is platform independent; only the draw
//! calls are browser specific.

pub mod shapes;

#[cfg(target_arch = "wasm32")]
mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
