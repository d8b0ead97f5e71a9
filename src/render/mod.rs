//! Presentation layer
//!
//! `layout` holds the pure screen geometry (testable on any target);
//! `canvas` paints it through the Canvas-2D API and only exists on wasm.
//! Rendering reads run state and never writes it.

pub mod layout;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::render;
