//! Draws a red triangle into one sub-screen of an OpenGL 3.3 core surface
//! and clears the sub-screen next to it to gray, once per repaint.
//!
//! [`render::Render`] only talks to the GPU through [`gpu::Gpu`], so the
//! window and context live entirely in [`host`].
pub mod config;
pub mod error;
pub mod gl_wrappers;
pub mod gpu;
pub mod host;
pub mod render;
pub mod render_vec;
pub mod vertex;

#[cfg(test)]
mod testing;

pub use error::{RenderError, Result};
pub use render::Render;
