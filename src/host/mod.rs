//! Owns the window and GL context and decides when setup and paint run.
pub mod lifecycle;
pub mod sdl;

pub use lifecycle::{Lifecycle, SurfaceClient};
pub use sdl::SdlHost;

use thiserror::Error;

use crate::error::RenderError;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("SDL: {0}")]
    Sdl(String),

    #[error(transparent)]
    Render(#[from] RenderError),
}
