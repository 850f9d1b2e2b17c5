//! Standalone functions and modules to wrap the nitty-gritty of
//! OpenGL objects with Rust structs.
//!
//! Everything in here assumes a context is current on the calling thread
//! and that `gl::load_with` has run.
pub mod buffer;
pub mod context;
pub mod debug;
pub mod framebuffer;
pub mod program;
pub mod shader;
pub mod vertex_array;

pub use buffer::*;
pub use context::ContextInfo;
pub use debug::install_debug_output;
pub use framebuffer::*;
pub use program::*;
pub use shader::*;
pub use vertex_array::*;

use crate::{
    config::Viewport,
    error::{RenderError, Result},
};

/// Point the OpenGL viewport at `region`.
pub fn gl_set_viewport(region: Viewport) {
    // SAFETY:
    // gl::Viewport only records an error for negative sizes.
    unsafe {
        gl::Viewport(region.x, region.y, region.width, region.height);
    }
}

/// Turn a pending `glGetError` into a [`RenderError::Draw`] naming `call`.
pub fn check_error(call: &'static str) -> Result<()> {
    let code = unsafe { gl::GetError() };
    if code == gl::NO_ERROR {
        Ok(())
    } else {
        Err(RenderError::Draw { call, code })
    }
}
