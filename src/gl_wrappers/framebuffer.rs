//! Exports [`Framebuffer`].
use super::check_error;
use crate::{
    config::{Rgba, Viewport},
    error::Result,
};

/// The framebuffer the host had bound when it was detected.
///
/// Hosts are free to swap framebuffers between paints, so one of these is only
/// good for the paint that detected it. [`Framebuffer::release`] consumes it.
#[derive(Debug)]
pub struct Framebuffer {
    id: gl::types::GLuint,
    /// Draw and read bindings to restore on release, recorded by [`Framebuffer::use_`].
    previous: Option<Bindings>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Bindings {
    draw: gl::types::GLuint,
    read: gl::types::GLuint,
}

impl Bindings {
    fn current() -> Self {
        Self {
            draw: binding(gl::DRAW_FRAMEBUFFER_BINDING),
            read: binding(gl::READ_FRAMEBUFFER_BINDING),
        }
    }

    /// What has to be rebound after `id` was bound to both targets over `previous`.
    fn to_restore(previous: Option<Self>, id: gl::types::GLuint) -> Option<Self> {
        previous.filter(|previous| previous.draw != id || previous.read != id)
    }
}

fn binding(pname: gl::types::GLenum) -> gl::types::GLuint {
    let mut id = 0;
    unsafe { gl::GetIntegerv(pname, &mut id) };
    // names are never negative
    id as gl::types::GLuint
}

impl Framebuffer {
    /// Wrap whatever is bound as the draw framebuffer right now.
    pub fn detect() -> Self {
        let id = binding(gl::DRAW_FRAMEBUFFER_BINDING);
        tracing::trace!(fbo = id, "detected framebuffer");
        Self { id, previous: None }
    }
    /// Bind for both drawing and reading.
    pub fn use_(&mut self) {
        let previous = Bindings::current();
        unsafe { gl::BindFramebuffer(gl::FRAMEBUFFER, self.id) };
        self.previous.get_or_insert(previous);
    }
    /// Clear to `color`. With a `region`, only pixels inside it are touched.
    pub fn clear(&self, color: Rgba, region: Option<Viewport>) -> Result<()> {
        unsafe {
            if let Some(region) = region {
                gl::Enable(gl::SCISSOR_TEST);
                gl::Scissor(region.x, region.y, region.width, region.height);
            }
            gl::ClearColor(color.r, color.g, color.b, color.a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
            if region.is_some() {
                gl::Disable(gl::SCISSOR_TEST);
            }
        }
        check_error("glClear")
    }
    /// Read a single pixel back as floats.
    pub fn read_pixel(&self, x: i32, y: i32) -> Result<Rgba> {
        let mut rgba = [0f32; 4];
        unsafe {
            gl::ReadPixels(x, y, 1, 1, gl::RGBA, gl::FLOAT, rgba.as_mut_ptr().cast());
        }
        check_error("glReadPixels")?;
        let [r, g, b, a] = rgba;
        Ok(Rgba::new(r, g, b, a))
    }
    /// Give the draw and read bindings back to whatever had them before [`Framebuffer::use_`].
    ///
    /// When detect and use run back to back the draw binding is already ours,
    /// so usually only a differing read binding gets rebound.
    pub fn release(self) {
        let Some(previous) = Bindings::to_restore(self.previous, self.id) else {
            return;
        };
        unsafe {
            gl::BindFramebuffer(gl::DRAW_FRAMEBUFFER, previous.draw);
            gl::BindFramebuffer(gl::READ_FRAMEBUFFER, previous.read);
        }
    }
}
