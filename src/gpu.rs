//! The capabilities the renderer needs from a graphics context.
//!
//! [`GlGpu`] is the real thing. Tests drive the renderer through a software
//! implementation instead.
use std::{ffi::CStr, marker::PhantomData};

use sdl2::video::GLContext;

use crate::{
    config::{Rgba, Viewport},
    error::{RenderError, Result},
    gl_wrappers::{
        check_error, gl_set_viewport, Framebuffer, Program, ProgramArgs, Shader, VertexArray,
        VertexBuffer,
    },
    render_vec::{RenderVec, VertexLayout},
};

pub trait Gpu {
    /// A linked vertex + fragment program.
    type Program;
    /// Uploaded vertices together with their input binding.
    type Geometry;
    /// The surface's current render target, valid for one paint.
    type Target;

    /// Compile both stages and link them.
    fn build_program(&mut self, vert_source: &CStr, frag_source: &CStr) -> Result<Self::Program>;

    /// Upload `vertices` and bind them to `program`'s inputs.
    fn upload_geometry<V: VertexLayout>(
        &mut self,
        program: &Self::Program,
        vertices: &RenderVec<V>,
    ) -> Result<Self::Geometry>;

    /// Ask the host which target is active right now.
    fn detect_target(&mut self) -> Result<Self::Target>;

    fn use_target(&mut self, target: &mut Self::Target);

    /// Clear only the pixels inside `region`.
    fn clear_region(&mut self, target: &Self::Target, region: Viewport, color: Rgba)
        -> Result<()>;

    fn set_viewport(&mut self, region: Viewport);

    /// Draw all of `geometry` as a triangle list.
    fn draw_triangles(&mut self, program: &Self::Program, geometry: &Self::Geometry)
        -> Result<()>;

    fn read_pixel(&mut self, target: &Self::Target, x: i32, y: i32) -> Result<Rgba>;

    /// Drop the target's binding. The target can't be used afterwards.
    fn release_target(&mut self, target: Self::Target);
}

/// Vertex buffer plus the array object describing it.
pub struct GlGeometry {
    // declared first so the VAO goes before the buffer it references
    vao: VertexArray,
    vbo: VertexBuffer,
}

/// Raw OpenGL through the `gl` crate.
///
/// Holds no state, but it is `!Send` and `!Sync`: a GL context belongs to one thread.
pub struct GlGpu {
    _not_send: PhantomData<*const ()>,
}

impl GlGpu {
    /// Get a handle to `gl_ctx`, which the host must already have made current.
    pub fn current(gl_ctx: &GLContext) -> Result<Self> {
        if !gl_ctx.is_current() {
            return Err(RenderError::ContextNegotiation(
                "the GL context is not current on this thread".to_owned(),
            ));
        }
        Ok(Self {
            _not_send: PhantomData,
        })
    }
}

impl Gpu for GlGpu {
    type Program = Program;
    type Geometry = GlGeometry;
    type Target = Framebuffer;

    fn build_program(&mut self, vert_source: &CStr, frag_source: &CStr) -> Result<Program> {
        let vert_shader = Shader::vertex(vert_source).compile()?;
        let frag_shader = Shader::fragment(frag_source).compile()?;
        Program::from_args(ProgramArgs {
            vert_shader: &vert_shader,
            frag_shader: &frag_shader,
        })
    }

    fn upload_geometry<V: VertexLayout>(
        &mut self,
        program: &Program,
        vertices: &RenderVec<V>,
    ) -> Result<GlGeometry> {
        let vbo = VertexBuffer::new(vertices);
        let vao = VertexArray::new::<V>(program, &vbo)?;
        Ok(GlGeometry { vao, vbo })
    }

    fn detect_target(&mut self) -> Result<Framebuffer> {
        let target = Framebuffer::detect();
        check_error("glGetIntegerv(DRAW_FRAMEBUFFER_BINDING)")?;
        Ok(target)
    }

    fn use_target(&mut self, target: &mut Framebuffer) {
        target.use_();
    }

    fn clear_region(&mut self, target: &Framebuffer, region: Viewport, color: Rgba) -> Result<()> {
        target.clear(color, Some(region))
    }

    fn set_viewport(&mut self, region: Viewport) {
        gl_set_viewport(region);
    }

    fn draw_triangles(&mut self, program: &Program, geometry: &GlGeometry) -> Result<()> {
        let count = gl::types::GLsizei::try_from(geometry.vbo.vertex_count()).map_err(|_| {
            RenderError::Draw {
                call: "glDrawArrays",
                code: gl::INVALID_VALUE,
            }
        })?;
        program.use_program();
        geometry.vao.bind();
        unsafe { gl::DrawArrays(gl::TRIANGLES, 0, count) };
        VertexArray::unbind();
        check_error("glDrawArrays")
    }

    fn read_pixel(&mut self, target: &Framebuffer, x: i32, y: i32) -> Result<Rgba> {
        target.read_pixel(x, y)
    }

    fn release_target(&mut self, target: Framebuffer) {
        target.release();
    }
}
