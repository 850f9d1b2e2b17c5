//! Exports [`VertexBuffer`].
use crate::render_vec::{RenderVec, VertexLayout};

/// A GPU-resident array buffer holding vertices that never change.
pub struct VertexBuffer {
    id: gl::types::GLuint,
    /// Number of vertices uploaded.
    len: usize,
}

impl VertexBuffer {
    /// Upload `vertices` with `STATIC_DRAW` usage.
    pub fn new<V: VertexLayout>(vertices: &RenderVec<V>) -> Self {
        let mut id = 0;
        unsafe {
            gl::GenBuffers(1, &mut id);
            gl::BindBuffer(gl::ARRAY_BUFFER, id);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                vertices.gl_byte_size(),
                vertices.gl_data(),
                gl::STATIC_DRAW,
            );
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }
        tracing::debug!(vbo = id, vertices = vertices.len(), "uploaded vertex buffer");
        Self {
            id,
            len: vertices.len(),
        }
    }
    pub fn id(&self) -> gl::types::GLuint {
        self.id
    }
    pub fn vertex_count(&self) -> usize {
        self.len
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &self.id) };
    }
}
