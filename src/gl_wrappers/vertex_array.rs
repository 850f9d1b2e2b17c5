//! Exports [`VertexArray`].
use std::ffi::c_void;

use super::{Program, VertexBuffer};
use crate::{
    error::{RenderError, Result},
    render_vec::VertexLayout,
};

/// A vertex array object binding one [`VertexBuffer`] to a program's inputs.
pub struct VertexArray {
    id: gl::types::GLuint,
}

impl VertexArray {
    /// Describe `buffer` to `program` using the attributes of `V`.
    ///
    /// # Errors
    /// Errors if one of `V`'s attributes is not an active input of `program`.
    pub fn new<V: VertexLayout>(program: &Program, buffer: &VertexBuffer) -> Result<Self> {
        let mut locations = Vec::with_capacity(V::ATTRIBUTES.len());
        for (attribute, offset) in V::offsets() {
            let location = program.get_attrib_location(attribute.name).ok_or_else(|| {
                RenderError::MissingAttribute(attribute.name.to_string_lossy().into_owned())
            })?;
            locations.push((location, attribute, offset));
        }
        let stride = V::stride() as gl::types::GLsizei;

        let mut id = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut id);
            // bind the Vertex Array Object first, then bind and set vertex buffers, and then configure attributes
            gl::BindVertexArray(id);
            gl::BindBuffer(gl::ARRAY_BUFFER, buffer.id());
            for (location, attribute, offset) in locations {
                gl::VertexAttribPointer(
                    location,
                    attribute.components as gl::types::GLint,
                    attribute.gl_type.gl_enum(),
                    gl::FALSE,
                    stride,
                    offset as *const c_void,
                );
                gl::EnableVertexAttribArray(location);
            }
            // reset bound arrays
            gl::BindVertexArray(0);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }
        tracing::debug!(vao = id, vbo = buffer.id(), "bound vertex layout");
        Ok(Self { id })
    }
    pub fn bind(&self) {
        unsafe { gl::BindVertexArray(self.id) };
    }
    pub fn unbind() {
        unsafe { gl::BindVertexArray(0) };
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe { gl::DeleteVertexArrays(1, &self.id) };
    }
}
