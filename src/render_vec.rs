//! Typed byte buffers of vertices, ready to hand to `glBufferData`.
use std::{ffi::CStr, ffi::c_void, marker::PhantomData};

use bytemuck::Pod;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlType {
    Float,  // f32
    Double, // f64
}

impl GlType {
    pub const fn get_size(&self) -> usize {
        match *self {
            GlType::Double => std::mem::size_of::<f64>(),
            GlType::Float => std::mem::size_of::<f32>(),
        }
    }

    /// The matching `GLenum` for `glVertexAttribPointer`.
    pub const fn gl_enum(&self) -> gl::types::GLenum {
        match *self {
            GlType::Double => gl::DOUBLE,
            GlType::Float => gl::FLOAT,
        }
    }
}

/// One named input of the vertex stage.
#[derive(Clone, Copy, Debug)]
pub struct VertexAttribute {
    /// Name of the `in` variable in the vertex shader.
    pub name: &'static CStr,
    pub gl_type: GlType,
    /// Number of `gl_type` components, 1 to 4.
    pub components: usize,
}

impl VertexAttribute {
    pub const fn byte_size(&self) -> usize {
        self.gl_type.get_size() * self.components
    }
}

/// Describes how a vertex type maps onto vertex shader inputs.
///
/// # Safety
/// `ATTRIBUTES` must describe the byte layout of `Self` exactly, in field order.
/// If it lists one attribute of 2 Floats, `Self` must be exactly 2 packed f32s.
pub unsafe trait VertexLayout: Pod {
    const ATTRIBUTES: &'static [VertexAttribute];

    /// Bytes between consecutive vertices.
    fn stride() -> usize {
        Self::ATTRIBUTES.iter().map(VertexAttribute::byte_size).sum()
    }

    /// Byte offset of each attribute from the start of a vertex.
    fn offsets() -> impl Iterator<Item = (VertexAttribute, usize)> {
        Self::ATTRIBUTES.iter().scan(0, |offset, attribute| {
            let this = *offset;
            *offset += attribute.byte_size();
            Some((*attribute, this))
        })
    }
}

#[derive(Clone)]
pub struct RenderVec<LayoutT: VertexLayout> {
    inner: Vec<u8>,
    stride: usize,
    _phantom: PhantomData<LayoutT>,
}

impl<LayoutT: VertexLayout> Default for RenderVec<LayoutT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<LayoutT: VertexLayout> RenderVec<LayoutT> {
    pub fn new() -> Self {
        Self {
            inner: vec![],
            stride: LayoutT::stride(),
            _phantom: PhantomData,
        }
    }
    pub fn from_slice(slice: &[LayoutT]) -> Self {
        let mut ret = Self::new();
        ret.extend_from_slice(slice);
        ret
    }
    pub fn push(&mut self, value: LayoutT) {
        self.inner.extend_from_slice(bytemuck::bytes_of(&value));
    }
    pub fn extend_from_slice(&mut self, slice: &[LayoutT]) {
        self.inner.extend_from_slice(bytemuck::cast_slice(slice));
    }
    pub fn stride(&self) -> usize {
        self.stride
    }
    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.inner.len() / self.stride
    }
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }
    /// Vertices read back as their Rust type.
    pub fn vertices(&self) -> &[LayoutT] {
        bytemuck::cast_slice(&self.inner)
    }
    pub fn gl_byte_size(&self) -> gl::types::GLsizeiptr {
        // a Vec never holds more than isize::MAX bytes
        self.inner.len() as gl::types::GLsizeiptr
    }
    pub fn gl_data(&self) -> *const c_void {
        self.inner.as_ptr().cast()
    }
}
