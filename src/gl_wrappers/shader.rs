//! Exports [`Shader`] and [`CompiledShader`].
use std::{ffi::CStr, fmt, ptr::null};

use crate::error::{RenderError, Result};

/// An uncompiled OpenGL shader.
/// Contains the source code necessary to compile it.
pub struct Shader<'src> {
    /// GL ID for this shader.
    inner: gl::types::GLuint,
    /// The source code for this shader.
    source: &'src CStr,
    shader_type: ShaderType,
    /// Was this shader handed off to a [`CompiledShader`]
    was_compiled: bool,
}

/// Represents the type of a shader object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderType {
    /// This shader is a Fragment shader.
    Fragment,
    /// This shader is a Vertex shader.
    Vertex,
}

impl fmt::Display for ShaderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderType::Fragment => f.write_str("fragment"),
            ShaderType::Vertex => f.write_str("vertex"),
        }
    }
}

impl<'src> Shader<'src> {
    /// Wrap shader source code into a type-safe Rust struct.
    pub fn new(shader_type: ShaderType, source: &'src CStr) -> Self {
        let shader = unsafe {
            match shader_type {
                ShaderType::Fragment => gl::CreateShader(gl::FRAGMENT_SHADER),
                ShaderType::Vertex => gl::CreateShader(gl::VERTEX_SHADER),
            }
        };
        Self {
            inner: shader,
            source,
            shader_type,
            was_compiled: false,
        }
    }
    /// Helper function for `Shader::new()` with vertex shaders.
    pub fn vertex(source: &'src CStr) -> Self {
        Self::new(ShaderType::Vertex, source)
    }
    /// Helper function for `Shader::new()` with fragment shaders.
    pub fn fragment(source: &'src CStr) -> Self {
        Self::new(ShaderType::Fragment, source)
    }

    /// Compile this shader.
    ///
    /// Returns a [`CompiledShader`], for use in [`Program`](super::Program)s.
    ///
    /// # Errors
    /// Errors if compilation was unsuccessful, with the response from OpenGL.
    pub fn compile(mut self) -> Result<CompiledShader> {
        let success = unsafe {
            gl::ShaderSource(self.inner, 1, &self.source.as_ptr(), null());
            gl::CompileShader(self.inner);

            let mut success = 0;
            gl::GetShaderiv(self.inner, gl::COMPILE_STATUS, &mut success);
            success
        };
        if success != gl::TRUE.into() {
            return Err(RenderError::ShaderCompile {
                stage: self.shader_type,
                log: shader_info_log(self.inner),
            });
        }
        self.was_compiled = true;
        tracing::debug!(id = self.inner, stage = %self.shader_type, "compiled shader");
        // Safety: COMPILE_STATUS was just checked
        unsafe { Ok(CompiledShader::new_unchecked(self.inner)) }
    }
}

fn shader_info_log(shader: gl::types::GLuint) -> String {
    let mut capacity = 0;
    unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut capacity) };
    let mut infolog: Vec<u8> = vec![0; capacity.max(1) as usize];
    let mut length = 0;
    unsafe {
        gl::GetShaderInfoLog(
            shader,
            infolog.len() as gl::types::GLsizei,
            &mut length,
            infolog.as_mut_ptr().cast(),
        );
    }
    infolog.truncate(length.max(0) as usize);
    String::from_utf8_lossy(&infolog).trim_end().to_owned()
}

impl Drop for Shader<'_> {
    fn drop(&mut self) {
        unsafe {
            if !self.was_compiled {
                gl::DeleteShader(self.inner);
            }
        }
    }
}
impl Drop for CompiledShader {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteShader(self.id);
        };
    }
}
/// A compiled shader object.
/// This can be linked and used in [`Program`](super::Program)s.
pub struct CompiledShader {
    /// GL ID for this compiled shader.
    id: gl::types::GLuint,
}

impl CompiledShader {
    /// Create a new CompiledShader from the GL ID of a compiled shader.
    ///
    /// # Safety
    /// The uint passed into this function MUST name a shader that compiled successfully.
    /// Otherwise, using this struct is undefined behaviour!
    pub unsafe fn new_unchecked(shader: gl::types::GLuint) -> Self {
        Self { id: shader }
    }
    /// Get the internal GL ID of this shader.
    pub fn id(&self) -> gl::types::GLuint {
        self.id
    }
}
