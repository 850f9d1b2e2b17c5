//! Exports [`Program`].
use std::ffi::CStr;

use super::CompiledShader;
use crate::error::{RenderError, Result};

/// Wrapper for an OpenGL program.
///
/// <https://www.khronos.org/opengl/wiki/GLSL_Object#Program_objects>
pub struct Program {
    /// The internal OpenGL id for this object.
    id: gl::types::GLuint,
}

/// Necessary shaders to create a [`Program`].
pub struct ProgramArgs<'a> {
    /// A vertex shader.
    pub vert_shader: &'a CompiledShader,
    /// A fragment shader.
    pub frag_shader: &'a CompiledShader,
}

impl Program {
    /// Create a new program from a [`ProgramArgs`] struct.
    ///
    /// The shaders are detached again once linked, so they can be dropped right after.
    pub fn from_args(args: ProgramArgs<'_>) -> Result<Self> {
        let (program, success) = unsafe {
            let program = gl::CreateProgram();
            gl::AttachShader(program, args.vert_shader.id());
            gl::AttachShader(program, args.frag_shader.id());
            gl::LinkProgram(program);
            let mut success = 0;
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
            gl::DetachShader(program, args.vert_shader.id());
            gl::DetachShader(program, args.frag_shader.id());
            (program, success)
        };
        // dropping `ret` deletes the program on the error path too
        let ret = Self { id: program };
        if success != gl::TRUE.into() {
            return Err(RenderError::ShaderLink(ret.info_log()));
        }
        tracing::debug!(id = program, "linked program");
        Ok(ret)
    }
    /// Get the internal id of this program.
    pub fn id(&self) -> gl::types::GLuint {
        self.id
    }
    /// Make this the program used by subsequent draw calls.
    pub fn use_program(&self) {
        unsafe { gl::UseProgram(self.id) };
    }
    /// Get the location of an attrib in this program.
    pub fn get_attrib_location(&self, name: &CStr) -> Option<gl::types::GLuint> {
        let attrib_location = unsafe { gl::GetAttribLocation(self.id, name.as_ptr()) };
        // negative means not an active attribute
        attrib_location.try_into().ok()
    }

    fn info_log(&self) -> String {
        let mut capacity = 0;
        unsafe { gl::GetProgramiv(self.id, gl::INFO_LOG_LENGTH, &mut capacity) };
        let mut infolog: Vec<u8> = vec![0; capacity.max(1) as usize];
        let mut length = 0;
        unsafe {
            gl::GetProgramInfoLog(
                self.id,
                infolog.len() as gl::types::GLsizei,
                &mut length,
                infolog.as_mut_ptr().cast(),
            );
        }
        infolog.truncate(length.max(0) as usize);
        String::from_utf8_lossy(&infolog).trim_end().to_owned()
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) };
    }
}
