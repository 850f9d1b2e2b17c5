//! Routes `KHR_debug` driver messages into the log.
use std::ffi::{c_char, c_void, CStr};

extern "system" fn gl_debug_output(
    source: gl::types::GLenum,
    output_type: gl::types::GLenum,
    id: gl::types::GLuint,
    severity: gl::types::GLenum,
    length: gl::types::GLsizei,
    message: *const c_char,
    _user_param: *mut c_void,
) {
    if message.is_null() {
        return;
    }
    // SAFETY:
    // the driver hands us `length` valid bytes, or a nul terminated string if negative.
    let message = unsafe {
        if length < 0 {
            CStr::from_ptr(message).to_string_lossy()
        } else {
            String::from_utf8_lossy(std::slice::from_raw_parts(
                message.cast::<u8>(),
                length as usize,
            ))
        }
    };
    match severity {
        gl::DEBUG_SEVERITY_HIGH => {
            tracing::error!(source, output_type, id, "GL: {message}")
        }
        gl::DEBUG_SEVERITY_MEDIUM => {
            tracing::warn!(source, output_type, id, "GL: {message}")
        }
        gl::DEBUG_SEVERITY_LOW => tracing::info!(source, output_type, id, "GL: {message}"),
        _ => tracing::trace!(source, output_type, id, "GL: {message}"),
    }
}

/// Install the debug message callback if the driver exposes one.
///
/// Returns whether it was installed. Core 3.3 does not guarantee `KHR_debug`.
pub fn install_debug_output() -> bool {
    if !gl::DebugMessageCallback::is_loaded() {
        return false;
    }
    unsafe {
        gl::Enable(gl::DEBUG_OUTPUT);
        gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
        gl::DebugMessageCallback(Some(gl_debug_output), std::ptr::null());
    }
    true
}
