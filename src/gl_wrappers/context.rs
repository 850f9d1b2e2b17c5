//! Exports [`ContextInfo`].

/// What the driver actually created, read back from the current context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContextInfo {
    pub major: i32,
    pub minor: i32,
    /// `CONTEXT_CORE_PROFILE_BIT` is set in `CONTEXT_PROFILE_MASK`.
    pub core: bool,
}

impl ContextInfo {
    /// Query the current context. `gl::load_with` must have run.
    pub fn query() -> Self {
        let (mut major, mut minor, mut mask) = (0, 0, 0);
        unsafe {
            gl::GetIntegerv(gl::MAJOR_VERSION, &mut major);
            gl::GetIntegerv(gl::MINOR_VERSION, &mut minor);
            gl::GetIntegerv(gl::CONTEXT_PROFILE_MASK, &mut mask);
        }
        Self {
            major,
            minor,
            core: (mask as gl::types::GLuint) & gl::CONTEXT_CORE_PROFILE_BIT != 0,
        }
    }

    /// Does this context cover a request for `major.minor` core?
    ///
    /// # Errors
    /// Describes the shortfall when it does not.
    pub fn satisfies(&self, major: u8, minor: u8) -> Result<(), String> {
        if (self.major, self.minor) < (i32::from(major), i32::from(minor)) {
            return Err(format!("driver only gave {}.{}", self.major, self.minor));
        }
        if !self.core {
            return Err(format!(
                "driver gave {}.{} without the core profile",
                self.major, self.minor
            ));
        }
        Ok(())
    }
}
