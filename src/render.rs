//! The frame renderer: one triangle in one sub-screen, gray in the other.
use std::{
    ffi::CStr,
    io::{self, Write},
};

use crate::{
    config::{Rgba, SubscreenLayout},
    error::{RenderError, Result},
    gpu::Gpu,
    render_vec::RenderVec,
    vertex::TRIANGLE,
};

macro_rules! include_cstr {
    ( $path:literal $(,)? ) => {{
        // Use a constant to force the verification to run at compile time.
        const VALUE: &'static ::core::ffi::CStr = match ::core::ffi::CStr::from_bytes_with_nul(
            concat!(include_str!($path), "\0").as_bytes(),
        ) {
            Ok(value) => value,
            Err(_) => panic!(concat!("interior NUL byte(s) in `", $path, "`")),
        };
        VALUE
    }};
}

pub const FRAG_SHADER_SOURCE: &CStr = include_cstr!("../glsl/frag_shader.glsl");
pub const VERT_SHADER_SOURCE: &CStr = include_cstr!("../glsl/vert_shader.glsl");

enum State<G: Gpu> {
    Uninitialized,
    Ready {
        program: G::Program,
        geometry: G::Geometry,
    },
}

pub struct Render<G: Gpu> {
    layout: SubscreenLayout,
    state: State<G>,
    /// Completed paints so far.
    frame_count: u64,
    /// Sample each sub-screen after drawing and log it.
    probe: bool,
    /// Where `Initial clearing` and `Frame #` lines go.
    diagnostics: Box<dyn Write>,
}

impl<G: Gpu> Render<G> {
    /// A renderer reporting to stdout.
    pub fn new(layout: SubscreenLayout) -> Self {
        Self::with_diagnostics(layout, Box::new(io::stdout()))
    }

    pub fn with_diagnostics(layout: SubscreenLayout, diagnostics: Box<dyn Write>) -> Self {
        Self {
            layout,
            state: State::Uninitialized,
            frame_count: 0,
            probe: false,
            diagnostics,
        }
    }

    pub fn set_probe(&mut self, probe: bool) {
        self.probe = probe;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready { .. })
    }

    /// Build the program and upload the triangle.
    ///
    /// `gpu` must wrap the context the host already made current.
    /// Calling this again once ready does nothing.
    pub fn setup(&mut self, gpu: &mut G) -> Result<()> {
        if self.is_ready() {
            tracing::warn!("renderer is already set up, ignoring");
            return Ok(());
        }
        let program = gpu.build_program(VERT_SHADER_SOURCE, FRAG_SHADER_SOURCE)?;
        let vertices = RenderVec::from_slice(&TRIANGLE);
        let geometry = gpu.upload_geometry(&program, &vertices)?;

        // stay uninitialized unless the whole setup went through
        writeln!(self.diagnostics, "Initial clearing to 0.")?;
        self.diagnostics.flush()?;
        self.state = State::Ready { program, geometry };
        tracing::info!("renderer ready");
        Ok(())
    }

    /// Draw one frame into whatever target the host has active.
    ///
    /// Returns the number of the frame just painted, starting at 0.
    pub fn paint(&mut self, gpu: &mut G) -> Result<u64> {
        let State::Ready { program, geometry } = &self.state else {
            return Err(RenderError::NotReady);
        };

        let mut target = gpu.detect_target()?;
        gpu.use_target(&mut target);
        let drawn = Self::draw_subscreens(gpu, &target, program, geometry, &self.layout)
            .and_then(|()| {
                if self.probe {
                    Self::probe_subscreens(gpu, &target, &self.layout)
                } else {
                    Ok(())
                }
            });
        gpu.release_target(target);
        drawn?;

        let frame = self.frame_count;
        writeln!(self.diagnostics, "Frame # {frame}")?;
        self.diagnostics.flush()?;
        self.frame_count += 1;
        Ok(frame)
    }

    fn draw_subscreens(
        gpu: &mut G,
        target: &G::Target,
        program: &G::Program,
        geometry: &G::Geometry,
        layout: &SubscreenLayout,
    ) -> Result<()> {
        gpu.clear_region(target, layout.clear_region(), layout.clear_color())?;
        gpu.set_viewport(layout.draw_region());
        gpu.draw_triangles(program, geometry)
    }

    fn probe_subscreens(gpu: &mut G, target: &G::Target, layout: &SubscreenLayout) -> Result<()> {
        for (index, subscreen) in layout.subscreens().iter().enumerate() {
            let (x, y) = subscreen.center();
            let Rgba { r, g, b, a } = gpu.read_pixel(target, x, y)?;
            tracing::debug!(index, x, y, r, g, b, a, "sub-screen probe");
        }
        Ok(())
    }
}
