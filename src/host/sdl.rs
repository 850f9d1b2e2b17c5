//! SDL2 window + OpenGL context, and the event loop that drives painting.
use sdl2::{
    event::{Event, WindowEvent},
    video::{self, GLContext, GLProfile},
    EventPump, Sdl, VideoSubsystem,
};

use super::{HostError, Lifecycle, SurfaceClient};
use crate::{
    config::HostConfig,
    error::RenderError,
    gl_wrappers::{self, ContextInfo},
    gpu::GlGpu,
};

pub struct SdlHost {
    // dropped before the window it was created for
    gl_ctx: GLContext,
    window: video::Window,
    window_id: u32,
    event_pump: EventPump,
    _video_ctx: VideoSubsystem,
    _sdl_ctx: Sdl,
    abort_on_paint_error: bool,
}

fn negotiation(config: &HostConfig, reason: impl std::fmt::Display) -> HostError {
    HostError::Render(RenderError::ContextNegotiation(format!(
        "OpenGL {}.{} core: {reason}",
        config.gl_major, config.gl_minor
    )))
}

impl SdlHost {
    /// Open the window and make an OpenGL core context current on this thread.
    pub fn new(config: &HostConfig) -> Result<Self, HostError> {
        if config.default_interrupt && !sdl2::hint::set("SDL_NO_SIGNAL_HANDLERS", "1") {
            tracing::warn!("could not keep SDL away from SIGINT");
        }
        let sdl_ctx = sdl2::init().map_err(HostError::Sdl)?;

        let video_ctx = sdl_ctx.video().map_err(HostError::Sdl)?;
        video_ctx
            .gl_load_library_default()
            .map_err(|e| negotiation(config, e))?;

        let gl_attr = video_ctx.gl_attr();
        if config.debug_context {
            gl_attr.set_context_flags().forward_compatible().debug().set();
        } else {
            gl_attr.set_context_flags().forward_compatible().set();
        }
        gl_attr.set_context_version(config.gl_major, config.gl_minor);
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_double_buffer(true);

        let window = video_ctx
            .window(&config.title, config.width, config.height)
            .position(config.x, config.y)
            .opengl()
            .build()
            .map_err(|e| negotiation(config, e))?;

        let gl_ctx = window
            .gl_create_context()
            .map_err(|e| negotiation(config, e))?;
        window
            .gl_make_current(&gl_ctx)
            .map_err(|e| negotiation(config, e))?;
        gl::load_with(|s| video_ctx.gl_get_proc_address(s).cast());

        // SDL's attribute getters echo the request, so ask the context itself
        let got = ContextInfo::query();
        got.satisfies(config.gl_major, config.gl_minor)
            .map_err(|reason| negotiation(config, reason))?;
        tracing::info!(major = got.major, minor = got.minor, "OpenGL core context ready");

        if config.debug_context && !gl_wrappers::install_debug_output() {
            tracing::debug!("glDebugMessageCallback unavailable, driver messages stay silent");
        }

        let event_pump = sdl_ctx.event_pump().map_err(HostError::Sdl)?;
        let window_id = window.id();
        Ok(Self {
            gl_ctx,
            window,
            window_id,
            event_pump,
            _video_ctx: video_ctx,
            _sdl_ctx: sdl_ctx,
            abort_on_paint_error: config.abort_on_paint_error,
        })
    }

    /// Run `client` until the window closes.
    ///
    /// Painting only happens when SDL says the window needs it; nothing here redraws on a timer.
    pub fn run<C: SurfaceClient<GlGpu>>(mut self, client: C) -> Result<C, HostError> {
        let mut gpu = GlGpu::current(&self.gl_ctx)?;
        let mut lifecycle = Lifecycle::new(client);
        lifecycle.surface_ready(&mut gpu)?;

        loop {
            match self.event_pump.wait_event() {
                Event::Quit { .. } => break,
                Event::Window {
                    window_id,
                    win_event,
                    ..
                } if window_id == self.window_id => match win_event {
                    WindowEvent::Shown | WindowEvent::Exposed | WindowEvent::Restored => {
                        self.paint(&mut lifecycle, &mut gpu)?;
                    }
                    WindowEvent::Close => break,
                    _ => {}
                },
                _ => {}
            }
        }
        tracing::info!("window closed");
        Ok(lifecycle.into_client())
    }

    fn paint<C: SurfaceClient<GlGpu>>(
        &self,
        lifecycle: &mut Lifecycle<C>,
        gpu: &mut GlGpu,
    ) -> Result<(), HostError> {
        lifecycle.paint_or_log(gpu, self.abort_on_paint_error)?;
        self.window.gl_swap_window();
        Ok(())
    }
}
