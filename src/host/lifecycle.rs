//! Setup-then-paint ordering, independent of any windowing library.
use crate::{error::Result, gpu::Gpu, render::Render};

/// Callbacks a surface host drives.
pub trait SurfaceClient<G: Gpu> {
    /// One-time initialisation. The context is current.
    fn setup(&mut self, gpu: &mut G) -> Result<()>;
    /// Redraw the surface contents.
    fn paint(&mut self, gpu: &mut G) -> Result<()>;
}

impl<G: Gpu> SurfaceClient<G> for Render<G> {
    fn setup(&mut self, gpu: &mut G) -> Result<()> {
        Render::setup(self, gpu)
    }
    fn paint(&mut self, gpu: &mut G) -> Result<()> {
        Render::paint(self, gpu).map(|_| ())
    }
}

/// Makes sure a client is set up exactly once and before its first paint.
pub struct Lifecycle<C> {
    client: C,
    ready: bool,
}

impl<C> Lifecycle<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            ready: false,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn into_client(self) -> C {
        self.client
    }

    /// The drawing surface can take GPU calls now.
    pub fn surface_ready<G: Gpu>(&mut self, gpu: &mut G) -> Result<()>
    where
        C: SurfaceClient<G>,
    {
        if !self.ready {
            self.client.setup(gpu)?;
            self.ready = true;
        }
        Ok(())
    }

    /// The host wants the surface redrawn.
    pub fn paint_requested<G: Gpu>(&mut self, gpu: &mut G) -> Result<()>
    where
        C: SurfaceClient<G>,
    {
        self.surface_ready(gpu)?;
        self.client.paint(gpu)
    }

    /// [`Lifecycle::paint_requested`], with the host's failure policy applied.
    ///
    /// Setup errors always come back. Paint errors come back when `abort_on_error`
    /// is set and are only logged otherwise.
    pub fn paint_or_log<G: Gpu>(&mut self, gpu: &mut G, abort_on_error: bool) -> Result<()>
    where
        C: SurfaceClient<G>,
    {
        self.surface_ready(gpu)?;
        match self.client.paint(gpu) {
            Err(err) if !abort_on_error => {
                tracing::error!(%err, "paint failed");
                Ok(())
            }
            painted => painted,
        }
    }
}
