use opengl_subscreens::{
    config::{HostConfig, SubscreenLayout},
    gpu::GlGpu,
    host::SdlHost,
    Render,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = HostConfig::default();
    let host = SdlHost::new(&config)?;

    let mut render: Render<GlGpu> = Render::new(SubscreenLayout::default());
    render.set_probe(tracing::enabled!(tracing::Level::DEBUG));

    let render = host.run(render)?;
    tracing::info!(frames = render.frame_count(), "exiting");
    Ok(())
}
