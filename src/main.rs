use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Forward `log` records from wgpu and winit to tracing.
    tracing_log::LogTracer::init().expect("failed to initialize LogTracer");

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wgpu_core=warn,wgpu_hal=warn,naga=warn"));

    let stdout_subscriber = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(env_filter)
        .finish();
    tracing::subscriber::set_global_default(stdout_subscriber)
        .expect("failed to install stdout global tracing subscriber");

    orbiter::orbit_main(orbiter::settings::DemoSettings::default())
}
