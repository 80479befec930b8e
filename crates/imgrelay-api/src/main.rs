use imgrelay_core::Config;

// Use mimalloc as the global allocator for lower fragmentation under
// upload-heavy load, especially on musl-based container images.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, provider client, routes)
    let (_state, router) = imgrelay_api::setup::initialize_app(config.clone())?;

    // Start the server
    imgrelay_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
