use clipdock_core::Config;

// Use mimalloc as the global allocator for better performance and lower
// fragmentation, especially when running on musl-based systems inside
// containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load a local .env if present, then configuration
    dotenvy::dotenv().ok();
    clipdock_api::telemetry::init_tracing();

    let config = Config::from_env()?;

    // Initialize the application (database, storage, services, routes)
    let (_state, router) = clipdock_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    clipdock_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
