use station_directory::config::ServerConfig;
use station_directory::stations::{StationClient, StationDirectory};
use station_directory::web::{AppState, create_router};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // RUST_LOG takes precedence, fallback to info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };

    let client = match StationClient::new(config.client_config()) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to create station client");
            std::process::exit(1);
        }
    };

    // Load the station list in the background; pages show a loading notice until it lands
    let directory = StationDirectory::new(client);
    let initial_load = directory.clone();
    tokio::spawn(async move {
        // Failures are logged and recorded by the directory itself
        if let Ok(count) = initial_load.load().await {
            info!(stations = count, "initial station load finished");
        }
    });

    let state = AppState::new(directory, config.map_base_url.clone());
    let app = create_router(state, &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(
        addr = %config.bind_addr,
        dataset = %config.dataset_url,
        static_dir = %config.static_dir.display(),
        "station directory listening"
    );

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        std::process::exit(1);
    }
}
