use std::net::SocketAddr;

use tracing::{error, info};

use eventflow_api::{router, AppState};
use eventflow_infrastructure::database::connection;
use eventflow_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    eventflow_shared::telemetry::init_telemetry();

    info!("EventFlow server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to Database
    info!("Connecting to database...");
    let pool =
        connection::create_pool(&config.database.url, config.database.max_connections).await?;
    info!("Database connection established.");

    // Apply pending migrations
    sqlx::migrate!("../migrations").run(&pool).await?;

    // Build router
    let state = AppState::new(pool, &config);
    let app = router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
