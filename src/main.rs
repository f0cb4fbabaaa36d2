//! statusd binary entry point

use statusd::{AppState, auth, config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application entry point
///
/// # Setup
/// 1. Load configuration from file and environment
/// 2. Initialize tracing/logging from `logging.*`
/// 3. Initialize metrics
/// 4. Build AppState and router
/// 5. Start HTTP server
///
/// `statusd token` prints a signed admin session token and exits.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration
    let config = config::AppConfig::load()?;

    // 2. Initialize tracing/logging; RUST_LOG overrides logging.level
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.filter_directive().into());

    if config.logging.is_json() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }

    if std::env::args().nth(1).as_deref() == Some("token") {
        let session = auth::Session::admin(
            config.auth.admin_username.clone(),
            config.auth.session_max_age,
        );
        println!(
            "{}",
            auth::create_session_token(&session, &config.auth.session_secret)?
        );
        return Ok(());
    }

    tracing::info!("Starting statusd...");

    // 3. Initialize metrics
    statusd::metrics::init_metrics()?;

    tracing::info!(
        addr = %config.server.bind_addr(),
        default_limit = config.pagination.default_limit,
        "Configuration loaded"
    );

    // 4. Initialize application state
    let addr = config.server.bind_addr();
    let state = AppState::new(config);
    let app = statusd::build_router(state);

    // 5. Start HTTP server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
