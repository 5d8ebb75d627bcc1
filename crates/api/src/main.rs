use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clubhub_api::bootstrap::ensure_admin;
use clubhub_api::config::ServerConfig;
use clubhub_api::router::build_app_router;
use clubhub_api::state::AppState;
use clubhub_api::storage::LocalBlobStore;
use clubhub_db::DbPool;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clubhub_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        upload_dir = %config.uploads.dir.display(),
        "Loaded server configuration"
    );

    let pool = prepare_database(&config).await;

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        blobs: Arc::new(LocalBlobStore::from_config(&config.uploads)),
    };
    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!(%addr, "Club backend listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Connect, migrate, and make sure the configured admin account exists.
/// Any failure here aborts startup.
async fn prepare_database(config: &ServerConfig) -> DbPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = clubhub_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    clubhub_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    clubhub_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database ready, migrations applied");

    match &config.bootstrap_admin {
        Some(admin) => {
            let admin_id = ensure_admin(&pool, admin)
                .await
                .expect("Failed to ensure bootstrap admin account");
            tracing::info!(admin_id, "Bootstrap admin ensured");
        }
        None => tracing::debug!("No bootstrap admin configured"),
    }
    pool
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
