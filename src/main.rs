// src/main.rs

use dotenvy::dotenv;
use mock_test_api::config::Config;
use mock_test_api::db::{Store, postgres::PgStore, seed::seed_sample_questions};
use mock_test_api::routes;
use mock_test_api::services::report::ReportGenerator;
use mock_test_api::state::AppState;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Initialize Database Pool with Retry
    let mut retry_count = 0;
    let pool = loop {
        match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
        {
            Ok(pool) => break pool,
            Err(e) => {
                retry_count += 1;
                if retry_count > 5 {
                    panic!("Failed to connect to database after 5 retries: {}", e);
                }
                tracing::warn!("Database not ready, retrying in 2s... (Attempt {})", retry_count);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    };

    tracing::info!("Database connected...");

    // Run Migrations Automatically
    tracing::info!("Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations applied successfully.");

    let store: Store = Arc::new(PgStore::new(pool));

    // Seed the sample question bank
    if config.seed_sample_questions {
        match seed_sample_questions(store.as_ref()).await {
            Ok(0) => tracing::info!("Question bank already populated, skipping seed."),
            Ok(n) => tracing::info!("Inserted {} sample questions.", n),
            Err(e) => tracing::error!("Failed to seed sample questions: {:?}", e),
        }
    }

    let reports = ReportGenerator::from_config(&config).expect("Failed to build report HTTP client");
    let providers = reports.providers();
    if providers.is_empty() {
        tracing::info!("No report provider configured, using the offline template.");
    } else {
        tracing::info!("Report providers: {:?}", providers);
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));

    // Create AppState
    let state = AppState {
        store,
        reports: Arc::new(reports),
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listening address");

    // Start the server
    axum::serve(listener, app).await.expect("Server error");
}
