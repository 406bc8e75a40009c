mod api;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};
use leadqual_engine::GroqClassifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = leadqual_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = leadqual_db::PoolConfig::from_app_config(&config);
    let pool = leadqual_db::connect_pool(&config.database_url, pool_config).await?;
    leadqual_db::run_migrations(&pool).await?;

    // One classifier for the process lifetime; the underlying reqwest client
    // pools its connections.
    let classifier = Arc::new(GroqClassifier::from_app_config(&config)?);

    let app = build_app(AppState { pool, classifier });

    tracing::info!(addr = %config.bind_addr, model = %config.groq_model, "starting leadqual server");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
