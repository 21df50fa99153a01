use anyhow::Result;
use category_catalog::application::{
    ports::{time::Clock, util::SlugGenerator},
    services::ApplicationServices,
};
use category_catalog::config::AppConfig;
use category_catalog::domain::category::{CategoryReadRepository, CategoryWriteRepository};
use category_catalog::infrastructure::{
    database,
    repositories::{PostgresCategoryReadRepository, PostgresCategoryWriteRepository},
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use category_catalog::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(
        config.database_url(),
        config.database_max_connections(),
        config.storage_timeout(),
    )
    .await?;
    database::run_migrations(&pool).await?;

    let category_write_repo: Arc<dyn CategoryWriteRepository> = Arc::new(
        PostgresCategoryWriteRepository::new(pool.clone(), config.storage_timeout()),
    );
    let category_read_repo: Arc<dyn CategoryReadRepository> = Arc::new(
        PostgresCategoryReadRepository::new(pool.clone(), config.storage_timeout()),
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);

    let services = Arc::new(ApplicationServices::new(
        Arc::clone(&category_write_repo),
        Arc::clone(&category_read_repo),
        Arc::clone(&clock),
        Arc::clone(&slugger),
    ));

    let state = HttpState {
        services: Arc::clone(&services),
    };

    let app = build_router(state, config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
