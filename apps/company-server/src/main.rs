use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use company_api::{router, AppState};
use company_core::i18n::{Locale, MessageLookup};
use company_core::repositories::CompanyStore;
use company_infrastructure::{
    create_pool, run_migrations, BundleMessageSource, InMemoryCompanyRepository, PgCompanyRepository,
};
use company_shared::config::{AppConfig, DatabaseSettings, StorageBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (.env, config/*.toml, environment)
    let config = AppConfig::load().context("failed to load configuration")?;

    // Initialize telemetry; the guard flushes file logs on exit
    let _log_guard = company_shared::telemetry::init_telemetry(&config.logging)?;

    info!("{} starting (env={})", config.app.name, config.app.env);

    let store = connect_store(&config.database).await?;

    let default_locale = Locale::new(&config.i18n.default_locale);
    let messages: Arc<dyn MessageLookup> = Arc::new(
        BundleMessageSource::embedded(&default_locale).context("failed to load message bundles")?,
    );

    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));

    if config.app.demo_endpoints {
        info!("Message demo endpoints enabled under /messages");
    }

    let app = router(AppState::new(config, store, messages));

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn connect_store(settings: &DatabaseSettings) -> anyhow::Result<Arc<dyn CompanyStore>> {
    match settings.backend {
        StorageBackend::Memory => {
            info!("Using in-memory company store");
            Ok(Arc::new(InMemoryCompanyRepository::new()))
        }
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let pool = create_pool(settings)
                .await
                .context("failed to connect to database")?;
            info!("Database connection established.");

            if settings.run_migrations {
                run_migrations(&pool).await.context("failed to run migrations")?;
                info!("Migrations applied.");
            }

            Ok(Arc::new(PgCompanyRepository::new(pool)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
