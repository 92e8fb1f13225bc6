use std::sync::Arc;

use tpsl_dashboard::config::DatabaseConfig;
use tpsl_dashboard::database::repositories::{
    InMemoryTpslRepository, TpslRepository, TpslRepositoryImpl,
};
use tpsl_dashboard::database::{establish_connection_pool, get_connection, run_pending_migrations};
use tpsl_dashboard::market_data::YahooChartClient;
use tpsl_dashboard::{create_router, AppConfig, AppState, TpslService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file (if present)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tpsl_dashboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Database is optional - falls back to an in-memory store
    let repository = match &config.database {
        Some(database) => initialize_database(database)?,
        None => {
            tracing::warn!("⚠️  DATABASE_URL not set, TP/SL orders are kept in memory only");
            Arc::new(InMemoryTpslRepository::new()) as Arc<dyn TpslRepository>
        }
    };

    let market_data = Arc::new(YahooChartClient::new(&config.market_data)?);
    tracing::info!(
        "📈 Market data: {} ({} days of {} bars)",
        config.market_data.base_url,
        config.market_data.lookback_days,
        config.market_data.interval
    );

    let app = create_router(AppState {
        service: Arc::new(TpslService::new(repository)),
        market_data,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    tracing::info!("🚀 TP/SL Dashboard API running on http://{}", config.bind_addr);
    tracing::info!("📊 Health check: http://{}/health", config.bind_addr);
    tracing::info!("📚 Swagger UI: http://{}/swagger-ui", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Connect to PostgreSQL and build the TP/SL repository
fn initialize_database(
    database: &DatabaseConfig,
) -> Result<Arc<dyn TpslRepository>, Box<dyn std::error::Error>> {
    tracing::info!("🗄️  Initializing PostgreSQL connection...");

    let pool = establish_connection_pool(database)?;

    if database.run_migrations {
        run_pending_migrations(&pool)?;
    }

    let repository = TpslRepositoryImpl::new(move || get_connection(&pool));

    tracing::info!("✅ Database integration complete");
    Ok(Arc::new(repository))
}
