use std::sync::Arc;

use reelmatch_api::{
    config::Config,
    db::{self, Cache},
    routes::{create_router, AppState},
    services::{
        catalog::{CachedCatalog, CatalogProvider, TmdbCatalog},
        history::PgHistoryStore,
        RecommendationService, RecommendationSettings,
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reelmatch_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let db_pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database connected and migrated");

    let tmdb: Arc<dyn CatalogProvider> = Arc::new(TmdbCatalog::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.tmdb_language.clone(),
    ));

    let (catalog, cache_writer) = if config.cache_enabled {
        let redis_client = db::create_redis_client(&config.redis_url)?;
        let (cache, handle) = Cache::new(redis_client);
        let catalog: Arc<dyn CatalogProvider> = Arc::new(CachedCatalog::new(
            tmdb,
            cache,
            config.tmdb_language.clone(),
        ));
        (catalog, Some(handle))
    } else {
        tracing::warn!("Catalog cache disabled");
        (tmdb, None)
    };

    let recommender = RecommendationService::new(
        catalog,
        Arc::new(PgHistoryStore::new(db_pool)),
        RecommendationSettings {
            fallback_when_empty: config.fallback_when_empty,
            ..Default::default()
        },
    );

    let app = create_router(AppState::new(recommender));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_writer {
        handle.shutdown().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
