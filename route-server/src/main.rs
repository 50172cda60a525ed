use route_server::cache::{CacheConfig, ResolutionCache};
use route_server::config::ServerConfig;
use route_server::dataset::{DatasetClient, DatasetClientConfig, DatasetSource};
use route_server::query::{Keywords, QueryParser};
use route_server::snapshot::SnapshotStore;
use route_server::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,route_server=debug")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let source = match &config.data_url {
        Some(url) => {
            let mut client_config = DatasetClientConfig::new(url);
            if let Some(key) = &config.data_api_key {
                client_config = client_config.with_api_key(key);
            } else {
                warn!("ROUTE_DATA_API_KEY not set, remote requests are unauthenticated");
            }
            DatasetSource::remote(DatasetClient::new(client_config)?, &config.currency)
        }
        None => DatasetSource::file(&config.data_file, &config.currency),
    };

    // Fail fast if the first load is unusable
    info!(source = %source.describe(), "loading dataset");
    let snapshots = SnapshotStore::open(source).await?;
    {
        let snapshot = snapshots.current().await;
        info!(
            landmarks = snapshot.index.len(),
            routes = snapshot.routes.len(),
            issues = snapshot.integrity_issues.len(),
            "dataset loaded"
        );
    }

    let cache = ResolutionCache::new(&CacheConfig::default());
    let parser = QueryParser::new(Keywords::default())?;
    let state = AppState::new(snapshots.clone(), cache, config.resolver.clone(), parser);

    if let Some(period) = config.refresh_interval {
        let snapshots = snapshots.clone();
        let cache = state.cache.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                // Failures are logged by the store
                if let Ok(generation) = snapshots.refresh().await {
                    cache.invalidate_all();
                    info!(generation, "dataset refreshed");
                }
            }
        });
    }

    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "route resolver listening");
    axum::serve(listener, app).await?;

    Ok(())
}
