mod config;
mod db;
mod error;
mod events;
mod models;
mod routes;
mod search;
mod sources;
mod store;

use std::sync::Arc;

use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::config::{Command, Config};
use crate::events::{DiscardSink, EventSink, TracingSink};
use crate::search::SearchService;
use crate::sources::fetch::HttpFetcher;
use crate::store::{JobStore, MemoryJobStore, PgJobStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("jobscout=info,tower_http=info"));
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let store = open_store(&config).await?;
    let sources = sources::registry(&config.sources, config.fetch_timeout())?;
    tracing::info!(
        "Sources: {} (fetch timeout {:?})",
        config.sources.join(", "),
        config.fetch_timeout()
    );
    let command = config.resolved_command();
    let events: Arc<dyn EventSink> = match &command {
        Command::Search { quiet: true, .. } => Arc::new(DiscardSink),
        _ => Arc::new(TracingSink),
    };
    let fetcher = HttpFetcher::new()?;
    let service = SearchService::new(sources, Arc::new(fetcher), store, events);

    match command {
        Command::Serve { listen_addr } => {
            let app = routes::router(service)
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive());

            let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
            tracing::info!("Listening on {listen_addr}");
            axum::serve(listener, app).await?;
        }
        Command::Search { query, location, .. } => {
            let jobs = service.search_jobs(&query, &location).await?;
            println!("{}", serde_json::to_string_pretty(&jobs)?);
        }
    }

    Ok(())
}

async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn JobStore>> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set, keeping listings in memory");
        return Ok(Arc::new(MemoryJobStore::new()));
    };

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(database_url).await?;

    if config.run_migrations {
        tracing::info!("Running database migrations...");
        db::run_migrations(&pool).await?;
        tracing::info!("Migrations complete");
    }

    Ok(Arc::new(PgJobStore::new(pool)))
}
