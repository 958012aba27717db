use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use guna_milan::config::{Settings, StoreBackend};
use guna_milan::core::Scorer;
use guna_milan::routes::{self, AppState};
use guna_milan::services::{AppwriteClient, CachedStore, InMemoryStore, JwtVerifier, ProfileStore, StoreError};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn build_store(settings: &Settings) -> Result<Arc<dyn ProfileStore>, StoreError> {
    let store = &settings.profile_store;
    let cache = &settings.cache;

    let store: Arc<dyn ProfileStore> = match (store.backend, cache.enabled) {
        (StoreBackend::Appwrite, enabled) => {
            let client = AppwriteClient::new(
                store.endpoint.clone(),
                store.api_key.clone(),
                store.project_id.clone(),
                store.database_id.clone(),
                store.charts_collection.clone(),
                store.timeout_secs,
            )?;
            info!("Appwrite profile store initialized ({})", store.endpoint);

            if enabled {
                Arc::new(CachedStore::new(client, cache.max_capacity, cache.ttl_secs))
            } else {
                Arc::new(client)
            }
        }
        (StoreBackend::Memory, _) => match &store.fixtures_path {
            Some(path) => {
                let fixtures = InMemoryStore::from_json_file(path)?;
                info!("In-memory profile store loaded {} charts from {}", fixtures.len(), path);
                Arc::new(fixtures)
            }
            None => {
                warn!("Using an empty in-memory profile store");
                Arc::new(InMemoryStore::new())
            }
        },
    };

    Ok(store)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Fallback logging settings for when the config cannot be loaded
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    // Also rejects enabled auth without a secret
    let settings = match Settings::load() {
        Ok(settings) => {
            init_logging(&settings.logging.level, &settings.logging.format);
            settings
        }
        Err(e) => {
            init_logging(&log_level, &log_format);
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    info!("Starting Guna Milan compatibility service...");

    let store = build_store(&settings).map_err(|e| {
        error!("Failed to initialize profile store: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    let auth = if settings.auth.enabled {
        info!("JWT authentication enabled");
        JwtVerifier::new(
            &settings.auth.jwt_secret,
            settings.auth.issuer.as_deref(),
            settings.auth.audience.as_deref(),
        )
    } else {
        warn!("JWT authentication disabled");
        JwtVerifier::disabled()
    };

    let scorer = Scorer::new(settings.scoring.koota_options());
    info!("Scorer initialized with options: {:?}", scorer.options());

    let app_state = AppState {
        store,
        auth: Arc::new(auth),
        scorer,
        max_rank_candidates: settings.scoring.max_rank_candidates,
        max_rank_limit: settings.scoring.max_rank_limit,
        rank_fetch_concurrency: settings.scoring.rank_fetch_concurrency,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(routes::handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(routes::handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
