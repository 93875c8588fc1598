use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use conecta_match::config::{LoggingSettings, Settings};
use conecta_match::core::Recommender;
use conecta_match::mock_data::mock_courses;
use conecta_match::models::ScoringWeights;
use conecta_match::routes::{self, courses::AppState};
use conecta_match::services::{
    CacheManager, CourseRepository, CourseStore, InMemoryCourseStore, PostgresCourseStore,
    ProfileClient,
};

/// LOG_LEVEL / LOG_FORMAT override the configured values, RUST_LOG overrides both
fn init_logging(logging: &LoggingSettings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

fn startup_error(context: &str, e: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, e);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, e))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();

    init_logging(&logging);

    info!("Starting ConectaBairro course matching service...");

    let settings = settings.map_err(|e| startup_error("Failed to load configuration", e))?;

    info!("Configuration loaded successfully");

    // Cache: Redis tier is optional, L1 always runs
    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(1000);

    let cache = match settings.cache.redis_url.as_deref() {
        Some(redis_url) => match CacheManager::new(redis_url, l1_cache_size, cache_ttl).await {
            Ok(c) => {
                info!("Cache manager initialized with Redis (L1: {} entries, TTL: {}s)", l1_cache_size, cache_ttl);
                c
            }
            Err(e) => {
                warn!("Failed to connect to Redis ({}), running with in-process cache only", e);
                CacheManager::local(l1_cache_size, cache_ttl)
            }
        },
        None => {
            info!("Cache manager initialized (L1: {} entries, TTL: {}s)", l1_cache_size, cache_ttl);
            CacheManager::local(l1_cache_size, cache_ttl)
        }
    };

    // One seed catalog, so ids from the seeded store resolve in the fallback path
    let seed_catalog = Arc::new(mock_courses());

    // Course store: fall back to an in-memory seed catalog if PostgreSQL is unreachable
    let store: Arc<dyn CourseStore> = match PostgresCourseStore::from_settings(
        &settings.database.url,
        settings.database.max_connections,
        settings.database.min_connections,
        settings.database.acquire_timeout_secs,
        settings.database.idle_timeout_secs,
    )
    .await
    {
        Ok(store) => {
            if settings.database.seed_on_empty {
                if let Err(e) = store.seed_if_empty(&seed_catalog).await {
                    warn!("Failed to seed course catalog: {}", e);
                }
            }
            info!("PostgreSQL course store initialized");
            Arc::new(store)
        }
        Err(e) => {
            error!("Failed to connect to PostgreSQL ({}), serving the built-in catalog from memory", e);
            Arc::new(InMemoryCourseStore::with_courses(seed_catalog.as_ref().clone()))
        }
    };

    // Prefer the stored catalog at startup, it may have been seeded by an earlier run
    let fallback_catalog = match store.get_all().await {
        Ok(courses) if !courses.is_empty() => Arc::new(courses),
        _ => seed_catalog,
    };

    let weights = ScoringWeights::from(&settings.scoring.weights);
    let recommender = Recommender::new(
        weights,
        settings.matching.min_score,
        settings.matching.max_results,
    );

    info!(
        "Recommender initialized with weights: {:?} (min score {}, max results {})",
        weights, settings.matching.min_score, settings.matching.max_results
    );

    let profiles = ProfileClient::new(
        settings.profiles.base_url.clone(),
        settings.profiles.api_key.clone(),
        settings.profiles.timeout_secs.unwrap_or(10),
    )
    .map_err(|e| startup_error("Failed to create profile client", e))?;

    let app_state = AppState {
        repository: Arc::new(CourseRepository::new(store, Some(Arc::new(cache)), recommender)),
        profiles: Arc::new(profiles),
        fallback_catalog,
    };

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
