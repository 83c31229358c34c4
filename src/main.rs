use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use energy_predict::config::{LoggingSettings, Settings};
use energy_predict::error::json_config;
use energy_predict::routes::{self, AppState};
use energy_predict::services::{HousingDataset, ModelRegistry};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging);

    info!("Starting energy prediction service...");

    // Model registry
    let artifacts = settings.models.artifact_paths().map_err(|e| {
        error!("Invalid model configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;
    let registry = Arc::new(ModelRegistry::new(artifacts));

    if settings.models.preload {
        let loaded = registry.preload().await;
        info!(
            "Preloaded {}/{} models from {}",
            loaded,
            registry.configured().len(),
            settings.models.artifact_dir
        );
    }

    // Housing dataset (optional - the house price endpoint answers 500 without it)
    let housing = match settings.housing.dataset_path.as_deref() {
        Some(path) => match HousingDataset::load(path) {
            Ok(dataset) => {
                info!("Housing dataset loaded ({} listings)", dataset.len());
                Some(Arc::new(dataset))
            }
            Err(e) => {
                warn!("Failed to load housing dataset from {} ({}), house price estimates disabled", path, e);
                None
            }
        },
        None => None,
    };

    let app_state = AppState { registry, housing };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(json_config())
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
