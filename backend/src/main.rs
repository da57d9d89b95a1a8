mod config;
mod inference;
mod routes;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};

use config::ServerConfig;
use inference::{Detector, TorchDetector};
use routes::configure_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env().map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Configuration error: {e}"),
        )
    })?;

    log::info!(
        "Loading detection model from {}",
        config.model_path.display()
    );
    let detector = TorchDetector::load(&config.model_path).map_err(|e| {
        log::error!("Failed to load model at startup: {e}");
        std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Model loading failed: {e}"),
        )
    })?;
    let detector: web::Data<dyn Detector> = web::Data::from(Arc::new(detector) as Arc<dyn Detector>);

    let bind_address = config.bind_address();
    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(detector.clone())
            .configure(configure_routes)
    })
    .bind(&bind_address)?
    .run()
    .await
}
