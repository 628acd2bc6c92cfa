mod api;
mod config;
mod database;
mod models;
mod services;
mod utils;

#[cfg(test)]
mod testing;

use actix_cors::Cors;
use actix_web::{middleware::{Compress, Logger}, web, App, HttpServer};
use dotenv::dotenv;
use std::io;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::database::{MongoDB, Store};
use crate::services::{ContactNotifier, GeoLocator, HttpGeoLocator, HttpMailer};

fn cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::ACCEPT,
        ])
        .max_age(3600);

    if origins.is_empty() {
        return cors.allow_any_origin();
    }

    origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(io::Error::other)?;

    log::info!("🚀 Starting portfolio server...");
    log::info!("📊 Database: {}", config.database_name);

    let db = MongoDB::new(&config.mongodb_uri, &config.database_name)
        .await
        .map_err(io::Error::other)?;
    log::info!("✅ MongoDB connected successfully");

    let mailer = HttpMailer::new(&config.mail.api_url, &config.mail.api_key).map_err(io::Error::other)?;
    let notifier = web::Data::new(ContactNotifier::new(
        Arc::new(mailer),
        &config.mail.sender,
        &config.mail.owner,
    ));

    let locator: Arc<dyn GeoLocator> =
        Arc::new(HttpGeoLocator::new(&config.geo_api_url).map_err(io::Error::other)?);
    let locator = web::Data::from(locator);

    let store: Arc<dyn Store> = Arc::new(db);
    let store = web::Data::from(store);

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    let origins = config.cors_origins.clone();

    HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store.clone())
            .app_data(locator.clone())
            .app_data(notifier.clone())
            .wrap(cors(&origins))
            .wrap(Compress::default())
            .wrap(Logger::default())
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
