mod classifier;
mod config;
mod error;
mod handlers;
mod models;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::classifier::EntropySource;
use crate::config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    config.validate()?;

    let entropy = web::Data::new(EntropySource::from_seed(config.seed));
    if config.seed.is_some() {
        tracing::warn!("confidence generator is seeded; results are reproducible");
    }
    if config.is_permissive() {
        tracing::info!("CORS allows any origin");
    }

    tracing::info!(bind = %config.bind, "server running at http://{}", config.bind);

    let bind = config.bind.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(config.cors())
            .wrap(Logger::default())
            .app_data(entropy.clone())
            .configure(handlers::routes)
    })
    .bind(bind)?
    .run()
    .await
}
