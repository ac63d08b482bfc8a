use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;

mod api;
mod auth;
mod config;
mod db;
mod docs;
mod error;
mod exporter;
mod importer;
mod model;
mod models;
mod repository;
mod routes;
mod schema;
mod utils;
mod views;

#[cfg(test)]
mod test_support;

use config::Config;
use db::init_db;
use importer::{ImportOutcome, import_spreadsheet};
use views::Views;

use crate::docs::ApiDoc;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let db = init_db(&config).await.context("Failed to initialise database")?;

    match import_spreadsheet(&db, &config.import_path, &config.sheet_name)
        .await
        .with_context(|| format!("Failed to import {}", config.import_path.display()))?
    {
        ImportOutcome::Imported(count) => info!(count, "Initial import complete"),
        ImportOutcome::Skipped { existing } => info!(existing, "Initial import not needed"),
    }

    let views = Data::new(Views::new().context("Failed to compile templates")?);
    let db = Data::new(db);
    let config_data = Data::new(config.clone());

    info!(host = %config.host, port = config.port, "Listening");

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(db.clone())
            .app_data(config_data.clone())
            .app_data(views.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
