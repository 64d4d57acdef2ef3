mod config;
mod errors;
mod models;
mod prompts;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, middleware, web, App, HttpServer};
use config::Settings;
use errors::ApiError;
use routes::profiles::AppState;
use services::{OpenAiClient, OpenAiModels, SupabaseClient};
use std::sync::Arc;
use tracing::{error, info};

/// Handle JSON payload errors with the uniform detail shape
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::BadRequest(format!("Invalid JSON: {}", err)).into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting collab gateway...");

    // Load configuration; missing credentials abort startup here
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize OpenAI client
    let models = OpenAiModels {
        validation: settings.openai.validation_model,
        matching: settings.openai.matching_model,
    };

    let model = Arc::new(OpenAiClient::new(
        settings.openai.base_url,
        settings.openai.api_key,
        models,
    ));

    info!("OpenAI client initialized");

    // Initialize Supabase client
    let store = Arc::new(SupabaseClient::new(
        settings.supabase.url,
        settings.supabase.api_key,
        settings.supabase.profiles_table,
    ));

    info!("Supabase client initialized");

    // Build application state
    let app_state = AppState {
        model,
        store,
        max_candidates: settings.matching.max_candidates,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://localhost:5173")
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
