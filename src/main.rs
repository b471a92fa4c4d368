//! Chatrelay HTTP server
//!
//! Starts an Axum web server that relays chat messages to a text-generation
//! provider.

use axum::{
    Router, middleware,
    routing::{get, post},
};
use chatrelay::{
    cli::{Cli, Command, generate_config_template},
    config::{API_KEY_ENV, Config},
    handlers::{self, AppState},
    middleware::request_id_middleware,
    provider::OpenAiProvider,
    telemetry,
};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Handle subcommands before touching config or credentials
    if let Some(Command::Config { output }) = cli.command {
        let template = generate_config_template();
        match output {
            Some(path) => {
                std::fs::write(&path, template)?;
                println!("Wrote template configuration to {}", path);
            }
            None => print!("{}", template),
        }
        return Ok(());
    }

    // Load configuration
    let config = Config::from_file(&cli.config)?;

    // Initialize telemetry
    telemetry::init(&config.observability.log_level);

    // Provider credential is a startup requirement: refuse to run without it
    // rather than failing every request later.
    let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
        format!(
            "{} is not set. The provider credential must be available in the \
            environment before chatrelay can start.",
            API_KEY_ENV
        )
    })?;

    let provider = OpenAiProvider::new(
        &config.provider,
        api_key,
        Duration::from_secs(config.server.request_timeout_seconds),
    )?;

    tracing::info!(
        model = config.provider.model(),
        provider_base_url = config.provider.base_url(),
        "Starting chatrelay server on {}:{}",
        config.server.host,
        config.server.port
    );

    // Config::validate already guarantees the host parses; treat failure here
    // as a startup error rather than silently binding elsewhere.
    let ip = config
        .server
        .host
        .parse::<std::net::IpAddr>()
        .map_err(|_| {
            chatrelay::error::AppError::Config(format!(
                "server.host '{}' is not an IP address literal",
                config.server.host
            ))
        })?;
    let addr = SocketAddr::new(ip, config.server.port);

    let state = AppState::new(Arc::new(config), Arc::new(provider));

    // Build router
    let app = Router::new()
        .route("/", get(handlers::health::handler))
        .route("/ask", post(handlers::ask::handler))
        .with_state(state)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    tracing::info!("Listening on {}", addr);
    tracing::info!("Health check available at http://{}/", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
