//! Macrobias API Server
//!
//! HTTP API with health check, metrics, rule table and bias endpoints.
//! Stateless apart from the in-process rule table registry.

use dotenvy::dotenv;
use macrobias::config::Config;
use macrobias::core::http::start_server;
use macrobias::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = Config::from_env()?;
    let port = config.port;

    info!("Starting Macrobias API Server");
    info!(environment = %config.environment, "Environment");
    info!(rule_table = %config.rule_table, "Default rule table");
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);

    let server_handle = tokio::spawn(start_server(config));

    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
            info!("API server stopped");
            Ok(())
        }
        result = server_handle => {
            // Startup failures (rule tables, bind) end the task early
            match result? {
                Ok(()) => {
                    error!("HTTP server stopped");
                    Ok(())
                }
                Err(e) => {
                    error!(error = %e, "HTTP server error");
                    Err(e)
                }
            }
        }
    }
}
