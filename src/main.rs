use crate::config::WikiConfig;
use crate::features::pages::PathValidator;
use crate::io::{LocalPageStore, PageStore};
use crate::render::Templates;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub mod config;
mod domain;
mod features;
mod io;
mod logging;
mod render;

#[cfg(test)]
mod tests;

// everything in here is built at startup and never mutated afterwards
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PageStore>,
    pub templates: Arc<Templates>,
    pub validator: Arc<PathValidator>,
}

impl AppState {
    /// The startup phase. Any error here means the server can't do its job.
    pub async fn build(config: &WikiConfig) -> Result<Self> {
        tokio::fs::create_dir_all(&config.pages_dir)
            .await
            .with_context(|| {
                format!(
                    "Unable to create pages directory {}",
                    config.pages_dir.display()
                )
            })?;

        let templates = match &config.templates_dir {
            Some(dir) => {
                tracing::info!("Loading templates from {}", dir.display());
                Templates::from_dir(dir)
            }
            None => {
                tracing::info!("Using embedded templates");
                Templates::embedded()
            }
        }
        .context("Failed to compile templates")?;

        let validator = PathValidator::new().context("Failed to compile the page path pattern")?;

        tracing::info!(
            serialize_saves = config.serialize_saves,
            "Storing pages in {}",
            config.pages_dir.display()
        );
        let store = LocalPageStore::new(config.pages_dir.clone(), config.serialize_saves);

        Ok(Self {
            store: Arc::new(store),
            templates: Arc::new(templates),
            validator: Arc::new(validator),
        })
    }
}

pub fn app(state: AppState) -> Router {
    features::pages::pages_router()
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    // determine environment variables
    dotenv::dotenv().ok();

    logging::init_logging()?;

    if let Err(e) = run().await {
        tracing::error!("Fatal: {:#}", e);
        return Err(e);
    }

    Ok(())
}

async fn run() -> Result<()> {
    let config = WikiConfig::from_env()?;
    let state = AppState::build(&config).await?;

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Unable to listen on {}", config.listen_addr))?;
    tracing::info!("Server listening on http://{}", config.listen_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped.");
    Ok(())
}

// resolves on ctrl-c or SIGTERM, whichever comes first
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Unable to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Unable to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, finishing in-flight requests...");
}
