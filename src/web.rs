//! HTTP surface: the form page, the JSON API and a health check.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /` | empty form page |
//! | `POST /` | form submission, page with the result area filled |
//! | `POST /api/classify` | JSON classification |
//! | `GET /health` | liveness and version |

pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::service::SpamClassifier;

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

/// Web server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: SocketAddr::from(([127, 0, 0, 1], 8501)),
        }
    }
}

/// Shared state handed to every handler.
pub struct AppState {
    pub classifier: Arc<SpamClassifier>,
}

/// Build the router with all routes.
pub fn router(classifier: Arc<SpamClassifier>) -> Router {
    let state = Arc::new(AppState { classifier });

    Router::new()
        .route("/", get(handlers::index).post(handlers::submit))
        .route("/api/classify", post(handlers::api_classify))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Serve the router until the process is stopped.
pub async fn serve(classifier: Arc<SpamClassifier>, config: &ServerConfig) -> Result<()> {
    let router = router(classifier);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind() {
        assert_eq!(
            ServerConfig::default().bind,
            DEFAULT_BIND.parse::<SocketAddr>().unwrap()
        );
    }
}
