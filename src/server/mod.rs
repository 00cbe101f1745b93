//! PromptGate HTTP server.
//!
//! Thin glue around the engine:
//! - `/v1/analyze` and `/v1/analyze/batch` scan endpoints
//! - `/v1/patterns` catalog introspection
//! - health/status probes
//!
//! The server owns all user-facing validation (empty text, oversized text,
//! malformed batch) and the API-key/rate-limit ledger; the engine is never
//! the source of a rejected request.
//!
//! # Example
//!
//! ```rust,ignore
//! use promptgate::server::{create_router, AppState, ServerConfig};
//! use std::sync::Arc;
//!
//! let config = ServerConfig::default().with_port(8300);
//! let state = Arc::new(AppState::new(config.clone()));
//! let app = create_router(state);
//! let listener = tokio::net::TcpListener::bind(config.addr).await?;
//! axum::serve(listener, app).await?;
//! ```

mod config;
mod handlers;
mod state;

pub use config::ServerConfig;
pub use handlers::{create_router, health_check};
pub use state::{AppState, KeyCheck, KeyStore};
