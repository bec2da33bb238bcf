//! banter-server - REST intake and outbound transport for banter.
//!
//! Inbound channel traffic arrives over HTTP (`POST /messages`), runs
//! through the core reply pipeline, and the reply goes back in the response
//! body. Outbound unprompted messages (the idle monitor's bored quotes)
//! leave through the webhook transport.
//!
//! # Example
//!
//! ```ignore
//! use banter_server::{create_server, factory};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (state, monitor) = factory::build_bot(config).await.unwrap();
//!     monitor.start().await.unwrap();
//!     let app = create_server(state);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod error;
pub mod factory;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod transport;

pub use error::{ApiError, ApiResult};
pub use factory::build_bot;
pub use state::AppState;
pub use transport::{NullTransport, WebhookTransport};

use axum::{middleware as axum_middleware, Router};
use tower_http::trace::TraceLayer;

/// Create the server with all routes and middleware.
pub fn create_server(state: AppState) -> Router {
    routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors_layer())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}
