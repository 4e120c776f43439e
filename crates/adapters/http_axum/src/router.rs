//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use homesim_app::ports::{Clock, Integration};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Serves the dashboard at `/` plus a `/health` liveness check.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<C, I>(state: AppState<C, I>) -> Router
where
    C: Clock + Send + 'static,
    I: Integration + Send + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::dashboard::routes::<C, I>())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
