//! Server-side rendered HTML dashboard (no JavaScript).
//!
//! One page, `GET /`, shows every room with its device cards, the rule panel
//! and the system status. Every control is a form that POSTs to one of the
//! action routes, which redirect back to `/`.

#[allow(clippy::missing_errors_doc)]
pub mod actions;
pub mod home;
mod view;

use axum::Router;
use axum::routing::{get, post};

use homesim_app::ports::{Clock, Integration};

use crate::state::AppState;

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<C, I>() -> Router<AppState<C, I>>
where
    C: Clock + Send + 'static,
    I: Integration + Send + 'static,
{
    Router::new()
        .route("/", get(home::index::<C, I>))
        .route("/devices/{id}/power", post(actions::toggle_power::<C, I>))
        .route(
            "/devices/{id}/attributes",
            post(actions::set_attribute::<C, I>),
        )
        .route("/rules/{id}/toggle", post(actions::toggle_rule::<C, I>))
        .route("/automation/toggle", post(actions::toggle_automation::<C, I>))
}
