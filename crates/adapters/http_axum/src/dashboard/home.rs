//! Dashboard home page — rooms, rules and system status.

use std::time::Duration;

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};

use homesim_app::home::Home;
use homesim_app::ports::{Clock, Integration};
use homesim_domain::time::ago;

use super::view::{RoomView, RuleView};
use crate::state::AppState;

/// Home page template.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    refresh_seconds: u64,
    device_count: usize,
    active_count: usize,
    rule_count: usize,
    tick_count: u64,
    last_tick: String,
    automation_enabled: bool,
    notice: Option<String>,
    rooms: Vec<RoomView>,
    rules: Vec<RuleView>,
}

impl HomeTemplate {
    fn render_from<C: Clock, I: Integration>(
        home: &Home<C, I>,
        refresh: Duration,
        notice_ttl: Duration,
    ) -> Self {
        let now = home.now();
        let registry = home.registry();
        let engine = home.engine();
        Self {
            refresh_seconds: refresh.as_secs().max(1),
            device_count: registry.len(),
            active_count: registry.active_count(),
            rule_count: engine.rules().len(),
            tick_count: home.tick_count(),
            last_tick: home
                .last_tick()
                .map_or_else(|| "never".to_string(), |at| ago(at, now)),
            automation_enabled: engine.is_automation_enabled(),
            notice: home
                .notice()
                .filter(|n| n.is_fresh(now, notice_ttl))
                .map(|n| n.message.clone()),
            rooms: registry
                .by_room()
                .into_iter()
                .map(|(room, devices)| RoomView::new(room, &devices))
                .collect(),
            rules: engine.rules().iter().map(|r| RuleView::new(r, now)).collect(),
        }
    }
}

impl IntoResponse for HomeTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /` — the whole dashboard.
pub async fn index<C: Clock, I: Integration>(
    State(state): State<AppState<C, I>>,
) -> HomeTemplate {
    let home = state.lock();
    HomeTemplate::render_from(&home, state.refresh, state.notice_ttl)
}
