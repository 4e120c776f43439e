//! # homesim-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **server-side-rendered HTML dashboard** that works with
//!   **zero JavaScript** — pure HTML forms + `<meta http-equiv="refresh">`
//!   for live updates
//! - Map form submissions into [`DeviceCommand`](homesim_app::home::DeviceCommand)s
//!   and rule switches on the shared `Home` (driving adapter)
//!
//! ## No-JS dashboard approach
//! - The page is rendered server-side as complete HTML.
//! - Every control is a `<form>` that POSTs back to the server and
//!   redirects (PRG pattern).
//! - The page reloads itself once per simulation tick.
//! - A rejected mutation shows up as a flash notice on the next render.
//!
//! ## Dependency rule
//! Depends on `homesim-app` and `homesim-domain`. Never leaks axum types
//! into the domain.

pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;
