//! Shared fixtures for handler tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;

use homesim_app::home::Home;
use homesim_app::ports::{Integration, SystemClock};
use homesim_app::registry::DeviceRegistry;
use homesim_domain::automation::presets;
use homesim_domain::device::{Attribute, AttributeValue, DeviceKind};
use homesim_domain::error::HomeError;
use homesim_domain::id::DeviceId;
use homesim_domain::time::Timestamp;

use crate::state::AppState;

/// A hallway light and a powered camera; no physics.
pub struct Hallway;

impl Integration for Hallway {
    fn name(&self) -> &'static str {
        "hallway"
    }

    fn setup(&mut self, registry: &mut DeviceRegistry) -> Result<(), HomeError> {
        registry.create_device(
            DeviceKind::Light,
            "Hall Light",
            "Hall",
            [(Attribute::Brightness, AttributeValue::Int(50))],
        )?;
        registry.create_device(
            DeviceKind::Camera,
            "Hall Camera",
            "Hall",
            [(Attribute::Power, AttributeValue::Bool(true))],
        )?;
        Ok(())
    }

    fn step(&mut self, _: &mut DeviceRegistry, _: Duration, _: Timestamp) -> usize {
        0
    }
}

pub type TestState = AppState<SystemClock, Hallway>;

pub fn state() -> TestState {
    let mut home = Home::new(SystemClock, Hallway).unwrap();
    home.register_rules([presets::motion_lighting().unwrap()]).unwrap();
    AppState::new(Arc::new(Mutex::new(home)), Duration::from_secs(2))
}

pub fn device_id(state: &TestState, name: &str) -> DeviceId {
    state.lock().registry().find_by_name(name).unwrap().id()
}

pub fn form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
