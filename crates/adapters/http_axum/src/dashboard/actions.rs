//! Form handlers. Each applies one mutation and redirects to `/` (PRG).

use std::str::FromStr;

use axum::extract::{Form, Path, State};
use axum::response::Redirect;
use serde::Deserialize;

use homesim_app::home::DeviceCommand;
use homesim_app::ports::{Clock, Integration};
use homesim_domain::device::{Attribute, AttributeValue};
use homesim_domain::error::HomeError;
use homesim_domain::id::{DeviceId, RuleId};

use crate::error::DashboardError;
use crate::state::AppState;

/// Form data for writing one attribute. `value` is parsed according to the
/// attribute's type.
#[derive(Deserialize)]
pub struct AttributeForm {
    pub attribute: String,
    pub value: String,
}

/// Form data for switching a rule or the whole engine.
#[derive(Deserialize)]
pub struct EnabledForm {
    pub enabled: String,
}

fn parse_id<T: FromStr>(raw: &str) -> Result<T, DashboardError> {
    raw.parse()
        .map_err(|_| DashboardError::MalformedId(raw.to_string()))
}

/// Rejected values are already recorded as a notice; only missing targets
/// turn into an error response.
fn back_to_dashboard<T>(result: Result<T, HomeError>) -> Result<Redirect, DashboardError> {
    match result {
        Ok(_) | Err(HomeError::Validation(_) | HomeError::OutOfRange(_)) => Ok(Redirect::to("/")),
        Err(err) => Err(err.into()),
    }
}

/// `POST /devices/{id}/power` — flip a device's power.
pub async fn toggle_power<C: Clock, I: Integration>(
    State(state): State<AppState<C, I>>,
    Path(id): Path<String>,
) -> Result<Redirect, DashboardError> {
    let device: DeviceId = parse_id(&id)?;
    let result = state.lock().apply(DeviceCommand::TogglePower { device });
    back_to_dashboard(result)
}

/// `POST /devices/{id}/attributes` — write one attribute from form text.
pub async fn set_attribute<C: Clock, I: Integration>(
    State(state): State<AppState<C, I>>,
    Path(id): Path<String>,
    Form(form): Form<AttributeForm>,
) -> Result<Redirect, DashboardError> {
    let device: DeviceId = parse_id(&id)?;
    let mut home = state.lock();
    let parsed = Attribute::from_str(&form.attribute).and_then(|attribute| {
        AttributeValue::parse(attribute, &form.value).map(|value| (attribute, value))
    });
    let result = match parsed {
        Ok((attribute, value)) => home.apply(DeviceCommand::SetAttribute {
            device,
            attribute,
            value,
        }),
        Err(err) => {
            home.notify(err.to_string());
            Err(err.into())
        }
    };
    back_to_dashboard(result)
}

/// `POST /rules/{id}/toggle` — enable or disable one rule.
pub async fn toggle_rule<C: Clock, I: Integration>(
    State(state): State<AppState<C, I>>,
    Path(id): Path<String>,
    Form(form): Form<EnabledForm>,
) -> Result<Redirect, DashboardError> {
    let rule: RuleId = parse_id(&id)?;
    let result = state.lock().set_rule_enabled(rule, form.enabled == "true");
    back_to_dashboard(result)
}

/// `POST /automation/toggle` — switch the whole rule engine on or off.
pub async fn toggle_automation<C: Clock, I: Integration>(
    State(state): State<AppState<C, I>>,
    Form(form): Form<EnabledForm>,
) -> Redirect {
    state.lock().set_automation_enabled(form.enabled == "true");
    Redirect::to("/")
}
