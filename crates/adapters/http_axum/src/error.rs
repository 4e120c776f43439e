//! HTTP error response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use homesim_domain::error::HomeError;

/// Maps request failures to an HTTP response with an appropriate status code.
///
/// Rejected device values never reach this type: they become a flash notice
/// and the request still redirects back to the dashboard.
#[derive(Debug)]
pub enum DashboardError {
    /// A path segment is not a valid id.
    MalformedId(String),
    Home(HomeError),
}

impl From<HomeError> for DashboardError {
    fn from(err: HomeError) -> Self {
        Self::Home(err)
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MalformedId(id) => (StatusCode::BAD_REQUEST, format!("malformed id {id:?}")),
            Self::Home(err @ (HomeError::UnknownDevice(_) | HomeError::NotFound(_))) => {
                (StatusCode::NOT_FOUND, err.to_string())
            }
            Self::Home(err @ (HomeError::Validation(_) | HomeError::OutOfRange(_))) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
        };
        tracing::debug!(%status, %message, "request rejected");
        (status, message).into_response()
    }
}
