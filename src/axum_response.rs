//! Axum integration: an [`ErrorResponse`] is directly usable as a handler
//! return value.

use ::axum::response::{IntoResponse, Response};
use ::axum::Json;

use crate::error::ErrorResponse;
use crate::handler::Outcome;

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = self.status;
        let mut resp = Json(self.envelope).into_response();
        *resp.status_mut() = status;
        resp
    }
}

impl Outcome {
    /// Converts a normalized outcome into an axum response.
    ///
    /// Axum has no fallback error page to defer to, so a passthrough becomes
    /// a bare `500 Internal Server Error`.
    pub fn into_axum_response(self) -> Response {
        match self {
            Outcome::Respond(response) => response.into_response(),
            Outcome::Passthrough => http::StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}
