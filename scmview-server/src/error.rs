//! HTTP mapping of console errors.
//!
//! - missing repositories, paths and widget types → 404
//! - bad navigation markers → 400
//! - backend timeouts → 504, other backend failures → 502

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use scmview_core::Error;
use serde_json::json;

#[derive(Debug)]
pub struct AppError(pub Error);

impl From<Error> for AppError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::Http { status: 404, .. } | Error::UnknownWidget(_) => StatusCode::NOT_FOUND,
            Error::InvalidMarker(_) => StatusCode::BAD_REQUEST,
            Error::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Error::Http { .. } | Error::Network(_) | Error::MalformedData(_) => {
                StatusCode::BAD_GATEWAY
            }
            Error::Config(_) | Error::InvalidConfig(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self.0);
        }

        let body = Json(json!({
            "error": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
