//! Error type shared by the loader, the OSRM client and the HTTP handlers.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} not found")]
    NotFound(String),

    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("routing service failure: {0}")]
    Upstream(String),

    #[error("routing request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid route (duplicate or unknown points)")]
    InvalidConnection,

    #[error("route not found between points")]
    ConnectionNotFound,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::NotFound(_) | Error::ConnectionNotFound => StatusCode::NOT_FOUND,
            Error::Upstream(_) | Error::Http(_) => StatusCode::BAD_GATEWAY,
            Error::InvalidConnection | Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Csv(_) | Error::Io(_) | Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{}", self);
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            Error::NotFound("database.csv".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::Upstream("no routes".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(Error::InvalidConnection.status(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::ConnectionNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            Error::BadRequest("missing field `to_id`".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = Error::NotFound("lokalzacja.csv".into());
        assert_eq!(err.to_string(), "lokalzacja.csv not found");
    }
}
