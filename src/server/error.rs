use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::api::Envelope;

pub const MISSING_COORDINATES: &str = "Необходимы параметры lat и lon";
pub const NOT_FOUND: &str = "Страница не найдена";
pub const INTERNAL_ERROR: &str = "Внутренняя ошибка сервера";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Необходимы параметры lat и lon")]
    MissingParameters,

    #[error("Некорректное значение параметра {0}")]
    InvalidParameter(&'static str),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingParameters | AppError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body: Envelope<()> = match &self {
            AppError::Internal(err) => {
                error!("Request failed: {err:#}");
                Envelope::failure(INTERNAL_ERROR).with_message(err.to_string())
            }
            _ => Envelope::failure(self.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

/// Turns a handler panic into the same 500 body as [`AppError::Internal`]
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    error!("Handler panicked: {message}");

    let body: Envelope<()> = Envelope::failure(INTERNAL_ERROR).with_message(message);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_bad_request() {
        assert_eq!(AppError::MissingParameters.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidParameter("radius").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::MissingParameters.to_string(), MISSING_COORDINATES);
    }

    #[test]
    fn internal_errors_map_to_server_error() {
        let err = AppError::from(anyhow::anyhow!("store offline"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
