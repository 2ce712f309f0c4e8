use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use doi_core::error::LookupError;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("Render task failed: {0}")]
    Join(#[from] JoinError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("{self}");

        (StatusCode::INTERNAL_SERVER_ERROR, "Internal error: lookup failed").into_response()
    }
}
