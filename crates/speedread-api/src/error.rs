use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use speedread_types::events::UnknownElement;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    UnknownElement(#[from] UnknownElement),

    #[error("storage error: {0:#}")]
    Storage(#[from] anyhow::Error),

    #[error("spawn_blocking join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::UnknownElement(e) => (StatusCode::NOT_FOUND, e.to_string()).into_response(),
            e => {
                error!("{}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<p class=\"notice\">Something went wrong. Please try again.</p>"),
                )
                    .into_response()
            }
        }
    }
}
