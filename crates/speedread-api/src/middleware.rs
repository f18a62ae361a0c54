use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::auth::{AppState, check_credentials, parse_basic};

/// Require HTTP Basic credentials from the `auth` table. A no-op when the
/// server runs without an app key.
pub async fn require_auth(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let Some(key) = state.app_key else {
        return next.run(req).await;
    };

    let Some((username, password)) = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_basic)
    else {
        return challenge();
    };

    let db = state.db.clone();
    let user = username.clone();
    let verified =
        tokio::task::spawn_blocking(move || check_credentials(&db, &key, &user, &password)).await;

    match verified {
        Ok(Ok(true)) => next.run(req).await,
        Ok(Ok(false)) => {
            warn!("Rejected login for {}", username);
            challenge()
        }
        Ok(Err(e)) => {
            error!("Credential lookup failed: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        Err(e) => {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn challenge() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(
            header::WWW_AUTHENTICATE,
            HeaderValue::from_static(r#"Basic realm="speedread""#),
        )],
    )
        .into_response()
}
