use axum::{
    Form, Json, Router,
    extract::{Path, State},
    middleware,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use tracing::debug;

use speedread_db::Table;
use speedread_types::api::{FormState, HealthResponse};
use speedread_types::events::ElementId;

use crate::auth::AppState;
use crate::dashboard::{self, Snapshot, UiEvent};
use crate::error::ApiError;
use crate::middleware::require_auth;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Every route. `/health` stays reachable without credentials.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/", get(index))
        .route("/ui/{element}", post(ui_event))
        .route("/api/books", get(list_books))
        .route("/api/sessions", get(list_sessions))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(protected)
        .route("/health", get(health))
        .with_state(state)
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// POST /ui/{element} — run the element's handler against the posted form
/// state and a fresh read of the tables, apply its write, return its fragment.
pub async fn ui_event(
    State(state): State<AppState>,
    Path(element): Path<String>,
    Form(form): Form<FormState>,
) -> Result<impl IntoResponse, ApiError> {
    let element: ElementId = element.parse()?;
    debug!("UI event {}", element);

    let now = chrono::Local::now().naive_local();
    let db = state.clone();
    let fragment = tokio::task::spawn_blocking(move || {
        let snapshot = Snapshot::load(&db.db)?;
        let event = UiEvent {
            element,
            form: &form,
            now,
        };
        let outcome = dashboard::dispatch(&event, &snapshot);
        if let Some(effect) = outcome.effect {
            dashboard::apply(&db.db, effect)?;
        }
        Ok::<_, anyhow::Error>(outcome.fragment)
    })
    .await??;

    Ok(Html(fragment.into_string()))
}

/// GET /api/books
pub async fn list_books(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let books = tokio::task::spawn_blocking(move || state.db.load_books()).await??;
    Ok(Json(books))
}

/// GET /api/sessions
pub async fn list_sessions(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let sessions = tokio::task::spawn_blocking(move || state.db.load_sessions()).await??;
    Ok(Json(sessions))
}

pub async fn health(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let (books, sessions) = tokio::task::spawn_blocking(move || {
        Ok::<_, anyhow::Error>((state.db.count(Table::Books)?, state.db.count(Table::Sessions)?))
    })
    .await??;

    Ok(Json(HealthResponse {
        status: "ok",
        books,
        sessions,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as B64;
    use http_body_util::BodyExt;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::auth::{AppStateInner, add_user};
    use speedread_crypto::generate_key;
    use speedread_db::Database;

    fn app(key: Option<[u8; 32]>) -> (TempDir, AppState) {
        let dir = tempfile::tempdir().expect("temp dir");
        let db = Database::open(&dir.path().join("app.db")).expect("open db");
        (dir, AppStateInner::new(db, key))
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(res: axum::response::Response) -> String {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn serves_dashboard_page() {
        let (_dir, state) = app(None);
        let res = router(state)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let html = body_text(res).await;
        assert!(html.contains(r#"id="show-add-books""#));
        assert!(html.contains(r#"id="performance-container""#));
    }

    #[tokio::test]
    async fn book_and_session_round_trip_over_http() {
        let (_dir, state) = app(None);
        let app = router(state.clone());

        let res = app
            .clone()
            .oneshot(post_form(
                "/ui/submit-book",
                "n_clicks=1&add-book-name=O%27Brien%27s+Notes&add-book-author=Me\
                 &num-lines-thresh-input=5&num-pages-thresh-input=5\
                 &num-words-per-line-input=40&num-lines-per-page-input=150",
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_text(res).await, "Book submitted!");

        let res = app
            .clone()
            .oneshot(post_form(
                "/ui/record-submit",
                "n_clicks=1&book-select-dropdown=0&num-minutes-test-thresh-input=3&num-lines-test-input=30",
            ))
            .await
            .unwrap();
        assert!(body_text(res).await.contains(r#"<label id="wpm-label">80</label>"#));

        let res = app
            .oneshot(Request::get("/api/books").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let books: serde_json::Value = serde_json::from_str(&body_text(res).await).unwrap();
        assert_eq!(books[0]["name"], "O'Brien's Notes");
        assert_eq!(books[0]["wpl"], 8);
        assert_eq!(books[0]["wpp"], 240);

        let sessions = state.db.load_sessions().unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].wpm, 80);
    }

    #[tokio::test]
    async fn unknown_element_is_not_found() {
        let (_dir, state) = app(None);
        let res = router(state)
            .oneshot(post_form("/ui/delete-book", ""))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn key_requires_basic_auth() {
        let key = generate_key();
        let (_dir, state) = app(Some(key));
        add_user(&state.db, &key, "ada", "lovelace").unwrap();
        let app = router(state);

        let res = app
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.headers().contains_key(header::WWW_AUTHENTICATE));

        let wrong = format!("Basic {}", B64.encode("ada:babbage"));
        let res = app
            .clone()
            .oneshot(
                Request::get("/")
                    .header(header::AUTHORIZATION, wrong)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let right = format!("Basic {}", B64.encode("ada:lovelace"));
        let res = app
            .clone()
            .oneshot(
                Request::get("/")
                    .header(header::AUTHORIZATION, right)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}
