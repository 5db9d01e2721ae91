//! Route definitions for the `/conversations` resource.
//!
//! Message sending lives at the top-level `/messages` route, wired in
//! `routes::api_routes`.

use axum::routing::get;
use axum::Router;

use crate::handlers::conversations;
use crate::state::AppState;

/// Routes mounted at `/conversations`.
///
/// ```text
/// GET  /?user_id=       -> list
/// POST /                -> create
/// GET  /{id}            -> get_by_id
/// GET  /{id}/messages   -> list_messages (ascending)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(conversations::list).post(conversations::create))
        .route("/{id}", get(conversations::get_by_id))
        .route("/{id}/messages", get(conversations::list_messages))
}
