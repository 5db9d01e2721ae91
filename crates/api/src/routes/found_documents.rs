//! Route definitions for the `/found-documents` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::found_documents;
use crate::state::AppState;

/// Routes mounted at `/found-documents`.
///
/// ```text
/// GET  /      -> list (the found feed)
/// POST /      -> create (awards finder points)
/// GET  /{id}  -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(found_documents::list).post(found_documents::create))
        .route("/{id}", get(found_documents::get_by_id))
}
