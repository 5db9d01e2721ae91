//! Route definitions for the `/lost-documents` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::lost_documents;
use crate::state::AppState;

/// Routes mounted at `/lost-documents`.
///
/// ```text
/// GET  /      -> list (the lost feed)
/// POST /      -> report (the lost transition)
/// GET  /{id}  -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lost_documents::list).post(lost_documents::report))
        .route("/{id}", get(lost_documents::get_by_id))
}
