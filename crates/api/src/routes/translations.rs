//! Route definitions for the `/translations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::translations;
use crate::state::AppState;

/// Routes mounted at `/translations`. Entries are addressed by their
/// `section.key` string, not a numeric id.
///
/// ```text
/// GET  /       -> list (grouped by section and language)
/// POST /       -> create
/// GET  /{key}  -> get_by_key
/// PUT  /{key}  -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(translations::list).post(translations::create))
        .route(
            "/{key}",
            get(translations::get_by_key).put(translations::update),
        )
}
