//! Route definitions for the `/user-settings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user_settings;
use crate::state::AppState;

/// Routes mounted at `/user-settings`. Settings rows are addressed by the
/// owning user's id, not their own.
///
/// ```text
/// POST /            -> create
/// GET  /{user_id}   -> get_by_user
/// PUT  /{user_id}   -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(user_settings::create))
        .route(
            "/{user_id}",
            get(user_settings::get_by_user).put(user_settings::update),
        )
}
