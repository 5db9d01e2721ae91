pub mod conversations;
pub mod documents;
pub mod found_documents;
pub mod health;
pub mod lost_documents;
pub mod translations;
pub mod user_settings;
pub mod users;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users/register                  register (POST)
/// /users/login                     login (POST)
/// /users/{id}                      get
///
/// /documents?user_id=              list (GET), create (POST)
/// /documents/{id}                  get, update, delete
///
/// /lost-documents                  feed (GET), report lost (POST)
/// /lost-documents/{id}             get
///
/// /found-documents                 feed (GET), file report (POST)
/// /found-documents/{id}            get
///
/// /conversations?user_id=          list (GET), open (POST)
/// /conversations/{id}              get
/// /conversations/{id}/messages     thread (GET, ascending)
/// /messages                        send (POST)
///
/// /subscriptions                   change plan (POST)
///
/// /user-settings                   create (POST)
/// /user-settings/{user_id}         get, update
///
/// /translations                    grouped catalogue (GET), create (POST)
/// /translations/{key}              get, update
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/documents", documents::router())
        .nest("/lost-documents", lost_documents::router())
        .nest("/found-documents", found_documents::router())
        .nest("/conversations", conversations::router())
        .route("/messages", post(handlers::conversations::send_message))
        .route("/subscriptions", post(handlers::subscriptions::subscribe))
        .nest("/user-settings", user_settings::router())
        .nest("/translations", translations::router())
}
