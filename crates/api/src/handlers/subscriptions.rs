//! Handler for the `/subscriptions` endpoint.

use axum::extract::State;
use axum::Json;
use findmydoc_core::lifecycle::SubscriptionPlan;
use findmydoc_core::types::{DbId, Timestamp};
use findmydoc_db::models::user::{UpdateUser, User};
use serde::Deserialize;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub user_id: DbId,
    pub plan: SubscriptionPlan,
    pub end_date: Option<Timestamp>,
}

/// POST /api/v1/subscriptions
///
/// Payment processing is out of scope; this only records the chosen plan
/// on the user. An unknown user surfaces as 404 via the storage error.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(input): Json<SubscribeRequest>,
) -> AppResult<Json<User>> {
    let user = state
        .storage
        .update_user(
            input.user_id,
            UpdateUser {
                subscription_plan: Some(input.plan),
                subscription_end_date: input.end_date,
                ..Default::default()
            },
        )
        .await?;
    tracing::info!(user_id = user.id, plan = %input.plan, "Subscription updated");
    Ok(Json(user))
}
