//! User entity model and DTOs.

use findmydoc_core::lifecycle::SubscriptionPlan;
use findmydoc_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Full user row from the `users` table.
///
/// The password is stored as-is (credential hardening is out of scope) but
/// is never serialized into API responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub email: String,
    pub phone_number: String,
    pub points: i32,
    #[sqlx(try_from = "String")]
    pub subscription_plan: SubscriptionPlan,
    pub subscription_end_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 3, message = "username must be at least 3 characters"))]
    pub username: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "phone_number must not be empty"))]
    pub phone_number: String,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub points: Option<i32>,
    pub subscription_plan: Option<SubscriptionPlan>,
    pub subscription_end_date: Option<Timestamp>,
}
