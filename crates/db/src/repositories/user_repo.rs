//! Repository for the `users` table.

use findmydoc_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password, email, phone_number, points, \
                       subscription_plan, subscription_end_date, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row. Points start at 0 and
    /// the plan at `free` (column defaults).
    pub async fn create(exec: impl PgExecutor<'_>, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password, email, phone_number)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password)
            .bind(&input.email)
            .bind(&input.phone_number)
            .fetch_one(exec)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(exec: impl PgExecutor<'_>, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(exec)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        exec: impl PgExecutor<'_>,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(exec)
            .await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        exec: impl PgExecutor<'_>,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                email = COALESCE($2, email),
                phone_number = COALESCE($3, phone_number),
                points = COALESCE($4, points),
                subscription_plan = COALESCE($5, subscription_plan),
                subscription_end_date = COALESCE($6, subscription_end_date),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.email)
            .bind(&input.phone_number)
            .bind(input.points)
            .bind(input.subscription_plan.map(|p| p.as_str()))
            .bind(input.subscription_end_date)
            .fetch_optional(exec)
            .await
    }

    /// Add `delta` to a user's point balance, returning the updated row.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn add_points(
        exec: impl PgExecutor<'_>,
        id: DbId,
        delta: i32,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET points = points + $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(delta)
            .fetch_optional(exec)
            .await
    }
}
