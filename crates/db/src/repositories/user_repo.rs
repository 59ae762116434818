//! Repository for the `users` table.

use sqlx::PgPool;
use telecare_core::admin::Ordering;
use telecare_core::roles::ROLE_PATIENT;
use telecare_core::types::DbId;

use crate::models::list::{ListQuery, Page};
use crate::models::user::{CreateUser, UpdateUser, User, UserFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, full_name, password_hash, role, is_active, \
                       last_login_at, created_at, updated_at";

/// Predicate shared by the admin list and its count query.
///
/// `$1` search pattern, `$2` role, `$3` is_active.
const LIST_WHERE: &str = "($1::TEXT IS NULL
                             OR username ILIKE $1
                             OR email ILIKE $1
                             OR full_name ILIKE $1)
                          AND ($2::TEXT IS NULL OR role = $2)
                          AND ($3::BOOLEAN IS NULL OR is_active = $3)";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A duplicate email (compared case-insensitively) or username fails with
    /// a unique violation on `uq_users_email` / `uq_users_username`.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, full_name, password_hash, role)
             VALUES ($1, $2, $3, $4, COALESCE($5, '{ROLE_PATIENT}'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.full_name)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email, ignoring case.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE lower(email) = lower($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Admin list: search over username/email/full name, filter by role and
    /// active flag.
    pub async fn list(
        pool: &PgPool,
        filter: &UserFilter,
        params: &ListQuery,
    ) -> Result<Page<User>, sqlx::Error> {
        let order = order_column(&params.ordering);
        let dir = params.ordering.direction();
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE {LIST_WHERE}
             ORDER BY {order} {dir}, id ASC
             LIMIT $4 OFFSET $5"
        );
        let items = sqlx::query_as::<_, User>(&query)
            .bind(&params.search)
            .bind(&filter.role)
            .bind(filter.is_active)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM users WHERE {LIST_WHERE}");
        let total = sqlx::query_scalar::<_, i64>(&count_query)
            .bind(&params.search)
            .bind(&filter.role)
            .bind(filter.is_active)
            .fetch_one(pool)
            .await?;

        Ok(Page { items, total })
    }

    /// Active users holding `role`, ordered by username.
    pub async fn list_by_role(pool: &PgPool, role: &str) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE role = $1 AND is_active = true
             ORDER BY username ASC"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(role)
            .fetch_all(pool)
            .await
    }

    /// Update a user. Only non-`None` fields in `input` are applied;
    /// `full_name: Some(None)` clears the name.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                full_name = CASE WHEN $4 THEN $5 ELSE full_name END,
                role = COALESCE($6, role),
                is_active = COALESCE($7, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.email)
            .bind(input.full_name.is_some())
            .bind(input.full_name.as_ref().and_then(|v| v.as_deref()))
            .bind(&input.role)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Change a user's role. Returns `true` if the row was updated.
    pub async fn set_role(pool: &PgPool, id: DbId, role: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET role = $2 WHERE id = $1")
            .bind(id)
            .bind(role)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-deactivate a user by setting `is_active = false`.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET is_active = false WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Update a user's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Stamp `last_login_at` with the current time.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Hard-delete a user.
    ///
    /// Cascades to the user's clinician/patient profile, sessions and
    /// comments; patients assigned to this user keep their row with the
    /// clinician cleared. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Map a registry sort field to its SQL column.
fn order_column(ordering: &Ordering) -> &'static str {
    match ordering.field {
        "email" => "email",
        "username" => "username",
        "role" => "role",
        "is_active" => "is_active",
        "created_at" => "created_at",
        _ => "id",
    }
}
