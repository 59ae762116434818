//! Repository for the `clinicians` table.

use sqlx::PgPool;
use telecare_core::admin::Ordering;
use telecare_core::types::DbId;

use crate::models::clinician::{Clinician, ClinicianListRow, CreateClinician, UpdateClinician};
use crate::models::list::{ListQuery, Page};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, specialty, created_at, updated_at";

/// Columns of [`ClinicianListRow`] over `clinicians c JOIN users u`.
const LIST_COLUMNS: &str = "c.id, c.user_id, u.username, u.email, c.specialty, c.created_at";

/// `$1` search pattern.
const LIST_WHERE: &str = "($1::TEXT IS NULL
                             OR u.username ILIKE $1
                             OR u.email ILIKE $1
                             OR c.specialty ILIKE $1)";

/// Provides CRUD operations for clinician profiles.
pub struct ClinicianRepo;

impl ClinicianRepo {
    /// Insert a clinician profile. A second profile for the same user fails
    /// with a unique violation on `uq_clinicians_user_id`.
    pub async fn create(pool: &PgPool, input: &CreateClinician) -> Result<Clinician, sqlx::Error> {
        let query = format!(
            "INSERT INTO clinicians (user_id, specialty)
             VALUES ($1, COALESCE($2, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Clinician>(&query)
            .bind(input.user_id)
            .bind(&input.specialty)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Clinician>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clinicians WHERE id = $1");
        sqlx::query_as::<_, Clinician>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the clinician profile belonging to a user.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Clinician>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clinicians WHERE user_id = $1");
        sqlx::query_as::<_, Clinician>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Admin list joined with the owning user; search over username, email
    /// and specialty.
    pub async fn list(
        pool: &PgPool,
        params: &ListQuery,
    ) -> Result<Page<ClinicianListRow>, sqlx::Error> {
        let order = order_column(&params.ordering);
        let dir = params.ordering.direction();
        let query = format!(
            "SELECT {LIST_COLUMNS}
             FROM clinicians c
             JOIN users u ON u.id = c.user_id
             WHERE {LIST_WHERE}
             ORDER BY {order} {dir}, c.id ASC
             LIMIT $2 OFFSET $3"
        );
        let items = sqlx::query_as::<_, ClinicianListRow>(&query)
            .bind(&params.search)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!(
            "SELECT COUNT(*) FROM clinicians c
             JOIN users u ON u.id = c.user_id
             WHERE {LIST_WHERE}"
        );
        let total = sqlx::query_scalar::<_, i64>(&count_query)
            .bind(&params.search)
            .fetch_one(pool)
            .await?;

        Ok(Page { items, total })
    }

    /// Update a clinician profile. Returns `None` if the row does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClinician,
    ) -> Result<Option<Clinician>, sqlx::Error> {
        let query = format!(
            "UPDATE clinicians SET specialty = COALESCE($2, specialty)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Clinician>(&query)
            .bind(id)
            .bind(&input.specialty)
            .fetch_optional(pool)
            .await
    }

    /// Delete the profile only; the user row is untouched.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clinicians WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn order_column(ordering: &Ordering) -> &'static str {
    match ordering.field {
        "user" => "u.username",
        "specialty" => "c.specialty",
        _ => "c.id",
    }
}
