//! Repository for the `patients` table.

use sqlx::PgPool;
use telecare_core::admin::Ordering;
use telecare_core::types::DbId;

use crate::models::list::{ListQuery, Page};
use crate::models::patient::{CreatePatient, Patient, PatientFilter, PatientListRow, UpdatePatient};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, assigned_clinician_id, date_of_birth, medical_notes, \
                       risk_category, created_at, updated_at";

/// Columns of [`PatientListRow`].
const LIST_COLUMNS: &str = "p.id, p.user_id, u.username, u.email, p.assigned_clinician_id, \
                            cu.username AS assigned_clinician_username, p.date_of_birth, \
                            p.risk_category, p.created_at";

/// Patient joined with its user and (optionally) the assigned clinician user.
const LIST_FROM: &str = "patients p
                         JOIN users u ON u.id = p.user_id
                         LEFT JOIN users cu ON cu.id = p.assigned_clinician_id";

/// `$1` search pattern, `$2` assigned clinician, `$3` risk category.
const LIST_WHERE: &str = "($1::TEXT IS NULL OR u.username ILIKE $1 OR u.email ILIKE $1)
                          AND ($2::BIGINT IS NULL OR p.assigned_clinician_id = $2)
                          AND ($3::TEXT IS NULL OR p.risk_category = $3)";

/// Provides CRUD operations for patient profiles.
pub struct PatientRepo;

impl PatientRepo {
    /// Insert a patient profile. A second profile for the same user fails
    /// with a unique violation on `uq_patients_user_id`.
    pub async fn create(pool: &PgPool, input: &CreatePatient) -> Result<Patient, sqlx::Error> {
        let query = format!(
            "INSERT INTO patients
                (user_id, assigned_clinician_id, date_of_birth, medical_notes, risk_category)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(input.user_id)
            .bind(input.assigned_clinician_id)
            .bind(input.date_of_birth)
            .bind(&input.medical_notes)
            .bind(&input.risk_category)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM patients WHERE id = $1");
        sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the patient profile belonging to a user.
    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM patients WHERE user_id = $1");
        sqlx::query_as::<_, Patient>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Admin list: search over the patient's username and email, filter by
    /// assigned clinician and risk category.
    pub async fn list(
        pool: &PgPool,
        filter: &PatientFilter,
        params: &ListQuery,
    ) -> Result<Page<PatientListRow>, sqlx::Error> {
        let order = order_column(&params.ordering);
        let dir = params.ordering.direction();
        let query = format!(
            "SELECT {LIST_COLUMNS}
             FROM {LIST_FROM}
             WHERE {LIST_WHERE}
             ORDER BY {order} {dir}, p.id ASC
             LIMIT $4 OFFSET $5"
        );
        let items = sqlx::query_as::<_, PatientListRow>(&query)
            .bind(&params.search)
            .bind(filter.assigned_clinician_id)
            .bind(&filter.risk_category)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM {LIST_FROM} WHERE {LIST_WHERE}");
        let total = sqlx::query_scalar::<_, i64>(&count_query)
            .bind(&params.search)
            .bind(filter.assigned_clinician_id)
            .bind(&filter.risk_category)
            .fetch_one(pool)
            .await?;

        Ok(Page { items, total })
    }

    /// Patients assigned to a clinician user, ordered by ID.
    pub async fn list_by_clinician(
        pool: &PgPool,
        clinician_user_id: DbId,
    ) -> Result<Vec<Patient>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM patients
             WHERE assigned_clinician_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(clinician_user_id)
            .fetch_all(pool)
            .await
    }

    /// Partially update a patient profile.
    ///
    /// Fields whose outer `Option` is `None` keep their value; `Some(None)`
    /// writes NULL. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePatient,
    ) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!(
            "UPDATE patients SET
                date_of_birth = CASE WHEN $2 THEN $3 ELSE date_of_birth END,
                medical_notes = CASE WHEN $4 THEN $5 ELSE medical_notes END,
                risk_category = CASE WHEN $6 THEN $7 ELSE risk_category END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .bind(input.date_of_birth.is_some())
            .bind(input.date_of_birth.flatten())
            .bind(input.medical_notes.is_some())
            .bind(input.medical_notes.as_ref().and_then(|v| v.as_deref()))
            .bind(input.risk_category.is_some())
            .bind(input.risk_category.as_ref().and_then(|v| v.as_deref()))
            .fetch_optional(pool)
            .await
    }

    /// Assign (`Some`) or unassign (`None`) the patient's clinician.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_assigned_clinician(
        pool: &PgPool,
        id: DbId,
        clinician_user_id: Option<DbId>,
    ) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!(
            "UPDATE patients SET assigned_clinician_id = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .bind(clinician_user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a patient profile, cascading to its sensor frames, alerts and
    /// the comments on those frames.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn order_column(ordering: &Ordering) -> &'static str {
    match ordering.field {
        "user" => "u.username",
        "assigned_clinician" => "cu.username",
        "date_of_birth" => "p.date_of_birth",
        _ => "p.id",
    }
}
