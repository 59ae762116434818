//! Repository for the `alerts` table.

use sqlx::PgPool;
use telecare_core::admin::Ordering;
use telecare_core::types::DbId;

use crate::models::alert::{Alert, AlertFilter, AlertListRow, CreateAlert};
use crate::models::list::{ListQuery, Page};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, patient_id, sensor_frame_id, alert_type, severity, created_at, updated_at";

const LIST_COLUMNS: &str = "a.id, a.patient_id, u.username AS patient_username, \
                            a.sensor_frame_id, a.alert_type, a.severity, a.created_at";

const LIST_FROM: &str = "alerts a
                         JOIN patients p ON p.id = a.patient_id
                         JOIN users u ON u.id = p.user_id";

/// `$1` search pattern, `$2` severity, `$3` alert type.
const LIST_WHERE: &str = "($1::TEXT IS NULL OR u.username ILIKE $1 OR u.email ILIKE $1)
                          AND ($2::TEXT IS NULL OR a.severity = $2)
                          AND ($3::TEXT IS NULL OR a.alert_type = $3)";

/// Provides CRUD operations for alerts.
pub struct AlertRepo;

impl AlertRepo {
    pub async fn create(pool: &PgPool, input: &CreateAlert) -> Result<Alert, sqlx::Error> {
        let query = format!(
            "INSERT INTO alerts (patient_id, sensor_frame_id, alert_type, severity)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(input.patient_id)
            .bind(input.sensor_frame_id)
            .bind(&input.alert_type)
            .bind(&input.severity)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM alerts WHERE id = $1");
        sqlx::query_as::<_, Alert>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Admin list: search over the patient's username and email, filter by
    /// severity and alert type (exact match).
    pub async fn list(
        pool: &PgPool,
        filter: &AlertFilter,
        params: &ListQuery,
    ) -> Result<Page<AlertListRow>, sqlx::Error> {
        let order = order_column(&params.ordering);
        let dir = params.ordering.direction();
        let query = format!(
            "SELECT {LIST_COLUMNS}
             FROM {LIST_FROM}
             WHERE {LIST_WHERE}
             ORDER BY {order} {dir}, a.id DESC
             LIMIT $4 OFFSET $5"
        );
        let items = sqlx::query_as::<_, AlertListRow>(&query)
            .bind(&params.search)
            .bind(&filter.severity)
            .bind(&filter.alert_type)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM {LIST_FROM} WHERE {LIST_WHERE}");
        let total = sqlx::query_scalar::<_, i64>(&count_query)
            .bind(&params.search)
            .bind(&filter.severity)
            .bind(&filter.alert_type)
            .fetch_one(pool)
            .await?;

        Ok(Page { items, total })
    }

    /// A patient's alerts, newest first.
    pub async fn list_by_patient(pool: &PgPool, patient_id: DbId) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alerts
             WHERE patient_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(patient_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM alerts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn order_column(ordering: &Ordering) -> &'static str {
    match ordering.field {
        "patient" => "u.username",
        "alert_type" => "a.alert_type",
        "severity" => "a.severity",
        "created_at" => "a.created_at",
        _ => "a.id",
    }
}
