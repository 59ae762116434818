//! Repository for the `sensor_frames` table.

use sqlx::PgPool;
use telecare_core::admin::Ordering;
use telecare_core::types::DbId;

use crate::models::list::{ListQuery, Page};
use crate::models::sensor_frame::{
    CreateSensorFrame, SensorFrame, SensorFrameFilter, SensorFrameListRow, UpdateSensorFrame,
};

/// Column list shared across queries to avoid repetition.
///
/// `timestamp` is a type keyword in PostgreSQL, so it is always quoted.
const COLUMNS: &str = "id, patient_id, \"timestamp\", data, created_at, updated_at";

const LIST_COLUMNS: &str = "sf.id, sf.patient_id, u.username AS patient_username, \
                            sf.\"timestamp\", sf.created_at";

const LIST_FROM: &str = "sensor_frames sf
                         JOIN patients p ON p.id = sf.patient_id
                         JOIN users u ON u.id = p.user_id";

/// `$1` search pattern, `$2` patient.
const LIST_WHERE: &str = "($1::TEXT IS NULL OR u.username ILIKE $1 OR u.email ILIKE $1)
                          AND ($2::BIGINT IS NULL OR sf.patient_id = $2)";

/// Provides CRUD operations for telemetry frames.
pub struct SensorFrameRepo;

impl SensorFrameRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateSensorFrame,
    ) -> Result<SensorFrame, sqlx::Error> {
        let query = format!(
            "INSERT INTO sensor_frames (patient_id, \"timestamp\", data)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SensorFrame>(&query)
            .bind(input.patient_id)
            .bind(input.timestamp)
            .bind(&input.data)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SensorFrame>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sensor_frames WHERE id = $1");
        sqlx::query_as::<_, SensorFrame>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Admin list (payload omitted): search over the patient's username and
    /// email, filter by patient.
    pub async fn list(
        pool: &PgPool,
        filter: &SensorFrameFilter,
        params: &ListQuery,
    ) -> Result<Page<SensorFrameListRow>, sqlx::Error> {
        let order = order_column(&params.ordering);
        let dir = params.ordering.direction();
        let query = format!(
            "SELECT {LIST_COLUMNS}
             FROM {LIST_FROM}
             WHERE {LIST_WHERE}
             ORDER BY {order} {dir}, sf.id DESC
             LIMIT $3 OFFSET $4"
        );
        let items = sqlx::query_as::<_, SensorFrameListRow>(&query)
            .bind(&params.search)
            .bind(filter.patient_id)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM {LIST_FROM} WHERE {LIST_WHERE}");
        let total = sqlx::query_scalar::<_, i64>(&count_query)
            .bind(&params.search)
            .bind(filter.patient_id)
            .fetch_one(pool)
            .await?;

        Ok(Page { items, total })
    }

    /// A patient's frames, newest reading first.
    pub async fn list_by_patient(
        pool: &PgPool,
        patient_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SensorFrame>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sensor_frames
             WHERE patient_id = $1
             ORDER BY \"timestamp\" DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, SensorFrame>(&query)
            .bind(patient_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a frame's reading time and/or payload.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSensorFrame,
    ) -> Result<Option<SensorFrame>, sqlx::Error> {
        let query = format!(
            "UPDATE sensor_frames SET
                \"timestamp\" = COALESCE($2, \"timestamp\"),
                data = COALESCE($3, data)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SensorFrame>(&query)
            .bind(id)
            .bind(input.timestamp)
            .bind(&input.data)
            .fetch_optional(pool)
            .await
    }

    /// Delete a frame, cascading to its alerts and comments.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sensor_frames WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn order_column(ordering: &Ordering) -> &'static str {
    match ordering.field {
        "patient" => "u.username",
        "timestamp" => "sf.\"timestamp\"",
        "created_at" => "sf.created_at",
        _ => "sf.id",
    }
}
