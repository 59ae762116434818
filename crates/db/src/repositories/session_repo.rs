//! Refresh-token session store.
//!
//! A refresh token is single use: [`SessionRepo::redeem`] marks the session
//! `rotated` in the same statement that reads it, so two concurrent refreshes
//! with one token cannot both succeed. Password resets, deactivation and
//! logout revoke every live session of the user with their own reason.

use sqlx::PgPool;
use telecare_core::types::DbId;

use crate::models::session::{NewRefreshSession, RefreshSession, RevokeReason};

const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, revoked_at, \
                       revoked_reason, created_at, updated_at";

/// Live-session predicate.
const LIVE: &str = "revoked_at IS NULL AND expires_at > NOW()";

pub struct SessionRepo;

impl SessionRepo {
    /// Store the hash of a newly issued refresh token.
    pub async fn issue(
        pool: &PgPool,
        input: &NewRefreshSession,
    ) -> Result<RefreshSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RefreshSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Consume a live session by token hash, marking it `rotated`.
    ///
    /// Returns the session as it was redeemed, or `None` when the hash is
    /// unknown, expired or already revoked.
    pub async fn redeem(
        pool: &PgPool,
        refresh_token_hash: &str,
    ) -> Result<Option<RefreshSession>, sqlx::Error> {
        let query = format!(
            "UPDATE user_sessions
             SET revoked_at = NOW(), revoked_reason = $2
             WHERE refresh_token_hash = $1 AND {LIVE}
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RefreshSession>(&query)
            .bind(refresh_token_hash)
            .bind(RevokeReason::Rotated.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Revoke every live session of a user. Returns how many were revoked.
    pub async fn revoke_all_for_user(
        pool: &PgPool,
        user_id: DbId,
        reason: RevokeReason,
    ) -> Result<u64, sqlx::Error> {
        let query = format!(
            "UPDATE user_sessions
             SET revoked_at = NOW(), revoked_reason = $2
             WHERE user_id = $1 AND {LIVE}"
        );
        let result = sqlx::query(&query)
            .bind(user_id)
            .bind(reason.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Live sessions of a user, newest first.
    pub async fn live_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<RefreshSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE user_id = $1 AND {LIVE}
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, RefreshSession>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Delete sessions that can never be redeemed again. Run at startup.
    pub async fn purge_stale(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM user_sessions WHERE revoked_at IS NOT NULL OR expires_at <= NOW()",
        )
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
