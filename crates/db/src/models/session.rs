//! Refresh-token sessions backing `/auth/refresh`.

use sqlx::FromRow;
use telecare_core::types::{DbId, Timestamp};

/// Why a session can no longer be redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeReason {
    /// Exchanged for a new token pair.
    Rotated,
    Logout,
    /// An admin replaced the user's password.
    PasswordReset,
    /// The account was switched to inactive.
    Deactivated,
}

impl RevokeReason {
    /// Value stored in `user_sessions.revoked_reason`.
    pub fn as_str(self) -> &'static str {
        match self {
            RevokeReason::Rotated => "rotated",
            RevokeReason::Logout => "logout",
            RevokeReason::PasswordReset => "password_reset",
            RevokeReason::Deactivated => "deactivated",
        }
    }
}

/// A row from `user_sessions`. Never leaves the server.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub revoked_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RefreshSession {
    pub fn is_live(&self, now: Timestamp) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }
}

/// A session about to be issued alongside a new refresh token.
#[derive(Debug)]
pub struct NewRefreshSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
