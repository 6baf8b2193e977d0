//! Blocked IP model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

/// A block record for a source IP. Inactive rows accumulate as history;
/// a partial unique index guarantees at most one active row per IP.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BlockedIp {
    pub id: i64,
    pub ip: String,
    pub reason: String,
    pub blocked_at: DateTime<Utc>,
    pub status: String,
}

impl BlockedIp {
    /// Active blocks, newest first.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, BlockedIp>(
            "SELECT * FROM blocked_ips WHERE status = 'active' ORDER BY blocked_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn count_active(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM blocked_ips WHERE status = 'active'")
            .fetch_one(pool)
            .await
    }
}
