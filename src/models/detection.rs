//! Detection model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Row};

/// A persisted threat judgment for one log row. Never mutated after
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Detection {
    pub id: i64,
    pub log_id: i64,
    pub threat_type: String,
    pub confidence_score: f32,
    pub timestamp: DateTime<Utc>,
}

impl Detection {
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM detections")
            .fetch_one(pool)
            .await
    }

    /// Most recent detections, newest first.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Detection>(
            "SELECT * FROM detections ORDER BY timestamp DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Detection counts grouped by threat type.
    pub async fn count_by_type(pool: &PgPool) -> Result<Vec<(String, i64)>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT threat_type, COUNT(*) as count
            FROM detections
            GROUP BY threat_type
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| (r.get::<String, _>("threat_type"), r.get::<i64, _>("count")))
            .collect())
    }
}
