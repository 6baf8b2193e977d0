//! Threat log model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

/// One ingested access-log row. `threat_type` is NULL for benign events
/// and `confidence_score` holds the benign placeholder in that case.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ThreatLog {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub ip: String,
    pub method: String,
    pub endpoint: String,
    pub payload: String,
    pub response_time: i32,
    pub status_code: i32,
    pub user_agent: String,
    pub threat_type: Option<String>,
    pub confidence_score: f32,
}

#[derive(Debug, Deserialize, Default)]
pub struct LogPageQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct LogPage {
    pub logs: Vec<ThreatLog>,
    pub total: i64,
    pub pages: i64,
    pub current_page: i64,
}

impl ThreatLog {
    /// Paginated listing, newest first.
    pub async fn list_page(pool: &PgPool, query: LogPageQuery) -> Result<LogPage, sqlx::Error> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(50).clamp(1, 500);

        let total = Self::count(pool).await?;

        let logs = sqlx::query_as::<_, ThreatLog>(
            r#"
            SELECT * FROM threat_logs
            ORDER BY timestamp DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(pool)
        .await?;

        Ok(LogPage {
            logs,
            total,
            pages: (total + per_page - 1) / per_page,
            current_page: page,
        })
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM threat_logs")
            .fetch_one(pool)
            .await
    }

    /// Full dump for export, oldest first.
    pub async fn export_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, ThreatLog>("SELECT * FROM threat_logs ORDER BY id")
            .fetch_all(pool)
            .await
    }
}
