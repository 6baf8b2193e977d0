//! PostgreSQL event store

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction};

use super::{
    EventStore, EventWrite, NewBlockedIp, NewDetection, NewThreatLog, PersistOutcome, StoreError,
};

/// Event store backed by the `threat_logs`, `detections` and
/// `blocked_ips` tables. One transaction per event.
#[derive(Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn persist(&self, write: EventWrite) -> Result<PersistOutcome, StoreError> {
        let mut tx = self.pool.begin().await?;

        let log_id = insert_log(&mut tx, &write.log).await?;

        let mut detection_id = None;
        if let Some(detection) = &write.detection {
            detection_id = Some(insert_detection(&mut tx, log_id, detection).await?);
        }

        let mut block_created = false;
        if let Some(block) = &write.block {
            block_created = insert_block_if_no_active(&mut tx, block).await?;
        }

        tx.commit().await?;

        Ok(PersistOutcome {
            log_id,
            detection_id,
            block_created,
        })
    }
}

async fn insert_log(
    tx: &mut Transaction<'_, Postgres>,
    log: &NewThreatLog,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO threat_logs
            (ip, method, endpoint, payload, response_time, status_code, user_agent, threat_type, confidence_score)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id
        "#,
    )
    .bind(&log.ip)
    .bind(&log.method)
    .bind(&log.endpoint)
    .bind(&log.payload)
    .bind(log.response_time)
    .bind(log.status_code)
    .bind(&log.user_agent)
    .bind(&log.threat_type)
    .bind(log.confidence_score)
    .fetch_one(&mut **tx)
    .await?;

    Ok(row.get("id"))
}

async fn insert_detection(
    tx: &mut Transaction<'_, Postgres>,
    log_id: i64,
    detection: &NewDetection,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO detections (log_id, threat_type, confidence_score)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(log_id)
    .bind(&detection.threat_type)
    .bind(detection.confidence_score)
    .fetch_one(&mut **tx)
    .await?;

    Ok(row.get("id"))
}

/// Insert an active block unless one already exists for the IP.
///
/// The partial unique index on `blocked_ips(ip) WHERE status = 'active'`
/// makes this a transactional check-then-insert; a plain read followed by
/// a write would be racy under concurrent bursts from the same IP.
async fn insert_block_if_no_active(
    tx: &mut Transaction<'_, Postgres>,
    block: &NewBlockedIp,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO blocked_ips (ip, reason, status)
        VALUES ($1, $2, 'active')
        ON CONFLICT (ip) WHERE status = 'active' DO NOTHING
        "#,
    )
    .bind(&block.ip)
    .bind(&block.reason)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected() == 1)
}
