//! Persistence seam for the decision pipeline
//!
//! The pipeline hands the store one [`EventWrite`] per event; the store
//! commits everything in it atomically or nothing at all. Keeping this
//! behind a trait lets the pipeline run against an in-memory store in
//! tests without a database.

use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgEventStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Row to insert into `threat_logs`.
#[derive(Debug, Clone)]
pub struct NewThreatLog {
    pub ip: String,
    pub method: String,
    pub endpoint: String,
    pub payload: String,
    pub response_time: i32,
    pub status_code: i32,
    pub user_agent: String,
    /// None for benign events.
    pub threat_type: Option<String>,
    pub confidence_score: f32,
}

/// Row to insert into `detections`, tied to the log row of the same write.
#[derive(Debug, Clone)]
pub struct NewDetection {
    pub threat_type: String,
    pub confidence_score: f32,
}

/// Request to block an IP. Ignored if the IP already has an active block.
#[derive(Debug, Clone)]
pub struct NewBlockedIp {
    pub ip: String,
    pub reason: String,
}

/// The complete write set for one ingested event.
#[derive(Debug, Clone)]
pub struct EventWrite {
    pub log: NewThreatLog,
    pub detection: Option<NewDetection>,
    pub block: Option<NewBlockedIp>,
}

/// What the store actually committed.
#[derive(Debug, Clone, Copy)]
pub struct PersistOutcome {
    pub log_id: i64,
    pub detection_id: Option<i64>,
    /// False when the block request was skipped because an active block
    /// for the IP already existed (or no block was requested).
    pub block_created: bool,
}

/// Transactional event storage.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Persist one event's write set atomically.
    ///
    /// Implementations must guarantee that at most one *active* blocked-IP
    /// row exists per IP, even under concurrent writes for the same IP,
    /// and that a failure leaves no partial state behind.
    async fn persist(&self, write: EventWrite) -> Result<PersistOutcome, StoreError>;
}
