//! In-memory event store for tests
//!
//! Implements the same contract as the Postgres store: each `persist`
//! call is atomic (one lock acquisition covers the active-block check and
//! every insert), and at most one active block exists per IP.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{EventStore, EventWrite, NewThreatLog, PersistOutcome, StoreError};

#[derive(Debug, Clone)]
pub struct StoredLog {
    pub id: i64,
    pub log: NewThreatLog,
}

#[derive(Debug, Clone)]
pub struct StoredDetection {
    pub id: i64,
    pub log_id: i64,
    pub threat_type: String,
    pub confidence_score: f32,
}

#[derive(Debug, Clone)]
pub struct StoredBlock {
    pub id: i64,
    pub ip: String,
    pub reason: String,
    pub active: bool,
}

#[derive(Default)]
struct Inner {
    logs: Vec<StoredLog>,
    detections: Vec<StoredDetection>,
    blocks: Vec<StoredBlock>,
    next_id: i64,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `persist` fail, for rollback-path tests.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn logs(&self) -> Vec<StoredLog> {
        self.inner.lock().logs.clone()
    }

    pub fn detections(&self) -> Vec<StoredDetection> {
        self.inner.lock().detections.clone()
    }

    pub fn blocks(&self) -> Vec<StoredBlock> {
        self.inner.lock().blocks.clone()
    }

    pub fn active_block_count(&self, ip: &str) -> usize {
        self.inner
            .lock()
            .blocks
            .iter()
            .filter(|b| b.active && b.ip == ip)
            .count()
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn persist(&self, write: EventWrite) -> Result<PersistOutcome, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected failure".to_string()));
        }

        let mut inner = self.inner.lock();

        let log_id = inner.next_id();
        inner.logs.push(StoredLog {
            id: log_id,
            log: write.log,
        });

        let mut detection_id = None;
        if let Some(detection) = write.detection {
            let id = inner.next_id();
            inner.detections.push(StoredDetection {
                id,
                log_id,
                threat_type: detection.threat_type,
                confidence_score: detection.confidence_score,
            });
            detection_id = Some(id);
        }

        let mut block_created = false;
        if let Some(block) = write.block {
            let has_active = inner.blocks.iter().any(|b| b.active && b.ip == block.ip);
            if !has_active {
                let id = inner.next_id();
                inner.blocks.push(StoredBlock {
                    id,
                    ip: block.ip,
                    reason: block.reason,
                    active: true,
                });
                block_created = true;
            }
        }

        Ok(PersistOutcome {
            log_id,
            detection_id,
            block_created,
        })
    }
}
