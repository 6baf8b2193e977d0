//! Decision pipeline
//!
//! Orchestrates one event end to end: extract features, classify, score,
//! decide threat/benign, then hand the full write set (log row, optional
//! detection, optional block request) to the store as a single atomic
//! unit.

use serde::Serialize;

use crate::store::{EventStore, EventWrite, NewBlockedIp, NewDetection, NewThreatLog, StoreError};

use super::classifier::{self, ThreatLabel};
use super::event::LogEvent;
use super::features;
use super::scorer::{self, ScoringConfig};

/// Confidence recorded for events below the threat threshold. The
/// computed probability is deliberately not stored for benign rows.
pub const BENIGN_CONFIDENCE: f32 = 0.1;

/// Outcome of processing one event.
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    pub is_threat: bool,
    pub threat_type: Option<ThreatLabel>,
    pub confidence: f32,
    /// True when this event created a new active block for its IP.
    pub block_created: bool,
}

/// Process one event: score it, persist it, and auto-block its IP when
/// the score crosses the block threshold.
///
/// The store call is the only fallible step; on error nothing about the
/// event is committed and the caller may retry.
pub async fn process_event(
    store: &dyn EventStore,
    config: &ScoringConfig,
    event: &LogEvent,
) -> Result<Verdict, StoreError> {
    let features = features::extract(event);
    let label = classifier::classify(event);
    let probability = scorer::score(&features, config);

    let is_threat = probability > config.threat_threshold;

    let log = NewThreatLog {
        ip: event.ip.clone(),
        method: event.method.clone(),
        endpoint: event.endpoint.clone(),
        payload: event.payload.clone(),
        response_time: event.response_time_ms,
        status_code: event.status_code,
        user_agent: event.user_agent.clone(),
        threat_type: is_threat.then(|| label.as_str().to_string()),
        confidence_score: if is_threat { probability } else { BENIGN_CONFIDENCE },
    };

    let detection = is_threat.then(|| NewDetection {
        threat_type: label.as_str().to_string(),
        confidence_score: probability,
    });

    let block = (is_threat && probability > config.block_threshold).then(|| NewBlockedIp {
        ip: event.ip.clone(),
        reason: format!("{} detected with {:.2} confidence", label, probability),
    });

    let outcome = store.persist(EventWrite { log, detection, block }).await?;

    if outcome.block_created {
        tracing::warn!(ip = %event.ip, %label, probability, "auto-blocked IP");
    } else if is_threat {
        tracing::debug!(ip = %event.ip, %label, probability, "threat logged");
    }

    Ok(Verdict {
        is_threat,
        threat_type: is_threat.then_some(label),
        confidence: probability,
        block_created: outcome.block_created,
    })
}
