//! Log ingestion and listing handlers

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use crate::detection::{pipeline, LogEvent, ThreatLabel};
use crate::models::{LogPage, LogPageQuery, ThreatLog};
use crate::{AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub status: &'static str,
    pub threat_detected: bool,
    pub threat_type: Option<ThreatLabel>,
    pub confidence: f32,
}

/// Ingest one event and run it through the decision pipeline.
///
/// A body that fails to parse is rejected by the extractor before any
/// processing; a store failure rolls back the whole event.
pub async fn ingest(
    State(state): State<AppState>,
    Json(event): Json<LogEvent>,
) -> AppResult<Json<IngestResponse>> {
    let verdict = pipeline::process_event(state.store.as_ref(), &state.scoring, &event).await?;

    Ok(Json(IngestResponse {
        status: "success",
        threat_detected: verdict.is_threat,
        threat_type: verdict.threat_type,
        confidence: verdict.confidence,
    }))
}

/// Paginated log listing, newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<LogPageQuery>,
) -> AppResult<Json<LogPage>> {
    let page = ThreatLog::list_page(&state.pool, query).await?;
    Ok(Json(page))
}
