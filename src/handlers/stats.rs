//! Summary statistics handler

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::models::{BlockedIp, Detection, ThreatLog};
use crate::{AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_logs: i64,
    pub total_threats: i64,
    pub blocked_ips: i64,
    pub threat_distribution: HashMap<String, i64>,
    pub recent_threats: Vec<Detection>,
}

/// Aggregate counts over the persisted tables.
pub async fn overview(State(state): State<AppState>) -> AppResult<Json<StatsResponse>> {
    let total_logs = ThreatLog::count(&state.pool).await?;
    let total_threats = Detection::count(&state.pool).await?;
    let blocked_ips = BlockedIp::count_active(&state.pool).await?;
    let threat_distribution = Detection::count_by_type(&state.pool).await?.into_iter().collect();
    let recent_threats = Detection::recent(&state.pool, 10).await?;

    Ok(Json(StatsResponse {
        total_logs,
        total_threats,
        blocked_ips,
        threat_distribution,
        recent_threats,
    }))
}
