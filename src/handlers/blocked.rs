//! Blocked IP listing handler

use axum::extract::State;
use axum::Json;

use crate::models::BlockedIp;
use crate::{AppResult, AppState};

/// List currently active blocks, newest first.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<BlockedIp>>> {
    let blocked = BlockedIp::list_active(&state.pool).await?;
    Ok(Json(blocked))
}
