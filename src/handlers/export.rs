//! Log export handler

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::models::ThreatLog;
use crate::{AppError, AppResult, AppState};

/// Export the full log table as a CSV or JSON attachment.
pub async fn export(
    State(state): State<AppState>,
    Path(format): Path<String>,
) -> AppResult<Response> {
    let logs = ThreatLog::export_all(&state.pool).await?;
    let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");

    match format.as_str() {
        "csv" => {
            let body = to_csv(&logs);
            Ok(attachment(
                "text/csv",
                format!("logs_export_{}.csv", stamp),
                body,
            ))
        }
        "json" => {
            let body = serde_json::to_string_pretty(&logs)
                .map_err(|e| AppError::Internal(e.to_string()))?;
            Ok(attachment(
                "application/json",
                format!("logs_export_{}.json", stamp),
                body,
            ))
        }
        other => Err(AppError::InvalidInput(format!(
            "Unsupported export format: {}",
            other
        ))),
    }
}

fn attachment(content_type: &'static str, filename: String, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}

fn to_csv(logs: &[ThreatLog]) -> String {
    let mut out = String::from(
        "id,timestamp,ip,method,endpoint,payload,response_time,status_code,user_agent,threat_type,confidence_score\n",
    );

    for log in logs {
        let fields = [
            log.id.to_string(),
            log.timestamp.to_rfc3339(),
            log.ip.clone(),
            log.method.clone(),
            log.endpoint.clone(),
            log.payload.clone(),
            log.response_time.to_string(),
            log.status_code.to_string(),
            log.user_agent.clone(),
            log.threat_type.clone().unwrap_or_default(),
            log.confidence_score.to_string(),
        ];
        let line: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }

    out
}

/// Quote a field if it contains a delimiter, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
