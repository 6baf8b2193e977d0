//! Inbound log event

use serde::Deserialize;

/// One access-log record as submitted to the ingest endpoint.
///
/// Producers are not trusted to send complete records; every field has a
/// serde default so the detection functions stay total. Unknown fields
/// (the simulators send `timestamp` and `type` tags) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct LogEvent {
    #[serde(default)]
    pub ip: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub payload: String,
    #[serde(default)]
    pub response_time_ms: i32,
    #[serde(default = "default_status_code")]
    pub status_code: i32,
    #[serde(default)]
    pub user_agent: String,
}

fn default_method() -> String {
    "GET".to_string()
}

fn default_status_code() -> i32 {
    200
}
