//! Feature vector extraction
//!
//! Fixed-layout numeric features derived from a single [`LogEvent`].
//! Extraction is a pure, total function: no event can fail it.

use serde::Serialize;

use super::event::LogEvent;

/// Number of features in the vector. Scorer indices depend on this layout.
pub const FEATURE_COUNT: usize = 12;

/// Feature names in vector order.
pub const FEATURE_LAYOUT: [&str; FEATURE_COUNT] = [
    "payload_len",
    "select_count",
    "union_count",
    "script_count",
    "alert_count",
    "admin_count",
    "password_count",
    "response_time",
    "status_code",
    "is_post",
    "admin_endpoint",
    "login_endpoint",
];

/// Index constants matching [`FEATURE_LAYOUT`].
pub mod idx {
    pub const PAYLOAD_LEN: usize = 0;
    pub const SELECT_COUNT: usize = 1;
    pub const UNION_COUNT: usize = 2;
    pub const SCRIPT_COUNT: usize = 3;
    pub const ALERT_COUNT: usize = 4;
    pub const ADMIN_COUNT: usize = 5;
    pub const PASSWORD_COUNT: usize = 6;
    pub const RESPONSE_TIME: usize = 7;
    pub const STATUS_CODE: usize = 8;
    pub const IS_POST: usize = 9;
    pub const ADMIN_ENDPOINT: usize = 10;
    pub const LOGIN_ENDPOINT: usize = 11;
}

/// Fixed-order feature vector for one event.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureVector {
    pub values: [f32; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn get(&self, index: usize) -> f32 {
        self.values[index]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

/// Extract the feature vector from an event.
///
/// Substring counts are case-insensitive and count every non-overlapping
/// occurrence, not just the first. Payload length is in characters.
pub fn extract(event: &LogEvent) -> FeatureVector {
    let payload = event.payload.to_lowercase();

    FeatureVector {
        values: [
            event.payload.chars().count() as f32,
            count_token(&payload, "select"),
            count_token(&payload, "union"),
            count_token(&payload, "script"),
            count_token(&payload, "alert"),
            count_token(&payload, "admin"),
            count_token(&payload, "password"),
            event.response_time_ms as f32,
            event.status_code as f32,
            flag(event.method == "POST"),
            flag(event.endpoint.contains("/admin")),
            flag(event.endpoint.contains("/login")),
        ],
    }
}

fn count_token(haystack: &str, token: &str) -> f32 {
    haystack.matches(token).count() as f32
}

fn flag(condition: bool) -> f32 {
    if condition {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(payload: &str) -> LogEvent {
        LogEvent {
            ip: "10.0.0.1".to_string(),
            method: "GET".to_string(),
            endpoint: "/".to_string(),
            payload: payload.to_string(),
            response_time_ms: 120,
            status_code: 200,
            user_agent: String::new(),
        }
    }

    #[test]
    fn test_vector_has_fixed_length() {
        let vector = extract(&event("hello"));
        assert_eq!(vector.as_slice().len(), FEATURE_COUNT);
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_payload_length_is_char_count() {
        let vector = extract(&event("' OR 1=1--"));
        assert_eq!(vector.get(idx::PAYLOAD_LEN), 10.0);
    }

    #[test]
    fn test_counts_are_case_insensitive_and_count_all_occurrences() {
        let vector = extract(&event("SELECT a UNION select b"));
        assert_eq!(vector.get(idx::SELECT_COUNT), 2.0);
        assert_eq!(vector.get(idx::UNION_COUNT), 1.0);
    }

    #[test]
    fn test_admin_counted_inside_other_words() {
        let vector = extract(&event("username=admin&password=admin123"));
        assert_eq!(vector.get(idx::ADMIN_COUNT), 2.0);
        assert_eq!(vector.get(idx::PASSWORD_COUNT), 1.0);
    }

    #[test]
    fn test_endpoint_and_method_flags() {
        let mut ev = event("");
        ev.method = "POST".to_string();
        ev.endpoint = "/admin/login".to_string();
        let vector = extract(&ev);
        assert_eq!(vector.get(idx::IS_POST), 1.0);
        assert_eq!(vector.get(idx::ADMIN_ENDPOINT), 1.0);
        assert_eq!(vector.get(idx::LOGIN_ENDPOINT), 1.0);
    }

    #[test]
    fn test_empty_event_extracts_defaults() {
        let ev: LogEvent = serde_json::from_str("{}").unwrap();
        let vector = extract(&ev);
        assert_eq!(vector.get(idx::PAYLOAD_LEN), 0.0);
        assert_eq!(vector.get(idx::STATUS_CODE), 200.0);
        assert_eq!(vector.get(idx::IS_POST), 0.0);
    }
}
