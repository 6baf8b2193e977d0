//! Heuristic probability scorer
//!
//! Additive weighted scoring over the feature vector, clamped to [0, 1].
//! Not a calibrated probability; purely a rule-engine score.

use serde::{Deserialize, Serialize};

use super::features::{idx, FeatureVector};

// ============================================================================
// DEFAULT WEIGHTS & THRESHOLDS
// ============================================================================

/// Payload length above which the long-payload weight applies.
pub const LONG_PAYLOAD_MIN: f32 = 50.0;

/// Status codes treated as error responses worth a score bump.
pub const ERROR_STATUS_CODES: [i32; 3] = [500, 403, 401];

pub const LONG_PAYLOAD_WEIGHT: f32 = 0.4;
pub const SQL_TOKEN_WEIGHT: f32 = 0.6;
pub const XSS_TOKEN_WEIGHT: f32 = 0.6;
pub const CREDENTIAL_TOKEN_WEIGHT: f32 = 0.7;
pub const ERROR_STATUS_WEIGHT: f32 = 0.3;
pub const ADMIN_POST_WEIGHT: f32 = 0.5;

/// Score above which an event is a threat (strictly greater).
pub const THREAT_THRESHOLD: f32 = 0.2;

/// Score above which the source IP is auto-blocked (strictly greater).
pub const BLOCK_THRESHOLD: f32 = 0.8;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Weights and thresholds for the scorer and the decision pipeline.
///
/// Passed in rather than baked into the scoring function so tests and
/// deployments can tune the contributions independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Added when payload length exceeds [`LONG_PAYLOAD_MIN`].
    pub long_payload: f32,
    /// Added when the payload contains "select" or "union".
    pub sql_tokens: f32,
    /// Added when the payload contains "script" or "alert".
    pub xss_tokens: f32,
    /// Added when the payload contains "admin" or "password".
    pub credential_tokens: f32,
    /// Added when the status code is one of [`ERROR_STATUS_CODES`].
    pub error_status: f32,
    /// Added when the request is a POST to a "/admin" endpoint.
    pub admin_post: f32,
    /// Above this score the event is a threat.
    pub threat_threshold: f32,
    /// Above this score the source IP is auto-blocked.
    pub block_threshold: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            long_payload: LONG_PAYLOAD_WEIGHT,
            sql_tokens: SQL_TOKEN_WEIGHT,
            xss_tokens: XSS_TOKEN_WEIGHT,
            credential_tokens: CREDENTIAL_TOKEN_WEIGHT,
            error_status: ERROR_STATUS_WEIGHT,
            admin_post: ADMIN_POST_WEIGHT,
            threat_threshold: THREAT_THRESHOLD,
            block_threshold: BLOCK_THRESHOLD,
        }
    }
}

// ============================================================================
// SCORING
// ============================================================================

/// Score a feature vector against the configured weights.
///
/// All contributions are non-negative, so the result needs clamping only
/// at the top. The error-status contribution is applied exactly once.
pub fn score(features: &FeatureVector, config: &ScoringConfig) -> f32 {
    let mut score = 0.0f32;

    if features.get(idx::PAYLOAD_LEN) > LONG_PAYLOAD_MIN {
        score += config.long_payload;
    }

    if features.get(idx::SELECT_COUNT) > 0.0 || features.get(idx::UNION_COUNT) > 0.0 {
        score += config.sql_tokens;
    }

    if features.get(idx::SCRIPT_COUNT) > 0.0 || features.get(idx::ALERT_COUNT) > 0.0 {
        score += config.xss_tokens;
    }

    if features.get(idx::ADMIN_COUNT) > 0.0 || features.get(idx::PASSWORD_COUNT) > 0.0 {
        score += config.credential_tokens;
    }

    let status = features.get(idx::STATUS_CODE) as i32;
    if ERROR_STATUS_CODES.contains(&status) {
        score += config.error_status;
    }

    if features.get(idx::IS_POST) > 0.0 && features.get(idx::ADMIN_ENDPOINT) > 0.0 {
        score += config.admin_post;
    }

    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::event::LogEvent;
    use crate::detection::features::extract;

    fn features_for(method: &str, endpoint: &str, payload: &str, status: i32) -> FeatureVector {
        extract(&LogEvent {
            ip: "10.0.0.1".to_string(),
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            payload: payload.to_string(),
            response_time_ms: 100,
            status_code: status,
            user_agent: String::new(),
        })
    }

    #[test]
    fn test_benign_event_scores_zero() {
        let features = features_for("GET", "/home", "", 200);
        assert_eq!(score(&features, &ScoringConfig::default()), 0.0);
    }

    #[test]
    fn test_quote_only_sqli_payload_scores_zero() {
        // Classified as SQLi by the apostrophe rule, but none of the
        // scorer's weighted conditions trigger: classification and
        // scoring are independent.
        let features = features_for("GET", "/login", "' OR 1=1--", 200);
        assert_eq!(score(&features, &ScoringConfig::default()), 0.0);
    }

    #[test]
    fn test_long_payload_with_error_status() {
        let features = features_for("GET", "/search", &"x".repeat(80), 500);
        let result = score(&features, &ScoringConfig::default());
        assert!((result - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_error_status_applied_once_per_code() {
        let config = ScoringConfig::default();
        for status in ERROR_STATUS_CODES {
            let features = features_for("GET", "/home", "", status);
            assert!((score(&features, &config) - config.error_status).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_score_is_clamped_to_one() {
        let payload = format!("admin password select union script alert {}", "x".repeat(60));
        let features = features_for("POST", "/admin", &payload, 500);
        assert_eq!(score(&features, &ScoringConfig::default()), 1.0);
    }

    #[test]
    fn test_admin_post_requires_both_flags() {
        let config = ScoringConfig::default();
        let get_admin = features_for("GET", "/admin", "", 200);
        assert_eq!(score(&get_admin, &config), 0.0);
        let post_other = features_for("POST", "/contact", "", 200);
        assert_eq!(score(&post_other, &config), 0.0);
        let post_admin = features_for("POST", "/admin", "", 200);
        assert!((score(&post_admin, &config) - config.admin_post).abs() < f32::EPSILON);
    }

    #[test]
    fn test_custom_weights_are_honored() {
        let config = ScoringConfig {
            long_payload: 0.2,
            ..Default::default()
        };
        let features = features_for("GET", "/search", &"x".repeat(80), 200);
        assert!((score(&features, &config) - 0.2).abs() < f32::EPSILON);
    }
}
