//! Threat type classifier
//!
//! Ordered decision list over the raw event: the first matching rule
//! wins, so an SQLi-looking payload on an admin POST endpoint is labeled
//! SQLi, never BruteForce. Deterministic and total.

use std::fmt;

use serde::Serialize;

use super::event::LogEvent;

/// Payload tokens that indicate SQL injection.
const SQL_TOKENS: [&str; 5] = ["select", "union", "drop", "insert", "'"];

/// Payload tokens that indicate cross-site scripting.
const XSS_TOKENS: [&str; 5] = ["script", "alert", "onerror", "<", ">"];

/// Endpoint extensions probed by scanners.
const SCAN_EXTENSIONS: [&str; 3] = [".php", ".asp", ".jsp"];

/// Response time above which a request is treated as DDoS fallout.
const DDOS_RESPONSE_TIME_MS: i32 = 5000;

/// Threat type assigned to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ThreatLabel {
    #[serde(rename = "SQLi")]
    Sqli,
    #[serde(rename = "XSS")]
    Xss,
    BruteForce,
    #[serde(rename = "DDoS")]
    Ddos,
    PortScan,
    Unknown,
}

impl ThreatLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLabel::Sqli => "SQLi",
            ThreatLabel::Xss => "XSS",
            ThreatLabel::BruteForce => "BruteForce",
            ThreatLabel::Ddos => "DDoS",
            ThreatLabel::PortScan => "PortScan",
            ThreatLabel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ThreatLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify the threat type of an event.
pub fn classify(event: &LogEvent) -> ThreatLabel {
    let payload = event.payload.to_lowercase();
    let endpoint = event.endpoint.to_lowercase();

    if SQL_TOKENS.iter().any(|t| payload.contains(t)) {
        ThreatLabel::Sqli
    } else if XSS_TOKENS.iter().any(|t| payload.contains(t)) {
        ThreatLabel::Xss
    } else if endpoint.contains("admin") && event.method == "POST" {
        ThreatLabel::BruteForce
    } else if event.response_time_ms > DDOS_RESPONSE_TIME_MS {
        ThreatLabel::Ddos
    } else if SCAN_EXTENSIONS.iter().any(|e| endpoint.contains(e)) {
        ThreatLabel::PortScan
    } else {
        ThreatLabel::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(method: &str, endpoint: &str, payload: &str) -> LogEvent {
        LogEvent {
            ip: "10.0.0.1".to_string(),
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            payload: payload.to_string(),
            response_time_ms: 100,
            status_code: 200,
            user_agent: String::new(),
        }
    }

    #[test]
    fn test_sql_injection_tokens() {
        assert_eq!(classify(&event("GET", "/search", "1 UNION SELECT *")), ThreatLabel::Sqli);
        assert_eq!(classify(&event("GET", "/login", "' OR 1=1--")), ThreatLabel::Sqli);
    }

    #[test]
    fn test_xss_tokens() {
        assert_eq!(
            classify(&event("GET", "/comment", "script injection attempt")),
            ThreatLabel::Xss
        );
        assert_eq!(
            classify(&event("POST", "/comment", "<img src=x onerror=alert(1)>")),
            ThreatLabel::Xss
        );
    }

    #[test]
    fn test_quoted_xss_payload_classifies_as_sqli() {
        // The apostrophe rule runs first, so a quoted XSS payload lands
        // in the SQLi bucket.
        assert_eq!(
            classify(&event("GET", "/search", "'><script>alert('XSS')</script>")),
            ThreatLabel::Sqli
        );
    }

    #[test]
    fn test_brute_force_requires_admin_endpoint_and_post() {
        assert_eq!(
            classify(&event("POST", "/admin/login", "username=root&password=toor")),
            ThreatLabel::BruteForce
        );
        assert_eq!(
            classify(&event("GET", "/admin/login", "username=root&password=toor")),
            ThreatLabel::Unknown
        );
    }

    #[test]
    fn test_ddos_on_slow_response() {
        let mut ev = event("GET", "/home", "");
        ev.response_time_ms = 9000;
        assert_eq!(classify(&ev), ThreatLabel::Ddos);
        ev.response_time_ms = 5000;
        assert_eq!(classify(&ev), ThreatLabel::Unknown);
    }

    #[test]
    fn test_port_scan_extensions() {
        assert_eq!(classify(&event("GET", "/config.PHP", "")), ThreatLabel::PortScan);
        assert_eq!(classify(&event("GET", "/index.jsp", "")), ThreatLabel::PortScan);
    }

    #[test]
    fn test_rule_priority_sqli_beats_brute_force_and_port_scan() {
        // admin POST endpoint with a scanner extension, but the payload
        // contains "select": the first rule wins.
        let ev = event("POST", "/admin.php", "select * from users");
        assert_eq!(classify(&ev), ThreatLabel::Sqli);
    }

    #[test]
    fn test_unknown_fallback() {
        assert_eq!(classify(&event("GET", "/home", "")), ThreatLabel::Unknown);
    }

    #[test]
    fn test_label_strings() {
        assert_eq!(ThreatLabel::BruteForce.to_string(), "BruteForce");
        assert_eq!(serde_json::to_string(&ThreatLabel::Sqli).unwrap(), "\"SQLi\"");
        assert_eq!(serde_json::to_string(&ThreatLabel::Ddos).unwrap(), "\"DDoS\"");
    }
}
