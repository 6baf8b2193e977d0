//! Synthetic traffic generator
//!
//! Replays the attack and background-traffic profiles against a running
//! LogShield server, one POST to `/api/logs` per generated event.
//!
//! Usage: `trafficgen [profile] [count] [target]`
//! where profile is one of `normal`, `sqli`, `xss`, `brute-force`,
//! `port-scan` or `mixed` (default), count defaults to 50 and target to
//! `http://localhost:8080`.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::{json, Value};

const USER_AGENTS: [&str; 6] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:91.0) Gecko/20100101",
    "curl/7.68.0",
    "python-requests/2.25.1",
];

const SQLI_PAYLOADS: [&str; 8] = [
    "' OR '1'='1",
    "' OR 1=1--",
    "admin'--",
    "' UNION SELECT NULL--",
    "' UNION SELECT username,password FROM users--",
    "'; DROP TABLE users; --",
    "'; INSERT INTO users VALUES('hacker','password'); --",
    "' AND (SELECT COUNT(*) FROM users) > 0 --",
];

const XSS_PAYLOADS: [&str; 6] = [
    "<script>alert('XSS')</script>",
    "<script>alert(document.cookie)</script>",
    "<img src=x onerror=alert('XSS')>",
    "<svg onload=alert('XSS')>",
    "<input onfocus=alert('XSS') autofocus>",
    "javascript:alert('XSS')",
];

const USERNAMES: [&str; 8] = [
    "admin", "administrator", "root", "user", "guest", "test", "oracle", "postgres",
];

const PASSWORDS: [&str; 8] = [
    "password", "123456", "password123", "admin", "qwerty", "abc123", "Password1", "welcome",
];

const SCAN_ENDPOINTS: [&str; 8] = [
    "/.env", "/admin.php", "/config.php", "/backup.zip",
    "/.htaccess", "/wp-admin", "/phpmyadmin", "/index.asp",
];

const NORMAL_ENDPOINTS: [&str; 8] = [
    "/", "/home", "/about", "/contact", "/products", "/blog", "/news", "/help",
];

const NORMAL_PAYLOADS: [&str; 5] = [
    "search term", "user query", "contact form", "product review", "feedback",
];

const PROFILES: [&str; 5] = ["normal", "sqli", "xss", "brute-force", "port-scan"];

fn random_ip(rng: &mut impl Rng) -> String {
    format!(
        "{}.{}.{}.{}",
        rng.gen_range(1..=255),
        rng.gen_range(1..=255),
        rng.gen_range(1..=255),
        rng.gen_range(1..=255)
    )
}

fn pick<'a>(rng: &mut impl Rng, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or("")
}

fn weighted(rng: &mut impl Rng, items: &[i32], weights: &[u32]) -> i32 {
    let dist = WeightedIndex::new(weights).expect("static weight table");
    items[dist.sample(rng)]
}

fn generate(profile: &str) -> Value {
    let mut rng = rand::thread_rng();
    let ip = random_ip(&mut rng);
    let user_agent = pick(&mut rng, &USER_AGENTS);

    match profile {
        "sqli" => json!({
            "ip": ip,
            "method": if rng.gen_bool(0.5) { "GET" } else { "POST" },
            "endpoint": pick(&mut rng, &["/login", "/search", "/user", "/admin", "/api/login"]),
            "payload": pick(&mut rng, &SQLI_PAYLOADS),
            "response_time_ms": rng.gen_range(200..2000),
            "status_code": weighted(&mut rng, &[200, 500, 401, 403, 404], &[10, 40, 20, 15, 15]),
            "user_agent": user_agent,
        }),
        "xss" => json!({
            "ip": ip,
            "method": "POST",
            "endpoint": pick(&mut rng, &["/comment", "/profile", "/feedback", "/search"]),
            "payload": pick(&mut rng, &XSS_PAYLOADS),
            "response_time_ms": rng.gen_range(100..1500),
            "status_code": weighted(&mut rng, &[200, 400, 500], &[50, 30, 20]),
            "user_agent": user_agent,
        }),
        "brute-force" => json!({
            "ip": ip,
            "method": "POST",
            "endpoint": pick(&mut rng, &["/login", "/admin", "/auth", "/signin"]),
            "payload": format!(
                "username={}&password={}",
                pick(&mut rng, &USERNAMES),
                pick(&mut rng, &PASSWORDS)
            ),
            "response_time_ms": rng.gen_range(300..1200),
            "status_code": weighted(&mut rng, &[401, 403, 422], &[60, 25, 15]),
            "user_agent": user_agent,
        }),
        "port-scan" => json!({
            "ip": ip,
            "method": "GET",
            "endpoint": pick(&mut rng, &SCAN_ENDPOINTS),
            "payload": "",
            "response_time_ms": rng.gen_range(10..200),
            "status_code": weighted(&mut rng, &[404, 403, 200], &[70, 20, 10]),
            "user_agent": user_agent,
        }),
        _ => {
            let method = if rng.gen_bool(0.5) { "POST" } else { "GET" };
            json!({
                "ip": ip,
                "method": method,
                "endpoint": pick(&mut rng, &NORMAL_ENDPOINTS),
                "payload": if method == "POST" { pick(&mut rng, &NORMAL_PAYLOADS) } else { "" },
                "response_time_ms": rng.gen_range(50..300),
                "status_code": weighted(&mut rng, &[200, 404, 302], &[80, 15, 5]),
                "user_agent": user_agent,
            })
        }
    }
}

fn pick_profile(requested: &str) -> String {
    if requested == "mixed" {
        let mut rng = rand::thread_rng();
        pick(&mut rng, &PROFILES).to_string()
    } else {
        requested.to_string()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let requested = args.get(1).map(String::as_str).unwrap_or("mixed");
    let count: usize = args
        .get(2)
        .map(|c| c.parse())
        .transpose()
        .context("count must be a number")?
        .unwrap_or(50);
    let target = args
        .get(3)
        .map(String::as_str)
        .unwrap_or("http://localhost:8080");

    if requested != "mixed" && !PROFILES.contains(&requested) {
        bail!("unknown profile '{}', expected one of {:?} or mixed", requested, PROFILES);
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;

    println!("Sending {} '{}' events to {}", count, requested, target);

    let mut threats = 0usize;
    let mut errors = 0usize;

    for i in 0..count {
        let profile = pick_profile(requested);
        let event = generate(&profile);

        match client
            .post(format!("{}/api/logs", target))
            .json(&event)
            .send()
            .await
        {
            Ok(response) => {
                let body: Value = response.json().await.unwrap_or_default();
                if body["threat_detected"].as_bool().unwrap_or(false) {
                    threats += 1;
                }
            }
            Err(e) => {
                errors += 1;
                eprintln!("request failed: {}", e);
            }
        }

        if (i + 1) % 10 == 0 {
            println!("  {}/{} sent", i + 1, count);
        }
    }

    println!(
        "Done: {} sent, {} flagged as threats, {} errors",
        count - errors,
        threats,
        errors
    );
    Ok(())
}
