//! Database module - PostgreSQL connection and schema

use sqlx::{postgres::PgPoolOptions, PgPool};

/// Create database connection pool
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Apply the schema at startup
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA_SQL)
        .execute(pool)
        .await?;

    tracing::info!("Database schema applied successfully");
    Ok(())
}

/// Database schema SQL
const SCHEMA_SQL: &str = r#"
-- Ingested access-log events
CREATE TABLE IF NOT EXISTS threat_logs (
    id BIGSERIAL PRIMARY KEY,
    timestamp TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    ip VARCHAR(45) NOT NULL,
    method VARCHAR(10) NOT NULL,
    endpoint VARCHAR(255) NOT NULL,
    payload TEXT NOT NULL DEFAULT '',
    response_time INT NOT NULL DEFAULT 0,
    status_code INT NOT NULL DEFAULT 200,
    user_agent TEXT NOT NULL DEFAULT '',
    threat_type VARCHAR(50),
    confidence_score REAL NOT NULL
);

-- Threat judgments, one per threat-classified log row
CREATE TABLE IF NOT EXISTS detections (
    id BIGSERIAL PRIMARY KEY,
    log_id BIGINT NOT NULL REFERENCES threat_logs(id) ON DELETE CASCADE,
    threat_type VARCHAR(50) NOT NULL,
    confidence_score REAL NOT NULL,
    timestamp TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- Block records; inactive rows accumulate as history
CREATE TABLE IF NOT EXISTS blocked_ips (
    id BIGSERIAL PRIMARY KEY,
    ip VARCHAR(45) NOT NULL,
    reason TEXT NOT NULL DEFAULT '',
    blocked_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    status VARCHAR(20) NOT NULL DEFAULT 'active'
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_threat_logs_timestamp ON threat_logs(timestamp);
CREATE INDEX IF NOT EXISTS idx_threat_logs_ip ON threat_logs(ip);
CREATE INDEX IF NOT EXISTS idx_detections_log ON detections(log_id);
CREATE INDEX IF NOT EXISTS idx_detections_timestamp ON detections(timestamp);

-- At most one active block per IP; ingest relies on ON CONFLICT
-- against this index for race-free check-then-insert
CREATE UNIQUE INDEX IF NOT EXISTS idx_blocked_ips_one_active
    ON blocked_ips(ip) WHERE status = 'active';
"#;
