pub const SCHEMA_SQL: &str = r#"
CREATE SEQUENCE IF NOT EXISTS logs_id_seq;

CREATE TABLE IF NOT EXISTS logs (
  id BIGINT PRIMARY KEY,
  service_name TEXT NOT NULL,
  log_level TEXT,
  message TEXT NOT NULL,
  timestamp TIMESTAMP NOT NULL,
  trace_id TEXT,
  span_id TEXT,
  metadata TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_logs_timestamp ON logs(timestamp);
CREATE INDEX IF NOT EXISTS idx_logs_service_timestamp ON logs(service_name, timestamp);
"#;
