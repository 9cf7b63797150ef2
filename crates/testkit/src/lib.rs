use chrono::{DateTime, Duration, TimeZone, Utc};
use logbook_core::model::{LogLevel, LogRecord, NewLogRecord};
use serde_json::json;

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap()
}

/// A normalized record ready for `Store::insert_log`.
pub fn sample_log(service: &str, message: &str) -> LogRecord {
    LogRecord {
        id: 0,
        service_name: service.to_string(),
        log_level: Some(LogLevel::Info),
        message: message.to_string(),
        timestamp: base_time(),
        trace_id: None,
        span_id: None,
        metadata: json!({}),
    }
}

/// Five records across two services with distinct, increasing timestamps.
pub fn sample_logs() -> Vec<LogRecord> {
    let base = base_time();
    vec![
        LogRecord {
            timestamp: base,
            log_level: Some(LogLevel::Debug),
            ..sample_log("api", "GET /v1/orders started")
        },
        LogRecord {
            timestamp: base + Duration::milliseconds(900),
            log_level: Some(LogLevel::Warn),
            trace_id: Some("4bf92f3577b34da6a3ce929d0e0e4736".to_string()),
            span_id: Some("00f067aa0ba902b7".to_string()),
            metadata: json!({"attempt": 2}),
            ..sample_log("api", "retrying cache.get redis")
        },
        LogRecord {
            timestamp: base + Duration::milliseconds(1200),
            log_level: Some(LogLevel::Error),
            trace_id: Some("4bf92f3577b34da6a3ce929d0e0e4736".to_string()),
            metadata: json!({"peer": "redis:6379"}),
            ..sample_log("api", "context deadline exceeded")
        },
        LogRecord {
            timestamp: base + Duration::seconds(5),
            log_level: Some(LogLevel::Error),
            ..sample_log("billing", "invoice render failed")
        },
        LogRecord {
            timestamp: base + Duration::seconds(7),
            log_level: None,
            ..sample_log("billing", "nightly run complete")
        },
    ]
}

/// A client submission that passes validation.
pub fn new_log(service: &str, message: &str) -> NewLogRecord {
    NewLogRecord {
        service_name: service.to_string(),
        message: message.to_string(),
        ..NewLogRecord::default()
    }
}
