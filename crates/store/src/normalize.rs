//! Mapping between the client-facing log shapes and the `logs` table.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use logbook_core::error::{LogbookError, Result};
use logbook_core::model::{LogLevel, LogRecord, NewLogRecord};
use logbook_core::time;

pub fn validate(record: &NewLogRecord) -> Result<()> {
    if record.service_name.is_empty() {
        return Err(LogbookError::Validation(
            "service name is required".to_string(),
        ));
    }
    if record.message.is_empty() {
        return Err(LogbookError::Validation("message is required".to_string()));
    }
    parse_level(&record.log_level)?;
    Ok(())
}

/// Validates `record` and fills the defaults applied before insert.
///
/// `now` stands in for an unset timestamp. Timestamps are truncated to
/// microseconds, the resolution the store keeps.
pub fn normalize(record: NewLogRecord, now: DateTime<Utc>) -> Result<LogRecord> {
    validate(&record)?;

    let timestamp = match record.timestamp {
        Some(ts) if !time::is_unset(Some(&ts)) => ts,
        _ => now,
    };

    Ok(LogRecord {
        id: 0,
        log_level: parse_level(&record.log_level)?,
        service_name: record.service_name,
        message: record.message,
        timestamp: timestamp.trunc_subsecs(6),
        trace_id: present(record.trace_id),
        span_id: present(record.span_id),
        metadata: match record.metadata {
            None | Some(serde_json::Value::Null) => empty_metadata(),
            Some(value) => value,
        },
    })
}

/// Bound values for `INSERT INTO logs (service_name, log_level, message,
/// timestamp, trace_id, span_id, metadata)`, in column order.
pub struct InsertParams {
    pub service_name: String,
    pub log_level: Option<&'static str>,
    pub message: String,
    pub timestamp: String,
    pub trace_id: Option<String>,
    pub span_id: Option<String>,
    pub metadata: String,
}

pub fn insert_params(record: &LogRecord) -> Result<InsertParams> {
    let metadata = serde_json::to_string(&record.metadata)
        .map_err(|e| LogbookError::Internal(format!("encode metadata failed: {e}")))?;

    Ok(InsertParams {
        service_name: record.service_name.clone(),
        log_level: record.log_level.map(LogLevel::as_str),
        message: record.message.clone(),
        timestamp: record.timestamp.to_rfc3339(),
        trace_id: record.trace_id.clone(),
        span_id: record.span_id.clone(),
        metadata,
    })
}

/// Columns of one `logs` row as scanned, before interpretation.
#[derive(Debug, Clone)]
pub struct StoredRow {
    pub id: i64,
    pub service_name: String,
    pub log_level: Option<String>,
    pub message: String,
    pub timestamp: NaiveDateTime,
    pub trace_id: Option<String>,
    pub span_id: Option<String>,
    pub metadata: Option<String>,
}

pub fn record_from_row(row: StoredRow) -> Result<LogRecord> {
    let log_level = row
        .log_level
        .as_deref()
        .map(parse_level)
        .transpose()
        .map_err(|e| LogbookError::RowScan(format!("log {}: {e}", row.id)))?
        .flatten();

    let metadata = match row.metadata.as_deref() {
        None | Some("") => empty_metadata(),
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| LogbookError::RowScan(format!("log {}: bad metadata: {e}", row.id)))?,
    };

    Ok(LogRecord {
        id: row.id,
        service_name: row.service_name,
        log_level,
        message: row.message,
        timestamp: row.timestamp.and_utc(),
        trace_id: present(row.trace_id),
        span_id: present(row.span_id),
        metadata,
    })
}

fn parse_level(raw: &str) -> Result<Option<LogLevel>> {
    if raw.is_empty() {
        return Ok(None);
    }
    LogLevel::from_str(raw).map(Some)
}

fn present(id: Option<String>) -> Option<String> {
    id.filter(|v| !v.is_empty())
}

fn empty_metadata() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    use super::*;

    fn valid() -> NewLogRecord {
        testkit::new_log("api", "request handled")
    }

    #[test]
    fn requires_service_name() {
        let err = validate(&NewLogRecord {
            service_name: String::new(),
            ..valid()
        })
        .unwrap_err();
        assert!(matches!(err, LogbookError::Validation(_)));
        assert_eq!(err.to_string(), "service name is required");
    }

    #[test]
    fn requires_message() {
        let err = validate(&NewLogRecord {
            message: String::new(),
            ..valid()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "message is required");
    }

    #[test]
    fn service_checked_before_message() {
        let err = validate(&NewLogRecord::default()).unwrap_err();
        assert_eq!(err.to_string(), "service name is required");
    }

    #[test]
    fn rejects_unknown_level_and_accepts_known_or_empty() {
        let err = validate(&NewLogRecord {
            log_level: "TRACE".into(),
            ..valid()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid log level: TRACE");

        assert!(
            validate(&NewLogRecord {
                log_level: "WARN".into(),
                ..valid()
            })
            .is_ok()
        );
        assert!(validate(&valid()).is_ok());
    }

    #[test]
    fn unset_timestamp_defaults_to_now() {
        let now = Utc::now();
        let rec = normalize(valid(), now).unwrap();
        assert!((rec.timestamp - now).abs() < Duration::milliseconds(1));
        assert_eq!(rec.id, 0);
    }

    #[test]
    fn zero_value_timestamp_defaults_to_now() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let zero = Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap();
        let rec = normalize(
            NewLogRecord {
                timestamp: Some(zero),
                ..valid()
            },
            now,
        )
        .unwrap();
        assert_eq!(rec.timestamp, now);
    }

    #[test]
    fn supplied_timestamp_is_kept_at_microsecond_precision() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
            + Duration::nanoseconds(1_234_567);
        let rec = normalize(
            NewLogRecord {
                timestamp: Some(ts),
                ..valid()
            },
            Utc::now(),
        )
        .unwrap();
        assert_eq!(
            rec.timestamp,
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap() + Duration::microseconds(1_234)
        );
    }

    #[test]
    fn empty_trace_and_span_become_absent() {
        let rec = normalize(
            NewLogRecord {
                trace_id: Some(String::new()),
                span_id: Some("abc".into()),
                ..valid()
            },
            Utc::now(),
        )
        .unwrap();
        assert_eq!(rec.trace_id, None);
        assert_eq!(rec.span_id, Some("abc".into()));
    }

    #[test]
    fn missing_or_null_metadata_becomes_empty_object() {
        let rec = normalize(valid(), Utc::now()).unwrap();
        assert_eq!(rec.metadata, json!({}));

        let rec = normalize(
            NewLogRecord {
                metadata: Some(serde_json::Value::Null),
                ..valid()
            },
            Utc::now(),
        )
        .unwrap();
        assert_eq!(rec.metadata, json!({}));
    }

    #[test]
    fn insert_params_keep_absent_values_null() {
        let rec = normalize(
            NewLogRecord {
                metadata: Some(json!({"user": 1})),
                ..valid()
            },
            Utc::now(),
        )
        .unwrap();
        let params = insert_params(&rec).unwrap();
        assert_eq!(params.log_level, None);
        assert_eq!(params.trace_id, None);
        assert_eq!(params.metadata, r#"{"user":1}"#);
    }

    fn row() -> StoredRow {
        StoredRow {
            id: 3,
            service_name: "api".into(),
            log_level: Some("ERROR".into()),
            message: "boom".into(),
            timestamp: Utc
                .with_ymd_and_hms(2026, 2, 1, 0, 0, 0)
                .unwrap()
                .naive_utc(),
            trace_id: None,
            span_id: Some(String::new()),
            metadata: Some(r#"{"k":"v"}"#.into()),
        }
    }

    #[test]
    fn row_maps_to_record() {
        let rec = record_from_row(row()).unwrap();
        assert_eq!(rec.id, 3);
        assert_eq!(rec.log_level, Some(LogLevel::Error));
        assert_eq!(rec.span_id, None);
        assert_eq!(rec.metadata, json!({"k": "v"}));
        assert_eq!(
            rec.timestamp,
            Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn row_with_empty_metadata_or_level_gets_defaults() {
        let rec = record_from_row(StoredRow {
            log_level: Some(String::new()),
            metadata: Some(String::new()),
            ..row()
        })
        .unwrap();
        assert_eq!(rec.log_level, None);
        assert_eq!(rec.metadata, json!({}));
    }

    #[test]
    fn malformed_row_is_a_scan_error() {
        let err = record_from_row(StoredRow {
            metadata: Some("{not json".into()),
            ..row()
        })
        .unwrap_err();
        assert!(matches!(err, LogbookError::RowScan(_)));

        let err = record_from_row(StoredRow {
            log_level: Some("LOUD".into()),
            ..row()
        })
        .unwrap_err();
        assert!(matches!(err, LogbookError::RowScan(_)));
    }
}
