use chrono::Utc;
use duckdb::params;
use logbook_core::error::{LogbookError, Result};
use logbook_core::model::{LogRecord, NewLogRecord};

use crate::Store;
use crate::normalize::{insert_params, normalize};

const INSERT_LOG_SQL: &str = "INSERT INTO logs
     (id, service_name, log_level, message, timestamp, trace_id, span_id, metadata)
     VALUES (nextval('logs_id_seq'), $1, $2, $3, $4, $5, $6, $7)
     RETURNING id";

impl Store {
    /// Validates, normalizes and inserts a client-submitted record.
    pub fn save_log(&self, record: NewLogRecord) -> Result<LogRecord> {
        let record = normalize(record, Utc::now())?;
        self.insert_log(record)
    }

    /// Inserts an already-normalized record and returns it with its new id.
    pub fn insert_log(&self, mut record: LogRecord) -> Result<LogRecord> {
        let p = insert_params(&record)?;

        let conn = self.conn();
        let id = conn
            .query_row(
                INSERT_LOG_SQL,
                params![
                    p.service_name,
                    p.log_level,
                    p.message,
                    p.timestamp,
                    p.trace_id,
                    p.span_id,
                    p.metadata,
                ],
                |row| row.get::<_, i64>(0),
            )
            .map_err(|e| LogbookError::Store(format!("insert log failed: {e}")))?;

        record.id = id;
        tracing::debug!(id, service = %record.service_name, "log inserted");
        Ok(record)
    }
}
