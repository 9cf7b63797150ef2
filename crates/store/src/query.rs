use chrono::{NaiveDateTime, SubsecRound};
use duckdb::params_from_iter;
use duckdb::types::Value;
use logbook_core::error::{LogbookError, Result};
use logbook_core::filter::FilterCriteria;
use logbook_core::model::LogRecord;
use tracing::warn;

use crate::Store;
use crate::builder::{SqlArg, build_select};
use crate::normalize::{StoredRow, record_from_row};

impl Store {
    /// Returns matching records, newest first.
    ///
    /// A row that cannot be read is logged and skipped; only a failure of the
    /// query itself is an error.
    pub fn fetch_logs(&self, criteria: &FilterCriteria) -> Result<Vec<LogRecord>> {
        let query = build_select(criteria);
        let args = query.args.iter().map(to_value).collect::<Vec<_>>();

        let conn = self.conn();
        let mut stmt = conn
            .prepare(&query.sql)
            .map_err(|e| LogbookError::Store(format!("prepare fetch logs failed: {e}")))?;

        let rows = stmt
            .query_map(params_from_iter(args.iter()), |row| {
                Ok(StoredRow {
                    id: row.get::<_, i64>(0)?,
                    service_name: row.get::<_, String>(1)?,
                    log_level: row.get::<_, Option<String>>(2)?,
                    message: row.get::<_, String>(3)?,
                    timestamp: row.get::<_, NaiveDateTime>(4)?,
                    trace_id: row.get::<_, Option<String>>(5)?,
                    span_id: row.get::<_, Option<String>>(6)?,
                    metadata: row.get::<_, Option<String>>(7)?,
                })
            })
            .map_err(|e| LogbookError::Store(format!("query logs failed: {e}")))?;

        let mut records = Vec::new();
        for row in rows {
            let mapped = row
                .map_err(|e| LogbookError::RowScan(e.to_string()))
                .and_then(record_from_row);
            match mapped {
                Ok(record) => records.push(record),
                Err(err) => warn!(error = %err, "skipping unreadable log row"),
            }
        }

        Ok(records)
    }
}

fn to_value(arg: &SqlArg) -> Value {
    match arg {
        SqlArg::Text(v) => Value::Text(v.clone()),
        SqlArg::Timestamp(ts) => Value::Text(ts.trunc_subsecs(6).to_rfc3339()),
        SqlArg::Int(v) => Value::BigInt(*v),
    }
}
