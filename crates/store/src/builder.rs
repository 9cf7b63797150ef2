//! Turns [`FilterCriteria`] into one parameterized `SELECT` over `logs`.
//!
//! Contract relied on by callers and tests:
//! - predicates are appended in the fixed order service, level, message,
//!   start time, end time, and only for criteria that are set;
//! - placeholders are `$1..$n` with no gaps, and `args[i]` binds `$(i + 1)`;
//! - rows are always ordered by `timestamp DESC`;
//! - `LIMIT` is emitted only for a positive limit, `OFFSET` only after an
//!   emitted `LIMIT`.

use chrono::{DateTime, Utc};
use logbook_core::filter::FilterCriteria;

pub const SELECT_LOGS_SQL: &str = "SELECT id, service_name, log_level, message, timestamp, trace_id, span_id, metadata FROM logs WHERE 1=1";

/// A value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlArg {
    Text(String),
    Timestamp(DateTime<Utc>),
    Int(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub sql: String,
    pub args: Vec<SqlArg>,
}

impl SelectQuery {
    fn new(base: &str) -> Self {
        Self {
            sql: base.to_string(),
            args: Vec::new(),
        }
    }

    /// Appends `clause` followed by the next placeholder and records its value.
    fn bind(&mut self, clause: &str, arg: SqlArg) {
        self.args.push(arg);
        self.sql.push_str(&format!(" {clause} ${}", self.args.len()));
    }
}

pub fn build_select(criteria: &FilterCriteria) -> SelectQuery {
    let predicates: [(&str, Option<SqlArg>); 5] = [
        (
            "AND service_name =",
            criteria.service().map(|v| SqlArg::Text(v.to_string())),
        ),
        (
            "AND log_level =",
            criteria.level().map(|v| SqlArg::Text(v.to_string())),
        ),
        (
            "AND message ILIKE",
            criteria.message().map(|v| SqlArg::Text(format!("%{v}%"))),
        ),
        ("AND timestamp >=", criteria.start_time.map(SqlArg::Timestamp)),
        ("AND timestamp <=", criteria.end_time.map(SqlArg::Timestamp)),
    ];

    let mut query = predicates
        .into_iter()
        .fold(SelectQuery::new(SELECT_LOGS_SQL), |mut query, (clause, arg)| {
            if let Some(arg) = arg {
                query.bind(clause, arg);
            }
            query
        });

    query.sql.push_str(" ORDER BY timestamp DESC");

    // An offset without a limit is dropped rather than emitted on its own.
    // Kept for compatibility with existing clients; revisit if the read API
    // is versioned.
    if let Some(limit) = criteria.limit() {
        query.bind("LIMIT", SqlArg::Int(limit));
        if let Some(offset) = criteria.offset() {
            query.bind("OFFSET", SqlArg::Int(offset));
        }
    }

    query
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn placeholders(sql: &str) -> Vec<usize> {
        sql.split('$')
            .skip(1)
            .map(|rest| {
                rest.chars()
                    .take_while(char::is_ascii_digit)
                    .collect::<String>()
                    .parse()
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn no_criteria_yields_base_query() {
        let q = build_select(&FilterCriteria::default());
        assert_eq!(q.sql, format!("{SELECT_LOGS_SQL} ORDER BY timestamp DESC"));
        assert!(q.args.is_empty());
    }

    #[test]
    fn all_criteria_in_fixed_order_with_contiguous_placeholders() {
        let start = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 2, 2, 0, 0, 0).unwrap();
        let q = build_select(&FilterCriteria {
            service: Some("api".into()),
            level: Some("ERROR".into()),
            message: Some("timeout".into()),
            start_time: Some(start),
            end_time: Some(end),
            limit: 50,
            offset: 10,
        });

        assert_eq!(
            q.sql,
            format!(
                "{SELECT_LOGS_SQL} AND service_name = $1 AND log_level = $2 AND message ILIKE $3 \
                 AND timestamp >= $4 AND timestamp <= $5 ORDER BY timestamp DESC LIMIT $6 OFFSET $7"
            )
        );
        assert_eq!(
            q.args,
            vec![
                SqlArg::Text("api".into()),
                SqlArg::Text("ERROR".into()),
                SqlArg::Text("%timeout%".into()),
                SqlArg::Timestamp(start),
                SqlArg::Timestamp(end),
                SqlArg::Int(50),
                SqlArg::Int(10),
            ]
        );
    }

    #[test]
    fn sparse_criteria_renumber_without_gaps() {
        let end = Utc.with_ymd_and_hms(2026, 2, 2, 0, 0, 0).unwrap();
        let q = build_select(&FilterCriteria {
            level: Some("WARN".into()),
            end_time: Some(end),
            limit: 5,
            ..FilterCriteria::default()
        });

        assert!(q.sql.contains("AND log_level = $1 AND timestamp <= $2"));
        assert!(q.sql.ends_with("ORDER BY timestamp DESC LIMIT $3"));
        assert_eq!(placeholders(&q.sql), vec![1, 2, 3]);
        assert_eq!(q.args.len(), 3);
    }

    #[test]
    fn one_and_clause_per_set_field() {
        let q = build_select(&FilterCriteria {
            service: Some("api".into()),
            message: Some("boom".into()),
            ..FilterCriteria::default()
        });
        assert_eq!(q.sql.matches(" AND ").count(), 2);
        assert_eq!(placeholders(&q.sql), vec![1, 2]);
    }

    #[test]
    fn offset_without_limit_is_dropped() {
        let q = build_select(&FilterCriteria {
            service: Some(String::new()),
            limit: 0,
            offset: 5,
            ..FilterCriteria::default()
        });
        assert!(!q.sql.contains("LIMIT"));
        assert!(!q.sql.contains("OFFSET"));
        assert!(q.args.is_empty());
    }

    #[test]
    fn zero_offset_emits_limit_only() {
        let q = build_select(&FilterCriteria {
            limit: 10,
            offset: 0,
            ..FilterCriteria::default()
        });
        assert!(q.sql.ends_with("ORDER BY timestamp DESC LIMIT $1"));
        assert_eq!(q.args, vec![SqlArg::Int(10)]);
    }

    #[test]
    fn message_is_wrapped_for_substring_match() {
        let q = build_select(&FilterCriteria {
            message: Some("timeout".into()),
            ..FilterCriteria::default()
        });
        assert!(q.sql.contains("message ILIKE $1"));
        assert_eq!(q.args, vec![SqlArg::Text("%timeout%".into())]);
    }

    #[test]
    fn values_never_reach_the_statement_text() {
        let q = build_select(&FilterCriteria {
            service: Some("x' OR '1'='1".into()),
            ..FilterCriteria::default()
        });
        assert!(!q.sql.contains("OR '1'"));
        assert_eq!(q.args, vec![SqlArg::Text("x' OR '1'='1".into())]);
    }
}
