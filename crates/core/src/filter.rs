use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Optional search criteria for the read path.
///
/// Every field is independently optional. Empty strings and non-positive
/// `limit`/`offset` values count as unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub service: Option<String>,
    pub level: Option<String>,
    pub message: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub limit: i64,
    pub offset: i64,
}

impl FilterCriteria {
    pub fn service(&self) -> Option<&str> {
        non_empty(&self.service)
    }

    pub fn level(&self) -> Option<&str> {
        non_empty(&self.level)
    }

    pub fn message(&self) -> Option<&str> {
        non_empty(&self.message)
    }

    pub fn limit(&self) -> Option<i64> {
        (self.limit > 0).then_some(self.limit)
    }

    pub fn offset(&self) -> Option<i64> {
        (self.offset > 0).then_some(self.offset)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_strings_count_as_unset() {
        let criteria = FilterCriteria {
            service: Some(String::new()),
            level: Some("ERROR".into()),
            message: None,
            ..FilterCriteria::default()
        };
        assert_eq!(criteria.service(), None);
        assert_eq!(criteria.level(), Some("ERROR"));
        assert_eq!(criteria.message(), None);
    }

    #[test]
    fn non_positive_paging_counts_as_unset() {
        let criteria = FilterCriteria {
            limit: 0,
            offset: -3,
            ..FilterCriteria::default()
        };
        assert_eq!(criteria.limit(), None);
        assert_eq!(criteria.offset(), None);

        let criteria = FilterCriteria {
            limit: 10,
            offset: 5,
            ..FilterCriteria::default()
        };
        assert_eq!(criteria.limit(), Some(10));
        assert_eq!(criteria.offset(), Some(5));
    }
}
