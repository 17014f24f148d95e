//! Range query parser.
//!
//! Queries are typed as `"<column>: <min>-<max>"`. Whitespace around the
//! column and each bound is tolerated; nothing else is. Bounds are parsed
//! strictly as `i64`, and `min > max` is accepted (it simply matches
//! nothing downstream).

use std::str::FromStr;

use crate::error::QueryError;
use crate::types::Column;

/// A validated column plus inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeQuery {
    /// Column to test
    pub column: Column,
    /// Inclusive lower bound
    pub min: i64,
    /// Inclusive upper bound
    pub max: i64,
}

impl RangeQuery {
    /// Create a query without validation
    pub fn new(column: Column, min: i64, max: i64) -> Self {
        Self { column, min, max }
    }
}

impl FromStr for RangeQuery {
    type Err = QueryError;

    /// Parse against the sortable columns.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_query(s, &Column::SORTABLE)
    }
}

/// Parse `raw` into a [`RangeQuery`] restricted to `allowed` columns.
///
/// Each step short-circuits with its own error:
/// 1. exactly one `:` ([`QueryError::MalformedQuery`])
/// 2. trimmed column is in `allowed` ([`QueryError::UnsupportedColumn`])
/// 3. range is two non-empty parts around one `-` ([`QueryError::MalformedRange`])
/// 4. both parts are integers ([`QueryError::NonNumericRange`])
///
/// # Examples
///
/// ```
/// use glance_core::query::{parse_query, RangeQuery};
/// use glance_core::types::Column;
/// use glance_core::error::QueryError;
///
/// let q = parse_query("revenue: 1000-5000", &Column::SORTABLE).unwrap();
/// assert_eq!(q, RangeQuery::new(Column::Revenue, 1000, 5000));
///
/// assert_eq!(parse_query("revenue100-200", &Column::SORTABLE), Err(QueryError::MalformedQuery));
/// ```
pub fn parse_query(raw: &str, allowed: &[Column]) -> Result<RangeQuery, QueryError> {
    let mut parts = raw.split(':');
    let (column, range) = match (parts.next(), parts.next(), parts.next()) {
        (Some(column), Some(range), None) => (column.trim(), range),
        _ => return Err(QueryError::MalformedQuery),
    };

    let column = allowed
        .iter()
        .copied()
        .find(|c| c.name() == column)
        .ok_or_else(|| QueryError::UnsupportedColumn(column.to_string()))?;

    let mut bounds = range.split('-');
    let (min, max) = match (bounds.next(), bounds.next(), bounds.next()) {
        (Some(min), Some(max), None) => (min.trim(), max.trim()),
        _ => return Err(QueryError::MalformedRange),
    };
    if min.is_empty() || max.is_empty() {
        return Err(QueryError::MalformedRange);
    }

    let min: i64 = min.parse().map_err(|_| QueryError::NonNumericRange)?;
    let max: i64 = max.parse().map_err(|_| QueryError::NonNumericRange)?;

    Ok(RangeQuery { column, min, max })
}
