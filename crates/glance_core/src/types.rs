//! Record and column types.
//!
//! An [`IncomeStatement`] is one annual entry as returned by the financial
//! data provider. Only the six displayed fields are required; any other
//! provider fields are ignored on decode.
//!
//! # Examples
//!
//! ```
//! use glance_core::types::{Column, FieldValue, IncomeStatement};
//!
//! let record = IncomeStatement::new("2022-09-24", 394_328.0, 99_803.0);
//! assert_eq!(record.year(), Some(2022));
//! assert_eq!(record.value(Column::Revenue), FieldValue::Number(394_328.0));
//!
//! let column: Column = "netIncome".parse().unwrap();
//! assert_eq!(column, Column::NetIncome);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// One annual income-statement record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    /// Fiscal period end date (ISO-8601, e.g. `2022-09-24`)
    pub date: String,
    /// Total revenue
    pub revenue: f64,
    /// Net income
    pub net_income: f64,
    /// Gross profit
    pub gross_profit: f64,
    /// Earnings per share
    pub eps: f64,
    /// Operating income
    pub operating_income: f64,
    /// Ticker symbol
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Reporting currency code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_currency: Option<String>,
    /// Filing acceptance timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_date: Option<String>,
}

impl IncomeStatement {
    /// Create a record with the given date, revenue and net income.
    ///
    /// Remaining numeric fields are zero and the optional metadata is empty.
    pub fn new(date: impl Into<String>, revenue: f64, net_income: f64) -> Self {
        Self {
            date: date.into(),
            revenue,
            net_income,
            ..Self::default()
        }
    }

    /// Value of `column` for this record.
    pub fn value(&self, column: Column) -> FieldValue<'_> {
        match column {
            Column::Date => FieldValue::Text(&self.date),
            Column::Revenue => FieldValue::Number(self.revenue),
            Column::NetIncome => FieldValue::Number(self.net_income),
            Column::GrossProfit => FieldValue::Number(self.gross_profit),
            Column::Eps => FieldValue::Number(self.eps),
            Column::OperatingIncome => FieldValue::Number(self.operating_income),
        }
    }

    /// Calendar year of the `date` field.
    ///
    /// Accepts plain dates, RFC 3339 timestamps and `YYYY-MM-DD HH:MM:SS`.
    /// Returns `None` when the string is none of these.
    pub fn year(&self) -> Option<i32> {
        use chrono::Datelike;

        let raw = self.date.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date.year());
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.year());
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|ts| ts.year())
    }
}

/// A displayed table column.
///
/// The wire name of each column is the provider's JSON key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// `date`
    Date,
    /// `revenue`
    Revenue,
    /// `netIncome`
    NetIncome,
    /// `grossProfit`
    GrossProfit,
    /// `eps`
    Eps,
    /// `operatingIncome`
    OperatingIncome,
}

impl Column {
    /// All columns in display order.
    pub const ALL: [Column; 6] = [
        Column::Date,
        Column::Revenue,
        Column::NetIncome,
        Column::GrossProfit,
        Column::Eps,
        Column::OperatingIncome,
    ];

    /// Columns that can be sorted and searched.
    pub const SORTABLE: [Column; 3] = [Column::Date, Column::Revenue, Column::NetIncome];

    /// Wire name (provider JSON key).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Revenue => "revenue",
            Self::NetIncome => "netIncome",
            Self::GrossProfit => "grossProfit",
            Self::Eps => "eps",
            Self::OperatingIncome => "operatingIncome",
        }
    }

    /// Whether the column header responds to sort requests.
    pub fn is_sortable(&self) -> bool {
        Self::SORTABLE.contains(self)
    }

    /// Whether the column holds a numeric value.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Date)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = QueryError;

    /// Parse an exact wire name. Matching is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|column| column.name() == s)
            .ok_or_else(|| QueryError::UnsupportedColumn(s.to_string()))
    }
}

/// A borrowed field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// String field (`date`)
    Text(&'a str),
    /// Numeric field
    Number(f64),
}

impl FieldValue<'_> {
    /// Total order over field values.
    ///
    /// Text compares lexicographically, numbers by `f64::total_cmp`.
    /// Text sorts before numbers, which only matters if a caller mixes
    /// columns.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(_), Self::Number(_)) => Ordering::Less,
            (Self::Number(_), Self::Text(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}
