//! Sort engine.
//!
//! Sorting is stable under a total order: dates compare as strings (ISO-8601
//! keeps that chronological), numbers compare with `f64::total_cmp`. Records
//! with equal keys keep their input order in both directions.

use std::fmt;
use std::str::FromStr;

use crate::error::QueryError;
use crate::types::{Column, IncomeStatement};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Ascending
    #[default]
    Asc,
    /// Descending
    Desc,
}

impl SortOrder {
    /// Header indicator glyph.
    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

/// Column plus direction governing table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortDescriptor {
    /// Column to sort by
    pub column: Column,
    /// Direction
    pub order: SortOrder,
}

impl Default for SortDescriptor {
    fn default() -> Self {
        Self::new(Column::Date, SortOrder::Asc)
    }
}

impl SortDescriptor {
    /// Create a descriptor
    pub fn new(column: Column, order: SortOrder) -> Self {
        Self { column, order }
    }

    /// Descriptor produced by selecting the `column` header.
    ///
    /// A column sorted descending flips to ascending; anything else,
    /// including switching columns, starts descending.
    ///
    /// # Examples
    ///
    /// ```
    /// use glance_core::sort::{SortDescriptor, SortOrder};
    /// use glance_core::types::Column;
    ///
    /// let current = SortDescriptor::default(); // date asc
    /// let next = SortDescriptor::toggle(current, Column::Date);
    /// assert_eq!(next.order, SortOrder::Desc);
    ///
    /// let next = SortDescriptor::toggle(next, Column::Date);
    /// assert_eq!(next.order, SortOrder::Asc);
    ///
    /// let next = SortDescriptor::toggle(next, Column::Revenue);
    /// assert_eq!(next, SortDescriptor::new(Column::Revenue, SortOrder::Desc));
    /// ```
    pub fn toggle(current: SortDescriptor, column: Column) -> SortDescriptor {
        let order = if current.column == column && current.order == SortOrder::Desc {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        };
        Self::new(column, order)
    }
}

impl fmt::Display for SortDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.column, self.order)
    }
}

impl FromStr for SortDescriptor {
    type Err = QueryError;

    /// Parse `<column>[:asc|desc]`. The direction defaults to ascending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, order) = match s.split_once(':') {
            Some((column, order)) => (column.trim(), order.trim()),
            None => (s.trim(), "asc"),
        };

        let column: Column = column.parse()?;
        if !column.is_sortable() {
            return Err(QueryError::UnsupportedColumn(column.name().to_string()));
        }

        let order = match order.to_lowercase().as_str() {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            _ => return Err(QueryError::MalformedQuery),
        };

        Ok(Self::new(column, order))
    }
}

/// Return `records` reordered by `descriptor`.
///
/// The result is a permutation of the input; ties keep input order.
pub fn sort_records(records: &[IncomeStatement], descriptor: SortDescriptor) -> Vec<IncomeStatement> {
    let mut sorted = records.to_vec();
    let column = descriptor.column;

    sorted.sort_by(|a, b| {
        let ord = a.value(column).compare(&b.value(column));
        match descriptor.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });

    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<IncomeStatement> {
        vec![
            IncomeStatement::new("2022-09-24", 394_328.0, 99_803.0),
            IncomeStatement::new("2021-09-25", 365_817.0, 94_680.0),
            IncomeStatement::new("2020-09-26", 274_515.0, 57_411.0),
        ]
    }

    fn dates(records: &[IncomeStatement]) -> Vec<&str> {
        records.iter().map(|r| r.date.as_str()).collect()
    }

    #[test]
    fn test_default_descriptor() {
        let d = SortDescriptor::default();
        assert_eq!(d.column, Column::Date);
        assert_eq!(d.order, SortOrder::Asc);
    }

    #[test]
    fn test_sort_by_date_asc() {
        let sorted = sort_records(&sample(), SortDescriptor::default());
        assert_eq!(dates(&sorted), ["2020-09-26", "2021-09-25", "2022-09-24"]);
    }

    #[test]
    fn test_sort_by_revenue_desc() {
        let mut records = sample();
        records.swap(0, 2);
        let sorted = sort_records(&records, SortDescriptor::new(Column::Revenue, SortOrder::Desc));
        assert_eq!(dates(&sorted), ["2022-09-24", "2021-09-25", "2020-09-26"]);
    }

    #[test]
    fn test_sort_empty() {
        assert!(sort_records(&[], SortDescriptor::default()).is_empty());
    }

    #[test]
    fn test_sort_ties_keep_input_order() {
        let records = vec![
            IncomeStatement::new("2021-01-01", 10.0, 1.0),
            IncomeStatement::new("2020-01-01", 10.0, 2.0),
            IncomeStatement::new("2019-01-01", 5.0, 3.0),
        ];

        let asc = sort_records(&records, SortDescriptor::new(Column::Revenue, SortOrder::Asc));
        assert_eq!(dates(&asc), ["2019-01-01", "2021-01-01", "2020-01-01"]);

        let desc = sort_records(&records, SortDescriptor::new(Column::Revenue, SortOrder::Desc));
        assert_eq!(dates(&desc), ["2021-01-01", "2020-01-01", "2019-01-01"]);
    }

    #[test]
    fn test_sort_non_sortable_column_still_orders() {
        let mut records = sample();
        records[0].eps = 1.0;
        records[1].eps = 3.0;
        records[2].eps = 2.0;
        let sorted = sort_records(&records, SortDescriptor::new(Column::Eps, SortOrder::Asc));
        let eps: Vec<f64> = sorted.iter().map(|r| r.eps).collect();
        assert_eq!(eps, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_toggle_from_other_column_starts_desc() {
        let current = SortDescriptor::new(Column::Revenue, SortOrder::Desc);
        let next = SortDescriptor::toggle(current, Column::NetIncome);
        assert_eq!(next, SortDescriptor::new(Column::NetIncome, SortOrder::Desc));
    }

    #[test]
    fn test_parse_descriptor() {
        assert_eq!(
            "revenue:desc".parse::<SortDescriptor>().unwrap(),
            SortDescriptor::new(Column::Revenue, SortOrder::Desc)
        );
        assert_eq!(
            "netIncome".parse::<SortDescriptor>().unwrap(),
            SortDescriptor::new(Column::NetIncome, SortOrder::Asc)
        );
        assert_eq!(
            "eps:asc".parse::<SortDescriptor>(),
            Err(QueryError::UnsupportedColumn("eps".to_string()))
        );
        assert_eq!(
            "date:sideways".parse::<SortDescriptor>(),
            Err(QueryError::MalformedQuery)
        );
    }

    #[test]
    fn test_display_round_trip() {
        let d = SortDescriptor::new(Column::NetIncome, SortOrder::Desc);
        assert_eq!(d.to_string(), "netIncome:desc");
        assert_eq!(d.to_string().parse::<SortDescriptor>().unwrap(), d);
    }
}
