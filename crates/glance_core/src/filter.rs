//! Filter engine.

use std::cmp::Ordering;

use crate::query::RangeQuery;
use crate::types::{Column, FieldValue, IncomeStatement};

/// Whether `record` falls inside `query`'s inclusive range.
///
/// For `date` the calendar year is tested; a date that does not parse never
/// matches. Numeric columns compare the raw value against the bounds exactly,
/// without rounding the bounds to `f64`. `NaN` never matches.
pub fn matches(record: &IncomeStatement, query: &RangeQuery) -> bool {
    match query.column {
        Column::Date => record
            .year()
            .is_some_and(|year| (query.min..=query.max).contains(&i64::from(year))),
        column => match record.value(column) {
            FieldValue::Number(value) => {
                compare_to_bound(value, query.min).is_some_and(Ordering::is_ge)
                    && compare_to_bound(value, query.max).is_some_and(Ordering::is_le)
            }
            FieldValue::Text(_) => false,
        },
    }
}

/// Exact ordering of `value` relative to `bound`; `None` for `NaN`.
fn compare_to_bound(value: f64, bound: i64) -> Option<Ordering> {
    // 2^63, exactly representable
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

    if value.is_nan() {
        return None;
    }
    if value >= TWO_POW_63 {
        return Some(Ordering::Greater);
    }
    if value < -TWO_POW_63 {
        return Some(Ordering::Less);
    }

    // In range, so the truncation is exact
    let whole = value.trunc() as i64;
    Some(whole.cmp(&bound).then_with(|| {
        let frac = value - value.trunc();
        frac.partial_cmp(&0.0).unwrap_or(Ordering::Equal)
    }))
}

/// Keep the records matching `query`, preserving input order.
pub fn filter_records(records: &[IncomeStatement], query: &RangeQuery) -> Vec<IncomeStatement> {
    records
        .iter()
        .filter(|record| matches(record, query))
        .cloned()
        .collect()
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

    #[test]
    fn test_filter_by_year() {
        let filtered = filter_records(&sample(), &RangeQuery::new(Column::Date, 2021, 2022));
        let dates: Vec<&str> = filtered.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2022-09-24", "2021-09-25"]);
    }

    #[test]
    fn test_filter_numeric_inclusive_bounds() {
        let filtered =
            filter_records(&sample(), &RangeQuery::new(Column::Revenue, 274_515, 365_817));
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].date, "2021-09-25");
        assert_eq!(filtered[1].date, "2020-09-26");
    }

    #[test]
    fn test_filter_net_income() {
        let filtered = filter_records(&sample(), &RangeQuery::new(Column::NetIncome, 90_000, 100_000));
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_fractional_values_against_integer_bounds() {
        let mut record = IncomeStatement::new("2022-09-24", 0.0, 0.0);
        record.eps = 6.15;
        assert!(matches(&record, &RangeQuery::new(Column::Eps, 6, 7)));
        assert!(!matches(&record, &RangeQuery::new(Column::Eps, 7, 8)));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        assert!(filter_records(&sample(), &RangeQuery::new(Column::Date, 2022, 2020)).is_empty());
        assert!(filter_records(&sample(), &RangeQuery::new(Column::Revenue, 500_000, 0)).is_empty());
    }

    #[test]
    fn test_unparseable_date_never_matches() {
        let records = vec![IncomeStatement::new("FY2022", 1.0, 1.0)];
        assert!(filter_records(&records, &RangeQuery::new(Column::Date, i64::MIN, i64::MAX)).is_empty());
    }

    #[test]
    fn test_bounds_beyond_f64_precision() {
        // 2^53 is the first integer after which f64 skips values
        let record = IncomeStatement::new("2022-01-01", 9_007_199_254_740_992.0, 0.0);
        let above = 9_007_199_254_740_993;

        assert!(!matches(&record, &RangeQuery::new(Column::Revenue, above, above)));
        assert!(matches(&record, &RangeQuery::new(Column::Revenue, above - 1, above)));
        assert!(!matches(&record, &RangeQuery::new(Column::Revenue, 0, above - 2)));
    }

    #[test]
    fn test_bounds_at_i64_limits() {
        // i64::MAX as f64 rounds up to 2^63, which exceeds every i64
        let record = IncomeStatement::new("2022-01-01", i64::MAX as f64, i64::MIN as f64);
        assert!(!matches(&record, &RangeQuery::new(Column::Revenue, 0, i64::MAX)));
        assert!(matches(&record, &RangeQuery::new(Column::NetIncome, i64::MIN, i64::MIN)));
    }

    #[test]
    fn test_nan_never_matches() {
        let record = IncomeStatement::new("2022-01-01", f64::NAN, 0.0);
        assert!(!matches(&record, &RangeQuery::new(Column::Revenue, i64::MIN, i64::MAX)));
    }

    #[test]
    fn test_negative_fraction_against_bounds() {
        let mut record = IncomeStatement::new("2022-01-01", 0.0, 0.0);
        record.eps = -0.5;
        assert!(matches(&record, &RangeQuery::new(Column::Eps, -1, 0)));
        assert!(!matches(&record, &RangeQuery::new(Column::Eps, 0, 1)));
        assert!(!matches(&record, &RangeQuery::new(Column::Eps, -2, -1)));
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        assert!(filter_records(&sample(), &RangeQuery::new(Column::Date, 1990, 1999)).is_empty());
    }
}
