//! Plain-text table output for the non-interactive `show` command.

use glance_core::prelude::*;

use crate::screens::{cell_text, header_label};

/// Apply an optional sort, then an optional query, to `records`.
///
/// Mirrors pressing a sort key and then submitting a search in the TUI.
pub fn build_view(
    records: Vec<IncomeStatement>,
    sort: Option<SortDescriptor>,
    query: Option<&str>,
) -> Result<TableState, QueryError> {
    let mut state = TableState::default().reduce(TableAction::Loaded(records));

    if let Some(descriptor) = sort {
        state = state.reduce(TableAction::Sort(descriptor));
    }

    if let Some(raw) = query {
        let query: RangeQuery = raw.parse()?;
        state = state.reduce(TableAction::Filter(query));
    }

    Ok(state)
}

/// Render the view as an aligned text table.
pub fn render_text_table(state: &TableState) -> String {
    let sort = state.sort();
    let headers: Vec<String> = Column::ALL.iter().map(|c| header_label(*c, sort)).collect();
    let rows: Vec<Vec<String>> = state
        .records()
        .iter()
        .map(|record| Column::ALL.iter().map(|c| cell_text(record, *c)).collect())
        .collect();

    let widths: Vec<usize> = (0..Column::ALL.len())
        .map(|i| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(headers[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let pad = widths[i].saturating_sub(cell.chars().count());
                if Column::ALL[i].is_numeric() {
                    format!("{}{}", " ".repeat(pad), cell)
                } else {
                    format!("{}{}", cell, " ".repeat(pad))
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&format_row(&headers));
    out.push('\n');
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    out.push_str(&format!(
        "{} of {} statements\n",
        state.records().len(),
        state.loaded_count()
    ));
    out
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
    fn test_build_view_sort_then_query() {
        let state = build_view(
            sample(),
            Some(SortDescriptor::new(Column::Date, SortOrder::Asc)),
            Some("revenue: 300000-400000"),
        )
        .unwrap();
        let dates: Vec<&str> = state.records().iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2021-09-25", "2022-09-24"]);
    }

    #[test]
    fn test_build_view_rejects_bad_query() {
        assert_eq!(
            build_view(sample(), None, Some("eps:1-2")).unwrap_err(),
            QueryError::UnsupportedColumn("eps".to_string())
        );
    }

    #[test]
    fn test_render_text_table() {
        let state = build_view(sample(), None, Some("date: 2022-2022")).unwrap();
        let text = render_text_table(&state);
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("date ▲"));
        assert!(lines[0].ends_with("operatingIncome"));
        assert!(lines[2].starts_with("2022-09-24"));
        assert!(lines[2].contains("394,328"));
        assert_eq!(lines[3], "1 of 3 statements");
    }

    #[test]
    fn test_render_empty_view() {
        let state = build_view(sample(), None, Some("date: 1990-1991")).unwrap();
        let text = render_text_table(&state);
        assert!(text.ends_with("0 of 3 statements\n"));
    }
}
