//! Screen rendering functions for the TUI.

use glance_core::prelude::*;
use ratatui::{
    prelude::*,
    widgets::{self, Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::app::{AppModel, InputMode};

/// Format a number with thousands separators
pub fn format_number(n: f64, decimals: usize) -> String {
    if !n.is_finite() {
        return n.to_string();
    }

    let formatted = format!("{:.1$}", n.abs(), decimals);
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if n < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Display text of `column` for `record`
pub fn cell_text(record: &IncomeStatement, column: Column) -> String {
    match record.value(column) {
        FieldValue::Text(s) => s.to_string(),
        FieldValue::Number(n) if column == Column::Eps => format_number(n, 2),
        FieldValue::Number(n) => format_number(n, 0),
    }
}

/// Header label with the sort indicator when `column` is the sorted one
pub fn header_label(column: Column, sort: SortDescriptor) -> String {
    if sort.column == column {
        format!("{} {}", column.name(), sort.order.arrow())
    } else {
        column.name().to_string()
    }
}

/// Draw the whole screen
pub fn draw(frame: &mut Frame, model: &AppModel) {
    let area = frame.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search bar
            Constraint::Min(0),    // Table
            Constraint::Length(1), // Status
            Constraint::Length(3), // Footer
        ])
        .split(area);

    draw_header(frame, chunks[0], model);
    draw_search_bar(frame, chunks[1], model);
    draw_statement_table(frame, chunks[2], model);
    draw_status_line(frame, chunks[3], model.table());
    draw_footer(frame, chunks[4], model.mode());
}

/// Draw header
fn draw_header(frame: &mut Frame, area: Rect, model: &AppModel) {
    let title = format!(" Value Glance - Income Statements: {} ", model.source_label());
    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Draw search bar
fn draw_search_bar(frame: &mut Frame, area: Rect, model: &AppModel) {
    let (text, style) = match (model.mode(), model.search_input().is_empty()) {
        (InputMode::Search, _) => (
            format!("{}_", model.search_input()),
            Style::default().fg(Color::White),
        ),
        (InputMode::Normal, true) => (
            "Search... (e.g. revenue: 300000000000-400000000000)".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        (InputMode::Normal, false) => (
            model.search_input().to_string(),
            Style::default().fg(Color::Gray),
        ),
    };

    let border_style = if model.mode() == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let search = Paragraph::new(text).style(style).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(search, area);
}

/// Draw the statement table
fn draw_statement_table(frame: &mut Frame, area: Rect, model: &AppModel) {
    let table_state = model.table();
    let sort = table_state.sort();

    let header_cells = Column::ALL.iter().map(|column| {
        let style = if column.is_sortable() {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        Cell::from(header_label(*column, sort)).style(style)
    });
    let header = Row::new(header_cells).height(1);

    let rows = table_state.records().iter().map(|record| {
        Row::new(
            Column::ALL
                .iter()
                .map(|column| Cell::from(cell_text(record, *column)))
                .collect::<Vec<_>>(),
        )
        .style(Style::default().fg(Color::Gray))
    });

    let widths = [
        Constraint::Length(12),
        Constraint::Min(18),
        Constraint::Min(18),
        Constraint::Min(18),
        Constraint::Length(8),
        Constraint::Min(18),
    ];

    let title = format!(
        " {} of {} statements ",
        table_state.records().len(),
        table_state.loaded_count()
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut selection = widgets::TableState::default();
    if !table_state.records().is_empty() {
        selection.select(Some(model.selected()));
    }
    frame.render_stateful_widget(table, area, &mut selection);
}

/// Draw load status and the current notice
fn draw_status_line(frame: &mut Frame, area: Rect, table: &TableState) {
    let status = match table.status() {
        LoadStatus::Idle => Span::styled(" Idle ", Style::default().fg(Color::DarkGray)),
        LoadStatus::Loading => Span::styled(" Loading... ", Style::default().fg(Color::Yellow)),
        LoadStatus::Ready => Span::styled(" Ready ", Style::default().fg(Color::Green)),
        LoadStatus::Failed(_) => Span::styled(" Failed ", Style::default().fg(Color::Red)),
    };

    let mut spans = vec![status];
    if let Some(notice) = table.notice() {
        let color = match notice {
            Notice::InvalidQuery { .. } => Color::Yellow,
            Notice::FetchFailed(_) => Color::Red,
        };
        spans.push(Span::raw("| "));
        spans.push(Span::styled(notice.to_string(), Style::default().fg(color)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw footer with keybindings
fn draw_footer(frame: &mut Frame, area: Rect, mode: InputMode) {
    let footer_text = match mode {
        InputMode::Normal => {
            " [1]date [2]revenue [3]netIncome sort | [/]Search [r]Reset [c]Clear notice | [Up/Down]Navigate | [q]Quit "
        }
        InputMode::Search => " Type '<column>: <min>-<max>' | [Enter]Apply [Esc]Cancel ",
    };
    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(394_328_000_000.0, 0), "394,328,000,000");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1000.0, 0), "1,000");
        assert_eq!(format_number(-1_234_567.0, 0), "-1,234,567");
        assert_eq!(format_number(6.154, 2), "6.15");
        assert_eq!(format_number(12_345.5, 1), "12,345.5");
        assert_eq!(format_number(-0.001, 2), "0.00");
    }

    #[test]
    fn test_cell_text() {
        let mut record = IncomeStatement::new("2022-09-24", 394_328.0, 99_803.0);
        record.eps = 6.15;
        assert_eq!(cell_text(&record, Column::Date), "2022-09-24");
        assert_eq!(cell_text(&record, Column::Revenue), "394,328");
        assert_eq!(cell_text(&record, Column::Eps), "6.15");
    }

    #[test]
    fn test_header_label() {
        let sort = SortDescriptor::new(Column::Revenue, SortOrder::Desc);
        assert_eq!(header_label(Column::Revenue, sort), "revenue ▼");
        assert_eq!(header_label(Column::Date, sort), "date");
        assert_eq!(header_label(Column::Date, SortDescriptor::default()), "date ▲");
    }

    #[test]
    fn test_draw_renders_table() {
        let mut model = AppModel::new("AAPL (annual)");
        model.dispatch(TableAction::Loaded(vec![IncomeStatement::new(
            "2022-09-24",
            394_328.0,
            99_803.0,
        )]));

        let mut terminal = Terminal::new(TestBackend::new(140, 20)).unwrap();
        terminal.draw(|frame| draw(frame, &model)).unwrap();

        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("AAPL (annual)"));
        assert!(rendered.contains("operatingIncome"));
        assert!(rendered.contains("2022-09-24"));
        assert!(rendered.contains("394,328"));
        assert!(rendered.contains("1 of 1 statements"));
    }
}
