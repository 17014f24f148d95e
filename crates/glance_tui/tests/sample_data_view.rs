//! Integration tests over the bundled sample statements.

use std::path::PathBuf;

use glance_core::prelude::*;
use glance_tui::prelude::*;

/// Get the bundled sample file path
fn sample_path() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(manifest_dir).join("data/sample_income_statement.json")
}

async fn sample_records() -> Vec<IncomeStatement> {
    let source = StaticSource::from_json_file(&sample_path()).expect("Should read sample file");
    source.fetch().await.expect("Static source should not fail")
}

#[tokio::test]
async fn test_sample_file_decodes() {
    let records = sample_records().await;
    assert_eq!(records.len(), 5);
    assert!(records.iter().all(|r| r.symbol.as_deref() == Some("AAPL")));
    assert!(records.iter().all(|r| r.year().is_some()));
}

#[tokio::test]
async fn test_show_sorted_by_net_income() {
    let view = build_view(
        sample_records().await,
        Some("netIncome:desc".parse().unwrap()),
        None,
    )
    .unwrap();

    let years: Vec<i32> = view.records().iter().filter_map(|r| r.year()).collect();
    assert_eq!(years, [2022, 2021, 2018, 2020, 2019]);

    let text = render_text_table(&view);
    assert!(text.contains("netIncome ▼"));
    assert!(text.contains("5 of 5 statements"));
}

#[tokio::test]
async fn test_show_year_window() {
    let view = build_view(sample_records().await, None, Some("date: 2019-2021")).unwrap();
    let dates: Vec<&str> = view.records().iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, ["2021-09-25", "2020-09-26", "2019-09-28"]);
}

#[tokio::test]
async fn test_model_reset_reverts_to_fetch_order() {
    let records = sample_records().await;
    let mut model = AppModel::new("sample");
    model.dispatch(TableAction::Loaded(records.clone()));

    model.handle_key(crossterm::event::KeyCode::Char('1').into());
    assert_eq!(model.table().records()[0].date, "2022-09-24");
    model.handle_key(crossterm::event::KeyCode::Char('1').into());
    assert_eq!(model.table().records()[0].date, "2018-09-29");

    assert_eq!(
        model.handle_key(crossterm::event::KeyCode::Char('r').into()),
        Some(Effect::Fetch)
    );
    let request = model.begin_fetch();
    model.dispatch(TableAction::FetchCompleted {
        request,
        result: Ok(records),
    });
    assert_eq!(model.table().records()[0].date, "2022-09-24");
    assert_eq!(
        model.table().sort(),
        SortDescriptor::new(Column::Date, SortOrder::Asc)
    );
}
