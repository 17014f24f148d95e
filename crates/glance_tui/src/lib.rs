//! # Value Glance TUI
//!
//! Terminal table for a company's annual income statements.
//!
//! ## TUI Mode
//! Uses ratatui for rendering and crossterm for terminal handling. Records
//! come from the financial data provider through [`api_client::FmpClient`],
//! or from a local JSON file.
//!
//! ### Keys
//! - **1 / 2 / 3**: sort by date, revenue, netIncome (press again to flip)
//! - **/**: type a range query such as `date: 2020-2022`, then Enter
//! - **r**: reset the view by fetching again
//!
//! ## Show Mode
//! Fetches once, applies `--sort` and `--query`, and prints a text table.

pub mod api_client;
pub mod app;
pub mod config;
pub mod error;
pub mod report;
pub mod screens;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::api_client::FmpClient;
    pub use crate::app::{AppModel, Effect, InputMode, TuiApp};
    pub use crate::config::{ConfigError, GlanceConfig, DEFAULT_CONFIG_PATH};
    pub use crate::error::GlanceError;
    pub use crate::report::{build_view, render_text_table};
}
