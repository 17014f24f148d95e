//! # glance_core: Income-Statement Table Logic
//!
//! ## Core Layer Role
//!
//! glance_core is the bottom layer of Value Glance and provides:
//! - Record and column types: `IncomeStatement`, `Column` (`types`)
//! - Sort engine: `SortDescriptor`, `sort_records` (`sort`)
//! - Query parser: `RangeQuery`, `parse_query` (`query`)
//! - Filter engine: `filter_records` (`filter`)
//! - Table state reducer: `TableState`, `TableAction` (`state`)
//! - Record source seam: `RecordSource`, `StaticSource` (`source`)
//! - Error types: `QueryError`, `FetchError` (`error`)
//!
//! ## No Presentation Dependencies
//!
//! Nothing here knows about terminals, HTTP clients or async runtimes.
//! Every engine is a pure function over a slice of records, so the whole
//! table behaviour can be exercised without a network or a screen.
//!
//! ## Usage Examples
//!
//! ```rust
//! use glance_core::prelude::*;
//!
//! let records = vec![
//!     IncomeStatement::new("2022-09-24", 394_328.0, 99_803.0),
//!     IncomeStatement::new("2021-09-25", 365_817.0, 94_680.0),
//!     IncomeStatement::new("2020-09-26", 274_515.0, 57_411.0),
//! ];
//!
//! let state = TableState::default()
//!     .reduce(TableAction::Loaded(records))
//!     .reduce(TableAction::Search("date: 2021-2022".to_string()));
//!
//! assert_eq!(state.records().len(), 2);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod filter;
pub mod query;
pub mod sort;
pub mod source;
pub mod state;
pub mod types;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{FetchError, QueryError};
    pub use crate::filter::filter_records;
    pub use crate::query::{parse_query, RangeQuery};
    pub use crate::sort::{sort_records, SortDescriptor, SortOrder};
    pub use crate::source::{RecordSource, StaticSource};
    pub use crate::state::{LoadStatus, Notice, RequestId, TableAction, TableState};
    pub use crate::types::{Column, FieldValue, IncomeStatement};
}
