//! Table state and its reducer.
//!
//! [`TableState`] is a plain value owned by whoever renders it. It changes
//! only through [`TableState::reduce`], which consumes the current state and
//! an action and returns the next state. Every view change is a wholesale
//! replacement of the record sequence.
//!
//! # Fetch sequencing
//!
//! Each fetch is tagged with a [`RequestId`] when it starts. A completion is
//! applied only if it answers the most recently started request that is
//! still outstanding, so an old reset finishing late cannot overwrite a
//! newer one.
//!
//! # Examples
//!
//! ```
//! use glance_core::prelude::*;
//!
//! let state = TableState::default();
//! let request = state.next_request_id();
//! let state = state.reduce(TableAction::FetchStarted(request));
//! assert!(state.is_loading());
//!
//! let state = state.reduce(TableAction::FetchCompleted {
//!     request,
//!     result: Err(FetchError::Status { code: 401 }),
//! });
//! assert!(matches!(state.status(), LoadStatus::Failed(_)));
//! assert!(state.notice().is_some());
//! ```

use std::fmt;

use crate::error::{FetchError, QueryError};
use crate::filter::filter_records;
use crate::query::{parse_query, RangeQuery};
use crate::sort::{sort_records, SortDescriptor};
use crate::types::{Column, IncomeStatement};

/// Identifier assigned to each fetch when it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Progress of the most recent fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// Records loaded
    Ready,
    /// Last fetch failed
    Failed(String),
}

/// User-visible message attached to the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A search string was rejected; the view was left unchanged.
    InvalidQuery {
        /// Text as typed
        raw: String,
        /// Reason for rejection
        error: QueryError,
    },
    /// A fetch failed; the view was left unchanged.
    FetchFailed(FetchError),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidQuery { raw, error } => write!(f, "Ignored search '{}': {}", raw, error),
            Self::FetchFailed(error) => write!(f, "Fetch failed: {}", error),
        }
    }
}

/// Transitions accepted by [`TableState::reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum TableAction {
    /// Replace the view with freshly loaded records, in source order.
    ///
    /// The stored sort descriptor is kept but not reapplied.
    Loaded(Vec<IncomeStatement>),
    /// Store the descriptor and reorder the current view.
    Sort(SortDescriptor),
    /// Narrow the current view to records matching the query.
    Filter(RangeQuery),
    /// Parse raw search text and filter on success.
    Search(String),
    /// A fetch has been issued.
    FetchStarted(RequestId),
    /// A fetch has finished.
    FetchCompleted {
        /// Request the result answers
        request: RequestId,
        /// Records or failure
        result: Result<Vec<IncomeStatement>, FetchError>,
    },
    /// Clear the current notice.
    DismissNotice,
}

/// Authoritative current view of the table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableState {
    records: Vec<IncomeStatement>,
    loaded_count: usize,
    sort: SortDescriptor,
    status: LoadStatus,
    last_issued: u64,
    pending: Option<RequestId>,
    notice: Option<Notice>,
}

impl TableState {
    /// Records currently in view.
    pub fn records(&self) -> &[IncomeStatement] {
        &self.records
    }

    /// Number of records in the most recent load.
    pub fn loaded_count(&self) -> usize {
        self.loaded_count
    }

    /// Active sort descriptor.
    pub fn sort(&self) -> SortDescriptor {
        self.sort
    }

    /// Load status.
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Current notice, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Whether a fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Identifier to use for the next fetch.
    pub fn next_request_id(&self) -> RequestId {
        RequestId(self.last_issued + 1)
    }

    /// Apply `action` and return the resulting state.
    pub fn reduce(mut self, action: TableAction) -> Self {
        match action {
            TableAction::Loaded(records) => self.load(records),
            TableAction::Sort(descriptor) => {
                self.records = sort_records(&self.records, descriptor);
                self.sort = descriptor;
            }
            TableAction::Filter(query) => {
                self.records = filter_records(&self.records, &query);
            }
            TableAction::Search(raw) => match parse_query(&raw, &Column::SORTABLE) {
                Ok(query) => {
                    tracing::debug!("Applying query {:?}", query);
                    self.records = filter_records(&self.records, &query);
                    self.notice = None;
                }
                Err(error) => {
                    tracing::debug!("Rejected query '{}': {}", raw, error);
                    self.notice = Some(Notice::InvalidQuery { raw, error });
                }
            },
            TableAction::FetchStarted(request) => {
                self.last_issued = self.last_issued.max(request.0);
                self.pending = Some(request);
                self.status = LoadStatus::Loading;
            }
            TableAction::FetchCompleted { request, result } => {
                if self.pending != Some(request) {
                    tracing::debug!("Discarding stale fetch result {}", request);
                    return self;
                }
                self.pending = None;
                match result {
                    Ok(records) => self.load(records),
                    Err(error) => {
                        tracing::warn!("Fetch {} failed: {}", request, error);
                        self.status = LoadStatus::Failed(error.to_string());
                        self.notice = Some(Notice::FetchFailed(error));
                    }
                }
            }
            TableAction::DismissNotice => self.notice = None,
        }
        self
    }

    fn load(&mut self, records: Vec<IncomeStatement>) {
        self.loaded_count = records.len();
        self.records = records;
        self.status = LoadStatus::Ready;
        self.notice = None;
    }
}
