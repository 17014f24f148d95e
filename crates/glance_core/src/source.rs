//! Record source seam.
//!
//! The table never talks to the network directly. Anything that can produce
//! a list of income statements implements [`RecordSource`]; the HTTP client
//! lives in the presentation crate.

use std::path::Path;

use crate::error::FetchError;
use crate::types::IncomeStatement;

/// Provider of income-statement records.
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the full record list, in provider order.
    async fn fetch(&self) -> Result<Vec<IncomeStatement>, FetchError>;

    /// Short human-readable label for status lines and logs.
    fn describe(&self) -> String;
}

/// In-memory record source.
///
/// Returns the same records, or the same error, on every fetch.
#[derive(Debug, Clone)]
pub struct StaticSource {
    result: Result<Vec<IncomeStatement>, FetchError>,
    label: String,
}

impl StaticSource {
    /// Source that always yields `records`
    pub fn new(records: Vec<IncomeStatement>) -> Self {
        Self {
            result: Ok(records),
            label: "static".to_string(),
        }
    }

    /// Source that always fails with `error`
    pub fn failing(error: FetchError) -> Self {
        Self {
            result: Err(error),
            label: "static".to_string(),
        }
    }

    /// Load records from a JSON file holding a provider payload.
    pub fn from_json_file(path: &Path) -> Result<Self, FetchError> {
        let content = std::fs::read_to_string(path)?;
        let records: Vec<IncomeStatement> = serde_json::from_str(&content)?;
        tracing::debug!("Loaded {} records from {}", records.len(), path.display());

        Ok(Self {
            result: Ok(records),
            label: path.display().to_string(),
        })
    }
}

#[async_trait::async_trait]
impl RecordSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<IncomeStatement>, FetchError> {
        self.result.clone()
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}
