use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::data::filter::{filter_rows, validate_column};
use crate::data::loader::parse_table;
use crate::data::model::{FilterRequest, FilteredTable};
use crate::data::source::{resolve, HttpSource, SheetSource};
use crate::error::{FilterError, Severity};

// ---------------------------------------------------------------------------
// Output mode – what the caller does with a successful result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OutputMode {
    Display,
    Download,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Resolve → fetch → parse → validate → filter, shared by every front end.
pub struct Pipeline {
    source: Arc<dyn SheetSource>,
    export_host: String,
}

impl Pipeline {
    pub fn new(source: Arc<dyn SheetSource>, export_host: impl Into<String>) -> Self {
        Pipeline {
            source,
            export_host: export_host.into(),
        }
    }

    /// A pipeline fetching over HTTP with the configured host and timeout.
    pub fn from_config(config: &Config) -> Result<Self, FilterError> {
        let source = HttpSource::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Pipeline::new(Arc::new(source), config.export_host.clone()))
    }

    pub fn run(&self, request: &FilterRequest) -> Result<FilteredTable, FilterError> {
        let locator = resolve(&request.sheet_url, &self.export_host)?;
        log::info!(
            "Fetching CSV for sheet {} (tab {}) from: {}",
            locator.sheet_id,
            locator.gid,
            locator.url
        );

        let raw = self.source.fetch(&locator.url)?;
        let table = parse_table(&raw);

        let index = validate_column(&table, request.column)?;
        let filtered = filter_rows(&table, index, &request.term);
        log::info!(
            "{} of {} rows match \"{}\" in column {}",
            filtered.data_len(),
            table.data_len(),
            request.term.as_str(),
            request.column
        );

        if filtered.data_len() == 0 {
            return Err(FilterError::NoMatches);
        }

        Ok(FilteredTable {
            term: request.term.as_str().to_string(),
            column: request.column,
            header_name: table.header_name(index).to_string(),
            table: filtered,
        })
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Notification {
            message: message.into(),
            severity,
        }
    }

    pub fn from_error(err: &FilterError) -> Self {
        Notification::new(err.to_string(), err.severity())
    }

    /// Message for a result that reached the user in the given mode.
    pub fn delivered(mode: OutputMode, result: &FilteredTable) -> Self {
        let n = result.match_count();
        match mode {
            OutputMode::Display => Notification::new(
                format!("Found {n} matching rows."),
                Severity::Success,
            ),
            OutputMode::Download => Notification::new(
                format!("Successfully filtered and downloaded {n} rows!"),
                Severity::Success,
            ),
        }
    }
}
