use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Severity – how an outcome is presented to the user
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Success,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Success => write!(f, "success"),
        }
    }
}

// ---------------------------------------------------------------------------
// InputField – which form field was left empty or unusable
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    SheetUrl,
    Column,
    SearchTerm,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputField::SheetUrl | InputField::SearchTerm => {
                write!(f, "Please enter both URL and search term!")
            }
            InputField::Column => write!(f, "Please enter a column number (1 or greater)."),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterError – every way a filter request can end without a table
// ---------------------------------------------------------------------------

/// Terminal outcome of a filter request that produced no table.
///
/// None of these are fatal to the process; each maps to one user-visible
/// message and one [`Severity`].
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("{0}")]
    MissingInput(InputField),

    #[error("Invalid Google Sheet link!")]
    InvalidLink,

    #[error("Could not fetch the sheet: {0}")]
    Network(#[from] reqwest::Error),

    #[error(
        "The sheet is not publicly accessible. Make sure it's shared with 'Anyone with the link → Viewer'."
    )]
    AccessDenied,

    #[error("Column index {column} is out of range. This sheet only has {header_count} columns.")]
    ColumnOutOfRange { column: usize, header_count: usize },

    #[error("Column {column} ({header}) appears to be empty or contains only \"N/A\" values.")]
    ColumnEmpty { column: usize, header: String },

    #[error("No matching results found.")]
    NoMatches,
}

impl FilterError {
    /// `NoMatches` is informational; everything else is an error.
    pub fn severity(&self) -> Severity {
        match self {
            FilterError::NoMatches => Severity::Warning,
            _ => Severity::Error,
        }
    }
}
