use serde::Serialize;

use crate::error::{FilterError, InputField};

/// Header shown for a column whose header cell is blank.
pub const UNKNOWN_HEADER: &str = "Unknown";

// ---------------------------------------------------------------------------
// Table – rows of string cells, row 0 is the header
// ---------------------------------------------------------------------------

pub type Row = Vec<String>;

/// A parsed sheet. Rows may be ragged; a cell past the end of its row reads
/// as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Table { rows }
    }

    /// All rows including the header.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The header row, or an empty slice for an empty table.
    pub fn header(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rows after the header.
    pub fn data_rows(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Number of data rows (header excluded).
    pub fn data_len(&self) -> usize {
        self.data_rows().len()
    }

    /// Number of header cells.
    pub fn width(&self) -> usize {
        self.header().len()
    }

    /// Whether the table has no rows at all, not even a header.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Display name of a header cell; blank headers become "Unknown".
    pub fn header_name(&self, index: usize) -> &str {
        let name = cell_at(self.header(), index);
        if name.trim().is_empty() {
            UNKNOWN_HEADER
        } else {
            name
        }
    }
}

/// Read a cell, treating out-of-bounds access as an empty cell.
pub fn cell_at(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

// ---------------------------------------------------------------------------
// SearchTerm – a non-empty term with its case-folded form
// ---------------------------------------------------------------------------

/// A trimmed, non-empty search term. The only way to obtain one is through
/// [`SearchTerm::new`], so the filter engine never sees an empty term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    text: String,
    folded: String,
}

impl SearchTerm {
    pub fn new(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        Some(SearchTerm {
            text: text.to_string(),
            folded: text.to_lowercase(),
        })
    }

    /// The term as the user typed it (trimmed).
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Literal, case-insensitive substring test.
    pub fn is_contained_in(&self, cell: &str) -> bool {
        cell.to_lowercase().contains(&self.folded)
    }
}

// ---------------------------------------------------------------------------
// FilterRequest – validated form input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FilterRequest {
    pub sheet_url: String,
    /// 1-based, as the user counts columns.
    pub column: usize,
    pub term: SearchTerm,
}

impl FilterRequest {
    /// Build a request from raw form text. Fields are trimmed; a missing or
    /// unparseable field fails before any network call is made.
    pub fn from_form(sheet_url: &str, column: &str, term: &str) -> Result<Self, FilterError> {
        let sheet_url = sheet_url.trim();
        if sheet_url.is_empty() {
            return Err(FilterError::MissingInput(InputField::SheetUrl));
        }
        let term =
            SearchTerm::new(term).ok_or(FilterError::MissingInput(InputField::SearchTerm))?;
        let column = column
            .trim()
            .parse::<usize>()
            .map_err(|_| FilterError::MissingInput(InputField::Column))?;

        Ok(FilterRequest {
            sheet_url: sheet_url.to_string(),
            column,
            term,
        })
    }
}

// ---------------------------------------------------------------------------
// FilteredTable – a successful result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct FilteredTable {
    pub term: String,
    /// 1-based column the filter ran on.
    pub column: usize,
    pub header_name: String,
    #[serde(rename = "rows")]
    pub table: Table,
}

impl FilteredTable {
    /// Number of matching data rows.
    pub fn match_count(&self) -> usize {
        self.table.data_len()
    }

    pub fn summary(&self) -> String {
        format!(
            "Showing results for \"{}\" in column {} ({})",
            self.term, self.column, self.header_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> Table {
        Table::new(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn short_rows_read_as_empty_cells() {
        let t = table(&[&["a", "b", "c"], &["1"]]);
        assert_eq!(cell_at(&t.data_rows()[0], 0), "1");
        assert_eq!(cell_at(&t.data_rows()[0], 2), "");
    }

    #[test]
    fn blank_header_is_unknown() {
        let t = table(&[&["Name", "  "]]);
        assert_eq!(t.header_name(0), "Name");
        assert_eq!(t.header_name(1), "Unknown");
        assert_eq!(t.header_name(7), "Unknown");
    }

    #[test]
    fn empty_table_has_no_header() {
        let t = Table::default();
        assert!(t.is_empty());
        assert_eq!(t.width(), 0);
        assert_eq!(t.data_len(), 0);
    }

    #[test]
    fn search_term_rejects_blank_input() {
        assert!(SearchTerm::new("").is_none());
        assert!(SearchTerm::new("   ").is_none());
        let term = SearchTerm::new("  AcMe ").unwrap();
        assert_eq!(term.as_str(), "AcMe");
        assert!(term.is_contained_in("ACME Corp"));
        assert!(!term.is_contained_in("Acne"));
    }

    #[test]
    fn search_term_is_literal_not_regex() {
        let term = SearchTerm::new("a.c").unwrap();
        assert!(!term.is_contained_in("abc"));
        assert!(term.is_contained_in("xa.cx"));
    }

    #[test]
    fn form_input_is_trimmed_and_checked() {
        let req = FilterRequest::from_form(" https://x/spreadsheets/d/A ", " 2 ", " acme ").unwrap();
        assert_eq!(req.sheet_url, "https://x/spreadsheets/d/A");
        assert_eq!(req.column, 2);
        assert_eq!(req.term.as_str(), "acme");

        assert!(matches!(
            FilterRequest::from_form("", "1", "x"),
            Err(FilterError::MissingInput(InputField::SheetUrl))
        ));
        assert!(matches!(
            FilterRequest::from_form("u", "1", "  "),
            Err(FilterError::MissingInput(InputField::SearchTerm))
        ));
        assert!(matches!(
            FilterRequest::from_form("u", "two", "x"),
            Err(FilterError::MissingInput(InputField::Column))
        ));
    }

    #[test]
    fn summary_names_term_column_and_header() {
        let result = FilteredTable {
            term: "acme".into(),
            column: 2,
            header_name: "Seller".into(),
            table: table(&[&["Name", "Seller"], &["Gadget", "Acme"]]),
        };
        assert_eq!(result.match_count(), 1);
        assert_eq!(
            result.summary(),
            "Showing results for \"acme\" in column 2 (Seller)"
        );
    }
}
