use super::model::{cell_at, Row, SearchTerm, Table};
use crate::error::FilterError;

// ---------------------------------------------------------------------------
// Blank-or-N/A predicate
// ---------------------------------------------------------------------------

/// Empty, whitespace-only, or a literal "n/a" in any case. Such cells count
/// as absent data for both validation and filtering.
pub fn is_blank_or_na(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a")
}

// ---------------------------------------------------------------------------
// Column validation
// ---------------------------------------------------------------------------

/// Check a 1-based column selector against the table and return the
/// 0-based index.
///
/// Fails when the column lies outside the header, or when no data row holds
/// anything but blank / N/A values in it.
pub fn validate_column(table: &Table, column: usize) -> Result<usize, FilterError> {
    let header_count = table.width();
    let index = match column.checked_sub(1) {
        Some(index) if index < header_count => index,
        _ => {
            return Err(FilterError::ColumnOutOfRange {
                column,
                header_count,
            })
        }
    };

    let has_data = table
        .data_rows()
        .iter()
        .any(|row| !is_blank_or_na(cell_at(row, index)));

    if !has_data {
        return Err(FilterError::ColumnEmpty {
            column,
            header: table.header_name(index).to_string(),
        });
    }

    Ok(index)
}

// ---------------------------------------------------------------------------
// Row filter
// ---------------------------------------------------------------------------

/// Keep the header plus every data row whose cell at `index` contains the
/// term. Blank / N/A cells never match. Row order is preserved.
pub fn filter_rows(table: &Table, index: usize, term: &SearchTerm) -> Table {
    let Some(header) = table.rows().first() else {
        return Table::default();
    };

    let rows: Vec<Row> = std::iter::once(header.clone())
        .chain(
            table
                .data_rows()
                .iter()
                .filter(|row| {
                    let cell = cell_at(row, index);
                    !is_blank_or_na(cell) && term.is_contained_in(cell)
                })
                .cloned(),
        )
        .collect();

    Table::new(rows)
}
