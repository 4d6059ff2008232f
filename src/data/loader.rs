use csv::ReaderBuilder;

use super::model::{Row, Table};

// ---------------------------------------------------------------------------
// CSV → Table
// ---------------------------------------------------------------------------

/// Parse exported CSV text into a [`Table`].
///
/// The payload is trimmed first. Record lengths may vary, the first record
/// is kept as an ordinary row (it becomes the header), and rows with no
/// cells or only empty cells are dropped.
pub fn parse_table(raw: &str) -> Table {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(raw.trim().as_bytes());

    let mut rows: Vec<Row> = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Skipping unreadable CSV record {row_no}: {e}");
                continue;
            }
        };

        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    log::debug!("Parsed {} rows", rows.len());
    Table::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quoted_fields() {
        let t = parse_table("Name,Note\n\"Widget, large\",\"said \"\"hi\"\"\"\n");
        assert_eq!(
            t.rows(),
            &[
                vec!["Name".to_string(), "Note".to_string()],
                vec!["Widget, large".to_string(), "said \"hi\"".to_string()],
            ]
        );
    }

    #[test]
    fn drops_empty_rows_and_surrounding_whitespace() {
        let t = parse_table("\n\n a,b\n,\n\n1,2\n,,\n   \n");
        assert_eq!(t.rows().len(), 2);
        assert_eq!(t.header(), &["a".to_string(), "b".to_string()][..]);
        assert_eq!(t.data_rows()[0], vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn keeps_ragged_rows() {
        let t = parse_table("a,b,c\n1\n1,2,3,4");
        assert_eq!(t.data_rows()[0].len(), 1);
        assert_eq!(t.data_rows()[1].len(), 4);
    }

    #[test]
    fn blank_payload_is_empty_table() {
        assert!(parse_table("  \n ").is_empty());
    }

    #[test]
    fn multiline_cells_survive() {
        let t = parse_table("h\n\"line one\nline two\"");
        assert_eq!(t.data_rows()[0][0], "line one\nline two");
    }
}
