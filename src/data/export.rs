use std::path::Path;

use anyhow::{Context, Result};
use csv::{QuoteStyle, WriterBuilder};

use super::model::Table;

/// Serialise a table back into CSV that [`parse_table`] reads cell-for-cell.
///
/// Every field is quoted so that leading and trailing whitespace survives the
/// payload trim on the way back in.
///
/// [`parse_table`]: super::loader::parse_table
pub fn to_delimited_text(table: &Table) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    for row in table.rows() {
        writer.write_record(row).context("writing CSV record")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV writer: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

/// Write `table` as CSV to `path`.
pub fn write_export(path: &Path, table: &Table) -> Result<()> {
    let text = to_delimited_text(table)?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported {} rows to {}", table.data_len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_table;

    fn table(rows: &[&[&str]]) -> Table {
        Table::new(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn quotes_delimiters_quotes_and_newlines() {
        let t = table(&[&["a", "b"], &["x,y", "say \"hi\""], &["multi\nline", ""]]);
        let text = to_delimited_text(&t).unwrap();
        assert!(text.starts_with("\"a\",\"b\"\n"));
        assert!(text.contains("\"x,y\""));
        assert!(text.contains("\"say \"\"hi\"\"\""));
        assert_eq!(parse_table(&text), t);
    }

    #[test]
    fn round_trip_keeps_edge_whitespace_and_ragged_rows() {
        let t = table(&[
            &["  padded header", "Seller "],
            &["1"],
            &["2", "Acme", "extra"],
            &["", "trailing  "],
        ]);
        let text = to_delimited_text(&t).unwrap();
        assert_eq!(parse_table(&text), t);
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtered_data.csv");
        let t = table(&[&["Name", "Seller"], &["Gadget", "Acme"]]);
        write_export(&path, &t).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(parse_table(&written), t);
    }
}
