use std::io::Write;

use anyhow::{Context, Result};

use crate::config::{Cli, PrintFormat};
use crate::data::export::{to_delimited_text, write_export};
use crate::data::model::{cell_at, FilterRequest, FilteredTable, Table};
use crate::error::Severity;
use crate::pipeline::{Notification, OutputMode, Pipeline};

// ---------------------------------------------------------------------------
// Terminal front end
// ---------------------------------------------------------------------------

/// Run one filter from command-line arguments.
pub fn run(cli: &Cli) -> Result<()> {
    let pipeline = Pipeline::from_config(&cli.config)?;
    let mut stdout = std::io::stdout().lock();
    run_with(cli, &pipeline, &mut stdout)
}

/// Run one filter through `pipeline`, printing rows to `out` unless
/// `--output` names a file.
///
/// Warnings (no matching rows) are reported and exit cleanly; every other
/// failure becomes the process error.
pub fn run_with<W: Write>(cli: &Cli, pipeline: &Pipeline, out: &mut W) -> Result<()> {
    let request = FilterRequest::from_form(
        cli.url.as_deref().unwrap_or_default(),
        cli.column.as_deref().unwrap_or_default(),
        cli.term.as_deref().unwrap_or_default(),
    )?;

    let result = match pipeline.run(&request) {
        Ok(result) => result,
        Err(e) if e.severity() == Severity::Warning => {
            report(&Notification::from_error(&e));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    eprintln!("{}", result.summary());
    let mode = match &cli.output {
        Some(path) => {
            write_export(path, &result.table)?;
            OutputMode::Download
        }
        None => {
            print_result(out, &result, cli.format)?;
            OutputMode::Display
        }
    };
    report(&Notification::delivered(mode, &result));
    Ok(())
}

fn report(notification: &Notification) {
    match notification.severity {
        Severity::Warning => log::warn!("{}", notification.message),
        _ => log::info!("{}", notification.message),
    }
    eprintln!("{}: {}", notification.severity, notification.message);
}

/// Write the rows in the requested format.
pub fn print_result<W: Write>(out: &mut W, result: &FilteredTable, format: PrintFormat) -> Result<()> {
    match format {
        PrintFormat::Table => write_aligned(out, &result.table)?,
        PrintFormat::Csv => out.write_all(to_delimited_text(&result.table)?.as_bytes())?,
        PrintFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, result).context("encoding JSON")?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Pad every column to its widest cell, header underlined.
fn write_aligned<W: Write>(out: &mut W, table: &Table) -> std::io::Result<()> {
    let width = table.rows().iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..width)
        .map(|i| {
            table
                .rows()
                .iter()
                .map(|row| cell_at(row, i).chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    for (row_no, row) in table.rows().iter().enumerate() {
        let line: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| format!("{:<w$}", cell_at(row, i), w = *w))
            .collect();
        writeln!(out, "{}", line.join("  ").trim_end())?;

        if row_no == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            writeln!(out, "{}", rule.join("  "))?;
        }
    }
    Ok(())
}
