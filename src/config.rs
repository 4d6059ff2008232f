use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

use crate::data::source::DEFAULT_EXPORT_HOST;

/// Filter the rows of a public Google Sheet by column and search term.
///
/// Without `--url`, `--column` or `--term` a window opens; with any of them
/// the filter runs once in the terminal.
#[derive(Debug, Parser)]
#[command(name = "sheet-sift", version, about)]
pub struct Cli {
    /// Share link of the sheet (any link containing `spreadsheets/d/<id>`).
    #[arg(long)]
    pub url: Option<String>,

    /// Column to search, counting from 1.
    #[arg(long)]
    pub column: Option<String>,

    /// Text to look for (case-insensitive).
    #[arg(long)]
    pub term: Option<String>,

    /// Save the filtered rows as CSV here instead of printing them.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// How printed rows are formatted.
    #[arg(long, value_enum, default_value_t = PrintFormat::Table)]
    pub format: PrintFormat,

    #[command(flatten)]
    pub config: Config,
}

impl Cli {
    pub fn is_headless(&self) -> bool {
        self.url.is_some() || self.column.is_some() || self.term.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PrintFormat {
    /// Aligned text columns
    Table,
    Csv,
    Json,
}

/// Settings shared by the window and the terminal mode.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Host serving the CSV exports.
    #[arg(long, env = "SHEET_SIFT_EXPORT_HOST", default_value = DEFAULT_EXPORT_HOST)]
    pub export_host: String,

    /// Give up on a fetch after this many seconds.
    #[arg(long, env = "SHEET_SIFT_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// File name suggested when saving results.
    #[arg(long, env = "SHEET_SIFT_DOWNLOAD_NAME", default_value = "filtered_data.csv")]
    pub download_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            export_host: DEFAULT_EXPORT_HOST.to_string(),
            timeout_secs: 30,
            download_name: "filtered_data.csv".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_opens_the_window() {
        let cli = Cli::try_parse_from(["sheet-sift"]).unwrap();
        assert!(!cli.is_headless());
        assert_eq!(cli.format, PrintFormat::Table);
        assert_eq!(cli.config.download_name, "filtered_data.csv");
    }

    #[test]
    fn filter_arguments_select_terminal_mode() {
        let cli = Cli::try_parse_from([
            "sheet-sift",
            "--url",
            "https://docs.google.com/spreadsheets/d/X/edit",
            "--column",
            "2",
            "--term",
            "acme",
            "--format",
            "json",
            "--timeout-secs",
            "5",
        ])
        .unwrap();
        assert!(cli.is_headless());
        assert_eq!(cli.format, PrintFormat::Json);
        assert_eq!(cli.config.timeout_secs, 5);
    }
}
