use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::FilterError;

lazy_static! {
    static ref SHEET_ID: Regex = Regex::new(r"spreadsheets/d/([a-zA-Z0-9_-]+)").unwrap();
    static ref TAB_ID: Regex = Regex::new(r"gid=(\d+)").unwrap();
}

/// Host used when none is configured.
pub const DEFAULT_EXPORT_HOST: &str = "https://docs.google.com";

// ---------------------------------------------------------------------------
// Resolver: share link → CSV export locator
// ---------------------------------------------------------------------------

/// Where the CSV export of one sheet tab lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLocator {
    pub sheet_id: String,
    pub gid: String,
    pub url: String,
}

/// Turn any spreadsheet share link into its CSV export locator.
///
/// The tab comes from a `gid=<digits>` fragment anywhere in the link and
/// defaults to the first tab (`0`).
pub fn resolve(share_url: &str, export_host: &str) -> Result<ExportLocator, FilterError> {
    let sheet_id = SHEET_ID
        .captures(share_url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(FilterError::InvalidLink)?;

    let gid = TAB_ID
        .captures(share_url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "0".to_string());

    let url = format!(
        "{}/spreadsheets/d/{sheet_id}/gviz/tq?tqx=out:csv&gid={gid}",
        export_host.trim_end_matches('/')
    );

    Ok(ExportLocator { sheet_id, gid, url })
}

// ---------------------------------------------------------------------------
// Fetcher
// ---------------------------------------------------------------------------

/// Something that can hand back the raw text behind an export locator.
pub trait SheetSource: Send + Sync {
    fn fetch(&self, export_url: &str) -> Result<String, FilterError>;
}

/// Fetches exports over HTTP with a blocking client.
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Result<Self, FilterError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(HttpSource { client })
    }
}

impl SheetSource for HttpSource {
    fn fetch(&self, export_url: &str) -> Result<String, FilterError> {
        let response = self.client.get(export_url).send()?.error_for_status()?;
        let text = response.text()?;
        log::debug!("Fetched {} bytes from {export_url}", text.len());
        reject_html(text)
    }
}

/// A private sheet answers with an HTML sign-in page instead of CSV.
pub fn reject_html(text: String) -> Result<String, FilterError> {
    let head: String = text
        .trim_start()
        .chars()
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();
    if head.starts_with("<!doctype html") || head.starts_with("<html") {
        return Err(FilterError::AccessDenied);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_id_and_tab_from_fragment() {
        let loc = resolve(
            "https://docs.google.com/spreadsheets/d/ABC123/edit#gid=7",
            DEFAULT_EXPORT_HOST,
        )
        .unwrap();
        assert_eq!(loc.sheet_id, "ABC123");
        assert_eq!(loc.gid, "7");
        assert_eq!(
            loc.url,
            "https://docs.google.com/spreadsheets/d/ABC123/gviz/tq?tqx=out:csv&gid=7"
        );
    }

    #[test]
    fn tab_defaults_to_zero() {
        let loc = resolve(
            "https://docs.google.com/spreadsheets/d/a-b_C9/edit?usp=sharing",
            DEFAULT_EXPORT_HOST,
        )
        .unwrap();
        assert_eq!(loc.sheet_id, "a-b_C9");
        assert_eq!(loc.gid, "0");
    }

    #[test]
    fn custom_host_without_trailing_slash() {
        let loc = resolve("spreadsheets/d/X/edit?gid=12", "http://localhost:8080/").unwrap();
        assert_eq!(
            loc.url,
            "http://localhost:8080/spreadsheets/d/X/gviz/tq?tqx=out:csv&gid=12"
        );
    }

    #[test]
    fn link_without_sheet_id_is_invalid() {
        assert!(matches!(
            resolve("https://example.com/some/page", DEFAULT_EXPORT_HOST),
            Err(FilterError::InvalidLink)
        ));
    }

    #[test]
    fn html_payload_is_access_denied() {
        assert!(matches!(
            reject_html("<!DOCTYPE html><html><body>Sign in</body></html>".into()),
            Err(FilterError::AccessDenied)
        ));
        assert!(matches!(
            reject_html("\n  <html lang=\"en\">".into()),
            Err(FilterError::AccessDenied)
        ));
        assert_eq!(reject_html("a,b\n1,2".into()).unwrap(), "a,b\n1,2");
    }
}
