use lazy_static::lazy_static;
use regex::{Match, Regex};

use crate::data::filter::is_blank_or_na;
use crate::data::model::cell_at;

lazy_static! {
    static ref WEB_URL: Regex = Regex::new(r"https?://\S+").unwrap();
    static ref EMAIL: Regex =
        Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap();
    static ref ASIN: Regex = Regex::new(r"\bB[A-Z0-9]{9}\b").unwrap();
    static ref SHEET_ID: Regex = Regex::new(r"\b[a-zA-Z0-9_-]{44}\b").unwrap();
}

const MAX_LINK_TEXT: usize = 50;

/// A clickable piece of a table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellLink {
    pub text: String,
    pub url: String,
}

/// One run of a cell's text, plain or linked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Link(CellLink),
}

/// Split a cell into plain text and links.
///
/// `header` is the cell's column header; `headers` and `row` give access to
/// the row's ASIN for seller columns. A seller name that is not itself a URL
/// or e-mail becomes one seller link; otherwise URLs, e-mails, ASINs (outside
/// seller columns) and sheet ids are linked wherever they appear, earlier
/// kinds winning on overlap.
pub fn cell_spans(cell: &str, header: &str, headers: &[String], row: &[String]) -> Vec<Span> {
    if cell.is_empty() {
        return Vec::new();
    }

    let is_seller = header.to_lowercase().contains("seller");
    if is_seller && !is_blank_or_na(cell) && !cell.contains("http") && !cell.contains('@') {
        return vec![Span::Link(seller_link(cell.trim(), headers, row))];
    }

    let mut found: Vec<(usize, usize, CellLink)> = Vec::new();
    for m in WEB_URL.find_iter(cell) {
        claim(&mut found, m, shorten(m.as_str()), m.as_str().to_string());
    }
    for m in EMAIL.find_iter(cell) {
        claim(&mut found, m, m.as_str().to_string(), format!("mailto:{}", m.as_str()));
    }
    if !is_seller {
        for m in ASIN.find_iter(cell) {
            let url = format!("https://www.amazon.com/dp/{}", m.as_str());
            claim(&mut found, m, m.as_str().to_string(), url);
        }
    }
    for m in SHEET_ID.find_iter(cell) {
        let url = format!("https://docs.google.com/spreadsheets/d/{}", m.as_str());
        claim(&mut found, m, m.as_str().to_string(), url);
    }
    found.sort_by_key(|(start, _, _)| *start);

    let mut spans = Vec::new();
    let mut pos = 0;
    for (start, end, link) in found {
        if start > pos {
            spans.push(Span::Text(cell[pos..start].to_string()));
        }
        spans.push(Span::Link(link));
        pos = end;
    }
    if pos < cell.len() {
        spans.push(Span::Text(cell[pos..].to_string()));
    }
    spans
}

fn claim(found: &mut Vec<(usize, usize, CellLink)>, m: Match<'_>, text: String, url: String) {
    let (start, end) = (m.start(), m.end());
    if found.iter().any(|(s, e, _)| start < *e && *s < end) {
        return;
    }
    found.push((start, end, CellLink { text, url }));
}

fn seller_link(seller: &str, headers: &[String], row: &[String]) -> CellLink {
    let encoded = urlencoding::encode(seller);
    let asin = headers
        .iter()
        .position(|h| h.to_lowercase().contains("asin"))
        .map(|i| cell_at(row, i).trim())
        .filter(|asin| !asin.is_empty());
    let url = match asin {
        Some(asin) => format!("https://www.amazon.com/sp?ie=UTF8&seller={encoded}&asin={asin}"),
        None => format!("https://www.amazon.com/s?me={encoded}"),
    };
    CellLink {
        text: seller.to_string(),
        url,
    }
}

fn shorten(url: &str) -> String {
    if url.chars().count() > MAX_LINK_TEXT {
        let head: String = url.chars().take(MAX_LINK_TEXT - 3).collect();
        format!("{head}...")
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn only_link(spans: Vec<Span>) -> CellLink {
        match spans.as_slice() {
            [Span::Link(link)] => link.clone(),
            other => panic!("expected a single link, got {other:?}"),
        }
    }

    #[test]
    fn web_links_are_shortened() {
        let long = format!("https://example.com/{}", "a".repeat(60));
        let link = only_link(cell_spans(&long, "Link", &[], &[]));
        assert_eq!(link.url, long);
        assert_eq!(link.text.chars().count(), 50);
        assert!(link.text.ends_with("..."));

        let link = only_link(cell_spans("http://a.io/x", "Link", &[], &[]));
        assert_eq!(link.text, "http://a.io/x");
    }

    #[test]
    fn emails_become_mailto() {
        let link = only_link(cell_spans("sales@acme.com", "Contact", &[], &[]));
        assert_eq!(link.url, "mailto:sales@acme.com");
    }

    #[test]
    fn links_inside_longer_text() {
        let spans = cell_spans(
            "See https://a.io/x or mail bob@acme.com about B08N5WRWNW.",
            "Notes",
            &[],
            &[],
        );
        let link = |text: &str, url: &str| {
            Span::Link(CellLink {
                text: text.to_string(),
                url: url.to_string(),
            })
        };
        assert_eq!(
            spans,
            vec![
                Span::Text("See ".into()),
                link("https://a.io/x", "https://a.io/x"),
                Span::Text(" or mail ".into()),
                link("bob@acme.com", "mailto:bob@acme.com"),
                Span::Text(" about ".into()),
                link("B08N5WRWNW", "https://www.amazon.com/dp/B08N5WRWNW"),
                Span::Text(".".into()),
            ]
        );
    }

    #[test]
    fn url_wins_over_email_inside_it() {
        let spans = cell_spans("https://x.io/u/me@acme.com", "Link", &[], &[]);
        assert_eq!(only_link(spans).url, "https://x.io/u/me@acme.com");
    }

    #[test]
    fn seller_uses_row_asin() {
        let headers = strings(&["ASIN", "3P Seller"]);
        let row = strings(&["B000TEST01", "Acme & Co"]);
        let link = only_link(cell_spans(&row[1], &headers[1], &headers, &row));
        assert_eq!(
            link.url,
            "https://www.amazon.com/sp?ie=UTF8&seller=Acme%20%26%20Co&asin=B000TEST01"
        );

        let row = strings(&["", "Acme"]);
        let link = only_link(cell_spans(&row[1], &headers[1], &headers, &row));
        assert_eq!(link.url, "https://www.amazon.com/s?me=Acme");
    }

    #[test]
    fn seller_na_and_asin_like_names_stay_plain() {
        let headers = strings(&["Seller"]);
        assert_eq!(
            cell_spans("N/A", "Seller", &headers, &strings(&["N/A"])),
            vec![Span::Text("N/A".into())]
        );
        let spans = cell_spans("see https://s.io B08N5WRWNW", "Seller", &headers, &[]);
        assert!(spans.contains(&Span::Text(" B08N5WRWNW".into())));
    }

    #[test]
    fn sheet_ids_and_plain_text() {
        let id = "1".repeat(44);
        let link = only_link(cell_spans(&id, "Source", &[], &[]));
        assert_eq!(link.url, format!("https://docs.google.com/spreadsheets/d/{id}"));

        assert_eq!(
            cell_spans("Gadget", "Name", &[], &[]),
            vec![Span::Text("Gadget".into())]
        );
        assert!(cell_spans("", "Name", &[], &[]).is_empty());
    }
}
