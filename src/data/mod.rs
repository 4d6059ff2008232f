/// Data layer: locating, loading, filtering and exporting a sheet.
///
/// Architecture:
/// ```text
///   share link
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  resolve link → export URL, fetch CSV text
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → Table (row 0 = header)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  validate column, keep matching rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  Table → CSV text / file
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod source;
