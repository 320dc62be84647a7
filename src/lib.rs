//! Card deck catalog backed by a spreadsheet published as CSV.
//!
//! The document is fetched, scanned by a hand-rolled CSV parser, normalized
//! into catalog items and served to a front end as view models through a
//! small HTTP API.

pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use app::run;
pub use application::{CatalogStore, DeckLoader, DeckPresenter, DeckView, LoadState};
pub use domain::catalog::{CatalogFilters, CatalogItem, CategoryMatch};
pub use domain::csv::RawRecord;
pub use domain::error::{AppError, Result};
pub use infrastructure::csv::{parse_csv, CsvParser};
pub use infrastructure::markdown::{escape_html, strip_markdown_markup};
