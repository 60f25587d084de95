//! Shared core for Han name-pair extraction: data model, the three matching
//! passes, exporters, page-text helpers and the session reducer.
//!
//! Used by both the CLI and the browser frontend.

pub mod error;
pub mod export;
pub mod pair;
pub mod passes;
pub mod session;
pub mod source;

pub use error::{Error, FETCH_FAILED_MESSAGE, FetchFailure, Result};
pub use export::{ExportFormat, to_csv, to_json, to_text};
pub use pair::{NamePair, PairList};
pub use passes::{Match, Pass, count_by_pass, extract, extract_tagged};
pub use session::{Session, SessionEvent, Status};
pub use source::{DEFAULT_PROXY, html_to_text, page_text, proxy_url};
