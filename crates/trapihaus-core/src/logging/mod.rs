//! Structured logging with a JSONL file per binary.
//!
//! Console output goes through `tracing_subscriber::fmt`; every event is also
//! appended to `<data_dir>/logs/<date>_<instance>.jsonl` so sessions can be
//! inspected after the fact.
//!
//! ## Usage
//!
//! ```ignore
//! use trapihaus_core::logging::LoggingBuilder;
//!
//! let log_file = LoggingBuilder::new(config.logs_dir(), "desktop")
//!     .with_filter("trapihaus=info,trapihaus_core=debug")
//!     .init()?;
//! ```
//!
//! ### Querying logs with jq
//!
//! ```bash
//! # Every sign-in and sign-out
//! jq 'select(.msg | test("Signed"))' logs/*.jsonl
//!
//! # Storage problems
//! jq 'select(.level == "warn")' logs/*.jsonl
//! ```

pub mod entry;
pub mod layer;
pub mod writer;

pub use entry::JsonLogEntry;
pub use layer::{JsonlLayer, LoggingBuilder};
pub use writer::{read_entries, LogWriter};
