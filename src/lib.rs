//! `lsx` - Label Studio annotation extractor
//!
//! Pulls projects, tasks and annotations out of a Label Studio instance and
//! flattens the nested per-task annotation results into uniform rows.
//!
//! # Features
//!
//! - **Flattening**: bounding boxes, choices, free text and relations in one row schema
//! - **Tables**: CSV, JSON and markdown output with a fixed column order
//! - **Graceful failure**: service errors are logged and surface as "unknown", never as panics
//!
//! # Example
//!
//! ```rust,no_run
//! use lsx::config::{Config, Overrides};
//! use lsx::{Extractor, LabelStudioClient, Table};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load(Overrides::default())?;
//!     let extractor = Extractor::new(LabelStudioClient::new(&config)?);
//!
//!     if let Some(records) = extractor.annotations(1).await {
//!         println!("{}", Table::from_records(&records)?.to_csv()?);
//!     }
//!     Ok(())
//! }
//! ```

pub mod annotation;
pub mod config;
pub mod extractor;
pub mod source;
pub mod table;

pub use annotation::{flatten, resolve_data_source, AnnotationRecord, ResultKind, Task};
pub use extractor::Extractor;
pub use source::{AnnotationSource, LabelStudioClient, Project, ProjectSummary, SourceError};
pub use table::Table;

/// Version of lsx
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
