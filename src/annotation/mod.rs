//! Annotation flattening.
//!
//! Label Studio stores annotations as a tree: every task carries zero or
//! more annotations (one per annotator submission), and every annotation
//! carries zero or more result entries. Result entries are heterogeneous:
//! bounding boxes, classification choices, free text and relations between
//! regions all live side by side in the same list.
//!
//! This module turns that tree into a flat sequence of
//! [`AnnotationRecord`]s with a single uniform schema.
//!
//! # Architecture
//!
//! - [`Task`], [`Annotation`], [`ResultEntry`]: the service's JSON model,
//!   deserialized permissively (missing keys become absent fields)
//! - [`ResultKind`]: typed classification of a result entry, one variant per
//!   supported `type`
//! - [`flatten`]: traversal that emits records in task → annotation →
//!   result → label order
//!
//! # Example
//!
//! ```rust
//! use lsx::annotation::{flatten, Task};
//!
//! let task: Task = serde_json::from_value(serde_json::json!({
//!     "id": 7,
//!     "data": {"image": "/data/upload/cat.png"},
//!     "annotations": [{
//!         "id": 1,
//!         "result": [{
//!             "id": "r1",
//!             "type": "choices",
//!             "value": {"choices": ["cat"]}
//!         }]
//!     }]
//! }))
//! .unwrap();
//!
//! let records = flatten(3, [&task]);
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].label.as_deref(), Some("cat"));
//! assert_eq!(records[0].data_source.as_deref(), Some("cat.png"));
//! ```

mod flatten;
mod kind;
mod model;
mod record;

pub use flatten::{flatten, resolve_data_source, DATA_SOURCE_KEYS};
pub use kind::{BoundingBox, ImageSize, ResultKind};
pub use model::{Annotation, ResultEntry, Task};
pub use record::{AnnotationRecord, FIELD_NAMES};
