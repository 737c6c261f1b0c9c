//! Flat annotation row.

use serde::{Deserialize, Serialize};

/// Column names of [`AnnotationRecord`], in declaration order.
pub const FIELD_NAMES: [&str; 19] = [
    "project_id",
    "task_id",
    "data_source",
    "annotation_id",
    "img_width",
    "img_height",
    "area_id",
    "ann_type",
    "label",
    "meta",
    "bbox_x",
    "bbox_y",
    "bbox_width",
    "bbox_height",
    "rotation",
    "relation_from",
    "relation_to",
    "relation_type",
    "segmentation_points",
];

/// One flattened annotation.
///
/// Label-bearing results produce one record per label; relations produce
/// exactly one record. Fields a result type does not carry stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub project_id: i64,
    pub task_id: i64,
    /// File name or URL of the annotated media. `None` when the task data
    /// has none of the recognized keys.
    pub data_source: Option<String>,
    pub annotation_id: Option<i64>,
    pub img_width: Option<u32>,
    pub img_height: Option<u32>,
    /// Region id of the result entry.
    pub area_id: Option<String>,
    pub ann_type: Option<String>,
    pub label: Option<String>,
    /// First annotator comment on the region.
    pub meta: Option<String>,
    pub bbox_x: Option<f64>,
    pub bbox_y: Option<f64>,
    pub bbox_width: Option<f64>,
    pub bbox_height: Option<f64>,
    pub rotation: Option<f64>,
    pub relation_from: Option<String>,
    pub relation_to: Option<String>,
    pub relation_type: Option<String>,
    /// Polygon points. Nothing produces these yet.
    pub segmentation_points: Option<Vec<[f64; 2]>>,
}

impl AnnotationRecord {
    /// Record for a task with every optional field unset.
    #[must_use]
    pub fn new(project_id: i64, task_id: i64, data_source: Option<String>) -> Self {
        Self {
            project_id,
            task_id,
            data_source,
            ..Self::default()
        }
    }
}
