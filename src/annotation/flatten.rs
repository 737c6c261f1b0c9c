//! Task tree → flat records.

use std::path::{Component, Path};

use serde_json::{Map, Value};

use super::kind::{BoundingBox, ImageSize, ResultKind};
use super::model::{ResultEntry, Task};
use super::record::AnnotationRecord;

/// Task data keys that may reference the media, highest priority first.
pub const DATA_SOURCE_KEYS: [&str; 4] = ["image", "url", "path", "file"];

/// Flatten the annotations of `tasks` into records for `project_id`.
///
/// Records come out in traversal order: tasks as given, then annotations,
/// result entries and labels in the order they are listed. Unsupported
/// result types and empty label lists contribute nothing.
pub fn flatten<'a, I>(project_id: i64, tasks: I) -> Vec<AnnotationRecord>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut records = Vec::new();

    for task in tasks {
        let data_source = resolve_data_source(&task.data);
        for annotation in &task.annotations {
            for entry in &annotation.result {
                let base = AnnotationRecord {
                    annotation_id: annotation.id,
                    ..AnnotationRecord::new(project_id, task.id, data_source.clone())
                };
                push_result(&mut records, base, entry);
            }
        }
    }

    records
}

fn push_result(records: &mut Vec<AnnotationRecord>, base: AnnotationRecord, entry: &ResultEntry) {
    let kind = ResultKind::classify(entry);
    let Some(ann_type) = kind.ann_type() else {
        return;
    };

    match kind {
        ResultKind::RectangleLabels {
            labels,
            geometry,
            image,
        } => push_labels(records, &base, entry, ann_type, labels, image, geometry),
        ResultKind::Choices { labels, image } => push_labels(
            records,
            &base,
            entry,
            ann_type,
            labels,
            image,
            BoundingBox::default(),
        ),
        ResultKind::TextArea { texts, image } => push_labels(
            records,
            &base,
            entry,
            ann_type,
            texts,
            image,
            BoundingBox::default(),
        ),
        ResultKind::Relation {
            from_id,
            to_id,
            direction,
        } => records.push(AnnotationRecord {
            ann_type: Some(ann_type.to_string()),
            relation_from: from_id,
            relation_to: to_id,
            relation_type: direction,
            ..base
        }),
        ResultKind::Unsupported => {}
    }
}

/// One record per label, sharing region, image and geometry fields.
fn push_labels(
    records: &mut Vec<AnnotationRecord>,
    base: &AnnotationRecord,
    entry: &ResultEntry,
    ann_type: &str,
    labels: Vec<String>,
    image: ImageSize,
    geometry: BoundingBox,
) {
    let area_id = entry.id();
    let meta = entry.meta_text();

    records.extend(labels.into_iter().map(|label| AnnotationRecord {
        img_width: image.width,
        img_height: image.height,
        area_id: area_id.clone(),
        ann_type: Some(ann_type.to_string()),
        label: Some(label),
        meta: meta.clone(),
        bbox_x: geometry.x,
        bbox_y: geometry.y,
        bbox_width: geometry.width,
        bbox_height: geometry.height,
        rotation: geometry.rotation,
        ..base.clone()
    }));
}

/// Resolve the media reference of a task from its raw data.
///
/// Checks [`DATA_SOURCE_KEYS`] in order and uses the first one present.
/// An `image` value is a path and only its file name is kept; `url`,
/// `path` and `file` values are returned unchanged. Returns `None` when no
/// key is present.
pub fn resolve_data_source(data: &Map<String, Value>) -> Option<String> {
    let (key, value) = DATA_SOURCE_KEYS
        .iter()
        .find_map(|&key| data.get(key).map(|value| (key, value)))?;

    let raw = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    if key == "image" {
        let path = Path::new(&raw);
        let name = match path.components().next_back() {
            Some(Component::ParentDir) => "..".to_string(),
            _ => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        Some(name)
    } else {
        Some(raw)
    }
}
