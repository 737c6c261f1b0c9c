//! Flattening a realistic Label Studio task export.
//!
//! The fixture mixes every supported result type with an unsupported one,
//! an empty label list, a task without annotations and a task without a
//! media reference.

use lsx::annotation::{flatten, Task};
use lsx::{AnnotationRecord, Table};

fn fixture_tasks() -> Vec<Task> {
    serde_json::from_str(include_str!("fixtures/tasks.json")).expect("fixture should parse")
}

fn flattened() -> Vec<AnnotationRecord> {
    flatten(7, &fixture_tasks())
}

#[test]
fn emits_one_record_per_label_and_relation() {
    let records = flattened();
    // 2 car labels + 1 pedestrian + 1 relation + 1 choice + 1 text + 1 sentiment
    assert_eq!(records.len(), 7);
}

#[test]
fn records_follow_traversal_order() {
    let records = flattened();
    let summary: Vec<_> = records
        .iter()
        .map(|r| (r.task_id, r.annotation_id, r.ann_type.as_deref(), r.label.as_deref()))
        .collect();

    assert_eq!(
        summary,
        vec![
            (101, Some(501), Some("rectanglelabels"), Some("car")),
            (101, Some(501), Some("rectanglelabels"), Some("parked")),
            (101, Some(501), Some("rectanglelabels"), Some("pedestrian")),
            (101, Some(501), Some("relation"), None),
            (101, Some(501), Some("choices"), Some("sunny")),
            (101, Some(502), Some("text"), Some("needs review")),
            (103, Some(503), Some("choices"), Some("positive")),
        ]
    );
}

#[test]
fn labels_of_one_box_share_everything_else() {
    let records = flattened();
    let (car, parked) = (&records[0], &records[1]);

    assert_eq!(
        AnnotationRecord {
            label: None,
            ..car.clone()
        },
        AnnotationRecord {
            label: None,
            ..parked.clone()
        }
    );
    assert_eq!(car.area_id.as_deref(), Some("car-1"));
    assert_eq!(car.meta.as_deref(), Some("partially occluded"));
    assert_eq!(car.img_width, Some(1920));
    assert_eq!(car.img_height, Some(1080));
    assert_eq!(car.bbox_x, Some(12.5));
    assert_eq!(car.bbox_height, Some(15.5));
    assert_eq!(car.rotation, Some(0.0));
}

#[test]
fn image_key_wins_over_url() {
    let records = flattened();
    assert!(records
        .iter()
        .filter(|r| r.task_id == 101)
        .all(|r| r.data_source.as_deref() == Some("street-01.jpg")));
}

#[test]
fn relation_links_regions() {
    let records = flattened();
    let relation = &records[3];

    assert_eq!(relation.relation_from.as_deref(), Some("ped-1"));
    assert_eq!(relation.relation_to.as_deref(), Some("car-1"));
    assert_eq!(relation.relation_type.as_deref(), Some("right"));
    assert_eq!(relation.label, None);
    assert_eq!(relation.bbox_x, None);
    assert_eq!(relation.img_width, None);
}

#[test]
fn task_without_media_has_no_data_source() {
    let records = flattened();
    let last = records.last().unwrap();
    assert_eq!(last.task_id, 103);
    assert_eq!(last.data_source, None);
}

#[test]
fn nothing_is_ever_segmented() {
    assert!(flattened().iter().all(|r| r.segmentation_points.is_none()));
}

#[test]
fn table_round_trip_preserves_rows() {
    let records = flattened();
    let table = Table::from_records(&records).unwrap();
    assert_eq!(table.len(), records.len());

    let maps = table.to_maps();
    for (map, record) in maps.iter().zip(&records) {
        assert_eq!(map["task_id"], serde_json::json!(record.task_id));
        assert_eq!(map["label"], serde_json::json!(record.label));
    }

    assert_eq!(table.to_records().unwrap(), records);
}

#[test]
fn csv_has_one_line_per_record_plus_header() {
    let table = Table::from_records(&flattened()).unwrap();
    let csv = table.to_csv().unwrap();
    assert_eq!(csv.lines().count(), 8);
    assert!(csv.starts_with("project_id,task_id,data_source,annotation_id,"));
}
