//! Label Studio task and annotation model.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A single unit of work: one media item plus its annotations.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Task {
    pub id: i64,
    /// Raw task payload. Holds the media reference (`image`, `url`, ...).
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub annotations: Vec<Annotation>,
    /// Every other field the service returns, kept for raw task output.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One annotator's submission for a task.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Annotation {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: Vec<ResultEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One result entry inside an annotation.
///
/// Kept as raw JSON: result entries vary by `type` and the service adds
/// keys freely, so every accessor does its own lookup and says what it
/// returns when the key is missing or has the wrong shape.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ResultEntry(pub Value);

impl ResultEntry {
    /// Region id of this entry, or `None` when missing.
    ///
    /// Numeric ids are rendered as their decimal text.
    pub fn id(&self) -> Option<String> {
        self.0.get("id").and_then(scalar_text)
    }

    /// The `type` discriminator, or `None` when missing or not a string.
    pub fn result_type(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    /// The `value` mapping. Missing or non-object values yield `None`,
    /// which callers treat as an empty mapping.
    pub fn value(&self) -> Option<&Map<String, Value>> {
        self.0.get("value").and_then(Value::as_object)
    }

    /// `original_width` as an integer, `None` when missing or fractional.
    pub fn original_width(&self) -> Option<u32> {
        self.0.get("original_width").and_then(integral)
    }

    /// `original_height` as an integer, `None` when missing or fractional.
    pub fn original_height(&self) -> Option<u32> {
        self.0.get("original_height").and_then(integral)
    }

    /// First element of `meta.text`, `None` when the list is missing or empty.
    pub fn meta_text(&self) -> Option<String> {
        self.0
            .get("meta")
            .and_then(|meta| meta.get("text"))
            .and_then(Value::as_array)
            .and_then(|texts| texts.first())
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// Source region of a relation.
    pub fn from_id(&self) -> Option<String> {
        self.0.get("from_id").and_then(scalar_text)
    }

    /// Target region of a relation.
    pub fn to_id(&self) -> Option<String> {
        self.0.get("to_id").and_then(scalar_text)
    }

    /// Relation direction (`right`, `left` or `bi`).
    pub fn direction(&self) -> Option<String> {
        self.0
            .get("direction")
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

/// Exports sometimes carry `null` where a collection is expected.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Strings pass through; numbers become their decimal text. Anything else is absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn integral(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= 0.0 && f <= f64::from(u32::MAX) {
        return Some(f as u32);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(value: Value) -> ResultEntry {
        ResultEntry(value)
    }

    #[test]
    fn task_defaults_missing_collections() {
        let task: Task = serde_json::from_value(json!({"id": 4})).unwrap();
        assert_eq!(task.id, 4);
        assert!(task.data.is_empty());
        assert!(task.annotations.is_empty());
    }

    #[test]
    fn task_treats_null_collections_as_empty() {
        let tasks: Vec<Task> = serde_json::from_value(json!([
            {"id": 1, "data": {"image": "a.png"}, "annotations": [
                {"id": 10, "result": [{"id": "r", "type": "choices"}]}
            ]},
            {"id": 2, "data": null, "annotations": null},
            {"id": 3, "annotations": [{"id": 30, "result": null}]}
        ]))
        .unwrap();

        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].annotations[0].result.len(), 1);
        assert!(tasks[1].data.is_empty());
        assert!(tasks[1].annotations.is_empty());
        assert_eq!(tasks[2].annotations[0].id, Some(30));
        assert!(tasks[2].annotations[0].result.is_empty());
    }

    #[test]
    fn task_keeps_unknown_fields() {
        let task: Task =
            serde_json::from_value(json!({"id": 4, "inner_id": 9, "is_labeled": true})).unwrap();
        assert_eq!(task.extra.get("inner_id"), Some(&json!(9)));
        assert_eq!(task.extra.get("is_labeled"), Some(&json!(true)));
    }

    #[test]
    fn annotation_defaults_missing_result() {
        let ann: Annotation = serde_json::from_value(json!({"id": 12})).unwrap();
        assert_eq!(ann.id, Some(12));
        assert!(ann.result.is_empty());
    }

    #[test]
    fn result_entry_accepts_any_json() {
        let ann: Annotation =
            serde_json::from_value(json!({"result": [42, "text", {"type": "choices"}]})).unwrap();
        assert_eq!(ann.result.len(), 3);
        assert_eq!(ann.result[0].result_type(), None);
        assert_eq!(ann.result[2].result_type(), Some("choices"));
    }

    #[test]
    fn meta_text_takes_first_comment() {
        let e = entry(json!({"meta": {"text": ["blurry", "second"]}}));
        assert_eq!(e.meta_text().as_deref(), Some("blurry"));
    }

    #[test]
    fn meta_text_absent_for_empty_or_missing_list() {
        assert_eq!(entry(json!({"meta": {"text": []}})).meta_text(), None);
        assert_eq!(entry(json!({"meta": {}})).meta_text(), None);
        assert_eq!(entry(json!({})).meta_text(), None);
    }

    #[test]
    fn original_dimensions_require_integers() {
        let e = entry(json!({"original_width": 640, "original_height": 480.0}));
        assert_eq!(e.original_width(), Some(640));
        assert_eq!(e.original_height(), Some(480));

        let e = entry(json!({"original_width": 640.5, "original_height": "480"}));
        assert_eq!(e.original_width(), None);
        assert_eq!(e.original_height(), None);
    }

    #[test]
    fn numeric_ids_are_rendered_as_text() {
        let e = entry(json!({"id": 17, "from_id": "a", "to_id": 3}));
        assert_eq!(e.id().as_deref(), Some("17"));
        assert_eq!(e.from_id().as_deref(), Some("a"));
        assert_eq!(e.to_id().as_deref(), Some("3"));
    }
}
