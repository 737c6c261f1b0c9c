//! Typed classification of result entries.

use serde_json::{Map, Value};

use super::model::ResultEntry;

/// Rectangle geometry, in percent of the image as Label Studio stores it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
}

impl BoundingBox {
    fn from_value(value: &Map<String, Value>) -> Self {
        let number = |key: &str| value.get(key).and_then(Value::as_f64);
        Self {
            x: number("x"),
            y: number("y"),
            width: number("width"),
            height: number("height"),
            rotation: number("rotation"),
        }
    }
}

/// Size of the annotated image in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageSize {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ImageSize {
    fn from_entry(entry: &ResultEntry) -> Self {
        Self {
            width: entry.original_width(),
            height: entry.original_height(),
        }
    }
}

/// What a result entry is, with only the fields that type carries.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultKind {
    /// `rectanglelabels`: a box with one or more labels.
    RectangleLabels {
        labels: Vec<String>,
        geometry: BoundingBox,
        image: ImageSize,
    },
    /// `choices`: classification labels, no geometry.
    Choices { labels: Vec<String>, image: ImageSize },
    /// `textarea`: free text entries.
    TextArea { texts: Vec<String>, image: ImageSize },
    /// `relation`: a directed link between two regions.
    Relation {
        from_id: Option<String>,
        to_id: Option<String>,
        direction: Option<String>,
    },
    /// Any other `type`. Dropped during flattening.
    Unsupported,
}

impl ResultKind {
    /// Classify a raw result entry by its `type`.
    pub fn classify(entry: &ResultEntry) -> Self {
        let empty = Map::new();
        let value = entry.value().unwrap_or(&empty);

        match entry.result_type() {
            Some("rectanglelabels") => Self::RectangleLabels {
                labels: string_list(value, "rectanglelabels"),
                geometry: BoundingBox::from_value(value),
                image: ImageSize::from_entry(entry),
            },
            Some("choices") => Self::Choices {
                labels: string_list(value, "choices"),
                image: ImageSize::from_entry(entry),
            },
            Some("textarea") => Self::TextArea {
                texts: text_list(value),
                image: ImageSize::from_entry(entry),
            },
            Some("relation") => Self::Relation {
                from_id: entry.from_id(),
                to_id: entry.to_id(),
                direction: entry.direction(),
            },
            _ => Self::Unsupported,
        }
    }

    /// Normalized `ann_type` written to records, `None` for unsupported entries.
    pub fn ann_type(&self) -> Option<&'static str> {
        match self {
            Self::RectangleLabels { .. } => Some("rectanglelabels"),
            Self::Choices { .. } => Some("choices"),
            Self::TextArea { .. } => Some("text"),
            Self::Relation { .. } => Some("relation"),
            Self::Unsupported => None,
        }
    }
}

/// Text entries live under `value.textarea`, or under `value.text` as the
/// Label Studio editor writes them.
fn text_list(value: &Map<String, Value>) -> Vec<String> {
    if value.contains_key("textarea") {
        string_list(value, "textarea")
    } else {
        string_list(value, "text")
    }
}

/// String elements of `value[key]`. Missing keys, non-arrays and
/// non-string elements contribute nothing.
fn string_list(value: &Map<String, Value>, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
