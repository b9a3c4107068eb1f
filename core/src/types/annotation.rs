use crate::types::ProbeLabel;
use log::warn;
use serde_json::Value;

/// Ordered list of annotation labels stored under "Annotation Labels"
///
/// Built from whatever the metadata record holds: a missing key or a
/// non-list value normalizes to an empty set. Merging a label only ever
/// appends, and never appends a label that is already present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationSet {
    labels: Vec<String>,
}

impl AnnotationSet {
    /// Creates an empty annotation set
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes a raw metadata value into an annotation set
    ///
    /// Non-string entries inside a list are dropped so the persisted set is
    /// always a list of strings.
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(Value::Array(items)) = value else {
            return Self::new();
        };

        let mut labels = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::String(s) => labels.push(s.clone()),
                other => warn!("Dropping non-string annotation label: {}", other),
            }
        }

        Self { labels }
    }

    /// Converts the set back into a JSON array
    pub fn to_value(&self) -> Value {
        Value::Array(self.labels.iter().cloned().map(Value::String).collect())
    }

    /// Checks membership over the whole sequence
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Appends `label` unless it is already present
    ///
    /// Returns `true` if the set changed.
    pub fn merge(&mut self, label: ProbeLabel) -> bool {
        if self.contains(label.as_str()) {
            return false;
        }
        self.labels.push(label.as_str().to_string());
        true
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for AnnotationSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Merges a probe label into a raw "Annotation Labels" value
///
/// # Example
///
/// ```
/// use usprobe_core::{merge_label, ProbeLabel};
/// use serde_json::json;
///
/// let existing = json!(["curvilinear"]);
/// let merged = merge_label(Some(&existing), ProbeLabel::PhasedArray);
/// assert_eq!(merged.labels(), ["curvilinear", "phased-array"]);
///
/// // Merging again leaves the set unchanged
/// let again = merge_label(Some(&merged.to_value()), ProbeLabel::PhasedArray);
/// assert_eq!(again, merged);
/// ```
pub fn merge_label(existing: Option<&Value>, new_label: ProbeLabel) -> AnnotationSet {
    let mut set = AnnotationSet::from_value(existing);
    set.merge(new_label);
    set
}
