use crate::error::{ProbeError, Result};
use crate::types::{AnnotationSet, MaskKind};
use log::debug;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Key holding the inner radius used for classification
pub const RADIUS_KEY: &str = "radius1";

/// Key holding the mask geometry discriminator
pub const MASK_TYPE_KEY: &str = "mask_type";

/// Key holding the annotation label list
pub const ANNOTATION_LABELS_KEY: &str = "Annotation Labels";

/// Companion JSON metadata for one DICOM image
///
/// Keys keep the order they had on disk; keys that are not touched by
/// annotation are written back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRecord {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl MetadataRecord {
    /// Reads and parses a metadata file
    ///
    /// # Errors
    ///
    /// - `MetadataNotFound` if the file does not exist
    /// - `MetadataParse` if it is not a JSON object
    /// - `IoError` for any other read failure
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ProbeError::MetadataNotFound(path.to_path_buf()),
            _ => ProbeError::IoError(e),
        })?;

        Self::parse(path.to_path_buf(), &content)
    }

    /// Parses metadata text that belongs at `path`
    pub fn parse(path: PathBuf, content: &str) -> Result<Self> {
        let value: Value = match serde_json::from_str(content) {
            Ok(value) => value,
            Err(e) => {
                return Err(ProbeError::MetadataParse {
                    path,
                    reason: e.to_string(),
                })
            }
        };

        match value {
            Value::Object(fields) => Ok(Self { path, fields }),
            other => Err(ProbeError::MetadataParse {
                path,
                reason: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the inner radius
    ///
    /// # Errors
    ///
    /// Returns `InvalidMeasurement` if `radius1` is present but not a number.
    /// An absent or `null` radius is `Ok(None)`.
    pub fn radius(&self) -> Result<Option<f64>> {
        match self.fields.get(RADIUS_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => Ok(n.as_f64()),
            Some(other) => Err(ProbeError::InvalidMeasurement(other.to_string())),
        }
    }

    /// Returns the mask geometry
    pub fn mask_kind(&self) -> MaskKind {
        MaskKind::from_field(self.fields.get(MASK_TYPE_KEY).and_then(Value::as_str))
    }

    /// Returns the raw "Annotation Labels" value, if any
    pub fn raw_annotation_labels(&self) -> Option<&Value> {
        self.fields.get(ANNOTATION_LABELS_KEY)
    }

    /// Returns the normalized annotation labels
    pub fn annotation_labels(&self) -> AnnotationSet {
        AnnotationSet::from_value(self.raw_annotation_labels())
    }

    /// Replaces the annotation labels
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn set_annotation_labels(&mut self, labels: &AnnotationSet) {
        self.fields
            .insert(ANNOTATION_LABELS_KEY.to_string(), labels.to_value());
    }

    /// Serializes with 4-space indentation
    pub fn to_pretty_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.fields.serialize(&mut ser)?;

        String::from_utf8(buf)
            .map_err(|e| ProbeError::IoError(std::io::Error::new(ErrorKind::InvalidData, e)))
    }

    /// Writes the record back to its file
    ///
    /// The whole record is serialized first and written to a sibling
    /// temporary file, which is then renamed over the original.
    pub fn save(&self) -> Result<()> {
        let content = self.to_pretty_string()?;

        let mut tmp_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        fs::write(&tmp_path, content)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        debug!("Saved {}", self.path.display());
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
