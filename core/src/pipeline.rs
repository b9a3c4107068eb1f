use crate::classify::{classify, AmbiguityResolver};
use crate::error::{ProbeError, Result};
use crate::image::Viewer;
use crate::metadata::MetadataRecord;
use crate::types::{AnnotatorOptions, ProbeLabel};
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// What happened to one DICOM file
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// Label merged and metadata saved
    Annotated {
        label: ProbeLabel,
        /// Whether the label was new to the record
        changed: bool,
    },
    /// Metadata has no usable radius1; nothing written
    NoMeasurement,
    /// Companion JSON missing or unparseable; nothing shown or written
    Skipped(String),
    /// Classification or saving failed
    Failed(String),
}

/// Outcome of one DICOM file
#[derive(Debug, Clone, PartialEq)]
pub struct RecordResult {
    pub dicom_path: PathBuf,
    pub outcome: RecordOutcome,
}

/// Outcomes of a whole batch, in processing order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub records: Vec<RecordResult>,
}

impl BatchSummary {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records annotated with `label`
    pub fn count_label(&self, label: ProbeLabel) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, RecordOutcome::Annotated { label: l, .. } if l == label))
            .count()
    }

    /// Number of records whose outcome matches `predicate`
    pub fn count(&self, predicate: impl Fn(&RecordOutcome) -> bool) -> usize {
        self.records.iter().filter(|r| predicate(&r.outcome)).count()
    }
}

/// Collects `.dcm` files under `directory`, sorted by path
///
/// The extension check is case-insensitive. Subdirectories are walked only
/// when `recursive` is set; symlinked directories are never entered.
pub fn collect_dicom_files(directory: &Path, recursive: bool) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_into(directory, recursive, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_into(directory: &Path, recursive: bool, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type()?.is_dir() {
            if recursive {
                collect_into(&path, recursive, files)?;
            }
        } else if path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("dcm"))
            .unwrap_or(false)
        {
            files.push(path);
        }
    }
    Ok(())
}

/// Companion metadata path: same directory and stem, `.json` extension
pub fn companion_json_path(dicom_path: &Path) -> PathBuf {
    dicom_path.with_extension("json")
}

/// Record name used in prompts and answer files
///
/// The path relative to `root` without its extension, joined with `/`
/// (`study1/scan` for `<root>/study1/scan.dcm`). Files outside `root`
/// fall back to the bare file stem.
pub fn record_name(root: Option<&Path>, dicom_path: &Path) -> String {
    let relative = root
        .and_then(|root| dicom_path.strip_prefix(root).ok())
        .filter(|rel| rel.components().count() > 0);

    match relative {
        Some(rel) => rel
            .with_extension("")
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/"),
        None => dicom_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}

/// Runs the annotate pipeline over DICOM files one at a time
pub struct Annotator<'a> {
    options: AnnotatorOptions,
    root: Option<PathBuf>,
    resolver: &'a mut dyn AmbiguityResolver,
    viewer: &'a mut dyn Viewer,
}

impl<'a> Annotator<'a> {
    pub fn new(
        options: AnnotatorOptions,
        resolver: &'a mut dyn AmbiguityResolver,
        viewer: &'a mut dyn Viewer,
    ) -> Self {
        Self {
            options,
            root: None,
            resolver,
            viewer,
        }
    }

    /// Processes every DICOM file in `directory`
    ///
    /// # Errors
    ///
    /// Only fails if `directory` is not a readable directory. Per-record
    /// problems are reported in the summary and never stop the batch.
    pub fn run(&mut self, directory: &Path) -> Result<BatchSummary> {
        if !directory.is_dir() {
            return Err(ProbeError::InvalidDirectory(directory.to_path_buf()));
        }

        let dicom_files = collect_dicom_files(directory, self.options.recursive)?;
        if dicom_files.is_empty() {
            warn!("No DICOM files found in {}", directory.display());
            return Ok(BatchSummary::default());
        }

        info!("Found {} DICOM files", dicom_files.len());
        self.root = Some(directory.to_path_buf());

        let mut summary = BatchSummary::default();
        for dicom_path in dicom_files {
            let outcome = self.process_record(&dicom_path);
            summary.records.push(RecordResult {
                dicom_path,
                outcome,
            });
        }

        Ok(summary)
    }

    /// Processes a single DICOM file and its companion metadata
    pub fn process_record(&mut self, dicom_path: &Path) -> RecordOutcome {
        info!("Displaying: {}", dicom_path.display());

        let mut record = match MetadataRecord::load(&companion_json_path(dicom_path)) {
            Ok(record) => record,
            Err(e @ (ProbeError::MetadataNotFound(_) | ProbeError::MetadataParse { .. })) => {
                warn!("{}", e);
                return RecordOutcome::Skipped(e.to_string());
            }
            Err(e) => {
                error!("Failed to read metadata for {}: {}", dicom_path.display(), e);
                return RecordOutcome::Failed(e.to_string());
            }
        };

        if let Err(e) = self.viewer.show(dicom_path) {
            warn!("Could not display {}: {}", dicom_path.display(), e);
        }

        let name = record_name(self.root.as_deref(), dicom_path);
        let label = match record
            .radius()
            .and_then(|radius| classify(&name, radius, record.mask_kind(), &mut *self.resolver))
        {
            Ok(label) => label,
            Err(e @ (ProbeError::MissingMeasurement | ProbeError::InvalidMeasurement(_))) => {
                warn!("{}: {}", name, e);
                return RecordOutcome::NoMeasurement;
            }
            Err(e) => {
                error!("{}: classification failed: {}", name, e);
                return RecordOutcome::Failed(e.to_string());
            }
        };

        let mut labels = record.annotation_labels();
        let changed = labels.merge(label);
        record.set_annotation_labels(&labels);

        if let Err(e) = record.save() {
            error!("Failed to save {}: {}", record.path().display(), e);
            return RecordOutcome::Failed(e.to_string());
        }

        info!("{}: detected probe type {}", name, label);
        if self.options.echo_json {
            match record.to_pretty_string() {
                Ok(json) => println!("Updated JSON metadata:\n{}", json),
                Err(e) => warn!("Could not render {}: {}", record.path().display(), e),
            }
        }

        RecordOutcome::Annotated { label, changed }
    }
}
