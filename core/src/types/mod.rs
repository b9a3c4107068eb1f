//! Core type definitions for probe annotation
//!
//! - [`ProbeLabel`]: Tag written into a record's "Annotation Labels"
//! - [`MaskKind`]: Mask geometry discriminator that bypasses radius classification
//! - [`AnnotationSet`]: Ordered, duplicate-free list of annotation labels
//! - [`AnnotatorOptions`]: Configuration for a batch run

mod annotation;
mod enums;
mod options;

pub use annotation::{merge_label, AnnotationSet};
pub use enums::{MaskKind, ProbeLabel};
pub use options::AnnotatorOptions;
