pub mod classify;
pub mod cli;
pub mod error;
pub mod image;
pub mod metadata;
pub mod pipeline;
pub mod types;

pub use classify::{classify, AmbiguityResolver};
pub use cli::report::BatchReport;
pub use error::{ProbeError, Result};
pub use image::{ImageSummary, Viewer};
pub use metadata::MetadataRecord;
pub use pipeline::{Annotator, BatchSummary, RecordOutcome};
pub use types::*;
