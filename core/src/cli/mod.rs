pub mod report;

use crate::types::{AnnotatorOptions, ProbeLabel};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for usprobe
#[derive(Parser, Debug)]
#[command(name = "usprobe")]
#[command(about = "Label ultrasound DICOM records with their probe type")]
#[command(version)]
pub struct Cli {
    /// Directory containing .dcm files and their companion .json metadata
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Also process subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// How to decide radii between 5 and 10
    #[arg(short, long, default_value = "prompt")]
    pub ambiguous: AmbiguityPolicy,

    /// JSON file of pre-supplied answers keyed by record name
    #[arg(long, value_name = "FILE")]
    pub answers: Option<PathBuf>,

    /// Do not open the DICOM images
    #[arg(long)]
    pub no_display: bool,

    /// Wait for Enter after each image
    #[arg(long, conflicts_with = "no_display")]
    pub pause: bool,

    /// Do not print updated metadata records
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Run options derived from the flags
    pub fn options(&self) -> AnnotatorOptions {
        AnnotatorOptions::default()
            .recursive(self.recursive)
            .echo_json(!self.quiet)
    }
}

/// Ambiguous-band policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AmbiguityPolicy {
    /// Ask on the terminal
    Prompt,
    /// Always choose phased-array
    PhasedArray,
    /// Always choose curvilinear
    Curvilinear,
}

impl AmbiguityPolicy {
    /// Label chosen without asking, if any
    pub fn fixed_label(&self) -> Option<ProbeLabel> {
        match self {
            AmbiguityPolicy::Prompt => None,
            AmbiguityPolicy::PhasedArray => Some(ProbeLabel::PhasedArray),
            AmbiguityPolicy::Curvilinear => Some(ProbeLabel::Curvilinear),
        }
    }
}
