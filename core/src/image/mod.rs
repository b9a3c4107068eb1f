//! DICOM image presentation
//!
//! Pixel decoding is left to whatever front end displays the image. This
//! module only opens the file, summarizes it, and hands it to a [`Viewer`].

pub mod tags;

use crate::classify::resolver::AnswerInput;
use crate::error::Result;
use dicom_object::{open_file, InMemDicomObject};
use log::debug;
use std::fmt;
use std::io::{self, Stdin, Stdout, Write};
use std::path::Path;
use tags::{
    get_int_value, get_string_value, get_u16_value, COLUMNS, MODALITY, NUMBER_OF_FRAMES,
    PHOTOMETRIC_INTERPRETATION, ROWS,
};

/// Presentation-relevant facts about a DICOM image
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSummary {
    /// Modality (e.g. "US"), `None` if missing
    pub modality: Option<String>,

    /// Number of rows in image
    pub rows: Option<u16>,

    /// Number of columns in image
    pub columns: Option<u16>,

    /// Number of frames (cine loops have more than one)
    pub number_of_frames: i32,

    /// Photometric interpretation (e.g. "MONOCHROME2", "RGB")
    pub photometric_interpretation: Option<String>,
}

impl ImageSummary {
    /// Opens a DICOM file and summarizes it
    pub fn from_file(path: &Path) -> Result<Self> {
        let dcm = open_file(path)?;
        Ok(Self::from_dicom(&dcm))
    }

    /// Summarizes an already-opened DICOM object
    pub fn from_dicom(dcm: &InMemDicomObject) -> Self {
        Self {
            modality: get_string_value(dcm, MODALITY),
            rows: get_u16_value(dcm, ROWS),
            columns: get_u16_value(dcm, COLUMNS),
            number_of_frames: get_int_value(dcm, NUMBER_OF_FRAMES).unwrap_or(1),
            photometric_interpretation: get_string_value(dcm, PHOTOMETRIC_INTERPRETATION),
        }
    }

    pub fn is_multi_frame(&self) -> bool {
        self.number_of_frames > 1
    }

    /// Whether the image should be shown with a gray colormap
    pub fn is_grayscale(&self) -> bool {
        self.photometric_interpretation
            .as_deref()
            .map(|p| p.starts_with("MONOCHROME"))
            .unwrap_or(true)
    }

    /// Window title for an image
    pub fn title(&self, file_name: &str) -> String {
        format!(
            "{} — Modality: {}",
            file_name,
            self.modality.as_deref().unwrap_or("Unknown")
        )
    }
}

/// Text description of an image shown by [`ConsoleViewer`]
pub struct ImageReport<'a> {
    file_name: &'a str,
    summary: &'a ImageSummary,
}

impl<'a> ImageReport<'a> {
    pub fn new(file_name: &'a str, summary: &'a ImageSummary) -> Self {
        Self { file_name, summary }
    }
}

impl<'a> fmt::Display for ImageReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary.title(self.file_name))?;
        if self.summary.is_multi_frame() {
            writeln!(
                f,
                "Multi-frame image detected. Frames: {}",
                self.summary.number_of_frames
            )?;
        }
        if let (Some(rows), Some(columns)) = (self.summary.rows, self.summary.columns) {
            writeln!(f, "  Size:  {}x{}", columns, rows)?;
        }
        write!(
            f,
            "  Color: {}",
            if self.summary.is_grayscale() {
                "gray"
            } else {
                "color"
            }
        )
    }
}

/// Presents an image to the user
pub trait Viewer {
    /// Shows the image at `path`
    ///
    /// Returning an error never stops annotation of the record.
    fn show(&mut self, path: &Path) -> Result<()>;
}

/// Viewer that shows nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullViewer;

impl Viewer for NullViewer {
    fn show(&mut self, path: &Path) -> Result<()> {
        debug!("Display disabled, skipping {}", path.display());
        Ok(())
    }
}

/// Prints an image summary, optionally waiting for Enter afterwards
pub struct ConsoleViewer<W, R> {
    output: W,
    input: R,
    pause: bool,
}

impl<W: Write, R: AnswerInput> ConsoleViewer<W, R> {
    pub fn new(output: W, input: R) -> Self {
        Self {
            output,
            input,
            pause: false,
        }
    }

    /// Builder: Wait for Enter after each image
    pub fn pausing(mut self, pause: bool) -> Self {
        self.pause = pause;
        self
    }

    /// Prints an already-loaded summary
    pub fn present(&mut self, file_name: &str, summary: &ImageSummary) -> Result<()> {
        writeln!(self.output, "{}", ImageReport::new(file_name, summary))?;

        if self.pause {
            write!(self.output, "Press Enter to continue to the next image...")?;
            self.output.flush()?;
            let mut line = String::new();
            self.input.read_answer(&mut line)?;
        }
        Ok(())
    }
}

impl ConsoleViewer<Stdout, Stdin> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stdin())
    }
}

impl<W: Write, R: AnswerInput> Viewer for ConsoleViewer<W, R> {
    fn show(&mut self, path: &Path) -> Result<()> {
        let summary = ImageSummary::from_file(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.present(&file_name, &summary)
    }
}
