use std::fmt;

/// Ultrasound probe label written into "Annotation Labels"
///
/// `Rectangle` is not a probe geometry: it marks records whose mask is a
/// plain rectangle, for which the radius is never consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProbeLabel {
    PhasedArray,
    Curvilinear,
    Rectangle,
}

impl ProbeLabel {
    /// All labels, in display order
    pub const ALL: [ProbeLabel; 3] = [
        ProbeLabel::PhasedArray,
        ProbeLabel::Curvilinear,
        ProbeLabel::Rectangle,
    ];

    /// Returns the tag stored in the metadata record
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeLabel::PhasedArray => "phased-array",
            ProbeLabel::Curvilinear => "curvilinear",
            ProbeLabel::Rectangle => "rectangle",
        }
    }

    /// Returns whether this label describes a transducer geometry
    pub fn is_probe(&self) -> bool {
        !matches!(self, ProbeLabel::Rectangle)
    }

    /// Maps a single-keystroke answer to a probe label
    ///
    /// `p` (case-insensitive, surrounding whitespace ignored) selects
    /// phased-array. Anything else, including an empty answer, selects
    /// curvilinear.
    pub fn from_answer(answer: &str) -> Self {
        if answer.trim().to_lowercase() == "p" {
            ProbeLabel::PhasedArray
        } else {
            ProbeLabel::Curvilinear
        }
    }

    /// Parses a full label tag
    ///
    /// Returns `None` for anything other than the three known tags.
    pub fn parse(s: &str) -> Option<Self> {
        let s_lower = s.trim().to_lowercase();
        ProbeLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == s_lower)
    }
}

impl fmt::Display for ProbeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Mask geometry discriminator read from `mask_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaskKind {
    /// `mask_type == "rectangle"`
    Rectangle,
    /// Absent or any other value
    #[default]
    Other,
}

impl MaskKind {
    /// Parses the `mask_type` field
    ///
    /// Only the exact value `"rectangle"` is recognized.
    pub fn from_field(value: Option<&str>) -> Self {
        match value {
            Some("rectangle") => MaskKind::Rectangle,
            _ => MaskKind::Other,
        }
    }

    pub fn is_rectangle(&self) -> bool {
        matches!(self, MaskKind::Rectangle)
    }
}
