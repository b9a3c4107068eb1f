use crate::error::{ProbeError, Result};
use crate::types::ProbeLabel;
use log::{debug, info};
use serde_json::Value;
use std::collections::HashMap;
use std::io::{self, BufRead, Cursor, Stdin, Stdout, Write};
use std::path::Path;

/// A radius that fell in the ambiguous band
#[derive(Debug, Clone, PartialEq)]
pub struct Ambiguity {
    /// Record name (relative DICOM path without extension)
    pub record: String,

    /// The measured radius1
    pub radius: f64,
}

/// Decides the probe type when the radius alone cannot
pub trait AmbiguityResolver {
    /// Returns the label for an ambiguous record
    ///
    /// Implementations may block, e.g. waiting for a human.
    fn resolve(&mut self, ctx: &Ambiguity) -> Result<ProbeLabel>;
}

/// Where prompt answers are read from, one line at a time
pub trait AnswerInput {
    /// Reads one line into `buf`, returning 0 at end of input
    fn read_answer(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl<T: AnswerInput + ?Sized> AnswerInput for &mut T {
    fn read_answer(&mut self, buf: &mut String) -> io::Result<usize> {
        (**self).read_answer(buf)
    }
}

// Stdin is locked per line so other readers (e.g. a pausing viewer) can
// take turns with the prompt.
impl AnswerInput for Stdin {
    fn read_answer(&mut self, buf: &mut String) -> io::Result<usize> {
        self.read_line(buf)
    }
}

impl<T: AsRef<[u8]>> AnswerInput for Cursor<T> {
    fn read_answer(&mut self, buf: &mut String) -> io::Result<usize> {
        self.read_line(buf)
    }
}

/// Asks a human for a single keystroke
///
/// Writes the prompt to `output`, then reads one line from `input`.
/// `p` selects phased-array, anything else (including end of input)
/// selects curvilinear.
pub struct PromptResolver<R, W> {
    input: R,
    output: W,
}

impl<R: AnswerInput, W: Write> PromptResolver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl PromptResolver<Stdin, Stdout> {
    /// Prompt bound to the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin(), io::stdout())
    }
}

impl<R: AnswerInput, W: Write> AmbiguityResolver for PromptResolver<R, W> {
    fn resolve(&mut self, ctx: &Ambiguity) -> Result<ProbeLabel> {
        writeln!(
            self.output,
            "{}: radius1 = {}, please decide:",
            ctx.record, ctx.radius
        )?;
        write!(
            self.output,
            "Enter 'p' for phased-array or 'c' for curvilinear: "
        )?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_answer(&mut answer)?;

        let label = ProbeLabel::from_answer(&answer);
        info!("{}: chose {} (radius1 = {})", ctx.record, label, ctx.radius);
        Ok(label)
    }
}

/// Answers every ambiguity with the same label
///
/// Used for unattended runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedResolver {
    label: ProbeLabel,
}

impl FixedResolver {
    pub fn new(label: ProbeLabel) -> Self {
        Self { label }
    }
}

impl AmbiguityResolver for FixedResolver {
    fn resolve(&mut self, ctx: &Ambiguity) -> Result<ProbeLabel> {
        info!(
            "{}: radius1 = {} is ambiguous, defaulting to {}",
            ctx.record, ctx.radius, self.label
        );
        Ok(self.label)
    }
}

/// Looks up pre-supplied answers by record name
///
/// The answer file is a JSON object mapping record names to either a label tag (`"phased-array"`, `"curvilinear"`) or a keystroke
/// answer (`"p"`, `"c"`). A record name is the DICOM path relative to the
/// input directory without its extension, so `scan_01.dcm` is `scan_01` and
/// `study1/scan_01.dcm` is `study1/scan_01`. Records without an entry go to
/// `fallback`.
///
/// # Example
///
/// ```
/// use usprobe_core::classify::{Ambiguity, AmbiguityResolver, AnswerFileResolver, FixedResolver};
/// use usprobe_core::ProbeLabel;
///
/// let mut resolver = AnswerFileResolver::from_json_str(
///     r#"{"scan_01": "p", "scan_02": "curvilinear"}"#,
///     Box::new(FixedResolver::new(ProbeLabel::Curvilinear)),
/// )
/// .unwrap();
///
/// let ctx = Ambiguity { record: "scan_01".to_string(), radius: 7.5 };
/// assert_eq!(resolver.resolve(&ctx).unwrap(), ProbeLabel::PhasedArray);
/// ```
pub struct AnswerFileResolver {
    answers: HashMap<String, ProbeLabel>,
    fallback: Box<dyn AmbiguityResolver>,
}

impl AnswerFileResolver {
    /// Loads answers from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `AnswerFile` if the file cannot be read or is not a JSON
    /// object of string answers.
    pub fn load(path: &Path, fallback: Box<dyn AmbiguityResolver>) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ProbeError::AnswerFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_json_str(&content, fallback).map_err(|e| match e {
            ProbeError::AnswerFile { reason, .. } => ProbeError::AnswerFile {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })
    }

    /// Parses answers from JSON text
    pub fn from_json_str(content: &str, fallback: Box<dyn AmbiguityResolver>) -> Result<Self> {
        let invalid = |reason: String| ProbeError::AnswerFile {
            path: Default::default(),
            reason,
        };

        let value: Value = serde_json::from_str(content).map_err(|e| invalid(e.to_string()))?;
        let Value::Object(entries) = value else {
            return Err(invalid("expected a JSON object".to_string()));
        };

        let mut answers = HashMap::with_capacity(entries.len());
        for (record, answer) in entries {
            let label = answer
                .as_str()
                .and_then(parse_answer)
                .ok_or_else(|| invalid(format!("invalid answer for {}: {}", record, answer)))?;
            answers.insert(record, label);
        }

        debug!("Loaded {} pre-supplied answers", answers.len());
        Ok(Self { answers, fallback })
    }

    /// Number of pre-supplied answers
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// Accepts full probe tags or a keystroke answer
fn parse_answer(answer: &str) -> Option<ProbeLabel> {
    match ProbeLabel::parse(answer) {
        Some(label) if label.is_probe() => Some(label),
        Some(_) => None,
        None if answer.trim().chars().count() <= 1 => Some(ProbeLabel::from_answer(answer)),
        None => None,
    }
}

impl AmbiguityResolver for AnswerFileResolver {
    fn resolve(&mut self, ctx: &Ambiguity) -> Result<ProbeLabel> {
        match self.answers.get(&ctx.record) {
            Some(label) => {
                info!(
                    "{}: radius1 = {} resolved from answer file as {}",
                    ctx.record, ctx.radius, label
                );
                Ok(*label)
            }
            None => self.fallback.resolve(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ambiguity(record: &str) -> Ambiguity {
        Ambiguity {
            record: record.to_string(),
            radius: 7.0,
        }
    }

    #[test]
    fn test_prompt_text() {
        let mut output = Vec::new();
        let mut resolver = PromptResolver::new(Cursor::new(&b"p\n"[..]), &mut output);

        let label = resolver.resolve(&ambiguity("scan_01")).unwrap();
        assert_eq!(label, ProbeLabel::PhasedArray);

        let prompt = String::from_utf8(output).unwrap();
        assert_eq!(
            prompt,
            "scan_01: radius1 = 7, please decide:\n\
             Enter 'p' for phased-array or 'c' for curvilinear: "
        );
    }

    #[test]
    fn test_prompt_reads_one_line_per_question() {
        let mut output = Vec::new();
        let mut resolver = PromptResolver::new(Cursor::new(&b"c\np\n"[..]), &mut output);

        assert_eq!(
            resolver.resolve(&ambiguity("a")).unwrap(),
            ProbeLabel::Curvilinear
        );
        assert_eq!(
            resolver.resolve(&ambiguity("b")).unwrap(),
            ProbeLabel::PhasedArray
        );
        // Input exhausted
        assert_eq!(
            resolver.resolve(&ambiguity("c")).unwrap(),
            ProbeLabel::Curvilinear
        );
    }

    #[test]
    fn test_fixed_resolver() {
        let mut resolver = FixedResolver::new(ProbeLabel::PhasedArray);
        assert_eq!(
            resolver.resolve(&ambiguity("any")).unwrap(),
            ProbeLabel::PhasedArray
        );
    }

    #[test]
    fn test_answer_file_lookup_and_fallback() {
        let mut resolver = AnswerFileResolver::from_json_str(
            r#"{"a": "p", "b": "c", "c": "phased-array", "d": "Curvilinear"}"#,
            Box::new(FixedResolver::new(ProbeLabel::Curvilinear)),
        )
        .unwrap();

        assert_eq!(resolver.len(), 4);
        assert_eq!(resolver.resolve(&ambiguity("a")).unwrap(), ProbeLabel::PhasedArray);
        assert_eq!(resolver.resolve(&ambiguity("b")).unwrap(), ProbeLabel::Curvilinear);
        assert_eq!(resolver.resolve(&ambiguity("c")).unwrap(), ProbeLabel::PhasedArray);
        assert_eq!(resolver.resolve(&ambiguity("d")).unwrap(), ProbeLabel::Curvilinear);
        assert_eq!(
            resolver.resolve(&ambiguity("unlisted")).unwrap(),
            ProbeLabel::Curvilinear
        );
    }

    #[test]
    fn test_answer_file_rejects_bad_content() {
        let fallback = || Box::new(FixedResolver::new(ProbeLabel::Curvilinear));

        assert!(AnswerFileResolver::from_json_str("not json", fallback()).is_err());
        assert!(AnswerFileResolver::from_json_str(r#"["p"]"#, fallback()).is_err());
        assert!(AnswerFileResolver::from_json_str(r#"{"a": 1}"#, fallback()).is_err());
        assert!(AnswerFileResolver::from_json_str(r#"{"a": "rectangle"}"#, fallback()).is_err());
        assert!(AnswerFileResolver::from_json_str(r#"{"a": "linear"}"#, fallback()).is_err());
    }

    #[test]
    fn test_answer_file_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("answers.json");
        std::fs::write(&path, r#"{"scan": "p"}"#).unwrap();

        let resolver = AnswerFileResolver::load(
            &path,
            Box::new(FixedResolver::new(ProbeLabel::Curvilinear)),
        )
        .unwrap();
        assert_eq!(resolver.len(), 1);

        let missing = AnswerFileResolver::load(
            &dir.path().join("missing.json"),
            Box::new(FixedResolver::new(ProbeLabel::Curvilinear)),
        );
        match missing {
            Err(ProbeError::AnswerFile { path, .. }) => assert!(path.ends_with("missing.json")),
            _ => panic!("expected AnswerFile error"),
        }
    }
}
