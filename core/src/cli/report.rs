use crate::pipeline::{BatchSummary, RecordOutcome};
use crate::types::ProbeLabel;
use std::fmt;

/// Text report summarizing a batch run
pub struct BatchReport<'a> {
    summary: &'a BatchSummary,
}

impl<'a> BatchReport<'a> {
    /// Creates a new batch report
    pub fn new(summary: &'a BatchSummary) -> Self {
        Self { summary }
    }
}

impl<'a> fmt::Display for BatchReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let annotated = self
            .summary
            .count(|o| matches!(o, RecordOutcome::Annotated { .. }));
        let unchanged = self
            .summary
            .count(|o| matches!(o, RecordOutcome::Annotated { changed: false, .. }));

        writeln!(f, "Probe Annotation Summary")?;
        writeln!(f, "========================")?;
        writeln!(f)?;
        writeln!(f, "Records:        {}", self.summary.records.len())?;
        writeln!(f, "Annotated:      {} ({} already labeled)", annotated, unchanged)?;
        for label in ProbeLabel::ALL {
            writeln!(
                f,
                "  {:<13} {}",
                format!("{}:", label),
                self.summary.count_label(label)
            )?;
        }
        writeln!(
            f,
            "No radius1:     {}",
            self.summary
                .count(|o| matches!(o, RecordOutcome::NoMeasurement))
        )?;
        writeln!(
            f,
            "Skipped:        {}",
            self.summary.count(|o| matches!(o, RecordOutcome::Skipped(_)))
        )?;
        writeln!(
            f,
            "Failed:         {}",
            self.summary.count(|o| matches!(o, RecordOutcome::Failed(_)))
        )?;

        let problems: Vec<_> = self
            .summary
            .records
            .iter()
            .filter_map(|r| match &r.outcome {
                RecordOutcome::Skipped(reason) | RecordOutcome::Failed(reason) => {
                    Some((r.dicom_path.display(), reason))
                }
                _ => None,
            })
            .collect();

        if !problems.is_empty() {
            writeln!(f)?;
            writeln!(f, "Problems")?;
            writeln!(f, "--------")?;
            for (path, reason) in problems {
                writeln!(f, "{}: {}", path, reason)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::RecordResult;
    use std::path::PathBuf;

    fn result(name: &str, outcome: RecordOutcome) -> RecordResult {
        RecordResult {
            dicom_path: PathBuf::from(name),
            outcome,
        }
    }

    #[test]
    fn test_batch_report_format() {
        let summary = BatchSummary {
            records: vec![
                result(
                    "a.dcm",
                    RecordOutcome::Annotated {
                        label: ProbeLabel::PhasedArray,
                        changed: true,
                    },
                ),
                result("b.dcm", RecordOutcome::Skipped("No matching JSON file found: b.json".to_string())),
                result(
                    "c.dcm",
                    RecordOutcome::Annotated {
                        label: ProbeLabel::Rectangle,
                        changed: false,
                    },
                ),
                result("d.dcm", RecordOutcome::NoMeasurement),
            ],
        };

        let output = BatchReport::new(&summary).to_string();

        assert!(output.contains("Probe Annotation Summary"));
        assert!(output.contains("Records:        4"));
        assert!(output.contains("Annotated:      2 (1 already labeled)"));
        assert!(output.contains("  phased-array: 1"));
        assert!(output.contains("  curvilinear:  0"));
        assert!(output.contains("  rectangle:    1"));
        assert!(output.contains("No radius1:     1"));
        assert!(output.contains("Skipped:        1"));
        assert!(output.contains("Failed:         0"));
        assert!(output.contains("b.dcm: No matching JSON file found: b.json"));
    }

    #[test]
    fn test_report_without_problems() {
        let summary = BatchSummary::default();
        let output = BatchReport::new(&summary).to_string();
        assert!(output.contains("Records:        0"));
        assert!(!output.contains("Problems"));
    }
}
