//! Probe type classification from the inner radius
//!
//! Radii at or below [`PHASED_ARRAY_MAX_RADIUS`] are phased-array, radii at or
//! above [`CURVILINEAR_MIN_RADIUS`] are curvilinear. The open band between
//! them is handed to an [`AmbiguityResolver`].

pub mod resolver;

pub use resolver::{Ambiguity, AmbiguityResolver, AnswerFileResolver, FixedResolver, PromptResolver};

use crate::error::{ProbeError, Result};
use crate::types::{MaskKind, ProbeLabel};
use log::debug;

/// Largest radius still classified as phased-array
pub const PHASED_ARRAY_MAX_RADIUS: f64 = 5.0;

/// Smallest radius classified as curvilinear
pub const CURVILINEAR_MIN_RADIUS: f64 = 10.0;

/// Outcome of the threshold comparison alone
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RadiusBand {
    /// `radius <= 5.0`
    PhasedArray,
    /// `radius >= 10.0`
    Curvilinear,
    /// `5.0 < radius < 10.0`
    Ambiguous,
}

impl RadiusBand {
    /// Places a radius into its band
    ///
    /// # Errors
    ///
    /// Returns `InvalidMeasurement` for NaN, which falls in no band.
    pub fn of(radius: f64) -> Result<Self> {
        if radius.is_nan() {
            Err(ProbeError::InvalidMeasurement("NaN".to_string()))
        } else if radius <= PHASED_ARRAY_MAX_RADIUS {
            Ok(RadiusBand::PhasedArray)
        } else if radius >= CURVILINEAR_MIN_RADIUS {
            Ok(RadiusBand::Curvilinear)
        } else {
            Ok(RadiusBand::Ambiguous)
        }
    }
}

/// Classifies a record's probe type
///
/// A rectangle mask short-circuits to [`ProbeLabel::Rectangle`] without
/// looking at the radius. Radii in the ambiguous band block on `resolver`.
///
/// # Errors
///
/// - `MissingMeasurement` if the radius is absent and the mask is not a rectangle
/// - `InvalidMeasurement` if the radius is NaN
/// - whatever the resolver returns (e.g. I/O errors from an interactive prompt)
///
/// # Example
///
/// ```
/// use usprobe_core::classify::{classify, FixedResolver};
/// use usprobe_core::{MaskKind, ProbeLabel};
///
/// let mut resolver = FixedResolver::new(ProbeLabel::Curvilinear);
///
/// let label = classify("a", Some(5.0), MaskKind::Other, &mut resolver).unwrap();
/// assert_eq!(label, ProbeLabel::PhasedArray);
///
/// let label = classify("c", Some(999.0), MaskKind::Rectangle, &mut resolver).unwrap();
/// assert_eq!(label, ProbeLabel::Rectangle);
/// ```
pub fn classify(
    record: &str,
    radius: Option<f64>,
    mask: MaskKind,
    resolver: &mut dyn AmbiguityResolver,
) -> Result<ProbeLabel> {
    if mask.is_rectangle() {
        debug!("{}: rectangular mask, radius ignored", record);
        return Ok(ProbeLabel::Rectangle);
    }

    let radius = radius.ok_or(ProbeError::MissingMeasurement)?;

    let label = match RadiusBand::of(radius)? {
        RadiusBand::PhasedArray => ProbeLabel::PhasedArray,
        RadiusBand::Curvilinear => ProbeLabel::Curvilinear,
        RadiusBand::Ambiguous => {
            debug!("{}: radius1 = {} is ambiguous, deferring", record, radius);
            resolver.resolve(&Ambiguity {
                record: record.to_string(),
                radius,
            })?
        }
    };

    debug!("{}: radius1 = {} -> {}", record, radius, label);
    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    /// Resolver that fails the test if consulted
    struct NeverAsked;

    impl AmbiguityResolver for NeverAsked {
        fn resolve(&mut self, ctx: &Ambiguity) -> Result<ProbeLabel> {
            panic!("resolver consulted for radius {}", ctx.radius);
        }
    }

    #[rstest]
    #[case(0.0, ProbeLabel::PhasedArray)]
    #[case(3.0, ProbeLabel::PhasedArray)]
    #[case(5.0, ProbeLabel::PhasedArray)]
    #[case(10.0, ProbeLabel::Curvilinear)]
    #[case(10.5, ProbeLabel::Curvilinear)]
    #[case(250.0, ProbeLabel::Curvilinear)]
    #[case(-1.0, ProbeLabel::PhasedArray)]
    fn test_unambiguous_radius(#[case] radius: f64, #[case] expected: ProbeLabel) {
        let label = classify("rec", Some(radius), MaskKind::Other, &mut NeverAsked).unwrap();
        assert_eq!(label, expected);
    }

    #[rstest]
    #[case("p\n", ProbeLabel::PhasedArray)]
    #[case("c\n", ProbeLabel::Curvilinear)]
    #[case("\n", ProbeLabel::Curvilinear)]
    #[case("x\n", ProbeLabel::Curvilinear)]
    #[case("", ProbeLabel::Curvilinear)]
    fn test_ambiguous_radius_prompts(#[case] input: &str, #[case] expected: ProbeLabel) {
        let mut output = Vec::new();
        let mut resolver = PromptResolver::new(Cursor::new(input.as_bytes()), &mut output);

        let label = classify("rec", Some(7.0), MaskKind::Other, &mut resolver).unwrap();
        assert_eq!(label, expected);

        let prompt = String::from_utf8(output).unwrap();
        assert!(prompt.contains("radius1 = 7"));
    }

    #[rstest]
    #[case(5.000001)]
    #[case(7.0)]
    #[case(9.999999)]
    fn test_band_edges_are_open(#[case] radius: f64) {
        assert_eq!(RadiusBand::of(radius).unwrap(), RadiusBand::Ambiguous);
    }

    #[test]
    fn test_rectangle_ignores_radius() {
        for radius in [None, Some(3.0), Some(7.0), Some(999.0)] {
            let label = classify("rec", radius, MaskKind::Rectangle, &mut NeverAsked).unwrap();
            assert_eq!(label, ProbeLabel::Rectangle);
        }
    }

    #[test]
    fn test_missing_radius() {
        let result = classify("rec", None, MaskKind::Other, &mut NeverAsked);
        assert!(matches!(result, Err(ProbeError::MissingMeasurement)));
    }

    #[test]
    fn test_nan_radius() {
        let result = classify("rec", Some(f64::NAN), MaskKind::Other, &mut NeverAsked);
        assert!(matches!(result, Err(ProbeError::InvalidMeasurement(_))));
    }
}
