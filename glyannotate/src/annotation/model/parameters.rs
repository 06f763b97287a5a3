use context_error::*;
use glycore::{GlycoError, GlycoErrorKind};
use serde::{Deserialize, Serialize};

use crate::annotation::model::FragmentationModel;

/// The most shifts a false match rate estimation is allowed to use
pub const MAX_SHIFTS: usize = 100_000;

/// Parameters for the matching, allowing control over when a match is allowed.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct MatchingParameters {
    /// The matching tolerance in ppm
    pub tolerance_ppm: f64,
    /// Also search for isotope peaks
    pub match_isotopes: bool,
    /// The highest isotope to search for
    pub max_isotope: u8,
}

impl MatchingParameters {
    /// Set the tolerance in ppm
    #[must_use]
    pub fn tolerance_ppm(self, tolerance_ppm: f64) -> Self {
        Self {
            tolerance_ppm,
            ..self
        }
    }

    /// Set isotope matching
    #[must_use]
    pub fn match_isotopes(self, match_isotopes: bool) -> Self {
        Self {
            match_isotopes,
            ..self
        }
    }

    /// Set the highest isotope
    #[must_use]
    pub fn max_isotope(self, max_isotope: u8) -> Self {
        Self {
            max_isotope,
            ..self
        }
    }

    /// The isotopes to search for, always including the monoisotopic peak (0)
    pub fn isotopes(&self) -> std::ops::RangeInclusive<u8> {
        0..=if self.match_isotopes {
            self.max_isotope
        } else {
            0
        }
    }

    /// Check that these parameters can be used.
    /// # Errors
    /// If the tolerance is not a positive number, or isotope matching is on with a maximal isotope
    /// of zero.
    pub fn validate(&self) -> Result<(), GlycoError> {
        if !(self.tolerance_ppm.is_finite() && self.tolerance_ppm > 0.0) {
            return Err(BoxedError::new(
                GlycoErrorKind::InvalidConfiguration,
                "Invalid matching parameters",
                format!(
                    "The tolerance should be a positive number of ppm, not {}",
                    self.tolerance_ppm
                ),
                Context::none(),
            ));
        }
        if self.match_isotopes && self.max_isotope == 0 {
            return Err(BoxedError::new(
                GlycoErrorKind::InvalidConfiguration,
                "Invalid matching parameters",
                "Isotope matching is turned on, so the maximal isotope should be at least 1",
                Context::none(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchingParameters {
    fn default() -> Self {
        Self {
            tolerance_ppm: 20.0,
            match_isotopes: true,
            max_isotope: 2,
        }
    }
}

/// Parameters for the false match rate estimation by spectrum shifting.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct FmrParameters {
    /// The largest shift (in m/z) in both directions
    pub shift_range: f64,
    /// The step between shifts
    pub shift_step: f64,
    /// A constant added to every shift, a non integer value prevents shifted spectra from lining
    /// up with isotope peaks
    pub shift_offset: f64,
}

impl FmrParameters {
    /// Set the shift range
    #[must_use]
    pub fn shift_range(self, shift_range: f64) -> Self {
        Self {
            shift_range,
            ..self
        }
    }

    /// Set the shift step
    #[must_use]
    pub fn shift_step(self, shift_step: f64) -> Self {
        Self { shift_step, ..self }
    }

    /// Set the shift offset
    #[must_use]
    pub fn shift_offset(self, shift_offset: f64) -> Self {
        Self {
            shift_offset,
            ..self
        }
    }

    /// Check that these parameters give at least one shift.
    /// # Errors
    /// If the step is not a positive number, the range is smaller than the step, the offset moves
    /// every shift out of the range, or there would be more than [`MAX_SHIFTS`] shifts.
    pub fn validate(&self) -> Result<(), GlycoError> {
        if !(self.shift_step.is_finite() && self.shift_step > 0.0) {
            return Err(BoxedError::new(
                GlycoErrorKind::InvalidConfiguration,
                "Invalid false match rate parameters",
                format!(
                    "The shift step should be a positive number, not {}",
                    self.shift_step
                ),
                Context::none(),
            ));
        }
        if !self.shift_range.is_finite() || self.shift_range < self.shift_step {
            return Err(BoxedError::new(
                GlycoErrorKind::InvalidConfiguration,
                "Invalid false match rate parameters",
                format!(
                    "The shift range ({}) should be at least the shift step ({}), otherwise there are no shifts",
                    self.shift_range, self.shift_step
                ),
                Context::none(),
            ));
        }
        if !self.shift_offset.is_finite() {
            return Err(BoxedError::new(
                GlycoErrorKind::InvalidConfiguration,
                "Invalid false match rate parameters",
                "The shift offset should be a finite number",
                Context::none(),
            ));
        }
        if self.shift_range / self.shift_step > MAX_SHIFTS as f64 / 2.0 {
            return Err(BoxedError::new(
                GlycoErrorKind::InvalidConfiguration,
                "Invalid false match rate parameters",
                format!(
                    "The shift range ({}) and step ({}) give more than {MAX_SHIFTS} shifts",
                    self.shift_range, self.shift_step
                ),
                Context::none(),
            ));
        }
        if self.shift_candidates().next().is_none() {
            return Err(BoxedError::new(
                GlycoErrorKind::InvalidConfiguration,
                "Invalid false match rate parameters",
                format!(
                    "With the shift offset ({}) no shift lies between the shift step ({}) and the shift range ({})",
                    self.shift_offset, self.shift_step, self.shift_range
                ),
                Context::none(),
            ));
        }
        Ok(())
    }

    /// All shifts `s = i * step + offset` for integer `i` with `step <= |s| <= range`, from the
    /// most negative to the most positive. Shifts closer to zero than one step would overlap with
    /// the true alignment.
    pub fn shifts(&self) -> Vec<f64> {
        self.shift_candidates().collect()
    }

    fn shift_candidates(&self) -> impl Iterator<Item = f64> {
        // Slack so shifts exactly on the step or range boundary are kept despite rounding
        const SLACK: f64 = 1e-9;
        let steps = ((self.shift_range + self.shift_offset.abs()) / self.shift_step)
            .ceil()
            .min(MAX_SHIFTS as f64) as i64;
        let (step, offset, range) = (self.shift_step, self.shift_offset, self.shift_range);
        (-steps..=steps)
            .map(move |i| (i as f64).mul_add(step, offset))
            .filter(move |s| s.abs() >= step - SLACK && s.abs() <= range + SLACK)
    }
}

impl Default for FmrParameters {
    fn default() -> Self {
        Self {
            shift_range: 25.0,
            shift_step: 1.0,
            shift_offset: 0.0,
        }
    }
}

/// All parameters for an annotation run. In JSON this is a single flat object, every key is
/// optional.
/// ```
/// use glyannotate::annotation::model::AnnotationParameters;
/// let parameters = AnnotationParameters::from_json(r#"{"tolerance_ppm": 10, "shift_range": 50}"#).unwrap();
/// assert_eq!(parameters.matching.tolerance_ppm, 10.0);
/// assert_eq!(parameters.fmr.shift_range, 50.0);
/// assert_eq!(parameters.fmr.shift_step, 1.0);
/// ```
#[non_exhaustive]
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct AnnotationParameters {
    /// The fragmentation model
    #[serde(flatten)]
    pub fragmentation: FragmentationModel,
    /// The matching parameters
    #[serde(flatten)]
    pub matching: MatchingParameters,
    /// The false match rate parameters
    #[serde(flatten)]
    pub fmr: FmrParameters,
}

impl AnnotationParameters {
    /// Set the fragmentation model
    #[must_use]
    pub fn fragmentation(self, fragmentation: FragmentationModel) -> Self {
        Self {
            fragmentation,
            ..self
        }
    }

    /// Set the matching parameters
    #[must_use]
    pub fn matching(self, matching: MatchingParameters) -> Self {
        Self { matching, ..self }
    }

    /// Set the false match rate parameters
    #[must_use]
    pub fn fmr(self, fmr: FmrParameters) -> Self {
        Self { fmr, ..self }
    }

    /// Read the parameters from JSON and validate them.
    /// # Errors
    /// If the JSON is not valid or any parameter is invalid.
    pub fn from_json(text: &str) -> Result<Self, GlycoError> {
        let parameters: Self = serde_json::from_str(text).map_err(|error| {
            BoxedError::new(
                GlycoErrorKind::InvalidConfiguration,
                "Invalid parameters",
                error.to_string(),
                if error.line() > 0 {
                    text.lines()
                        .nth(error.line() - 1)
                        .map_or_else(Context::none, |line| {
                            Context::line(
                                Some((error.line() - 1) as u32),
                                line,
                                error.column().saturating_sub(1).min(line.len()),
                                usize::from(!line.is_empty()),
                            )
                            .to_owned()
                        })
                } else {
                    Context::none()
                },
            )
        })?;
        parameters.validate()?;
        Ok(parameters)
    }

    /// Check all parameters.
    /// # Errors
    /// If any of the parameters is invalid.
    pub fn validate(&self) -> Result<(), GlycoError> {
        self.fragmentation.validate()?;
        self.matching.validate()?;
        self.fmr.validate()
    }
}
