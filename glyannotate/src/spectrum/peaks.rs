use context_error::*;
use glycore::{GlycoError, GlycoErrorKind};
use serde::Serialize;

use crate::spectrum::ExperimentalPeak;

/// A centroided spectrum, the peaks are sorted on m/z without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Spectrum {
    peaks: Vec<ExperimentalPeak>,
}

/// The signed error in ppm of an experimental m/z relative to a theoretical m/z
pub fn ppm(experimental: f64, theoretical: f64) -> f64 {
    (experimental - theoretical) / theoretical * 1e6
}

impl Spectrum {
    /// Create a spectrum from parallel m/z and intensity lists.
    /// # Errors
    /// If the lists differ in length, the m/z values are not finite and strictly ascending, or an
    /// intensity is negative or not finite.
    pub fn new(mz: &[f64], intensity: &[f64]) -> Result<Self, GlycoError> {
        check_values(mz, intensity)?;
        if let Some(index) = mz.windows(2).position(|w| w[0] >= w[1]) {
            return Err(BoxedError::new(
                GlycoErrorKind::InvalidConfiguration,
                "Invalid spectrum",
                format!(
                    "The m/z values should be strictly ascending, but {} at index {index} is followed by {}",
                    mz[index],
                    mz[index + 1]
                ),
                Context::none(),
            ));
        }
        Ok(Self {
            peaks: mz
                .iter()
                .zip(intensity)
                .map(|(mz, intensity)| ExperimentalPeak::new(*mz, *intensity))
                .collect(),
        })
    }

    /// Create a spectrum from peaks in any order. Peaks with identical m/z are merged, keeping
    /// the most intense one.
    /// # Errors
    /// If the lists differ in length, or contain values that are not finite or negative intensities.
    pub fn from_unsorted(mz: &[f64], intensity: &[f64]) -> Result<Self, GlycoError> {
        check_values(mz, intensity)?;
        let mut peaks: Vec<ExperimentalPeak> = mz
            .iter()
            .zip(intensity)
            .map(|(mz, intensity)| ExperimentalPeak::new(*mz, *intensity))
            .collect();
        peaks.sort_by(|a, b| a.mz.total_cmp(&b.mz));
        peaks.dedup_by(|removed, kept| {
            if removed.mz == kept.mz {
                kept.intensity = kept.intensity.max(removed.intensity);
                true
            } else {
                false
            }
        });
        Ok(Self { peaks })
    }

    /// The peaks, sorted on m/z
    pub fn peaks(&self) -> &[ExperimentalPeak] {
        &self.peaks
    }

    /// The number of peaks
    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    /// If there are no peaks
    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    /// The summed intensity of all peaks
    pub fn total_intensity(&self) -> f64 {
        self.peaks.iter().map(|p| p.intensity).sum()
    }

    /// A copy of this spectrum with every m/z moved by the given amount, intensities are unchanged.
    #[must_use]
    pub fn shifted(&self, shift: f64) -> Self {
        Self {
            peaks: self
                .peaks
                .iter()
                .map(|p| ExperimentalPeak::new(p.mz + shift, p.intensity))
                .collect(),
        }
    }

    /// Find the best peak for the given m/z within the tolerance in ppm. The best peak has the
    /// lowest absolute ppm error, on a tie the most intense peak wins. Returns the peak index and
    /// the signed ppm error.
    pub fn search(&self, mz: f64, tolerance_ppm: f64) -> Option<(usize, f64)> {
        let window = mz.abs() * tolerance_ppm / 1e6;
        let start = self.peaks.partition_point(|p| p.mz < mz - window);
        let mut best: Option<(usize, f64)> = None;
        for (index, peak) in self.peaks.iter().enumerate().skip(start) {
            if peak.mz > mz + window {
                break;
            }
            let error = ppm(peak.mz, mz);
            if error.abs() > tolerance_ppm {
                continue;
            }
            let better = best.is_none_or(|(best_index, best_error)| {
                error.abs() < best_error.abs()
                    || (error.abs() == best_error.abs()
                        && peak.intensity > self.peaks[best_index].intensity)
            });
            if better {
                best = Some((index, error));
            }
        }
        best
    }
}

fn check_values(mz: &[f64], intensity: &[f64]) -> Result<(), GlycoError> {
    if mz.len() != intensity.len() {
        return Err(BoxedError::new(
            GlycoErrorKind::InvalidConfiguration,
            "Invalid spectrum",
            format!(
                "There are {} m/z values but {} intensity values",
                mz.len(),
                intensity.len()
            ),
            Context::none(),
        ));
    }
    if let Some(index) = mz.iter().position(|v| !v.is_finite()) {
        return Err(BoxedError::new(
            GlycoErrorKind::InvalidConfiguration,
            "Invalid spectrum",
            format!("The m/z value at index {index} is not a finite number"),
            Context::none(),
        ));
    }
    if let Some(index) = intensity.iter().position(|v| !v.is_finite() || *v < 0.0) {
        return Err(BoxedError::new(
            GlycoErrorKind::InvalidConfiguration,
            "Invalid spectrum",
            format!(
                "The intensity at index {index} ({}) should be a finite number that is not negative",
                intensity[index]
            ),
            Context::none(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn validation() {
        assert!(Spectrum::new(&[100.0, 200.0], &[1.0, 2.0]).is_ok());
        for (mz, intensity) in [
            (vec![100.0, 200.0], vec![1.0]),
            (vec![200.0, 100.0], vec![1.0, 2.0]),
            (vec![100.0, 100.0], vec![1.0, 2.0]),
            (vec![100.0, 200.0], vec![1.0, -2.0]),
            (vec![100.0, f64::NAN], vec![1.0, 2.0]),
            (vec![100.0, 200.0], vec![1.0, f64::INFINITY]),
        ] {
            let error = Spectrum::new(&mz, &intensity).unwrap_err();
            assert!(matches!(
                error.get_kind(),
                GlycoErrorKind::InvalidConfiguration
            ));
        }
        assert!(Spectrum::new(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn unsorted() {
        let spectrum =
            Spectrum::from_unsorted(&[300.0, 100.0, 200.0, 100.0], &[1.0, 5.0, 2.0, 7.0]).unwrap();
        assert_eq!(spectrum.len(), 3);
        assert_eq!(spectrum.peaks()[0], ExperimentalPeak::new(100.0, 7.0));
        assert_eq!(spectrum.peaks()[2].mz, 300.0);
        assert!((spectrum.total_intensity() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn shifted() {
        let spectrum = Spectrum::new(&[100.0, 200.0], &[1.0, 2.0]).unwrap();
        let shifted = spectrum.shifted(-2.5);
        assert_eq!(shifted.peaks()[0], ExperimentalPeak::new(97.5, 1.0));
        assert_eq!(shifted.peaks()[1], ExperimentalPeak::new(197.5, 2.0));
        assert_eq!(spectrum.peaks()[0].mz, 100.0);
    }

    #[test]
    fn search() {
        let spectrum =
            Spectrum::new(&[499.0, 500.0, 500.5, 501.5], &[10.0, 3.0, 4.0, 1.0]).unwrap();
        assert_eq!(spectrum.search(500.0, 20.0).map(|r| r.0), Some(1));
        // Equal distance, the more intense peak wins
        assert_eq!(spectrum.search(500.25, 1000.0).map(|r| r.0), Some(2));
        let (index, error) = spectrum.search(500.45, 200.0).unwrap();
        assert_eq!(index, 2);
        assert!((error - ppm(500.5, 500.45)).abs() < 1e-9);
        assert!(error > 0.0);
        assert_eq!(spectrum.search(502.5, 20.0), None);
        assert_eq!(Spectrum::default().search(500.0, 20.0), None);
    }
}
