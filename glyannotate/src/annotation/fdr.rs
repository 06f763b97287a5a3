use glycore::GlycoError;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    annotation::{
        matching::{claimed_peaks, match_validated},
        model::{FmrParameters, MatchingParameters},
    },
    fragment::TheoreticalIon,
    spectrum::Spectrum,
};

/// The false match rate estimated by matching the theoretical ions against shifted copies of the
/// spectrum. A shifted spectrum can only give random matches, so the average number of matches
/// over all shifts relative to the number of matches on the true spectrum estimates which fraction
/// of the matches is by chance.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct FalseMatchRateResult {
    /// `avg_random_peaks / matched_peaks`, 0 if nothing matched
    pub fmr_peaks: f64,
    /// `avg_random_intensity / matched_intensity`, 0 if nothing matched
    pub fmr_intensity: f64,
    /// The number of distinct peaks claimed on the true spectrum
    pub matched_peaks: usize,
    /// The intensity of the distinct peaks claimed on the true spectrum
    pub matched_intensity: f64,
    /// The average number of distinct claimed peaks over all shifts
    pub avg_random_peaks: f64,
    /// The average claimed intensity over all shifts
    pub avg_random_intensity: f64,
    /// The shift range used
    pub shift_range: f64,
    /// The shift step used
    pub shift_step: f64,
    /// The number of shifts
    pub shifts: usize,
}

/// Estimate the false match rate for these ions on this spectrum. The true spectrum is matched with
/// the matching parameters as given, the shifted spectra are matched without isotopes.
/// # Errors
/// If the matching or shift parameters are invalid.
pub fn false_match_rate(
    ions: impl IntoIterator<Item = &TheoreticalIon>,
    spectrum: &Spectrum,
    matching: &MatchingParameters,
    parameters: &FmrParameters,
) -> Result<FalseMatchRateResult, GlycoError> {
    matching.validate()?;
    parameters.validate()?;
    let ions: Vec<&TheoreticalIon> = ions.into_iter().collect();
    let shifts = parameters.shifts();

    let (matched_peaks, matched_intensity) = claimed_peaks(
        &match_validated(ions.iter().copied(), spectrum, matching),
        spectrum,
    );
    let matching = matching.match_isotopes(false);

    #[cfg(feature = "rayon")]
    let random: Vec<(usize, f64)> = shifts
        .par_iter()
        .map(|shift| shifted_matches(&ions, spectrum, *shift, &matching))
        .collect();
    #[cfg(not(feature = "rayon"))]
    let random: Vec<(usize, f64)> = shifts
        .iter()
        .map(|shift| shifted_matches(&ions, spectrum, *shift, &matching))
        .collect();

    let (avg_random_peaks, avg_random_intensity) = if random.is_empty() {
        (0.0, 0.0)
    } else {
        let n = random.len() as f64;
        (
            random.iter().map(|(peaks, _)| *peaks as f64).sum::<f64>() / n,
            random.iter().map(|(_, intensity)| intensity).sum::<f64>() / n,
        )
    };
    log::debug!(
        "False match rate over {} shifts: {matched_peaks} peaks matched, {avg_random_peaks:.2} on average by chance",
        shifts.len()
    );

    Ok(FalseMatchRateResult {
        fmr_peaks: ratio(avg_random_peaks, matched_peaks as f64),
        fmr_intensity: ratio(avg_random_intensity, matched_intensity),
        matched_peaks,
        matched_intensity,
        avg_random_peaks,
        avg_random_intensity,
        shift_range: parameters.shift_range,
        shift_step: parameters.shift_step,
        shifts: shifts.len(),
    })
}

fn shifted_matches(
    ions: &[&TheoreticalIon],
    spectrum: &Spectrum,
    shift: f64,
    matching: &MatchingParameters,
) -> (usize, f64) {
    let shifted = spectrum.shifted(shift);
    let result = claimed_peaks(
        &match_validated(ions.iter().copied(), &shifted, matching),
        &shifted,
    );
    log::trace!("Shift {shift:+.4}: {} peaks, {:.1} intensity", result.0, result.1);
    result
}

fn ratio(random: f64, matched: f64) -> f64 {
    if matched > 0.0 { random / matched } else { 0.0 }
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use glycore::GlycoErrorKind;

    use super::*;
    use crate::fragment::IonKind;

    fn ions(mzs: &[f64]) -> Vec<TheoreticalIon> {
        mzs.iter()
            .map(|mz| TheoreticalIon::singly_charged(IonKind::Precursor, "M", *mz, 0))
            .collect()
    }

    #[test]
    fn shifted_matches_counted() {
        // Every ion matches at shift 0, only one ion matches the peak 2 m/z higher at shift -2
        let ions = ions(&[300.0, 400.0, 500.0]);
        let spectrum = Spectrum::new(&[300.0, 400.0, 500.0, 502.0], &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let result = false_match_rate(
            &ions,
            &spectrum,
            &MatchingParameters::default().match_isotopes(false),
            &FmrParameters::default().shift_range(2.0),
        )
        .unwrap();
        assert_eq!(result.shifts, 4);
        assert_eq!(result.matched_peaks, 3);
        assert_eq!(result.matched_intensity, 6.0);
        assert!((result.avg_random_peaks - 0.25).abs() < 1e-12);
        assert!((result.avg_random_intensity - 1.0).abs() < 1e-12);
        assert!((result.fmr_peaks - 0.25 / 3.0).abs() < 1e-12);
        assert!((result.fmr_intensity - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn nothing_matched() {
        let ions = ions(&[300.0]);
        let spectrum = Spectrum::new(&[299.0], &[1.0]).unwrap();
        let result = false_match_rate(
            &ions,
            &spectrum,
            &MatchingParameters::default(),
            &FmrParameters::default(),
        )
        .unwrap();
        assert_eq!(result.matched_peaks, 0);
        assert_eq!(result.fmr_peaks, 0.0);
        assert_eq!(result.fmr_intensity, 0.0);
        assert!(result.avg_random_peaks > 0.0);
    }

    #[test]
    fn isotopes_only_on_true_spectrum() {
        // Only the first isotope of the ion is present
        let ions = ions(&[300.0]);
        let spectrum = Spectrum::new(&[301.003355], &[5.0]).unwrap();
        let fmr = FmrParameters::default().shift_range(3.0).shift_offset(0.5);
        let result =
            false_match_rate(&ions, &spectrum, &MatchingParameters::default(), &fmr).unwrap();
        assert_eq!(result.shifts, 4);
        assert_eq!(result.matched_peaks, 1);
        assert_eq!(result.matched_intensity, 5.0);
        assert_eq!(result.avg_random_peaks, 0.0);
        assert_eq!(result.fmr_peaks, 0.0);
        let result = false_match_rate(
            &ions,
            &spectrum,
            &MatchingParameters::default().match_isotopes(false),
            &fmr,
        )
        .unwrap();
        assert_eq!(result.matched_peaks, 0);
    }

    #[test]
    fn isotopes_off_for_shifts() {
        // The second isotope is matched on the true spectrum, shifting by -1 would put it on the
        // first isotope within 12 ppm
        let ions = ions(&[300.0]);
        let spectrum = Spectrum::new(&[300.0, 302.00671], &[10.0, 5.0]).unwrap();
        let result = false_match_rate(
            &ions,
            &spectrum,
            &MatchingParameters::default(),
            &FmrParameters::default().shift_range(1.0),
        )
        .unwrap();
        assert_eq!(result.matched_peaks, 2);
        assert_eq!(result.avg_random_peaks, 0.0);
    }

    #[test]
    fn invalid() {
        let ions = ions(&[300.0]);
        let spectrum = Spectrum::new(&[300.0], &[1.0]).unwrap();
        for parameters in [
            FmrParameters::default().shift_step(0.0),
            FmrParameters::default().shift_step(-1.0),
            FmrParameters::default().shift_range(0.5),
        ] {
            assert!(matches!(
                false_match_rate(&ions, &spectrum, &MatchingParameters::default(), &parameters)
                    .unwrap_err()
                    .get_kind(),
                GlycoErrorKind::InvalidConfiguration
            ));
        }
    }
}
