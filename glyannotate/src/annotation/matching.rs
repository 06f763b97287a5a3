use glycore::{GlycoError, chemistry::ISOTOPE_SPACING};
use itertools::Itertools;

use crate::{
    annotation::model::MatchingParameters,
    fragment::TheoreticalIon,
    spectrum::{MatchedIon, Spectrum},
};

/// Match theoretical ions against a spectrum. Every ion is matched independently to the closest
/// peak within the tolerance, so a single peak can be claimed by multiple ions. With isotope
/// matching on every isotope is searched for on its own and reported as a separate match.
/// # Errors
/// If the matching parameters are invalid.
pub fn match_peaks(
    ions: impl IntoIterator<Item = &TheoreticalIon>,
    spectrum: &Spectrum,
    parameters: &MatchingParameters,
) -> Result<Vec<MatchedIon>, GlycoError> {
    parameters.validate()?;
    let matched = match_validated(ions, spectrum, parameters);
    log::debug!(
        "Matched {} ions to {} peaks at {} ppm",
        matched.len(),
        spectrum.len(),
        parameters.tolerance_ppm
    );
    Ok(matched)
}

/// [`match_peaks`] for parameters that are known to be valid
pub(crate) fn match_validated(
    ions: impl IntoIterator<Item = &TheoreticalIon>,
    spectrum: &Spectrum,
    parameters: &MatchingParameters,
) -> Vec<MatchedIon> {
    if spectrum.is_empty() {
        return Vec::new();
    }
    let isotopes = parameters.isotopes();
    ions.into_iter()
        .flat_map(|ion| {
            isotopes.clone().filter_map(move |isotope| {
                let target = f64::from(isotope)
                    .mul_add(ISOTOPE_SPACING / f64::from(ion.charge), ion.mz());
                spectrum
                    .search(target, parameters.tolerance_ppm)
                    .map(|(index, error)| {
                        let peak = spectrum.peaks()[index];
                        MatchedIon {
                            ion: ion.clone(),
                            exp_mz: peak.mz,
                            exp_intensity: peak.intensity,
                            mass_error_ppm: error,
                            isotope_offset: isotope,
                            peak_index: index,
                        }
                    })
            })
        })
        .collect()
}

/// The number of distinct peaks claimed by the matches and their summed intensity
pub(crate) fn claimed_peaks(matched: &[MatchedIon], spectrum: &Spectrum) -> (usize, f64) {
    matched
        .iter()
        .map(|m| m.peak_index)
        .sorted_unstable()
        .dedup()
        .fold((0, 0.0), |(count, intensity), index| {
            (
                count + 1,
                intensity + spectrum.peaks().get(index).map_or(0.0, |p| p.intensity),
            )
        })
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use glycore::GlycoErrorKind;
    use ordered_float::OrderedFloat;

    use super::*;
    use crate::fragment::IonKind;

    fn ion(mz: f64, charge: u8) -> TheoreticalIon {
        TheoreticalIon {
            mz: OrderedFloat(mz),
            kind: IonKind::B(2),
            charge,
            neutral_loss: None,
            label: "b2".to_string(),
            peptide_index: 0,
        }
    }

    #[test]
    fn tolerance_boundary() {
        let parameters = MatchingParameters::default().match_isotopes(false);
        for tolerance in [5.0, 10.0, 20.0] {
            let parameters = parameters.tolerance_ppm(tolerance);
            let theoretical = ion(800.0, 1);
            let inside = Spectrum::new(&[800.0 * (1.0 + tolerance / 2.0 / 1e6)], &[1.0]).unwrap();
            let matched = match_peaks([&theoretical], &inside, &parameters).unwrap();
            assert_eq!(matched.len(), 1);
            assert!((matched[0].mass_error_ppm - tolerance / 2.0).abs() < 1e-6);
            let outside = Spectrum::new(&[800.0 * (1.0 + tolerance * 2.0 / 1e6)], &[1.0]).unwrap();
            assert!(match_peaks([&theoretical], &outside, &parameters).unwrap().is_empty());
        }
    }

    #[test]
    fn ambiguity_preserved() {
        let ions = [ion(500.0, 1), ion(500.002, 1), ion(700.0, 1)];
        let spectrum = Spectrum::new(&[500.001, 700.5], &[10.0, 5.0]).unwrap();
        let matched = match_peaks(&ions, &spectrum, &MatchingParameters::default()).unwrap();
        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|m| m.peak_index == 0));
        assert_eq!(claimed_peaks(&matched, &spectrum), (1, 10.0));
    }

    #[test]
    fn isotopes() {
        let theoretical = ion(600.0, 2);
        let spectrum = Spectrum::new(
            &[
                600.0,
                600.0 + ISOTOPE_SPACING / 2.0,
                600.0 + ISOTOPE_SPACING,
                600.0 + 1.5 * ISOTOPE_SPACING,
            ],
            &[100.0, 60.0, 20.0, 5.0],
        )
        .unwrap();
        let matched =
            match_peaks([&theoretical], &spectrum, &MatchingParameters::default()).unwrap();
        assert_eq!(
            matched
                .iter()
                .map(|m| (m.isotope_offset, m.peak_index))
                .collect_vec(),
            [(0, 0), (1, 1), (2, 2)]
        );
        assert!(matched.iter().all(|m| m.mass_error_ppm.abs() < 1e-6));
        let matched = match_peaks(
            [&theoretical],
            &spectrum,
            &MatchingParameters::default().max_isotope(3),
        )
        .unwrap();
        assert_eq!(matched.len(), 4);
        let matched = match_peaks(
            [&theoretical],
            &spectrum,
            &MatchingParameters::default().match_isotopes(false),
        )
        .unwrap();
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn empty_and_invalid() {
        let theoretical = ion(600.0, 1);
        assert!(
            match_peaks(
                [&theoretical],
                &Spectrum::default(),
                &MatchingParameters::default()
            )
            .unwrap()
            .is_empty()
        );
        let spectrum = Spectrum::new(&[600.0], &[1.0]).unwrap();
        for parameters in [
            MatchingParameters::default().tolerance_ppm(0.0),
            MatchingParameters::default().tolerance_ppm(-10.0),
            MatchingParameters::default().max_isotope(0),
        ] {
            assert!(matches!(
                match_peaks([&theoretical], &spectrum, &parameters)
                    .unwrap_err()
                    .get_kind(),
                GlycoErrorKind::InvalidConfiguration
            ));
        }
    }
}
