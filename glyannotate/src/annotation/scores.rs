use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{
    annotation::matching::claimed_peaks,
    fragment::{IonCatalog, TheoreticalIon},
    spectrum::{MatchedIon, Spectrum},
};

/// Summary statistics for an annotated spectrum
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct AnnotationStatistics {
    /// The fraction of the peptide bonds of the (α) peptide covered by a matched backbone ion
    pub sequence_coverage: f64,
    /// The fraction of peaks claimed by at least one ion
    pub peaks_annotated: f64,
    /// The fraction of the total intensity in claimed peaks
    pub intensity_annotated: f64,
    /// The number of matches, isotopes and ambiguous matches included
    pub matched_ions: usize,
    /// The average absolute error in ppm over all matches
    pub mean_absolute_ppm: f64,
    /// Per ion kind (see [`IonKind::name`](crate::fragment::IonKind::name)) the number of
    /// theoretical ions that were found and the total number of theoretical ions
    pub ions_found: BTreeMap<String, (usize, usize)>,
}

impl AnnotationStatistics {
    /// Calculate the statistics for the matches of the ions in the catalog against the spectrum.
    /// The sequence coverage counts a bond as covered if any backbone ion of the first peptide
    /// (including neutral loss, isotope, and stub variants) that is the result of breaking that
    /// bond was matched.
    pub fn calculate(
        peptide_length: usize,
        catalog: &IonCatalog,
        matched: &[MatchedIon],
        spectrum: &Spectrum,
    ) -> Self {
        let bonds: HashSet<usize> = matched
            .iter()
            .filter(|m| m.ion.peptide_index == 0)
            .filter_map(|m| m.ion.kind.backbone_position())
            .map(|(series, index)| series.bond(index, peptide_length))
            .filter(|bond| (1..peptide_length).contains(bond))
            .collect();
        let sequence_coverage = if peptide_length < 2 {
            0.0
        } else {
            bonds.len() as f64 / (peptide_length - 1) as f64
        };

        let (peaks, intensity) = claimed_peaks(matched, spectrum);
        let total_intensity = spectrum.total_intensity();

        let found: HashSet<&TheoreticalIon> = matched.iter().map(|m| &m.ion).collect();
        let mut ions_found = BTreeMap::new();
        for ion in catalog.iter() {
            let entry: &mut (usize, usize) =
                ions_found.entry(ion.kind.name().to_string()).or_default();
            entry.0 += usize::from(found.contains(ion));
            entry.1 += 1;
        }

        Self {
            sequence_coverage,
            peaks_annotated: if spectrum.is_empty() {
                0.0
            } else {
                peaks as f64 / spectrum.len() as f64
            },
            intensity_annotated: if total_intensity > 0.0 {
                intensity / total_intensity
            } else {
                0.0
            },
            matched_ions: matched.len(),
            mean_absolute_ppm: if matched.is_empty() {
                0.0
            } else {
                matched.iter().map(|m| m.mass_error_ppm.abs()).sum::<f64>() / matched.len() as f64
            },
            ions_found,
        }
    }
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crate::fragment::IonKind;

    fn matched(kind: IonKind, peptide_index: usize, peak_index: usize, ppm: f64) -> MatchedIon {
        MatchedIon {
            ion: TheoreticalIon::new(kind, "", 500.0, 1, peptide_index, None),
            exp_mz: 501.0,
            exp_intensity: 1.0,
            mass_error_ppm: ppm,
            isotope_offset: 0,
            peak_index,
        }
    }

    #[test]
    fn coverage() {
        let spectrum = Spectrum::new(&[100.0, 200.0, 300.0, 400.0], &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let matched = [
            matched(IonKind::B(1), 0, 0, 1.0),
            matched(IonKind::C(2), 0, 1, -2.0),
            // Bond 3 from the C-terminal side
            matched(IonKind::Y(5), 0, 1, 3.0),
            matched(IonKind::Z(7), 0, 3, -4.0),
            // The second peptide does not count towards the coverage
            matched(IonKind::B(6), 1, 3, 0.0),
        ];
        let statistics =
            AnnotationStatistics::calculate(8, &IonCatalog::default(), &matched, &spectrum);
        assert!((statistics.sequence_coverage - 3.0 / 7.0).abs() < 1e-12);
        assert!((statistics.peaks_annotated - 0.75).abs() < 1e-12);
        assert!((statistics.intensity_annotated - 0.7).abs() < 1e-12);
        assert_eq!(statistics.matched_ions, 5);
        assert!((statistics.mean_absolute_ppm - 2.0).abs() < 1e-12);
    }

    #[test]
    fn stub_variants_cover() {
        let spectrum = Spectrum::new(&[100.0], &[1.0]).unwrap();
        let matched = [matched(
            IonKind::CrosslinkStub {
                stub: "A".to_string(),
                backbone: Some((crate::fragment::BackboneSeries::Y, 2)),
            },
            0,
            0,
            0.0,
        )];
        let statistics =
            AnnotationStatistics::calculate(5, &IonCatalog::default(), &matched, &spectrum);
        assert!((statistics.sequence_coverage - 0.25).abs() < 1e-12);
    }

    #[test]
    fn ions_found() {
        let catalog: IonCatalog = [
            TheoreticalIon::new(IonKind::B(1), "b1", 100.0, 1, 0, None),
            TheoreticalIon::new(IonKind::B(2), "b2", 200.0, 1, 0, None),
            TheoreticalIon::new(IonKind::Y(1), "y1", 150.0, 1, 0, None),
        ]
        .into_iter()
        .collect();
        let spectrum = Spectrum::new(&[101.007276], &[1.0]).unwrap();
        let matched = crate::annotation::match_peaks(
            catalog.iter(),
            &spectrum,
            &crate::annotation::model::MatchingParameters::default(),
        )
        .unwrap();
        let statistics = AnnotationStatistics::calculate(3, &catalog, &matched, &spectrum);
        assert_eq!(statistics.ions_found["b"], (1, 2));
        assert_eq!(statistics.ions_found["y"], (0, 1));
        assert!((statistics.sequence_coverage - 0.5).abs() < 1e-12);
    }

    #[test]
    fn empty() {
        let statistics = AnnotationStatistics::calculate(
            8,
            &IonCatalog::default(),
            &[],
            &Spectrum::default(),
        );
        assert_eq!(statistics, AnnotationStatistics::default());
        let statistics = AnnotationStatistics::calculate(
            1,
            &IonCatalog::default(),
            &[matched(IonKind::B(1), 0, 0, 0.0)],
            &Spectrum::new(&[100.0], &[0.0]).unwrap(),
        );
        assert_eq!(statistics.sequence_coverage, 0.0);
        assert_eq!(statistics.intensity_annotated, 0.0);
        assert_eq!(statistics.peaks_annotated, 1.0);
    }
}
