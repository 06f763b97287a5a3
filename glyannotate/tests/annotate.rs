#![allow(clippy::missing_panics_doc, clippy::float_cmp)]
//! Integration tests for the full annotation pipeline
use glyannotate::prelude::*;
use glycore::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

const RANDOM_SEED: u64 = 42;

fn noise(rng: &mut StdRng, peaks: usize) -> (Vec<f64>, Vec<f64>) {
    (0..peaks)
        .map(|_| (rng.random_range(10.0..3000.0), rng.random_range(1.0..1000.0)))
        .unzip()
}

fn long_peptide() -> Peptide {
    Peptide::parse("LLDNWDSVTSTFSKLREQLGPVTQEFWDNLEK", "7S(HexNAc1Hex1NeuAc1)").unwrap()
}

fn parameters() -> AnnotationParameters {
    AnnotationParameters::default().fragmentation(
        FragmentationModel::default()
            .method(FragmentationMethod::EThcD)
            .max_fragment_charge(3),
    )
}

/// Noise unrelated to the peptide gives as many matches on the true spectrum as on shifted copies.
/// The shifted copies are matched without isotopes, so the true spectrum is as well.
#[test]
fn noise_only() {
    let mut rng = StdRng::seed_from_u64(RANDOM_SEED);
    let (mz, intensity) = noise(&mut rng, 60_000);
    let spectrum = Spectrum::from_unsorted(&mz, &intensity).unwrap();
    let parameters =
        parameters().matching(MatchingParameters::default().match_isotopes(false));
    let annotation = annotate(&long_peptide(), 3, None, &spectrum, &parameters).unwrap();
    let fmr = annotation.false_match_rate;
    assert_eq!(fmr.shifts, 50);
    assert!(fmr.matched_peaks > 0);
    assert!(
        fmr.fmr_peaks > 0.5 && fmr.fmr_peaks < 2.0,
        "FMR for noise should be close to 1, not {}",
        fmr.fmr_peaks
    );
}

/// Real fragments in the spectrum are not reproduced by the shifted copies
#[test]
fn fragments_and_noise() {
    let peptide = long_peptide();
    let parameters = parameters();
    let catalog = peptide
        .generate_theoretical_ions(3, None, &parameters.fragmentation)
        .unwrap();
    let mut rng = StdRng::seed_from_u64(RANDOM_SEED);
    let (mut mz, mut intensity) = noise(&mut rng, 5_000);
    for ion in catalog.backbone.iter().chain(&catalog.glycan_y) {
        mz.push(ion.mz());
        intensity.push(rng.random_range(1000.0..10000.0));
    }
    let spectrum = Spectrum::from_unsorted(&mz, &intensity).unwrap();
    let annotation = annotate(&peptide, 3, None, &spectrum, &parameters).unwrap();
    let fmr = annotation.false_match_rate;
    assert!(fmr.fmr_peaks < 1.0, "{}", fmr.fmr_peaks);
    assert!(fmr.fmr_intensity < 1.0, "{}", fmr.fmr_intensity);
    assert!(fmr.matched_peaks >= catalog.backbone.len() / 2);
    assert_eq!(annotation.statistics.sequence_coverage, 1.0);
    assert_eq!(
        annotation.statistics.ions_found["Y"],
        (catalog.glycan_y.len(), catalog.glycan_y.len())
    );
}

/// A DSSO cross-linked pair with stub ions of both peptides in the spectrum
#[test]
fn cleavable_cross_link() {
    let (alpha, link) = CrossLink::from_proforma(
        parse_proforma_crosslink("VLDAK[DSSO#XL1]FGHR//EGK[#XL1]SLLR").unwrap(),
    );
    let parameters = AnnotationParameters::default();
    let catalog = alpha
        .generate_theoretical_ions(4, Some(&link), &parameters.fragmentation)
        .unwrap();
    let stubs: Vec<&TheoreticalIon> = catalog
        .cross_link
        .iter()
        .filter(|i| matches!(i.kind, IonKind::CrosslinkStub { backbone: None, .. }))
        .collect();
    // Both peptides with three stubs at charges 1 to 3
    assert_eq!(stubs.len(), 2 * 3 * 3);
    let mut mz: Vec<f64> = stubs.iter().map(|i| i.mz()).collect();
    mz.push(104.0170);
    let intensity = vec![50.0; mz.len()];
    let spectrum = Spectrum::from_unsorted(&mz, &intensity).unwrap();
    let annotation = annotate(&alpha, 4, Some(&link), &spectrum, &parameters).unwrap();
    assert_eq!(annotation.statistics.peaks_annotated, 1.0);
    assert!(
        (annotation.precursor_mass
            - (alpha.neutral_mass() + link.partner.neutral_mass() + 158.0038))
            .abs()
            < 1e-9
    );
    assert!(annotation.matched.iter().any(|m| m.ion.label == "β+T^2"));
    assert!(
        annotation
            .matched
            .iter()
            .any(|m| matches!(m.ion.kind, IonKind::CrosslinkReporter { .. }))
    );
    let text = serde_json::to_string(&annotation).unwrap();
    assert!(text.contains("\"false_match_rate\""));
}

/// Parameters from JSON through to the statistics for a TMT labelled O-GlcNAc peptide
#[test]
fn glycopeptide_pipeline() {
    let parameters = AnnotationParameters::from_json(
        r#"{
            "tolerance_ppm": 10,
            "match_isotopes": false,
            "max_fragment_charge": 1,
            "neutral_losses": ["HexNAc_TMT", "H2O"]
        }"#,
    )
    .unwrap();
    let peptide = Peptide::parse("TAPTSTK", "N-term(TMT),4T(432.242305:HexNAc1),7K(TMT)").unwrap();
    let catalog = peptide
        .generate_theoretical_ions(2, None, &parameters.fragmentation)
        .unwrap();
    assert!(catalog.oxonium.iter().any(|i| i.label == "HexNAc-TMT"));
    let y0 = catalog
        .glycan_y
        .iter()
        .find(|i| i.fragment_index() == Some(0))
        .unwrap();
    let spectrum = Spectrum::from_unsorted(
        &[204.0867, 529.2937, y0.mz() * (1.0 + 4e-6), y0.mz() + 0.5],
        &[100.0, 80.0, 60.0, 20.0],
    )
    .unwrap();
    let annotation = annotate(&peptide, 2, None, &spectrum, &parameters).unwrap();
    let statistics = &annotation.statistics;
    assert_eq!(statistics.ions_found["oxonium"].0, 2);
    // Y0 and the Y1 that lost the tagged HexNAc
    assert_eq!(
        annotation
            .matched
            .iter()
            .filter(|m| m.peak_index == 2)
            .count(),
        2
    );
    assert!((statistics.peaks_annotated - 0.75).abs() < 1e-12);
    assert!((statistics.intensity_annotated - 240.0 / 260.0).abs() < 1e-12);
    assert!(statistics.mean_absolute_ppm > 0.0);
}
