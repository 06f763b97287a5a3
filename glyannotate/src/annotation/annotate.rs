use glycore::{GlycoError, chemistry::mz, sequence::Peptide};
use serde::{Deserialize, Serialize};

use crate::{
    annotation::{
        AnnotationStatistics, FalseMatchRateResult, false_match_rate, match_peaks,
        model::AnnotationParameters,
    },
    cross_link::CrossLink,
    fragment::IonCatalog,
    peptide::PeptideFragmentation,
    spectrum::{MatchedIon, Spectrum},
};

/// The full annotation of a spectrum with a (cross-linked) glycopeptide
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Annotation {
    /// The neutral precursor mass, including the partner and reagent for cross-linked pairs
    pub precursor_mass: f64,
    /// The precursor m/z at the given precursor charge
    pub precursor_mz: f64,
    /// All theoretical ions
    pub catalog: IonCatalog,
    /// All matches
    pub matched: Vec<MatchedIon>,
    /// The summary statistics
    pub statistics: AnnotationStatistics,
    /// The false match rate estimate
    pub false_match_rate: FalseMatchRateResult,
}

/// Annotate a spectrum: generate the theoretical ions, match them, and calculate the statistics
/// and the false match rate.
/// # Errors
/// If the parameters are invalid, the precursor charge is zero, or the cross-link sites do not
/// fit their peptides.
pub fn annotate(
    peptide: &Peptide,
    precursor_charge: u8,
    cross_link: Option<&CrossLink>,
    spectrum: &Spectrum,
    parameters: &AnnotationParameters,
) -> Result<Annotation, GlycoError> {
    parameters.validate()?;
    let catalog =
        peptide.generate_theoretical_ions(precursor_charge, cross_link, &parameters.fragmentation)?;
    let matched = match_peaks(catalog.iter(), spectrum, &parameters.matching)?;
    let statistics = AnnotationStatistics::calculate(peptide.len(), &catalog, &matched, spectrum);
    let false_match_rate =
        false_match_rate(catalog.iter(), spectrum, &parameters.matching, &parameters.fmr)?;
    let precursor_mass =
        cross_link.map_or_else(|| peptide.neutral_mass(), |link| link.precursor_mass(peptide));
    log::debug!(
        "Annotated {peptide}: {} matches, coverage {:.2}, FMR {:.3}",
        matched.len(),
        statistics.sequence_coverage,
        false_match_rate.fmr_peaks
    );
    Ok(Annotation {
        precursor_mass,
        precursor_mz: mz(precursor_mass, precursor_charge),
        catalog,
        matched,
        statistics,
        false_match_rate,
    })
}
