#![doc = include_str!("../README.md")]

/// Contains all things related to annotations (matching, statistics, and the false match rate).
pub mod annotation;
pub mod cross_link;
/// Contains all things related to fragments and fragmentation.
pub mod fragment;
mod glycan;
mod peptide;
pub mod spectrum;

pub use peptide::PeptideFragmentation;

/// A subset of the types and traits that are envisioned to be used the most, importing this is a good starting point for working with the crate
pub mod prelude {
    pub use crate::annotation::{
        Annotation, AnnotationStatistics, FalseMatchRateResult, annotate, false_match_rate,
        match_peaks,
        model::{
            AnnotationParameters, FmrParameters, FragmentationMethod, FragmentationModel,
            MatchingParameters,
        },
    };
    pub use crate::cross_link::CrossLink;
    pub use crate::fragment::{IonCatalog, IonKind, NeutralLoss, TheoreticalIon};
    pub use crate::peptide::PeptideFragmentation;
    pub use crate::spectrum::{ExperimentalPeak, MatchedIon, Spectrum};
}
