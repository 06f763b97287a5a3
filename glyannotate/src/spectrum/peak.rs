use serde::{Deserialize, Serialize};

use crate::fragment::TheoreticalIon;

/// An experimental peak
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ExperimentalPeak {
    /// The mass over charge
    pub mz: f64,
    /// The intensity, never negative
    pub intensity: f64,
}

impl ExperimentalPeak {
    /// Create a new peak
    pub const fn new(mz: f64, intensity: f64) -> Self {
        Self { mz, intensity }
    }
}

/// A theoretical ion that was found in a spectrum.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct MatchedIon {
    /// The theoretical ion
    pub ion: TheoreticalIon,
    /// The m/z of the experimental peak
    pub exp_mz: f64,
    /// The intensity of the experimental peak
    pub exp_intensity: f64,
    /// The signed error `(exp - theo) / theo * 1e6`, relative to the isotope target
    pub mass_error_ppm: f64,
    /// The isotope, 0 for the monoisotopic peak
    pub isotope_offset: u8,
    /// The index of the experimental peak in the spectrum
    pub peak_index: usize,
}
