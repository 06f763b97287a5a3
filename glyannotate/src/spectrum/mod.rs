//! Centroided spectra and the peaks matched in them

mod peak;
mod peaks;

pub use peak::*;
pub use peaks::*;
