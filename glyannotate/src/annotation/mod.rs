//! Match theoretical ions to spectra and summarise the result.

mod annotate;
mod fdr;
mod matching;
pub mod model;
mod scores;

pub use annotate::*;
pub use fdr::*;
pub use matching::match_peaks;
pub use scores::*;
