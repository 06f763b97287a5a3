//! The models and parameters that control fragment generation, matching, and the false match
//! rate estimation.

mod fragmentation;
mod parameters;

pub use fragmentation::*;
pub use parameters::*;
