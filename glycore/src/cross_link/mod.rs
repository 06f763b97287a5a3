//! Chemical cross-linkers, the built-in reagents and the cross-linked peptide notation.

mod linker;
mod lists;
mod proforma;

pub use linker::*;
pub use lists::*;
pub use proforma::*;
