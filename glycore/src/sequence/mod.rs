//! Amino acids, modifications and peptides.

mod aminoacid;
mod modification;
mod peptide;

pub use aminoacid::*;
pub use modification::*;
pub use peptide::*;
