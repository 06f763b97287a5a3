//! Handle glycan related issues, monosaccharides, compositions and the built-in glycan and
//! diagnostic ion registries.

mod composition;
mod lists;
mod monosaccharide;
mod oxonium;

pub use composition::*;
pub use lists::*;
pub use monosaccharide::*;
pub use oxonium::*;
