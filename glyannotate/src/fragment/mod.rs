//! The theoretical ions and the catalog they are collected in.

mod catalog;
mod ion;
mod neutral_loss;

pub use catalog::*;
pub use ion::*;
pub use neutral_loss::*;
