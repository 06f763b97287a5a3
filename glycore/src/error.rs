use context_error::{BoxedError, ErrorKind};
use serde::{Deserialize, Serialize};

/// The error type used throughout this crate and its dependents.
pub type GlycoError = BoxedError<'static, GlycoErrorKind>;

/// All reasons an operation can be rejected. Every failure is a local validation failure, there is
/// no partial result alongside an error.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum GlycoErrorKind {
    /// A character in a peptide sequence that is not one of the 20 standard amino acids
    #[default]
    InvalidResidue,
    /// A modification that points outside of the peptide
    InvalidModificationPosition,
    /// A glycan composition that does not follow `(SugarName Integer)+`
    MalformedComposition,
    /// A modification or cross-link string that could not be parsed
    MalformedModification,
    /// A name that is not present in the relevant table or registry
    UnknownKey,
    /// A parameter that is out of its valid range
    InvalidConfiguration,
}

impl ErrorKind for GlycoErrorKind {
    type Settings = ();
    fn descriptor(&self) -> &'static str {
        "error"
    }
    fn ignored(&self, _settings: Self::Settings) -> bool {
        false
    }
    fn is_error(&self, _settings: Self::Settings) -> bool {
        true
    }
}

impl std::fmt::Display for GlycoErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::InvalidResidue => "invalid residue",
                Self::InvalidModificationPosition => "invalid modification position",
                Self::MalformedComposition => "malformed composition",
                Self::MalformedModification => "malformed modification",
                Self::UnknownKey => "unknown key",
                Self::InvalidConfiguration => "invalid configuration",
            }
        )
    }
}
