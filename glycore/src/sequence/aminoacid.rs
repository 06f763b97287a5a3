use context_error::*;
use serde::{Deserialize, Serialize};

use crate::error::{GlycoError, GlycoErrorKind};

/// One of the 20 standard amino acids.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[allow(missing_docs)]
pub enum AminoAcid {
    Alanine,
    Arginine,
    Asparagine,
    AsparticAcid,
    Cysteine,
    GlutamicAcid,
    Glutamine,
    Glycine,
    Histidine,
    Isoleucine,
    Leucine,
    Lysine,
    Methionine,
    Phenylalanine,
    Proline,
    Serine,
    Threonine,
    Tryptophan,
    Tyrosine,
    Valine,
}

impl AminoAcid {
    /// All amino acids
    pub const ALL: &'static [Self] = &[
        Self::Alanine,
        Self::Arginine,
        Self::Asparagine,
        Self::AsparticAcid,
        Self::Cysteine,
        Self::GlutamicAcid,
        Self::Glutamine,
        Self::Glycine,
        Self::Histidine,
        Self::Isoleucine,
        Self::Leucine,
        Self::Lysine,
        Self::Methionine,
        Self::Phenylalanine,
        Self::Proline,
        Self::Serine,
        Self::Threonine,
        Self::Tryptophan,
        Self::Tyrosine,
        Self::Valine,
    ];

    /// The monoisotopic residue mass (the amino acid minus water), cysteine is unmodified.
    pub const fn mass(self) -> f64 {
        match self {
            Self::Alanine => 71.037114,
            Self::Arginine => 156.101111,
            Self::Asparagine => 114.042927,
            Self::AsparticAcid => 115.026943,
            Self::Cysteine => 103.009185,
            Self::GlutamicAcid => 129.042593,
            Self::Glutamine => 128.058578,
            Self::Glycine => 57.021464,
            Self::Histidine => 137.058912,
            Self::Isoleucine | Self::Leucine => 113.084064,
            Self::Lysine => 128.094963,
            Self::Methionine => 131.040485,
            Self::Phenylalanine => 147.068414,
            Self::Proline => 97.052764,
            Self::Serine => 87.032028,
            Self::Threonine => 101.047679,
            Self::Tryptophan => 186.079313,
            Self::Tyrosine => 163.063329,
            Self::Valine => 99.068414,
        }
    }

    /// The one letter code
    pub const fn char(self) -> char {
        match self {
            Self::Alanine => 'A',
            Self::Arginine => 'R',
            Self::Asparagine => 'N',
            Self::AsparticAcid => 'D',
            Self::Cysteine => 'C',
            Self::GlutamicAcid => 'E',
            Self::Glutamine => 'Q',
            Self::Glycine => 'G',
            Self::Histidine => 'H',
            Self::Isoleucine => 'I',
            Self::Leucine => 'L',
            Self::Lysine => 'K',
            Self::Methionine => 'M',
            Self::Phenylalanine => 'F',
            Self::Proline => 'P',
            Self::Serine => 'S',
            Self::Threonine => 'T',
            Self::Tryptophan => 'W',
            Self::Tyrosine => 'Y',
            Self::Valine => 'V',
        }
    }

    /// The three letter code
    pub const fn three_letter_code(self) -> &'static str {
        match self {
            Self::Alanine => "Ala",
            Self::Arginine => "Arg",
            Self::Asparagine => "Asn",
            Self::AsparticAcid => "Asp",
            Self::Cysteine => "Cys",
            Self::GlutamicAcid => "Glu",
            Self::Glutamine => "Gln",
            Self::Glycine => "Gly",
            Self::Histidine => "His",
            Self::Isoleucine => "Ile",
            Self::Leucine => "Leu",
            Self::Lysine => "Lys",
            Self::Methionine => "Met",
            Self::Phenylalanine => "Phe",
            Self::Proline => "Pro",
            Self::Serine => "Ser",
            Self::Threonine => "Thr",
            Self::Tryptophan => "Trp",
            Self::Tyrosine => "Tyr",
            Self::Valine => "Val",
        }
    }

    /// Look up an amino acid by its one or three letter code, ignoring case.
    /// # Errors
    /// If the name is not a known amino acid code.
    pub fn from_name(name: &str) -> Result<Self, GlycoError> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::try_from(c.to_ascii_uppercase());
        }
        Self::ALL
            .iter()
            .find(|aa| aa.three_letter_code().eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| {
                BoxedError::new(
                    GlycoErrorKind::UnknownKey,
                    "Unknown amino acid",
                    "Only the one and three letter codes of the 20 standard amino acids are known",
                    Context::show(name.to_string()),
                )
            })
    }
}

impl TryFrom<char> for AminoAcid {
    type Error = GlycoError;
    fn try_from(value: char) -> Result<Self, Self::Error> {
        Ok(match value {
            'A' => Self::Alanine,
            'R' => Self::Arginine,
            'N' => Self::Asparagine,
            'D' => Self::AsparticAcid,
            'C' => Self::Cysteine,
            'E' => Self::GlutamicAcid,
            'Q' => Self::Glutamine,
            'G' => Self::Glycine,
            'H' => Self::Histidine,
            'I' => Self::Isoleucine,
            'L' => Self::Leucine,
            'K' => Self::Lysine,
            'M' => Self::Methionine,
            'F' => Self::Phenylalanine,
            'P' => Self::Proline,
            'S' => Self::Serine,
            'T' => Self::Threonine,
            'W' => Self::Tryptophan,
            'Y' => Self::Tyrosine,
            'V' => Self::Valine,
            _ => {
                return Err(BoxedError::new(
                    GlycoErrorKind::InvalidResidue,
                    "Invalid residue",
                    format!("'{value}' is not one of the 20 standard amino acids"),
                    Context::show(value.to_string()),
                ));
            }
        })
    }
}

impl std::fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.char())
    }
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn all_letters_round_trip() {
        for aa in AminoAcid::ALL {
            assert_eq!(AminoAcid::try_from(aa.char()).unwrap(), *aa);
            assert_eq!(AminoAcid::from_name(aa.three_letter_code()).unwrap(), *aa);
        }
        assert_eq!(AminoAcid::ALL.len(), 20);
    }

    #[test]
    fn rejects_unknown() {
        for c in ['B', 'J', 'O', 'U', 'X', 'Z', '1', '*'] {
            let error = AminoAcid::try_from(c).unwrap_err();
            assert!(matches!(error.get_kind(), GlycoErrorKind::InvalidResidue));
        }
        let error = AminoAcid::from_name("Xyz").unwrap_err();
        assert!(matches!(error.get_kind(), GlycoErrorKind::UnknownKey));
    }
}
