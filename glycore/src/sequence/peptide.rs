use context_error::*;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    chemistry::WATER,
    error::{GlycoError, GlycoErrorKind},
    glycan::GlycanComposition,
    sequence::{AminoAcid, Modification, ModificationPosition},
};

/// A linear peptide with its modifications. The peptide is checked on construction, also when
/// deserialised, and cannot be changed afterwards.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "PeptideFields")]
pub struct Peptide {
    sequence: Vec<AminoAcid>,
    modifications: Vec<Modification>,
}

#[derive(Debug, Deserialize)]
struct PeptideFields {
    sequence: Vec<AminoAcid>,
    #[serde(default)]
    modifications: Vec<Modification>,
}

impl TryFrom<PeptideFields> for Peptide {
    type Error = GlycoError;
    fn try_from(value: PeptideFields) -> Result<Self, Self::Error> {
        Self::from_residues(value.sequence, value.modifications)
    }
}

impl Peptide {
    /// Create a peptide from its one letter sequence and modifications.
    /// # Errors
    /// * If the sequence is empty or contains a character that is not one of the 20 standard amino acids.
    /// * If any modification is placed outside of the sequence.
    pub fn new(sequence: &str, modifications: Vec<Modification>) -> Result<Self, GlycoError> {
        if sequence.is_empty() {
            return Err(BoxedError::new(
                GlycoErrorKind::InvalidResidue,
                "Invalid peptide",
                "The peptide sequence is empty",
                Context::none(),
            ));
        }
        let residues = sequence
            .char_indices()
            .map(|(index, c)| {
                AminoAcid::try_from(c).map_err(|_| {
                    BoxedError::new(
                        GlycoErrorKind::InvalidResidue,
                        "Invalid residue",
                        format!("'{c}' is not one of the 20 standard amino acids"),
                        Context::line(None, sequence, index, c.len_utf8()).to_owned(),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_residues(residues, modifications)
    }

    /// Create a peptide from its residues and modifications.
    /// # Errors
    /// If the sequence is empty, any modification is placed outside of the sequence, or has a mass
    /// that is not a finite number.
    pub fn from_residues(
        sequence: Vec<AminoAcid>,
        modifications: Vec<Modification>,
    ) -> Result<Self, GlycoError> {
        if sequence.is_empty() {
            return Err(BoxedError::new(
                GlycoErrorKind::InvalidResidue,
                "Invalid peptide",
                "The peptide sequence is empty",
                Context::none(),
            ));
        }
        for modification in &modifications {
            if !modification.mass_delta().is_finite() {
                return Err(BoxedError::new(
                    GlycoErrorKind::MalformedModification,
                    "Invalid modification",
                    "The mass of a modification should be a finite number",
                    Context::show(modification.to_string()),
                ));
            }
            if let ModificationPosition::Index(index) = modification.position() {
                if index == 0 || index > sequence.len() {
                    return Err(BoxedError::new(
                        GlycoErrorKind::InvalidModificationPosition,
                        "Invalid modification position",
                        format!(
                            "The position {index} is outside of the peptide, positions are 1 based and the peptide has {} residues",
                            sequence.len()
                        ),
                        Context::show(modification.to_string()),
                    ));
                }
            }
        }
        Ok(Self {
            sequence,
            modifications,
        })
    }

    /// Parse a peptide from a sequence and a modification string, see [`Modification::parse_list`].
    /// # Errors
    /// If the sequence, the modifications, or their positions are invalid.
    pub fn parse(sequence: &str, modifications: &str) -> Result<Self, GlycoError> {
        Self::new(sequence.trim(), Modification::parse_list(modifications)?)
    }

    /// The number of residues
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Always false, a peptide cannot be empty
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// The residues
    pub fn sequence(&self) -> &[AminoAcid] {
        &self.sequence
    }

    /// The modifications
    pub fn modifications(&self) -> &[Modification] {
        &self.modifications
    }

    /// The neutral monoisotopic mass, all residues plus water plus all modifications
    pub fn neutral_mass(&self) -> f64 {
        self.sequence.iter().map(|aa| aa.mass()).sum::<f64>()
            + WATER
            + self
                .modifications
                .iter()
                .map(Modification::mass_delta)
                .sum::<f64>()
    }

    /// If the modification position is part of the N-terminal fragment containing the first
    /// `length` residues. The C-terminus is only part of the full length fragment.
    pub fn n_terminal_contains(&self, length: usize, position: ModificationPosition) -> bool {
        match position {
            ModificationPosition::NTerm => true,
            ModificationPosition::Index(i) => i <= length,
            ModificationPosition::CTerm => length >= self.sequence.len(),
        }
    }

    /// If the modification position is part of the C-terminal fragment containing the last
    /// `length` residues. The N-terminus is only part of the full length fragment.
    pub fn c_terminal_contains(&self, length: usize, position: ModificationPosition) -> bool {
        match position {
            ModificationPosition::CTerm => true,
            ModificationPosition::Index(i) => i + length > self.sequence.len(),
            ModificationPosition::NTerm => length >= self.sequence.len(),
        }
    }

    /// The summed residue and modification masses of the first `length` residues, without water.
    pub fn n_terminal_mass(&self, length: usize) -> f64 {
        self.sequence[..length.min(self.sequence.len())]
            .iter()
            .map(|aa| aa.mass())
            .sum::<f64>()
            + self
                .modifications
                .iter()
                .filter(|m| self.n_terminal_contains(length, m.position()))
                .map(Modification::mass_delta)
                .sum::<f64>()
    }

    /// The summed residue and modification masses of the last `length` residues, without water.
    pub fn c_terminal_mass(&self, length: usize) -> f64 {
        let length = length.min(self.sequence.len());
        self.sequence[self.sequence.len() - length..]
            .iter()
            .map(|aa| aa.mass())
            .sum::<f64>()
            + self
                .modifications
                .iter()
                .filter(|m| self.c_terminal_contains(length, m.position()))
                .map(Modification::mass_delta)
                .sum::<f64>()
    }

    /// All modifications that carry a glycan
    pub fn glycosylations(&self) -> impl Iterator<Item = &Modification> {
        self.modifications
            .iter()
            .filter(|m| m.get_glycan().is_some())
    }

    /// The combined glycan on this peptide, `None` if the peptide is not glycosylated.
    pub fn glycan(&self) -> Option<GlycanComposition> {
        self.glycosylations()
            .filter_map(Modification::get_glycan)
            .cloned()
            .reduce(|a, b| a.combine(&b))
    }

    /// The mass of all glycosylations, including any tags on the glycans
    pub fn glycan_mass(&self) -> f64 {
        self.glycosylations().map(Modification::mass_delta).sum()
    }

    /// The mass of all tags on the glycans
    pub fn glycan_tag_mass(&self) -> f64 {
        self.glycosylations()
            .map(Modification::glycan_tag_mass)
            .sum()
    }

    /// The residue at the given 1-based index
    pub fn residue(&self, index: usize) -> Option<AminoAcid> {
        index
            .checked_sub(1)
            .and_then(|i| self.sequence.get(i))
            .copied()
    }

    /// The plain one letter sequence
    pub fn sequence_string(&self) -> String {
        self.sequence.iter().map(|aa| aa.char()).collect()
    }
}

impl std::fmt::Display for Peptide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sequence_string())?;
        if !self.modifications.is_empty() {
            write!(f, " [{}]", self.modifications.iter().join(","))?;
        }
        Ok(())
    }
}
