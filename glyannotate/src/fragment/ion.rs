use std::{fmt::Display, ops::RangeInclusive};

use glycore::chemistry::mz;
use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::fragment::NeutralLoss;

/// The backbone ion series
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum BackboneSeries {
    /// b, the N-terminal residues
    B,
    /// c, b plus ammonia
    C,
    /// y, the C-terminal residues plus water
    Y,
    /// z, y minus ammonia plus a proton
    Z,
}

impl BackboneSeries {
    /// All series
    pub const ALL: &'static [Self] = &[Self::B, Self::C, Self::Y, Self::Z];

    /// If this series contains the N-terminal residues
    pub const fn is_n_terminal(self) -> bool {
        matches!(self, Self::B | Self::C)
    }

    /// The single letter name
    pub const fn name(self) -> &'static str {
        match self {
            Self::B => "b",
            Self::C => "c",
            Self::Y => "y",
            Self::Z => "z",
        }
    }

    /// The bond (1 based, counted from the N-terminus) that is broken to form the fragment with
    /// the given number of residues, for a peptide of the given length.
    pub const fn bond(self, index: usize, peptide_length: usize) -> usize {
        if self.is_n_terminal() {
            index
        } else {
            peptide_length.saturating_sub(index)
        }
    }
}

impl Display for BackboneSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The kind of a theoretical ion, with the information specific to that kind.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum IonKind {
    /// b ion with the number of residues
    B(usize),
    /// y ion with the number of residues
    Y(usize),
    /// c ion with the number of residues
    C(usize),
    /// z ion with the number of residues
    Z(usize),
    /// Glycopeptide Y ion from the glycan ladder
    GlycanY {
        /// The number of monosaccharides still attached
        remaining: usize,
    },
    /// N-glycan core Y ion
    GlycanCore {
        /// The name, e.g. `Y1F`
        name: String,
    },
    /// Diagnostic glycan ion
    Oxonium {
        /// The library name
        name: String,
    },
    /// A cross-linked fragment, either a stub left after cleavage of the reagent or for
    /// non-cleavable reagents a backbone ion carrying the partner peptide.
    CrosslinkStub {
        /// The stub label, or the reagent name for non-cleavable reagents
        stub: String,
        /// The backbone ion that carries the stub, `None` for the intact peptide
        backbone: Option<(BackboneSeries, usize)>,
    },
    /// A reporter ion released from the cross-linker
    CrosslinkReporter {
        /// The reporter name
        name: String,
    },
    /// The precursor
    Precursor,
}

impl IonKind {
    /// Create a backbone kind
    pub const fn backbone(series: BackboneSeries, index: usize) -> Self {
        match series {
            BackboneSeries::B => Self::B(index),
            BackboneSeries::C => Self::C(index),
            BackboneSeries::Y => Self::Y(index),
            BackboneSeries::Z => Self::Z(index),
        }
    }

    /// Get the backbone series and index if this ion contains a backbone fragment, this
    /// includes the stub variants of backbone ions.
    pub const fn backbone_position(&self) -> Option<(BackboneSeries, usize)> {
        match self {
            Self::B(i) => Some((BackboneSeries::B, *i)),
            Self::C(i) => Some((BackboneSeries::C, *i)),
            Self::Y(i) => Some((BackboneSeries::Y, *i)),
            Self::Z(i) => Some((BackboneSeries::Z, *i)),
            Self::CrosslinkStub { backbone, .. } => *backbone,
            _ => None,
        }
    }

    /// The fragment index, the number of residues for backbone ions or the number of
    /// monosaccharides left for glycan Y ions.
    pub const fn fragment_index(&self) -> Option<usize> {
        match self {
            Self::GlycanY { remaining } => Some(*remaining),
            other => match other.backbone_position() {
                Some((_, index)) => Some(index),
                None => None,
            },
        }
    }

    /// A short name for the kind, used to group ions in statistics
    pub const fn name(&self) -> &'static str {
        match self {
            Self::B(_) => "b",
            Self::Y(_) => "y",
            Self::C(_) => "c",
            Self::Z(_) => "z",
            Self::GlycanY { .. } => "Y",
            Self::GlycanCore { .. } => "Y-core",
            Self::Oxonium { .. } => "oxonium",
            Self::CrosslinkStub { .. } => "stub",
            Self::CrosslinkReporter { .. } => "reporter",
            Self::Precursor => "precursor",
        }
    }
}

/// A theoretical ion. The derived ordering sorts on m/z first.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct TheoreticalIon {
    /// The m/z
    pub mz: OrderedFloat<f64>,
    /// What kind of ion this is
    pub kind: IonKind,
    /// The charge, at least 1
    pub charge: u8,
    /// The applied neutral loss, if any
    pub neutral_loss: Option<NeutralLoss>,
    /// The annotation, e.g. `b3^2` or `Y1-H2O`
    pub label: String,
    /// The peptide this ion comes from, 0 for the first (α) and 1 for the second (β) peptide in a
    /// cross-linked pair
    pub peptide_index: usize,
}

impl TheoreticalIon {
    /// Create a new ion from its neutral mass. The loss is subtracted after charging, so at
    /// `m/z - loss/charge`.
    pub fn new(
        kind: IonKind,
        name: &str,
        neutral_mass: f64,
        charge: u8,
        peptide_index: usize,
        neutral_loss: Option<NeutralLoss>,
    ) -> Self {
        let mut value = mz(neutral_mass, charge);
        if let Some(loss) = &neutral_loss {
            value -= loss.mass() / f64::from(charge);
        }
        Self {
            mz: OrderedFloat(value),
            label: label(name, neutral_loss.as_ref(), charge),
            kind,
            charge,
            neutral_loss,
            peptide_index,
        }
    }

    /// Generate this ion at all given charges, once without a neutral loss and once for every
    /// given neutral loss.
    pub fn generate_all(
        kind: &IonKind,
        name: &str,
        neutral_mass: f64,
        charges: RangeInclusive<u8>,
        peptide_index: usize,
        neutral_losses: &[NeutralLoss],
    ) -> Vec<Self> {
        charges
            .cartesian_product(std::iter::once(None).chain(neutral_losses.iter().map(Some)))
            .map(|(charge, loss)| {
                Self::new(
                    kind.clone(),
                    name,
                    neutral_mass,
                    charge,
                    peptide_index,
                    loss.cloned(),
                )
            })
            .collect()
    }

    /// Create a singly charged ion from a known m/z, used for library ions like oxonium ions.
    pub fn singly_charged(kind: IonKind, name: &str, mz: f64, peptide_index: usize) -> Self {
        Self {
            mz: OrderedFloat(mz),
            label: name.to_string(),
            kind,
            charge: 1,
            neutral_loss: None,
            peptide_index,
        }
    }

    /// The m/z
    pub const fn mz(&self) -> f64 {
        self.mz.0
    }

    /// See [`IonKind::fragment_index`]
    pub const fn fragment_index(&self) -> Option<usize> {
        self.kind.fragment_index()
    }

    /// The catalog group this ion belongs to
    pub const fn group(&self) -> IonGroup {
        if self.neutral_loss.is_some() {
            return IonGroup::NeutralLoss;
        }
        match self.kind {
            IonKind::B(_) | IonKind::Y(_) | IonKind::C(_) | IonKind::Z(_) => IonGroup::Backbone,
            IonKind::GlycanY { .. } => IonGroup::GlycanY,
            IonKind::GlycanCore { .. } => IonGroup::GlycanCore,
            IonKind::Oxonium { .. } => IonGroup::Oxonium,
            IonKind::CrosslinkStub { .. } | IonKind::CrosslinkReporter { .. } => {
                IonGroup::CrossLink
            }
            IonKind::Precursor => IonGroup::Precursor,
        }
    }
}

impl Display for TheoreticalIon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:.4}", self.label, self.mz.0)
    }
}

/// The groups in an [`IonCatalog`](crate::fragment::IonCatalog)
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum IonGroup {
    /// b, c, y, and z ions
    Backbone,
    /// The glycan Y ladder
    GlycanY,
    /// The N-glycan core Y ions
    GlycanCore,
    /// Oxonium ions
    Oxonium,
    /// Cross-linker stub and reporter ions
    CrossLink,
    /// All ions with a neutral loss
    NeutralLoss,
    /// Precursor ions
    Precursor,
}

fn label(name: &str, loss: Option<&NeutralLoss>, charge: u8) -> String {
    format!(
        "{name}{}{}",
        loss.map_or(String::new(), |l| format!("-{}", l.name())),
        if charge > 1 {
            format!("^{charge}")
        } else {
            String::new()
        }
    )
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use glycore::chemistry::{PROTON, WATER};

    use super::*;

    #[test]
    fn charged_mz() {
        let ion = TheoreticalIon::new(IonKind::B(3), "b3", 500.0, 2, 0, None);
        assert_eq!(ion.mz(), (500.0 + 2.0 * PROTON) / 2.0);
        assert_eq!(ion.label, "b3^2");
        assert_eq!(ion.fragment_index(), Some(3));
        assert_eq!(ion.group(), IonGroup::Backbone);

        let lost = TheoreticalIon::new(IonKind::B(3), "b3", 500.0, 2, 0, Some(NeutralLoss::Water));
        assert!((lost.mz() - (ion.mz() - WATER / 2.0)).abs() < 1e-12);
        assert_eq!(lost.label, "b3-H2O^2");
        assert_eq!(lost.group(), IonGroup::NeutralLoss);
    }

    #[test]
    fn kinds() {
        let stub = IonKind::CrosslinkStub {
            stub: "A".to_string(),
            backbone: Some((BackboneSeries::Y, 4)),
        };
        assert_eq!(stub.fragment_index(), Some(4));
        assert_eq!(stub.backbone_position(), Some((BackboneSeries::Y, 4)));
        assert_eq!(IonKind::GlycanY { remaining: 2 }.fragment_index(), Some(2));
        assert_eq!(IonKind::Precursor.fragment_index(), None);
        assert_eq!(BackboneSeries::Y.bond(3, 8), 5);
        assert_eq!(BackboneSeries::C.bond(3, 8), 3);
    }
}
