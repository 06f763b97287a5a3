use context_error::*;
use glycore::{
    GlycoError, GlycoErrorKind,
    chemistry::{AMMONIA, PROTON, WATER},
    sequence::Peptide,
};

use crate::{
    annotation::model::{FragmentationMethod, FragmentationModel},
    cross_link::{CrossLink, cross_linked_ions},
    fragment::{BackboneSeries, IonCatalog, IonKind, NeutralLoss, TheoreticalIon},
    glycan::glycan_ions,
};

/// Generate the theoretical ions for a peptide.
pub trait PeptideFragmentation {
    /// Generate all theoretical ions for this peptide, optionally cross-linked to a second peptide.
    /// # Errors
    /// If the precursor charge is zero, the model is invalid, or the cross-link sites are outside
    /// of their peptides.
    fn generate_theoretical_ions(
        &self,
        precursor_charge: u8,
        cross_link: Option<&CrossLink>,
        model: &FragmentationModel,
    ) -> Result<IonCatalog, GlycoError>;
}

impl PeptideFragmentation for Peptide {
    fn generate_theoretical_ions(
        &self,
        precursor_charge: u8,
        cross_link: Option<&CrossLink>,
        model: &FragmentationModel,
    ) -> Result<IonCatalog, GlycoError> {
        model.validate()?;
        if precursor_charge == 0 {
            return Err(BoxedError::new(
                GlycoErrorKind::InvalidConfiguration,
                "Invalid precursor charge",
                "The precursor charge should be at least 1",
                Context::none(),
            ));
        }
        let catalog = if let Some(cross_link) = cross_link {
            cross_link.validate(self)?;
            cross_linked_ions(self, cross_link, precursor_charge, model)
        } else {
            let mut catalog: IonCatalog = backbone_fragments(self, model.method)
                .iter()
                .flat_map(|fragment| {
                    TheoreticalIon::generate_all(
                        &fragment.kind(),
                        &fragment.name(""),
                        fragment.mass,
                        model.fragment_charges(),
                        0,
                        &applicable_losses(model, fragment.glycosylated),
                    )
                })
                .collect();
            if let Some(glycan) = self.glycan() {
                catalog.extend(glycan_ions(
                    self.neutral_mass(),
                    self.glycan_mass(),
                    self.glycan_tag_mass(),
                    &glycan,
                    model,
                ));
            }
            catalog
        };
        log::debug!(
            "Generated {} theoretical ions for {self} ({} backbone, {} glycan Y, {} oxonium, {} cross-link)",
            catalog.len(),
            catalog.backbone.len(),
            catalog.glycan_y.len(),
            catalog.oxonium.len(),
            catalog.cross_link.len(),
        );
        Ok(catalog)
    }
}

/// An uncharged backbone fragment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct BackboneFragment {
    pub(crate) series: BackboneSeries,
    /// The number of residues
    pub(crate) index: usize,
    /// The neutral mass
    pub(crate) mass: f64,
    /// If any glycosylated position is part of this fragment
    pub(crate) glycosylated: bool,
}

impl BackboneFragment {
    pub(crate) const fn kind(&self) -> IonKind {
        IonKind::backbone(self.series, self.index)
    }

    pub(crate) fn name(&self, peptide_mark: &str) -> String {
        format!("{}{}{peptide_mark}", self.series, self.index)
    }

    /// If the residue at the given 1-based index is part of this fragment
    pub(crate) const fn contains_residue(&self, residue: usize, peptide_length: usize) -> bool {
        if self.series.is_n_terminal() {
            residue <= self.index
        } else {
            residue + self.index > peptide_length
        }
    }
}

/// All backbone fragments for the series allowed by the method. For a peptide of length `n`
/// every series has the fragments with 1 up to `n - 1` residues.
pub(crate) fn backbone_fragments(
    peptide: &Peptide,
    method: FragmentationMethod,
) -> Vec<BackboneFragment> {
    let length = peptide.len();
    method
        .series()
        .flat_map(|series| {
            (1..length).map(move |index| {
                let (mass, glycosylated) = if series.is_n_terminal() {
                    (
                        peptide.n_terminal_mass(index),
                        peptide
                            .glycosylations()
                            .any(|m| peptide.n_terminal_contains(index, m.position())),
                    )
                } else {
                    (
                        peptide.c_terminal_mass(index) + WATER,
                        peptide
                            .glycosylations()
                            .any(|m| peptide.c_terminal_contains(index, m.position())),
                    )
                };
                BackboneFragment {
                    series,
                    index,
                    mass: match series {
                        BackboneSeries::B | BackboneSeries::Y => mass,
                        BackboneSeries::C => mass + AMMONIA,
                        BackboneSeries::Z => mass - AMMONIA + PROTON,
                    },
                    glycosylated,
                }
            })
        })
        .collect()
}

/// The neutral losses from the model that apply to an ion, the glycan losses only apply to ions
/// that still carry a HexNAc.
pub(crate) fn applicable_losses(model: &FragmentationModel, carries_hexnac: bool) -> Vec<NeutralLoss> {
    model
        .neutral_losses
        .iter()
        .filter(|loss| carries_hexnac || !loss.requires_glycan())
        .cloned()
        .collect()
}
