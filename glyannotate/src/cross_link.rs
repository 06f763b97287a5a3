//! Fragments of two peptides joined by a cross-linker.

use std::ops::RangeInclusive;

use context_error::*;
use glycore::{
    GlycoError, GlycoErrorKind,
    cross_link::{CrossLinkedPeptides, Crosslinker},
    sequence::Peptide,
};
use serde::{Deserialize, Serialize};

use crate::{
    annotation::model::FragmentationModel,
    fragment::{IonCatalog, IonKind, TheoreticalIon},
    glycan::glycan_ions,
    peptide::{applicable_losses, backbone_fragments},
};

/// The marks used to tell the ions of both peptides apart in annotations
pub const PEPTIDE_MARKS: [&str; 2] = ["α", "β"];

/// The second peptide and the reagent of a cross-linked pair. The peptide that fragments are
/// generated for is the α peptide, the partner is the β peptide. When deserialising, the β site
/// is checked against the partner, the α site is checked when the ions are generated.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "CrossLinkFields")]
pub struct CrossLink {
    /// The β peptide
    pub partner: Peptide,
    /// The reagent
    pub crosslinker: Crosslinker,
    /// The 1-based residue index of the link on the α peptide, if known
    pub alpha_site: Option<usize>,
    /// The 1-based residue index of the link on the β peptide, if known
    pub beta_site: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct CrossLinkFields {
    partner: Peptide,
    crosslinker: Crosslinker,
    #[serde(default)]
    alpha_site: Option<usize>,
    #[serde(default)]
    beta_site: Option<usize>,
}

impl TryFrom<CrossLinkFields> for CrossLink {
    type Error = GlycoError;
    fn try_from(value: CrossLinkFields) -> Result<Self, Self::Error> {
        if value.alpha_site == Some(0) {
            return Err(BoxedError::new(
                GlycoErrorKind::InvalidModificationPosition,
                "Invalid cross-link site",
                "Cross-link sites are 1 based, the site on the α peptide cannot be 0",
                Context::none(),
            ));
        }
        if let Some(site) = value
            .beta_site
            .filter(|s| *s == 0 || *s > value.partner.len())
        {
            return Err(site_error(site, PEPTIDE_MARKS[1], &value.partner));
        }
        Ok(Self::new(value.partner, value.crosslinker).sites(value.alpha_site, value.beta_site))
    }
}

impl CrossLink {
    /// Create a cross-link with unknown link sites
    pub const fn new(partner: Peptide, crosslinker: Crosslinker) -> Self {
        Self {
            partner,
            crosslinker,
            alpha_site: None,
            beta_site: None,
        }
    }

    /// Set the link sites
    #[must_use]
    pub fn sites(self, alpha_site: Option<usize>, beta_site: Option<usize>) -> Self {
        Self {
            alpha_site,
            beta_site,
            ..self
        }
    }

    /// Split a parsed cross-linked pair into the α peptide and the cross-link.
    pub fn from_proforma(peptides: CrossLinkedPeptides) -> (Peptide, Self) {
        (
            peptides.alpha,
            Self {
                partner: peptides.beta,
                crosslinker: peptides.crosslinker.clone(),
                alpha_site: Some(peptides.alpha_site),
                beta_site: Some(peptides.beta_site),
            },
        )
    }

    /// The neutral mass of the linked pair, both peptides plus the intact reagent
    pub fn precursor_mass(&self, peptide: &Peptide) -> f64 {
        peptide.neutral_mass() + self.partner.neutral_mass() + self.crosslinker.intact_mass()
    }

    /// Check that the link sites lie on their peptides.
    pub(crate) fn validate(&self, peptide: &Peptide) -> Result<(), GlycoError> {
        for (site, peptide, mark) in [
            (self.alpha_site, peptide, PEPTIDE_MARKS[0]),
            (self.beta_site, &self.partner, PEPTIDE_MARKS[1]),
        ] {
            if let Some(site) = site.filter(|s| *s == 0 || *s > peptide.len()) {
                return Err(site_error(site, mark, peptide));
            }
        }
        Ok(())
    }
}

fn site_error(site: usize, mark: &str, peptide: &Peptide) -> GlycoError {
    BoxedError::new(
        GlycoErrorKind::InvalidModificationPosition,
        "Invalid cross-link site",
        format!(
            "The cross-link site {site} on the {mark} peptide is outside of the peptide, which has {} residues",
            peptide.len()
        ),
        Context::show(peptide.to_string()),
    )
}

/// The intact peptide carrying each stub of a cleavable cross-linker, at all given charges.
/// Non-cleavable reagents have no stubs so this is empty for them.
pub fn stub_ions(
    peptide_mass: f64,
    crosslinker: &Crosslinker,
    charges: RangeInclusive<u8>,
    peptide_index: usize,
) -> Vec<TheoreticalIon> {
    let mark = PEPTIDE_MARKS.get(peptide_index).copied().unwrap_or_default();
    crosslinker
        .stubs()
        .iter()
        .flat_map(|stub| {
            TheoreticalIon::generate_all(
                &IonKind::CrosslinkStub {
                    stub: stub.label.clone(),
                    backbone: None,
                },
                &format!("{mark}+{}", stub.label),
                peptide_mass + stub.mass,
                charges.clone(),
                peptide_index,
                &[],
            )
        })
        .collect()
}

/// All ions for a cross-linked pair: the backbone ladders of both peptides, their stub variants
/// (or the partner carrying variants for non-cleavable reagents), the reagent reporter ions, the
/// precursor, and the glycan ions of the combined glycan.
pub(crate) fn cross_linked_ions(
    alpha: &Peptide,
    link: &CrossLink,
    precursor_charge: u8,
    model: &FragmentationModel,
) -> IonCatalog {
    // The charge of the other half is at least one, empty for a singly charged precursor
    let linked_charges = 1..=precursor_charge.saturating_sub(1);
    let crosslinker = &link.crosslinker;
    let mut catalog = IonCatalog::default();

    for (peptide_index, (peptide, site, other)) in [
        (alpha, link.alpha_site, &link.partner),
        (&link.partner, link.beta_site, alpha),
    ]
    .into_iter()
    .enumerate()
    {
        let mark = PEPTIDE_MARKS[peptide_index];
        for fragment in backbone_fragments(peptide, model.method) {
            let name = fragment.name(mark);
            catalog.extend(TheoreticalIon::generate_all(
                &fragment.kind(),
                &name,
                fragment.mass,
                model.fragment_charges(),
                peptide_index,
                &applicable_losses(model, fragment.glycosylated),
            ));
            if site.is_some_and(|site| !fragment.contains_residue(site, peptide.len())) {
                continue;
            }
            let backbone = Some((fragment.series, fragment.index));
            if crosslinker.is_cleavable() {
                for stub in crosslinker.stubs() {
                    catalog.extend(TheoreticalIon::generate_all(
                        &IonKind::CrosslinkStub {
                            stub: stub.label.clone(),
                            backbone,
                        },
                        &format!("{name}+{}", stub.label),
                        fragment.mass + stub.mass,
                        linked_charges.clone(),
                        peptide_index,
                        &[],
                    ));
                }
            } else {
                catalog.extend(TheoreticalIon::generate_all(
                    &IonKind::CrosslinkStub {
                        stub: crosslinker.name().to_string(),
                        backbone,
                    },
                    &format!("{name}+{}", PEPTIDE_MARKS[1 - peptide_index]),
                    fragment.mass + other.neutral_mass() + crosslinker.intact_mass(),
                    linked_charges.clone(),
                    peptide_index,
                    &[],
                ));
            }
        }
        catalog.extend(stub_ions(
            peptide.neutral_mass(),
            crosslinker,
            linked_charges.clone(),
            peptide_index,
        ));
    }

    catalog.extend(crosslinker.get_reporters().iter().map(|reporter| {
        TheoreticalIon::singly_charged(
            IonKind::CrosslinkReporter {
                name: reporter.name.clone(),
            },
            &reporter.name,
            reporter.mz,
            0,
        )
    }));

    let precursor_mass = link.precursor_mass(alpha);
    catalog.extend(TheoreticalIon::generate_all(
        &IonKind::Precursor,
        "M",
        precursor_mass,
        1..=precursor_charge,
        0,
        &[],
    ));

    let glycan = match (alpha.glycan(), link.partner.glycan()) {
        (Some(a), Some(b)) => Some(a.combine(&b)),
        (a, b) => a.or(b),
    };
    if let Some(glycan) = glycan {
        catalog.extend(glycan_ions(
            precursor_mass,
            alpha.glycan_mass() + link.partner.glycan_mass(),
            alpha.glycan_tag_mass() + link.partner.glycan_tag_mass(),
            &glycan,
            model,
        ));
    }
    catalog
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use glycore::{chemistry::mz, cross_link::crosslinker_by_name};

    use super::*;
    use crate::{fragment::IonGroup, peptide::PeptideFragmentation};

    fn pair(crosslinker: &str) -> (Peptide, CrossLink) {
        (
            Peptide::new("PEPTIDEK", Vec::new()).unwrap(),
            CrossLink::new(
                Peptide::new("AKEK", Vec::new()).unwrap(),
                crosslinker_by_name(crosslinker).unwrap().clone(),
            ),
        )
    }

    #[test]
    fn stub_masses() {
        let dsso = crosslinker_by_name("DSSO").unwrap();
        let ions = stub_ions(1000.0, dsso, 1..=1, 0);
        assert_eq!(ions.len(), 3);
        for (ion, (label, mass)) in ions
            .iter()
            .zip([("A", 54.0106), ("T", 85.9826), ("S", 103.9932)])
        {
            assert_eq!(ion.label, format!("α+{label}"));
            assert!((ion.mz() - mz(1000.0 + mass, 1)).abs() < 1e-9);
            assert_eq!(ion.fragment_index(), None);
        }
        assert!(stub_ions(1000.0, crosslinker_by_name("BS3").unwrap(), 1..=2, 0).is_empty());
    }

    #[test]
    fn stub_variants() {
        let (alpha, link) = pair("DSSO");
        let model = FragmentationModel::default().max_fragment_charge(1);
        let catalog = alpha
            .generate_theoretical_ions(2, Some(&link), &model)
            .unwrap();
        let b3 = catalog
            .backbone
            .iter()
            .find(|i| i.label == "b3α")
            .unwrap();
        let variants: Vec<_> = catalog
            .cross_link
            .iter()
            .filter(|i| {
                i.peptide_index == 0
                    && matches!(
                        i.kind,
                        IonKind::CrosslinkStub {
                            backbone: Some((_, 3)),
                            ..
                        }
                    )
                    && i.label.starts_with('b')
            })
            .collect();
        assert_eq!(variants.len(), 3);
        for (variant, stub) in variants.iter().zip(link.crosslinker.stubs()) {
            assert_eq!(variant.label, format!("b3α+{}", stub.label));
            assert!((variant.mz() - b3.mz() - stub.mass).abs() < 1e-9);
        }
        // Both ladders are present, each with their own peptide index
        assert_eq!(catalog.backbone.len(), 14 + 6);
        assert_eq!(
            catalog.backbone.iter().filter(|i| i.peptide_index == 1).count(),
            6
        );
        assert!(catalog.backbone.iter().any(|i| i.label == "y2β"));
    }

    #[test]
    fn link_sites() {
        let (alpha, link) = pair("DSSO");
        let link = link.sites(Some(8), Some(2));
        let model = FragmentationModel::default().max_fragment_charge(1);
        let catalog = alpha
            .generate_theoretical_ions(3, Some(&link), &model)
            .unwrap();
        let variants = |peptide_index: usize| {
            catalog
                .cross_link
                .iter()
                .filter(|i| {
                    i.peptide_index == peptide_index
                        && matches!(i.kind, IonKind::CrosslinkStub { backbone: Some(_), .. })
                })
                .collect::<Vec<_>>()
        };
        // The C-terminal lysine is only present in the y ions, 7 ions with 3 stubs at 2 charges
        let alpha_variants = variants(0);
        assert_eq!(alpha_variants.len(), 7 * 3 * 2);
        assert!(alpha_variants.iter().all(|i| i.label.starts_with('y')));
        // On AKEK the b2, b3, y3 contain the second residue
        assert_eq!(variants(1).len(), 3 * 3 * 2);

        let invalid = link.clone().sites(Some(9), None);
        assert!(matches!(
            alpha
                .generate_theoretical_ions(3, Some(&invalid), &model)
                .unwrap_err()
                .get_kind(),
            GlycoErrorKind::InvalidModificationPosition
        ));
        let invalid = link.sites(None, Some(0));
        assert!(alpha.generate_theoretical_ions(3, Some(&invalid), &model).is_err());
    }

    #[test]
    fn non_cleavable() {
        let (alpha, link) = pair("BS3");
        let model = FragmentationModel::default().max_fragment_charge(1);
        let catalog = alpha
            .generate_theoretical_ions(3, Some(&link), &model)
            .unwrap();
        let b3 = catalog
            .backbone
            .iter()
            .find(|i| i.label == "b3α")
            .unwrap();
        let linked = catalog
            .cross_link
            .iter()
            .find(|i| i.label == "b3α+β")
            .unwrap();
        assert_eq!(
            linked.kind,
            IonKind::CrosslinkStub {
                stub: "BS3".to_string(),
                backbone: Some((crate::fragment::BackboneSeries::B, 3))
            }
        );
        assert!(
            (linked.mz() - b3.mz() - link.partner.neutral_mass() - 138.0681).abs() < 1e-9
        );
        assert!(
            catalog
                .cross_link
                .iter()
                .all(|i| !matches!(i.kind, IonKind::CrosslinkReporter { .. }))
        );
        // Charges 1 and 2 for a precursor at charge 3
        assert_eq!(
            catalog
                .cross_link
                .iter()
                .filter(|i| i.label.starts_with("b3α+β"))
                .count(),
            2
        );
    }

    #[test]
    fn reporters_and_precursor() {
        let (alpha, link) = pair("DSSO");
        let catalog = alpha
            .generate_theoretical_ions(3, Some(&link), &FragmentationModel::default())
            .unwrap();
        let reporters: Vec<_> = catalog
            .cross_link
            .iter()
            .filter(|i| matches!(i.kind, IonKind::CrosslinkReporter { .. }))
            .collect();
        assert_eq!(reporters.len(), 2);
        assert!(reporters.iter().all(|i| i.charge == 1));
        assert!((reporters[0].mz() - 104.0170).abs() < 1e-9);

        assert_eq!(catalog.precursor.len(), 3);
        let mass = alpha.neutral_mass() + link.partner.neutral_mass() + 158.0038;
        assert!((link.precursor_mass(&alpha) - mass).abs() < 1e-9);
        for (charge, ion) in (1..=3).zip(&catalog.precursor) {
            assert_eq!(ion.charge, charge);
            assert!((ion.mz() - mz(mass, charge)).abs() < 1e-9);
            assert_eq!(ion.group(), IonGroup::Precursor);
        }
    }

    #[test]
    fn singly_charged_precursor() {
        let (alpha, link) = pair("DSSO");
        let catalog = alpha
            .generate_theoretical_ions(1, Some(&link), &FragmentationModel::default())
            .unwrap();
        // Only the reporters remain, a stub or linked ion would leave the other half uncharged
        assert!(
            catalog
                .cross_link
                .iter()
                .all(|i| matches!(i.kind, IonKind::CrosslinkReporter { .. }))
        );
        assert_eq!(catalog.cross_link.len(), 2);
        // b and y of both peptides at charges 1 and 2
        assert_eq!(catalog.backbone.len(), 2 * 2 * (7 + 3));
        assert_eq!(catalog.precursor.len(), 1);
        let (alpha, link) = pair("BS3");
        let catalog = alpha
            .generate_theoretical_ions(1, Some(&link), &FragmentationModel::default())
            .unwrap();
        assert!(catalog.cross_link.is_empty());
    }

    #[test]
    fn glycosylated_pair() {
        let alpha = Peptide::parse("PEPSTIDEK", "4S(HexNAc1)").unwrap();
        let link = CrossLink::new(
            Peptide::new("AKEK", Vec::new()).unwrap(),
            crosslinker_by_name("DSSO").unwrap().clone(),
        );
        let catalog = alpha
            .generate_theoretical_ions(
                3,
                Some(&link),
                &FragmentationModel::default().max_fragment_charge(1),
            )
            .unwrap();
        assert_eq!(catalog.glycan_y.len(), 2);
        let y1 = catalog
            .glycan_y
            .iter()
            .find(|i| i.fragment_index() == Some(1))
            .unwrap();
        assert!((y1.mz() - mz(link.precursor_mass(&alpha), 1)).abs() < 1e-9);
        assert_eq!(catalog.oxonium.len(), 5);
    }

    #[test]
    fn checked_deserialisation() {
        let (_, link) = pair("DSSO");
        let link = link.sites(Some(8), Some(2));
        let mut value = serde_json::to_value(&link).unwrap();
        assert_eq!(serde_json::from_value::<CrossLink>(value.clone()).unwrap(), link);
        for (key, site) in [("beta_site", 5), ("beta_site", 0), ("alpha_site", 0)] {
            let mut wrong = value.clone();
            wrong[key] = serde_json::json!(site);
            assert!(serde_json::from_value::<CrossLink>(wrong).is_err(), "{key} {site}");
        }
        // A non-cleavable reagent that still carries stubs
        value["crosslinker"]["cleavable"] = serde_json::json!(false);
        assert!(serde_json::from_value::<CrossLink>(value).is_err());
    }

    #[test]
    fn from_proforma() {
        let (alpha, link) = CrossLink::from_proforma(
            glycore::cross_link::parse_proforma_crosslink("PEPK[DSSO#XL1]TIDE//ANOTHERK[#XL1]PEP")
                .unwrap(),
        );
        assert_eq!(alpha.sequence_string(), "PEPKTIDE");
        assert_eq!(link.partner.sequence_string(), "ANOTHERKPEP");
        assert_eq!(link.alpha_site, Some(4));
        assert_eq!(link.beta_site, Some(8));
        assert_eq!(link.crosslinker.name(), "DSSO");
    }
}
