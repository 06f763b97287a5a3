//! Glycopeptide specific ions: the Y ion ladder, the N-glycan core ions, and the oxonium ions.

use glycore::{
    chemistry::TMT,
    glycan::{GlycanComposition, MonoSaccharide, oxonium_ions_for},
};

use crate::{
    annotation::model::FragmentationModel,
    fragment::{IonKind, TheoreticalIon},
    peptide::applicable_losses,
};

use MonoSaccharide::{Fuc, Hex, HexNAc};

/// The N-glycan core fragments that stay on the peptide, with the monosaccharides they retain.
const N_GLYCAN_CORE: &[(&str, &[(MonoSaccharide, u16)])] = &[
    ("Y1", &[(HexNAc, 1)]),
    ("Y2", &[(HexNAc, 2)]),
    ("Y3", &[(HexNAc, 2), (Hex, 1)]),
    ("Y4", &[(HexNAc, 2), (Hex, 2)]),
    ("Y(core)", &[(HexNAc, 2), (Hex, 3)]),
    ("Y1F", &[(HexNAc, 1), (Fuc, 1)]),
    ("Y(core)F", &[(HexNAc, 2), (Hex, 3), (Fuc, 1)]),
];

/// Generate all glycan related ions for a glycopeptide with the given intact neutral mass. The
/// glycan mass includes any tag on the glycan, the tag mass is the part that is not explained by
/// the composition. The type hint from the model overrules the type of the glycan.
pub(crate) fn glycan_ions(
    intact_mass: f64,
    glycan_mass: f64,
    glycan_tag_mass: f64,
    glycan: &GlycanComposition,
    model: &FragmentationModel,
) -> Vec<TheoreticalIon> {
    let glycan = model
        .glycan_type
        .map_or_else(|| glycan.clone(), |t| glycan.clone().with_glycan_type(t));
    let peptide_mass = intact_mass - glycan_mass;
    let mut ions = y_ladder(intact_mass, peptide_mass, &glycan, model);
    if model.n_glycan_core_ions && glycan.glycan_type().is_n_glycan() {
        for (name, retained) in N_GLYCAN_CORE {
            if glycan.contains(retained) {
                let mass = peptide_mass
                    + retained
                        .iter()
                        .map(|(sugar, n)| sugar.mass() * f64::from(*n))
                        .sum::<f64>();
                ions.extend(TheoreticalIon::generate_all(
                    &IonKind::GlycanCore {
                        name: (*name).to_string(),
                    },
                    name,
                    mass,
                    model.fragment_charges(),
                    0,
                    &applicable_losses(model, true),
                ));
            }
        }
    }
    let tmt = model.tmt_on_glycan || (glycan_tag_mass - TMT).abs() < 0.01;
    ions.extend(
        oxonium_ions_for(&glycan, model.extended_oxonium, tmt).map(|ion| {
            TheoreticalIon::singly_charged(
                IonKind::Oxonium {
                    name: ion.name.to_string(),
                },
                ion.name,
                ion.mz,
                0,
            )
        }),
    );
    ions
}

/// The Y ion ladder, from the intact glycopeptide down to the bare peptide (Y0). Each rung removes
/// the next monosaccharide in the removal sequence of the model. A tag on the glycan stays until
/// the last monosaccharide is gone.
fn y_ladder(
    intact_mass: f64,
    peptide_mass: f64,
    glycan: &GlycanComposition,
    model: &FragmentationModel,
) -> Vec<TheoreticalIon> {
    let sequence = model.removal_sequence(glycan);
    let mut hexnac = glycan.count(HexNAc);
    let mut mass = intact_mass;
    let mut ions = Vec::new();
    for removed in 0..=sequence.len() {
        let remaining = sequence.len() - removed;
        let rung_mass = if remaining == 0 { peptide_mass } else { mass };
        ions.extend(TheoreticalIon::generate_all(
            &IonKind::GlycanY { remaining },
            &format!("Y{remaining}"),
            rung_mass,
            model.fragment_charges(),
            0,
            &applicable_losses(model, hexnac > 0),
        ));
        if let Some(sugar) = sequence.get(removed) {
            mass -= sugar.mass();
            if *sugar == HexNAc {
                hexnac -= 1;
            }
        }
    }
    ions
}
