use serde::{Deserialize, Serialize};

use crate::fragment::{IonGroup, TheoreticalIon};

/// All theoretical ions for a peptide, grouped on their origin. Ions with a neutral loss are
/// always stored in [`Self::neutral_loss`], whatever their kind.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct IonCatalog {
    /// b, c, y, and z ions
    pub backbone: Vec<TheoreticalIon>,
    /// The glycan Y ladder
    pub glycan_y: Vec<TheoreticalIon>,
    /// The N-glycan core Y ions
    pub glycan_core: Vec<TheoreticalIon>,
    /// Diagnostic oxonium ions
    pub oxonium: Vec<TheoreticalIon>,
    /// Cross-linker stub and reporter ions
    pub cross_link: Vec<TheoreticalIon>,
    /// Ions with a neutral loss
    pub neutral_loss: Vec<TheoreticalIon>,
    /// Precursor ions
    pub precursor: Vec<TheoreticalIon>,
}

impl IonCatalog {
    /// Get a single group
    pub fn group(&self, group: IonGroup) -> &[TheoreticalIon] {
        match group {
            IonGroup::Backbone => &self.backbone,
            IonGroup::GlycanY => &self.glycan_y,
            IonGroup::GlycanCore => &self.glycan_core,
            IonGroup::Oxonium => &self.oxonium,
            IonGroup::CrossLink => &self.cross_link,
            IonGroup::NeutralLoss => &self.neutral_loss,
            IonGroup::Precursor => &self.precursor,
        }
    }

    fn group_mut(&mut self, group: IonGroup) -> &mut Vec<TheoreticalIon> {
        match group {
            IonGroup::Backbone => &mut self.backbone,
            IonGroup::GlycanY => &mut self.glycan_y,
            IonGroup::GlycanCore => &mut self.glycan_core,
            IonGroup::Oxonium => &mut self.oxonium,
            IonGroup::CrossLink => &mut self.cross_link,
            IonGroup::NeutralLoss => &mut self.neutral_loss,
            IonGroup::Precursor => &mut self.precursor,
        }
    }

    /// Add an ion to the group it belongs to
    pub fn push(&mut self, ion: TheoreticalIon) {
        self.group_mut(ion.group()).push(ion);
    }

    /// All ions in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &TheoreticalIon> {
        self.backbone
            .iter()
            .chain(&self.glycan_y)
            .chain(&self.glycan_core)
            .chain(&self.oxonium)
            .chain(&self.cross_link)
            .chain(&self.neutral_loss)
            .chain(&self.precursor)
    }

    /// The total number of ions
    pub fn len(&self) -> usize {
        self.backbone.len()
            + self.glycan_y.len()
            + self.glycan_core.len()
            + self.oxonium.len()
            + self.cross_link.len()
            + self.neutral_loss.len()
            + self.precursor.len()
    }

    /// If there are no ions at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Extend<TheoreticalIon> for IonCatalog {
    fn extend<T: IntoIterator<Item = TheoreticalIon>>(&mut self, iter: T) {
        for ion in iter {
            self.push(ion);
        }
    }
}

impl FromIterator<TheoreticalIon> for IonCatalog {
    fn from_iter<T: IntoIterator<Item = TheoreticalIon>>(iter: T) -> Self {
        let mut catalog = Self::default();
        catalog.extend(iter);
        catalog
    }
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crate::fragment::{IonKind, NeutralLoss};

    #[test]
    fn routing() {
        let catalog: IonCatalog = [
            TheoreticalIon::new(IonKind::B(1), "b1", 100.0, 1, 0, None),
            TheoreticalIon::new(IonKind::B(1), "b1", 100.0, 1, 0, Some(NeutralLoss::Water)),
            TheoreticalIon::new(IonKind::GlycanY { remaining: 0 }, "Y0", 800.0, 1, 0, None),
            TheoreticalIon::singly_charged(
                IonKind::Oxonium {
                    name: "HexNAc".to_string(),
                },
                "HexNAc",
                204.0867,
                0,
            ),
            TheoreticalIon::new(IonKind::Precursor, "M", 900.0, 2, 0, None),
        ]
        .into_iter()
        .collect();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.backbone.len(), 1);
        assert_eq!(catalog.neutral_loss.len(), 1);
        assert_eq!(catalog.group(IonGroup::GlycanY).len(), 1);
        assert_eq!(catalog.oxonium.len(), 1);
        assert_eq!(catalog.precursor.len(), 1);
        assert_eq!(catalog.iter().count(), catalog.len());
        assert!(IonCatalog::default().is_empty());
    }
}
