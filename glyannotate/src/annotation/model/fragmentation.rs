use std::{ops::RangeInclusive, str::FromStr};

use context_error::*;
use glycore::{
    GlycoError, GlycoErrorKind,
    glycan::{GlycanComposition, GlycanType, MonoSaccharide},
};
use serde::{Deserialize, Serialize};

use crate::fragment::{BackboneSeries, NeutralLoss};

/// The activation method, this selects the backbone ion series.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "String", into = "String")]
#[allow(clippy::upper_case_acronyms)]
pub enum FragmentationMethod {
    /// Higher-energy collisional dissociation, b and y ions
    #[default]
    HCD,
    /// Collision induced dissociation, b and y ions
    CID,
    /// Electron transfer dissociation, b, c, y, and z ions
    ETD,
    /// Electron transfer with supplemental higher-energy activation, b, c, y, and z ions
    EThcD,
}

impl FragmentationMethod {
    /// If this method produces the given series
    pub const fn allows(self, series: BackboneSeries) -> bool {
        match self {
            Self::HCD | Self::CID => matches!(series, BackboneSeries::B | BackboneSeries::Y),
            Self::ETD | Self::EThcD => true,
        }
    }

    /// The series produced by this method
    pub fn series(self) -> impl Iterator<Item = BackboneSeries> {
        BackboneSeries::ALL
            .iter()
            .copied()
            .filter(move |s| self.allows(*s))
    }
}

impl std::fmt::Display for FragmentationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::HCD => "HCD",
                Self::CID => "CID",
                Self::ETD => "ETD",
                Self::EThcD => "EThcD",
            }
        )
    }
}

impl FromStr for FragmentationMethod {
    type Err = GlycoError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hcd" => Ok(Self::HCD),
            "cid" => Ok(Self::CID),
            "etd" => Ok(Self::ETD),
            "ethcd" => Ok(Self::EThcD),
            _ => Err(BoxedError::new(
                GlycoErrorKind::InvalidConfiguration,
                "Unknown fragmentation method",
                "Use one of: HCD, CID, ETD, EThcD",
                Context::show(s.to_string()),
            )),
        }
    }
}

impl TryFrom<String> for FragmentationMethod {
    type Error = GlycoError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FragmentationMethod> for String {
    fn from(value: FragmentationMethod) -> Self {
        value.to_string()
    }
}

/// The order in which monosaccharides are removed when building the glycan Y ion ladder, the most
/// labile first.
pub const DEFAULT_REMOVAL_ORDER: &[MonoSaccharide] = &[
    MonoSaccharide::NeuAc,
    MonoSaccharide::NeuGc,
    MonoSaccharide::Fuc,
    MonoSaccharide::Sulfate,
    MonoSaccharide::Phosphate,
    MonoSaccharide::Xyl,
    MonoSaccharide::HexA,
    MonoSaccharide::Kdn,
    MonoSaccharide::Hex,
    MonoSaccharide::HexNAc,
];

/// Control what theoretical ions are generated.
#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct FragmentationModel {
    /// The activation method
    #[serde(rename = "fragmentation_method")]
    pub method: FragmentationMethod,
    /// The maximal charge for backbone and glycan Y ions
    pub max_fragment_charge: u8,
    /// Overrule the glycan type, `None` uses the type found when parsing the glycan
    #[serde(with = "glycan_type_hint")]
    pub glycan_type: Option<GlycanType>,
    /// Add the extended oxonium ions
    pub extended_oxonium: bool,
    /// The neutral losses to generate
    pub neutral_losses: Vec<NeutralLoss>,
    /// The order in which monosaccharides are removed from the glycan, monosaccharides that are
    /// not listed are removed last in canonical order
    pub glycan_removal_order: Vec<MonoSaccharide>,
    /// The glycan carries a TMT label, enables the TMT oxonium ions
    pub tmt_on_glycan: bool,
    /// Generate the N-glycan core Y ions
    pub n_glycan_core_ions: bool,
}

impl Default for FragmentationModel {
    fn default() -> Self {
        Self {
            method: FragmentationMethod::HCD,
            max_fragment_charge: 2,
            glycan_type: None,
            extended_oxonium: false,
            neutral_losses: Vec::new(),
            glycan_removal_order: DEFAULT_REMOVAL_ORDER.to_vec(),
            tmt_on_glycan: false,
            n_glycan_core_ions: true,
        }
    }
}

impl FragmentationModel {
    /// Set the fragmentation method
    #[must_use]
    pub fn method(self, method: FragmentationMethod) -> Self {
        Self { method, ..self }
    }

    /// Set the maximal fragment charge
    #[must_use]
    pub fn max_fragment_charge(self, max_fragment_charge: u8) -> Self {
        Self {
            max_fragment_charge,
            ..self
        }
    }

    /// Set the glycan type, `None` to use the type found when parsing
    #[must_use]
    pub fn glycan_type(self, glycan_type: Option<GlycanType>) -> Self {
        Self {
            glycan_type,
            ..self
        }
    }

    /// Set the extended oxonium ions
    #[must_use]
    pub fn extended_oxonium(self, extended_oxonium: bool) -> Self {
        Self {
            extended_oxonium,
            ..self
        }
    }

    /// Replace the neutral losses
    #[must_use]
    pub fn neutral_losses(self, neutral_losses: Vec<NeutralLoss>) -> Self {
        Self {
            neutral_losses,
            ..self
        }
    }

    /// Replace the glycan removal order
    #[must_use]
    pub fn glycan_removal_order(self, glycan_removal_order: Vec<MonoSaccharide>) -> Self {
        Self {
            glycan_removal_order,
            ..self
        }
    }

    /// Set if the glycan carries a TMT label
    #[must_use]
    pub fn tmt_on_glycan(self, tmt_on_glycan: bool) -> Self {
        Self {
            tmt_on_glycan,
            ..self
        }
    }

    /// Set the generation of N-glycan core ions
    #[must_use]
    pub fn n_glycan_core_ions(self, n_glycan_core_ions: bool) -> Self {
        Self {
            n_glycan_core_ions,
            ..self
        }
    }

    /// The charges for backbone and glycan Y ions
    pub fn fragment_charges(&self) -> RangeInclusive<u8> {
        1..=self.max_fragment_charge
    }

    /// Check that the model can be used.
    /// # Errors
    /// If the maximal fragment charge is zero.
    pub fn validate(&self) -> Result<(), GlycoError> {
        if self.max_fragment_charge == 0 {
            return Err(BoxedError::new(
                GlycoErrorKind::InvalidConfiguration,
                "Invalid fragmentation model",
                "The maximal fragment charge should be at least 1",
                Context::none(),
            ));
        }
        Ok(())
    }

    /// The order in which the units of this glycan are removed, one entry per unit. Starts with
    /// the configured order and ends with any remaining monosaccharides in canonical order.
    pub fn removal_sequence(&self, glycan: &GlycanComposition) -> Vec<MonoSaccharide> {
        let mut order: Vec<MonoSaccharide> = Vec::with_capacity(MonoSaccharide::ALL.len());
        for sugar in self
            .glycan_removal_order
            .iter()
            .chain(MonoSaccharide::ALL)
        {
            if !order.contains(sugar) {
                order.push(*sugar);
            }
        }
        order
            .into_iter()
            .flat_map(|sugar| std::iter::repeat_n(sugar, usize::from(glycan.count(sugar))))
            .collect()
    }
}

/// (De)serialise the glycan type hint, where `auto` or `null` means no hint.
mod glycan_type_hint {
    use glycore::glycan::GlycanType;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub(super) fn serialize<S: Serializer>(
        value: &Option<GlycanType>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(glycan_type) => serializer.collect_str(glycan_type),
            None => serializer.serialize_str("auto"),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<GlycanType>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(text) if text.trim().eq_ignore_ascii_case("auto") => Ok(None),
            Some(text) => text.parse().map(Some).map_err(D::Error::custom),
        }
    }
}
