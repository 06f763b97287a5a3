use std::{ops::Range, str::FromStr};

use context_error::*;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thin_vec::ThinVec;

use crate::{
    error::{GlycoError, GlycoErrorKind},
    glycan::MonoSaccharide,
    helper_functions::{end_of_run, explain_number_error},
};

/// The broad class of a glycan, used to select the diagnostic ions and core fragments.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum GlycanType {
    /// A single O-linked GlcNAc
    #[serde(rename = "O-GlcNAc")]
    OGlcNAc,
    /// A single O-linked GalNAc (Tn antigen)
    #[serde(rename = "O-GalNAc")]
    OGalNAc,
    /// A mucin type O-glycan
    #[serde(rename = "O-glycan")]
    OGlycan,
    /// An N-linked glycan
    #[serde(rename = "N-glycan")]
    NGlycan,
}

impl GlycanType {
    /// If this is any kind of O-glycan
    pub const fn is_o_glycan(self) -> bool {
        !self.is_n_glycan()
    }

    /// If this is an N-glycan
    pub const fn is_n_glycan(self) -> bool {
        matches!(self, Self::NGlycan)
    }
}

impl FromStr for GlycanType {
    type Err = GlycoError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "o-glcnac" | "oglcnac" => Ok(Self::OGlcNAc),
            "o-galnac" | "ogalnac" => Ok(Self::OGalNAc),
            "o-glycan" | "oglycan" => Ok(Self::OGlycan),
            "n-glycan" | "nglycan" => Ok(Self::NGlycan),
            _ => Err(BoxedError::new(
                GlycoErrorKind::UnknownKey,
                "Unknown glycan type",
                "The glycan type has to be one of: O-GlcNAc, O-GalNAc, O-glycan, N-glycan",
                Context::show(s.to_string()),
            )),
        }
    }
}

impl std::fmt::Display for GlycanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::OGlcNAc => "O-GlcNAc",
                Self::OGalNAc => "O-GalNAc",
                Self::OGlycan => "O-glycan",
                Self::NGlycan => "N-glycan",
            }
        )
    }
}

/// A glycan composition, the number of each monosaccharide without any structure. The mass is
/// calculated once on construction, a serialised mass is ignored when deserialising.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(from = "GlycanCompositionFields")]
pub struct GlycanComposition {
    name: String,
    composition: ThinVec<(MonoSaccharide, u16)>,
    glycan_type: GlycanType,
    mass: f64,
}

#[derive(Debug, Deserialize)]
struct GlycanCompositionFields {
    name: String,
    composition: Vec<(MonoSaccharide, u16)>,
    glycan_type: GlycanType,
}

impl From<GlycanCompositionFields> for GlycanComposition {
    fn from(value: GlycanCompositionFields) -> Self {
        Self::new(value.name, value.composition, value.glycan_type)
    }
}

impl GlycanComposition {
    /// Create a new composition, the composition is sorted and deduplicated and zero counts are removed.
    pub fn new(
        name: impl Into<String>,
        composition: impl IntoIterator<Item = (MonoSaccharide, u16)>,
        glycan_type: GlycanType,
    ) -> Self {
        let composition: ThinVec<(MonoSaccharide, u16)> = composition
            .into_iter()
            .into_grouping_map()
            .fold(0_u16, |acc, _, n| acc.saturating_add(n))
            .into_iter()
            .filter(|(_, n)| *n > 0)
            .sorted()
            .collect();
        let mass = composition
            .iter()
            .map(|(sugar, n)| f64::from(*n) * sugar.mass())
            .sum();
        Self {
            name: name.into(),
            composition,
            glycan_type,
            mass,
        }
    }

    /// Parse a composition written as `(SugarName Integer)+`, for example `HexNAc2Hex5Fuc1`. The name
    /// of the composition is set to its canonical notation.
    /// # Errors
    /// If a part is not a known monosaccharide followed by a positive number.
    pub fn parse(text: &str, glycan_type: GlycanType) -> Result<Self, GlycoError> {
        let composition = parse_composition(text, 0..text.len())?;
        let notation = composition_notation(&composition);
        Ok(Self::new(notation, composition, glycan_type))
    }

    /// The name, either the registry name or the canonical notation for parsed compositions
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sorted composition
    pub fn composition(&self) -> &[(MonoSaccharide, u16)] {
        &self.composition
    }

    /// The glycan type
    pub const fn glycan_type(&self) -> GlycanType {
        self.glycan_type
    }

    /// The monoisotopic mass, the sum of all monosaccharide masses
    pub const fn mass(&self) -> f64 {
        self.mass
    }

    /// The number of the given monosaccharide in this composition
    pub fn count(&self, sugar: MonoSaccharide) -> u16 {
        self.composition
            .iter()
            .find(|(s, _)| *s == sugar)
            .map_or(0, |(_, n)| *n)
    }

    /// The total number of monosaccharides
    pub fn total(&self) -> usize {
        self.composition.iter().map(|(_, n)| usize::from(*n)).sum()
    }

    /// If every monosaccharide in `other` occurs at least as often in this composition
    pub fn contains(&self, other: &[(MonoSaccharide, u16)]) -> bool {
        other.iter().all(|(sugar, n)| self.count(*sugar) >= *n)
    }

    /// If the compositions are identical, ignoring the name and type
    pub fn same_composition(&self, other: &Self) -> bool {
        self.composition == other.composition
    }

    /// The canonical notation, e.g. `HexNAc2Hex5Fuc1`
    pub fn notation(&self) -> String {
        composition_notation(&self.composition)
    }

    /// Create a new composition with a different glycan type
    #[must_use]
    pub fn with_glycan_type(self, glycan_type: GlycanType) -> Self {
        Self {
            glycan_type,
            ..self
        }
    }

    /// Add two compositions, used when a peptide carries multiple glycans
    #[must_use]
    pub fn combine(&self, other: &Self) -> Self {
        Self::new(
            format!("{}+{}", self.name, other.name),
            self.composition
                .iter()
                .chain(other.composition.iter())
                .copied(),
            if self.glycan_type == other.glycan_type {
                self.glycan_type
            } else {
                GlycanType::OGlycan
            },
        )
    }
}

impl std::fmt::Display for GlycanComposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn composition_notation(composition: &[(MonoSaccharide, u16)]) -> String {
    composition
        .iter()
        .map(|(sugar, n)| format!("{sugar}{n}"))
        .join("")
}

/// Parse the given range of the line as a glycan composition.
pub(crate) fn parse_composition(
    line: &str,
    range: Range<usize>,
) -> Result<Vec<(MonoSaccharide, u16)>, GlycoError> {
    let end = line.len().min(range.end);
    let mut index = range.start;
    let mut output = Vec::new();
    while index < end {
        if line[index..end].starts_with(' ') {
            index += 1;
            continue;
        }
        let name_end = end_of_run(&line[..end], index, char::is_alphabetic);
        let Some((sugar, length)) = MonoSaccharide::starts_text(&line[index..name_end])
            .filter(|(_, length)| index + length == name_end)
        else {
            return Err(BoxedError::new(
                GlycoErrorKind::MalformedComposition,
                "Invalid glycan composition",
                if name_end == index {
                    "Expected a monosaccharide name".to_string()
                } else {
                    format!(
                        "This is not a known monosaccharide, use one of: {}",
                        MonoSaccharide::ALL.iter().map(|s| s.name()).join(", ")
                    )
                },
                Context::line(None, line, index, (name_end - index).max(1)).to_owned(),
            ));
        };
        index += length;
        let number_end = end_of_run(&line[..end], index, |c| c.is_ascii_digit());
        let number = line[index..number_end].parse::<u16>().map_err(|error| {
            BoxedError::new(
                GlycoErrorKind::MalformedComposition,
                "Invalid glycan composition",
                format!(
                    "The monosaccharide occurrence number {}",
                    explain_number_error(&error)
                ),
                Context::line(None, line, index - length, number_end - index + length).to_owned(),
            )
        })?;
        if number == 0 {
            return Err(BoxedError::new(
                GlycoErrorKind::MalformedComposition,
                "Invalid glycan composition",
                "The monosaccharide occurrence number has to be positive",
                Context::line(None, line, index - length, number_end - index + length).to_owned(),
            ));
        }
        output.push((sugar, number));
        index = number_end;
    }
    if output.is_empty() {
        return Err(BoxedError::new(
            GlycoErrorKind::MalformedComposition,
            "Invalid glycan composition",
            "The glycan composition is empty",
            Context::show(line.to_string()),
        ));
    }
    Ok(output)
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn sialyl_t() {
        let glycan = GlycanComposition::parse("HexNAc1Hex1NeuAc1", GlycanType::OGlycan).unwrap();
        assert!((glycan.mass() - 656.2276).abs() < 0.001);
        assert_eq!(glycan.total(), 3);
        assert_eq!(glycan.name(), "HexNAc1Hex1NeuAc1");
    }

    #[test]
    fn sorted_and_merged() {
        let glycan = GlycanComposition::parse("Fuc1Hex2HexNAc2Man3", GlycanType::NGlycan).unwrap();
        assert_eq!(glycan.notation(), "HexNAc2Hex5Fuc1");
        assert_eq!(glycan.count(MonoSaccharide::Hex), 5);
        assert_eq!(glycan.count(MonoSaccharide::NeuAc), 0);
        assert!(glycan.contains(&[(MonoSaccharide::HexNAc, 2), (MonoSaccharide::Fuc, 1)]));
        assert!(!glycan.contains(&[(MonoSaccharide::HexNAc, 3)]));
    }

    #[test]
    fn whitespace_and_case() {
        let glycan = GlycanComposition::parse("hexnac2 hex3", GlycanType::NGlycan).unwrap();
        assert!((glycan.mass() - 892.3170).abs() < 0.001);
    }

    #[test]
    fn malformed() {
        for text in [
            "", "HexNAc", "HexNAc0", "2HexNAc", "HexNAc2Glucose1", "HexNAc-1", "Hexx1", "HexNAc1Q",
        ] {
            let error = GlycanComposition::parse(text, GlycanType::OGlycan).unwrap_err();
            assert!(
                matches!(error.get_kind(), GlycoErrorKind::MalformedComposition),
                "{text}: {error}"
            );
        }
    }

    #[test]
    fn mass_recalculated_on_deserialisation() {
        let glycan = GlycanComposition::parse("HexNAc2Hex5", GlycanType::NGlycan).unwrap();
        let mut value = serde_json::to_value(&glycan).unwrap();
        value["mass"] = serde_json::json!(1.0);
        let back: GlycanComposition = serde_json::from_value(value).unwrap();
        assert_eq!(back, glycan);
        assert!((back.mass() - 1216.4229).abs() < 0.001);
    }

    #[test]
    fn glycan_type_names() {
        assert_eq!("N-glycan".parse::<GlycanType>().unwrap(), GlycanType::NGlycan);
        assert_eq!("o-glcnac".parse::<GlycanType>().unwrap(), GlycanType::OGlcNAc);
        assert!(GlycanType::OGalNAc.is_o_glycan());
        assert!("auto".parse::<GlycanType>().is_err());
    }
}
