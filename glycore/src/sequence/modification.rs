use context_error::*;
use serde::{Deserialize, Serialize};

use crate::{
    error::{GlycoError, GlycoErrorKind},
    glycan::{
        GlycanComposition, GlycanType, MonoSaccharide, find_by_composition, glycan_by_name,
        parse_proforma_glycan,
    },
    helper_functions::{end_of_run, explain_number_error, str_starts_with},
    sequence::AminoAcid,
};

/// Commonly used modifications that can be referred to by name in modification strings.
pub const KNOWN_MODIFICATIONS: &[(&str, f64)] = &[
    ("TMT", 229.162932),
    ("TMTpro", 304.207146),
    ("Carbamidomethyl", 57.021464),
    ("Oxidation", 15.994915),
    ("Phospho", 79.966331),
    ("Acetyl", 42.010565),
    ("Methyl", 14.01565),
    ("Deamidated", 0.984016),
];

/// Look up the mass of a commonly used modification by name, ignoring case.
/// # Errors
/// If the modification is not known.
pub fn known_modification_mass(name: &str) -> Result<f64, GlycoError> {
    KNOWN_MODIFICATIONS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, m)| *m)
        .ok_or_else(|| {
            BoxedError::new(
                GlycoErrorKind::UnknownKey,
                "Unknown modification",
                "This is not a known modification name, glycan name, or glycan composition",
                Context::show(name.to_string()),
            )
        })
}

/// A position on a peptide
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum ModificationPosition {
    /// N-terminal
    NTerm,
    /// The residue at this 1-based index
    Index(usize),
    /// C-terminal
    CTerm,
}

impl std::fmt::Display for ModificationPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NTerm => write!(f, "N-term"),
            Self::Index(index) => write!(f, "{index}"),
            Self::CTerm => write!(f, "C-term"),
        }
    }
}

/// A mass modification on a peptide. If a glycan is attached the modification is a glycosylation
/// site, any mass on top of the glycan mass is seen as a tag on the glycan.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Modification {
    position: ModificationPosition,
    label: String,
    mass_delta: f64,
    glycan: Option<GlycanComposition>,
}

impl Modification {
    /// Create a new mass modification, the label is only used in annotations.
    pub fn new(position: ModificationPosition, label: impl Into<String>, mass_delta: f64) -> Self {
        Self {
            position,
            label: label.into(),
            mass_delta,
            glycan: None,
        }
    }

    /// Create a new glycosylation with the mass of the glycan.
    pub fn glycan(
        position: ModificationPosition,
        label: impl Into<String>,
        glycan: GlycanComposition,
    ) -> Self {
        Self {
            position,
            label: label.into(),
            mass_delta: glycan.mass(),
            glycan: Some(glycan),
        }
    }

    /// Create a new glycosylation with an explicit mass, the difference with the glycan mass is a
    /// tag that is lost together with the glycan.
    pub fn tagged_glycan(
        position: ModificationPosition,
        label: impl Into<String>,
        mass_delta: f64,
        glycan: GlycanComposition,
    ) -> Self {
        Self {
            position,
            label: label.into(),
            mass_delta,
            glycan: Some(glycan),
        }
    }

    /// The position
    pub const fn position(&self) -> ModificationPosition {
        self.position
    }

    /// The label, the residue or terminus this modification is placed on
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The mass difference this modification causes
    pub const fn mass_delta(&self) -> f64 {
        self.mass_delta
    }

    /// The glycan, if this is a glycosylation
    pub const fn get_glycan(&self) -> Option<&GlycanComposition> {
        self.glycan.as_ref()
    }

    /// The mass on top of the glycan mass, zero for non glycan modifications
    pub fn glycan_tag_mass(&self) -> f64 {
        self.glycan
            .as_ref()
            .map_or(0.0, |g| self.mass_delta - g.mass())
    }

    /// Set a different glycan type on the attached glycan
    #[must_use]
    pub fn with_glycan_type(self, glycan_type: GlycanType) -> Self {
        Self {
            glycan: self.glycan.map(|g| g.with_glycan_type(glycan_type)),
            ..self
        }
    }

    /// Parse a comma separated list of modifications, e.g. `N-term(229.1629),4S(528.2859),17K(TMT)`.
    /// The value between the brackets can be a mass, `mass:Composition` for a tagged glycan, a known
    /// modification name, a glycan name, a glycan composition, or `[Glycan:Composition]`.
    /// # Errors
    /// If any of the modifications is malformed or its value cannot be resolved.
    pub fn parse_list(text: &str) -> Result<Vec<Self>, GlycoError> {
        let mut output = Vec::new();
        let mut offset = 0;
        for token in text.split(',') {
            let start = offset + token.len() - token.trim_start().len();
            let trimmed = token.trim();
            if !trimmed.is_empty() {
                output.push(Self::parse_token(text, start, trimmed)?);
            }
            offset += token.len() + 1;
        }
        Ok(output)
    }

    fn parse_token(line: &str, start: usize, token: &str) -> Result<Self, GlycoError> {
        let malformed = |explanation: String, from: usize, length: usize| {
            BoxedError::new(
                GlycoErrorKind::MalformedModification,
                "Invalid modification",
                explanation,
                Context::line(None, line, start + from, length.max(1)).to_owned(),
            )
        };
        let Some(open) = token.find('(') else {
            return Err(malformed(
                "A modification should be written as `<position><residue>(<value>)`".to_string(),
                0,
                token.len(),
            ));
        };
        if !token.ends_with(')') {
            return Err(malformed(
                "The modification value is not closed, no closing bracket ')' could be found"
                    .to_string(),
                open,
                token.len() - open,
            ));
        }
        let head = token[..open].trim();
        let value = &token[open + 1..token.len() - 1];

        let (position, label) = if str_starts_with::<true>(head, "N-term") && head.len() == 6 {
            (ModificationPosition::NTerm, "N-term".to_string())
        } else if str_starts_with::<true>(head, "C-term") && head.len() == 6 {
            (ModificationPosition::CTerm, "C-term".to_string())
        } else {
            let digits = end_of_run(head, 0, |c| c.is_ascii_digit());
            let index = head[..digits].parse::<usize>().map_err(|error| {
                malformed(
                    format!("The modification position {}", explain_number_error(&error)),
                    0,
                    open,
                )
            })?;
            let label = head[digits..].trim();
            if label.chars().count() > 1 {
                return Err(malformed(
                    "The modified residue should be a single amino acid".to_string(),
                    digits,
                    open - digits,
                ));
            }
            (ModificationPosition::Index(index), label.to_string())
        };

        let residue = label
            .chars()
            .next()
            .and_then(|c| AminoAcid::try_from(c).ok());
        Self::resolve_value(value.trim(), position, label, residue)
    }

    fn resolve_value(
        value: &str,
        position: ModificationPosition,
        label: String,
        residue: Option<AminoAcid>,
    ) -> Result<Self, GlycoError> {
        if let Ok(mass) = value.parse::<f64>() {
            return Ok(Self::new(position, label, finite_mass(mass, value)?));
        }
        if let Some((mass, composition)) = value.split_once(':') {
            if let Ok(mass) = mass.trim().parse::<f64>() {
                let mass = finite_mass(mass, value)?;
                let glycan = glycan_with_type(
                    GlycanComposition::parse(composition.trim(), GlycanType::OGlycan)?,
                    residue,
                );
                return Ok(Self::tagged_glycan(position, label, mass, glycan));
            }
        }
        if value.starts_with('[') || str_starts_with::<true>(value, "glycan:") {
            let glycan = glycan_with_type(
                parse_proforma_glycan(value, GlycanType::OGlycan)?,
                residue,
            );
            return Ok(Self::glycan(position, label, glycan));
        }
        if let Ok(mass) = known_modification_mass(value) {
            return Ok(Self::new(position, label, mass));
        }
        if let Ok(glycan) = glycan_by_name(value) {
            return Ok(Self::glycan(position, label, glycan.clone()));
        }
        if let Ok(composition) = GlycanComposition::parse(value, GlycanType::OGlycan) {
            return Ok(Self::glycan(
                position,
                label,
                glycan_with_type(composition, residue),
            ));
        }
        Err(BoxedError::new(
            GlycoErrorKind::UnknownKey,
            "Unknown modification",
            "This is not a mass, a known modification name, a glycan name, or a glycan composition",
            Context::show(value.to_string()),
        ))
    }
}

/// `NaN` and `inf` parse as numbers but are not masses
fn finite_mass(mass: f64, value: &str) -> Result<f64, GlycoError> {
    if mass.is_finite() {
        Ok(mass)
    } else {
        Err(BoxedError::new(
            GlycoErrorKind::MalformedModification,
            "Invalid modification",
            "The mass of a modification should be a finite number",
            Context::show(value.to_string()),
        ))
    }
}

/// Assign the glycan type of the registered glycan with the same composition, or otherwise guess
/// it from the attachment residue.
fn glycan_with_type(glycan: GlycanComposition, residue: Option<AminoAcid>) -> GlycanComposition {
    let glycan_type = find_by_composition(&glycan, None).map_or_else(
        || {
            let guess = if residue == Some(AminoAcid::Asparagine) {
                GlycanType::NGlycan
            } else if glycan.composition() == [(MonoSaccharide::HexNAc, 1)] {
                GlycanType::OGlcNAc
            } else {
                GlycanType::OGlycan
            };
            log::debug!(
                "Glycan {} is not registered, assuming {guess} based on the attachment residue",
                glycan.notation()
            );
            guess
        },
        GlycanComposition::glycan_type,
    );
    glycan.with_glycan_type(glycan_type)
}

impl std::fmt::Display for Modification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position {
            ModificationPosition::Index(i) => write!(f, "{i}{}", self.label)?,
            terminal => write!(f, "{terminal}")?,
        }
        match &self.glycan {
            Some(glycan) if self.glycan_tag_mass().abs() > 1e-6 => {
                write!(f, "({}:{})", self.mass_delta, glycan.notation())
            }
            Some(glycan) => write!(f, "({})", glycan.notation()),
            None => write!(f, "({})", self.mass_delta),
        }
    }
}
