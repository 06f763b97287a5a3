use std::sync::LazyLock;

use context_error::*;
use serde::{Deserialize, Serialize};

use crate::{
    error::{GlycoError, GlycoErrorKind},
    helper_functions::str_starts_with,
};

/// A monosaccharide (or glycan substituent) that can be part of a glycan composition. The order of
/// the variants is the order in which compositions are written.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum MonoSaccharide {
    /// N-acetylhexosamine (GlcNAc, GalNAc)
    HexNAc,
    /// Hexose (Man, Glc, Gal)
    Hex,
    /// Deoxyhexose, fucose
    Fuc,
    /// N-acetylneuraminic acid, the common sialic acid
    NeuAc,
    /// N-glycolylneuraminic acid
    NeuGc,
    /// Pentose, xylose
    Xyl,
    /// Hexuronic acid
    HexA,
    /// Deaminated neuraminic acid
    Kdn,
    /// Sulfate substituent
    Sulfate,
    /// Phosphate substituent
    Phosphate,
}

/// All names that are recognised for monosaccharides, the canonical name is listed first for
/// every sugar.
pub(crate) static MONOSACCHARIDE_PARSE_LIST: LazyLock<Vec<(&'static str, MonoSaccharide)>> =
    LazyLock::new(|| {
        let mut list = vec![
            ("HexNAc", MonoSaccharide::HexNAc),
            ("GlcNAc", MonoSaccharide::HexNAc),
            ("GalNAc", MonoSaccharide::HexNAc),
            ("Hex", MonoSaccharide::Hex),
            ("Man", MonoSaccharide::Hex),
            ("Glc", MonoSaccharide::Hex),
            ("Gal", MonoSaccharide::Hex),
            ("Fuc", MonoSaccharide::Fuc),
            ("dHex", MonoSaccharide::Fuc),
            ("NeuAc", MonoSaccharide::NeuAc),
            ("Sia", MonoSaccharide::NeuAc),
            ("NeuGc", MonoSaccharide::NeuGc),
            ("Xyl", MonoSaccharide::Xyl),
            ("Pent", MonoSaccharide::Xyl),
            ("HexA", MonoSaccharide::HexA),
            ("Kdn", MonoSaccharide::Kdn),
            ("Sulfate", MonoSaccharide::Sulfate),
            ("Sulf", MonoSaccharide::Sulfate),
            ("Phosphate", MonoSaccharide::Phosphate),
            ("Phos", MonoSaccharide::Phosphate),
        ];
        // Longest names first, so prefix searches never stop at `Hex` for `HexNAc`
        list.sort_by_key(|(name, _)| std::cmp::Reverse(name.len()));
        list
    });

impl MonoSaccharide {
    /// All monosaccharides in canonical order
    pub const ALL: &'static [Self] = &[
        Self::HexNAc,
        Self::Hex,
        Self::Fuc,
        Self::NeuAc,
        Self::NeuGc,
        Self::Xyl,
        Self::HexA,
        Self::Kdn,
        Self::Sulfate,
        Self::Phosphate,
    ];

    /// The monoisotopic mass of this unit as part of a glycan (the free sugar minus water).
    pub const fn mass(self) -> f64 {
        match self {
            Self::HexNAc => 203.079373,
            Self::Hex => 162.052824,
            Self::Fuc => 146.057909,
            Self::NeuAc => 291.095417,
            Self::NeuGc => 307.090331,
            Self::Xyl => 132.042259,
            Self::HexA => 176.032088,
            Self::Kdn => 250.068996,
            Self::Sulfate => 79.956815,
            Self::Phosphate => 79.966331,
        }
    }

    /// The canonical name
    pub const fn name(self) -> &'static str {
        match self {
            Self::HexNAc => "HexNAc",
            Self::Hex => "Hex",
            Self::Fuc => "Fuc",
            Self::NeuAc => "NeuAc",
            Self::NeuGc => "NeuGc",
            Self::Xyl => "Xyl",
            Self::HexA => "HexA",
            Self::Kdn => "Kdn",
            Self::Sulfate => "Sulfate",
            Self::Phosphate => "Phosphate",
        }
    }

    /// Look up a monosaccharide by its canonical name or any of its aliases, ignoring case.
    /// # Errors
    /// If the name is not known.
    pub fn from_name(name: &str) -> Result<Self, GlycoError> {
        MONOSACCHARIDE_PARSE_LIST
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, s)| *s)
            .ok_or_else(|| {
                BoxedError::new(
                    GlycoErrorKind::UnknownKey,
                    "Unknown monosaccharide",
                    format!(
                        "The monosaccharide has to be one of: {}",
                        Self::ALL.iter().map(|s| s.name()).collect::<Vec<_>>().join(", ")
                    ),
                    Context::show(name.to_string()),
                )
            })
    }

    /// Find the monosaccharide whose name (or alias) is at the start of the given text, returns the
    /// sugar and the length of the matched name.
    pub(crate) fn starts_text(text: &str) -> Option<(Self, usize)> {
        MONOSACCHARIDE_PARSE_LIST
            .iter()
            .find(|(name, _)| str_starts_with::<true>(text, name))
            .map(|(name, sugar)| (*sugar, name.len()))
    }
}

impl std::fmt::Display for MonoSaccharide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
