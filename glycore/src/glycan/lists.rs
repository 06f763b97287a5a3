use std::sync::LazyLock;

use context_error::*;
use regex::Regex;

use crate::{
    error::{GlycoError, GlycoErrorKind},
    glycan::{GlycanComposition, GlycanType, MonoSaccharide},
};

use MonoSaccharide::{Fuc, Hex, HexNAc, NeuAc, NeuGc, Phosphate, Sulfate};

/// A named glycan in one of the built-in registries, the aliases are alternative names for the same composition.
#[derive(Clone, Debug, PartialEq)]
pub struct RegisteredGlycan {
    /// The glycan
    pub glycan: GlycanComposition,
    /// Other names this glycan is known under
    pub aliases: &'static [&'static str],
}

impl RegisteredGlycan {
    fn new(
        name: &'static str,
        aliases: &'static [&'static str],
        composition: &[(MonoSaccharide, u16)],
        glycan_type: GlycanType,
    ) -> Self {
        Self {
            glycan: GlycanComposition::new(name, composition.iter().copied(), glycan_type),
            aliases,
        }
    }

    fn is_named(&self, name: &str) -> bool {
        self.glycan.name().eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

/// Common O-glycans, including O-GlcNAc and the mucin type cores.
pub static O_GLYCANS: LazyLock<Vec<RegisteredGlycan>> = LazyLock::new(|| {
    use GlycanType::{OGalNAc, OGlcNAc, OGlycan};
    vec![
        RegisteredGlycan::new(
            "O-GlcNAc",
            &["HexNAc1", "HexNAc"],
            &[(HexNAc, 1)],
            OGlcNAc,
        ),
        RegisteredGlycan::new("O-GalNAc", &["Tn"], &[(HexNAc, 1)], OGalNAc),
        RegisteredGlycan::new(
            "Core1",
            &["T-antigen", "HexNAc1Hex1"],
            &[(HexNAc, 1), (Hex, 1)],
            OGlycan,
        ),
        RegisteredGlycan::new("Core2", &["HexNAc2Hex1"], &[(HexNAc, 2), (Hex, 1)], OGlycan),
        RegisteredGlycan::new("Core3", &["HexNAc2"], &[(HexNAc, 2)], OGlycan),
        RegisteredGlycan::new("Core4", &["HexNAc3"], &[(HexNAc, 3)], OGlycan),
        RegisteredGlycan::new(
            "Sialyl-Tn",
            &["HexNAc1NeuAc1"],
            &[(HexNAc, 1), (NeuAc, 1)],
            OGalNAc,
        ),
        RegisteredGlycan::new(
            "Sialyl-T",
            &["HexNAc1Hex1NeuAc1"],
            &[(HexNAc, 1), (Hex, 1), (NeuAc, 1)],
            OGlycan,
        ),
        RegisteredGlycan::new(
            "Disialyl-T",
            &["HexNAc1Hex1NeuAc2"],
            &[(HexNAc, 1), (Hex, 1), (NeuAc, 2)],
            OGlycan,
        ),
        RegisteredGlycan::new("HexNAc2Hex2", &[], &[(HexNAc, 2), (Hex, 2)], OGlycan),
        RegisteredGlycan::new(
            "HexNAc2Hex1NeuAc1",
            &[],
            &[(HexNAc, 2), (Hex, 1), (NeuAc, 1)],
            OGlycan,
        ),
        RegisteredGlycan::new(
            "HexNAc2Hex2NeuAc1",
            &[],
            &[(HexNAc, 2), (Hex, 2), (NeuAc, 1)],
            OGlycan,
        ),
        RegisteredGlycan::new(
            "HexNAc2Hex2Fuc1NeuAc1",
            &[],
            &[(HexNAc, 2), (Hex, 2), (Fuc, 1), (NeuAc, 1)],
            OGlycan,
        ),
        RegisteredGlycan::new(
            "HexNAc2Hex2NeuAc2",
            &[],
            &[(HexNAc, 2), (Hex, 2), (NeuAc, 2)],
            OGlycan,
        ),
        RegisteredGlycan::new(
            "HexNAc2Hex2Fuc1NeuAc2",
            &[],
            &[(HexNAc, 2), (Hex, 2), (Fuc, 1), (NeuAc, 2)],
            OGlycan,
        ),
        RegisteredGlycan::new("HexNAc1NeuGc1", &[], &[(HexNAc, 1), (NeuGc, 1)], OGalNAc),
        RegisteredGlycan::new(
            "HexNAc1Hex1NeuGc1",
            &[],
            &[(HexNAc, 1), (Hex, 1), (NeuGc, 1)],
            OGlycan,
        ),
        RegisteredGlycan::new(
            "HexNAc1Phosphate1",
            &["HexNAc1-Phosphate"],
            &[(HexNAc, 1), (Phosphate, 1)],
            OGlycan,
        ),
        RegisteredGlycan::new(
            "HexNAc1Hex1Phosphate1",
            &["HexNAc1Hex1-Phosphate"],
            &[(HexNAc, 1), (Hex, 1), (Phosphate, 1)],
            OGlycan,
        ),
        RegisteredGlycan::new(
            "HexNAc1Sulfate1",
            &["HexNAc1-Sulfate"],
            &[(HexNAc, 1), (Sulfate, 1)],
            OGlycan,
        ),
        RegisteredGlycan::new(
            "HexNAc1Hex1Sulfate1",
            &["HexNAc1Hex1-Sulfate"],
            &[(HexNAc, 1), (Hex, 1), (Sulfate, 1)],
            OGlycan,
        ),
        RegisteredGlycan::new(
            "HexNAc2Hex1Sulfate1",
            &["HexNAc2Hex1-Sulfate"],
            &[(HexNAc, 2), (Hex, 1), (Sulfate, 1)],
            OGlycan,
        ),
    ]
});

/// Common N-glycans, the core, high mannose and complex biantennary structures.
pub static N_GLYCANS: LazyLock<Vec<RegisteredGlycan>> = LazyLock::new(|| {
    use GlycanType::NGlycan;
    vec![
        RegisteredGlycan::new("Core", &["HexNAc2Hex3"], &[(HexNAc, 2), (Hex, 3)], NGlycan),
        RegisteredGlycan::new("Man5", &["HexNAc2Hex5"], &[(HexNAc, 2), (Hex, 5)], NGlycan),
        RegisteredGlycan::new("Man6", &["HexNAc2Hex6"], &[(HexNAc, 2), (Hex, 6)], NGlycan),
        RegisteredGlycan::new("Man7", &["HexNAc2Hex7"], &[(HexNAc, 2), (Hex, 7)], NGlycan),
        RegisteredGlycan::new("Man8", &["HexNAc2Hex8"], &[(HexNAc, 2), (Hex, 8)], NGlycan),
        RegisteredGlycan::new("Man9", &["HexNAc2Hex9"], &[(HexNAc, 2), (Hex, 9)], NGlycan),
        RegisteredGlycan::new(
            "A2G2",
            &["A2", "HexNAc4Hex5"],
            &[(HexNAc, 4), (Hex, 5)],
            NGlycan,
        ),
        RegisteredGlycan::new(
            "A2G2F",
            &["A2F", "HexNAc4Hex5Fuc1"],
            &[(HexNAc, 4), (Hex, 5), (Fuc, 1)],
            NGlycan,
        ),
        RegisteredGlycan::new(
            "A2G2S1",
            &["HexNAc4Hex5NeuAc1"],
            &[(HexNAc, 4), (Hex, 5), (NeuAc, 1)],
            NGlycan,
        ),
        RegisteredGlycan::new(
            "A2G2S2",
            &["HexNAc4Hex5NeuAc2"],
            &[(HexNAc, 4), (Hex, 5), (NeuAc, 2)],
            NGlycan,
        ),
        RegisteredGlycan::new(
            "A2G2FS1",
            &["HexNAc4Hex5Fuc1NeuAc1"],
            &[(HexNAc, 4), (Hex, 5), (Fuc, 1), (NeuAc, 1)],
            NGlycan,
        ),
        RegisteredGlycan::new(
            "A2G2FS2",
            &["HexNAc4Hex5Fuc1NeuAc2"],
            &[(HexNAc, 4), (Hex, 5), (Fuc, 1), (NeuAc, 2)],
            NGlycan,
        ),
    ]
});

/// Iterate over all registered glycans, O-glycans first.
pub fn all_glycans() -> impl Iterator<Item = &'static RegisteredGlycan> {
    O_GLYCANS.iter().chain(N_GLYCANS.iter())
}

/// Look up a registered glycan by name or alias, ignoring case.
/// # Errors
/// If no glycan is known under this name.
pub fn glycan_by_name(name: &str) -> Result<&'static GlycanComposition, GlycoError> {
    all_glycans()
        .find(|g| g.is_named(name))
        .map(|g| &g.glycan)
        .ok_or_else(|| {
            BoxedError::new(
                GlycoErrorKind::UnknownKey,
                "Unknown glycan",
                "This name is not a registered O-glycan or N-glycan",
                Context::show(name.to_string()),
            )
        })
}

/// Find the first registered glycan with exactly this composition, optionally limited to one glycan type.
pub fn find_by_composition(
    composition: &GlycanComposition,
    glycan_type: Option<GlycanType>,
) -> Option<&'static GlycanComposition> {
    all_glycans()
        .map(|g| &g.glycan)
        .filter(|g| glycan_type.is_none_or(|t| g.glycan_type() == t))
        .find(|g| g.same_composition(composition))
}

/// Find all registered glycans within the given tolerance (in Dalton) of the mass, sorted on
/// increasing absolute error. The filter limits the search to one class of glycans.
pub fn identify_glycan_from_mass(
    mass: f64,
    tolerance: f64,
    filter: Option<GlycanType>,
) -> Vec<(&'static GlycanComposition, f64)> {
    let mut found: Vec<_> = all_glycans()
        .map(|g| &g.glycan)
        .filter(|g| {
            filter.is_none_or(|t| {
                g.glycan_type() == t || (t == GlycanType::OGlycan && g.glycan_type().is_o_glycan())
            })
        })
        .map(|g| (g, (g.mass() - mass).abs()))
        .filter(|(_, error)| *error <= tolerance)
        .collect();
    found.sort_by(|a, b| a.1.total_cmp(&b.1));
    found
}

static PROFORMA_GLYCAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[?(?i:glycan):([A-Za-z0-9 ]+)\]?$").unwrap());

/// Parse a ProForma style glycan composition `[Glycan:HexNAc1Hex1]`.
/// # Errors
/// If the text is not a glycan tag or the composition is malformed.
pub fn parse_proforma_glycan(
    text: &str,
    glycan_type: GlycanType,
) -> Result<GlycanComposition, GlycoError> {
    let composition = PROFORMA_GLYCAN
        .captures(text.trim())
        .and_then(|c| c.get(1))
        .ok_or_else(|| {
            BoxedError::new(
                GlycoErrorKind::MalformedComposition,
                "Invalid ProForma glycan",
                "A ProForma glycan should be written as `[Glycan:HexNAc1Hex1]`",
                Context::show(text.to_string()),
            )
        })?;
    GlycanComposition::parse(composition.as_str(), glycan_type)
}
