use serde::{Deserialize, Serialize};

use crate::glycan::{GlycanComposition, MonoSaccharide};

use MonoSaccharide::{Fuc, Hex, HexNAc, NeuAc};

/// Which part of the library an oxonium ion belongs to.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum OxoniumClass {
    /// Always considered
    Base,
    /// Cross-ring and internal-loss ions, mostly informative for N-glycans
    Extended,
    /// Only formed when the glycan carries a TMT tag
    Tmt,
}

/// A diagnostic glycan ion, the m/z is the singly protonated ion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OxoniumIon {
    /// The name used in annotations
    pub name: &'static str,
    /// The m/z at charge 1
    pub mz: f64,
    /// The monosaccharides needed to form this ion
    pub requires: &'static [(MonoSaccharide, u16)],
    /// The library section
    pub class: OxoniumClass,
}

impl OxoniumIon {
    const fn new(
        name: &'static str,
        mz: f64,
        requires: &'static [(MonoSaccharide, u16)],
        class: OxoniumClass,
    ) -> Self {
        Self {
            name,
            mz,
            requires,
            class,
        }
    }
}

/// All known oxonium ions.
pub const OXONIUM_IONS: &[OxoniumIon] = &[
    OxoniumIon::new("HexNAc", 204.0867, &[(HexNAc, 1)], OxoniumClass::Base),
    OxoniumIon::new("HexNAc-H2O", 186.0761, &[(HexNAc, 1)], OxoniumClass::Base),
    OxoniumIon::new("HexNAc-2H2O", 168.0655, &[(HexNAc, 1)], OxoniumClass::Base),
    OxoniumIon::new("HexNAc-138", 138.0550, &[(HexNAc, 1)], OxoniumClass::Base),
    OxoniumIon::new("HexNAc-126", 126.0550, &[(HexNAc, 1)], OxoniumClass::Base),
    OxoniumIon::new("Hex", 163.0601, &[(Hex, 1)], OxoniumClass::Base),
    OxoniumIon::new("Hex-H2O", 145.0495, &[(Hex, 1)], OxoniumClass::Base),
    OxoniumIon::new("NeuAc", 292.1027, &[(NeuAc, 1)], OxoniumClass::Base),
    OxoniumIon::new("NeuAc-H2O", 274.0921, &[(NeuAc, 1)], OxoniumClass::Base),
    OxoniumIon::new("Fuc", 147.0652, &[(Fuc, 1)], OxoniumClass::Base),
    OxoniumIon::new(
        "HexNAc-Hex",
        366.1395,
        &[(HexNAc, 1), (Hex, 1)],
        OxoniumClass::Base,
    ),
    OxoniumIon::new(
        "HexNAc-Hex-H2O",
        348.1289,
        &[(HexNAc, 1), (Hex, 1)],
        OxoniumClass::Base,
    ),
    OxoniumIon::new(
        "HexNAc-NeuAc",
        495.1821,
        &[(HexNAc, 1), (NeuAc, 1)],
        OxoniumClass::Base,
    ),
    OxoniumIon::new(
        "HexNAc-Hex-NeuAc",
        657.2349,
        &[(HexNAc, 1), (Hex, 1), (NeuAc, 1)],
        OxoniumClass::Base,
    ),
    OxoniumIon::new("HexNAc-CH2O", 174.0761, &[(HexNAc, 1)], OxoniumClass::Extended),
    OxoniumIon::new("HexNAc-C2H4O2", 144.0655, &[(HexNAc, 1)], OxoniumClass::Extended),
    OxoniumIon::new("Hex-2H2O", 127.0390, &[(Hex, 1)], OxoniumClass::Extended),
    OxoniumIon::new("NeuAc-2H2O", 256.0816, &[(NeuAc, 1)], OxoniumClass::Extended),
    OxoniumIon::new("NeuAc-CO2", 248.1129, &[(NeuAc, 1)], OxoniumClass::Extended),
    OxoniumIon::new("NeuAc-CH4O2", 260.0765, &[(NeuAc, 1)], OxoniumClass::Extended),
    OxoniumIon::new("Fuc-H2O", 129.0546, &[(Fuc, 1)], OxoniumClass::Extended),
    OxoniumIon::new("HexNAc-HexNAc", 407.1660, &[(HexNAc, 2)], OxoniumClass::Extended),
    OxoniumIon::new("Hex-Hex", 325.1129, &[(Hex, 2)], OxoniumClass::Extended),
    OxoniumIon::new(
        "Hex-NeuAc",
        454.1556,
        &[(Hex, 1), (NeuAc, 1)],
        OxoniumClass::Extended,
    ),
    OxoniumIon::new(
        "HexNAc-Hex-Hex",
        528.1923,
        &[(HexNAc, 1), (Hex, 2)],
        OxoniumClass::Extended,
    ),
    OxoniumIon::new("HexNAc-TMT", 529.2937, &[(HexNAc, 1)], OxoniumClass::Tmt),
    OxoniumIon::new("HexNAc-H2O-TMT", 511.2831, &[(HexNAc, 1)], OxoniumClass::Tmt),
];

/// Select the oxonium ions that can be formed from the given glycan.
pub fn oxonium_ions_for(
    glycan: &GlycanComposition,
    extended: bool,
    tmt: bool,
) -> impl Iterator<Item = &'static OxoniumIon> {
    OXONIUM_IONS.iter().filter(move |ion| {
        (match ion.class {
            OxoniumClass::Base => true,
            OxoniumClass::Extended => extended,
            OxoniumClass::Tmt => tmt,
        }) && glycan.contains(ion.requires)
    })
}
