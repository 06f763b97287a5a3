#![doc = include_str!("../README.md")]

mod helper_functions;

/// The fixed masses used in all calculations.
pub mod chemistry;
pub mod cross_link;
mod error;
pub mod glycan;
pub mod sequence;

pub use error::{GlycoError, GlycoErrorKind};

/// A subset of the types and traits that are envisioned to be used the most, importing this is a good starting point for working with the crate
pub mod prelude {
    pub use crate::cross_link::{
        CROSSLINKERS, CrossLinkedPeptides, Crosslinker, CrosslinkerStub, crosslinker_by_name,
        parse_proforma_crosslink,
    };
    pub use crate::error::{GlycoError, GlycoErrorKind};
    pub use crate::glycan::{
        GlycanComposition, GlycanType, MonoSaccharide, glycan_by_name, identify_glycan_from_mass,
    };
    pub use crate::sequence::{AminoAcid, Modification, ModificationPosition, Peptide};
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn serde_names() {
        assert_eq!(
            serde_json::to_string(&GlycanType::NGlycan).unwrap(),
            "\"N-glycan\""
        );
        let glycan: GlycanType = serde_json::from_str("\"O-GlcNAc\"").unwrap();
        assert_eq!(glycan, GlycanType::OGlcNAc);
    }

    #[test]
    fn peptide_through_json() {
        let peptide = Peptide::parse("PEPTIDEK", "N-term(TMT),8K(TMT)").unwrap();
        let text = serde_json::to_string(&peptide).unwrap();
        let back: Peptide = serde_json::from_str(&text).unwrap();
        assert_eq!(back.sequence(), peptide.sequence());
        assert_eq!(back.modifications().len(), 2);
        assert!((back.neutral_mass() - peptide.neutral_mass()).abs() < 1e-9);
    }
}
