use std::str::FromStr;

use context_error::*;
use glycore::{
    GlycoError, GlycoErrorKind,
    chemistry::{AMMONIA, TMT, WATER},
    glycan::MonoSaccharide,
};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// A neutral loss that can be applied to backbone and glycan Y ions.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum NeutralLoss {
    /// Loss of water
    Water,
    /// Loss of ammonia
    Ammonia,
    /// Loss of a full HexNAc, only on glycosylated ions
    HexNAc,
    /// Loss of a TMT labelled HexNAc, only on glycosylated ions
    HexNAcTmt,
    /// Any other loss with its name and mass
    Custom(String, OrderedFloat<f64>),
}

impl NeutralLoss {
    /// The mass that is lost
    pub fn mass(&self) -> f64 {
        match self {
            Self::Water => WATER,
            Self::Ammonia => AMMONIA,
            Self::HexNAc => MonoSaccharide::HexNAc.mass(),
            Self::HexNAcTmt => MonoSaccharide::HexNAc.mass() + TMT,
            Self::Custom(_, mass) => mass.0,
        }
    }

    /// The name as used in annotation labels
    pub fn name(&self) -> &str {
        match self {
            Self::Water => "H2O",
            Self::Ammonia => "NH3",
            Self::HexNAc => "HexNAc",
            Self::HexNAcTmt => "HexNAc_TMT",
            Self::Custom(name, _) => name,
        }
    }

    /// If this loss can only happen from an ion that still carries a HexNAc
    pub const fn requires_glycan(&self) -> bool {
        matches!(self, Self::HexNAc | Self::HexNAcTmt)
    }
}

impl std::fmt::Display for NeutralLoss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Custom(name, mass) => write!(f, "{name}:{mass}"),
            other => write!(f, "{}", other.name()),
        }
    }
}

impl FromStr for NeutralLoss {
    type Err = GlycoError;

    /// Parse a loss, either one of `H2O`, `NH3`, `HexNAc`, `HexNAc_TMT` or `name:mass`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some((name, mass)) = trimmed.split_once(':') {
            let mass = mass.trim().parse::<f64>().map_err(|error| {
                BoxedError::new(
                    GlycoErrorKind::InvalidConfiguration,
                    "Invalid neutral loss",
                    format!("The mass of a custom neutral loss should be a number: {error}"),
                    Context::line(None, s, s.len() - mass.len(), mass.len()).to_owned(),
                )
            })?;
            if !mass.is_finite() || name.trim().is_empty() {
                return Err(BoxedError::new(
                    GlycoErrorKind::InvalidConfiguration,
                    "Invalid neutral loss",
                    "A custom neutral loss needs a name and a finite mass, like `CO2:43.98983`",
                    Context::show(s.to_string()),
                ));
            }
            return Ok(Self::Custom(name.trim().to_string(), OrderedFloat(mass)));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "h2o" | "water" => Ok(Self::Water),
            "nh3" | "ammonia" => Ok(Self::Ammonia),
            "hexnac" => Ok(Self::HexNAc),
            "hexnac_tmt" | "hexnac-tmt" => Ok(Self::HexNAcTmt),
            _ => Err(BoxedError::new(
                GlycoErrorKind::UnknownKey,
                "Unknown neutral loss",
                "Use one of `H2O`, `NH3`, `HexNAc`, `HexNAc_TMT`, or define a custom loss as `name:mass`",
                Context::line(None, s, 0, s.len()).to_owned(),
            )),
        }
    }
}

impl TryFrom<String> for NeutralLoss {
    type Error = GlycoError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NeutralLoss> for String {
    fn from(value: NeutralLoss) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        assert_eq!("H2O".parse::<NeutralLoss>().unwrap(), NeutralLoss::Water);
        assert_eq!("nh3".parse::<NeutralLoss>().unwrap(), NeutralLoss::Ammonia);
        assert_eq!(
            "HexNAc_TMT".parse::<NeutralLoss>().unwrap(),
            NeutralLoss::HexNAcTmt
        );
        assert!((NeutralLoss::HexNAcTmt.mass() - 432.242305).abs() < 1e-6);
        let custom = "CO2:43.98983".parse::<NeutralLoss>().unwrap();
        assert_eq!(custom.name(), "CO2");
        assert!((custom.mass() - 43.98983).abs() < 1e-9);
        assert_eq!(custom.to_string().parse::<NeutralLoss>().unwrap(), custom);
    }

    #[test]
    fn errors() {
        assert!(matches!(
            "Phospho".parse::<NeutralLoss>().unwrap_err().get_kind(),
            GlycoErrorKind::UnknownKey
        ));
        assert!(matches!(
            "CO2:heavy".parse::<NeutralLoss>().unwrap_err().get_kind(),
            GlycoErrorKind::InvalidConfiguration
        ));
        assert!(matches!(
            ":12".parse::<NeutralLoss>().unwrap_err().get_kind(),
            GlycoErrorKind::InvalidConfiguration
        ));
    }

    #[test]
    fn serde_strings() {
        let losses: Vec<NeutralLoss> =
            serde_json::from_str(r#"["H2O", "HexNAc", "CO2:43.98983"]"#).unwrap();
        assert_eq!(losses.len(), 3);
        assert_eq!(
            serde_json::to_string(&losses[..2]).unwrap(),
            r#"["H2O","HexNAc"]"#
        );
        assert!(serde_json::from_str::<NeutralLoss>("\"Unknown\"").is_err());
    }
}
