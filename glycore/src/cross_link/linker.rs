use context_error::*;
use serde::{Deserialize, Serialize};

use crate::error::{GlycoError, GlycoErrorKind};

/// A stub left on a peptide after MS-cleavage of a cleavable cross-linker.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CrosslinkerStub {
    /// Short label used in annotations, e.g. `A`
    pub label: String,
    /// Descriptive name, e.g. `alkene`
    pub name: String,
    /// The mass added to the peptide
    pub mass: f64,
}

impl CrosslinkerStub {
    /// Create a new stub
    pub fn new(label: impl Into<String>, name: impl Into<String>, mass: f64) -> Self {
        Self {
            label: label.into(),
            name: name.into(),
            mass,
        }
    }
}

/// A reporter ion released from the cross-linker itself, always charge 1.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CrosslinkerReporter {
    /// The name used in annotations
    pub name: String,
    /// The m/z at charge 1
    pub mz: f64,
}

/// A chemical cross-linking reagent. Only cleavable reagents have stubs, this is checked on
/// construction and when deserialising.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "CrosslinkerFields")]
pub struct Crosslinker {
    name: String,
    formula: String,
    intact_mass: f64,
    spacer_length: f64,
    reactive_group: String,
    cleavable: bool,
    stubs: Vec<CrosslinkerStub>,
    reporters: Vec<CrosslinkerReporter>,
}

#[derive(Debug, Deserialize)]
struct CrosslinkerFields {
    name: String,
    #[serde(default)]
    formula: String,
    intact_mass: f64,
    #[serde(default)]
    spacer_length: f64,
    #[serde(default)]
    reactive_group: String,
    cleavable: bool,
    #[serde(default)]
    stubs: Vec<CrosslinkerStub>,
    #[serde(default)]
    reporters: Vec<CrosslinkerReporter>,
}

impl TryFrom<CrosslinkerFields> for Crosslinker {
    type Error = GlycoError;
    fn try_from(value: CrosslinkerFields) -> Result<Self, Self::Error> {
        Ok(
            Self::try_new(value.name, value.intact_mass, value.cleavable, value.stubs)?
                .formula(value.formula)
                .spacer_length(value.spacer_length)
                .reactive_group(value.reactive_group)
                .reporters(value.reporters),
        )
    }
}

impl Crosslinker {
    /// Create a non-cleavable cross-linker.
    pub fn non_cleavable(name: impl Into<String>, intact_mass: f64) -> Self {
        Self {
            name: name.into(),
            formula: String::new(),
            intact_mass,
            spacer_length: 0.0,
            reactive_group: String::new(),
            cleavable: false,
            stubs: Vec::new(),
            reporters: Vec::new(),
        }
    }

    /// Create a cleavable cross-linker.
    /// # Errors
    /// If no stubs are given, a cleavable reagent has to leave at least one stub.
    pub fn cleavable(
        name: impl Into<String>,
        intact_mass: f64,
        stubs: Vec<CrosslinkerStub>,
    ) -> Result<Self, GlycoError> {
        let name = name.into();
        if stubs.is_empty() {
            return Err(BoxedError::new(
                GlycoErrorKind::InvalidConfiguration,
                "Invalid cross-linker",
                "A cleavable cross-linker needs at least one stub mass",
                Context::show(name),
            ));
        }
        Ok(Self {
            name,
            formula: String::new(),
            intact_mass,
            spacer_length: 0.0,
            reactive_group: String::new(),
            cleavable: true,
            stubs,
            reporters: Vec::new(),
        })
    }

    /// Create a cross-linker from all its parts, checking that only cleavable reagents have stubs.
    /// # Errors
    /// If a non-cleavable reagent is given stubs or a cleavable one is given none.
    pub fn try_new(
        name: impl Into<String>,
        intact_mass: f64,
        cleavable: bool,
        stubs: Vec<CrosslinkerStub>,
    ) -> Result<Self, GlycoError> {
        if cleavable {
            Self::cleavable(name, intact_mass, stubs)
        } else if stubs.is_empty() {
            Ok(Self::non_cleavable(name, intact_mass))
        } else {
            Err(BoxedError::new(
                GlycoErrorKind::InvalidConfiguration,
                "Invalid cross-linker",
                "A non-cleavable cross-linker cannot have stub masses",
                Context::show(name.into()),
            ))
        }
    }

    /// Set the molecular formula
    #[must_use]
    pub fn formula(self, formula: impl Into<String>) -> Self {
        Self {
            formula: formula.into(),
            ..self
        }
    }

    /// Set the spacer arm length in Ångström
    #[must_use]
    pub fn spacer_length(self, spacer_length: f64) -> Self {
        Self {
            spacer_length,
            ..self
        }
    }

    /// Set the reactive group
    #[must_use]
    pub fn reactive_group(self, reactive_group: impl Into<String>) -> Self {
        Self {
            reactive_group: reactive_group.into(),
            ..self
        }
    }

    /// Set the reporter ions
    #[must_use]
    pub fn reporters(self, reporters: Vec<CrosslinkerReporter>) -> Self {
        Self { reporters, ..self }
    }

    /// The name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The molecular formula, empty if unknown
    pub fn get_formula(&self) -> &str {
        &self.formula
    }

    /// The mass added when the reagent links two peptides
    pub const fn intact_mass(&self) -> f64 {
        self.intact_mass
    }

    /// The spacer arm length in Ångström, zero if unknown
    pub const fn get_spacer_length(&self) -> f64 {
        self.spacer_length
    }

    /// The reactive group, empty if unknown
    pub fn get_reactive_group(&self) -> &str {
        &self.reactive_group
    }

    /// If the reagent can be cleaved in the mass spectrometer
    pub const fn is_cleavable(&self) -> bool {
        self.cleavable
    }

    /// The stubs, always empty for non-cleavable reagents
    pub fn stubs(&self) -> &[CrosslinkerStub] {
        &self.stubs
    }

    /// The reporter ions
    pub fn get_reporters(&self) -> &[CrosslinkerReporter] {
        &self.reporters
    }

    /// Find the stubs that explain an observed neutral mass on top of the given peptide mass, within
    /// the tolerance in Dalton. Returns the stub and the absolute error, sorted on error.
    pub fn identify_stubs(
        &self,
        observed_mass: f64,
        peptide_mass: f64,
        tolerance: f64,
    ) -> Vec<(&CrosslinkerStub, f64)> {
        let mut found: Vec<_> = self
            .stubs
            .iter()
            .map(|stub| (stub, (peptide_mass + stub.mass - observed_mass).abs()))
            .filter(|(_, error)| *error <= tolerance)
            .collect();
        found.sort_by(|a, b| a.1.total_cmp(&b.1));
        found
    }
}

impl std::fmt::Display for Crosslinker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn stub_invariant() {
        let error = Crosslinker::try_new(
            "Wrong",
            100.0,
            false,
            vec![CrosslinkerStub::new("A", "alkene", 54.01)],
        )
        .unwrap_err();
        assert!(matches!(
            error.get_kind(),
            GlycoErrorKind::InvalidConfiguration
        ));
        assert!(Crosslinker::try_new("Empty", 100.0, true, Vec::new()).is_err());
        assert!(
            Crosslinker::try_new("BS3-like", 138.0681, false, Vec::new())
                .unwrap()
                .stubs()
                .is_empty()
        );
    }

    #[test]
    fn checked_deserialisation() {
        assert!(
            serde_json::from_str::<Crosslinker>(
                r#"{"name": "Wrong", "intact_mass": 100.0, "cleavable": false,
                    "stubs": [{"label": "A", "name": "alkene", "mass": 54.01}]}"#,
            )
            .is_err()
        );
        assert!(
            serde_json::from_str::<Crosslinker>(
                r#"{"name": "Empty", "intact_mass": 100.0, "cleavable": true}"#
            )
            .is_err()
        );
        let linker = Crosslinker::cleavable(
            "Test",
            158.0,
            vec![CrosslinkerStub::new("A", "alkene", 54.0106)],
        )
        .unwrap()
        .formula("C6H6O3S")
        .spacer_length(10.1);
        let text = serde_json::to_string(&linker).unwrap();
        assert_eq!(serde_json::from_str::<Crosslinker>(&text).unwrap(), linker);
    }

    #[test]
    fn identify() {
        let linker = Crosslinker::cleavable(
            "Test",
            158.0,
            vec![
                CrosslinkerStub::new("A", "alkene", 54.0106),
                CrosslinkerStub::new("T", "thiol", 85.9826),
            ],
        )
        .unwrap();
        let found = linker.identify_stubs(1085.98, 1000.0, 0.01);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0.label, "T");
        assert!(linker.identify_stubs(1070.0, 1000.0, 0.01).is_empty());
    }
}
