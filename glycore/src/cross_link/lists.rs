use std::sync::LazyLock;

use context_error::*;

use crate::{
    cross_link::{Crosslinker, CrosslinkerReporter, CrosslinkerStub},
    error::{GlycoError, GlycoErrorKind},
};

fn sulfoxide_stubs() -> Vec<CrosslinkerStub> {
    vec![
        CrosslinkerStub::new("A", "alkene", 54.0106),
        CrosslinkerStub::new("T", "thiol", 85.9826),
        CrosslinkerStub::new("S", "sulfenic", 103.9932),
    ]
}

fn sulfoxide_reporters() -> Vec<CrosslinkerReporter> {
    vec![
        CrosslinkerReporter {
            name: "reporter-104".to_string(),
            mz: 104.0170,
        },
        CrosslinkerReporter {
            name: "reporter-122".to_string(),
            mz: 122.0276,
        },
    ]
}

/// The built-in cross-linking reagents.
pub static CROSSLINKERS: LazyLock<Vec<Crosslinker>> = LazyLock::new(|| {
    let dsso = Crosslinker::try_new("DSSO", 158.0038, true, sulfoxide_stubs())
        .map(|x| {
            x.formula("C14H18N2O9S")
                .spacer_length(10.1)
                .reactive_group("NHS ester")
                .reporters(sulfoxide_reporters())
        });
    let mut dsbso_stubs = sulfoxide_stubs();
    dsbso_stubs.push(CrosslinkerStub::new("E", "ETHMP", 226.0144));
    let dsbso = Crosslinker::try_new("DSBSO", 308.0388, true, dsbso_stubs).map(|x| {
        x.spacer_length(12.5)
            .reactive_group("NHS ester")
            .reporters(sulfoxide_reporters())
    });
    let bs3 = Crosslinker::non_cleavable("BS3", 138.0681)
        .formula("C16H18N2Na2O14S2")
        .spacer_length(11.4)
        .reactive_group("sulfo-NHS ester");
    let dss = Crosslinker::non_cleavable("DSS", 138.0681)
        .formula("C16H20N2O8")
        .spacer_length(11.4)
        .reactive_group("NHS ester");
    // The cleavable definitions above all carry stubs, so they never fail
    [dsso, dsbso]
        .into_iter()
        .flatten()
        .chain([bs3, dss])
        .collect()
});

/// Look up a built-in cross-linker by name, ignoring case.
/// # Errors
/// If no cross-linker is known under this name.
pub fn crosslinker_by_name(name: &str) -> Result<&'static Crosslinker, GlycoError> {
    CROSSLINKERS
        .iter()
        .find(|x| x.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            BoxedError::new(
                GlycoErrorKind::UnknownKey,
                "Unknown cross-linker",
                format!(
                    "The cross-linker has to be one of: {}",
                    CROSSLINKERS
                        .iter()
                        .map(Crosslinker::name)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
                Context::show(name.to_string()),
            )
        })
}
