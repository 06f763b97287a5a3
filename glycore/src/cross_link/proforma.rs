use std::sync::LazyLock;

use context_error::*;
use regex::Regex;

use crate::{
    cross_link::{Crosslinker, crosslinker_by_name},
    error::{GlycoError, GlycoErrorKind},
    sequence::{AminoAcid, Modification, ModificationPosition, Peptide},
};

/// Two peptides joined by a cross-linker, as read from a ProForma style definition.
#[derive(Clone, Debug, PartialEq)]
pub struct CrossLinkedPeptides {
    /// The first peptide
    pub alpha: Peptide,
    /// The second peptide
    pub beta: Peptide,
    /// The reagent
    pub crosslinker: &'static Crosslinker,
    /// The 1-based residue index of the link on the first peptide
    pub alpha_site: usize,
    /// The 1-based residue index of the link on the second peptide
    pub beta_site: usize,
}

static BRACKET_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]#]*)(?:#(XL[A-Za-z0-9]+))?\]").unwrap());

/// Parse a cross-linked peptide pair in ProForma notation, e.g.
/// `PEPK[DSSO#XL1]TIDE//ANOTHERK[#XL1]PEP`. Other bracketed tags are resolved as modifications,
/// like `M[Oxidation]` or `S[Glycan:HexNAc1]`.
/// # Errors
/// If the text does not contain two peptides, a tag is malformed, or the cross-linker is unknown.
pub fn parse_proforma_crosslink(text: &str) -> Result<CrossLinkedPeptides, GlycoError> {
    let Some((alpha_text, beta_text)) = text.trim().split_once("//") else {
        return Err(BoxedError::new(
            GlycoErrorKind::MalformedModification,
            "Invalid cross-linked peptide",
            "A cross-linked peptide pair should be written as `PEPTIDE//PEPTIDE`",
            Context::show(text.to_string()),
        ));
    };
    let (alpha, alpha_link) = parse_linked_peptide(alpha_text)?;
    let (beta, beta_link) = parse_linked_peptide(beta_text)?;
    let missing_site = || {
        BoxedError::new(
            GlycoErrorKind::MalformedModification,
            "Invalid cross-linked peptide",
            "Both peptides need a cross-link tag like `[DSSO#XL1]` or `[#XL1]`",
            Context::show(text.to_string()),
        )
    };
    let (alpha_site, alpha_name) = alpha_link.ok_or_else(missing_site)?;
    let (beta_site, beta_name) = beta_link.ok_or_else(missing_site)?;
    let name = alpha_name.or(beta_name).ok_or_else(|| {
        BoxedError::new(
            GlycoErrorKind::MalformedModification,
            "Invalid cross-linked peptide",
            "The cross-linker is not named, write it in one of the tags like `[DSSO#XL1]`",
            Context::show(text.to_string()),
        )
    })?;
    Ok(CrossLinkedPeptides {
        alpha,
        beta,
        crosslinker: crosslinker_by_name(&name)?,
        alpha_site,
        beta_site,
    })
}

/// Parse one side of the pair, returns the peptide and the link site with the optional reagent name.
fn parse_linked_peptide(
    text: &str,
) -> Result<(Peptide, Option<(usize, Option<String>)>), GlycoError> {
    let mut sequence = Vec::new();
    let mut modifications = Vec::new();
    let mut link = None;
    let mut index = 0;
    let mut c_terminal = false;
    while index < text.len() {
        let rest = &text[index..];
        if rest.starts_with('-') && (sequence.is_empty() || rest[1..].starts_with('[')) {
            // `[Mod]-PEP` and `PEP-[Mod]` terminal notation
            c_terminal = !sequence.is_empty();
            index += 1;
        } else if rest.starts_with('[') {
            let Some(captures) = BRACKET_TAG
                .captures(rest)
                .filter(|c| c.get(0).is_some_and(|m| m.start() == 0))
            else {
                return Err(BoxedError::new(
                    GlycoErrorKind::MalformedModification,
                    "Invalid modification tag",
                    "A tag is not closed, no closing bracket ']' could be found",
                    Context::line(None, text, index, rest.len()).to_owned(),
                ));
            };
            let whole = captures.get(0).map_or(1, |m| m.len());
            let content = captures.get(1).map_or("", |m| m.as_str()).trim();
            let position = if sequence.is_empty() {
                ModificationPosition::NTerm
            } else if c_terminal {
                ModificationPosition::CTerm
            } else {
                ModificationPosition::Index(sequence.len())
            };
            if captures.get(2).is_some() {
                if link.is_some() {
                    return Err(BoxedError::new(
                        GlycoErrorKind::MalformedModification,
                        "Invalid cross-linked peptide",
                        "Only one cross-link per peptide is supported",
                        Context::line(None, text, index, whole).to_owned(),
                    ));
                }
                let ModificationPosition::Index(site) = position else {
                    return Err(BoxedError::new(
                        GlycoErrorKind::MalformedModification,
                        "Invalid cross-linked peptide",
                        "A cross-link has to be placed on a residue",
                        Context::line(None, text, index, whole).to_owned(),
                    ));
                };
                link = Some((
                    site,
                    (!content.is_empty()).then(|| content.to_string()),
                ));
            } else {
                let label = match position {
                    ModificationPosition::Index(i) => sequence[i - 1].to_string(),
                    other => other.to_string(),
                };
                let prefix = match position {
                    ModificationPosition::Index(i) => i.to_string(),
                    _ => String::new(),
                };
                modifications.extend(Modification::parse_list(&format!(
                    "{prefix}{label}({content})"
                ))?);
            }
            index += whole;
        } else {
            let c = rest.chars().next().unwrap_or(' ');
            sequence.push(AminoAcid::try_from(c).map_err(|_| {
                BoxedError::new(
                    GlycoErrorKind::InvalidResidue,
                    "Invalid residue",
                    format!("'{c}' is not one of the 20 standard amino acids"),
                    Context::line(None, text, index, c.len_utf8()).to_owned(),
                )
            })?);
            index += c.len_utf8();
        }
    }
    Ok((Peptide::from_residues(sequence, modifications)?, link))
}
