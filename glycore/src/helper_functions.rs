use std::num::{IntErrorKind, ParseIntError};

/// Get a canonical explanation for why a number could not be parsed.
pub(crate) const fn explain_number_error(error: &ParseIntError) -> &'static str {
    match error.kind() {
        IntErrorKind::Empty => "is empty",
        IntErrorKind::InvalidDigit => "contains an invalid character",
        IntErrorKind::NegOverflow => "is too small to fit in the internal representation",
        IntErrorKind::PosOverflow => "is too big to fit in the internal representation",
        IntErrorKind::Zero => "is zero, which is not allowed here",
        _ => "is not a valid number",
    }
}

/// Check if 'a' starts with 'b' with or without ignoring casing
pub(crate) fn str_starts_with<const IGNORE_CASING: bool>(a: &str, b: &str) -> bool {
    if a.len() >= b.len() {
        for (a, b) in a.chars().zip(b.chars()) {
            if IGNORE_CASING && !a.eq_ignore_ascii_case(&b) || !IGNORE_CASING && a != b {
                return false;
            }
        }
        true
    } else {
        false
    }
}

/// Find the end of the run of characters starting at `start` that all satisfy `predicate`.
pub(crate) fn end_of_run(line: &str, start: usize, predicate: impl Fn(char) -> bool) -> usize {
    line[start..]
        .char_indices()
        .find(|(_, c)| !predicate(*c))
        .map_or(line.len(), |(i, _)| start + i)
}

#[allow(clippy::missing_panics_doc)]
#[test]
fn starts_with() {
    assert!(str_starts_with::<false>("N-term", "N-term"));
    assert!(str_starts_with::<true>("n-TERM(12)", "N-term"));
    assert!(!str_starts_with::<false>("n-term", "N-term"));
    assert!(!str_starts_with::<true>("N-ter", "N-term"));
}

#[allow(clippy::missing_panics_doc)]
#[test]
fn runs() {
    assert_eq!(end_of_run("HexNAc2Hex1", 0, char::is_alphabetic), 6);
    assert_eq!(end_of_run("HexNAc2Hex1", 6, |c| c.is_ascii_digit()), 7);
    assert_eq!(end_of_run("Hex", 0, char::is_alphabetic), 3);
}
