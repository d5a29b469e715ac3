//! UK postcode validation.

use std::sync::LazyLock;

use regex::Regex;

/// Full-format UK postcode grammar, matched against upper-cased input.
///
/// The outward code follows the positional letter rules (no Q, V or X in
/// the first position, no I, J or Z in the second). The inward code is a
/// digit followed by two letters, never C, I, K, M, O or V.
static POSTCODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:GIR 0AA|(?:[A-PR-UWYZ][0-9]{1,2}|[A-PR-UWYZ][A-HK-Y][0-9]{1,2}|[A-PR-UWYZ][0-9][A-HJKPSTUW]|[A-PR-UWYZ][A-HK-Y][0-9][ABEHMNPRVWXY]) [0-9][ABD-HJLNP-UW-Z]{2})$",
    )
    .expect("postcode pattern is a valid regex")
});

/// Returns true if `token` is a full UK postcode.
///
/// Matching is case-insensitive and purely lexical: the postcode is not
/// checked for existence. Exactly one space must separate the outward and
/// inward codes, so `"SW1A1AA"` is rejected, as is a bare outward code
/// such as `"SW1"`.
///
/// # Examples
///
/// ```
/// use postcode_directions::domain::is_valid_postcode;
///
/// assert!(is_valid_postcode("SW1A 1AA"));
/// assert!(is_valid_postcode("gir 0aa"));
/// assert!(!is_valid_postcode("SW1A1AA"));
/// assert!(!is_valid_postcode("12345"));
/// ```
pub fn is_valid_postcode(token: &str) -> bool {
    POSTCODE_PATTERN.is_match(&token.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_full_postcodes() {
        assert!(is_valid_postcode("SW1A 1AA"));
        assert!(is_valid_postcode("GIR 0AA"));
        assert!(is_valid_postcode("B1 1AA"));
        assert!(is_valid_postcode("M1 1AE"));
        assert!(is_valid_postcode("CR2 6XH"));
        assert!(is_valid_postcode("DN55 1PT"));
        assert!(is_valid_postcode("W1A 0AX"));
        assert!(is_valid_postcode("EC1A 1BB"));
        assert!(is_valid_postcode("TF9 1RW"));
    }

    #[test]
    fn case_insensitive() {
        assert!(is_valid_postcode("sw1a 1aa"));
        assert!(is_valid_postcode("Sw1A 1aA"));
        assert!(is_valid_postcode("gir 0aa"));
    }

    #[test]
    fn rejects_malformed() {
        assert!(!is_valid_postcode("12345"));
        assert!(!is_valid_postcode("SW1A1AA"));
        assert!(!is_valid_postcode("SW1A  1AA"));
        assert!(!is_valid_postcode(" SW1A 1AA"));
        assert!(!is_valid_postcode("SW1"));
        assert!(!is_valid_postcode(""));
        assert!(!is_valid_postcode("99"));
    }

    #[test]
    fn rejects_restricted_inward_letters() {
        assert!(!is_valid_postcode("SW1A 1AC"));
        assert!(!is_valid_postcode("SW1A 1IA"));
        assert!(!is_valid_postcode("B1 1AK"));
        assert!(!is_valid_postcode("B1 1AM"));
        assert!(!is_valid_postcode("B1 1OA"));
        assert!(!is_valid_postcode("B1 1AV"));
    }

    #[test]
    fn rejects_restricted_area_letters() {
        assert!(!is_valid_postcode("Q1 1AA"));
        assert!(!is_valid_postcode("V1 1AA"));
        assert!(!is_valid_postcode("X1 1AA"));
    }
}
