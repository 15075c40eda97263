use super::*;

// ---------------------------------------------------------------------------
// clean_identifier
// ---------------------------------------------------------------------------

#[test]
fn clean_strips_spreadsheet_apostrophe() {
    assert_eq!(clean_identifier("'8436097094189"), "8436097094189");
}

#[test]
fn clean_strips_quotes_backslashes_and_whitespace() {
    assert_eq!(clean_identifier(" \"84360 97094189\"\\ "), "8436097094189");
}

#[test]
fn clean_keeps_plain_identifiers_untouched() {
    assert_eq!(clean_identifier("NE-12345"), "NE-12345");
}

#[test]
fn clean_of_empty_is_empty() {
    assert_eq!(clean_identifier("  '' "), "");
}

// ---------------------------------------------------------------------------
// strip_leading_zeros
// ---------------------------------------------------------------------------

#[test]
fn strips_leading_zeros() {
    assert_eq!(strip_leading_zeros("094189"), "94189");
}

#[test]
fn no_leading_zeros_is_identity() {
    assert_eq!(strip_leading_zeros("94189"), "94189");
}

#[test]
fn all_zeros_keeps_single_zero() {
    assert_eq!(strip_leading_zeros("000"), "0");
}

// ---------------------------------------------------------------------------
// candidate_forms
// ---------------------------------------------------------------------------

#[test]
fn ean_produces_suffix_forms() {
    let forms = candidate_forms("8436097094189");
    assert_eq!(forms[0], "8436097094189");
    assert!(forms.contains(&"94189".to_owned()), "forms: {forms:?}");
}

#[test]
fn zero_padded_code_produces_stripped_form() {
    let forms = candidate_forms("094189");
    assert!(forms.contains(&"094189".to_owned()));
    assert!(forms.contains(&"94189".to_owned()));
}

#[test]
fn short_code_has_no_suffix_form() {
    assert_eq!(candidate_forms("94189"), vec!["94189".to_owned()]);
}

#[test]
fn forms_are_deduplicated() {
    let forms = candidate_forms("94189");
    assert_eq!(forms.len(), 1);
}

#[test]
fn suffix_with_leading_zero_yields_both_spellings() {
    let forms = candidate_forms("8436097001234");
    assert!(forms.contains(&"01234".to_owned()), "forms: {forms:?}");
    assert!(forms.contains(&"1234".to_owned()), "forms: {forms:?}");
}

// ---------------------------------------------------------------------------
// plausible_numeric_code
// ---------------------------------------------------------------------------

#[test]
fn trailing_digits_of_prefixed_code_are_plausible() {
    assert_eq!(plausible_numeric_code("NE-12345"), Some(12345));
}

#[test]
fn bare_short_code_is_plausible() {
    assert_eq!(plausible_numeric_code("094189"), Some(94189));
}

#[test]
fn full_ean13_is_not_plausible() {
    assert_eq!(plausible_numeric_code("8436097094189"), None);
}

#[test]
fn non_numeric_identifier_is_not_plausible() {
    assert_eq!(plausible_numeric_code("OUT-OF-CATALOG"), None);
}

#[test]
fn zero_is_not_plausible() {
    assert_eq!(plausible_numeric_code("CODE-000"), None);
}

#[test]
fn empty_is_not_plausible() {
    assert_eq!(plausible_numeric_code(""), None);
}
