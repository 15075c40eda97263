//! Identifier normalization for cross-system product matching.
//!
//! Storefront SKUs arrive in whatever format the integration revision of the
//! day produced: a raw EAN-13, an EAN with a leading apostrophe from a
//! spreadsheet export, an EAN with its leading zeros dropped, a short
//! internal code, or the supplier's numeric id reused as the SKU. The same
//! derivation rules are applied on both sides — when registering catalog
//! variants and when looking a storefront identifier up — so any spelling of
//! the same code lands on the same index key.

/// Length of the trailing suffix registered for long identifiers. Short
/// internal codes are frequently the last five characters of a full EAN.
const SUFFIX_LEN: usize = 5;

/// Largest digit count accepted by the trailing-digit fallback. A full
/// EAN-13 must never be mistaken for a supplier product id.
const MAX_GUESS_DIGITS: usize = 9;

/// Strips quoting/escaping artifacts and all whitespace.
#[must_use]
pub fn clean_identifier(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '\'' | '"' | '\\' | '`'))
        .collect()
}

/// Removes leading zeros, keeping a single zero for an all-zero input.
#[must_use]
pub fn strip_leading_zeros(s: &str) -> &str {
    let stripped = s.trim_start_matches('0');
    if stripped.is_empty() && !s.is_empty() {
        &s[s.len() - 1..]
    } else {
        stripped
    }
}

/// Derived lookup forms of a cleaned identifier, ordered most to least
/// literal and de-duplicated: the value itself, the leading-zero-stripped
/// value, and the trailing [`SUFFIX_LEN`]-character suffix (plus its
/// zero-stripped form).
#[must_use]
pub fn candidate_forms(clean: &str) -> Vec<String> {
    let mut forms: Vec<String> = Vec::with_capacity(4);
    push_unique(&mut forms, clean);
    push_unique(&mut forms, strip_leading_zeros(clean));

    let chars: Vec<char> = clean.chars().collect();
    if chars.len() > SUFFIX_LEN {
        let suffix: String = chars[chars.len() - SUFFIX_LEN..].iter().collect();
        push_unique(&mut forms, strip_leading_zeros(&suffix));
        push_unique(&mut forms, &suffix);
    }
    forms
}

/// Trailing digit run of a cleaned identifier, if it forms a plausible
/// supplier product id: 1 to [`MAX_GUESS_DIGITS`] digits, non-zero.
///
/// This backs the degraded last-resort resolution step; a 13-digit EAN is
/// deliberately implausible so unknown EANs fail loudly instead of being
/// guessed at.
#[must_use]
pub fn plausible_numeric_code(clean: &str) -> Option<i64> {
    let run_len = clean
        .chars()
        .rev()
        .take_while(char::is_ascii_digit)
        .count();
    if run_len == 0 || run_len > MAX_GUESS_DIGITS {
        return None;
    }
    let run: String = clean.chars().skip(clean.chars().count() - run_len).collect();
    let code: i64 = strip_leading_zeros(&run).parse().ok()?;
    (code > 0).then_some(code)
}

fn push_unique(forms: &mut Vec<String>, candidate: &str) {
    if !candidate.is_empty() && !forms.iter().any(|f| f == candidate) {
        forms.push(candidate.to_owned());
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
