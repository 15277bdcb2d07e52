//! Date format helpers.
//!
//! The form works with ISO `YYYY-MM-DD` dates (native date inputs) while the
//! backend stores the Brazilian `DD/MM/YYYY` form. Both converters are
//! deliberately lenient: input that does not match the expected pattern is
//! passed through unchanged so malformed dates are preserved rather than
//! dropped.

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `YYYY-MM-DD` → `DD/MM/YYYY`; anything else passes through.
pub fn to_date_br(value: &str) -> String {
    let bytes = value.as_bytes();
    if bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && all_digits(&value[0..4])
        && all_digits(&value[5..7])
        && all_digits(&value[8..10])
    {
        return format!("{}/{}/{}", &value[8..10], &value[5..7], &value[0..4]);
    }
    value.to_string()
}

/// `DD/MM/YYYY` → `YYYY-MM-DD`; empty input yields `""`, anything else
/// that does not match passes through.
pub fn br_to_iso(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let bytes = value.as_bytes();
    if bytes.len() == 10
        && bytes[2] == b'/'
        && bytes[5] == b'/'
        && all_digits(&value[0..2])
        && all_digits(&value[3..5])
        && all_digits(&value[6..10])
    {
        return format!("{}-{}-{}", &value[6..10], &value[3..5], &value[0..2]);
    }
    value.to_string()
}
