use super::error::FormatErrorKind;
use std::str::FromStr;

/// Parses an integer field, reporting the field name on failure.
pub(crate) fn parse_int<T: FromStr>(value: &str, field: &'static str) -> Result<T, FormatErrorKind> {
    value.parse().map_err(|_| FormatErrorKind::InvalidInt {
        field,
        value: value.to_string(),
    })
}

/// Parses a finite floating-point field, reporting the field name on failure.
pub(crate) fn parse_float(value: &str, field: &'static str) -> Result<f64, FormatErrorKind> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FormatErrorKind::InvalidFloat {
            field,
            value: value.to_string(),
        }),
    }
}

/// The first four characters of `s`, or all of it when shorter.
pub(crate) fn prefix4(s: &str) -> &str {
    match s.char_indices().nth(4) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
