//! Resource quantity normalization.
//!
//! Memory quantities are entered by users as `"100GB"`, `"64g"` or a bare
//! `"10"`. Everything normalizes to whole gigabytes; other units (MB, TB) are
//! rejected rather than guessed at, so callers must pre-convert.

use std::num::IntErrorKind;

use crate::error::{Result, EsubError};

/// Unit suffixes, checked in order. `GB` must precede `G`.
const GB_SUFFIXES: [&str; 2] = ["GB", "G"];

/// Parse a memory quantity into gigabytes.
///
/// Surrounding whitespace is ignored and matching is case-insensitive. The
/// first matching suffix is stripped; with no suffix the whole string must be
/// an integer. Integers beyond `i64` saturate to `i64::MAX`/`i64::MIN`, so a
/// huge request still compares above any cap.
pub fn parse_memory(raw: &str) -> Result<i64> {
    let s = raw.trim().to_uppercase();

    let digits = GB_SUFFIXES
        .iter()
        .find_map(|suffix| s.strip_suffix(*suffix))
        .unwrap_or(s.as_str());

    match digits.trim().parse::<i64>() {
        Ok(n) => Ok(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(EsubError::MalformedQuantity(format!(
                "invalid memory quantity '{raw}'"
            ))),
        },
    }
}

/// Canonical rendering of a gigabyte count (`64` -> `"64GB"`).
pub fn canonical_gb(gb: u32) -> String {
    format!("{gb}GB")
}
